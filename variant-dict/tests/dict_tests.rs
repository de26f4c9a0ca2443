use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use page_fetcher::{FetchError, TextFetcher};
use proptest::prelude::*;
use variant_dict::{default_dictionary_config, CharMaps, DictError, DictionaryCache, DictionaryConfig, DuplicatePolicy};

const FORWARD: &str = "# simplified -> traditional\n后\t后 後\n干\t干 幹 乾\n丰\t丰 豐\n个\t個\n\n";
const REVERSE: &str = "# traditional -> simplified\n後\t后\n后\t后\n幹\t干\n乾\t乾 干\n豐\t丰\n個\t个\n";

fn test_config() -> DictionaryConfig {
    DictionaryConfig {
        forward_url: "mem://forward".into(),
        reverse_url: "mem://reverse".into(),
        ..default_dictionary_config()
    }
}

struct CountingFetcher {
    sources: HashMap<String, String>,
    calls: AtomicUsize,
}

impl CountingFetcher {
    fn new(sources: &[(&str, &str)]) -> Self {
        Self {
            sources: sources.iter().map(|(u, t)| (u.to_string(), t.to_string())).collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

impl TextFetcher for CountingFetcher {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sources
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Request { url: url.to_string(), message: "connection refused".into() })
    }
}

#[test]
fn forward_table_keeps_only_ambiguous_entries() {
    let maps = CharMaps::from_sources(FORWARD, REVERSE, &test_config()).expect("sources are well formed");

    assert_eq!(maps.forward.get("后"), Some("后後"));
    assert_eq!(maps.forward.get("干"), Some("干幹乾"));
    assert_eq!(maps.forward.get("丰"), Some("丰豐"));
    assert_eq!(maps.forward.get("个"), None);
    assert_eq!(maps.forward.len(), 3);
    assert_eq!(maps.info.forward.dropped_single, 1);
    assert_eq!(maps.info.forward.entries, 3);
}

#[test]
fn single_variant_entries_kept_on_request() {
    let cfg = DictionaryConfig { keep_single_variant: true, ..test_config() };
    let maps = CharMaps::from_sources(FORWARD, REVERSE, &cfg).expect("sources are well formed");

    assert_eq!(maps.forward.get("个"), Some("個"));
    assert_eq!(maps.info.forward.dropped_single, 0);
}

#[test]
fn reverse_table_keeps_every_entry_with_first_listed_form() {
    let maps = CharMaps::from_sources(FORWARD, REVERSE, &test_config()).expect("sources are well formed");

    assert_eq!(maps.reverse.len(), 6);
    assert_eq!(maps.reverse.get("個"), Some("个"));
    assert_eq!(maps.reverse.get("乾"), Some("乾"));
    assert_eq!(maps.info.reverse.multi_valued, 1);
    assert_eq!(maps.simplified_of('後'), Some("后"));
    assert_eq!(maps.ambiguous_variants('後'), Some("后後"));
    assert_eq!(maps.ambiguous_variants('個'), None);
    assert_eq!(maps.ambiguous_variants('x'), None);
}

#[test]
fn parsing_same_text_twice_is_identical() {
    let a = CharMaps::from_sources(FORWARD, REVERSE, &test_config()).expect("first parse");
    let b = CharMaps::from_sources(FORWARD, REVERSE, &test_config()).expect("second parse");
    assert_eq!(a, b);
    assert_eq!(a.info.forward.sha256.len(), 64);
}

#[test]
fn crlf_line_endings_are_accepted() {
    let forward = FORWARD.replace('\n', "\r\n");
    let maps = CharMaps::from_sources(&forward, REVERSE, &test_config()).expect("crlf source parses");
    assert_eq!(maps.forward.get("后"), Some("后後"));
}

#[test]
fn line_without_tab_is_a_format_error() {
    let bad = "# header\n后\t后 後\n干 干 幹\n";
    let err = CharMaps::from_sources(bad, REVERSE, &test_config()).expect_err("missing tab must fail");
    match err {
        DictError::Format { url, line, .. } => {
            assert_eq!(url, "mem://forward");
            assert_eq!(line, 3);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn extra_fields_and_empty_variant_lists_are_format_errors() {
    let three_fields = "后\t后\t後\n";
    assert!(matches!(
        CharMaps::from_sources(three_fields, REVERSE, &test_config()),
        Err(DictError::Format { line: 1, .. })
    ));
    let empty = "后\t \n";
    assert!(matches!(
        CharMaps::from_sources(empty, REVERSE, &test_config()),
        Err(DictError::Format { line: 1, .. })
    ));
}

#[test]
fn duplicate_keys_follow_the_configured_policy() {
    let reverse = "後\t后\n後\t後\n";

    let maps = CharMaps::from_sources(FORWARD, reverse, &test_config()).expect("last-wins accepts repeats");
    assert_eq!(maps.reverse.get("後"), Some("後"));
    assert_eq!(maps.info.reverse.overwritten, 1);

    let strict = DictionaryConfig { duplicate_policy: DuplicatePolicy::Reject, ..test_config() };
    let err = CharMaps::from_sources(FORWARD, reverse, &strict).expect_err("reject policy fails");
    assert!(matches!(err, DictError::Format { line: 2, .. }));

    let identical = "後\t后\n後\t后\n";
    let maps = CharMaps::from_sources(FORWARD, identical, &strict).expect("identical repeats are harmless");
    assert_eq!(maps.info.reverse.overwritten, 0);
}

#[test]
fn unreachable_source_is_a_source_error() {
    let fetcher = CountingFetcher::new(&[("mem://forward", FORWARD)]);
    let err = CharMaps::load(&fetcher, &test_config()).expect_err("reverse source is missing");
    match err {
        DictError::Source { url, .. } => assert_eq!(url, "mem://reverse"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn cache_fetches_once_until_reloaded() {
    let fetcher = CountingFetcher::new(&[("mem://forward", FORWARD), ("mem://reverse", REVERSE)]);
    let cache = DictionaryCache::new();
    let cfg = test_config();

    let first = cache.get_or_load(&fetcher, &cfg).expect("first load");
    let second = cache.get_or_load(&fetcher, &cfg).expect("cached load");
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);

    cache.reload(&fetcher, &cfg).expect("forced reload");
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 4);

    let other = DictionaryConfig { keep_single_variant: true, ..cfg.clone() };
    let widened = cache.get_or_load(&fetcher, &other).expect("different options reload");
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 6);
    assert_eq!(widened.forward.get("个"), Some("個"));

    cache.clear();
    assert!(cache.cached(&other).is_none());
}

fn cjk() -> impl Strategy<Value = char> {
    prop::char::range('\u{4e00}', '\u{4e30}')
}

fn table() -> impl Strategy<Value = Vec<(char, Vec<char>)>> {
    prop::collection::vec((cjk(), prop::collection::vec(cjk(), 1..4)), 0..40)
}

fn render(lines: &[(char, Vec<char>)]) -> String {
    lines
        .iter()
        .map(|(k, vs)| {
            let vs: Vec<String> = vs.iter().map(|c| c.to_string()).collect();
            format!("{k}\t{}\n", vs.join(" "))
        })
        .collect()
}

proptest! {
    #[test]
    fn forward_entries_always_have_two_or_more_variants(lines in table()) {
        let text = render(&lines);
        let maps = CharMaps::from_sources(&text, "", &test_config())
            .unwrap_or_else(|e| panic!("generated table failed to parse: {e}"));
        for (_, variants) in maps.forward.iter() {
            prop_assert!(variants.chars().count() >= 2);
        }
    }

    #[test]
    fn reverse_table_is_total_and_single_valued(lines in table()) {
        let text = render(&lines);
        let maps = CharMaps::from_sources("", &text, &test_config())
            .unwrap_or_else(|e| panic!("generated table failed to parse: {e}"));
        let mut last: HashMap<char, char> = HashMap::new();
        for (k, vs) in &lines {
            last.insert(*k, vs[0]);
        }
        prop_assert_eq!(maps.reverse.len(), last.len());
        for (k, first) in last {
            let expected = first.to_string();
            let got = maps.simplified_of(k);
            prop_assert_eq!(got.map(|s| s.chars().count()), Some(1));
            prop_assert_eq!(got, Some(expected.as_str()));
        }
    }
}

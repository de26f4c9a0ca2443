use std::collections::HashMap;

use page_fetcher::TextFetcher;
use sha2::{Digest, Sha256};

use crate::config::{DictionaryConfig, DuplicatePolicy};
use crate::parse::{parse_lines, MappingLine};
use crate::DictError;

/// Simplified character -> its distinct traditional variants, joined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardMap {
    entries: HashMap<String, String>,
}

/// Traditional character -> its simplified form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseMap {
    entries: HashMap<String, String>,
}

macro_rules! impl_map_accessors {
    ($t:ty) => {
        impl $t {
            pub fn get(&self, key: &str) -> Option<&str> {
                self.entries.get(key).map(String::as_str)
            }
            pub fn contains_key(&self, key: &str) -> bool { self.entries.contains_key(key) }
            pub fn len(&self) -> usize { self.entries.len() }
            pub fn is_empty(&self) -> bool { self.entries.is_empty() }
            pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
                self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
            }
        }

        impl FromIterator<(String, String)> for $t {
            fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
                Self { entries: iter.into_iter().collect() }
            }
        }
    };
}

impl_map_accessors!(ForwardMap);
impl_map_accessors!(ReverseMap);

/// Load statistics for one source table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceInfo {
    pub url: String,
    /// Hex SHA-256 of the source text.
    pub sha256: String,
    pub entries: usize,
    /// Forward lines dropped because they list a single variant.
    pub dropped_single: usize,
    /// Keys replaced by a later line with a different value.
    pub overwritten: usize,
    /// Reverse lines listing more than one simplified form (first one kept).
    pub multi_valued: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryInfo {
    pub forward: SourceInfo,
    pub reverse: SourceInfo,
}

/// The two immutable tables that drive ambiguity detection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharMaps {
    pub forward: ForwardMap,
    pub reverse: ReverseMap,
    pub info: DictionaryInfo,
}

impl CharMaps {
    pub fn new(forward: ForwardMap, reverse: ReverseMap) -> Self {
        Self { forward, reverse, info: DictionaryInfo::default() }
    }

    /// Fetch both sources and build the tables. Fails before parsing if either source is unreachable.
    pub fn load<F: TextFetcher + ?Sized>(fetcher: &F, cfg: &DictionaryConfig) -> Result<Self, DictError> {
        let forward_text = fetch_source(fetcher, &cfg.forward_url)?;
        let reverse_text = fetch_source(fetcher, &cfg.reverse_url)?;
        Self::from_sources(&forward_text, &reverse_text, cfg)
    }

    /// Build the tables from already retrieved source text.
    pub fn from_sources(forward_text: &str, reverse_text: &str, cfg: &DictionaryConfig) -> Result<Self, DictError> {
        let (forward, forward_info) = parse_forward(forward_text, cfg)?;
        let (reverse, reverse_info) = parse_reverse(reverse_text, cfg)?;
        log::info!(
            "dictionaries ready: {} ambiguous forward entries ({} single-variant dropped), {} reverse entries",
            forward.len(),
            forward_info.dropped_single,
            reverse.len()
        );
        Ok(Self { forward, reverse, info: DictionaryInfo { forward: forward_info, reverse: reverse_info } })
    }

    /// Simplified form of `c`, if `c` is a known traditional character.
    pub fn simplified_of(&self, c: char) -> Option<&str> {
        let mut buf = [0u8; 4];
        self.reverse.get(c.encode_utf8(&mut buf))
    }

    /// Variant set of `c` when its simplified form expands to several traditional characters.
    ///
    /// Single-variant forward entries (kept with `keep_single_variant`) never count as ambiguous.
    pub fn ambiguous_variants(&self, c: char) -> Option<&str> {
        let s = self.simplified_of(c)?;
        self.forward.get(s).filter(|v| v.chars().count() > 1)
    }
}

fn fetch_source<F: TextFetcher + ?Sized>(fetcher: &F, url: &str) -> Result<String, DictError> {
    log::debug!("fetching dictionary source {url}");
    fetcher
        .fetch_text(url)
        .map_err(|source| DictError::Source { url: url.to_string(), source })
}

fn new_info(url: &str, text: &str) -> SourceInfo {
    SourceInfo {
        url: url.to_string(),
        sha256: hex::encode(Sha256::digest(text.as_bytes())),
        ..SourceInfo::default()
    }
}

/// Build the forward table from source text; single-variant lines are dropped unless configured otherwise.
pub fn parse_forward(text: &str, cfg: &DictionaryConfig) -> Result<(ForwardMap, SourceInfo), DictError> {
    let mut info = new_info(&cfg.forward_url, text);
    let mut entries = HashMap::new();
    for line in parse_lines(text, &cfg.forward_url)? {
        let joined = line.joined();
        if joined.chars().count() > 1 || cfg.keep_single_variant {
            insert_entry(&mut entries, &line, joined, cfg, &cfg.forward_url, &mut info)?;
        } else {
            info.dropped_single += 1;
        }
    }
    info.entries = entries.len();
    Ok((ForwardMap { entries }, info))
}

/// Build the reverse table from source text, keeping the first listed form of each line.
pub fn parse_reverse(text: &str, cfg: &DictionaryConfig) -> Result<(ReverseMap, SourceInfo), DictError> {
    let mut info = new_info(&cfg.reverse_url, text);
    let mut entries = HashMap::new();
    for line in parse_lines(text, &cfg.reverse_url)? {
        if line.variants.len() > 1 {
            info.multi_valued += 1;
        }
        let first = line.variants[0].clone();
        insert_entry(&mut entries, &line, first, cfg, &cfg.reverse_url, &mut info)?;
    }
    info.entries = entries.len();
    Ok((ReverseMap { entries }, info))
}

fn insert_entry(
    entries: &mut HashMap<String, String>,
    line: &MappingLine,
    value: String,
    cfg: &DictionaryConfig,
    source: &str,
    info: &mut SourceInfo,
) -> Result<(), DictError> {
    match entries.get(&line.key) {
        Some(prev) if *prev == value => return Ok(()),
        Some(prev) => match cfg.duplicate_policy {
            DuplicatePolicy::Reject => {
                return Err(DictError::Format {
                    url: source.to_string(),
                    line: line.line_no,
                    message: format!("key `{}` repeats with a different value ({prev} vs {value})", line.key),
                });
            }
            DuplicatePolicy::LastWins => {
                log::warn!("{source}:{}: key `{}` redefined, {prev} -> {value}", line.line_no, line.key);
                info.overwritten += 1;
            }
        },
        None => {}
    }
    entries.insert(line.key.clone(), value);
    Ok(())
}

use indexmap::IndexMap;
use variant_model::{Candidate, DocumentNode, Occurrence, Report, ReportEntry};

fn entry(c: char, links: &[&str]) -> ReportEntry {
    ReportEntry {
        character: c,
        variants: format!("{c}x"),
        occurrences: links
            .iter()
            .map(|l| Occurrence { chapter: "一".into(), context: c.to_string(), link: l.to_string() })
            .collect(),
    }
}

#[test]
fn report_keys_are_sorted_by_code_point() {
    let mut grouped = IndexMap::new();
    for e in [entry('髮', &["a"]), entry('乾', &["b", "c"]), entry('後', &["d"])] {
        grouped.insert(e.character, e);
    }
    let report = Report::from_entries(grouped);

    let keys: Vec<char> = report.keys().collect();
    assert_eq!(keys, vec!['乾', '後', '髮']);
    assert_eq!(report.len(), 3);
    assert_eq!(report.total_occurrences(), 4);
}

#[test]
fn report_serializes_as_ordered_list() {
    let mut grouped = IndexMap::new();
    grouped.insert('後', entry('後', &["https://example.org/a#p1"]));
    grouped.insert('乾', entry('乾', &[]));
    let json = serde_json::to_value(Report::from_entries(grouped)).expect("report serializes");

    let list = json.as_array().expect("report is a list");
    assert_eq!(list[0]["character"], "乾");
    assert_eq!(list[1]["occurrences"][0]["link"], "https://example.org/a#p1");
}

#[test]
fn anchor_joins_link_and_paragraph() {
    let c = Candidate {
        character: '後',
        variants: "后後".into(),
        context: "之後".into(),
        chapter: "學而".into(),
        link: "https://ctext.org/analects/xue-er".into(),
        paragraph_id: "n2".into(),
    };
    assert_eq!(c.anchor(), "https://ctext.org/analects/xue-er#n2");
}

#[test]
fn document_node_exposes_title_and_url() {
    let node = DocumentNode::Chapter(variant_model::ChapterPage {
        url: "https://example.org/?chapter=1".into(),
        title: "孝經".into(),
        ..Default::default()
    });
    assert_eq!(node.title(), "孝經");
    assert_eq!(node.url(), "https://example.org/?chapter=1");
}

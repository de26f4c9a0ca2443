//! Shared models used across crates

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

/// Chapter label -> absolute chapter URL, in page order.
/// Re-inserting a label keeps its first position and replaces the URL.
pub type ChapterLinks = IndexMap<String, String>;

/// Paragraph identifier -> raw paragraph text, in page order.
pub type Paragraphs = IndexMap<String, String>;

/// A book page: title plus its ordered chapter links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPage {
    /// URL the page was fetched from.
    pub url: String,
    /// Empty when the title selector did not match.
    pub title: String,
    pub chapters: ChapterLinks,
    /// Name of the layout strategy that produced `chapters`; `None` when no layout matched.
    pub matched_layout: Option<String>,
}

/// A chapter page: title plus its ordered paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterPage {
    pub url: String,
    pub title: String,
    pub paragraphs: Paragraphs,
    pub matched_layout: Option<String>,
}

/// One node of the book -> chapter -> paragraph hierarchy, created per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentNode {
    Book(BookPage),
    Chapter(ChapterPage),
}

impl DocumentNode {
    pub fn title(&self) -> &str {
        match self {
            DocumentNode::Book(b) => &b.title,
            DocumentNode::Chapter(c) => &c.title,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            DocumentNode::Book(b) => &b.url,
            DocumentNode::Chapter(c) => &c.url,
        }
    }
}

/// A single location where the reverse conversion may have picked the wrong variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// The traditional character found in the text.
    pub character: char,
    /// Every traditional character the shared simplified form expands to, joined.
    pub variants: String,
    /// Up to 15 characters on each side of the flagged one, folded to a single line.
    pub context: String,
    pub chapter: String,
    /// Chapter URL (without fragment).
    pub link: String,
    pub paragraph_id: String,
}

impl Candidate {
    /// Deep link to the paragraph: `<link>#<paragraph_id>`.
    pub fn anchor(&self) -> String {
        format!("{}#{}", self.link, self.paragraph_id)
    }
}

/// One occurrence row inside a report entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub chapter: String,
    pub context: String,
    pub link: String,
}

/// All occurrences of one flagged character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub character: char,
    pub variants: String,
    pub occurrences: Vec<Occurrence>,
}

impl ReportEntry {
    pub fn variant_chars(&self) -> Vec<char> {
        self.variants.chars().collect()
    }
}

/// Character-keyed report, keys in ascending code-point order.
///
/// Serializes as the ordered list of its entries. Equality is order-sensitive.
#[derive(Debug, Clone, Default)]
pub struct Report {
    entries: IndexMap<char, ReportEntry>,
}

impl PartialEq for Report {
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for Report {}

impl Report {
    /// Builds a report from grouped entries in any order; keys are sorted here.
    pub fn from_entries(mut entries: IndexMap<char, ReportEntry>) -> Self {
        entries.sort_keys();
        Self { entries }
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn get(&self, c: char) -> Option<&ReportEntry> { self.entries.get(&c) }
    pub fn keys(&self) -> impl Iterator<Item = char> + '_ { self.entries.keys().copied() }
    pub fn entries(&self) -> impl Iterator<Item = &ReportEntry> { self.entries.values() }

    /// Total number of occurrence rows across all characters.
    pub fn total_occurrences(&self) -> usize {
        self.entries.values().map(|e| e.occurrences.len()).sum()
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.values())
    }
}

/// A chapter left out of the report because its page could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedChapter {
    pub chapter: String,
    pub link: String,
    pub error: String,
}

/// Result bundle of one audit request.
#[derive(Debug, Clone, Serialize)]
pub struct AuditOutcome {
    /// The input URL as given.
    pub url: String,
    pub title: String,
    /// RFC 3339 timestamp (UTC).
    pub generated_at: String,
    pub chapters_visited: usize,
    pub skipped: Vec<SkippedChapter>,
    pub report: Report,
}

use variant_model::{ChapterPage, Paragraphs};

use crate::html::PageDoc;
use crate::layouts::ChapterStrategy;

/// Selector for the chapter title (the document title).
pub const CHAPTER_TITLE_SELECTOR: &str = "title";

/// Parse a chapter page into its title and ordered paragraphs.
pub fn parse_chapter_with(html: &str, page_url: &str, strategies: &[Box<dyn ChapterStrategy>]) -> ChapterPage {
    let doc = PageDoc::parse(html);
    let title = doc.first_text(CHAPTER_TITLE_SELECTOR).unwrap_or_default();

    let mut paragraphs = Paragraphs::new();
    let mut matched: Option<&'static str> = None;
    for s in strategies {
        let rows = s.extract_paragraphs(&doc);
        if !rows.is_empty() {
            matched = Some(s.name());
            paragraphs.extend(rows);
            break;
        }
    }
    if matched.is_none() {
        log::debug!("no known chapter layout matched {page_url}");
    }

    ChapterPage {
        url: page_url.to_string(),
        title,
        paragraphs,
        matched_layout: matched.map(str::to_string),
    }
}

//! Known page layouts, tried in order until one yields a non-empty result.
//!
//! Each strategy returns an empty list when its layout does not apply; none of
//! them raise. New layouts are added by pushing another strategy onto the list
//! handed to [`crate::PageParser`].

use crate::html::{select_within, trimmed_text, PageDoc};

/// Extracts chapter links from a book page.
pub trait BookStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    /// `(visible text, raw href)` pairs in document order.
    fn extract_links(&self, doc: &PageDoc) -> Vec<(String, String)>;
}

/// Extracts paragraphs from a chapter page.
pub trait ChapterStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    /// `(paragraph id, text)` pairs in document order.
    fn extract_paragraphs(&self, doc: &PageDoc) -> Vec<(String, String)>;
}

/// Anchors matched by one CSS selector.
#[derive(Debug, Clone, Copy)]
pub struct SelectorLinks {
    pub name: &'static str,
    pub selector: &'static str,
}

impl SelectorLinks {
    pub const fn new(name: &'static str, selector: &'static str) -> Self {
        Self { name, selector }
    }
}

impl BookStrategy for SelectorLinks {
    fn name(&self) -> &'static str { self.name }

    fn extract_links(&self, doc: &PageDoc) -> Vec<(String, String)> {
        doc.select(self.selector)
            .into_iter()
            .filter_map(|a| match a.value().attr("href") {
                Some(href) => Some((trimmed_text(&a), href.to_string())),
                None => {
                    log::debug!("{}: anchor without href skipped", self.name);
                    None
                }
            })
            .collect()
    }
}

/// Chapter table of contents ("directory listing").
pub const DIRECTORY_LISTING: SelectorLinks = SelectorLinks::new("directory-listing", "div.ctext span a");
/// Full-text page, variant A.
pub const FULL_TEXT_A: SelectorLinks = SelectorLinks::new("full-text-a", "div#content3 > a");
/// Full-text page, variant B.
pub const FULL_TEXT_B: SelectorLinks = SelectorLinks::new("full-text-b", "div#content2 > a");

/// Search-result style rows: `tr.result` with the text in the second `td.ctext` cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultRows;

impl ChapterStrategy for ResultRows {
    fn name(&self) -> &'static str { "result-rows" }

    fn extract_paragraphs(&self, doc: &PageDoc) -> Vec<(String, String)> {
        let mut out = Vec::new();
        for row in doc.select("tr.result") {
            let Some(id) = row.value().attr("id") else { continue };
            let cells = select_within(&row, "td.ctext");
            match cells.get(1) {
                Some(cell) => out.push((id.to_string(), trimmed_text(cell))),
                None => log::debug!("result row {id} has no text cell"),
            }
        }
        out
    }
}

/// Full-text container rows: `div#content3 tr`, keyed by `id`; rows without one are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullTextRows;

impl ChapterStrategy for FullTextRows {
    fn name(&self) -> &'static str { "full-text-rows" }

    fn extract_paragraphs(&self, doc: &PageDoc) -> Vec<(String, String)> {
        doc.select("div#content3 tr")
            .into_iter()
            .filter_map(|row| {
                let id = row.value().attr("id")?;
                Some((id.to_string(), trimmed_text(&row)))
            })
            .collect()
    }
}

pub fn default_book_strategies() -> Vec<Box<dyn BookStrategy>> {
    vec![Box::new(DIRECTORY_LISTING), Box::new(FULL_TEXT_A), Box::new(FULL_TEXT_B)]
}

pub fn default_chapter_strategies() -> Vec<Box<dyn ChapterStrategy>> {
    vec![Box::new(ResultRows), Box::new(FullTextRows)]
}

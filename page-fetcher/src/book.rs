use reqwest::Url;
use variant_model::{BookPage, ChapterLinks};

use crate::html::PageDoc;
use crate::layouts::BookStrategy;

/// Selector for the book title; a miss leaves the title empty.
pub const BOOK_TITLE_SELECTOR: &str = "h2";

/// Parse a book page into its title and ordered chapter links.
///
/// Links are resolved against the origin (scheme, host, port) of `page_url`.
/// A repeated visible text keeps its first position and takes the last URL.
pub fn parse_book_with(html: &str, page_url: &str, strategies: &[Box<dyn BookStrategy>]) -> BookPage {
    let doc = PageDoc::parse(html);
    let title = doc.first_text(BOOK_TITLE_SELECTOR).unwrap_or_default();

    let mut matched: Option<&'static str> = None;
    let mut raw: Vec<(String, String)> = Vec::new();
    for s in strategies {
        raw = s.extract_links(&doc);
        if !raw.is_empty() {
            matched = Some(s.name());
            break;
        }
    }
    if matched.is_none() {
        log::debug!("no known book layout matched {page_url}");
    }

    let origin = origin_of(page_url);
    let mut chapters = ChapterLinks::new();
    for (label, href) in raw {
        match resolve(origin.as_ref(), &href) {
            Some(abs) => {
                if let Some(prev) = chapters.insert(label.clone(), abs) {
                    log::debug!("chapter label `{label}` repeated; replacing {prev}");
                }
            }
            None => log::warn!("cannot resolve chapter link `{href}` on {page_url}"),
        }
    }

    BookPage {
        url: page_url.to_string(),
        title,
        chapters,
        matched_layout: matched.map(str::to_string),
    }
}

/// Origin of `page_url` as a base URL, e.g. `https://ctext.org/`.
pub fn origin_of(page_url: &str) -> Option<Url> {
    let url = Url::parse(page_url).ok()?;
    let origin = url.origin();
    if !origin.is_tuple() {
        return None;
    }
    Url::parse(&origin.ascii_serialization()).ok()
}

fn resolve(origin: Option<&Url>, href: &str) -> Option<String> {
    let joined = match origin {
        Some(base) => base.join(href).ok()?,
        None => Url::parse(href).ok()?,
    };
    Some(joined.to_string())
}

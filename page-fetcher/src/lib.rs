//! Remote page retrieval and layout-tolerant extraction of books and chapters.

pub mod config;
pub mod http;
pub mod url_kind;
pub mod html;
pub mod layouts;
pub mod book;
pub mod chapter;

use variant_model::{BookPage, ChapterPage, DocumentNode};

pub use config::{default_fetch_config, FetchConfig, FETCH_DEFAULTS};
pub use http::{FetchError, HttpFetcher, TextFetcher};
pub use url_kind::{classify_url, InvalidUrl, UrlKind};

use layouts::{BookStrategy, ChapterStrategy};

/// Failure resolving an input URL to a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    InvalidUrl(#[from] InvalidUrl),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Book and chapter extraction with ordered layout fallback chains.
pub struct PageParser {
    book: Vec<Box<dyn BookStrategy>>,
    chapter: Vec<Box<dyn ChapterStrategy>>,
}

impl Default for PageParser {
    fn default() -> Self {
        Self {
            book: layouts::default_book_strategies(),
            chapter: layouts::default_chapter_strategies(),
        }
    }
}

impl PageParser {
    pub fn new() -> Self { Self::default() }

    /// Replace the book layout chain; earlier strategies take precedence.
    pub fn with_book_strategies(mut self, strategies: Vec<Box<dyn BookStrategy>>) -> Self {
        self.book = strategies;
        self
    }

    /// Replace the chapter layout chain; earlier strategies take precedence.
    pub fn with_chapter_strategies(mut self, strategies: Vec<Box<dyn ChapterStrategy>>) -> Self {
        self.chapter = strategies;
        self
    }

    pub fn parse_book(&self, html: &str, page_url: &str) -> BookPage {
        book::parse_book_with(html, page_url, &self.book)
    }

    pub fn parse_chapter(&self, html: &str, page_url: &str) -> ChapterPage {
        chapter::parse_chapter_with(html, page_url, &self.chapter)
    }

    pub fn fetch_book<F: TextFetcher + ?Sized>(&self, fetcher: &F, url: &str) -> Result<BookPage, FetchError> {
        let html = fetcher.fetch_text(url)?;
        Ok(self.parse_book(&html, url))
    }

    pub fn fetch_chapter<F: TextFetcher + ?Sized>(&self, fetcher: &F, url: &str) -> Result<ChapterPage, FetchError> {
        let html = fetcher.fetch_text(url)?;
        Ok(self.parse_chapter(&html, url))
    }

    /// Classify `url` and fetch it as a book or a chapter.
    pub fn fetch_document<F: TextFetcher + ?Sized>(&self, fetcher: &F, url: &str) -> Result<DocumentNode, PageError> {
        let url = url.trim();
        match classify_url(url)? {
            UrlKind::Book => Ok(DocumentNode::Book(self.fetch_book(fetcher, url)?)),
            UrlKind::Chapter => Ok(DocumentNode::Chapter(self.fetch_chapter(fetcher, url)?)),
        }
    }
}

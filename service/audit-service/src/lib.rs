//! Audit orchestration: classify the input, load the tables, walk the document,
//! detect and aggregate.

pub mod progress;
pub mod render;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use page_fetcher::{classify_url, FetchConfig, FetchError, HttpFetcher, InvalidUrl, PageError, PageParser, TextFetcher};
use rayon::prelude::*;
use variant_detect::{Aggregator, Detector, IgnoreSet};
use variant_dict::{CharMaps, DictError, DictionaryCache, DictionaryConfig};
use variant_model::{AuditOutcome, Candidate, ChapterPage, DocumentNode, SkippedChapter};

pub use progress::{LogSink, NoopSink, ProgressEvent, ProgressSink};

use progress::emit;

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidUrl),
    #[error(transparent)]
    Dictionary(#[from] DictError),
    #[error("page fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("worker pool error: {0}")]
    Pool(String),
    #[error("audit canceled")]
    Canceled,
}

impl From<PageError> for AuditError {
    fn from(e: PageError) -> Self {
        match e {
            PageError::InvalidUrl(e) => AuditError::InvalidInput(e),
            PageError::Fetch(e) => AuditError::Fetch(e),
        }
    }
}

/// Shared defaults for the service layer.
#[derive(Debug, Clone, Copy)]
pub struct AuditDefaults {
    pub max_workers: usize,
}

pub const AUDIT_DEFAULTS: AuditDefaults = AuditDefaults { max_workers: 4 };

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    pub dictionary: DictionaryConfig,
    pub fetch: FetchConfig,
    /// Upper bound on chapters fetched and scanned at once; 0 is treated as 1.
    pub max_workers: usize,
    /// Characters never reported.
    pub ignore: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            dictionary: DictionaryConfig::default(),
            fetch: FetchConfig::default(),
            max_workers: AUDIT_DEFAULTS.max_workers,
            ignore: String::new(),
        }
    }
}

#[derive(Clone, Default, Debug)]
pub struct CancelToken(Arc<AtomicBool>);
impl CancelToken {
    pub fn new() -> Self { Self(Arc::new(AtomicBool::new(false))) }
    pub fn cancel(&self) { self.0.store(true, Ordering::Relaxed); }
    pub fn is_canceled(&self) -> bool { self.0.load(Ordering::Relaxed) }
}

fn is_canceled(cancel: Option<&CancelToken>) -> bool {
    cancel.map(|c| c.is_canceled()).unwrap_or(false)
}

enum ChapterScan {
    Scanned(Vec<Candidate>),
    Skipped(SkippedChapter),
    Canceled,
}

pub struct AuditService<F: TextFetcher = HttpFetcher> {
    cfg: AuditConfig,
    fetcher: F,
    parser: PageParser,
    dictionaries: DictionaryCache,
}

impl AuditService<HttpFetcher> {
    /// Service backed by the blocking HTTP client built from `cfg.fetch`.
    pub fn new(cfg: AuditConfig) -> Result<Self, AuditError> {
        let fetcher = HttpFetcher::new(&cfg.fetch)?;
        Ok(Self::with_fetcher(cfg, fetcher))
    }
}

impl<F: TextFetcher> AuditService<F> {
    pub fn with_fetcher(cfg: AuditConfig, fetcher: F) -> Self {
        Self { cfg, fetcher, parser: PageParser::default(), dictionaries: DictionaryCache::new() }
    }

    /// Replace the layout chains used for book and chapter pages.
    pub fn with_parser(mut self, parser: PageParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn config(&self) -> &AuditConfig { &self.cfg }

    pub fn fetcher(&self) -> &F { &self.fetcher }

    /// Tables for the configured sources, loaded once and reused by later audits.
    pub fn dictionaries(&self, sink: &dyn ProgressSink) -> Result<Arc<CharMaps>, AuditError> {
        let cfg = &self.cfg.dictionary;
        if let Some(maps) = self.dictionaries.cached(cfg) {
            emit(sink, loaded_event(&maps, true));
            return Ok(maps);
        }
        emit(sink, ProgressEvent::DictionaryLoading {
            forward_url: cfg.forward_url.clone(),
            reverse_url: cfg.reverse_url.clone(),
        });
        let maps = self.dictionaries.get_or_load(&self.fetcher, cfg)?;
        emit(sink, loaded_event(&maps, false));
        Ok(maps)
    }

    /// Drop the cached tables and fetch both sources again.
    pub fn reload_dictionaries(&self, sink: &dyn ProgressSink) -> Result<Arc<CharMaps>, AuditError> {
        let cfg = &self.cfg.dictionary;
        emit(sink, ProgressEvent::DictionaryLoading {
            forward_url: cfg.forward_url.clone(),
            reverse_url: cfg.reverse_url.clone(),
        });
        let maps = self.dictionaries.reload(&self.fetcher, cfg)?;
        emit(sink, loaded_event(&maps, false));
        Ok(maps)
    }

    /// Audit a book or chapter URL.
    ///
    /// The URL is classified before anything is fetched, and the tables are loaded
    /// before any page is fetched. Chapter pages that fail to download are skipped
    /// and listed in [`AuditOutcome::skipped`]; a failing top-level page is fatal.
    pub fn audit(
        &self,
        url: &str,
        sink: &dyn ProgressSink,
        cancel: Option<&CancelToken>,
    ) -> Result<AuditOutcome, AuditError> {
        let target = url.trim();
        classify_url(target)?;
        if is_canceled(cancel) {
            return Err(self.canceled(sink));
        }
        let maps = self.dictionaries(sink)?;
        let ignore = IgnoreSet::from_chars(&self.cfg.ignore);
        let detector = Detector::new(&maps, &ignore);

        if is_canceled(cancel) {
            return Err(self.canceled(sink));
        }
        let mut agg = Aggregator::new();
        let mut skipped = Vec::new();
        let (title, chapters_visited) = match self.parser.fetch_document(&self.fetcher, target)? {
            DocumentNode::Book(book) => {
                if book.matched_layout.is_none() {
                    log::debug!("no chapter layout matched {target}");
                }
                emit(sink, ProgressEvent::DocumentResolved { title: book.title.clone(), chapters: book.chapters.len() });
                let chapters: Vec<(usize, &String, &String)> =
                    book.chapters.iter().enumerate().map(|(i, (label, link))| (i + 1, label, link)).collect();
                let total = chapters.len();
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(self.cfg.max_workers.max(1))
                    .build()
                    .map_err(|e| AuditError::Pool(e.to_string()))?;
                let scans: Vec<ChapterScan> = pool.install(|| {
                    chapters
                        .par_iter()
                        .map(|(index, label, link)| self.scan_chapter(&detector, *index, total, label, link, sink, cancel))
                        .collect()
                });

                let mut visited = 0;
                let mut was_canceled = false;
                for scan in scans {
                    match scan {
                        ChapterScan::Scanned(found) => {
                            visited += 1;
                            agg.extend(found);
                        }
                        ChapterScan::Skipped(s) => skipped.push(s),
                        ChapterScan::Canceled => was_canceled = true,
                    }
                }
                if was_canceled {
                    return Err(self.canceled(sink));
                }
                (book.title, visited)
            }
            DocumentNode::Chapter(page) => {
                let label = if page.title.is_empty() { target.to_string() } else { page.title.clone() };
                emit(sink, ProgressEvent::DocumentResolved { title: label.clone(), chapters: 1 });
                agg.extend(scan_paragraphs(&detector, &page, &label, target, sink));
                (page.title, 1)
            }
        };

        let report = agg.finish();
        emit(sink, ProgressEvent::Aggregated { characters: report.len(), occurrences: report.total_occurrences() });
        log::info!(
            "audit of {target}: {} character(s), {} occurrence(s), {} chapter(s) skipped",
            report.len(),
            report.total_occurrences(),
            skipped.len()
        );
        Ok(AuditOutcome {
            url: url.to_string(),
            title,
            generated_at: Utc::now().to_rfc3339(),
            chapters_visited,
            skipped,
            report,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn scan_chapter(
        &self,
        detector: &Detector<'_>,
        index: usize,
        total: usize,
        label: &str,
        link: &str,
        sink: &dyn ProgressSink,
        cancel: Option<&CancelToken>,
    ) -> ChapterScan {
        if is_canceled(cancel) {
            return ChapterScan::Canceled;
        }
        emit(sink, ProgressEvent::ChapterDiscovered {
            index,
            total,
            chapter: label.to_string(),
            link: link.to_string(),
        });
        match self.parser.fetch_chapter(&self.fetcher, link) {
            Ok(page) => ChapterScan::Scanned(scan_paragraphs(detector, &page, label, link, sink)),
            Err(e) => {
                log::warn!("skipping chapter {label} ({link}): {e}");
                emit(sink, ProgressEvent::ChapterSkipped {
                    chapter: label.to_string(),
                    link: link.to_string(),
                    error: e.to_string(),
                });
                ChapterScan::Skipped(SkippedChapter { chapter: label.to_string(), link: link.to_string(), error: e.to_string() })
            }
        }
    }

    fn canceled(&self, sink: &dyn ProgressSink) -> AuditError {
        emit(sink, ProgressEvent::Canceled);
        AuditError::Canceled
    }
}

fn scan_paragraphs(
    detector: &Detector<'_>,
    page: &ChapterPage,
    label: &str,
    link: &str,
    sink: &dyn ProgressSink,
) -> Vec<Candidate> {
    let mut out = Vec::new();
    for (paragraph_id, text) in &page.paragraphs {
        let found = detector.detect(text, label, link, paragraph_id);
        emit(sink, ProgressEvent::ParagraphProcessed {
            chapter: label.to_string(),
            paragraph_id: paragraph_id.clone(),
            candidates: found.len(),
        });
        out.extend(found);
    }
    out
}

fn loaded_event(maps: &CharMaps, cached: bool) -> ProgressEvent {
    ProgressEvent::DictionaryLoaded { forward_entries: maps.forward.len(), reverse_entries: maps.reverse.len(), cached }
}

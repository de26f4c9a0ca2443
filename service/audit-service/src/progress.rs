use std::fmt;

/// Narrow progress channel owned by the presentation layer.
///
/// Called from worker threads; implementations must not block indefinitely.
pub trait ProgressSink: Send + Sync {
    fn notify(&self, message: &str);
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl ProgressSink for NoopSink {
    fn notify(&self, _message: &str) {}
}

/// Forwards messages to the `log` facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn notify(&self, message: &str) {
        log::info!("{message}");
    }
}

impl<F> ProgressSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn notify(&self, message: &str) {
        self(message)
    }
}

/// Progress events emitted during an audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    DictionaryLoading { forward_url: String, reverse_url: String },
    DictionaryLoaded { forward_entries: usize, reverse_entries: usize, cached: bool },
    DocumentResolved { title: String, chapters: usize },
    ChapterDiscovered { index: usize, total: usize, chapter: String, link: String },
    ParagraphProcessed { chapter: String, paragraph_id: String, candidates: usize },
    ChapterSkipped { chapter: String, link: String, error: String },
    Aggregated { characters: usize, occurrences: usize },
    Canceled,
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressEvent::DictionaryLoading { forward_url, reverse_url } => {
                write!(f, "loading dictionaries: {forward_url}, {reverse_url}")
            }
            ProgressEvent::DictionaryLoaded { forward_entries, reverse_entries, cached } => write!(
                f,
                "dictionaries ready ({forward_entries} ambiguous, {reverse_entries} reverse{})",
                if *cached { ", cached" } else { "" }
            ),
            ProgressEvent::DocumentResolved { title, chapters } => write!(f, "{title}: {chapters} chapter(s)"),
            ProgressEvent::ChapterDiscovered { index, total, chapter, link } => {
                write!(f, "[{index}/{total}] {chapter:<20} \t {link}")
            }
            ProgressEvent::ParagraphProcessed { chapter, paragraph_id, candidates } => {
                write!(f, "{chapter} #{paragraph_id}: {candidates} candidate(s)")
            }
            ProgressEvent::ChapterSkipped { chapter, link, error } => {
                write!(f, "skipped {chapter} ({link}): {error}")
            }
            ProgressEvent::Aggregated { characters, occurrences } => {
                write!(f, "done: {characters} character(s), {occurrences} occurrence(s)")
            }
            ProgressEvent::Canceled => write!(f, "canceled"),
        }
    }
}

pub(crate) fn emit(sink: &dyn ProgressSink, event: ProgressEvent) {
    sink.notify(&event.to_string());
}

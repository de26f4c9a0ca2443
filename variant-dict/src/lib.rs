//! Simplified/traditional character tables used for ambiguity detection.
//!
//! The forward table (simplified -> traditional) keeps only simplified characters
//! with two or more traditional variants. The reverse table (traditional ->
//! simplified) keeps every entry. Both are immutable once built; reuse across
//! requests goes through [`DictionaryCache`].

pub mod config;
pub mod parse;
pub mod maps;
pub mod cache;

use page_fetcher::FetchError;

pub use cache::DictionaryCache;
pub use config::{default_dictionary_config, DictionaryConfig, DuplicatePolicy, DICTIONARY_DEFAULTS};
pub use maps::{parse_forward, parse_reverse, CharMaps, DictionaryInfo, ForwardMap, ReverseMap, SourceInfo};

/// Errors that abort dictionary loading. Both are fatal for an audit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DictError {
    #[error("dictionary source {url} unavailable: {source}")]
    Source { url: String, source: FetchError },
    #[error("malformed dictionary line {url}:{line}: {message}")]
    Format { url: String, line: usize, message: String },
}

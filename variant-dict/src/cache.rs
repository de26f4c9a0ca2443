use std::sync::{Arc, RwLock};

use page_fetcher::TextFetcher;

use crate::config::DictionaryConfig;
use crate::maps::CharMaps;
use crate::DictError;

/// Memoizing loader owned by the caller. Holds at most one loaded pair of tables.
///
/// The lock is never held while fetching; two racing first loads both fetch and the later one is kept.
#[derive(Debug, Default)]
pub struct DictionaryCache {
    slot: RwLock<Option<(DictionaryConfig, Arc<CharMaps>)>>,
}

impl DictionaryCache {
    pub fn new() -> Self { Self::default() }

    /// Cached tables for `cfg`, loading them on first use or when `cfg` changed.
    pub fn get_or_load<F: TextFetcher + ?Sized>(&self, fetcher: &F, cfg: &DictionaryConfig) -> Result<Arc<CharMaps>, DictError> {
        if let Some(maps) = self.cached(cfg) {
            return Ok(maps);
        }
        self.reload(fetcher, cfg)
    }

    /// Fetch and rebuild unconditionally, replacing the cached tables on success.
    pub fn reload<F: TextFetcher + ?Sized>(&self, fetcher: &F, cfg: &DictionaryConfig) -> Result<Arc<CharMaps>, DictError> {
        let maps = Arc::new(CharMaps::load(fetcher, cfg)?);
        if let Ok(mut slot) = self.slot.write() {
            *slot = Some((cfg.clone(), Arc::clone(&maps)));
        }
        Ok(maps)
    }

    pub fn cached(&self, cfg: &DictionaryConfig) -> Option<Arc<CharMaps>> {
        let guard = self.slot.read().ok()?;
        match guard.as_ref() {
            Some((loaded_cfg, maps)) if loaded_cfg == cfg => Some(Arc::clone(maps)),
            _ => None,
        }
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = None;
        }
    }
}

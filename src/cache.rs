//! Index cache
//!
//! Holds the last loaded (or last written) index so repeated reads skip the
//! backward footer scan. Every write replaces the cached copy.

use std::borrow::Cow;

use crate::error::Result;
use crate::footer::Index;

/// Optional in-memory copy of the footer index
#[derive(Debug, Default)]
pub struct IndexCache {
    enabled: bool,
    index: Option<Index>,
}

impl IndexCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            index: None,
        }
    }

    /// Whether an index is currently held
    pub fn is_populated(&self) -> bool {
        self.index.is_some()
    }

    /// Return the cached index, calling `load` on a miss.
    ///
    /// With caching disabled `load` runs every time and nothing is retained.
    pub fn resolve<F>(&mut self, load: F) -> Result<Cow<'_, Index>>
    where
        F: FnOnce() -> Result<Index>,
    {
        if !self.enabled {
            return load().map(Cow::Owned);
        }

        let index = match self.index.take() {
            Some(index) => index,
            None => load()?,
        };
        Ok(Cow::Borrowed(&*self.index.insert(index)))
    }

    /// Replace the cached copy with the index just written to disk
    pub fn replace(&mut self, index: Index) {
        if self.enabled {
            self.index = Some(index);
        }
    }

    pub fn invalidate(&mut self) {
        self.index = None;
    }
}

//! Template set cache keyed on catalog content.
//!
//! Readers take a shared lock and clone an `Arc` to a fully built set, so a
//! partially built set is never observable. Rebuilds are single-flight: the
//! build lock is held while compiling, and a waiter re-checks the current
//! generation before building again.

use crate::environment::TemplateSet;
use crate::error::{JinjaError, JinjaResult};
use crate::functions::Helpers;
use mp_core::Catalog;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

struct Generation {
    checksum: String,
    set: Arc<TemplateSet>,
}

/// Reuses a compiled [`TemplateSet`] until the catalog checksum changes
#[derive(Default)]
pub struct SetCache {
    current: RwLock<Option<Arc<Generation>>>,
    build_lock: Mutex<()>,
    builds: AtomicUsize,
}

impl SetCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached set for this catalog, compiling it if the catalog
    /// changed since the last build. Failed builds are not cached.
    pub fn get_or_build(
        &self,
        catalog: &Catalog,
        helpers: &Helpers,
    ) -> JinjaResult<Arc<TemplateSet>> {
        let checksum = catalog.checksum();
        if let Some(set) = self.lookup(&checksum)? {
            return Ok(set);
        }

        let _guard = self
            .build_lock
            .lock()
            .map_err(|e| JinjaError::Internal(format!("template cache build lock poisoned: {e}")))?;

        // Another request may have finished the same build while we waited.
        if let Some(set) = self.lookup(&checksum)? {
            return Ok(set);
        }

        log::debug!("Rebuilding template set (catalog checksum {})", &checksum[..12]);
        let set = Arc::new(TemplateSet::from_catalog(catalog, helpers)?);
        self.builds.fetch_add(1, Ordering::SeqCst);

        let mut current = self
            .current
            .write()
            .map_err(|e| JinjaError::Internal(format!("template cache poisoned: {e}")))?;
        *current = Some(Arc::new(Generation {
            checksum,
            set: set.clone(),
        }));
        Ok(set)
    }

    fn lookup(&self, checksum: &str) -> JinjaResult<Option<Arc<TemplateSet>>> {
        let current = self
            .current
            .read()
            .map_err(|e| JinjaError::Internal(format!("template cache poisoned: {e}")))?;
        Ok(current
            .as_ref()
            .filter(|generation| generation.checksum == checksum)
            .map(|generation| generation.set.clone()))
    }

    /// Number of successful builds performed so far
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}

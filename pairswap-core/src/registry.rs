use std::{
    collections::HashMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use tracing::{debug, instrument, trace, warn, Level};

use crate::{
    config::{ConfigError, PoolConfig},
    models::{
        error::{PoolError, Result},
        PairKey, Token,
    },
    pool::{PoolRecord, PoolView},
};

#[derive(Debug, Default)]
struct Inner {
    pools: HashMap<PairKey, Arc<PoolRecord>>,
    // Canonical keys in creation order.
    keys: Vec<PairKey>,
    keys_dirty: bool,
}

/// Owner of every pool, keyed by the canonical form of its token pair.
///
/// Exactly one [`PoolRecord`] exists per unordered pair; looking a pair up in the opposite
/// order yields a reversed [`PoolView`] of the same record. The registry lock is held only while
/// resolving or inserting a pool, never while a pool operation runs.
#[derive(Debug)]
pub struct PairRegistry {
    config: Arc<PoolConfig>,
    inner: RwLock<Inner>,
}

impl Default for PairRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PairRegistry {
    pub fn new() -> Self {
        Self { config: Arc::new(PoolConfig::default()), inner: RwLock::new(Inner::default()) }
    }

    /// Creates a registry whose pools all share `config`, rejecting configs that fail
    /// [`PoolConfig::validate`].
    pub fn with_config(config: PoolConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config: Arc::new(config), inner: RwLock::new(Inner::default()) })
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Creates the pool for `{token_a, token_b}` and returns it oriented as requested.
    ///
    /// The existence check and the insert happen under one write lock, so two callers racing
    /// to create the same pair in opposite orders end up with exactly one record.
    #[instrument(level = Level::TRACE, skip(self))]
    pub fn create_pair(&self, token_a: Token, token_b: Token) -> Result<PoolView> {
        let requested = PairKey::new(token_a, token_b);
        if requested.is_degenerate() {
            return Err(PoolError::IdenticalAddresses(token_a));
        }
        let canonical = requested.sort();

        let mut inner = self.write_inner()?;
        if inner.pools.contains_key(&canonical) {
            return Err(PoolError::PairExists(requested));
        }
        let record = Arc::new(PoolRecord::new(canonical, self.config.clone()));
        inner
            .pools
            .insert(canonical, record.clone());
        inner.keys.push(canonical);
        inner.keys_dirty = true;

        debug!(pair = %canonical, reversed = !requested.is_sorted(), "Created pair");
        Ok(PoolView::new(record, !requested.is_sorted()))
    }

    /// Looks up the pool for `{token_a, token_b}`, oriented as requested.
    pub fn pair(&self, token_a: Token, token_b: Token) -> Result<Option<PoolView>> {
        let requested = PairKey::new(token_a, token_b);
        let inner = self.read_inner()?;
        let view = inner
            .pools
            .get(&requested.sort())
            .map(|record| PoolView::new(record.clone(), !requested.is_sorted()));
        trace!(pair = %requested, found = view.is_some(), "Pair lookup");
        Ok(view)
    }

    /// Canonical keys of all pools, in the order they were created.
    pub fn pairs(&self) -> Result<Vec<PairKey>> {
        Ok(self.read_inner()?.keys.clone())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read_inner()?.keys.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Canonical keys of pools whose content changed since their flags were last cleared.
    pub fn dirty_pairs(&self) -> Result<Vec<PairKey>> {
        let inner = self.read_inner()?;
        Ok(inner
            .keys
            .iter()
            .filter(|key| {
                inner
                    .pools
                    .get(*key)
                    .is_some_and(|record| record.changes().is_dirty())
            })
            .copied()
            .collect())
    }

    /// Whether pairs were created since the flag was last cleared.
    pub fn is_pairs_dirty(&self) -> Result<bool> {
        Ok(self.read_inner()?.keys_dirty)
    }

    pub fn clear_pairs_dirty(&self) -> Result<()> {
        self.write_inner()?.keys_dirty = false;
        Ok(())
    }

    fn read_inner(&self) -> Result<RwLockReadGuard<'_, Inner>> {
        self.inner.read().map_err(|_| {
            warn!("Registry lock poisoned");
            PoolError::LockPoisoned("registry".to_string())
        })
    }

    fn write_inner(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
        self.inner.write().map_err(|_| {
            warn!("Registry lock poisoned");
            PoolError::LockPoisoned("registry".to_string())
        })
    }
}

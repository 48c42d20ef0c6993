use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Change signals consumed by a persistence layer.
///
/// Pool operations only ever raise these flags. Whoever snapshots the pool owns clearing them,
/// and must tolerate seeing a flag for a change it already handled. `version` increases once per
/// successful mutation, so two observations with equal versions saw the same state.
#[derive(Debug, Default)]
pub struct ChangeFlags {
    dirty: AtomicBool,
    balances_dirty: AtomicBool,
    version: AtomicU64,
}

impl ChangeFlags {
    /// Reserves or total supply changed.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Holder balances changed.
    pub fn is_balances_dirty(&self) -> bool {
        self.balances_dirty
            .load(Ordering::Acquire)
    }

    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Resets both flags after a successful snapshot. The version is left untouched.
    pub fn clear(&self) {
        self.dirty.store(false, Ordering::Release);
        self.balances_dirty
            .store(false, Ordering::Release);
    }

    pub(crate) fn mark_content(&self) {
        self.dirty.store(true, Ordering::Release);
        self.version.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn mark_balances(&self) {
        self.balances_dirty
            .store(true, Ordering::Release);
        self.mark_content();
    }
}

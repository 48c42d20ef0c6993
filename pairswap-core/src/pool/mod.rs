//! Pool state and the operations that mutate it.
//!
//! [`PoolRecord`] is the single physical copy of a pair's reserves, supply and holder balances.
//! Callers reach it through a [`PoolView`], which presents the record in either token order.

pub mod changes;
pub mod record;
pub mod snapshot;
pub mod view;

pub use changes::ChangeFlags;
pub use record::PoolRecord;
pub use snapshot::PoolSnapshot;
pub use view::PoolView;

#[cfg(test)]
mod proptest_properties;

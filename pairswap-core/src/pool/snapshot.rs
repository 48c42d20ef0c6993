use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::models::{Address, PairKey};

/// A consistent copy of one pool's state, always in canonical orientation.
///
/// Taken while holding both pool locks, so the supply always equals the sum of `balances`.
/// Holders with a zero balance are omitted; `balances` is sorted by address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub key: PairKey,
    pub reserve0: BigUint,
    pub reserve1: BigUint,
    pub total_supply: BigUint,
    pub balances: Vec<(Address, BigUint)>,
    /// Change version the snapshot was taken at.
    pub version: u64,
}

impl PoolSnapshot {
    pub fn balance_of(&self, address: &Address) -> BigUint {
        self.balances
            .binary_search_by(|(holder, _)| holder.cmp(address))
            .map(|idx| self.balances[idx].1.clone())
            .unwrap_or_default()
    }
}

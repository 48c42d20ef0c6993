use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use tracing::trace;

use super::{changes::ChangeFlags, record::PoolRecord, snapshot::PoolSnapshot};
use crate::models::{error::Result, Address, PairKey, Token};

/// A pool presented in the token order the caller asked for.
///
/// The view holds no state of its own besides the orientation: when `reversed` is set, every
/// `*0` argument or result refers to the record's `*1` side and vice versa. Cloning a view or
/// looking the pair up again in either order always reaches the same record and the same locks.
/// Liquidity balances do not depend on orientation and pass through unchanged.
#[derive(Debug, Clone)]
pub struct PoolView {
    record: Arc<PoolRecord>,
    reversed: bool,
}

impl PoolView {
    pub(crate) fn new(record: Arc<PoolRecord>, reversed: bool) -> Self {
        Self { record, reversed }
    }

    /// Key in the requested orientation.
    pub fn key(&self) -> PairKey {
        self.orient_key(self.record.key())
    }

    pub fn token0(&self) -> Token {
        self.key().token0
    }

    pub fn token1(&self) -> Token {
        self.key().token1
    }

    /// Whether this view swaps the record's sides.
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// The canonical record behind this view.
    pub fn record(&self) -> &Arc<PoolRecord> {
        &self.record
    }

    pub fn changes(&self) -> &ChangeFlags {
        self.record.changes()
    }

    pub fn balance(&self, address: &Address) -> Result<BigUint> {
        self.record.balance(address)
    }

    pub fn total_supply(&self) -> Result<BigUint> {
        self.record.total_supply()
    }

    pub fn reserves(&self) -> Result<(BigUint, BigUint)> {
        Ok(self.orient(self.record.reserves()?))
    }

    pub fn amounts(&self, liquidity: &BigUint) -> Result<(BigUint, BigUint)> {
        Ok(self.orient(self.record.amounts(liquidity)?))
    }

    pub fn mint(&self, address: &Address, amount0: &BigUint, amount1: &BigUint) -> Result<BigUint> {
        trace!(pair = %self.key(), reversed = self.reversed, "Mint via view");
        let (amount0, amount1) = self.orient((amount0, amount1));
        self.record.mint(address, amount0, amount1)
    }

    pub fn burn(&self, address: &Address, liquidity: &BigUint) -> Result<(BigUint, BigUint)> {
        trace!(pair = %self.key(), reversed = self.reversed, "Burn via view");
        Ok(self.orient(self.record.burn(address, liquidity)?))
    }

    pub fn swap(
        &self,
        amount0_in: &BigUint,
        amount1_in: &BigUint,
        amount0_out: &BigUint,
        amount1_out: &BigUint,
    ) -> Result<(BigInt, BigInt)> {
        trace!(pair = %self.key(), reversed = self.reversed, "Swap via view");
        let (amount0_in, amount1_in) = self.orient((amount0_in, amount1_in));
        let (amount0_out, amount1_out) = self.orient((amount0_out, amount1_out));
        let net = self
            .record
            .swap(amount0_in, amount1_in, amount0_out, amount1_out)?;
        Ok(self.orient(net))
    }

    /// Snapshot of the underlying record. Always in canonical orientation.
    pub fn snapshot(&self) -> Result<PoolSnapshot> {
        self.record.snapshot()
    }

    fn orient<T>(&self, (side0, side1): (T, T)) -> (T, T) {
        if self.reversed {
            (side1, side0)
        } else {
            (side0, side1)
        }
    }

    fn orient_key(&self, key: PairKey) -> PairKey {
        if self.reversed {
            key.reverse()
        } else {
            key
        }
    }
}

use std::{
    collections::HashMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use num_bigint::{BigInt, BigUint};
use num_traits::{Signed, Zero};
use tracing::{debug, instrument, warn, Level};

use super::{changes::ChangeFlags, snapshot::PoolSnapshot};
use crate::{
    config::PoolConfig,
    models::{
        error::{PoolError, Result},
        Address, PairKey,
    },
};

type Balances = HashMap<Address, BigUint>;

/// Reserve side of a pool, guarded by its own lock.
#[derive(Debug, Default, Clone)]
struct Reserves {
    reserve0: BigUint,
    reserve1: BigUint,
    total_supply: BigUint,
}

impl Reserves {
    /// Pro-rata claim of `liquidity` on both reserves, rounded down.
    fn share(&self, liquidity: &BigUint) -> Option<(BigUint, BigUint)> {
        if self.total_supply.is_zero() {
            return None;
        }
        Some((
            liquidity * &self.reserve0 / &self.total_supply,
            liquidity * &self.reserve1 / &self.total_supply,
        ))
    }
}

/// The physical state of one pair, stored in canonical token order.
///
/// Two locks guard the record: one for reserves and total supply, one for holder balances.
/// Operations needing both always take the reserve lock first. All preconditions are checked
/// while the locks are held and before anything is written, so a failed call leaves the record
/// exactly as it found it.
#[derive(Debug)]
pub struct PoolRecord {
    key: PairKey,
    config: Arc<PoolConfig>,
    reserves: RwLock<Reserves>,
    balances: RwLock<Balances>,
    changes: ChangeFlags,
}

impl PoolRecord {
    pub(crate) fn new(key: PairKey, config: Arc<PoolConfig>) -> Self {
        Self {
            key: key.sort(),
            config,
            reserves: RwLock::new(Reserves::default()),
            balances: RwLock::new(HashMap::new()),
            changes: ChangeFlags::default(),
        }
    }

    /// Canonical key of this pool.
    pub fn key(&self) -> PairKey {
        self.key
    }

    pub fn changes(&self) -> &ChangeFlags {
        &self.changes
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Liquidity token balance of `address`; zero for holders never seen.
    pub fn balance(&self, address: &Address) -> Result<BigUint> {
        let balances = self.read_balances()?;
        Ok(balances
            .get(address)
            .cloned()
            .unwrap_or_default())
    }

    pub fn reserves(&self) -> Result<(BigUint, BigUint)> {
        let reserves = self.read_reserves()?;
        Ok((reserves.reserve0.clone(), reserves.reserve1.clone()))
    }

    pub fn total_supply(&self) -> Result<BigUint> {
        Ok(self.read_reserves()?.total_supply.clone())
    }

    /// Underlying amounts `liquidity` would redeem at current reserves.
    ///
    /// Fails with [`PoolError::EmptyPool`] until the pool has been minted into.
    pub fn amounts(&self, liquidity: &BigUint) -> Result<(BigUint, BigUint)> {
        self.read_reserves()?
            .share(liquidity)
            .ok_or(PoolError::EmptyPool)
    }

    /// Deposits `amount0`/`amount1` and credits `address` with newly issued liquidity.
    ///
    /// The first deposit issues `sqrt(amount0 * amount1)` minus the minimum liquidity, which is
    /// locked to the zero address for good. Later deposits issue the smaller of the two
    /// pro-rata shares, so an unbalanced deposit never earns more than its weaker side. A later
    /// deposit too small to earn a whole unit is still accepted and issues zero liquidity.
    #[instrument(level = Level::TRACE, skip_all, fields(pair = %self.key, %address))]
    pub fn mint(
        &self,
        address: &Address,
        amount0: &BigUint,
        amount1: &BigUint,
    ) -> Result<BigUint> {
        let (mut reserves, mut balances) = self.write_all()?;

        let minimum = self.config.minimum_liquidity();
        let liquidity = if reserves.total_supply.is_zero() {
            let root = (amount0 * amount1).sqrt();
            if root <= minimum {
                return Err(PoolError::InsufficientLiquidityMinted);
            }
            let liquidity = root - &minimum;
            credit(&mut balances, Address::zero(), &minimum);
            reserves.total_supply += &minimum;
            liquidity
        } else {
            if reserves.reserve0.is_zero() || reserves.reserve1.is_zero() {
                return Err(PoolError::InsufficientLiquidityMinted);
            }
            let liquidity0 = &reserves.total_supply * amount0 / &reserves.reserve0;
            let liquidity1 = &reserves.total_supply * amount1 / &reserves.reserve1;
            liquidity0.min(liquidity1)
        };

        credit(&mut balances, address.clone(), &liquidity);
        reserves.total_supply += &liquidity;
        reserves.reserve0 += amount0;
        reserves.reserve1 += amount1;
        self.changes.mark_balances();

        debug!(pair = %self.key, %address, %liquidity, %amount0, %amount1, "Mint");
        Ok(liquidity)
    }

    /// Redeems `liquidity` held by `address` for its share of both reserves.
    ///
    /// The zero address can never burn: its balance is the permanent liquidity floor.
    #[instrument(level = Level::TRACE, skip_all, fields(pair = %self.key, %address))]
    pub fn burn(&self, address: &Address, liquidity: &BigUint) -> Result<(BigUint, BigUint)> {
        let (mut reserves, mut balances) = self.write_all()?;

        if address.is_zero() {
            return Err(PoolError::InsufficientLiquidityBurned);
        }
        let held = match balances.get(address) {
            Some(held) if !held.is_zero() && liquidity <= held => held.clone(),
            _ => return Err(PoolError::InsufficientLiquidityBurned),
        };

        let (amount0, amount1) = reserves
            .share(liquidity)
            .ok_or(PoolError::InsufficientLiquidityBurned)?;
        if amount0.is_zero() || amount1.is_zero() {
            return Err(PoolError::InsufficientLiquidityBurned);
        }

        let remaining = held - liquidity;
        if remaining.is_zero() {
            balances.remove(address);
        } else {
            balances.insert(address.clone(), remaining);
        }
        reserves.total_supply -= liquidity;
        reserves.reserve0 -= &amount0;
        reserves.reserve1 -= &amount1;
        self.changes.mark_balances();

        debug!(pair = %self.key, %address, %liquidity, %amount0, %amount1, "Burn");
        Ok((amount0, amount1))
    }

    /// Exchanges gross inputs for the requested outputs under the fee-adjusted constant product
    /// rule, returning the signed net change of each reserve.
    ///
    /// The trade is accepted only if
    /// `(balance0 * D - in0 * N) * (balance1 * D - in1 * N) >= reserve0 * reserve1 * D^2`,
    /// where `balance_i` is the post-trade reserve and `N / D` the configured fee.
    #[instrument(level = Level::TRACE, skip_all, fields(pair = %self.key))]
    pub fn swap(
        &self,
        amount0_in: &BigUint,
        amount1_in: &BigUint,
        amount0_out: &BigUint,
        amount1_out: &BigUint,
    ) -> Result<(BigInt, BigInt)> {
        if amount0_out.is_zero() && amount1_out.is_zero() {
            return Err(PoolError::InsufficientOutputAmount);
        }

        let mut reserves = self.write_reserves()?;
        if amount0_out > &reserves.reserve0 || amount1_out > &reserves.reserve1 {
            return Err(PoolError::InsufficientLiquidity);
        }

        let amount0 = BigInt::from(amount0_in.clone()) - BigInt::from(amount0_out.clone());
        let amount1 = BigInt::from(amount1_in.clone()) - BigInt::from(amount1_out.clone());
        if !amount0.is_positive() && !amount1.is_positive() {
            return Err(PoolError::InsufficientInputAmount);
        }

        let reserve0 = BigInt::from(reserves.reserve0.clone());
        let reserve1 = BigInt::from(reserves.reserve1.clone());
        let numerator = BigInt::from(self.config.fee_numerator());
        let denominator = BigInt::from(self.config.fee_denominator());

        let adjusted0 =
            (&amount0 + &reserve0) * &denominator - BigInt::from(amount0_in.clone()) * &numerator;
        let adjusted1 =
            (&amount1 + &reserve1) * &denominator - BigInt::from(amount1_in.clone()) * &numerator;
        if adjusted0 * adjusted1 < &reserve0 * &reserve1 * &denominator * &denominator {
            return Err(PoolError::K);
        }

        // Outputs are bounded by the reserves above, so neither side can go negative.
        let new_reserve0 = (reserve0 + &amount0)
            .to_biguint()
            .ok_or(PoolError::InsufficientLiquidity)?;
        let new_reserve1 = (reserve1 + &amount1)
            .to_biguint()
            .ok_or(PoolError::InsufficientLiquidity)?;
        reserves.reserve0 = new_reserve0;
        reserves.reserve1 = new_reserve1;
        self.changes.mark_content();

        debug!(pair = %self.key, %amount0, %amount1, "Swap");
        Ok((amount0, amount1))
    }

    /// Consistent copy of the whole record, read under both locks.
    pub fn snapshot(&self) -> Result<PoolSnapshot> {
        let reserves = self.read_reserves()?;
        let balances = self.read_balances()?;

        let mut holders: Vec<(Address, BigUint)> = balances
            .iter()
            .filter(|(_, balance)| !balance.is_zero())
            .map(|(address, balance)| (address.clone(), balance.clone()))
            .collect();
        holders.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(PoolSnapshot {
            key: self.key,
            reserve0: reserves.reserve0.clone(),
            reserve1: reserves.reserve1.clone(),
            total_supply: reserves.total_supply.clone(),
            balances: holders,
            version: self.changes.version(),
        })
    }

    fn read_reserves(&self) -> Result<RwLockReadGuard<'_, Reserves>> {
        self.reserves
            .read()
            .map_err(|_| self.poisoned("reserves"))
    }

    fn write_reserves(&self) -> Result<RwLockWriteGuard<'_, Reserves>> {
        self.reserves
            .write()
            .map_err(|_| self.poisoned("reserves"))
    }

    fn read_balances(&self) -> Result<RwLockReadGuard<'_, Balances>> {
        self.balances
            .read()
            .map_err(|_| self.poisoned("balances"))
    }

    /// Takes both write locks in the fixed reserve-then-balances order.
    #[allow(clippy::type_complexity)]
    fn write_all(
        &self,
    ) -> Result<(RwLockWriteGuard<'_, Reserves>, RwLockWriteGuard<'_, Balances>)> {
        let reserves = self.write_reserves()?;
        let balances = self
            .balances
            .write()
            .map_err(|_| self.poisoned("balances"))?;
        Ok((reserves, balances))
    }

    fn poisoned(&self, scope: &str) -> PoolError {
        warn!(pair = %self.key, scope, "Pool lock poisoned");
        PoolError::LockPoisoned(format!("{} {}", self.key, scope))
    }
}

fn credit(balances: &mut Balances, address: Address, value: &BigUint) {
    if value.is_zero() {
        return;
    }
    *balances.entry(address).or_default() += value;
}

use thiserror::Error;

use super::{PairKey, Token};

/// Failures of pair creation and pool operations.
///
/// Every variant is deterministic: replaying the same request against the same state yields the
/// same error, and no failing operation leaves partial effects behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Identical addresses: cannot pair {0} with itself")]
    IdenticalAddresses(Token),
    #[error("Pair already exists: {0}")]
    PairExists(PairKey),
    #[error("Insufficient liquidity minted")]
    InsufficientLiquidityMinted,
    #[error("Insufficient liquidity burned")]
    InsufficientLiquidityBurned,
    #[error("Insufficient output amount")]
    InsufficientOutputAmount,
    #[error("Insufficient liquidity")]
    InsufficientLiquidity,
    #[error("Insufficient input amount")]
    InsufficientInputAmount,
    #[error("K")]
    K,
    #[error("Pool has no liquidity supply")]
    EmptyPool,
    #[error("Failed to acquire {0} lock: poisoned")]
    LockPoisoned(String),
}

pub type Result<T> = std::result::Result<T, PoolError>;

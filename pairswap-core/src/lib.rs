//! In-memory constant-product liquidity pools.
//!
//! A [`PairRegistry`](registry::PairRegistry) owns one [`PoolRecord`](pool::PoolRecord) per
//! unordered token pair and hands out [`PoolView`](pool::PoolView)s oriented to whatever token
//! order the caller asked for. Views expose `mint`, `burn`, `swap`, `amounts` and `balance`;
//! every operation validates before it mutates and reports failures as
//! [`PoolError`](models::error::PoolError).
//!
//! ```
//! use num_bigint::BigUint;
//! use pairswap_core::{models::{Address, Token}, registry::PairRegistry};
//!
//! let registry = PairRegistry::new();
//! let pool = registry
//!     .create_pair(Token::new(1), Token::new(0))
//!     .unwrap();
//! let alice = Address::from("alice");
//!
//! let minted = pool
//!     .mint(&alice, &BigUint::from(4_000_000u32), &BigUint::from(1_000_000u32))
//!     .unwrap();
//! assert_eq!(minted, BigUint::from(1_999_000u32));
//! assert_eq!(pool.balance(&alice).unwrap(), minted);
//! ```

pub mod config;
pub mod models;
pub mod pool;
pub mod registry;

pub use models::error::{PoolError, Result};

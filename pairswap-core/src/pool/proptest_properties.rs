//! Property-based checks of the pool invariants:
//!
//! 1. Every accepted swap keeps the fee-adjusted product at or above the pre-trade product.
//! 2. The largest output allowed by the fee-adjusted rule is accepted and one unit more is not.
//! 3. Total supply always equals the sum of holder balances, and the zero address keeps the floor.
//! 4. Minting then burning never returns more than was deposited.

use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use proptest::prelude::*;

use super::PoolRecord;
use crate::{
    config::PoolConfig,
    models::{error::PoolError, Address, PairKey, Token, MINIMUM_LIQUIDITY},
};

fn fresh_pool(reserve0: u64, reserve1: u64) -> PoolRecord {
    let pool = PoolRecord::new(
        PairKey::new(Token::new(0), Token::new(1)),
        Arc::new(PoolConfig::default()),
    );
    let seed = Address::from("seed");
    let Ok(_) = pool.mint(&seed, &BigUint::from(reserve0), &BigUint::from(reserve1)) else {
        panic!("seed mint");
    };
    pool
}

fn amount_out(amount_in: &BigUint, reserve_in: &BigUint, reserve_out: &BigUint) -> BigUint {
    let with_fee = amount_in * 997u32;
    &with_fee * reserve_out / (reserve_in * 1000u32 + &with_fee)
}

fn supply_matches_balances(pool: &PoolRecord) -> bool {
    let Ok(snapshot) = pool.snapshot() else {
        return false;
    };
    let sum: BigUint = snapshot
        .balances
        .iter()
        .map(|(_, balance)| balance)
        .sum();
    sum == snapshot.total_supply &&
        snapshot.balance_of(&Address::zero()) >= BigUint::from(MINIMUM_LIQUIDITY)
}

proptest! {
    #[test]
    fn accepted_swaps_respect_fee_floor(
        reserve0 in 1_000_000u64..u64::MAX / 2,
        reserve1 in 1_000_000u64..u64::MAX / 2,
        amount0_in in 0u64..1_000_000_000_000,
        amount1_in in 0u64..1_000_000_000_000,
        amount0_out in 0u64..1_000_000_000_000,
        amount1_out in 0u64..1_000_000_000_000,
    ) {
        let pool = fresh_pool(reserve0, reserve1);
        let before = pool.snapshot().expect("snapshot");
        let (in0, in1) = (BigUint::from(amount0_in), BigUint::from(amount1_in));
        let (out0, out1) = (BigUint::from(amount0_out), BigUint::from(amount1_out));

        match pool.swap(&in0, &in1, &out0, &out1) {
            Ok((net0, net1)) => {
                let r0 = BigInt::from(before.reserve0.clone());
                let r1 = BigInt::from(before.reserve1.clone());
                let adjusted0 = (&r0 + &net0) * 1000 - BigInt::from(in0) * 3;
                let adjusted1 = (&r1 + &net1) * 1000 - BigInt::from(in1) * 3;
                prop_assert!(adjusted0 * adjusted1 >= r0 * r1 * 1_000_000);

                let (reserve0, reserve1) = pool.reserves().expect("reserves");
                prop_assert_eq!(BigInt::from(reserve0), BigInt::from(before.reserve0) + net0);
                prop_assert_eq!(BigInt::from(reserve1), BigInt::from(before.reserve1) + net1);
            }
            Err(_) => {
                prop_assert_eq!(pool.snapshot().expect("snapshot"), before);
            }
        }
    }

    #[test]
    fn best_quote_is_exact(
        reserve0 in 1_000_000u64..u64::MAX / 2,
        reserve1 in 1_000_000u64..u64::MAX / 2,
        amount_in in 1u64..u64::MAX / 4,
        zero_for_one in any::<bool>(),
    ) {
        let pool = fresh_pool(reserve0, reserve1);
        let (r0, r1) = (BigUint::from(reserve0), BigUint::from(reserve1));
        let amount_in = BigUint::from(amount_in);
        let zero = BigUint::zero();
        let quote = if zero_for_one {
            amount_out(&amount_in, &r0, &r1)
        } else {
            amount_out(&amount_in, &r1, &r0)
        };
        prop_assume!(!quote.is_zero());
        let greedy = &quote + 1u32;

        let (greedy_res, res) = if zero_for_one {
            (
                pool.swap(&amount_in, &zero, &zero, &greedy),
                pool.swap(&amount_in, &zero, &zero, &quote),
            )
        } else {
            (
                pool.swap(&zero, &amount_in, &greedy, &zero),
                pool.swap(&zero, &amount_in, &quote, &zero),
            )
        };

        prop_assert_eq!(greedy_res, Err(PoolError::K));
        prop_assert!(res.is_ok());
    }

    #[test]
    fn mint_burn_conserves_supply(
        reserve0 in 1_000_000u64..u64::MAX / 2,
        reserve1 in 1_000_000u64..u64::MAX / 2,
        deposit0 in 1u64..u64::MAX / 2,
        deposit1 in 1u64..u64::MAX / 2,
    ) {
        let pool = fresh_pool(reserve0, reserve1);
        let lp = Address::from("lp");
        let (deposit0, deposit1) = (BigUint::from(deposit0), BigUint::from(deposit1));

        let minted = pool.mint(&lp, &deposit0, &deposit1).expect("later mints never fail");
        prop_assert!(supply_matches_balances(&pool));

        if let Ok((amount0, amount1)) = pool.burn(&lp, &minted) {
            prop_assert!(amount0 <= deposit0);
            prop_assert!(amount1 <= deposit1);
        }
        prop_assert!(supply_matches_balances(&pool));
        prop_assert!(pool.total_supply().expect("supply") >= BigUint::from(MINIMUM_LIQUIDITY));
    }
}

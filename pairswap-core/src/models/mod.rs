pub mod error;
pub mod pair;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use pair::PairKey;

/// Liquidity permanently locked to [`Address::zero`] by the first mint of every pool.
pub const MINIMUM_LIQUIDITY: u64 = 1_000;

/// Identifier of a pooled token.
///
/// Tokens are opaque to the pools; the only property relied upon is their total order, which
/// decides the canonical orientation of a pair.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Token(u32);

impl Token {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn id(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Token {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "token:{}", self.0)
    }
}

/// Holder of liquidity tokens.
///
/// The empty address is reserved: it never belongs to a participant and only ever holds the
/// minimum liquidity floor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The sentinel holder of the minimum liquidity floor.
    pub fn zero() -> Self {
        Self(String::new())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Address {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            write!(f, "<zero>")
        } else {
            f.write_str(&self.0)
        }
    }
}

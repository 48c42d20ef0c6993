use std::fmt;

use serde::{Deserialize, Serialize};

use super::Token;

/// An ordered view of an unordered token pair.
///
/// The registry stores every pool under the sorted form of its key; a key whose tokens are in
/// descending order addresses the same pool with the two sides swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey {
    pub token0: Token,
    pub token1: Token,
}

impl PairKey {
    pub fn new(token0: Token, token1: Token) -> Self {
        Self { token0, token1 }
    }

    /// Whether the key is already in canonical (ascending) order.
    pub fn is_sorted(&self) -> bool {
        self.token0 < self.token1
    }

    /// Returns the canonical form of this key.
    pub fn sort(self) -> Self {
        if self.is_sorted() {
            self
        } else {
            self.reverse()
        }
    }

    pub fn reverse(self) -> Self {
        Self { token0: self.token1, token1: self.token0 }
    }

    /// Whether both sides name the same token, which no pool may be created for.
    pub fn is_degenerate(&self) -> bool {
        self.token0 == self.token1
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token0.id(), self.token1.id())
    }
}

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::MINIMUM_LIQUIDITY;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid pool config: {0}")]
    Invalid(String),
    #[error("Failed to parse pool config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Parameters shared by every pool of a registry.
///
/// The fee is expressed as `fee_numerator / fee_denominator` of the gross input; the defaults
/// give the classic 0.3% fee and a [`MINIMUM_LIQUIDITY`] unit floor. Overriding
/// `minimum_liquidity` or the fee departs from those standard constants: the floor locked to the
/// zero address and the K comparison both follow the configured values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub minimum_liquidity: u64,
    pub fee_numerator: u32,
    pub fee_denominator: u32,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { minimum_liquidity: MINIMUM_LIQUIDITY, fee_numerator: 3, fee_denominator: 1_000 }
    }
}

impl PoolConfig {
    pub fn new(
        minimum_liquidity: u64,
        fee_numerator: u32,
        fee_denominator: u32,
    ) -> Result<Self, ConfigError> {
        let config = Self { minimum_liquidity, fee_numerator, fee_denominator };
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a YAML document. Missing fields fall back to their defaults.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: PoolConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.minimum_liquidity == 0 {
            return Err(ConfigError::Invalid("minimum_liquidity must be positive".to_string()));
        }
        if self.fee_denominator == 0 {
            return Err(ConfigError::Invalid("fee_denominator must be positive".to_string()));
        }
        if self.fee_numerator >= self.fee_denominator {
            return Err(ConfigError::Invalid(format!(
                "fee {}/{} must be below 100%",
                self.fee_numerator, self.fee_denominator
            )));
        }
        Ok(())
    }

    pub(crate) fn minimum_liquidity(&self) -> BigUint {
        BigUint::from(self.minimum_liquidity)
    }

    pub(crate) fn fee_numerator(&self) -> BigUint {
        BigUint::from(self.fee_numerator)
    }

    pub(crate) fn fee_denominator(&self) -> BigUint {
        BigUint::from(self.fee_denominator)
    }
}

//! Wei denominated amounts and their decimal rendering.

use alloy::primitives::{
    utils::{ParseUnits, Unit},
    U256,
};
use std::fmt;

/// Gas unit constants
pub const GWEI: u64 = 1_000_000_000;

/// Gas used by a plain ETH transfer
pub const TRANSFER_GAS: u64 = 21_000;

/// Typical gas used by an ERC-20 token transfer
pub const TOKEN_TRANSFER_GAS: u64 = 65_000;

/// An amount of ether, stored as wei
///
/// Rendering is exact: the wei value is scaled by 10^18 in decimal, never
/// through floating point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ether(U256);

impl Ether {
    pub fn from_wei(wei: U256) -> Self {
        Self(wei)
    }

    pub fn wei(&self) -> U256 {
        self.0
    }
}

impl fmt::Display for Ether {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_decimal(f, self.0, Unit::ETHER)
    }
}

/// An amount of gwei (10^9 wei), stored as wei
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Gwei(U256);

impl Gwei {
    pub fn from_wei(wei: impl Into<U256>) -> Self {
        Self(wei.into())
    }

    pub fn wei(&self) -> U256 {
        self.0
    }
}

impl fmt::Display for Gwei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_decimal(f, self.0, Unit::GWEI)
    }
}

/// Cost in ether of `gas` units at `gas_price` wei each
pub fn gas_cost(gas: u64, gas_price: u128) -> Ether {
    Ether::from_wei(U256::from(gas).saturating_mul(U256::from(gas_price)))
}

fn write_decimal(f: &mut fmt::Formatter<'_>, wei: U256, unit: Unit) -> fmt::Result {
    let formatted = ParseUnits::from(wei).format_units(unit);
    f.pad(trim_fraction(&formatted))
}

// "1.000" -> "1.0", "0.250" -> "0.25"
fn trim_fraction(formatted: &str) -> &str {
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let kept = fraction.trim_end_matches('0').len().max(1);
            &formatted[..whole.len() + 1 + kept]
        }
        None => formatted,
    }
}

//! Shared math utilities and protocol constants for the lending engine.
//! Implements safe U256 operations used by accrual, valuation, and liquidation.
use odra::casper_types::U256;
use crate::errors::LendingError;

/// Basis point denominator (10000 bps = 100%)
pub const BPS: u32 = 10_000;

/// Fixed-point scale for amounts, prices, and values (18 decimals)
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Seconds in a year, the accrual time base
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Protocol-wide upper bound on a pool's collateral factor
pub const MAX_COLLATERAL_FACTOR_BPS: u32 = 9_000;

/// Protocol-wide upper bound on a pool's liquidation bonus
pub const MAX_LIQUIDATION_BONUS_BPS: u32 = 2_000;

/// Safe math operations for U256
pub struct SafeMath;

impl SafeMath {
    /// Safe addition with overflow check
    pub fn add(a: U256, b: U256) -> Result<U256, LendingError> {
        a.checked_add(b).ok_or(LendingError::MathOverflow)
    }

    /// Safe subtraction with underflow check
    pub fn sub(a: U256, b: U256) -> Result<U256, LendingError> {
        a.checked_sub(b).ok_or(LendingError::MathUnderflow)
    }

    /// Safe multiplication with overflow check
    pub fn mul(a: U256, b: U256) -> Result<U256, LendingError> {
        a.checked_mul(b).ok_or(LendingError::MathOverflow)
    }

    /// Safe division with zero check
    pub fn div(a: U256, b: U256) -> Result<U256, LendingError> {
        if b.is_zero() {
            return Err(LendingError::DivisionByZero);
        }
        Ok(a / b)
    }

    /// a * b / denominator, multiplying before dividing.
    /// Truncation rounds down, which always favors the protocol.
    pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, LendingError> {
        Self::div(Self::mul(a, b)?, denominator)
    }

    /// Returns the minimum of two U256 values
    pub fn min(a: U256, b: U256) -> U256 {
        if a < b { a } else { b }
    }
}

/// Value of `amount` units of an asset priced at `price` (both 1e18 scale).
pub fn asset_value(amount: U256, price: U256) -> Result<U256, LendingError> {
    SafeMath::mul_div(amount, price, U256::from(PRECISION))
}

/// Units of an asset worth `value` at `price` (both 1e18 scale).
pub fn asset_units(value: U256, price: U256) -> Result<U256, LendingError> {
    SafeMath::mul_div(value, U256::from(PRECISION), price)
}

/// Simple interest on `principal` at `rate_bps` (annualized) over `elapsed` seconds.
pub fn simple_interest(
    principal: U256,
    rate_bps: U256,
    elapsed: u64,
) -> Result<U256, LendingError> {
    let numerator = SafeMath::mul(SafeMath::mul(principal, rate_bps)?, U256::from(elapsed))?;
    let denominator = U256::from(SECONDS_PER_YEAR as u128 * BPS as u128);
    SafeMath::div(numerator, denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_rounds_down() {
        let out = SafeMath::mul_div(U256::from(10), U256::from(10), U256::from(3)).unwrap();
        assert_eq!(out, U256::from(33));
    }

    #[test]
    fn test_sub_underflow() {
        let err = SafeMath::sub(U256::from(1), U256::from(2)).unwrap_err();
        assert!(matches!(err, LendingError::MathUnderflow));
    }

    #[test]
    fn test_div_by_zero() {
        let err = SafeMath::div(U256::from(1), U256::zero()).unwrap_err();
        assert!(matches!(err, LendingError::DivisionByZero));
    }

    #[test]
    fn test_asset_value_round_trip() {
        // 1000 units at $2.00 is worth $2000
        let amount = U256::from(1000u128 * PRECISION);
        let price = U256::from(2 * PRECISION);
        let value = asset_value(amount, price).unwrap();
        assert_eq!(value, U256::from(2000u128 * PRECISION));
        assert_eq!(asset_units(value, price).unwrap(), amount);
    }

    #[test]
    fn test_simple_interest_full_year() {
        // 10% for one year on 1000
        let principal = U256::from(1000u128 * PRECISION);
        let interest =
            simple_interest(principal, U256::from(1000), SECONDS_PER_YEAR).unwrap();
        assert_eq!(interest, U256::from(100u128 * PRECISION));
    }

    #[test]
    fn test_simple_interest_zero_elapsed() {
        let principal = U256::from(1000u128 * PRECISION);
        let interest = simple_interest(principal, U256::from(1000), 0).unwrap();
        assert_eq!(interest, U256::zero());
    }
}

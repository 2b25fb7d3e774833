//! Liquidation math: health factors and proportional collateral seizure.
//!
//! Pure functions, consumed by the engine's `liquidate` entry point. The
//! seizure cap preserves the seize/bonus ratio so a liquidator can never
//! extract more bonus than the remaining collateral supports.

use odra::casper_types::U256;
use crate::errors::LendingError;
use crate::math::{asset_units, SafeMath, BPS, PRECISION};

/// Collateral amounts awarded in one liquidation step
#[derive(Debug)]
pub struct Seizure {
    /// Collateral covering the repaid value
    pub seized: U256,
    /// Bonus collateral awarded on top
    pub bonus: U256,
}

impl Seizure {
    /// Seized collateral plus bonus.
    pub fn total(&self) -> U256 {
        self.seized.saturating_add(self.bonus)
    }
}

/// Health factor, 1e18 scale. Below 1e18 the loan is liquidatable.
///
/// `weighted_collateral_value` is the collateral value already scaled by the
/// loan's liquidation threshold; `debt_value` includes accrued interest.
/// Returns `U256::MAX` when there is no debt.
pub fn health_factor(weighted_collateral_value: U256, debt_value: U256) -> U256 {
    if debt_value.is_zero() {
        return U256::MAX;
    }
    match SafeMath::mul_div(weighted_collateral_value, U256::from(PRECISION), debt_value) {
        Ok(hf) => hf,
        Err(_) => U256::MAX,
    }
}

/// Collateral value scaled by the liquidation threshold.
pub fn weighted_collateral_value(
    collateral_value: U256,
    liquidation_threshold_bps: u32,
) -> Result<U256, LendingError> {
    SafeMath::mul_div(
        collateral_value,
        U256::from(liquidation_threshold_bps),
        U256::from(BPS),
    )
}

/// Computes the collateral awarded for repaying `repay_value` of debt.
///
/// The repaid value is converted to collateral units at `collateral_price`,
/// the bonus added, and the total capped to `available_collateral`. When the
/// cap binds, seize and bonus are recomputed proportionally:
/// `seized = total * 10000 / (10000 + bonus_bps)`.
pub fn seize_amounts(
    repay_value: U256,
    collateral_price: U256,
    bonus_bps: u32,
    available_collateral: U256,
) -> Result<Seizure, LendingError> {
    let seized = asset_units(repay_value, collateral_price)?;
    let bonus = SafeMath::mul_div(seized, U256::from(bonus_bps), U256::from(BPS))?;
    let total = SafeMath::add(seized, bonus)?;

    if total <= available_collateral {
        return Ok(Seizure { seized, bonus });
    }

    let capped_total = available_collateral;
    let capped_seized = SafeMath::mul_div(
        capped_total,
        U256::from(BPS),
        U256::from(BPS + bonus_bps),
    )?;
    let capped_bonus = SafeMath::sub(capped_total, capped_seized)?;

    Ok(Seizure {
        seized: capped_seized,
        bonus: capped_bonus,
    })
}

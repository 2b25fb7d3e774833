//! Interest rate model - kinked utilization curve, parameterized in bps.
//!
//! Below the optimal utilization the borrow rate rises gently to attract
//! borrowers while preserving withdrawable liquidity; above it the second,
//! steep slope pushes utilization back down to protect depositor withdrawals.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use crate::access_gate::{AccessGateContractRef, Action};
use crate::errors::LendingError;
use crate::events::InterestCurveUpdated;
use crate::math::BPS;

/// Interest rate curve parameters, shared across pools
#[odra::odra_type]
pub struct InterestRateCurve {
    /// Rate at zero utilization, in bps
    pub base_rate_bps: u32,
    /// Rate increase from zero to optimal utilization, in bps
    pub slope1_bps: u32,
    /// Rate increase from optimal to full utilization, in bps
    pub slope2_bps: u32,
    /// Utilization kink point, in bps (exclusive 0 and 10000)
    pub optimal_utilization_bps: u32,
    /// Fraction of accrued interest retained by the protocol, in bps
    pub reserve_factor_bps: u32,
}

/// Interest rate model contract
#[odra::module]
pub struct InterestRateModel {
    /// Curve parameters
    curve: Var<InterestRateCurve>,
    /// Access gate consulted for curve updates
    access_gate: Var<Address>,
}

#[odra::module]
impl InterestRateModel {
    /// Initialize the model with curve parameters.
    pub fn init(
        &mut self,
        access_gate: Address,
        base_rate_bps: u32,
        slope1_bps: u32,
        slope2_bps: u32,
        optimal_utilization_bps: u32,
        reserve_factor_bps: u32,
    ) {
        self.access_gate.set(access_gate);
        self.store_curve(
            base_rate_bps,
            slope1_bps,
            slope2_bps,
            optimal_utilization_bps,
            reserve_factor_bps,
        );
    }

    /// Utilization of a pool with the given totals, in bps. Zero when empty.
    pub fn utilization_bps(&self, total_borrows: U256, total_deposits: U256) -> U256 {
        if total_deposits.is_zero() {
            return U256::zero();
        }
        (total_borrows * U256::from(BPS)) / total_deposits
    }

    /// Annualized borrow rate for the given pool totals, in bps.
    ///
    /// ```text
    /// u <= optimal: base + slope1 * u / optimal
    /// u >  optimal: base + slope1 + slope2 * (u - optimal) / (10000 - optimal)
    /// ```
    pub fn borrow_rate(&self, total_borrows: U256, total_deposits: U256) -> U256 {
        let curve = self
            .curve
            .get_or_revert_with(LendingError::InvalidConfiguration);
        let utilization = self.utilization_bps(total_borrows, total_deposits);

        if utilization.is_zero() {
            return U256::from(curve.base_rate_bps);
        }

        let optimal = U256::from(curve.optimal_utilization_bps);
        if utilization <= optimal {
            let increase = (utilization * U256::from(curve.slope1_bps)) / optimal;
            U256::from(curve.base_rate_bps) + increase
        } else {
            let excess = utilization - optimal;
            let span = U256::from(BPS) - optimal;
            let excess_rate = (excess * U256::from(curve.slope2_bps)) / span;
            U256::from(curve.base_rate_bps) + U256::from(curve.slope1_bps) + excess_rate
        }
    }

    /// Annualized supply rate, in bps:
    /// `borrow_rate * utilization * (1 - reserve_factor)`.
    pub fn supply_rate(&self, total_borrows: U256, total_deposits: U256) -> U256 {
        let curve = self
            .curve
            .get_or_revert_with(LendingError::InvalidConfiguration);
        let utilization = self.utilization_bps(total_borrows, total_deposits);

        if utilization.is_zero() {
            return U256::zero();
        }

        let borrow_rate = self.borrow_rate(total_borrows, total_deposits);
        let to_pool =
            (borrow_rate * U256::from(BPS - curve.reserve_factor_bps)) / U256::from(BPS);
        (to_pool * utilization) / U256::from(BPS)
    }

    /// Current curve parameters.
    pub fn curve(&self) -> InterestRateCurve {
        self.curve
            .get_or_revert_with(LendingError::InvalidConfiguration)
    }

    /// Update curve parameters. Requires `Action::SetInterestCurve`.
    pub fn set_curve(
        &mut self,
        base_rate_bps: u32,
        slope1_bps: u32,
        slope2_bps: u32,
        optimal_utilization_bps: u32,
        reserve_factor_bps: u32,
    ) {
        let caller = self.env().caller();
        let gate_address = self
            .access_gate
            .get_or_revert_with(LendingError::InvalidConfiguration);
        let gate = AccessGateContractRef::new(self.env(), gate_address);
        if !gate.authorize(caller, Action::SetInterestCurve) {
            self.env().revert(LendingError::Unauthorized);
        }

        self.store_curve(
            base_rate_bps,
            slope1_bps,
            slope2_bps,
            optimal_utilization_bps,
            reserve_factor_bps,
        );

        self.env().emit_event(InterestCurveUpdated {
            base_rate_bps,
            slope1_bps,
            slope2_bps,
            optimal_utilization_bps,
            reserve_factor_bps,
            updated_by: caller,
        });
    }

    fn store_curve(
        &mut self,
        base_rate_bps: u32,
        slope1_bps: u32,
        slope2_bps: u32,
        optimal_utilization_bps: u32,
        reserve_factor_bps: u32,
    ) {
        // the kink must sit strictly inside (0, 10000) or the curve degenerates
        if optimal_utilization_bps == 0 || optimal_utilization_bps >= BPS {
            self.env().revert(LendingError::InvalidConfiguration);
        }
        if reserve_factor_bps > BPS {
            self.env().revert(LendingError::InvalidConfiguration);
        }

        self.curve.set(InterestRateCurve {
            base_rate_bps,
            slope1_bps,
            slope2_bps,
            optimal_utilization_bps,
            reserve_factor_bps,
        });
    }
}

//! Per-asset pool record and its accrual bookkeeping.
//!
//! A pool tracks aggregate deposits, borrows, and reserves for one asset.
//! Interest accrual is lazy: it runs at the start of every operation that
//! touches the pool, never from a timer.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::LendingError;
use crate::math::{self, SafeMath, BPS};

/// Result of one pool accrual step
#[derive(Debug)]
pub struct PoolAccrual {
    /// Interest added to total borrows (and total deposits)
    pub interest: U256,
    /// Portion of the interest routed to reserves
    pub reserve_share: U256,
}

/// Aggregate state for one listed asset
#[odra::odra_type]
pub struct Pool {
    /// Pool asset address
    pub asset: Address,
    /// Total deposited liquidity, accrued interest included
    pub total_deposits: U256,
    /// Total outstanding borrows, accrued interest included
    pub total_borrows: U256,
    /// Reserves accumulated from interest
    pub total_reserves: U256,
    /// Timestamp of the last accrual
    pub last_update_time: u64,
    /// Whether the pool is active
    pub is_active: bool,
    /// Whether deposits are accepted
    pub deposits_enabled: bool,
    /// Whether new borrows are accepted
    pub borrowing_enabled: bool,
    /// Fraction of collateral value usable as borrowing power, in bps
    pub collateral_factor_bps: u32,
    /// Collateral value ratio below which loans become liquidatable, in bps
    pub liquidation_threshold_bps: u32,
    /// Extra collateral awarded to liquidators, in bps
    pub liquidation_bonus_bps: u32,
}

impl Pool {
    /// Fraction of deposits currently borrowed out, in bps. Zero when empty.
    pub fn utilization_bps(&self) -> U256 {
        if self.total_deposits.is_zero() {
            return U256::zero();
        }
        // multiplication cannot overflow for realistic totals; checked anyway
        SafeMath::mul_div(self.total_borrows, U256::from(BPS), self.total_deposits)
            .unwrap_or(U256::zero())
    }

    /// Liquidity that can still be withdrawn or borrowed.
    pub fn available_liquidity(&self) -> U256 {
        // invariant: total_borrows <= total_deposits
        self.total_deposits.saturating_sub(self.total_borrows)
    }

    /// Accrues interest on the pool's borrows up to `now`.
    ///
    /// Interest is added to both total borrows and total deposits, so the
    /// `total_borrows <= total_deposits` invariant is preserved by accrual.
    /// The reserve share is additionally recorded in `total_reserves`; it is
    /// drawn from deposits when reserves are withdrawn, never from principal.
    ///
    /// A no-op when already accrued at `now` or when nothing is borrowed.
    pub fn accrue(
        &mut self,
        borrow_rate_bps: U256,
        reserve_factor_bps: u32,
        now: u64,
    ) -> Result<PoolAccrual, LendingError> {
        if now < self.last_update_time {
            return Err(LendingError::InvalidConfiguration);
        }
        let elapsed = now - self.last_update_time;
        self.last_update_time = now;

        if elapsed == 0 || self.total_borrows.is_zero() {
            return Ok(PoolAccrual {
                interest: U256::zero(),
                reserve_share: U256::zero(),
            });
        }

        let interest = math::simple_interest(self.total_borrows, borrow_rate_bps, elapsed)?;
        let reserve_share =
            SafeMath::mul_div(interest, U256::from(reserve_factor_bps), U256::from(BPS))?;

        self.total_borrows = SafeMath::add(self.total_borrows, interest)?;
        self.total_deposits = SafeMath::add(self.total_deposits, interest)?;
        self.total_reserves = SafeMath::add(self.total_reserves, reserve_share)?;

        Ok(PoolAccrual {
            interest,
            reserve_share,
        })
    }
}

//! Loan records and their lifecycle math.
//!
//! A loan fixes its rate at origination and accrues simple interest lazily.
//! Repayments are applied interest-first; only the principal portion ever
//! moves a pool's total borrows.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::LendingError;
use crate::math::{self, SafeMath};

/// Loan lifecycle states. `Active` transitions to `Repaid` or `Liquidated`
/// exactly once; terminal states are final. `Defaulted` is reserved and
/// never produced.
#[odra::odra_type]
pub enum LoanStatus {
    /// Loan is open and accruing interest
    Active,
    /// Loan was fully repaid by the borrower
    Repaid,
    /// Loan was closed by liquidation
    Liquidated,
    /// Reserved, unused
    Defaulted,
}

/// How a repayment amount splits across interest and principal
#[derive(Debug)]
pub struct RepaymentSplit {
    /// Portion applied to accrued interest
    pub interest_paid: U256,
    /// Portion applied to principal
    pub principal_paid: U256,
}

/// One borrower position
#[odra::odra_type]
pub struct Loan {
    /// Unique, monotonically assigned id
    pub id: u64,
    /// Borrower address
    pub borrower: Address,
    /// Asset posted as collateral
    pub collateral_asset: Address,
    /// Asset borrowed
    pub borrow_asset: Address,
    /// Collateral still attached to the loan
    pub collateral_amount: U256,
    /// Outstanding principal, net of repayments
    pub principal: U256,
    /// Interest accrued and not yet repaid
    pub accrued_interest: U256,
    /// Annualized rate fixed at origination, in bps
    pub interest_rate_bps: U256,
    /// Origination timestamp
    pub start_time: u64,
    /// Timestamp of the last interest accrual
    pub last_accrual_time: u64,
    /// Lifecycle state
    pub status: LoanStatus,
    /// Liquidation threshold snapshotted from the collateral pool, in bps
    pub liquidation_threshold_bps: u32,
}

impl Loan {
    /// Principal plus accrued interest.
    pub fn total_debt(&self) -> U256 {
        self.principal.saturating_add(self.accrued_interest)
    }

    /// Accrues interest at the origination rate up to `now`.
    /// Returns the newly accrued amount; idempotent within a timestamp.
    pub fn accrue(&mut self, now: u64) -> Result<U256, LendingError> {
        if now < self.last_accrual_time {
            return Err(LendingError::InvalidConfiguration);
        }
        let elapsed = now - self.last_accrual_time;
        self.last_accrual_time = now;

        if elapsed == 0 || self.principal.is_zero() {
            return Ok(U256::zero());
        }

        let interest = math::simple_interest(self.principal, self.interest_rate_bps, elapsed)?;
        self.accrued_interest = SafeMath::add(self.accrued_interest, interest)?;
        Ok(interest)
    }

    /// Debt projected to `now` without mutating the record.
    pub fn projected_debt(&self, now: u64) -> Result<U256, LendingError> {
        let elapsed = now.saturating_sub(self.last_accrual_time);
        let pending = math::simple_interest(self.principal, self.interest_rate_bps, elapsed)?;
        SafeMath::add(self.total_debt(), pending)
    }

    /// Applies `amount` to the debt, interest-first. The caller must have
    /// capped `amount` to `total_debt()` already.
    pub fn apply_repayment(&mut self, amount: U256) -> Result<RepaymentSplit, LendingError> {
        if amount > self.total_debt() {
            return Err(LendingError::RepaymentExceedsDebt);
        }

        let interest_paid = SafeMath::min(amount, self.accrued_interest);
        let principal_paid = SafeMath::sub(amount, interest_paid)?;

        self.accrued_interest = SafeMath::sub(self.accrued_interest, interest_paid)?;
        self.principal = SafeMath::sub(self.principal, principal_paid)?;

        Ok(RepaymentSplit {
            interest_paid,
            principal_paid,
        })
    }

    /// Whether the loan is open.
    pub fn is_active(&self) -> bool {
        matches!(self.status, LoanStatus::Active)
    }
}

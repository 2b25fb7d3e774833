//! Events for the lending engine

use odra::prelude::*;
use odra::casper_types::U256;

// ============================================================================
// Pool Events
// ============================================================================

/// Event emitted when a new asset is listed
#[odra::event]
pub struct AssetListed {
    /// Asset address
    pub asset: Address,
    /// Collateral factor in bps
    pub collateral_factor_bps: u32,
    /// Liquidation threshold in bps
    pub liquidation_threshold_bps: u32,
    /// Liquidation bonus in bps
    pub liquidation_bonus_bps: u32,
    /// Listed by
    pub listed_by: Address,
}

/// Event emitted when a pool's risk parameters change
#[odra::event]
pub struct RiskParamsUpdated {
    /// Asset address
    pub asset: Address,
    /// New collateral factor in bps
    pub collateral_factor_bps: u32,
    /// New liquidation threshold in bps
    pub liquidation_threshold_bps: u32,
    /// New liquidation bonus in bps
    pub liquidation_bonus_bps: u32,
    /// Updated by
    pub updated_by: Address,
}

/// Event emitted when a pool is paused, unpaused, or has flows toggled
#[odra::event]
pub struct PoolStatusChanged {
    /// Asset address
    pub asset: Address,
    /// Whether the pool is active
    pub is_active: bool,
    /// Whether deposits are enabled
    pub deposits_enabled: bool,
    /// Whether borrowing is enabled
    pub borrowing_enabled: bool,
    /// Updated by
    pub updated_by: Address,
}

/// Event emitted when liquidity is deposited into a pool
#[odra::event]
pub struct Deposited {
    /// Address that deposited
    pub user: Address,
    /// Pool asset
    pub asset: Address,
    /// Amount deposited
    pub amount: U256,
    /// Timestamp of deposit
    pub timestamp: u64,
}

/// Event emitted when liquidity is withdrawn from a pool
#[odra::event]
pub struct Withdrawn {
    /// Address that withdrew
    pub user: Address,
    /// Pool asset
    pub asset: Address,
    /// Amount withdrawn
    pub amount: U256,
    /// Timestamp of withdrawal
    pub timestamp: u64,
}

/// Event emitted when pool interest is accrued
#[odra::event]
pub struct PoolAccrued {
    /// Pool asset
    pub asset: Address,
    /// Interest added to total borrows
    pub interest: U256,
    /// Portion of interest routed to reserves
    pub reserve_share: U256,
    /// Borrow rate used for the accrual, in bps
    pub borrow_rate_bps: U256,
    /// Timestamp of accrual
    pub timestamp: u64,
}

/// Event emitted when accumulated reserves are withdrawn
#[odra::event]
pub struct ReservesWithdrawn {
    /// Pool asset
    pub asset: Address,
    /// Amount withdrawn
    pub amount: U256,
    /// Recipient of the reserves
    pub recipient: Address,
    /// Timestamp
    pub timestamp: u64,
}

// ============================================================================
// Loan Events
// ============================================================================

/// Event emitted when a loan is originated
#[odra::event]
pub struct LoanCreated {
    /// Loan id
    pub loan_id: u64,
    /// Borrower address
    pub borrower: Address,
    /// Collateral asset
    pub collateral_asset: Address,
    /// Borrowed asset
    pub borrow_asset: Address,
    /// Collateral posted
    pub collateral_amount: U256,
    /// Principal borrowed
    pub principal: U256,
    /// Rate fixed at origination, in bps
    pub interest_rate_bps: U256,
    /// Timestamp of origination
    pub timestamp: u64,
}

/// Event emitted when a loan is repaid, partially or in full
#[odra::event]
pub struct LoanRepaid {
    /// Loan id
    pub loan_id: u64,
    /// Borrower address
    pub borrower: Address,
    /// Amount applied to the debt
    pub amount: U256,
    /// Portion applied to accrued interest
    pub interest_paid: U256,
    /// Portion applied to principal
    pub principal_paid: U256,
    /// Whether the loan is now closed
    pub fully_repaid: bool,
    /// Timestamp of repayment
    pub timestamp: u64,
}

/// Event emitted when a loan is liquidated, partially or in full
#[odra::event]
pub struct LoanLiquidated {
    /// Loan id
    pub loan_id: u64,
    /// Borrower address
    pub borrower: Address,
    /// Liquidator address
    pub liquidator: Address,
    /// Debt repaid by the liquidator
    pub debt_covered: U256,
    /// Collateral transferred to the liquidator, bonus included
    pub collateral_seized: U256,
    /// Bonus portion of the seizure
    pub liquidation_bonus: U256,
    /// Collateral returned to the borrower on full close
    pub collateral_returned: U256,
    /// Whether the loan is now closed
    pub fully_closed: bool,
    /// Timestamp of liquidation
    pub timestamp: u64,
}

// ============================================================================
// Configuration Events
// ============================================================================

/// Event emitted when the interest rate curve is updated
#[odra::event]
pub struct InterestCurveUpdated {
    /// Base rate in bps
    pub base_rate_bps: u32,
    /// First slope in bps
    pub slope1_bps: u32,
    /// Second slope in bps
    pub slope2_bps: u32,
    /// Optimal utilization in bps
    pub optimal_utilization_bps: u32,
    /// Reserve factor in bps
    pub reserve_factor_bps: u32,
    /// Updated by
    pub updated_by: Address,
}

/// Event emitted when protocol-wide limits change
#[odra::event]
pub struct ProtocolLimitsUpdated {
    /// Minimum loan principal
    pub min_loan_amount: U256,
    /// Maximum post-borrow pool utilization in bps
    pub max_utilization_bps: u32,
    /// Maximum accepted price quote age in seconds
    pub max_price_age: u64,
    /// Minimum accepted quote confidence in bps
    pub min_confidence_bps: u32,
    /// Updated by
    pub updated_by: Address,
}

// ============================================================================
// Price Feed Events
// ============================================================================

/// Event emitted when a price quote is published
#[odra::event]
pub struct PriceUpdated {
    /// Asset address
    pub asset: Address,
    /// Price in USD, 1e18 scale
    pub price: U256,
    /// Quote confidence in bps
    pub confidence_bps: u32,
    /// Timestamp of the quote
    pub timestamp: u64,
}

// ============================================================================
// Access Control Events
// ============================================================================

/// Event emitted when an operator is granted
#[odra::event]
pub struct OperatorGranted {
    /// Operator address
    pub operator: Address,
    /// Granted by
    pub granted_by: Address,
}

/// Event emitted when an operator is revoked
#[odra::event]
pub struct OperatorRevoked {
    /// Operator address
    pub operator: Address,
    /// Revoked by
    pub revoked_by: Address,
}

//! Error types for the lending engine

use odra::prelude::*;

/// Errors that can occur in the lending engine
#[odra::odra_error]
#[derive(Debug)]
pub enum LendingError {
    // Pool errors
    /// Asset has no listed pool
    AssetNotSupported = 1,
    /// Asset already has a listed pool
    AssetAlreadyListed = 2,
    /// Pool is deactivated
    PoolInactive = 3,
    /// Deposits are disabled on this pool
    DepositsDisabled = 4,
    /// Borrowing is disabled on this pool
    BorrowingDisabled = 5,
    /// Caller's deposited balance does not cover the withdrawal
    InsufficientBalance = 6,
    /// Withdrawal or borrow exceeds the pool's available liquidity
    InsufficientLiquidity = 7,

    // Loan errors
    /// Collateral value does not support the requested borrow
    InsufficientCollateral = 8,
    /// Borrow amount is below the protocol minimum
    BelowMinimumLoan = 9,
    /// No loan with the given id
    LoanNotFound = 10,
    /// Loan is already in a terminal state
    LoanNotActive = 11,
    /// Caller is not the loan's borrower
    NotBorrower = 12,
    /// Repayment exceeds the outstanding debt
    RepaymentExceedsDebt = 13,
    /// Borrow would push pool utilization over the limit
    UtilizationLimitExceeded = 14,

    // Liquidation errors
    /// Health factor is at or above 1, position is healthy
    NotLiquidatable = 15,

    // Price feed errors
    /// No quote published for the asset
    PriceFeedNotAvailable = 16,
    /// Quote price is zero
    InvalidPrice = 17,
    /// Quote is older than the configured maximum age
    StalePriceData = 18,
    /// Quote confidence is below the configured minimum
    LowConfidencePrice = 19,

    // Access control errors
    /// Caller is not authorized for this action
    Unauthorized = 20,

    // Configuration errors
    /// Invalid configuration parameter
    InvalidConfiguration = 21,

    // General errors
    /// Zero amount not allowed
    ZeroAmount = 22,
    /// Math overflow occurred
    MathOverflow = 23,
    /// Math underflow occurred
    MathUnderflow = 24,
    /// Division by zero
    DivisionByZero = 25,
}

//! Lending pool - the pool accounting, interest-rate, and liquidation engine.
//!
//! Owns the per-asset pool ledger, user deposit balances, and the loan
//! registry. Every entry point that touches a pool accrues it first, then the
//! specific loan, then applies the requested mutation. Rates come from the
//! InterestRateModel contract, valuations from the PriceFeed, and privileged
//! mutations are authorized by the AccessGate.
//!
//! Custody is external: the engine records debits and credits and assumes the
//! surrounding transfer succeeded or happens atomically alongside it.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use crate::access_gate::{AccessGateContractRef, Action};
use crate::activity::{ActivityKind, ActivityLogContractRef};
use crate::errors::LendingError;
use crate::events::*;
use crate::interest_rate::InterestRateModelContractRef;
use crate::liquidation;
use crate::loan::{Loan, LoanStatus};
use crate::math::{
    self, SafeMath, BPS, MAX_COLLATERAL_FACTOR_BPS, MAX_LIQUIDATION_BONUS_BPS, PRECISION,
};
use crate::pool::Pool;
use crate::price_feed::{PriceFeedContractRef, PriceQuote};

/// Protocol-wide limits applied by the engine
#[odra::odra_type]
pub struct ProtocolLimits {
    /// Minimum principal for a new loan
    pub min_loan_amount: U256,
    /// Maximum post-borrow pool utilization, in bps
    pub max_utilization_bps: u32,
    /// Maximum accepted quote age, in seconds
    pub max_price_age: u64,
    /// Minimum accepted quote confidence, in bps
    pub min_confidence_bps: u32,
}

/// Lending pool contract
#[odra::module]
pub struct LendingPool {
    /// Pool ledger, one record per listed asset
    pools: Mapping<Address, Pool>,
    /// Deposited liquidity per (user, asset)
    user_balances: Mapping<(Address, Address), U256>,
    /// Loan registry
    loans: Mapping<u64, Loan>,
    /// Next loan id to assign
    next_loan_id: Var<u64>,
    /// Loan ids per borrower
    user_loans: Mapping<(Address, u32), u64>,
    /// Number of loans per borrower
    user_loan_count: Mapping<Address, u32>,
    /// Interest rate model address
    interest_rate_model: Var<Address>,
    /// Price feed address
    price_feed: Var<Address>,
    /// Access gate address
    access_gate: Var<Address>,
    /// Optional activity side channel
    activity_notifier: Var<Option<Address>>,
    /// Protocol-wide limits
    limits: Var<ProtocolLimits>,
}

#[odra::module]
impl LendingPool {
    /// Initialize the engine with its collaborators.
    pub fn init(
        &mut self,
        interest_rate_model: Address,
        price_feed: Address,
        access_gate: Address,
    ) {
        self.interest_rate_model.set(interest_rate_model);
        self.price_feed.set(price_feed);
        self.access_gate.set(access_gate);
        self.next_loan_id.set(1);
        self.activity_notifier.set(None);
        self.limits.set(ProtocolLimits {
            min_loan_amount: U256::zero(),
            max_utilization_bps: 9_500,
            max_price_age: 3_600,
            min_confidence_bps: 8_000,
        });
    }

    // ========================================
    // Pool Ledger
    // ========================================

    /// Accrue a pool's interest up to the current block time. Permissionless
    /// and idempotent within a timestamp.
    pub fn accrue_pool(&mut self, asset: Address) {
        self.accrue_pool_internal(asset);
    }

    /// Deposit liquidity into a pool.
    pub fn deposit(&mut self, asset: Address, amount: U256) {
        if amount.is_zero() {
            self.env().revert(LendingError::ZeroAmount);
        }

        let pool = self.load_pool(asset);
        if !pool.is_active {
            self.env().revert(LendingError::PoolInactive);
        }
        if !pool.deposits_enabled {
            self.env().revert(LendingError::DepositsDisabled);
        }

        let mut pool = self.accrue_pool_internal(asset);
        let caller = self.env().caller();

        let balance = self.user_balances.get(&(caller, asset)).unwrap_or_default();
        let new_balance = SafeMath::add(balance, amount).unwrap_or_revert(&self.env());
        self.user_balances.set(&(caller, asset), new_balance);

        pool.total_deposits =
            SafeMath::add(pool.total_deposits, amount).unwrap_or_revert(&self.env());
        self.pools.set(&asset, pool);

        let timestamp = self.env().get_block_time();
        self.env().emit_event(Deposited {
            user: caller,
            asset,
            amount,
            timestamp,
        });

        self.notify(caller, asset, ActivityKind::Deposit, amount);
    }

    /// Withdraw deposited liquidity from a pool.
    ///
    /// Bounded by the caller's balance and by the pool's available liquidity;
    /// the latter is what distinguishes a lending pool from a plain vault.
    /// Withdrawals stay possible on a deactivated pool.
    pub fn withdraw(&mut self, asset: Address, amount: U256) {
        if amount.is_zero() {
            self.env().revert(LendingError::ZeroAmount);
        }

        let mut pool = self.accrue_pool_internal(asset);
        let caller = self.env().caller();

        let balance = self.user_balances.get(&(caller, asset)).unwrap_or_default();
        if amount > balance {
            self.env().revert(LendingError::InsufficientBalance);
        }
        if amount > pool.available_liquidity() {
            self.env().revert(LendingError::InsufficientLiquidity);
        }

        self.user_balances.set(
            &(caller, asset),
            SafeMath::sub(balance, amount).unwrap_or_revert(&self.env()),
        );
        pool.total_deposits =
            SafeMath::sub(pool.total_deposits, amount).unwrap_or_revert(&self.env());
        self.pools.set(&asset, pool);

        let timestamp = self.env().get_block_time();
        self.env().emit_event(Withdrawn {
            user: caller,
            asset,
            amount,
            timestamp,
        });

        self.notify(caller, asset, ActivityKind::Withdraw, amount);
    }

    // ========================================
    // Loan Registry
    // ========================================

    /// Originate a loan against posted collateral. Returns the loan id.
    ///
    /// The borrow rate is fixed from the model before the new principal is
    /// added to the pool. Collateral custody is handled by the caller.
    pub fn create_loan(
        &mut self,
        collateral_asset: Address,
        borrow_asset: Address,
        collateral_amount: U256,
        borrow_amount: U256,
    ) -> u64 {
        if collateral_amount.is_zero() || borrow_amount.is_zero() {
            self.env().revert(LendingError::ZeroAmount);
        }

        let collateral_pool = self.load_pool(collateral_asset);
        if !collateral_pool.is_active {
            self.env().revert(LendingError::PoolInactive);
        }
        let borrow_pool = self.load_pool(borrow_asset);
        if !borrow_pool.is_active {
            self.env().revert(LendingError::PoolInactive);
        }
        if !borrow_pool.borrowing_enabled {
            self.env().revert(LendingError::BorrowingDisabled);
        }

        let limits = self.limits();
        if borrow_amount < limits.min_loan_amount {
            self.env().revert(LendingError::BelowMinimumLoan);
        }

        self.accrue_pool_internal(collateral_asset);
        let mut borrow_pool = self.accrue_pool_internal(borrow_asset);

        if borrow_amount > borrow_pool.available_liquidity() {
            self.env().revert(LendingError::InsufficientLiquidity);
        }

        // collateral sufficiency, valued through the shared helper
        let collateral_value = self.value_of(collateral_asset, collateral_amount);
        let borrow_value = self.value_of(borrow_asset, borrow_amount);
        let borrowing_power = SafeMath::mul_div(
            collateral_value,
            U256::from(collateral_pool.collateral_factor_bps),
            U256::from(BPS),
        )
        .unwrap_or_revert(&self.env());
        if borrowing_power < borrow_value {
            self.env().revert(LendingError::InsufficientCollateral);
        }

        // post-borrow utilization guard
        let new_borrows = SafeMath::add(borrow_pool.total_borrows, borrow_amount)
            .unwrap_or_revert(&self.env());
        let utilization = SafeMath::mul_div(
            new_borrows,
            U256::from(BPS),
            borrow_pool.total_deposits,
        )
        .unwrap_or_revert(&self.env());
        if utilization > U256::from(limits.max_utilization_bps) {
            self.env().revert(LendingError::UtilizationLimitExceeded);
        }

        // rate fixed at origination, before the new principal moves the curve
        let model_address = self
            .interest_rate_model
            .get_or_revert_with(LendingError::InvalidConfiguration);
        let model = InterestRateModelContractRef::new(self.env(), model_address);
        let interest_rate_bps =
            model.borrow_rate(borrow_pool.total_borrows, borrow_pool.total_deposits);

        let caller = self.env().caller();
        let timestamp = self.env().get_block_time();
        let loan_id = self.next_loan_id.get_or_default();
        self.next_loan_id.set(loan_id + 1);

        let loan = Loan {
            id: loan_id,
            borrower: caller,
            collateral_asset,
            borrow_asset,
            collateral_amount,
            principal: borrow_amount,
            accrued_interest: U256::zero(),
            interest_rate_bps,
            start_time: timestamp,
            last_accrual_time: timestamp,
            status: LoanStatus::Active,
            liquidation_threshold_bps: collateral_pool.liquidation_threshold_bps,
        };
        self.loans.set(&loan_id, loan);

        let count = self.user_loan_count.get(&caller).unwrap_or(0);
        self.user_loans.set(&(caller, count), loan_id);
        self.user_loan_count.set(&caller, count + 1);

        borrow_pool.total_borrows = new_borrows;
        self.pools.set(&borrow_asset, borrow_pool);

        self.env().emit_event(LoanCreated {
            loan_id,
            borrower: caller,
            collateral_asset,
            borrow_asset,
            collateral_amount,
            principal: borrow_amount,
            interest_rate_bps,
            timestamp,
        });

        self.notify(caller, borrow_asset, ActivityKind::Borrow, borrow_amount);
        loan_id
    }

    /// Repay a loan, partially or in full. Borrower only.
    ///
    /// The amount is capped to the outstanding debt and applied
    /// interest-first; the pool's total borrows shrink only by the principal
    /// portion, since accrued interest already entered them at accrual time.
    pub fn repay_loan(&mut self, loan_id: u64, amount: U256) {
        if amount.is_zero() {
            self.env().revert(LendingError::ZeroAmount);
        }

        let mut loan = self
            .loans
            .get(&loan_id)
            .unwrap_or_revert_with(&self.env(), LendingError::LoanNotFound);
        if !loan.is_active() {
            self.env().revert(LendingError::LoanNotActive);
        }
        let caller = self.env().caller();
        if caller != loan.borrower {
            self.env().revert(LendingError::NotBorrower);
        }

        let mut pool = self.accrue_pool_internal(loan.borrow_asset);
        let timestamp = self.env().get_block_time();
        loan.accrue(timestamp).unwrap_or_revert(&self.env());

        let total_debt = loan.total_debt();
        let actual = SafeMath::min(amount, total_debt);
        let split = loan.apply_repayment(actual).unwrap_or_revert(&self.env());

        pool.total_borrows = SafeMath::sub(pool.total_borrows, split.principal_paid)
            .unwrap_or_revert(&self.env());

        let fully_repaid = loan.total_debt().is_zero();
        if fully_repaid {
            loan.status = LoanStatus::Repaid;
            // full collateral released to the borrower; custody is external
            loan.collateral_amount = U256::zero();
        }

        let borrow_asset = loan.borrow_asset;
        self.loans.set(&loan_id, loan);
        self.pools.set(&borrow_asset, pool);

        self.env().emit_event(LoanRepaid {
            loan_id,
            borrower: caller,
            amount: actual,
            interest_paid: split.interest_paid,
            principal_paid: split.principal_paid,
            fully_repaid,
            timestamp,
        });

        self.notify(caller, borrow_asset, ActivityKind::Repay, actual);
    }

    // ========================================
    // Liquidation
    // ========================================

    /// Liquidate an under-collateralized loan.
    ///
    /// Eligibility is recomputed here, after forced accrual and with fresh
    /// validated quotes; a stale or low-confidence price aborts the whole
    /// operation with no state change. The seizure is capped to the loan's
    /// remaining collateral with the seize/bonus ratio preserved.
    pub fn liquidate(&mut self, loan_id: u64, repay_amount: U256) {
        if repay_amount.is_zero() {
            self.env().revert(LendingError::ZeroAmount);
        }

        let mut loan = self
            .loans
            .get(&loan_id)
            .unwrap_or_revert_with(&self.env(), LendingError::LoanNotFound);
        if !loan.is_active() {
            self.env().revert(LendingError::LoanNotActive);
        }

        let mut borrow_pool = self.accrue_pool_internal(loan.borrow_asset);
        if loan.collateral_asset != loan.borrow_asset {
            self.accrue_pool_internal(loan.collateral_asset);
        }
        let collateral_pool = self.load_pool(loan.collateral_asset);

        let timestamp = self.env().get_block_time();
        loan.accrue(timestamp).unwrap_or_revert(&self.env());

        let borrow_quote = self.validated_quote(loan.borrow_asset);
        let collateral_quote = self.validated_quote(loan.collateral_asset);

        let total_debt = loan.total_debt();
        let debt_value = math::asset_value(total_debt, borrow_quote.price)
            .unwrap_or_revert(&self.env());
        let collateral_value =
            math::asset_value(loan.collateral_amount, collateral_quote.price)
                .unwrap_or_revert(&self.env());
        let weighted = liquidation::weighted_collateral_value(
            collateral_value,
            loan.liquidation_threshold_bps,
        )
        .unwrap_or_revert(&self.env());

        if liquidation::health_factor(weighted, debt_value) >= U256::from(PRECISION) {
            self.env().revert(LendingError::NotLiquidatable);
        }

        let actual_repay = SafeMath::min(repay_amount, total_debt);
        let repay_value = math::asset_value(actual_repay, borrow_quote.price)
            .unwrap_or_revert(&self.env());
        let seizure = liquidation::seize_amounts(
            repay_value,
            collateral_quote.price,
            collateral_pool.liquidation_bonus_bps,
            loan.collateral_amount,
        )
        .unwrap_or_revert(&self.env());

        let split = loan
            .apply_repayment(actual_repay)
            .unwrap_or_revert(&self.env());
        borrow_pool.total_borrows = SafeMath::sub(borrow_pool.total_borrows, split.principal_paid)
            .unwrap_or_revert(&self.env());

        let fully_closed = loan.total_debt().is_zero();
        let collateral_returned = if fully_closed {
            loan.status = LoanStatus::Liquidated;
            let remainder = SafeMath::sub(loan.collateral_amount, seizure.total())
                .unwrap_or_revert(&self.env());
            loan.collateral_amount = U256::zero();
            remainder
        } else {
            loan.collateral_amount = SafeMath::sub(loan.collateral_amount, seizure.total())
                .unwrap_or_revert(&self.env());
            U256::zero()
        };

        let borrower = loan.borrower;
        let borrow_asset = loan.borrow_asset;
        self.loans.set(&loan_id, loan);
        self.pools.set(&borrow_asset, borrow_pool);

        let liquidator = self.env().caller();
        self.env().emit_event(LoanLiquidated {
            loan_id,
            borrower,
            liquidator,
            debt_covered: actual_repay,
            collateral_seized: seizure.total(),
            liquidation_bonus: seizure.bonus,
            collateral_returned,
            fully_closed,
            timestamp,
        });

        self.notify(liquidator, borrow_asset, ActivityKind::Liquidation, actual_repay);
    }

    // ========================================
    // View Functions
    // ========================================

    /// Pool record for an asset, if listed.
    pub fn get_pool(&self, asset: Address) -> Option<Pool> {
        self.pools.get(&asset)
    }

    /// Deposited balance of a user in a pool.
    pub fn get_user_balance(&self, user: Address, asset: Address) -> U256 {
        self.user_balances.get(&(user, asset)).unwrap_or_default()
    }

    /// Loan record by id, if any.
    pub fn get_loan(&self, loan_id: u64) -> Option<Loan> {
        self.loans.get(&loan_id)
    }

    /// Ids of all loans ever created by a borrower.
    pub fn get_user_loans(&self, borrower: Address) -> Vec<u64> {
        let count = self.user_loan_count.get(&borrower).unwrap_or(0);
        let mut ids = Vec::new();
        for i in 0..count {
            if let Some(id) = self.user_loans.get(&(borrower, i)) {
                ids.push(id);
            }
        }
        ids
    }

    /// Current utilization of a pool, in bps.
    pub fn get_utilization_bps(&self, asset: Address) -> U256 {
        self.load_pool(asset).utilization_bps()
    }

    /// Liquidity currently available for withdrawal or borrowing.
    pub fn get_available_liquidity(&self, asset: Address) -> U256 {
        self.load_pool(asset).available_liquidity()
    }

    /// Health factor of a loan projected to the current block time, 1e18
    /// scale. Uses validated quotes; informational only - `liquidate`
    /// recomputes eligibility itself.
    pub fn get_health_factor(&self, loan_id: u64) -> U256 {
        let loan = self
            .loans
            .get(&loan_id)
            .unwrap_or_revert_with(&self.env(), LendingError::LoanNotFound);

        let now = self.env().get_block_time();
        let debt = loan.projected_debt(now).unwrap_or_revert(&self.env());
        if debt.is_zero() {
            return U256::MAX;
        }

        let borrow_quote = self.validated_quote(loan.borrow_asset);
        let collateral_quote = self.validated_quote(loan.collateral_asset);
        let debt_value =
            math::asset_value(debt, borrow_quote.price).unwrap_or_revert(&self.env());
        let collateral_value =
            math::asset_value(loan.collateral_amount, collateral_quote.price)
                .unwrap_or_revert(&self.env());
        let weighted = liquidation::weighted_collateral_value(
            collateral_value,
            loan.liquidation_threshold_bps,
        )
        .unwrap_or_revert(&self.env());
        liquidation::health_factor(weighted, debt_value)
    }

    /// Protocol-wide limits.
    pub fn get_limits(&self) -> ProtocolLimits {
        self.limits()
    }

    // ========================================
    // Administrative Surface
    // ========================================

    /// List a new asset, creating its pool. Requires `Action::ListAsset`.
    pub fn list_asset(
        &mut self,
        asset: Address,
        collateral_factor_bps: u32,
        liquidation_threshold_bps: u32,
        liquidation_bonus_bps: u32,
    ) {
        let caller = self.gate_check(Action::ListAsset);

        if self.pools.get(&asset).is_some() {
            self.env().revert(LendingError::AssetAlreadyListed);
        }
        self.validate_risk_params(
            collateral_factor_bps,
            liquidation_threshold_bps,
            liquidation_bonus_bps,
        );

        let timestamp = self.env().get_block_time();
        self.pools.set(
            &asset,
            Pool {
                asset,
                total_deposits: U256::zero(),
                total_borrows: U256::zero(),
                total_reserves: U256::zero(),
                last_update_time: timestamp,
                is_active: true,
                deposits_enabled: true,
                borrowing_enabled: true,
                collateral_factor_bps,
                liquidation_threshold_bps,
                liquidation_bonus_bps,
            },
        );

        self.env().emit_event(AssetListed {
            asset,
            collateral_factor_bps,
            liquidation_threshold_bps,
            liquidation_bonus_bps,
            listed_by: caller,
        });
    }

    /// Update a pool's risk parameters. Requires `Action::SetRiskParams`.
    pub fn set_risk_params(
        &mut self,
        asset: Address,
        collateral_factor_bps: u32,
        liquidation_threshold_bps: u32,
        liquidation_bonus_bps: u32,
    ) {
        let caller = self.gate_check(Action::SetRiskParams);

        let mut pool = self.load_pool(asset);
        self.validate_risk_params(
            collateral_factor_bps,
            liquidation_threshold_bps,
            liquidation_bonus_bps,
        );

        pool.collateral_factor_bps = collateral_factor_bps;
        pool.liquidation_threshold_bps = liquidation_threshold_bps;
        pool.liquidation_bonus_bps = liquidation_bonus_bps;
        self.pools.set(&asset, pool);

        self.env().emit_event(RiskParamsUpdated {
            asset,
            collateral_factor_bps,
            liquidation_threshold_bps,
            liquidation_bonus_bps,
            updated_by: caller,
        });
    }

    /// Pause/unpause a pool or toggle its flows. Pools are never destroyed,
    /// only deactivated. Requires `Action::SetRiskParams`.
    pub fn set_pool_status(
        &mut self,
        asset: Address,
        is_active: bool,
        deposits_enabled: bool,
        borrowing_enabled: bool,
    ) {
        let caller = self.gate_check(Action::SetRiskParams);

        let mut pool = self.load_pool(asset);
        pool.is_active = is_active;
        pool.deposits_enabled = deposits_enabled;
        pool.borrowing_enabled = borrowing_enabled;
        self.pools.set(&asset, pool);

        self.env().emit_event(PoolStatusChanged {
            asset,
            is_active,
            deposits_enabled,
            borrowing_enabled,
            updated_by: caller,
        });
    }

    /// Update protocol-wide limits. Requires `Action::SetProtocolLimits`.
    pub fn set_protocol_limits(
        &mut self,
        min_loan_amount: U256,
        max_utilization_bps: u32,
        max_price_age: u64,
        min_confidence_bps: u32,
    ) {
        let caller = self.gate_check(Action::SetProtocolLimits);

        if max_utilization_bps == 0 || max_utilization_bps > BPS || min_confidence_bps > BPS {
            self.env().revert(LendingError::InvalidConfiguration);
        }

        self.limits.set(ProtocolLimits {
            min_loan_amount,
            max_utilization_bps,
            max_price_age,
            min_confidence_bps,
        });

        self.env().emit_event(ProtocolLimitsUpdated {
            min_loan_amount,
            max_utilization_bps,
            max_price_age,
            min_confidence_bps,
            updated_by: caller,
        });
    }

    /// Withdraw accumulated reserves, bounded by the pool's reserves and its
    /// available liquidity. Requires `Action::WithdrawReserves`.
    pub fn withdraw_reserves(&mut self, asset: Address, amount: U256, recipient: Address) {
        self.gate_check(Action::WithdrawReserves);

        if amount.is_zero() {
            self.env().revert(LendingError::ZeroAmount);
        }

        let mut pool = self.accrue_pool_internal(asset);
        if amount > pool.total_reserves {
            self.env().revert(LendingError::InsufficientBalance);
        }
        if amount > pool.available_liquidity() {
            self.env().revert(LendingError::InsufficientLiquidity);
        }

        pool.total_reserves =
            SafeMath::sub(pool.total_reserves, amount).unwrap_or_revert(&self.env());
        pool.total_deposits =
            SafeMath::sub(pool.total_deposits, amount).unwrap_or_revert(&self.env());
        self.pools.set(&asset, pool);

        let timestamp = self.env().get_block_time();
        self.env().emit_event(ReservesWithdrawn {
            asset,
            amount,
            recipient,
            timestamp,
        });
    }

    /// Configure the optional activity side channel. Requires
    /// `Action::SetProtocolLimits`.
    pub fn set_activity_notifier(&mut self, notifier: Option<Address>) {
        self.gate_check(Action::SetProtocolLimits);
        self.activity_notifier.set(notifier);
    }

    // ========================================
    // Internals
    // ========================================

    fn limits(&self) -> ProtocolLimits {
        self.limits
            .get_or_revert_with(LendingError::InvalidConfiguration)
    }

    /// Bounds checks shared by listing and risk-parameter updates.
    fn validate_risk_params(
        &self,
        collateral_factor_bps: u32,
        liquidation_threshold_bps: u32,
        liquidation_bonus_bps: u32,
    ) {
        if collateral_factor_bps > MAX_COLLATERAL_FACTOR_BPS
            || liquidation_threshold_bps < collateral_factor_bps
            || liquidation_threshold_bps > BPS
            || liquidation_bonus_bps > MAX_LIQUIDATION_BONUS_BPS
        {
            self.env().revert(LendingError::InvalidConfiguration);
        }
    }

    fn load_pool(&self, asset: Address) -> Pool {
        self.pools
            .get(&asset)
            .unwrap_or_revert_with(&self.env(), LendingError::AssetNotSupported)
    }

    /// Accrues a pool and persists it, returning the fresh record.
    fn accrue_pool_internal(&mut self, asset: Address) -> Pool {
        let mut pool = self.load_pool(asset);
        let now = self.env().get_block_time();
        if now == pool.last_update_time {
            return pool;
        }

        let model_address = self
            .interest_rate_model
            .get_or_revert_with(LendingError::InvalidConfiguration);
        let model = InterestRateModelContractRef::new(self.env(), model_address);
        let borrow_rate_bps = model.borrow_rate(pool.total_borrows, pool.total_deposits);
        let reserve_factor_bps = model.curve().reserve_factor_bps;

        let accrual = pool
            .accrue(borrow_rate_bps, reserve_factor_bps, now)
            .unwrap_or_revert(&self.env());
        self.pools.set(&asset, pool);

        if !accrual.interest.is_zero() {
            self.env().emit_event(PoolAccrued {
                asset,
                interest: accrual.interest,
                reserve_share: accrual.reserve_share,
                borrow_rate_bps,
                timestamp: now,
            });
        }
        self.load_pool(asset)
    }

    /// Fetches and validates a quote; any failure aborts the operation.
    fn validated_quote(&self, asset: Address) -> PriceQuote {
        let feed_address = self
            .price_feed
            .get_or_revert_with(LendingError::InvalidConfiguration);
        let feed = PriceFeedContractRef::new(self.env(), feed_address);
        let quote = feed
            .get_price(asset)
            .unwrap_or_revert_with(&self.env(), LendingError::PriceFeedNotAvailable);

        if quote.price.is_zero() {
            self.env().revert(LendingError::InvalidPrice);
        }
        let limits = self.limits();
        let now = self.env().get_block_time();
        if now.saturating_sub(quote.timestamp) > limits.max_price_age {
            self.env().revert(LendingError::StalePriceData);
        }
        if quote.confidence_bps < limits.min_confidence_bps {
            self.env().revert(LendingError::LowConfidencePrice);
        }
        quote
    }

    /// USD value of `amount` of `asset` through a validated quote.
    fn value_of(&self, asset: Address, amount: U256) -> U256 {
        let quote = self.validated_quote(asset);
        math::asset_value(amount, quote.price).unwrap_or_revert(&self.env())
    }

    fn gate_check(&self, action: Action) -> Address {
        let caller = self.env().caller();
        let gate_address = self
            .access_gate
            .get_or_revert_with(LendingError::InvalidConfiguration);
        let gate = AccessGateContractRef::new(self.env(), gate_address);
        if !gate.authorize(caller, action) {
            self.env().revert(LendingError::Unauthorized);
        }
        caller
    }

    /// Invokes the activity side channel when configured. The acknowledgement
    /// is informational; accounting state is already final here.
    fn notify(&mut self, user: Address, asset: Address, kind: ActivityKind, amount: U256) {
        if let Some(notifier) = self.activity_notifier.get_or_default() {
            let mut log = ActivityLogContractRef::new(self.env(), notifier);
            let _acknowledged = log.on_activity(user, asset, kind, amount);
        }
    }
}

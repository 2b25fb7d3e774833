//! Access gate - role storage for the administrative surface.
//!
//! The engine never checks roles itself; every privileged entry point asks
//! the injected gate whether the caller may perform a specific action.

use odra::prelude::*;
use crate::errors::LendingError;
use crate::events::{OperatorGranted, OperatorRevoked};

/// Privileged actions the gate can authorize
#[odra::odra_type]
pub enum Action {
    /// List a new asset
    ListAsset,
    /// Change a pool's risk parameters or status
    SetRiskParams,
    /// Change the interest rate curve
    SetInterestCurve,
    /// Change protocol-wide limits
    SetProtocolLimits,
    /// Withdraw accumulated reserves
    WithdrawReserves,
}

/// Access gate contract
#[odra::module]
pub struct AccessGate {
    /// Admin address, set at deployment
    admin: Var<Address>,
    /// Operator grants
    operators: Mapping<Address, bool>,
}

#[odra::module]
impl AccessGate {
    /// Initialize the gate; the deployer becomes admin.
    pub fn init(&mut self) {
        let caller = self.env().caller();
        self.admin.set(caller);
    }

    /// Whether `caller` may perform `action`. The admin may perform any
    /// action; operators may perform all but reserve withdrawal.
    pub fn authorize(&self, caller: Address, action: Action) -> bool {
        let admin = self.admin.get_or_revert_with(LendingError::Unauthorized);
        if caller == admin {
            return true;
        }
        if matches!(action, Action::WithdrawReserves) {
            return false;
        }
        self.operators.get(&caller).unwrap_or(false)
    }

    /// Grant operator rights (admin only).
    pub fn grant_operator(&mut self, operator: Address) {
        self.only_admin();
        self.operators.set(&operator, true);

        let admin = self.admin.get_or_revert_with(LendingError::Unauthorized);
        self.env().emit_event(OperatorGranted {
            operator,
            granted_by: admin,
        });
    }

    /// Revoke operator rights (admin only).
    pub fn revoke_operator(&mut self, operator: Address) {
        self.only_admin();
        self.operators.set(&operator, false);

        let admin = self.admin.get_or_revert_with(LendingError::Unauthorized);
        self.env().emit_event(OperatorRevoked {
            operator,
            revoked_by: admin,
        });
    }

    /// Get admin address
    pub fn get_admin(&self) -> Address {
        self.admin.get_or_revert_with(LendingError::Unauthorized)
    }

    fn only_admin(&self) {
        let caller = self.env().caller();
        let admin = self.admin.get_or_revert_with(LendingError::Unauthorized);
        if caller != admin {
            self.env().revert(LendingError::Unauthorized);
        }
    }
}

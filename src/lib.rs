#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]
extern crate alloc;

// Shared math and protocol constants
pub mod math;

pub mod errors;
pub mod events;

// Pool accounting and loan lifecycle records
pub mod loan;
pub mod pool;

// Contracts
pub mod access_gate;
pub mod activity;
pub mod interest_rate;
pub mod lending_pool;
pub mod price_feed;

// Liquidation math
pub mod liquidation;

//! Price feed - publishes per-asset USD quotes with timestamp and confidence.
//!
//! The feed only stores quotes. Staleness and confidence are validated by the
//! engine at the point of use, so a stale quote aborts the consuming
//! operation rather than silently going unnoticed here.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::LendingError;
use crate::events::PriceUpdated;

/// One price quote for an asset
#[odra::odra_type]
pub struct PriceQuote {
    /// Price in USD per unit, 1e18 scale
    pub price: U256,
    /// Timestamp of the quote
    pub timestamp: u64,
    /// Quote confidence, in bps (10000 = fully confident)
    pub confidence_bps: u32,
}

/// Price feed contract
#[odra::module]
pub struct PriceFeed {
    /// Quotes per asset
    quotes: Mapping<Address, PriceQuote>,
    /// Publisher address
    publisher: Var<Address>,
}

#[odra::module]
impl PriceFeed {
    /// Initialize the feed; the deployer becomes the publisher.
    pub fn init(&mut self) {
        let caller = self.env().caller();
        self.publisher.set(caller);
    }

    /// Publish a quote for an asset, stamped with the current block time.
    pub fn set_price(&mut self, asset: Address, price: U256, confidence_bps: u32) {
        self.only_publisher();

        if price.is_zero() {
            self.env().revert(LendingError::InvalidPrice);
        }

        let timestamp = self.env().get_block_time();
        self.quotes.set(
            &asset,
            PriceQuote {
                price,
                timestamp,
                confidence_bps,
            },
        );

        self.env().emit_event(PriceUpdated {
            asset,
            price,
            confidence_bps,
            timestamp,
        });
    }

    /// Latest quote for an asset, if any.
    pub fn get_price(&self, asset: Address) -> Option<PriceQuote> {
        self.quotes.get(&asset)
    }

    fn only_publisher(&self) {
        let caller = self.env().caller();
        let publisher = self
            .publisher
            .get_or_revert_with(LendingError::Unauthorized);
        if caller != publisher {
            self.env().revert(LendingError::Unauthorized);
        }
    }
}

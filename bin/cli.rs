//! CLI tool for deploying and interacting with the lending engine contracts.

use odra::host::HostEnv;
use odra::prelude::Addressable;
use odra_cli::{
    deploy::DeployScript, ContractProvider, DeployedContractsContainer, DeployerExt, OdraCli,
};
use openlend_contracts::access_gate::AccessGate;
use openlend_contracts::interest_rate::InterestRateModel;
use openlend_contracts::lending_pool::LendingPool;
use openlend_contracts::price_feed::PriceFeed;

/// Deploys the access gate contract.
pub struct AccessGateDeployScript;

impl DeployScript for AccessGateDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer,
    ) -> Result<(), odra_cli::deploy::Error> {
        use odra::host::NoArgs;

        let _gate = AccessGate::load_or_deploy(
            &env,
            NoArgs,
            container,
            300_000_000_000, // Gas limit for gate deployment
        )?;

        Ok(())
    }
}

/// Deploys the full lending engine: gate, price feed, rate model, pool.
pub struct LendingDeployScript;

impl DeployScript for LendingDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer,
    ) -> Result<(), odra_cli::deploy::Error> {
        use odra::host::NoArgs;
        use openlend_contracts::interest_rate::InterestRateModelInitArgs;
        use openlend_contracts::lending_pool::LendingPoolInitArgs;

        let gate = AccessGate::load_or_deploy(&env, NoArgs, container, 300_000_000_000)?;
        let gate_address = gate.address().clone();

        let feed = PriceFeed::load_or_deploy(&env, NoArgs, container, 300_000_000_000)?;
        let feed_address = feed.address().clone();

        // 2% base, 4% slope1, 75% slope2, 80% kink, 10% reserve factor
        let model = InterestRateModel::load_or_deploy(
            &env,
            InterestRateModelInitArgs {
                access_gate: gate_address.clone(),
                base_rate_bps: 200,
                slope1_bps: 400,
                slope2_bps: 7_500,
                optimal_utilization_bps: 8_000,
                reserve_factor_bps: 1_000,
            },
            container,
            500_000_000_000,
        )?;

        let _pool = LendingPool::load_or_deploy(
            &env,
            LendingPoolInitArgs {
                interest_rate_model: model.address().clone(),
                price_feed: feed_address,
                access_gate: gate_address,
            },
            container,
            500_000_000_000, // Gas limit for engine deployment
        )?;

        Ok(())
    }
}

/// Main function to run the CLI tool.
pub fn main() {
    OdraCli::new()
        .about("CLI tool for the lending engine contracts")
        // Deploy scripts
        .deploy(AccessGateDeployScript)
        .deploy(LendingDeployScript)
        // Contract references
        .contract::<AccessGate>()
        .contract::<PriceFeed>()
        .contract::<InterestRateModel>()
        .contract::<LendingPool>()
        .build()
        .run();
}

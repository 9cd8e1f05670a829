use common::network::Network;
use deploy_sdk::{
    accounts::{NamedAccounts, DEPLOYER},
    deployments::{artifact::ArtifactStore, chain::ChainDeployments, record::DeploymentStore},
    external_api::contract::utils::{get_chain_id, get_provider, get_provider_with_signers},
    scripts::{master_of_coin::MasterOfCoinConfig, registry::default_registry, DeployEnvironment},
};

use crate::{env_var::EnvVar, error::CliError};

pub async fn run(network: Network, tags: &[String], reset: bool) -> Result<(), CliError> {
    let env = envy::from_env::<EnvVar>()?;
    let provider = get_provider(&env.rpc_url)?;
    let chain_id = get_chain_id(&provider).await?;
    if chain_id != network.chain_id() {
        return Err(CliError::WrongChain {
            network: network.to_string(),
            expected: network.chain_id(),
            actual: chain_id,
        });
    }

    let store = DeploymentStore::new(&env.deployments_dir, network.name());
    if reset {
        if network.is_live() {
            log::warn!("resetting deployments of live network {}", network);
        }
        store.reset()?;
    }
    store.check_chain_id(chain_id)?;

    let (signer_provider, signers) =
        get_provider_with_signers(&provider, &[env.deployer_private_key])?;
    let accounts = NamedAccounts::from_private_keys(&[(DEPLOYER, env.deployer_private_key)])?;
    log::info!(
        "deploying to {} (chain id {}) from {}",
        network,
        chain_id,
        accounts.deployer()?
    );

    let deployments = ChainDeployments::new(
        signer_provider,
        signers,
        ArtifactStore::new(&env.artifacts_dir),
        store,
    );
    let registry = default_registry(MasterOfCoinConfig::from_env()?);
    let deploy_env = DeployEnvironment {
        network,
        deployments: &deployments,
        accounts: &accounts,
    };
    let executed = registry.run(&deploy_env, tags).await?;
    log::info!(
        "{} deploy script(s) executed: {}",
        executed.len(),
        executed.join(", ")
    );
    Ok(())
}

use std::path::PathBuf;

use alloy::primitives::B256;
use common::network::Network;
use deploy_sdk::{
    accounts::{NamedAccounts, DEPLOYER},
    deployments::{artifact::ArtifactStore, chain::ChainDeployments, record::DeploymentStore},
    external_api::contract::utils::{get_chain_id, get_provider, get_provider_with_signers},
};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct EnvVar {
    pub rpc_url: String,
    pub deployer_private_key: B256,
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: String,
}

fn default_artifacts_dir() -> String {
    "artifacts".to_string()
}

pub struct TestSetup {
    pub network: Network,
    pub deployments: ChainDeployments,
    pub accounts: NamedAccounts,
    pub deployments_dir: PathBuf,
}

/// Connects to the node in `RPC_URL` and records deployments in a fresh temporary
/// directory so every run starts from scratch.
pub async fn setup() -> anyhow::Result<TestSetup> {
    dotenvy::dotenv().ok();
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .is_test(true)
        .try_init();
    let env = envy::from_env::<EnvVar>()?;

    let provider = get_provider(&env.rpc_url)?;
    let chain_id = get_chain_id(&provider).await?;
    let network = Network::ALL
        .into_iter()
        .find(|n| n.chain_id() == chain_id)
        .ok_or_else(|| anyhow::anyhow!("no known network with chain id {}", chain_id))?;

    let deployments_dir =
        std::env::temp_dir().join(format!("deployments-{}", uuid::Uuid::new_v4()));
    let store = DeploymentStore::new(&deployments_dir, network.name());
    store.check_chain_id(chain_id)?;

    let (signer_provider, signers) =
        get_provider_with_signers(&provider, &[env.deployer_private_key])?;
    let accounts = NamedAccounts::from_private_keys(&[(DEPLOYER, env.deployer_private_key)])?;
    let deployments = ChainDeployments::new(
        signer_provider,
        signers,
        ArtifactStore::new(&env.artifacts_dir),
        store,
    );
    Ok(TestSetup {
        network,
        deployments,
        accounts,
        deployments_dir,
    })
}

use alloy::primitives::B256;
use serde::Deserialize;

use common::env::EnvType;

#[derive(Deserialize)]
pub struct EnvVar {
    #[serde(default)]
    pub env: EnvType,

    // blockchain settings
    pub rpc_url: String,
    pub deployer_private_key: B256,

    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: String,
    #[serde(default = "default_deployments_dir")]
    pub deployments_dir: String,
}

/// Subset needed by commands that never talk to a node.
#[derive(Deserialize)]
pub struct StoreEnvVar {
    #[serde(default = "default_deployments_dir")]
    pub deployments_dir: String,
}

fn default_artifacts_dir() -> String {
    "artifacts".to_string()
}

fn default_deployments_dir() -> String {
    "deployments".to_string()
}

#[derive(Deserialize)]
pub struct LogEnvVar {
    #[serde(default)]
    pub env: EnvType,
}

use envy::Error as EnvyError;

use deploy_sdk::{
    accounts::AccountError, deployments::error::DeploymentError,
    external_api::contract::error::BlockchainError, scripts::error::ScriptError,
};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Env error:{0}")]
    EnvError(#[from] EnvyError),

    #[error("Blockchain error: {0}")]
    BlockchainError(#[from] BlockchainError),

    #[error("Deployment error: {0}")]
    DeploymentError(#[from] DeploymentError),

    #[error("Account error: {0}")]
    AccountError(#[from] AccountError),

    #[error("Script error: {0}")]
    ScriptError(#[from] ScriptError),

    #[error("Network {network} has chain id {expected} but the RPC reports {actual}")]
    WrongChain {
        network: String,
        expected: u64,
        actual: u64,
    },
}

use async_trait::async_trait;
use common::network::Network;

use crate::{accounts::NamedAccounts, deployments::interface::DeploymentBackend};

use self::error::ScriptError;

pub mod error;
pub mod master_of_coin;
pub mod registry;

/// What a deploy script gets to work with.
pub struct DeployEnvironment<'a> {
    pub network: Network,
    pub deployments: &'a dyn DeploymentBackend,
    pub accounts: &'a NamedAccounts,
}

#[async_trait]
pub trait DeployScript: Send + Sync {
    fn name(&self) -> &str;

    fn tags(&self) -> &[String];

    async fn run(&self, env: &DeployEnvironment<'_>) -> Result<(), ScriptError>;
}

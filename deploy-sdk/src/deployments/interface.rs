use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, B256},
};
use async_trait::async_trait;

use super::error::DeploymentError;

pub const DEFAULT_PROXY_CONTRACT: &str = "ERC1967Proxy";

#[derive(Debug, Clone, PartialEq)]
pub struct DeployOptions {
    pub from: Address,
    /// Emit a human readable line for every deployment or reuse.
    pub log: bool,
    /// Constructor arguments. For proxied deployments these go to the implementation.
    pub args: Vec<DynSolValue>,
    pub proxy: Option<ProxyOptions>,
}

impl DeployOptions {
    pub fn new(from: Address) -> Self {
        Self {
            from,
            log: false,
            args: vec![],
            proxy: None,
        }
    }

    pub fn with_log(mut self, log: bool) -> Self {
        self.log = log;
        self
    }

    pub fn with_proxy(mut self, proxy: ProxyOptions) -> Self {
        self.proxy = Some(proxy);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProxyOptions {
    /// Artifact name of the proxy to put in front of the implementation.
    pub proxy_contract: String,
    /// Initializer run through the proxy on first deployment only.
    pub execute: Option<ProxyExecute>,
}

impl Default for ProxyOptions {
    fn default() -> Self {
        Self {
            proxy_contract: DEFAULT_PROXY_CONTRACT.to_string(),
            execute: None,
        }
    }
}

impl ProxyOptions {
    pub fn with_execute(method_name: &str, args: Vec<DynSolValue>) -> Self {
        Self {
            execute: Some(ProxyExecute {
                method_name: method_name.to_string(),
                args,
            }),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProxyExecute {
    pub method_name: String,
    pub args: Vec<DynSolValue>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TxOptions {
    pub from: Address,
    pub log: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeployResult {
    pub name: String,
    pub address: Address,
    pub implementation: Option<Address>,
    pub transaction_hash: Option<B256>,
    /// false when an identical deployment was already recorded.
    pub newly_deployed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TxResult {
    pub transaction_hash: B256,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

/// What a deploy script can do against a network: make sure a contract is deployed,
/// query it, and send transactions to it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeploymentBackend: Send + Sync {
    async fn deploy(
        &self,
        name: &str,
        options: &DeployOptions,
    ) -> Result<DeployResult, DeploymentError>;

    async fn read(
        &self,
        name: &str,
        method_name: &str,
        args: &[DynSolValue],
    ) -> Result<DynSolValue, DeploymentError>;

    async fn execute(
        &self,
        name: &str,
        options: &TxOptions,
        method_name: &str,
        args: &[DynSolValue],
    ) -> Result<TxResult, DeploymentError>;
}

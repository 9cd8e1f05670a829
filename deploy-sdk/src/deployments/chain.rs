use alloy::{
    dyn_abi::DynSolValue,
    network::TransactionBuilder as _,
    primitives::{Address, Bytes, B256},
    providers::Provider as _,
    rpc::types::{TransactionReceipt, TransactionRequest},
};
use async_trait::async_trait;

use crate::external_api::contract::{
    abi::{decode_function_output, encode_function_call},
    error::BlockchainError,
    handlers::{deploy_bytecode, send_transaction_and_wait},
    proxy_contract::ProxyContract,
    utils::{is_contract, NormalProvider},
};

use super::{
    artifact::{Artifact, ArtifactStore},
    error::DeploymentError,
    interface::{
        DeployOptions, DeployResult, DeploymentBackend, ProxyOptions, TxOptions, TxResult,
    },
    plan::{plan_deploy, DeployAction, DeployRequest},
    record::{DeploymentRecord, DeploymentStore, RecordedExecute},
};

/// Deployment backend talking to a node through a signing provider, keeping its
/// bookkeeping in a [`DeploymentStore`].
#[derive(Clone)]
pub struct ChainDeployments {
    provider: NormalProvider,
    signers: Vec<Address>,
    artifacts: ArtifactStore,
    store: DeploymentStore,
}

impl ChainDeployments {
    pub fn new(
        provider: NormalProvider,
        signers: Vec<Address>,
        artifacts: ArtifactStore,
        store: DeploymentStore,
    ) -> Self {
        Self {
            provider,
            signers,
            artifacts,
            store,
        }
    }

    pub fn store(&self) -> &DeploymentStore {
        &self.store
    }

    fn check_signer(&self, from: Address) -> Result<(), DeploymentError> {
        if !self.signers.contains(&from) {
            return Err(BlockchainError::UnknownSigner(from).into());
        }
        Ok(())
    }

    async fn deploy_contract(
        &self,
        name: &str,
        artifact: &Artifact,
        args_data: &Bytes,
        from: Address,
        log: bool,
    ) -> Result<Deployed, DeploymentError> {
        let creation_code = artifact.creation_code(args_data);
        let (address, receipt) =
            deploy_bytecode(&self.provider, from, creation_code, name).await?;
        if log {
            log::info!(
                "deploying \"{}\" (tx: {:?})...: deployed at {} with {} gas",
                name,
                receipt.transaction_hash,
                address,
                receipt.gas_used
            );
        }
        Ok(Deployed::new(address, &receipt))
    }

    async fn deploy_proxied(
        &self,
        name: &str,
        artifact: &Artifact,
        request: &DeployRequest,
        proxy: &ProxyOptions,
        options: &DeployOptions,
    ) -> Result<DeployResult, DeploymentError> {
        let implementation = self
            .deploy_contract(
                &format!("{name}_Implementation"),
                artifact,
                &request.args_data,
                options.from,
                options.log,
            )
            .await?;

        let proxy_artifact = self.artifacts.load(&proxy.proxy_contract)?;
        let init_calldata = request.init_calldata.clone().unwrap_or_default();
        let proxy_name = format!("{name}_Proxy");
        let (proxy_contract, receipt) = ProxyContract::deploy(
            self.provider.clone(),
            options.from,
            &proxy_artifact.abi,
            &proxy_artifact.bytecode,
            implementation.address,
            init_calldata,
            &proxy_name,
        )
        .await?;
        // sanity check
        if proxy_contract.implementation().await? != Some(implementation.address) {
            return Err(DeploymentError::ProxyConfigMismatch(proxy_name));
        }
        if options.log {
            log::info!(
                "deploying \"{}\" (tx: {:?})...: deployed at {} with {} gas",
                proxy_name,
                receipt.transaction_hash,
                proxy_contract.address,
                receipt.gas_used
            );
        }
        let proxy_deployed = Deployed::new(proxy_contract.address, &receipt);
        self.save_proxied(
            name,
            artifact,
            &proxy_artifact,
            request,
            proxy,
            options.from,
            &implementation,
            &proxy_deployed,
        )?;
        Ok(DeployResult {
            name: name.to_string(),
            address: proxy_deployed.address,
            implementation: Some(implementation.address),
            transaction_hash: Some(proxy_deployed.transaction_hash),
            newly_deployed: true,
        })
    }

    /// Writes `<name>_Implementation`, `<name>_Proxy` and `<name>`, the last one
    /// pairing the proxy address with the implementation ABI.
    #[allow(clippy::too_many_arguments)]
    fn save_proxied(
        &self,
        name: &str,
        artifact: &Artifact,
        proxy_artifact: &Artifact,
        request: &DeployRequest,
        proxy: &ProxyOptions,
        from: Address,
        implementation: &Deployed,
        proxy_deployed: &Deployed,
    ) -> Result<(), DeploymentError> {
        self.store.save(
            &format!("{name}_Implementation"),
            &implementation.record(artifact, &request.args_data, from),
        )?;

        let init_calldata = request.init_calldata.clone().unwrap_or_default();
        let proxy_args_data = proxy_artifact.constructor_args(&[
            DynSolValue::Address(implementation.address),
            DynSolValue::Bytes(init_calldata.to_vec()),
        ])?;
        self.store.save(
            &format!("{name}_Proxy"),
            &proxy_deployed.record(proxy_artifact, &proxy_args_data, from),
        )?;

        let execute = proxy.execute.as_ref().map(|execute| RecordedExecute {
            method_name: execute.method_name.clone(),
            calldata: init_calldata,
        });
        let record = DeploymentRecord {
            bytecode_hash: request.bytecode_hash,
            implementation: Some(implementation.address),
            execute,
            ..proxy_deployed.record(artifact, &request.args_data, from)
        };
        self.store.save(name, &record)
    }

    async fn upgrade_proxied(
        &self,
        name: &str,
        proxy: Address,
        artifact: &Artifact,
        request: &DeployRequest,
        previous: DeploymentRecord,
        options: &DeployOptions,
    ) -> Result<DeployResult, DeploymentError> {
        let implementation_name = format!("{name}_Implementation");
        let implementation = self
            .deploy_contract(
                &implementation_name,
                artifact,
                &request.args_data,
                options.from,
                options.log,
            )
            .await?;
        self.store.save(
            &implementation_name,
            &implementation.record(artifact, &request.args_data, options.from),
        )?;
        let receipt = ProxyContract::new(self.provider.clone(), proxy)
            .upgrade(options.from, implementation.address)
            .await?;
        if options.log {
            log::info!(
                "upgrading \"{}\" (tx: {:?})...: implementation {} with {} gas",
                name,
                receipt.transaction_hash,
                implementation.address,
                receipt.gas_used
            );
        }
        let record = DeploymentRecord {
            abi: artifact.abi.clone(),
            args_data: request.args_data.clone(),
            bytecode_hash: request.bytecode_hash,
            implementation: Some(implementation.address),
            ..previous
        };
        self.store.save(name, &record)?;
        Ok(DeployResult {
            name: name.to_string(),
            address: proxy,
            implementation: Some(implementation.address),
            transaction_hash: Some(receipt.transaction_hash),
            newly_deployed: true,
        })
    }
}

/// A contract creation that went through.
#[derive(Debug, Clone, Copy)]
struct Deployed {
    address: Address,
    transaction_hash: B256,
    block_number: Option<u64>,
}

impl Deployed {
    fn new(address: Address, receipt: &TransactionReceipt) -> Self {
        Self {
            address,
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
        }
    }

    fn record(
        &self,
        artifact: &Artifact,
        args_data: &Bytes,
        deployer: Address,
    ) -> DeploymentRecord {
        DeploymentRecord {
            address: self.address,
            abi: artifact.abi.clone(),
            transaction_hash: Some(self.transaction_hash),
            block_number: self.block_number,
            deployer,
            args_data: args_data.clone(),
            bytecode_hash: artifact.bytecode_hash(),
            implementation: None,
            execute: None,
        }
    }
}

#[async_trait]
impl DeploymentBackend for ChainDeployments {
    async fn deploy(
        &self,
        name: &str,
        options: &DeployOptions,
    ) -> Result<DeployResult, DeploymentError> {
        self.check_signer(options.from)?;
        let artifact = self.artifacts.load(name)?;
        let args_data = artifact.constructor_args(&options.args)?;
        let init_calldata = match options.proxy.as_ref().and_then(|p| p.execute.as_ref()) {
            Some(execute) => Some(encode_function_call(
                &artifact.abi,
                &execute.method_name,
                &execute.args,
            )?),
            None => None,
        };
        let request = DeployRequest {
            bytecode_hash: artifact.bytecode_hash(),
            args_data,
            proxied: options.proxy.is_some(),
            init_calldata,
        };

        let existing = self.store.load(name)?;
        let code_present = match &existing {
            Some(record) => is_contract(&self.provider, record.address).await?,
            None => false,
        };
        match plan_deploy(name, existing.as_ref(), &request, code_present)? {
            DeployAction::Reuse(address) => {
                if options.log {
                    log::info!("reusing \"{}\" at {}", name, address);
                }
                let record = existing
                    .ok_or_else(|| DeploymentError::DeploymentNotFound(name.to_string()))?;
                Ok(DeployResult {
                    name: name.to_string(),
                    address,
                    implementation: record.implementation,
                    transaction_hash: record.transaction_hash,
                    newly_deployed: false,
                })
            }
            DeployAction::Deploy => match &options.proxy {
                Some(proxy) => {
                    self.deploy_proxied(name, &artifact, &request, proxy, options)
                        .await
                }
                None => {
                    let deployed = self
                        .deploy_contract(
                            name,
                            &artifact,
                            &request.args_data,
                            options.from,
                            options.log,
                        )
                        .await?;
                    self.store.save(
                        name,
                        &deployed.record(&artifact, &request.args_data, options.from),
                    )?;
                    Ok(DeployResult {
                        name: name.to_string(),
                        address: deployed.address,
                        implementation: None,
                        transaction_hash: Some(deployed.transaction_hash),
                        newly_deployed: true,
                    })
                }
            },
            DeployAction::Upgrade { proxy } => {
                let previous = existing
                    .ok_or_else(|| DeploymentError::DeploymentNotFound(name.to_string()))?;
                self.upgrade_proxied(name, proxy, &artifact, &request, previous, options)
                    .await
            }
        }
    }

    async fn read(
        &self,
        name: &str,
        method_name: &str,
        args: &[DynSolValue],
    ) -> Result<DynSolValue, DeploymentError> {
        let record = self.store.get(name)?;
        let calldata = encode_function_call(&record.abi, method_name, args)?;
        let tx_request = TransactionRequest::default()
            .with_to(record.address)
            .with_input(calldata);
        let output = self
            .provider
            .call(tx_request)
            .await
            .map_err(BlockchainError::from)?;
        let value = decode_function_output(&record.abi, method_name, args.len(), &output)?;
        Ok(value)
    }

    async fn execute(
        &self,
        name: &str,
        options: &TxOptions,
        method_name: &str,
        args: &[DynSolValue],
    ) -> Result<TxResult, DeploymentError> {
        self.check_signer(options.from)?;
        let record = self.store.get(name)?;
        let calldata = encode_function_call(&record.abi, method_name, args)?;
        let tx_request = TransactionRequest::default()
            .with_from(options.from)
            .with_to(record.address)
            .with_input(calldata);
        let tx_name = format!("{name}.{method_name}");
        let receipt = send_transaction_and_wait(&self.provider, tx_request, &tx_name).await?;
        if options.log {
            log::info!(
                "executing {} (tx: {:?}) ...: performed with {} gas",
                tx_name,
                receipt.transaction_hash,
                receipt.gas_used
            );
        }
        Ok(TxResult {
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
        })
    }
}

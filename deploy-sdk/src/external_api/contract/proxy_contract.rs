use alloy::{
    dyn_abi::DynSolValue,
    json_abi::JsonAbi,
    network::TransactionBuilder as _,
    primitives::{Address, Bytes},
    rpc::types::{TransactionReceipt, TransactionRequest},
    sol,
};

use super::{
    abi::encode_constructor_args,
    error::BlockchainError,
    handlers::{deploy_bytecode, send_transaction_and_wait},
    utils::{get_proxy_implementation, NormalProvider},
};

sol! {
    interface IUUPSUpgradeable {
        function upgradeToAndCall(address newImplementation, bytes memory data) external payable;
    }
}

/// An ERC-1967 proxy whose upgrade entry point lives in the implementation (UUPS).
#[derive(Clone)]
pub struct ProxyContract {
    pub provider: NormalProvider,
    pub address: Address,
}

impl ProxyContract {
    pub fn new(provider: NormalProvider, address: Address) -> Self {
        Self { provider, address }
    }

    /// Deploys the proxy from its compiled artifact. `init_calldata` is delegated to the
    /// implementation inside the proxy constructor, so initialization happens atomically
    /// with the deployment.
    pub async fn deploy(
        provider: NormalProvider,
        from: Address,
        proxy_abi: &JsonAbi,
        proxy_bytecode: &Bytes,
        implementation: Address,
        init_calldata: Bytes,
        tx_name: &str,
    ) -> Result<(Self, TransactionReceipt), BlockchainError> {
        let constructor_args = encode_constructor_args(
            proxy_abi,
            &[
                DynSolValue::Address(implementation),
                DynSolValue::Bytes(init_calldata.to_vec()),
            ],
        )?;
        let creation_code = [&proxy_bytecode[..], &constructor_args[..]].concat();
        let (address, receipt) =
            deploy_bytecode(&provider, from, creation_code.into(), tx_name).await?;
        Ok((Self { provider, address }, receipt))
    }

    pub async fn implementation(&self) -> Result<Option<Address>, BlockchainError> {
        get_proxy_implementation(&self.provider, self.address).await
    }

    /// Points the proxy at `new_implementation` without running any initializer.
    pub async fn upgrade(
        &self,
        from: Address,
        new_implementation: Address,
    ) -> Result<TransactionReceipt, BlockchainError> {
        let call = IUUPSUpgradeable::upgradeToAndCallCall {
            newImplementation: new_implementation,
            data: Bytes::new(),
        };
        let tx_request = TransactionRequest::default()
            .with_from(from)
            .with_to(self.address)
            .with_call(&call);
        send_transaction_and_wait(&self.provider, tx_request, "upgradeToAndCall").await
    }
}

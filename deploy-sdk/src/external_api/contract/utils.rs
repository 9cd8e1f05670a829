use alloy::{
    network::EthereumWallet,
    primitives::{b256, Address, B256, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};

use super::error::BlockchainError;

pub type NormalProvider = DynProvider;

/// keccak256("eip1967.proxy.implementation") - 1
pub const EIP1967_IMPLEMENTATION_SLOT: B256 =
    b256!("0x360894a13ba1a3210667c828492db98dca3e2076cc3735a920a3ca505d382bbc");

/// Read-only provider without fillers. Signing providers are layered on top of it.
pub fn get_provider(rpc_url: &str) -> Result<NormalProvider, BlockchainError> {
    let url = rpc_url.parse().map_err(|_| {
        BlockchainError::ParseError(format!("Failed to parse RPC url: {rpc_url}"))
    })?;
    let provider = ProviderBuilder::default().connect_http(url);
    Ok(provider.erased())
}

pub fn get_signer(private_key: B256) -> Result<PrivateKeySigner, BlockchainError> {
    PrivateKeySigner::from_bytes(&private_key)
        .map_err(|e| BlockchainError::InvalidPrivateKey(e.to_string()))
}

pub fn get_address_from_private_key(private_key: B256) -> Result<Address, BlockchainError> {
    Ok(get_signer(private_key)?.address())
}

/// Wraps `provider` with a wallet holding every key in `private_keys`. Transactions are
/// signed by whichever key matches their `from` field.
pub fn get_provider_with_signers(
    provider: &NormalProvider,
    private_keys: &[B256],
) -> Result<(NormalProvider, Vec<Address>), BlockchainError> {
    let mut signers = private_keys
        .iter()
        .map(|key| get_signer(*key))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter();
    let first = signers
        .next()
        .ok_or_else(|| BlockchainError::InvalidPrivateKey("no private key given".to_string()))?;
    let mut addresses = vec![first.address()];
    let mut wallet = EthereumWallet::new(first);
    for signer in signers {
        addresses.push(signer.address());
        wallet.register_signer(signer);
    }
    let signer_provider = ProviderBuilder::new()
        .wallet(wallet)
        .connect_provider(provider.clone())
        .erased();
    Ok((signer_provider, addresses))
}

pub async fn get_chain_id(provider: &NormalProvider) -> Result<u64, BlockchainError> {
    let chain_id = provider.get_chain_id().await?;
    Ok(chain_id)
}

pub async fn is_contract(
    provider: &NormalProvider,
    address: Address,
) -> Result<bool, BlockchainError> {
    if address == Address::ZERO {
        return Ok(false);
    }
    let code = provider.get_code_at(address).await?;
    Ok(!code.is_empty())
}

/// Implementation address stored in the EIP-1967 slot of `proxy`, if any.
pub async fn get_proxy_implementation(
    provider: &NormalProvider,
    proxy: Address,
) -> Result<Option<Address>, BlockchainError> {
    let slot = U256::from_be_bytes(EIP1967_IMPLEMENTATION_SLOT.0);
    let value = provider.get_storage_at(proxy, slot).await?;
    let implementation = Address::from_word(B256::from(value));
    if implementation == Address::ZERO {
        return Ok(None);
    }
    Ok(Some(implementation))
}

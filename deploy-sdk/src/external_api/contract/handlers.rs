use alloy::{
    network::TransactionBuilder as _,
    primitives::{Address, Bytes},
    providers::Provider as _,
    rpc::types::{TransactionReceipt, TransactionRequest},
};

use super::{error::BlockchainError, utils::NormalProvider};

/// Sends `tx_request` and waits for its receipt. A reverted transaction is an error.
pub async fn send_transaction_and_wait(
    provider: &NormalProvider,
    tx_request: TransactionRequest,
    tx_name: &str,
) -> Result<TransactionReceipt, BlockchainError> {
    let from = tx_request.from.unwrap_or_default();
    let pending_tx = match provider.send_transaction(tx_request).await {
        Ok(pending_tx) => pending_tx,
        Err(e) => {
            let error_message = e.to_string();
            log::error!("{}", error_message);
            // -32000 alone is the generic server error of geth style nodes
            if error_message.contains("insufficient funds") {
                return Err(BlockchainError::InsufficientFunds(format!(
                    "Insufficient funds for {} from {}",
                    tx_name, from
                )));
            }
            return Err(BlockchainError::RPCError(format!(
                "Error sending {} transaction: {}",
                tx_name, error_message
            )));
        }
    };
    let tx_hash = *pending_tx.tx_hash();
    log::debug!("{} tx hash: {:?}", tx_name, tx_hash);
    let receipt = pending_tx.get_receipt().await?;
    if !receipt.status() {
        return Err(BlockchainError::TransactionFailed(format!(
            "{} failed with tx hash: {:?}",
            tx_name, tx_hash
        )));
    }
    Ok(receipt)
}

/// Sends a contract creation transaction and returns the created address with its receipt.
pub async fn deploy_bytecode(
    provider: &NormalProvider,
    from: Address,
    creation_code: Bytes,
    tx_name: &str,
) -> Result<(Address, TransactionReceipt), BlockchainError> {
    let tx_request = TransactionRequest::default()
        .with_from(from)
        .with_deploy_code(creation_code);
    let receipt = send_transaction_and_wait(provider, tx_request, tx_name).await?;
    let address = receipt
        .contract_address
        .ok_or(BlockchainError::ContractNotDeployed(receipt.transaction_hash))?;
    Ok((address, receipt))
}

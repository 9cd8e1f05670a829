use alloy::{
    primitives::{Address, B256},
    providers::PendingTransactionError,
    transports::{RpcError, TransportErrorKind},
};

#[derive(Debug, thiserror::Error)]
pub enum BlockchainError {
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("RPC error: {0}")]
    RPCError(String),

    #[error("Pending transaction error: {0}")]
    PendingTransactionError(String),

    #[error("Contract not deployed by tx {0:?}")]
    ContractNotDeployed(B256),

    #[error("No signer configured for {0}")]
    UnknownSigner(Address),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Function {0} taking {1} argument(s) not found in ABI")]
    FunctionNotFound(String, usize),

    #[error("Encode call data error: {0}")]
    EncodeCallDataError(String),

    #[error("Decode return data error: {0}")]
    DecodeReturnDataError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

impl From<RpcError<TransportErrorKind>> for BlockchainError {
    fn from(e: RpcError<TransportErrorKind>) -> Self {
        BlockchainError::RPCError(e.to_string())
    }
}

impl From<PendingTransactionError> for BlockchainError {
    fn from(e: PendingTransactionError) -> Self {
        BlockchainError::PendingTransactionError(e.to_string())
    }
}

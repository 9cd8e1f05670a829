use crate::external_api::contract::error::BlockchainError;

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("Blockchain error: {0}")]
    BlockchainError(#[from] BlockchainError),

    #[error("Artifact for {0} not found under {1}")]
    ArtifactNotFound(String, String),

    #[error("Invalid artifact search pattern: {0}")]
    ArtifactPattern(#[from] glob::PatternError),

    #[error("Invalid artifact for {0}: {1}")]
    InvalidArtifact(String, String),

    #[error("No deployment recorded for {0}")]
    DeploymentNotFound(String),

    #[error("Deployment record store error: {0}")]
    StoreError(String),

    #[error("Deployments in {dir} were made on chain {recorded}, but connected to chain {actual}")]
    ChainIdMismatch {
        dir: String,
        recorded: u64,
        actual: u64,
    },

    #[error("Proxy configuration of {0} does not match its recorded deployment")]
    ProxyConfigMismatch(String),
}

impl From<std::io::Error> for DeploymentError {
    fn from(e: std::io::Error) -> Self {
        DeploymentError::StoreError(e.to_string())
    }
}

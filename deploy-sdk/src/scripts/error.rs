use crate::{accounts::AccountError, deployments::error::DeploymentError};

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("Deployment error: {0}")]
    DeploymentError(#[from] DeploymentError),

    #[error("Account error: {0}")]
    AccountError(#[from] AccountError),

    #[error("Unexpected value returned by {method}: {value}")]
    UnexpectedReturnType { method: String, value: String },
}

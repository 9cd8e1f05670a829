use alloy::primitives::{Address, Bytes, B256};

use super::{error::DeploymentError, record::DeploymentRecord};

/// Fingerprint of what a deploy call asks for.
#[derive(Debug, Clone, PartialEq)]
pub struct DeployRequest {
    pub bytecode_hash: B256,
    pub args_data: Bytes,
    pub proxied: bool,
    pub init_calldata: Option<Bytes>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployAction {
    Deploy,
    Reuse(Address),
    Upgrade { proxy: Address },
}

/// Decides what to do with a deploy request given the recorded deployment, if any.
/// `code_present` tells whether the recorded address still has code on chain.
pub fn plan_deploy(
    name: &str,
    existing: Option<&DeploymentRecord>,
    request: &DeployRequest,
    code_present: bool,
) -> Result<DeployAction, DeploymentError> {
    let Some(record) = existing else {
        return Ok(DeployAction::Deploy);
    };
    if !code_present {
        log::warn!(
            "no code at recorded address {} of {}, deploying again",
            record.address,
            name
        );
        return Ok(DeployAction::Deploy);
    }
    if record.is_proxy() != request.proxied {
        return Err(DeploymentError::ProxyConfigMismatch(name.to_string()));
    }
    let unchanged =
        record.bytecode_hash == request.bytecode_hash && record.args_data == request.args_data;
    if unchanged {
        let recorded_init = record.execute.as_ref().map(|e| &e.calldata);
        if request.proxied && recorded_init != request.init_calldata.as_ref() {
            // the initializer already ran through the proxy constructor
            log::warn!(
                "{} was initialized with different arguments, the new initializer is not executed",
                name
            );
        }
        return Ok(DeployAction::Reuse(record.address));
    }
    if request.proxied {
        return Ok(DeployAction::Upgrade {
            proxy: record.address,
        });
    }
    Ok(DeployAction::Deploy)
}

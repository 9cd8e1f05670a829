use std::{fs, path::PathBuf};

use alloy::{
    dyn_abi::DynSolValue,
    json_abi::JsonAbi,
    primitives::{keccak256, Bytes, B256},
};
use serde::Deserialize;

use crate::external_api::contract::abi::encode_constructor_args;

use super::error::DeploymentError;

/// Compiled contract as written by hardhat (`artifacts/contracts/<File>.sol/<Name>.json`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

impl Artifact {
    pub fn from_json(name: &str, json: &str) -> Result<Self, DeploymentError> {
        let artifact: Artifact = serde_json::from_str(json)
            .map_err(|e| DeploymentError::InvalidArtifact(name.to_string(), e.to_string()))?;
        if artifact.bytecode.is_empty() {
            return Err(DeploymentError::InvalidArtifact(
                name.to_string(),
                "empty bytecode, abstract contract or interface".to_string(),
            ));
        }
        Ok(artifact)
    }

    pub fn bytecode_hash(&self) -> B256 {
        keccak256(&self.bytecode)
    }

    pub fn constructor_args(&self, args: &[DynSolValue]) -> Result<Bytes, DeploymentError> {
        Ok(encode_constructor_args(&self.abi, args)?)
    }

    /// Creation bytecode followed by the encoded constructor arguments.
    pub fn creation_code(&self, args_data: &Bytes) -> Bytes {
        [&self.bytecode[..], &args_data[..]].concat().into()
    }
}

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn load(&self, name: &str) -> Result<Artifact, DeploymentError> {
        let path = self.find(name)?.ok_or_else(|| {
            DeploymentError::ArtifactNotFound(name.to_string(), self.root.display().to_string())
        })?;
        log::debug!("loading artifact {} from {}", name, path.display());
        let json = fs::read_to_string(&path)?;
        Artifact::from_json(name, &json)
    }

    // hardhat nests artifacts one directory per source file
    fn find(&self, name: &str) -> Result<Option<PathBuf>, DeploymentError> {
        let pattern = format!(
            "{}/**/{}.json",
            glob::Pattern::escape(&self.root.to_string_lossy()),
            glob::Pattern::escape(name)
        );
        Ok(glob::glob(&pattern)?
            .filter_map(Result::ok)
            .find(|path| path.is_file()))
    }
}

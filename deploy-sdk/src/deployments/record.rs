use std::{fs, path::PathBuf};

use alloy::{
    json_abi::JsonAbi,
    primitives::{Address, Bytes, B256},
};
use serde::{Deserialize, Serialize};

use super::error::DeploymentError;

const CHAIN_ID_FILE: &str = ".chainId";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub address: Address,
    pub abi: JsonAbi,
    pub transaction_hash: Option<B256>,
    pub block_number: Option<u64>,
    pub deployer: Address,
    /// Encoded constructor arguments.
    pub args_data: Bytes,
    pub bytecode_hash: B256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execute: Option<RecordedExecute>,
}

impl DeploymentRecord {
    pub fn is_proxy(&self) -> bool {
        self.implementation.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedExecute {
    pub method_name: String,
    pub calldata: Bytes,
}

/// One JSON file per deployment name under `<root>/<network>/`.
#[derive(Debug, Clone)]
pub struct DeploymentStore {
    root: PathBuf,
    network: String,
}

impl DeploymentStore {
    pub fn new(root: impl Into<PathBuf>, network: &str) -> Self {
        Self {
            root: root.into(),
            network: network.to_string(),
        }
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn network_dir(&self) -> PathBuf {
        self.root.join(&self.network)
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.network_dir().join(format!("{name}.json"))
    }

    pub fn load(&self, name: &str) -> Result<Option<DeploymentRecord>, DeploymentError> {
        let path = self.record_path(name);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path)?;
        let record = serde_json::from_str(&json).map_err(|e| {
            DeploymentError::StoreError(format!("failed to parse {}: {}", path.display(), e))
        })?;
        Ok(Some(record))
    }

    pub fn get(&self, name: &str) -> Result<DeploymentRecord, DeploymentError> {
        self.load(name)?
            .ok_or_else(|| DeploymentError::DeploymentNotFound(name.to_string()))
    }

    pub fn save(&self, name: &str, record: &DeploymentRecord) -> Result<(), DeploymentError> {
        fs::create_dir_all(self.network_dir())?;
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| DeploymentError::StoreError(e.to_string()))?;
        fs::write(self.record_path(name), json)?;
        Ok(())
    }

    /// All records of the network, sorted by name.
    pub fn list(&self) -> Result<Vec<(String, DeploymentRecord)>, DeploymentError> {
        let dir = self.network_dir();
        if !dir.is_dir() {
            return Ok(vec![]);
        }
        let mut names = fs::read_dir(&dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().to_string()))
            .collect::<Vec<_>>();
        names.sort();
        let mut records = Vec::with_capacity(names.len());
        for name in names {
            let record = self.get(&name)?;
            records.push((name, record));
        }
        Ok(records)
    }

    /// Forgets every deployment of the network.
    pub fn reset(&self) -> Result<(), DeploymentError> {
        let dir = self.network_dir();
        if dir.exists() {
            log::warn!("removing deployment records in {}", dir.display());
            fs::remove_dir_all(dir)?;
        }
        Ok(())
    }

    /// Pins the network directory to `chain_id` on first use and refuses to mix records
    /// of different chains afterwards.
    pub fn check_chain_id(&self, chain_id: u64) -> Result<(), DeploymentError> {
        let path = self.network_dir().join(CHAIN_ID_FILE);
        if path.exists() {
            let recorded = fs::read_to_string(&path)?;
            let recorded: u64 = recorded.trim().parse().map_err(|_| {
                DeploymentError::StoreError(format!("malformed {}", path.display()))
            })?;
            if recorded != chain_id {
                return Err(DeploymentError::ChainIdMismatch {
                    dir: self.network_dir().display().to_string(),
                    recorded,
                    actual: chain_id,
                });
            }
            return Ok(());
        }
        fs::create_dir_all(self.network_dir())?;
        fs::write(path, chain_id.to_string())?;
        Ok(())
    }
}

use std::collections::HashMap;

use alloy::primitives::{Address, B256};

use crate::external_api::contract::{error::BlockchainError, utils::get_address_from_private_key};

pub const DEPLOYER: &str = "deployer";

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Unknown named account: {0}")]
    UnknownNamedAccount(String),
}

/// Symbolic account names, such as `deployer`, resolved to addresses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedAccounts(HashMap<String, Address>);

impl NamedAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, name: &str, address: Address) -> Self {
        self.insert(name, address);
        self
    }

    pub fn insert(&mut self, name: &str, address: Address) {
        self.0.insert(name.to_string(), address);
    }

    pub fn from_private_keys(keys: &[(&str, B256)]) -> Result<Self, BlockchainError> {
        let mut accounts = Self::new();
        for (name, key) in keys {
            accounts.insert(name, get_address_from_private_key(*key)?);
        }
        Ok(accounts)
    }

    pub fn get(&self, name: &str) -> Result<Address, AccountError> {
        self.0
            .get(name)
            .copied()
            .ok_or_else(|| AccountError::UnknownNamedAccount(name.to_string()))
    }

    pub fn deployer(&self) -> Result<Address, AccountError> {
        self.get(DEPLOYER)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names = self.0.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort();
        names
    }
}

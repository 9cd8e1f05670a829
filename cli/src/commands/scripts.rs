use deploy_sdk::scripts::{master_of_coin::MasterOfCoinConfig, registry::default_registry};

use crate::error::CliError;

pub fn scripts() -> Result<(), CliError> {
    let registry = default_registry(MasterOfCoinConfig::from_env()?);
    println!("Deploy scripts:");
    for script in registry.scripts() {
        println!("\t {} [{}]", script.name(), script.tags().join(", "));
    }
    Ok(())
}

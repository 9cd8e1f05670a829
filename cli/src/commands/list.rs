use common::network::Network;
use deploy_sdk::deployments::record::DeploymentStore;

use crate::{env_var::StoreEnvVar, error::CliError};

pub fn list(network: Network) -> Result<(), CliError> {
    let env = envy::from_env::<StoreEnvVar>()?;
    let store = DeploymentStore::new(&env.deployments_dir, network.name());
    let records = store.list()?;
    if records.is_empty() {
        println!("No deployments on {}", network);
        return Ok(());
    }
    println!("Deployments on {}:", network);
    for (name, record) in records.iter() {
        println!("\t {}: {}", name, record.address);
        if let Some(implementation) = record.implementation {
            println!("\t\t Implementation: {}", implementation);
        }
        if let Some(tx_hash) = record.transaction_hash {
            println!("\t\t Tx: {}", tx_hash);
        }
    }
    Ok(())
}

use clap::{Parser, Subcommand};
use common::network::Network;

#[derive(Parser)]
#[clap(name = "deploy")]
#[clap(about = "Deploys and configures the MasterOfCoin contracts")]
pub struct Args {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Runs the deploy scripts against a network
    Run {
        #[clap(long)]
        network: Network,
        /// Only run scripts carrying one of these tags
        #[clap(long, value_delimiter = ',')]
        tags: Vec<String>,
        /// Forget previous deployments of the network before running
        #[clap(long, default_value_t = false)]
        reset: bool,
    },
    /// Prints the recorded deployments of a network
    List {
        #[clap(long)]
        network: Network,
    },
    /// Prints the registered deploy scripts
    Scripts,
}

use std::io::Write as _;

use clap::Parser;
use colored::Colorize as _;
use deploy_cli::{
    args::{Args, Commands},
    commands::{list::list, run::run, scripts::scripts},
    env_var::LogEnvVar,
    error::CliError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logger();
    let args = Args::parse();

    if let Err(e) = main_process(args.command).await {
        println!("{}", e.to_string().red());
        std::process::exit(1);
    }
    Ok(())
}

fn init_logger() {
    let is_local = envy::from_env::<LogEnvVar>()
        .map(|env| env.env.is_local())
        .unwrap_or(true);
    let mut builder = env_logger::builder();
    builder.filter_level(log::LevelFilter::Info).parse_default_env();
    if !is_local {
        builder.format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()));
    }
    builder.init();
}

async fn main_process(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Run {
            network,
            tags,
            reset,
        } => run(network, &tags, reset).await,
        Commands::List { network } => list(network),
        Commands::Scripts => scripts(),
    }
}

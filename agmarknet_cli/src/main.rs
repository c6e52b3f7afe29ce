mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use agmarknet_lib::PipelineConfig;
use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "agmarknet")]
#[command(about = "Fetch mandi commodity prices from AgMarknet")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// TOML config file; AGMARKNET_* environment variables are used when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch min/max/modal prices for a commodity in a market
    Prices(commands::prices::PricesArgs),
    /// List the state, commodity and market names the portal codes are known for
    Codes(commands::codes::CodesArgs),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("agmarknet=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);

    let config = match &cli.config {
        Some(path) => PipelineConfig::from_toml_file(path)?,
        None => PipelineConfig::from_env(),
    };

    match &cli.command {
        Commands::Prices(args) => commands::prices::run(args, &config, &format).await,
        Commands::Codes(args) => commands::codes::run(args, &format),
    }
}

use std::process::ExitCode;

use agmarknet_lib::{synth, Pipeline, PipelineConfig, RequestParams};
use anyhow::Result;
use clap::Args;

use crate::output::{print_error_payload, print_prices, ErrorPayload, OutputFormat};

#[derive(Args)]
pub struct PricesArgs {
    /// State name (e.g. Maharashtra)
    #[arg(long)]
    pub state: Option<String>,

    /// Commodity name (e.g. Tomato)
    #[arg(long)]
    pub commodity: Option<String>,

    /// Market name (e.g. Pune)
    #[arg(long)]
    pub market: Option<String>,

    /// Days of estimated history when live prices are unavailable (0-366)
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=i64::from(synth::MAX_DAYS)))]
    pub days: Option<u32>,
}

pub async fn run(
    args: &PricesArgs,
    config: &PipelineConfig,
    format: &OutputFormat,
) -> Result<ExitCode> {
    let (Some(state), Some(commodity), Some(market)) = (
        present(&args.state),
        present(&args.commodity),
        present(&args.market),
    ) else {
        print_error_payload(&ErrorPayload::new("Missing query parameters"))?;
        return Ok(ExitCode::FAILURE);
    };

    let params = match RequestParams::validated(state, commodity, market) {
        Ok(p) => p,
        Err(e) => {
            print_error_payload(&ErrorPayload::new(e.to_string()))?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let config = match args.days {
        Some(days) => config.clone().with_fallback_days(days),
        None => config.clone(),
    };

    match Pipeline::new(&config).fetch_prices(&params).await {
        Ok(records) => {
            print_prices(&records, format)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            print_error_payload(&ErrorPayload::new(e.to_string()))?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

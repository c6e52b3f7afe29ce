use std::process::ExitCode;

use agmarknet_lib::codes;
use anyhow::{bail, Result};
use clap::{Args, ValueEnum};

use crate::output::{print_codes, OutputFormat};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CodeTable {
    States,
    Commodities,
    Markets,
}

#[derive(Args)]
pub struct CodesArgs {
    /// Which table to list
    #[arg(value_enum)]
    pub table: CodeTable,

    /// State name whose markets to list (required for `markets`)
    #[arg(long)]
    pub state: Option<String>,
}

pub fn run(args: &CodesArgs, format: &OutputFormat) -> Result<ExitCode> {
    let entries = match args.table {
        CodeTable::States => codes::list_states(),
        CodeTable::Commodities => codes::list_commodities(),
        CodeTable::Markets => {
            let Some(state) = args.state.as_deref() else {
                bail!("--state is required when listing markets");
            };
            let state_code = codes::resolve_state(state)?;
            codes::list_markets(state_code)
        }
    };
    print_codes(&entries, format)?;
    Ok(ExitCode::SUCCESS)
}

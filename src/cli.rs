use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

pub mod commands;

use commands::{ProjectOptions, project, serve};

#[derive(Parser)]
#[command(name = "cashflow")]
#[command(about = "Cash-flow projection engine with liquidity alerts and an HTTP API")]
#[command(version)]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, global = true, env = "CASHFLOW_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long)]
        bind_address: Option<String>,
    },
    /// Print a projection and its alerts
    ///
    /// Values not given on the command line come from the configuration.
    Project {
        /// Ledger file (.json, .yaml or .yml); the demo schedule is used otherwise
        #[arg(short, long)]
        ledger: Option<PathBuf>,

        /// Number of projected days, including the reference date
        #[arg(long)]
        horizon_days: Option<i64>,

        /// Balance before the first projected day
        #[arg(long)]
        starting_balance: Option<Decimal>,

        /// Warning threshold
        #[arg(long)]
        min_operative_balance: Option<Decimal>,

        /// Day 0 of the projection (YYYY-MM-DD), defaults to today
        #[arg(long)]
        reference_date: Option<NaiveDate>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve { bind_address } => {
                serve(self.config.as_deref(), bind_address).await?;
            }
            Commands::Project {
                ledger,
                horizon_days,
                starting_balance,
                min_operative_balance,
                reference_date,
                json,
            } => {
                let options = ProjectOptions {
                    ledger,
                    horizon_days,
                    starting_balance,
                    min_operative_balance,
                    reference_date,
                    json,
                };
                project(self.config.as_deref(), options)?;
            }
        }
        Ok(())
    }
}

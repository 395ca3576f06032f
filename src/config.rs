use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Utc};
use compute::insight::{InsightProvider, RuleBasedInsights, UnavailableInsights};
use config::{Config, Environment, File};
use moka::future::Cache;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::ledger_source::build_ledger;
use crate::schemas::AppState;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_HORIZON_DAYS: i64 = 60;
/// Longest projection computed by the API and the CLI.
pub const MAX_HORIZON_DAYS: i64 = 3660;
pub const DEFAULT_STARTING_BALANCE: i64 = 25_000_000;
pub const DEFAULT_MIN_OPERATIVE_BALANCE: i64 = compute::risk::DEFAULT_MIN_OPERATIVE_BALANCE;
pub const DEFAULT_INSIGHT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Runtime configuration of the service and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub bind_address: String,
    pub horizon_days: i64,
    pub starting_balance: Decimal,
    pub min_operative_balance: Decimal,
    /// JSON or YAML ledger file. The demo schedule is used when absent.
    #[serde(default)]
    pub ledger_path: Option<PathBuf>,
    /// Pins "today". The current UTC date is used when absent.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
    pub insights_enabled: bool,
    pub insight_timeout_secs: u64,
    pub cache_ttl_secs: u64,
    pub summary_window_days: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            horizon_days: DEFAULT_HORIZON_DAYS,
            starting_balance: Decimal::new(DEFAULT_STARTING_BALANCE, 0),
            min_operative_balance: Decimal::new(DEFAULT_MIN_OPERATIVE_BALANCE, 0),
            ledger_path: None,
            reference_date: None,
            insights_enabled: true,
            insight_timeout_secs: DEFAULT_INSIGHT_TIMEOUT_SECS,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            summary_window_days: compute::summary::DEFAULT_SUMMARY_WINDOW_DAYS,
        }
    }
}

impl Settings {
    /// Loads settings from defaults, an optional file and `CASHFLOW_*` variables.
    ///
    /// Without an explicit path an optional `cashflow.{toml,yaml,json}` in the
    /// working directory is picked up.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("bind_address", defaults.bind_address)?
            .set_default("horizon_days", defaults.horizon_days)?
            .set_default("starting_balance", defaults.starting_balance.to_string())?
            .set_default(
                "min_operative_balance",
                defaults.min_operative_balance.to_string(),
            )?
            .set_default("insights_enabled", defaults.insights_enabled)?
            .set_default("insight_timeout_secs", defaults.insight_timeout_secs as i64)?
            .set_default("cache_ttl_secs", defaults.cache_ttl_secs as i64)?
            .set_default("summary_window_days", defaults.summary_window_days as i64)?;

        builder = match path {
            Some(path) => {
                debug!("Loading configuration file {}", path.display());
                builder.add_source(File::from(path).required(true))
            }
            None => builder.add_source(File::with_name("cashflow").required(false)),
        };

        let settings: Settings = builder
            .add_source(Environment::with_prefix("CASHFLOW").try_parsing(true))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.horizon_days <= 0 {
            bail!("horizon_days must be positive, got {}", self.horizon_days);
        }
        if self.horizon_days > MAX_HORIZON_DAYS {
            bail!(
                "horizon_days must not exceed {}, got {}",
                MAX_HORIZON_DAYS,
                self.horizon_days
            );
        }
        if self.min_operative_balance < Decimal::ZERO {
            bail!(
                "min_operative_balance must not be negative, got {}",
                self.min_operative_balance
            );
        }
        if self.summary_window_days == 0 {
            bail!("summary_window_days must be positive");
        }
        Ok(())
    }

    /// The configured reference date or the current UTC date.
    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Utc::now().date_naive())
    }

    pub fn insight_timeout(&self) -> Duration {
        Duration::from_secs(self.insight_timeout_secs)
    }
}

/// Initialize application state from validated settings
pub fn initialize_app_state(settings: Settings) -> Result<AppState> {
    let ledger = build_ledger(&settings, settings.today())?;
    info!("Ledger loaded with {} transactions", ledger.len());

    // Initialize cache
    let cache = Cache::builder()
        .max_capacity(1000)
        .time_to_live(Duration::from_secs(settings.cache_ttl_secs))
        .build();

    let insights: Arc<dyn InsightProvider> = if settings.insights_enabled {
        Arc::new(RuleBasedInsights::new(settings.summary_window_days))
    } else {
        Arc::new(UnavailableInsights)
    };
    debug!("Insight provider: {}", insights.name());

    Ok(AppState {
        settings: Arc::new(settings),
        ledger: Arc::new(ledger),
        cache,
        insights,
    })
}

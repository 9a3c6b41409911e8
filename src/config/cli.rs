use super::toml_config::TomlConfig;
use super::Settings;
use crate::core::ProductId;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "cart-sync")]
#[command(about = "Manage a stock-checked shopping cart stored on local disk")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Base URL of the stock/product service")]
    pub api_url: Option<String>,

    #[arg(long, help = "Directory holding the cart snapshot")]
    pub storage_dir: Option<String>,

    #[arg(long, help = "Request timeout in seconds")]
    pub timeout_secs: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the stored cart
    Show,
    /// Add one unit of a product
    Add { id: ProductId },
    /// Remove a product line
    Remove { id: ProductId },
    /// Step a product's amount towards AMOUNT
    Update {
        id: ProductId,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

impl CliConfig {
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading configuration from {}", path.display());
            settings = settings.merge_toml(TomlConfig::from_file(path)?);
        }

        if let Some(api_url) = &self.api_url {
            settings.api_base_url = api_url.clone();
        }
        if let Some(storage_dir) = &self.storage_dir {
            settings.storage_dir = storage_dir.clone();
        }
        if let Some(timeout) = self.timeout_secs {
            settings.timeout_seconds = timeout;
        }

        Ok(settings)
    }
}

pub mod env;
pub mod toml_config;

pub use toml_config::SiteConfig;

use crate::utils::error::Result;
use std::path::Path;

/// 載入配置：有檔案就讀檔，否則用網站預設值，最後套用環境變數
pub fn load_site_config(path: Option<&Path>) -> Result<SiteConfig> {
    let mut config = match path {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            SiteConfig::from_file(path)?
        }
        None => SiteConfig::default(),
    };
    config.apply_env_overrides()?;
    Ok(config)
}

#[cfg(feature = "cli")]
pub mod cli {
    use clap::{Args, Parser, Subcommand};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "uce-calc")]
    #[command(about = "Price estimates and contact links for the UCE (P130-2025) service")]
    pub struct CliConfig {
        /// Path to TOML configuration file
        #[arg(short, long, global = true)]
        pub config: Option<PathBuf>,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Print results as JSON")]
        pub json: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Estimate the annual fee for one building
        Estimate(EstimateArgs),
        /// Read form-encoded lines from stdin and print debounced estimates
        Watch,
        /// Estimate every row of a CSV file (columns tip,sup,instr)
        Batch(BatchArgs),
        /// Build the mailto link for a contact request (exit code 2 when a required field is missing)
        Contact(ContactArgs),
        /// Print the phone and WhatsApp links
        Links,
    }

    #[derive(Debug, Clone, Args)]
    pub struct EstimateArgs {
        /// Building type: bloc, casa, hala, birouri (unknown values fall back to bloc)
        #[arg(long)]
        pub tip: Option<String>,

        /// Area in square meters
        #[arg(long)]
        pub sup: Option<String>,

        /// Include instrumentation
        #[arg(long)]
        pub instr: bool,
    }

    #[derive(Debug, Clone, Args)]
    pub struct BatchArgs {
        #[arg(short, long)]
        pub input: String,

        /// Output CSV; stdout when omitted
        #[arg(short, long)]
        pub output: Option<String>,
    }

    #[derive(Debug, Clone, Args)]
    pub struct ContactArgs {
        #[arg(long, default_value = "")]
        pub nume: String,

        #[arg(long, default_value = "")]
        pub email: String,

        #[arg(long, default_value = "")]
        pub telefon: String,

        #[arg(long)]
        pub subiect: Option<String>,

        #[arg(long, default_value = "")]
        pub mesaj: String,
    }
}

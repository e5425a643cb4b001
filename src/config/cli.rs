use crate::config::toml_config::TomlConfig;
use crate::config::{AppConfig, Overrides};
use crate::core::report::OutputFormat;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "salary-stats")]
#[command(about = "Average programming salaries on HeadHunter and SuperJob")]
pub struct CliConfig {
    /// Town to search vacancies in [default: Москва]
    #[arg(short, long)]
    pub town: Option<String>,

    /// Statistics window in days [default: 30]
    #[arg(short, long)]
    pub period: Option<u32>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report format [default: table]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            town: self.town.clone(),
            period: self.period,
            format: self.format,
        }
    }

    /// Resolves the run configuration from the optional file, the flags and
    /// the process environment.
    pub fn load(&self) -> Result<AppConfig> {
        let file = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };
        AppConfig::resolve(file, self.overrides(), |name| std::env::var(name).ok())
    }
}

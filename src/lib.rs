pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::{build_sources, HeadHunter, SuperJob};
pub use crate::config::AppConfig;
pub use crate::core::{engine::{RunOutcome, StatisticsEngine}, report::OutputFormat};
pub use crate::utils::error::{Result, StatsError};

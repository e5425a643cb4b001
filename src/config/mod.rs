#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::{headhunter, superjob};
use crate::core::engine::SearchSettings;
use crate::core::report::OutputFormat;
use crate::domain::model::Currency;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_required_field,
    validate_url, Validate,
};
use toml_config::{is_placeholder, SourceConfig, TomlConfig};

pub const DEFAULT_TOWN: &str = "Москва";
pub const DEFAULT_PERIOD: u32 = 30;
pub const DEFAULT_PER_PAGE: u32 = 100;
pub const MAX_PER_PAGE: u32 = 100;
pub const API_KEY_ENV: &str = "API_SUPERJOB_SECRETKEY";

pub const DEFAULT_LANGUAGES: [&str; 10] = [
    "Python",
    "JavaScript",
    "Java",
    "Ruby",
    "PHP",
    "C++",
    "C#",
    "Swift",
    "Go",
    "Objective-C",
];

/// Values given on the command line; they win over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub town: Option<String>,
    pub period: Option<u32>,
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone)]
pub struct HeadHunterSettings {
    pub endpoint: String,
}

#[derive(Debug, Clone)]
pub struct SuperJobSettings {
    pub endpoint: String,
    pub api_key: String,
}

/// Everything a run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub search: SearchSettings,
    pub format: OutputFormat,
    pub headhunter: Option<HeadHunterSettings>,
    pub superjob: Option<SuperJobSettings>,
}

impl AppConfig {
    /// Merges defaults, the file, the command line and the environment, in
    /// increasing priority (the environment only supplies the SuperJob key).
    ///
    /// Fails with `MissingConfigError` when SuperJob is enabled without a key.
    pub fn resolve(
        file: TomlConfig,
        overrides: Overrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let languages = file
            .languages
            .unwrap_or_else(|| DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect());

        let search = SearchSettings {
            town: overrides
                .town
                .or(file.town)
                .unwrap_or_else(|| DEFAULT_TOWN.to_string()),
            period: overrides.period.or(file.period).unwrap_or(DEFAULT_PERIOD),
            per_page: file.per_page.unwrap_or(DEFAULT_PER_PAGE),
            languages,
            target_currency: file
                .target_currency
                .as_deref()
                .map(Currency::from_code)
                .unwrap_or(Currency::Rub),
        };

        let hh_config = file.headhunter.unwrap_or_default();
        let headhunter = hh_config.is_enabled().then(|| HeadHunterSettings {
            endpoint: endpoint_or(&hh_config, headhunter::DEFAULT_ENDPOINT),
        });

        let sj_config = file.superjob.unwrap_or_default();
        let superjob = if sj_config.is_enabled() {
            let api_key = sj_config
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty() && !is_placeholder(key))
                .or_else(|| env(API_KEY_ENV).filter(|key| !key.trim().is_empty()));
            let api_key = validate_required_field(API_KEY_ENV, &api_key)?.clone();
            Some(SuperJobSettings {
                endpoint: endpoint_or(&sj_config, superjob::DEFAULT_ENDPOINT),
                api_key,
            })
        } else {
            tracing::info!("SuperJob disabled in configuration");
            None
        };

        let config = Self {
            search,
            format: overrides.format.or(file.format).unwrap_or_default(),
            headhunter,
            superjob,
        };
        config.validate()?;
        Ok(config)
    }
}

fn endpoint_or(source: &SourceConfig, default: &str) -> String {
    source
        .endpoint
        .clone()
        .filter(|e| !is_placeholder(e))
        .unwrap_or_else(|| default.to_string())
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("town", &self.search.town)?;
        validate_positive_number("period", self.search.period, 1)?;
        validate_range("per_page", self.search.per_page, 1, MAX_PER_PAGE)?;
        validate_positive_number("languages", self.search.languages.len() as u32, 1)?;
        for language in &self.search.languages {
            validate_non_empty_string("languages", language)?;
        }
        if let Some(hh) = &self.headhunter {
            validate_url("headhunter.endpoint", &hh.endpoint)?;
        }
        if let Some(sj) = &self.superjob {
            validate_url("superjob.endpoint", &sj.endpoint)?;
        }
        Ok(())
    }
}

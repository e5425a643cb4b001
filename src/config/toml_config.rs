use crate::core::report::OutputFormat;
use crate::utils::error::{Result, StatsError};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional configuration file. Every key may be left out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub town: Option<String>,
    pub period: Option<u32>,
    pub languages: Option<Vec<String>>,
    pub per_page: Option<u32>,
    pub target_currency: Option<String>,
    pub format: Option<OutputFormat>,
    pub headhunter: Option<SourceConfig>,
    pub superjob: Option<SourceConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub enabled: Option<bool>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
}

impl SourceConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

impl TomlConfig {
    /// Loads the file, substituting `${VAR}` from the process environment.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(StatsError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_toml_str_with(content, |name| std::env::var(name).ok())
    }

    pub fn from_toml_str_with(
        content: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let processed = substitute_env_vars(content, lookup)?;
        Ok(toml::from_str(&processed)?)
    }
}

/// Replaces `${VAR}` placeholders. Unknown variables are left as they are.
fn substitute_env_vars(content: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| StatsError::ConfigError {
        message: format!("placeholder pattern: {}", e),
    })?;

    let result = re.replace_all(content, |caps: &Captures| {
        let var_name = &caps[1];
        lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
    });

    Ok(result.into_owned())
}

/// True for a value that still is an unresolved `${VAR}` placeholder.
pub fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    value.starts_with("${") && value.ends_with('}')
}

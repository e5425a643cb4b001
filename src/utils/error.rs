use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}: {body}")]
    HttpError { status: u16, url: String, body: String },

    #[error("{source_name} has no town matching '{town}'")]
    TownNotFound { source_name: String, town: String },

    #[error("Unexpected response from {source_name}: {message}")]
    UnexpectedResponse { source_name: String, message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a run whose worst failure has this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl StatsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StatsError::ConfigError { .. }
            | StatsError::MissingConfigError { .. }
            | StatsError::InvalidConfigValueError { .. }
            | StatsError::TomlError(_) => ErrorCategory::Configuration,
            StatsError::ApiError(_) | StatsError::HttpError { .. } => ErrorCategory::Network,
            StatsError::TownNotFound { .. }
            | StatsError::UnexpectedResponse { .. }
            | StatsError::CsvError(_)
            | StatsError::SerializationError(_) => ErrorCategory::Data,
            StatsError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StatsError::ApiError(_) => ErrorSeverity::Medium,
            // 5xx and 429 are worth another try later, anything else is on our side
            StatsError::HttpError { status, .. } if *status >= 500 || *status == 429 => {
                ErrorSeverity::Medium
            }
            StatsError::HttpError { .. }
            | StatsError::TownNotFound { .. }
            | StatsError::UnexpectedResponse { .. }
            | StatsError::CsvError(_)
            | StatsError::SerializationError(_)
            | StatsError::ConfigError { .. }
            | StatsError::MissingConfigError { .. }
            | StatsError::InvalidConfigValueError { .. }
            | StatsError::TomlError(_) => ErrorSeverity::High,
            StatsError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            StatsError::MissingConfigError { field } => {
                format!("Set {} in the environment, a .env file or the config file", field)
            }
            StatsError::InvalidConfigValueError { field, .. } => {
                format!("Check the value given for {}", field)
            }
            StatsError::ConfigError { .. } | StatsError::TomlError(_) => {
                "Check the configuration file syntax and keys".to_string()
            }
            StatsError::TownNotFound { .. } => {
                "Check the spelling of the town or try its name in Russian".to_string()
            }
            StatsError::HttpError { status: 401 | 403, .. } => {
                "Check that the API key is valid".to_string()
            }
            StatsError::HttpError { .. } | StatsError::ApiError(_) => {
                "Check the network connection and try again later".to_string()
            }
            StatsError::UnexpectedResponse { .. }
            | StatsError::SerializationError(_)
            | StatsError::CsvError(_) => {
                "The job board API may have changed its response format".to_string()
            }
            StatsError::IoError(_) => "Check that stdout is writable".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            StatsError::MissingConfigError { field } => {
                format!("Configuration value {} is not set", field)
            }
            StatsError::TownNotFound { source_name, town } => {
                format!("{} does not know the town '{}'", source_name, town)
            }
            StatsError::HttpError { status, url, .. } => {
                format!("Request to {} failed with status {}", url, status)
            }
            StatsError::ApiError(e) => format!("Could not reach the job board: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;

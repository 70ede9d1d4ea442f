use thiserror::Error;

#[derive(Error, Debug)]
pub enum MoopError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Failure reported by a view model; keeps the classification of the
    /// error that caused it.
    #[error("Request failed: {message}")]
    RequestFailed {
        message: String,
        category: ErrorCategory,
        severity: ErrorSeverity,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Not found: {what}")]
    NotFound { what: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Data,
    Configuration,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// CLI 結束代碼：0 警告、1 處理錯誤、2 可重試、3 系統錯誤
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl MoopError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MoopError::RequestFailed { category, .. } => *category,
            MoopError::ApiError(_) | MoopError::HttpStatus { .. } => ErrorCategory::Network,
            MoopError::IoError(_) => ErrorCategory::Storage,
            MoopError::SerializationError(_) | MoopError::NotFound { .. } => ErrorCategory::Data,
            MoopError::ConfigError { .. }
            | MoopError::ConfigValidationError { .. }
            | MoopError::InvalidConfigValueError { .. }
            | MoopError::MissingConfigError { .. } => ErrorCategory::Configuration,
            MoopError::ValidationError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            MoopError::RequestFailed { severity, .. } => *severity,
            // 網路問題通常可以重試
            MoopError::ApiError(_) | MoopError::HttpStatus { .. } => ErrorSeverity::Medium,
            MoopError::SerializationError(_)
            | MoopError::ValidationError { .. }
            | MoopError::NotFound { .. } => ErrorSeverity::High,
            MoopError::IoError(_)
            | MoopError::ConfigError { .. }
            | MoopError::ConfigValidationError { .. }
            | MoopError::InvalidConfigValueError { .. }
            | MoopError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the network connection and the API endpoint, then retry",
            ErrorCategory::Storage => "Check that the data directory exists and is writable",
            ErrorCategory::Data => "The server response was not in the expected format",
            ErrorCategory::Configuration => "Review the configuration file and command line arguments",
            ErrorCategory::Validation => "Adjust the input and try again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MoopError::ApiError(e) if e.is_timeout() => "The movie server did not respond in time".to_string(),
            MoopError::ApiError(_) => "Could not reach the movie server".to_string(),
            MoopError::HttpStatus { status, .. } => {
                format!("The movie server answered with an error (HTTP {})", status)
            }
            MoopError::NotFound { what } => format!("{} was not found", what),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MoopError>;

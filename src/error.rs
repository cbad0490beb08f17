use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input in {path}: {message}")]
    InvalidInput { path: String, message: String },

    #[error("Nickname table error in {path}: {message}")]
    NicknameTable { path: String, message: String },

    #[error("Log setup error: {0}")]
    LogSetup(String),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create an error for an input file that could not be interpreted as records
    pub fn invalid_input(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an error for a nickname table that is unreadable or inconsistent
    pub fn nickname_table(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NicknameTable {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if the error came from user-supplied files rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AppError::Json(_)
                | AppError::TomlDeserialize(_)
                | AppError::InvalidInput { .. }
                | AppError::NicknameTable { .. }
        )
    }
}

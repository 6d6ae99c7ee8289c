use thiserror::Error;

#[derive(Error, Debug)]
pub enum Nl2SqlError {
    #[error("Settings error: {0}")]
    Settings(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Execution error: {message}")]
    Execution { message: String, sql: String },
    #[error("Invalid pattern in recognizer '{recognizer}': {message}")]
    Pattern { recognizer: String, message: String },
    #[error("Lock poisoned: {0}")]
    Lock(String),
}

impl Nl2SqlError {
    /// The underlying message without the category prefix.
    pub fn detail(&self) -> String {
        match self {
            Self::Settings(m) | Self::Configuration(m) | Self::Persistence(m) | Self::Lock(m) => m.clone(),
            Self::Execution { message, .. } => message.clone(),
            Self::Pattern { message, .. } => message.clone(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Nl2SqlError>;

// Helper conversions
impl From<rusqlite::Error> for Nl2SqlError {
    fn from(e: rusqlite::Error) -> Self { Self::Persistence(e.to_string()) }
}

impl From<config::ConfigError> for Nl2SqlError {
    fn from(e: config::ConfigError) -> Self { Self::Settings(e.to_string()) }
}

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingVar(&'static str),
    #[error("PORT is not a valid port number: {0}")]
    InvalidPort(String),
    #[error("Could not convert FRONTEND_URL to header: {0}")]
    InvalidFrontendUrl(String),
    #[error("Unknown CONTACTS_STORE, expected \"mongodb\" or \"memory\": {0}")]
    UnknownStore(String),
}

use crate::errors::config_error::ConfigError;
use axum::http::HeaderValue;
use std::env;

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Mongo {
        url: String,
        database: Option<String>,
    },
    Memory,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub frontend_url: Option<HeaderValue>,
    pub store: StoreKind,
}

impl Config {
    /// Reads the config from the process environment, `.env` should already be loaded
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(port) => port.parse().or(Err(ConfigError::InvalidPort(port)))?,
            None => DEFAULT_PORT,
        };

        let frontend_url = lookup("FRONTEND_URL")
            .map(|url| {
                url.parse::<HeaderValue>()
                    .or(Err(ConfigError::InvalidFrontendUrl(url)))
            })
            .transpose()?;

        let store = match lookup("CONTACTS_STORE").as_deref() {
            Some("memory") => StoreKind::Memory,
            None | Some("mongodb") => StoreKind::Mongo {
                url: lookup("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                database: lookup("DATABASE_NAME"),
            },
            Some(other) => return Err(ConfigError::UnknownStore(other.to_string())),
        };

        Ok(Config {
            port,
            frontend_url,
            store,
        })
    }
}

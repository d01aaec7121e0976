use std::env;

use dotenv::dotenv;

pub const URL_VAR: &str = "SUPABASE_URL";
pub const API_KEY_VAR: &str = "SUPABASE_ANON_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Location and credentials of the hosted database.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub url: String,
    pub api_key: String,
}

impl Config {
    /// Reads the configuration from the environment, after loading `.env`
    /// if one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let require = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        Ok(Self {
            url: require(URL_VAR)?,
            api_key: require(API_KEY_VAR)?,
        })
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

/// Secrets supplied at process start. The salt feeds the identity hasher;
/// the encryption key belongs to the downstream packaging stage and is only
/// checked for presence here.
#[derive(Debug, Clone)]
pub struct Settings {
    pub hash_salt: String,
    pub encryption_key: String,
}

impl Settings {
    /// Load `.env` if present, then the environment. A missing salt fails
    /// here, before any document is touched — never mid-pipeline.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Ok(Self {
            hash_salt: require("DISTIL_HASH_SALT")?,
            encryption_key: require("DISTIL_ENCRYPTION_KEY")?,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::Missing(name))
}

//! Service configuration read from the environment (`.env` honoured)

use validator::Validate;
use crate::{BackofficeError, Result};

#[derive(Clone, Debug, PartialEq, Validate)]
pub struct AppConfig {
    #[validate(range(min = 1))]
    pub port: u16,
    /// Configured base fee for return requests; used when a request omits one.
    #[validate(range(min = 0.0))]
    pub return_base_fee: f64,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self { Self { port: 8083, return_base_fee: 0.0, log_filter: "info".to_string() } }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let port = match lookup("PORT") {
            Some(v) => v.trim().parse().map_err(|_| BackofficeError::Config(format!("PORT is not a port number: {v}")))?,
            None => defaults.port,
        };
        let return_base_fee = match lookup("RETURN_BASE_FEE") {
            Some(v) => v.trim().parse::<f64>().ok().filter(|f| f.is_finite())
                .ok_or_else(|| BackofficeError::Config(format!("RETURN_BASE_FEE is not a number: {v}")))?,
            None => defaults.return_base_fee,
        };
        let log_filter = lookup("RUST_LOG").unwrap_or(defaults.log_filter);
        let config = Self { port, return_base_fee, log_filter };
        config.validate().map_err(|e| BackofficeError::Config(e.to_string()))?;
        Ok(config)
    }
}

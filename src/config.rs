//! Explicit runtime configuration for the boundary layer.
//!
//! Everything the binary needs from the environment is enumerated here and
//! resolved once at startup; nothing else in the crate reads process state.

use std::env;
use std::path::PathBuf;

const ENV_FEED_URL: &str = "ORDER_FEED_URL";
const ENV_DATA_DIR: &str = "ORDER_DATA_DIR";
const ENV_GEOCODER_URL: &str = "GEOCODER_API_URL";
const ENV_SMTP_URL: &str = "SMTP_URL";
const ENV_MAIL_FROM: &str = "MAIL_FROM";

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";

#[derive(Debug, Clone)]
pub struct Config {
    /// Where the order feed is downloaded from.
    pub feed_url: String,
    /// Directory holding both the downloaded feed and the report artifact.
    pub data_dir: PathBuf,
    /// Search endpoint used for geolocation enrichment.
    pub geocoder_url: String,
    /// SMTP settings; report email is only available when present.
    pub mail: Option<MailConfig>,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_url: String,
    pub from: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("environment variables {0} and {1} must be set together")]
    IncompletePair(&'static str, &'static str),
}

impl Config {
    /// Builds the configuration from the recognized environment variables:
    /// `ORDER_FEED_URL` (required), `ORDER_DATA_DIR` (required),
    /// `GEOCODER_API_URL` (optional, OpenStreetMap default), and the
    /// `SMTP_URL`/`MAIL_FROM` pair (optional, enables report email).
    pub fn from_env() -> Result<Self, ConfigError> {
        let feed_url = require(ENV_FEED_URL)?;
        let data_dir = PathBuf::from(require(ENV_DATA_DIR)?);
        let geocoder_url =
            env::var(ENV_GEOCODER_URL).unwrap_or_else(|_| DEFAULT_GEOCODER_URL.to_string());

        let mail = match (env::var(ENV_SMTP_URL).ok(), env::var(ENV_MAIL_FROM).ok()) {
            (Some(smtp_url), Some(from)) => Some(MailConfig { smtp_url, from }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompletePair(ENV_SMTP_URL, ENV_MAIL_FROM)),
        };

        Ok(Self {
            feed_url,
            data_dir,
            geocoder_url,
            mail,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

//! Client settings.
//!
//! Values are layered: built-in defaults, then an optional file, then
//! `PRISMIC_*` environment variables (for example `PRISMIC_ACCESS_TOKEN`).

use ::config::{Config, ConfigBuilder, Environment, File, FileFormat};
use ::config::builder::DefaultState;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::api::Api;
use crate::error::Result;
use crate::transport::HttpTransport;

pub const ENV_PREFIX: &str = "PRISMIC";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Root of the API, e.g. `https://lesbonneschoses.prismic.io/api`.
    pub endpoint: String,
    #[serde(default)]
    pub access_token: Option<String>,
    pub timeout_secs: u64,
    pub log_filter: String,
}

impl Settings {
    /// Loads settings from `path` (any format `config` recognizes by extension)
    /// and the environment. Without a path only defaults and environment apply.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = Self::defaults()?;
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path));
        }
        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Settings given inline as TOML; the environment is not consulted.
    pub fn from_toml(source: &str) -> Result<Self> {
        let settings = Self::defaults()?
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let builder = Config::builder()
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
            .set_default("log_filter", DEFAULT_LOG_FILTER)?;
        Ok(builder)
    }

    /// Installs a fmt subscriber filtered by `log_filter`. Does nothing when a
    /// global subscriber is already set.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_new(&self.log_filter)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }

    /// Fetches the API snapshot over HTTP using these settings.
    pub fn connect(&self) -> Result<Api> {
        let transport = HttpTransport::from_settings(self)?;
        Api::start(&transport, &self.endpoint, self.access_token.as_deref())
    }
}

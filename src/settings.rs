//! Settings for the sentence service.
//!
//! Read with the `config` crate from an optional TOML file, then overridden
//! by `DSL_SENTENCE__*` environment variables, e.g. `DSL_SENTENCE__LISTEN`.
//!
//! ```toml
//! listen = "127.0.0.1:8181"
//! log_filter = "dsl_sentence=debug"
//!
//! [[enumerations]]
//! fact_type = "Person"
//! field = "gender"
//! values = ["M=Male", "F=Female"]
//! ```

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::completion::{Enumeration, StaticEnumResolver};
use crate::error::Result;

pub const DEFAULT_PATH: &str = "dsl_sentence.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_listen")]
    pub listen: String,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub enumerations: Vec<Enumeration>,
}

fn default_listen() -> String { "127.0.0.1:8181".to_string() }
fn default_log_filter() -> String { "info".to_string() }

impl Default for Settings {
    fn default() -> Self {
        Self { listen: default_listen(), log_filter: default_log_filter(), enumerations: Vec::new() }
    }
}

impl Settings {
    /// Loads settings from `path` (which may be missing) and the environment.
    pub fn load(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::new(path, FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("DSL_SENTENCE").separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
    /// Loads settings from a TOML string, ignoring the environment.
    pub fn from_toml(toml: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
    pub fn resolver(&self) -> StaticEnumResolver {
        StaticEnumResolver::from(self.enumerations.clone())
    }
}

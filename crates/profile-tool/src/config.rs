//! Configuration loading and validation for the profile tool.
//!
//! All values are read from environment variables at startup. The process
//! exits with a clear error message if any required variable is missing or
//! invalid.

use anyhow::{Context, Result};
use field_codec::{FieldSpecs, ProfileKey};
use serde::Deserialize;

/// Validated profile tool configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Standard base64 of the 32-byte profile key. **Required.**
    pub profile_key: String,

    /// JSON file replacing the reference field tables.
    #[serde(default)]
    pub field_specs_path: Option<String>,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.profile_key.trim().is_empty() {
            anyhow::bail!("PROFILE_KEY is required and must not be empty");
        }
        self.profile_key()?;
        if let Some(path) = &self.field_specs_path {
            if path.trim().is_empty() {
                anyhow::bail!("FIELD_SPECS_PATH must not be empty when set");
            }
        }
        Ok(())
    }

    /// Decode the configured profile key.
    ///
    /// # Errors
    ///
    /// Returns an error if `PROFILE_KEY` is not base64 of exactly 32 bytes.
    pub fn profile_key(&self) -> Result<ProfileKey> {
        ProfileKey::from_base64(&self.profile_key).context("PROFILE_KEY is invalid")
    }

    /// Load the field tables: the override file if configured, otherwise the
    /// reference tables.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or any table in it breaks
    /// its shape invariants.
    pub fn field_specs(&self) -> Result<FieldSpecs> {
        let specs = match &self.field_specs_path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read field tables from {path}"))?;
                FieldSpecs::from_json(&text)
                    .with_context(|| format!("invalid field tables in {path}"))?
            }
            None => FieldSpecs::reference(),
        };
        specs.validate().context("field tables failed validation")?;
        Ok(specs)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("profile_key", &"[REDACTED]")
            .field("field_specs_path", &self.field_specs_path)
            .field("log_level", &self.log_level)
            .finish()
    }
}

//! Handler configuration.
//!
//! Loaded once at cold start and passed into the handler; nothing reads the
//! environment after that.
//!
//! ## Environment Variables
//!
//! | Variable | Required | Meaning |
//! |---|---|---|
//! | `OUTPUT_BUCKET` | yes | Bucket every thumbnail is written to |
//! | `RUST_LOG` | no | Log filter (default `info`), read by the binary's tracing setup |
//!
//! A missing or blank `OUTPUT_BUCKET` is fatal: the binary exits before the
//! Lambda runtime loop starts, so the misconfiguration shows up as an init
//! failure rather than as every invocation failing.

use thiserror::Error;

/// Environment variable naming the destination bucket.
pub const OUTPUT_BUCKET_VAR: &str = "OUTPUT_BUCKET";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVariable(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    /// Destination bucket for resized images.
    pub output_bucket: String,
}

impl HandlerConfig {
    pub fn new(output_bucket: impl Into<String>) -> Self {
        Self {
            output_bucket: output_bucket.into(),
        }
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to resolve variables. Values are trimmed; a blank
    /// value counts as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let output_bucket = lookup(OUTPUT_BUCKET_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingVariable(OUTPUT_BUCKET_VAR))?;

        Ok(Self { output_bucket })
    }
}

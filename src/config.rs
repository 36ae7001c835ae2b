//! Runtime settings
//!
//! Defaults layered under `HASHCONV_*` environment variables. No config
//! file is read.

pub use config::{Config, Environment};
use serde::Deserialize;

use crate::convert::RangePolicy;
use crate::error::ConvertError;

pub const ENV_PREFIX: &str = "HASHCONV";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub log_level: String,
    pub log_format: String,
    /// Default policy for out-of-range integers ("reject" or "mask")
    pub out_of_range: RangePolicy,
}

fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConvertError> {
    Ok(Config::builder()
        .set_default("log_level", "warn")?
        .set_default("log_format", "pretty")?
        .set_default("out_of_range", "reject")?)
}

/// Load settings from defaults and the process environment
pub fn load_settings() -> Result<Settings, ConvertError> {
    let settings = builder()?
        .add_source(Environment::with_prefix(ENV_PREFIX))
        .build()?
        .try_deserialize()?;
    Ok(settings)
}

/// Load settings from defaults and an explicit variable map
pub fn load_settings_from<I, K, V>(vars: I) -> Result<Settings, ConvertError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let source: config::Map<String, String> = vars
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();

    let settings = builder()?
        .add_source(Environment::with_prefix(ENV_PREFIX).source(Some(source)))
        .build()?
        .try_deserialize()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = load_settings_from(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.log_format, "pretty");
        assert_eq!(settings.out_of_range, RangePolicy::Reject);
    }

    #[test]
    fn test_env_overrides() {
        let settings = load_settings_from(vec![
            ("HASHCONV_OUT_OF_RANGE", "mask"),
            ("HASHCONV_LOG_FORMAT", "json"),
            ("UNRELATED_VAR", "ignored"),
        ])
        .unwrap();
        assert_eq!(settings.out_of_range, RangePolicy::Mask);
        assert_eq!(settings.log_format, "json");
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_invalid_policy() {
        let err = load_settings_from(vec![("HASHCONV_OUT_OF_RANGE", "clamp")]).unwrap_err();
        assert!(matches!(err, ConvertError::Config(_)));
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_message().starts_with("Error: configuration error"));
    }
}

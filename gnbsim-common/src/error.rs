//! Error types for gnbsim-common

use thiserror::Error;

/// Errors raised while loading or interpreting gNB profiles and identifier values.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration is structurally valid YAML but semantically wrong.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A textual identifier (PLMN, hex string) could not be parsed.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

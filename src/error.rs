use thiserror::Error;

#[derive(Error, Debug)]
pub enum TexError {
    #[error("Invalid config value for `{field}`: {value} ({reason})")]
    InvalidConfig {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },

    #[error("Invalid torque curve: {0}")]
    InvalidCurve(&'static str),

    #[error("tick_rate must be within 15..=120, got {0}")]
    InvalidTickRate(u8),

    #[error("Failed to decode sync snapshot: {0}")]
    Snapshot(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("Failed to read config file {path:?}: {source}")]
    ConfigFile {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[cfg(feature = "serde")]
    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl TexError {
    pub(crate) const fn config(field: &'static str, value: f32, reason: &'static str) -> Self {
        Self::InvalidConfig {
            field,
            value,
            reason,
        }
    }
}

//! YAML loading for the vehicle tunables.
//!
//! Missing fields fall back to the defaults, and every loaded config is validated
//! before it is returned.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{ChairConfig, TexConfig, TexError};

/// Parses a [`TexConfig`] from YAML text
pub fn tex_config_from_yaml(yaml: &str) -> Result<TexConfig, TexError> {
    let config: TexConfig = serde_yaml::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}

/// Parses a [`ChairConfig`] from YAML text
pub fn chair_config_from_yaml(yaml: &str) -> Result<ChairConfig, TexError> {
    let config: ChairConfig = serde_yaml::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}

pub fn load_tex_config_yaml<P: AsRef<Path>>(path: P) -> Result<TexConfig, TexError> {
    let config: TexConfig = read_yaml(path.as_ref())?;
    config.validate()?;
    Ok(config)
}

pub fn load_chair_config_yaml<P: AsRef<Path>>(path: P) -> Result<ChairConfig, TexError> {
    let config: ChairConfig = read_yaml(path.as_ref())?;
    config.validate()?;
    Ok(config)
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, TexError> {
    let contents = std::fs::read_to_string(path).map_err(|source| TexError::ConfigFile {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(serde_yaml::from_str(&contents)?)
}

//! Parameter files. YAML, with JSON accepted as a subset; omitted fields keep their
//! default value.

use std::path::Path;

use crate::error::ConfigError;
use crate::params::Parameters;

impl Parameters {
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

pub fn load_parameters(path: impl AsRef<Path>) -> Result<Parameters, ConfigError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loading parameters");
    Parameters::from_yaml_str(&raw)
}

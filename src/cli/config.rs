use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{error::SnipolError, policy::SnippetsPolicy};

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ConfigFile {
    /// Gateways to render include files for
    #[serde(default)]
    pub gateways: Vec<GatewayConfig>,
    /// SnippetsPolicy resources, in the order they should be rendered
    #[serde(default)]
    pub policies: Vec<SnippetsPolicy>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    #[serde(default = "crate::policy::model::default_namespace")]
    pub namespace: String,
    pub name: String,
    /// Listen keys of the gateway's server blocks, e.g. "80" or "0.0.0.0:8443"
    #[serde(default)]
    pub listeners: Vec<String>,
}

impl ConfigFile {
    /// Load configuration file
    pub fn load(path: &Path) -> Result<Self, SnipolError> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| SnipolError::ConfigParse {
            path: PathBuf::from(path),
            source,
        })
    }
}

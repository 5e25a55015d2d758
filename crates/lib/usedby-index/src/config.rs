use crate::error::{IndexError, IndexResult};
use serde::Deserialize;
use std::path::Path;
use tracing::error;

/// Settings for the `usedBy` page block
///
/// Every key is optional in the TOML form; missing keys take the defaults
/// below.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Name of the block appended to the page
    pub block_name: String,
    /// Content type tag of the block, for the host renderer
    pub block_kind: String,
    pub heading: String,
    /// Path from a type page to the documentation root
    pub link_prefix: String,
    pub link_extension: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            block_name: "usedBy".to_string(),
            block_kind: "html".to_string(),
            heading: "Used By:".to_string(),
            link_prefix: "..".to_string(),
            link_extension: "html".to_string(),
        }
    }
}

impl RenderConfig {
    pub fn from_toml_str(contents: &str) -> IndexResult<Self> {
        toml::from_str(contents).map_err(|error| {
            error!(%error, "Failed to parse the render configuration");
            IndexError::Config(error)
        })
    }

    #[tracing::instrument]
    pub fn load(path: &Path) -> IndexResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|error| {
            error!(?error, ?path, "Failed to read the render configuration");
            IndexError::Io(error)
        })?;

        Self::from_toml_str(&contents)
    }
}

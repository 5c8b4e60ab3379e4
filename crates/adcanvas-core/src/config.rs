use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, CanvasResult};

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "adcanvas.toml";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RenderConfig {
    /// The single font family used for caption and CTA text.
    /// When unset, the system font search list is tried.
    pub font_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Keep decoded template assets between render passes.
    pub cache: bool,
    /// User-Agent header sent with HTTP asset requests.
    pub user_agent: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            cache: true,
            user_agent: format!("adcanvas/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AdcanvasConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
}

impl AdcanvasConfig {
    pub fn load_from_file(path: &Path) -> CanvasResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> CanvasResult<Self> {
        toml::from_str(contents).map_err(|e| CanvasError::Config(e.to_string()))
    }
}

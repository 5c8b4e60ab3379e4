/// Core error types for the adcanvas engine.
use crate::color::ColorError;

/// A specialized Result type for adcanvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Boxed transport or decode error carried unchanged inside [`CanvasError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type encompassing all adcanvas subsystems.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error("failed to fetch asset '{url}': {source}")]
    AssetFetch {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to decode asset '{url}': {source}")]
    AssetDecode {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("font error: {0}")]
    Font(String),

    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    #[error("invalid color '{value}': {source}")]
    InvalidColor {
        value: String,
        #[source]
        source: ColorError,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CanvasError {
    /// Create an asset fetch error, keeping the transport error as the source.
    pub fn asset_fetch(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        CanvasError::AssetFetch {
            url: url.into(),
            source: source.into(),
        }
    }

    /// Create an asset decode error, keeping the decoder error as the source.
    pub fn asset_decode(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        CanvasError::AssetDecode {
            url: url.into(),
            source: source.into(),
        }
    }

    /// True for failures raised while resolving a template asset.
    pub fn is_asset_error(&self) -> bool {
        matches!(
            self,
            CanvasError::AssetFetch { .. } | CanvasError::AssetDecode { .. }
        )
    }
}

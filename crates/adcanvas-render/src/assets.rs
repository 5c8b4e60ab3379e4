//! Template artwork resolution.
//!
//! [`AssetSource`] moves bytes, [`AssetLoader`] turns one URL into one decoded
//! bitmap, and [`AssetCache`] shares decoded bitmaps between render passes
//! with at most one fetch in flight per URL.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::OnceCell;

use adcanvas_core::{AssetsConfig, BoxError, CanvasError, CanvasResult, FrameBuffer};

use crate::image_loader::decode_image;

/// Transport for raw asset bytes.
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Fetch the bytes behind `url`. Errors are reported unchanged by the loader.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, BoxError>;
}

/// HTTP(S) transport.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(user_agent: &str) -> CanvasResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| CanvasError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl AssetSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, BoxError> {
        let res = self.client.get(url).send().await?.error_for_status()?;
        Ok(res.bytes().await?.to_vec())
    }
}

/// Local files, addressed as `file://` URLs or plain paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl FileSource {
    fn path_for(url: &str) -> PathBuf {
        PathBuf::from(url.strip_prefix("file://").unwrap_or(url))
    }
}

#[async_trait]
impl AssetSource for FileSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, BoxError> {
        Ok(tokio::fs::read(Self::path_for(url)).await?)
    }
}

/// Dispatches HTTP(S) URLs to [`HttpSource`] and everything else to [`FileSource`].
#[derive(Debug, Clone)]
pub struct DefaultSource {
    http: HttpSource,
    file: FileSource,
}

impl DefaultSource {
    pub fn new(config: &AssetsConfig) -> CanvasResult<Self> {
        Ok(Self {
            http: HttpSource::new(&config.user_agent)?,
            file: FileSource,
        })
    }
}

#[async_trait]
impl AssetSource for DefaultSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, BoxError> {
        if is_http_url(url) {
            self.http.fetch(url).await
        } else {
            self.file.fetch(url).await
        }
    }
}

fn is_http_url(s: &str) -> bool {
    let s = s.trim();
    s.starts_with("http://") || s.starts_with("https://")
}

/// Resolves one URL to one decoded bitmap. No retry, timeout or caching.
#[derive(Clone)]
pub struct AssetLoader {
    source: Arc<dyn AssetSource>,
}

impl AssetLoader {
    pub fn new(source: Arc<dyn AssetSource>) -> Self {
        Self { source }
    }

    pub async fn load(&self, url: &str) -> CanvasResult<FrameBuffer> {
        let bytes = self
            .source
            .fetch(url)
            .await
            .map_err(|e| CanvasError::asset_fetch(url, e))?;
        let fb = decode_image(&bytes, url)?;
        tracing::debug!("loaded {} ({}x{})", url, fb.width, fb.height);
        Ok(fb)
    }
}

impl std::fmt::Debug for AssetLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetLoader").finish_non_exhaustive()
    }
}

type CacheSlot = Arc<OnceCell<Arc<FrameBuffer>>>;

/// URL-keyed cache of decoded assets shared across render passes.
///
/// Concurrent requests for one URL share a single fetch. A failed fetch leaves
/// the slot empty, so the next request tries again.
#[derive(Debug)]
pub struct AssetCache {
    loader: AssetLoader,
    entries: Option<DashMap<String, CacheSlot>>,
}

impl AssetCache {
    pub fn new(loader: AssetLoader) -> Self {
        Self {
            loader,
            entries: Some(DashMap::new()),
        }
    }

    /// Pass-through that loads on every request.
    pub fn uncached(loader: AssetLoader) -> Self {
        Self {
            loader,
            entries: None,
        }
    }

    /// Build the cache the config asks for.
    pub fn from_config(loader: AssetLoader, config: &AssetsConfig) -> Self {
        if config.cache {
            Self::new(loader)
        } else {
            Self::uncached(loader)
        }
    }

    pub async fn get(&self, url: &str) -> CanvasResult<Arc<FrameBuffer>> {
        let Some(entries) = &self.entries else {
            return self.loader.load(url).await.map(Arc::new);
        };

        // Clone the slot out so no map guard is held across the await.
        let slot: CacheSlot = entries.entry(url.to_string()).or_default().clone();
        let fb = slot
            .get_or_try_init(|| async {
                self.loader.load(url).await.map(Arc::new)
            })
            .await?;
        Ok(Arc::clone(fb))
    }

    /// Number of decoded assets held.
    pub fn len(&self) -> usize {
        self.entries
            .as_ref()
            .map_or(0, |e| e.iter().filter(|slot| slot.value().initialized()).count())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries
            .as_ref()
            .and_then(|e| e.get(url).map(|slot| slot.initialized()))
            .unwrap_or(false)
    }

    /// Drop the cached bitmap for `url`; the next request fetches again.
    pub fn invalidate(&self, url: &str) {
        if let Some(entries) = &self.entries {
            entries.remove(url);
        }
    }

    pub fn clear(&self) {
        if let Some(entries) = &self.entries {
            entries.clear();
        }
    }
}

//! Static asset fetching for the invoice logo

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

use crate::error::AssetFetchError;

/// Decoded RGB raster ready to embed in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB8 pixels, `width * height * 3` bytes
    pub rgb: Vec<u8>,
}

impl LogoImage {
    /// Decode PNG bytes, dropping any alpha channel
    pub fn from_png(bytes: &[u8]) -> Result<Self, AssetFetchError> {
        let decoded = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)?;
        let rgb = decoded.to_rgb8();
        Ok(Self {
            width: rgb.width(),
            height: rgb.height(),
            rgb: rgb.into_raw(),
        })
    }
}

/// Resolves a resource path such as `/logo.png` to its bytes
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, AssetFetchError>;
}

/// Fetches assets over HTTP relative to a base URL
pub struct HttpAssetFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAssetFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl AssetFetcher for HttpAssetFetcher {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, AssetFetchError> {
        let url = self.url_for(path);
        log::debug!("Fetching asset {}", url);

        let response = self.client.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AssetFetchError::NotFound(url));
        }
        let bytes = response.error_for_status()?.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Reads assets from a local directory
pub struct FileAssetFetcher {
    root: PathBuf,
}

impl FileAssetFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a resource path onto the asset directory, refusing `..` segments
    fn resolve(&self, path: &str) -> Result<PathBuf, AssetFetchError> {
        let relative = Path::new(path.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || relative.as_os_str().is_empty() {
            return Err(AssetFetchError::NotFound(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl AssetFetcher for FileAssetFetcher {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, AssetFetchError> {
        let full_path = self.resolve(path)?;
        match tokio::fs::read(&full_path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AssetFetchError::NotFound(full_path.display().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

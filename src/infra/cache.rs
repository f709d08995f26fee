//! Artifact cache
//!
//! Maps a download URL to a locally materialized archive. Entries are keyed
//! by the trailing path segment of the URL and live either on the persistent
//! cache volume (shared across builds) or in an ephemeral /tmp directory for
//! fetches that must not pollute the shared cache (forced override URLs).
//!
//! An entry, once present, is reused unconditionally: no checksum, no size
//! check, no TTL. An interrupted download can leave a partial file behind;
//! the target environment runs one build per container, so the cache volume
//! is never written concurrently.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

use crate::config::defaults;
use crate::error::DownloadError;
use crate::infra::download::DownloadManager;

/// Cache statistics
#[derive(Debug)]
pub struct CacheInfo {
    /// Cache directory path
    pub path: PathBuf,
    /// Total size in bytes
    pub size_bytes: u64,
    /// Number of cached archives
    pub item_count: usize,
}

/// URL-keyed archive cache backed by a directory
#[derive(Debug)]
pub struct ArtifactCache {
    /// Persistent cache directory
    cache_root: PathBuf,
    /// Ephemeral directory for uncached fetches
    ephemeral_root: PathBuf,
    /// HTTP fetcher
    downloads: DownloadManager,
    /// Number of fetches performed (cache misses)
    fetches: AtomicU64,
}

impl ArtifactCache {
    /// Create a cache rooted on the persistent cache volume
    pub fn new(cache_dir: &Path) -> Self {
        Self::with_roots(
            cache_dir.join(defaults::CACHE_SUBDIR),
            PathBuf::from(defaults::EPHEMERAL_DOWNLOAD_DIR),
        )
    }

    /// Create a cache with explicit roots
    pub fn with_roots(cache_root: PathBuf, ephemeral_root: PathBuf) -> Self {
        Self {
            cache_root,
            ephemeral_root,
            downloads: DownloadManager::new(),
            fetches: AtomicU64::new(0),
        }
    }

    /// Number of downloads performed so far (cache misses)
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Materialize the archive behind `url` as a local file
    ///
    /// With `use_cache` the persistent root is used and an existing file of
    /// the same name is reused without fetching; otherwise the ephemeral root
    /// is used. The file name is the trailing path segment of the URL.
    pub async fn materialize(&self, url: &str, use_cache: bool) -> Result<PathBuf, DownloadError> {
        let root = if use_cache {
            &self.cache_root
        } else {
            &self.ephemeral_root
        };

        std::fs::create_dir_all(root).map_err(|e| DownloadError::Io {
            path: root.clone(),
            error: e.to_string(),
        })?;

        let name = file_name_from_url(url)?;
        let local = root.join(name);

        if local.exists() {
            debug!(url, path = %local.display(), "archive already cached");
            return Ok(local);
        }

        info!(url, "fetching archive");
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.downloads.download(url, &local).await?;

        Ok(local)
    }

    /// Cache statistics for the persistent root
    pub fn info(&self) -> CacheInfo {
        let (size_bytes, item_count) = walkdir::WalkDir::new(&self.cache_root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| e.metadata().ok())
            .fold((0u64, 0usize), |(size, count), m| (size + m.len(), count + 1));

        CacheInfo {
            path: self.cache_root.clone(),
            size_bytes,
            item_count,
        }
    }
}

/// Derive the local file name from a URL: trailing path segment, query stripped
fn file_name_from_url(url: &str) -> Result<&str, DownloadError> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let path = path.split_once("://").map_or(path, |(_, rest)| rest);
    let name = path.rsplit('/').next().unwrap_or("");

    if name.is_empty() || !path.contains('/') {
        return Err(DownloadError::BadUrl {
            url: url.to_string(),
        });
    }

    Ok(name)
}

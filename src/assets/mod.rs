//! Asset Cache
//!
//! Vendor-hosted generation output (meshes, thumbnails) expires; this module
//! downloads each asset once per artifact and persists it under a stable
//! local path for durable serving. Serving-side helpers map file extensions
//! to content types and reject traversal attempts before any filesystem
//! access. Binary fetches are restricted to an allow-listed vendor host.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::defaults;
use crate::error::AiError;
use crate::transport::HttpTransport;

/// Filesystem-backed cache for vendor-hosted binary assets
#[derive(Debug, Clone)]
pub struct AssetCache {
    root: PathBuf,
    transport: HttpTransport,
}

impl AssetCache {
    /// Create a cache rooted at `root` with a default transport
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, AiError> {
        Ok(Self {
            root: root.into(),
            transport: HttpTransport::new()?,
        })
    }

    /// Create a cache with an explicit transport
    pub fn with_transport(root: impl Into<PathBuf>, transport: HttpTransport) -> Self {
        Self {
            root: root.into(),
            transport,
        }
    }

    /// Cache root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Public path a cached file is served under
    pub fn public_path(artifact_id: &str, filename: &str) -> String {
        format!(
            "{}/{artifact_id}/{filename}",
            defaults::assets::PUBLIC_PATH_PREFIX
        )
    }

    /// Download `remote_url` once and persist it under the artifact's cache
    /// directory, returning the stable public path.
    ///
    /// An already-cached file short-circuits without a network call. Two
    /// concurrent callers may both download; the bytes are identical either
    /// way, so last-write-wins is accepted over locking.
    pub async fn cache(
        &self,
        artifact_id: &str,
        remote_url: &str,
        filename: &str,
    ) -> Result<String, AiError> {
        validate_segment(artifact_id)?;
        validate_segment(filename)?;

        let dir = self.root.join(artifact_id);
        let path = dir.join(filename);
        let public_path = Self::public_path(artifact_id, filename);

        if tokio::fs::try_exists(&path).await? {
            debug!(%public_path, "asset already cached");
            return Ok(public_path);
        }

        tokio::fs::create_dir_all(&dir).await?;
        let bytes = self.transport.download(remote_url).await?;
        tokio::fs::write(&path, &bytes).await?;
        info!(%public_path, size = bytes.len(), "cached asset");

        Ok(public_path)
    }
}

/// Content type for a cached asset, derived purely from the file extension
pub fn content_type_for(filename: &str) -> &'static str {
    match Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .as_deref()
    {
        Some("glb") => "model/gltf-binary",
        Some("fbx") => "application/octet-stream",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// A path segment must be a bare file or directory name.
fn validate_segment(segment: &str) -> Result<(), AiError> {
    if segment.is_empty()
        || segment.contains("..")
        || segment.contains('/')
        || segment.contains('\\')
    {
        return Err(AiError::InvalidInput(format!(
            "Invalid path segment: {segment}"
        )));
    }
    Ok(())
}

/// Resolve requested path segments against the cache root.
///
/// Rejects traversal (`..`, embedded separators) before any filesystem
/// access and confirms the joined path stays under the root.
pub fn resolve_cached_path(root: &Path, segments: &[&str]) -> Result<PathBuf, AiError> {
    for segment in segments {
        validate_segment(segment)?;
    }

    let mut path = root.to_path_buf();
    for segment in segments {
        path.push(segment);
    }

    if !path.starts_with(root) {
        return Err(AiError::InvalidInput("Invalid path".to_string()));
    }
    Ok(path)
}

/// Reject asset URLs outside the allow-listed vendor host.
///
/// The host must equal the suffix or end with `.suffix`; a plain
/// `ends_with` would admit unrelated domains like `evilmeshy.ai`.
pub fn ensure_allowed_host(url: &str, allowed_suffix: &str) -> Result<(), AiError> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|_| AiError::InvalidInput(format!("Invalid URL: {url}")))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| AiError::InvalidInput(format!("Invalid URL: {url}")))?;

    if host == allowed_suffix || host.ends_with(&format!(".{allowed_suffix}")) {
        Ok(())
    } else {
        Err(AiError::api(403, format!("Forbidden asset host: {host}")))
    }
}

//! Static file serving from the document root
//!
//! Every request goes back to the filesystem; nothing is cached.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::config::StaticFilesConfig;
use crate::http::mime::content_type_for;
use crate::http::request::split_target;
use crate::http::response::Response;

#[derive(Debug, thiserror::Error)]
pub enum StaticError {
    #[error("resource not found")]
    NotFound,
    #[error("resolved path {} is outside the document root", .0.display())]
    OutsideRoot(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
}

/// A file loaded from the document root.
#[derive(Debug)]
pub struct StaticFile {
    pub content: Vec<u8>,
    pub content_type: &'static str,
}

/// Where a request target landed.
#[derive(Debug)]
pub struct Resolved {
    /// Canonical file to read, always inside the root.
    pub path: PathBuf,
    /// Root joined with the target as requested; names the content type.
    pub requested: PathBuf,
}

#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
    index_file: String,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>, index_file: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            index_file: index_file.into(),
        }
    }

    pub fn from_config(cfg: &StaticFilesConfig) -> Self {
        Self::new(cfg.root.clone(), cfg.index_file.clone())
    }

    /// Answers `target` with the file it names: 200 with the file bytes,
    /// 404 when missing or outside the root, 500 when reading fails.
    pub async fn serve(&self, target: &str) -> Response {
        match self.load(target).await {
            Ok(file) => Response::ok(file.content_type, file.content),
            Err(StaticError::NotFound) => Response::not_found(),
            Err(e @ StaticError::OutsideRoot(_)) => {
                tracing::warn!(path = %target, error = %e, "Refused path outside document root");
                Response::not_found()
            }
            Err(e @ StaticError::Read { .. }) => {
                tracing::error!(path = %target, error = %e, "Failed to read static file");
                Response::internal_error()
            }
        }
    }

    /// Resolves `target` under the root and reads the file.
    pub async fn load(&self, target: &str) -> Result<StaticFile, StaticError> {
        let resolved = self.resolve(target).await?;

        let content = fs::read(&resolved.path)
            .await
            .map_err(|source| StaticError::Read {
                path: resolved.path.clone(),
                source,
            })?;

        Ok(StaticFile {
            content,
            content_type: content_type_for(&resolved.requested.to_string_lossy()),
        })
    }

    /// Maps `target` to a regular file inside the root.
    ///
    /// Both the root and the candidate are canonicalized, so `..` segments
    /// and symlinks cannot lead outside the root. Directories resolve to
    /// their index file.
    pub async fn resolve(&self, target: &str) -> Result<Resolved, StaticError> {
        let root = match fs::canonicalize(&self.root).await {
            Ok(root) => root,
            Err(e) => {
                tracing::warn!(
                    root = %self.root.display(),
                    error = %e,
                    "Document root not found or inaccessible"
                );
                return Err(StaticError::NotFound);
            }
        };

        let relative = split_target(target).0.trim_start_matches('/');
        let mut requested = root.join(relative);
        let mut path = canonical_within(&root, &requested).await?;

        if fs::metadata(&path).await.is_ok_and(|m| m.is_dir()) {
            requested = requested.join(&self.index_file);
            path = canonical_within(&root, &requested).await?;
        }

        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(Resolved { path, requested }),
            _ => Err(StaticError::NotFound),
        }
    }
}

async fn canonical_within(root: &Path, candidate: &Path) -> Result<PathBuf, StaticError> {
    let canonical = fs::canonicalize(candidate)
        .await
        .map_err(|_| StaticError::NotFound)?;

    if !canonical.starts_with(root) {
        return Err(StaticError::OutsideRoot(canonical));
    }

    Ok(canonical)
}

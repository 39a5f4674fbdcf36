//! Module location and loading strategies.
//!
//! A single [`ModuleLoader`] contract is shared by two implementations that
//! reflect two mutually exclusive module systems:
//!
//! - [`AsynchronousLoader`] (dynamic strategy) reads without blocking the
//!   runtime and probes `.yaml` before `.json`.
//! - [`SynchronousLoader`] (static strategy) reads with blocking I/O during
//!   initialization and probes `.toml` before `.json`.
//!
//! Existence probing is synchronous in both strategies; only the read itself
//! differs. The caller selects a strategy once per process via
//! [`LoadingMode`](crate::LoadingMode) and stays oblivious to which is active
//! afterwards.

use crate::constants::extensions;
use crate::error::ShimError;
use crate::module::{parse_module, ResolvedModule};
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Strategy contract for locating and loading a user module.
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    /// Candidate file extensions, probed in priority order.
    fn extensions(&self) -> &'static [&'static str];

    /// Read the resolved module file.
    async fn read(&self, path: &Path) -> io::Result<String>;

    /// Locate the module under `root` and load it.
    async fn resolve(&self, root: &Path, module_to_import: &str) -> Result<ResolvedModule, ShimError> {
        let full_path = resolve_module_path(root, module_to_import, self.extensions())?;
        debug!(path = %full_path.display(), "loading module");
        let contents = self
            .read(&full_path)
            .await
            .map_err(|err| remap_read_error(err, module_to_import, &full_path))?;
        parse_module(&full_path, &contents)
    }
}

/// Dynamic loading strategy: non-blocking reads, module-native dialect first.
#[derive(Debug, Default, Clone, Copy)]
pub struct AsynchronousLoader;

#[async_trait]
impl ModuleLoader for AsynchronousLoader {
    fn extensions(&self) -> &'static [&'static str] {
        extensions::DYNAMIC
    }

    async fn read(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }
}

/// Static loading strategy: blocking reads that complete without suspension.
#[derive(Debug, Default, Clone, Copy)]
pub struct SynchronousLoader;

#[async_trait]
impl ModuleLoader for SynchronousLoader {
    fn extensions(&self) -> &'static [&'static str] {
        extensions::STATIC
    }

    async fn read(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Join `root` and the module path, then probe each candidate extension in
/// priority order, returning the first file that exists.
///
/// Fails with [`ShimError::ModuleResolution`] naming every attempted
/// extension when none match.
pub fn resolve_module_path(
    root: &Path,
    module_to_import: &str,
    candidate_extensions: &[&str],
) -> Result<PathBuf, ShimError> {
    let module_path = root.join(module_to_import);

    for extension in candidate_extensions {
        let candidate = PathBuf::from(format!("{}{extension}", module_path.display()));
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    Err(ShimError::ModuleResolution {
        path: module_path.display().to_string(),
        extensions: candidate_extensions
            .iter()
            .map(|extension| extension.to_string())
            .collect(),
    })
}

// A not-found failure after a successful probe gets re-signaled with the
// module name the caller asked for, which reads better than the resolved
// filesystem path. Everything else propagates with the path attached.
fn remap_read_error(err: io::Error, module_to_import: &str, path: &Path) -> ShimError {
    if err.kind() == io::ErrorKind::NotFound {
        ShimError::ModuleNotFound {
            module: module_to_import.to_string(),
        }
    } else {
        ShimError::ModuleLoad {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

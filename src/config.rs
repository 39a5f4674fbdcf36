//! Shim configuration and loading strategy selection.
//!
//! Configuration is built once at startup and threaded explicitly into every
//! component that needs it; nothing downstream of [`ShimConfig::resolve`]
//! reads the process environment.
//!
//! # Configuration
//!
//! Values can be provided in two ways:
//!
//! 1. Environment variables (`TRACE_AGENT_LAMBDA_HANDLER`,
//!    `TRACE_AGENT_LOADING_MODE`, `LAMBDA_TASK_ROOT`).
//! 2. Programmatically through the builder:
//!    ```no_run
//!    use lambda_handler_shim::{LoadingMode, ShimConfig};
//!
//!    let config = ShimConfig::builder()
//!        .handler("index.handler".to_string())
//!        .loading_mode(LoadingMode::Dynamic)
//!        .build();
//!    ```
//!
//! Environment variables take precedence over programmatic configuration.

use crate::constants::{defaults, env_vars};
use crate::instrument::Instrumentor;
use bon::Builder;
use std::path::PathBuf;
use std::sync::Arc;
use std::{env, fmt};
use tracing::warn;

/// Controls how user modules are located and loaded.
///
/// The strategy is selected once per process at cold start and cannot change
/// per invocation. The two strategies own mutually exclusive candidate
/// extension lists, so a resolution attempt never mixes them.
///
/// - `Dynamic`: asynchronous loading; probes the strategy-native dialect
///   (`.yaml`) before the generic interchange form (`.json`). The entry point
///   becomes a trampoline that awaits the one in-flight resolution.
/// - `Static`: synchronous loading; probes `.toml` before `.json` and
///   completes during initialization, so the entry point is ready from the
///   first invocation onward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadingMode {
    /// Asynchronous module loading; readiness is deferred to first await.
    Dynamic,
    /// Synchronous module loading; ready when initialization returns.
    Static,
}

impl fmt::Display for LoadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadingMode::Dynamic => write!(f, "dynamic"),
            LoadingMode::Static => write!(f, "static"),
        }
    }
}

impl LoadingMode {
    /// Resolve the loading mode from the environment or provided configuration.
    ///
    /// If the `TRACE_AGENT_LOADING_MODE` environment variable is set, it takes
    /// precedence. Otherwise the provided mode is used, defaulting to static
    /// loading when neither is set. Invalid values are logged and ignored.
    pub fn resolve(config_mode: Option<LoadingMode>) -> Self {
        match env::var(env_vars::LOADING_MODE)
            .map(|value| value.to_lowercase())
            .as_deref()
        {
            Ok("dynamic") => LoadingMode::Dynamic,
            Ok("static") => LoadingMode::Static,
            Ok(value) => {
                warn!(value, "invalid loading mode in env, using config or default");
                config_mode.unwrap_or(LoadingMode::Static)
            }
            Err(_) => config_mode.unwrap_or(LoadingMode::Static),
        }
    }
}

/// Configuration for shim initialization.
///
/// Use `ShimConfig::default()` for the standard Lambda setup, where every
/// value comes from the environment, or the builder for customization.
///
/// # Fields
///
/// * `handler` - Handler definition string (default: from the environment)
/// * `task_root` - Deployment root for module resolution (default:
///   `LAMBDA_TASK_ROOT`, else the current working directory)
/// * `loading_mode` - Module loading strategy (default: static)
/// * `instrumentor` - Tracer capability used to wrap the handler (default:
///   a span per invocation via [`SpanInstrumentor`](crate::SpanInstrumentor))
#[derive(Builder)]
pub struct ShimConfig {
    /// Raw handler definition string, `<modulePath>.<exportPath>`.
    pub handler: Option<String>,

    /// Root directory the module path is resolved against.
    pub task_root: Option<PathBuf>,

    /// Module loading strategy.
    pub loading_mode: Option<LoadingMode>,

    /// External tracer used to wrap the resolved handler.
    pub instrumentor: Option<Arc<dyn Instrumentor>>,
}

impl Default for ShimConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for ShimConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShimConfig")
            .field("handler", &self.handler)
            .field("task_root", &self.task_root)
            .field("loading_mode", &self.loading_mode)
            .field(
                "instrumentor",
                &self.instrumentor.as_ref().map(|_| "<dyn Instrumentor>"),
            )
            .finish()
    }
}

impl ShimConfig {
    /// Merge the environment into the programmatic configuration.
    ///
    /// Must run after environment normalization; the resolved values are
    /// frozen for the process lifetime.
    pub(crate) fn resolve(self) -> ResolvedConfig {
        let handler = env::var(env_vars::LAMBDA_HANDLER).ok().or(self.handler);
        let task_root = env::var(env_vars::LAMBDA_TASK_ROOT)
            .ok()
            .map(PathBuf::from)
            .or(self.task_root)
            .unwrap_or_else(|| PathBuf::from(defaults::TASK_ROOT));
        let mode = LoadingMode::resolve(self.loading_mode);

        ResolvedConfig {
            handler,
            task_root,
            mode,
            instrumentor: self.instrumentor,
        }
    }
}

/// Configuration after environment merging, as consumed by the init path.
pub(crate) struct ResolvedConfig {
    pub(crate) handler: Option<String>,
    pub(crate) task_root: PathBuf,
    pub(crate) mode: LoadingMode,
    pub(crate) instrumentor: Option<Arc<dyn Instrumentor>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn set_loading_mode(value: Option<&str>) {
        match value {
            Some(value) => env::set_var(env_vars::LOADING_MODE, value),
            None => env::remove_var(env_vars::LOADING_MODE),
        }
    }

    #[test]
    #[serial]
    fn loading_mode_from_env_only() {
        set_loading_mode(None);
        assert_eq!(LoadingMode::resolve(None), LoadingMode::Static);

        let cases = [
            ("dynamic", LoadingMode::Dynamic),
            ("static", LoadingMode::Static),
            ("DYNAMIC", LoadingMode::Dynamic),
            ("invalid", LoadingMode::Static),
        ];
        for (env_value, expected) in cases {
            set_loading_mode(Some(env_value));
            assert_eq!(
                LoadingMode::resolve(None),
                expected,
                "failed for env value: {env_value}"
            );
        }

        set_loading_mode(None);
    }

    #[test]
    #[serial]
    fn loading_mode_env_precedence_over_config() {
        let cases = [
            (Some("static"), Some(LoadingMode::Dynamic), LoadingMode::Static),
            (Some("dynamic"), Some(LoadingMode::Static), LoadingMode::Dynamic),
            (Some("invalid"), Some(LoadingMode::Dynamic), LoadingMode::Dynamic),
            (None, Some(LoadingMode::Dynamic), LoadingMode::Dynamic),
            (None, None, LoadingMode::Static),
        ];
        for (env_value, config_mode, expected) in cases {
            set_loading_mode(env_value);
            assert_eq!(
                LoadingMode::resolve(config_mode.clone()),
                expected,
                "failed for env: {env_value:?}, config: {config_mode:?}"
            );
        }

        set_loading_mode(None);
    }

    #[test]
    #[serial]
    fn handler_env_takes_precedence() {
        env::set_var(env_vars::LAMBDA_HANDLER, "env/index.handler");
        let resolved = ShimConfig::builder()
            .handler("code/index.handler".to_string())
            .build()
            .resolve();
        assert_eq!(resolved.handler.as_deref(), Some("env/index.handler"));
        env::remove_var(env_vars::LAMBDA_HANDLER);
    }

    #[test]
    #[serial]
    fn task_root_defaults_to_current_directory() {
        env::remove_var(env_vars::LAMBDA_TASK_ROOT);
        let resolved = ShimConfig::default().resolve();
        assert_eq!(resolved.task_root, PathBuf::from("."));
    }

    #[test]
    #[serial]
    fn task_root_from_env() {
        env::set_var(env_vars::LAMBDA_TASK_ROOT, "/var/task");
        let resolved = ShimConfig::default().resolve();
        assert_eq!(resolved.task_root, PathBuf::from("/var/task"));
        env::remove_var(env_vars::LAMBDA_TASK_ROOT);
    }
}

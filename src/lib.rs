//! Handler resolution and tracer wrapping for AWS Lambda functions.
//!
//! This crate bootstraps instrumentation for a serverless runtime that loads
//! a single user-defined entry point by name. At cold start it normalizes the
//! agent's environment, parses a handler definition string, locates the named
//! user module under the deployment root, validates the resolved export, and
//! hands the handler to the tracer's wrapping capability — exposing one
//! uniform, already-instrumented entry point to the host runtime.
//!
//! # Features
//!
//! - **Two loading strategies**: dynamic (asynchronous, deferred readiness)
//!   and static (synchronous, ready at initialization), selected once per
//!   process
//! - **Extension fallthrough**: each strategy probes its native manifest
//!   dialect before the generic JSON form
//! - **Dotted export paths**: `index.outer.inner` narrows through nested
//!   exports
//! - **Memoized deferred resolution**: invocations arriving before an
//!   asynchronous resolution settles all await the same outcome
//! - **Fail-fast validation**: missing or non-invocable exports are reported
//!   with the handler and module names at cold start
//!
//! # Architecture
//!
//! The crate is organized into several modules, each handling one step of
//! the cold-start sequence:
//!
//! - [`environment`]: process-wide agent defaults, applied before anything
//!   else runs
//! - [`config`]: startup configuration and loading strategy selection
//! - [`handler_path`]: parsing of the handler definition string
//! - [`loader`]: module location and the two loading strategies
//! - [`module`]: the loaded export tree and dotted-path narrowing
//! - [`registry`]: named handler functions available to manifests
//! - [`validate`]: existence and invocability checks
//! - [`instrument`]: the tracer seam and its default span-per-invocation
//!   implementation
//! - [`entrypoint`]: initialization and the exposed entry point
//!
//! # Quick Start
//!
//! ```no_run
//! use lambda_handler_shim::{init_wrapped_handler, HandlerRegistry, ShimConfig};
//! use lambda_runtime::{service_fn, Error, LambdaEvent};
//! use serde_json::{json, Value};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let mut registry = HandlerRegistry::new();
//!     registry.register("process_order", |event: LambdaEvent<Value>| async move {
//!         Ok(json!({ "statusCode": 200 }))
//!     });
//!
//!     let handler = init_wrapped_handler(ShimConfig::default(), registry).await?;
//!     lambda_runtime::run(service_fn(move |event| {
//!         let handler = handler.clone();
//!         async move { handler.invoke(event).await }
//!     }))
//!     .await
//! }
//! ```
//!
//! With a deployment root containing `index.toml`:
//!
//! ```toml
//! handler = "process_order"
//! ```
//!
//! and `TRACE_AGENT_LAMBDA_HANDLER=index.handler`, invocations reach
//! `process_order` wrapped in a span.
//!
//! # Configuration
//!
//! Configuration is handled through environment variables:
//!
//! - `TRACE_AGENT_LAMBDA_HANDLER`: handler definition string,
//!   `<modulePath>.<exportPath>` — required, no default
//! - `TRACE_AGENT_LOADING_MODE`: `"dynamic"` or `"static"` (default)
//! - `LAMBDA_TASK_ROOT`: deployment root for module resolution
//!   (default: current working directory)
//! - `TRACE_AGENT_APP_NAME`, `TRACE_AGENT_DISTRIBUTED_TRACING_ENABLED`,
//!   `TRACE_AGENT_NO_CONFIG_FILE`, `TRACE_AGENT_TRUSTED_ACCOUNT_KEY`:
//!   defaulted by the environment normalizer when absent
//!
//! Environment variables take precedence over programmatic configuration.
//! See [`constants`] for the full list.

pub mod config;
pub mod constants;
pub mod entrypoint;
pub mod environment;
pub mod error;
pub mod handler_path;
pub mod instrument;
pub mod loader;
pub mod module;
pub mod registry;
pub mod validate;

pub use config::{LoadingMode, ShimConfig, ShimConfigBuilder};
pub use entrypoint::{init_wrapped_handler, WrappedHandler};
pub use environment::normalize_environment;
pub use error::ShimError;
pub use handler_path::HandlerPath;
pub use instrument::{Instrumentor, SpanInstrumentor};
pub use loader::{resolve_module_path, AsynchronousLoader, ModuleLoader, SynchronousLoader};
pub use module::ResolvedModule;
pub use registry::{HandlerFn, HandlerFuture, HandlerRegistry};
pub use validate::validate_handler_definition;

//! Shim initialization and the process entry point.
//!
//! [`init_wrapped_handler`] runs the whole cold-start sequence in order:
//! environment normalization, configuration resolution, handler string
//! parsing, module loading, validation, wrapping. The result is a
//! [`WrappedHandler`], the uniform entry point handed to the host runtime.
//!
//! # Readiness models
//!
//! - **Static** loading finishes the entire sequence inside
//!   `init_wrapped_handler`; any failure is terminal at cold start and the
//!   entry point is the wrapped handler from the first invocation onward.
//! - **Dynamic** loading starts one resolution task at initialization and
//!   returns immediately. Every invocation awaits the same memoized cell:
//!   the resolution is computed at most once, and all callers observe the
//!   same success or the same failure. A failed resolution never self-heals
//!   within the process lifetime.
//!
//! # Example
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
//!         Ok(json!({ "statusCode": 200, "echo": event.payload }))
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

use crate::config::{LoadingMode, ResolvedConfig, ShimConfig};
use crate::environment;
use crate::error::ShimError;
use crate::handler_path::HandlerPath;
use crate::instrument::{Instrumentor, SpanInstrumentor};
use crate::loader::{AsynchronousLoader, ModuleLoader, SynchronousLoader};
use crate::registry::{HandlerFn, HandlerRegistry};
use crate::validate::validate_handler_definition;
use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// Everything a resolution attempt needs, frozen at initialization.
struct Resolution {
    task_root: PathBuf,
    path: HandlerPath,
    registry: Arc<HandlerRegistry>,
    instrumentor: Arc<dyn Instrumentor>,
}

/// The process entry point: the user handler, wrapped by the tracer.
///
/// Cheap to clone; clones share the underlying handler and, under dynamic
/// loading, the same memoized resolution.
#[derive(Clone)]
pub struct WrappedHandler {
    path: HandlerPath,
    state: HandlerState,
}

#[derive(Clone)]
enum HandlerState {
    Ready(HandlerFn),
    Deferred {
        cell: Arc<OnceCell<Result<HandlerFn, ShimError>>>,
        resolution: Arc<Resolution>,
    },
}

impl WrappedHandler {
    /// Invoke the wrapped handler with the invocation's exact arguments.
    ///
    /// Under deferred readiness this awaits the shared resolution first;
    /// the result or failure of the inner handler is forwarded unchanged.
    pub async fn invoke(&self, event: LambdaEvent<Value>) -> Result<Value, Error> {
        let handler = match &self.state {
            HandlerState::Ready(handler) => handler.clone(),
            HandlerState::Deferred { cell, resolution } => {
                let resolution = resolution.clone();
                let outcome = cell
                    .get_or_init(|| async move {
                        resolve_and_wrap(&AsynchronousLoader, &resolution).await
                    })
                    .await;
                match outcome {
                    Ok(handler) => handler.clone(),
                    Err(err) => return Err(err.clone().into()),
                }
            }
        };
        handler(event).await
    }

    /// The parsed handler definition, for diagnostics and tests.
    pub fn handler_path(&self) -> &HandlerPath {
        &self.path
    }
}

/// Initialize the shim and return the process entry point.
///
/// Normalizes the environment (once per process), resolves configuration,
/// parses the handler definition string, and prepares the wrapped handler
/// according to the selected loading strategy.
pub async fn init_wrapped_handler(
    config: ShimConfig,
    registry: HandlerRegistry,
) -> Result<WrappedHandler, ShimError> {
    environment::normalize_environment_once();

    let ResolvedConfig {
        handler,
        task_root,
        mode,
        instrumentor,
    } = config.resolve();

    let path = HandlerPath::parse(handler.as_deref())?;
    debug!(
        module = %path.module_to_import,
        handler = %path.handler_to_wrap,
        mode = %mode,
        "initializing handler shim"
    );

    let instrumentor = instrumentor
        .unwrap_or_else(|| Arc::new(SpanInstrumentor::new(path.handler_to_wrap.clone())));
    let resolution = Arc::new(Resolution {
        task_root,
        path: path.clone(),
        registry: Arc::new(registry),
        instrumentor,
    });

    let state = match mode {
        LoadingMode::Static => {
            let handler = resolve_and_wrap(&SynchronousLoader, &resolution).await?;
            HandlerState::Ready(handler)
        }
        LoadingMode::Dynamic => {
            let cell = Arc::new(OnceCell::new());
            // Start the one in-flight resolution now; invocations arriving
            // before it settles attach to the same cell.
            let eager_cell = cell.clone();
            let eager_resolution = resolution.clone();
            tokio::spawn(async move {
                let outcome = eager_cell
                    .get_or_init(|| async {
                        resolve_and_wrap(&AsynchronousLoader, &eager_resolution).await
                    })
                    .await;
                if let Err(err) = outcome {
                    warn!(error = %err, "deferred handler resolution failed");
                }
            });
            HandlerState::Deferred { cell, resolution }
        }
    };

    Ok(WrappedHandler { path, state })
}

/// Load, extract, validate, wrap. Shared by both readiness models.
async fn resolve_and_wrap(
    loader: &dyn ModuleLoader,
    resolution: &Resolution,
) -> Result<HandlerFn, ShimError> {
    let module = loader
        .resolve(&resolution.task_root, &resolution.path.module_to_import)
        .await?;
    let candidate = module.get_nested(&resolution.path.handler_to_wrap);
    let user_handler = validate_handler_definition(
        candidate,
        &resolution.registry,
        &resolution.path.handler_to_wrap,
        &resolution.path.module_to_import,
    )?;
    Ok(resolution.instrumentor.wrap(user_handler))
}

//! Registry of handler functions compiled into the binary.
//!
//! A manifest export names a function; this registry is where those names are
//! bound. The function binary registers its handlers before shim
//! initialization, and the registry is read-only afterwards.

use futures_util::future::BoxFuture;
use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

/// Boxed future returned by a handler invocation.
pub type HandlerFuture = BoxFuture<'static, Result<Value, Error>>;

/// A registered handler: the host runtime's handler shape.
pub type HandlerFn = Arc<dyn Fn(LambdaEvent<Value>) -> HandlerFuture + Send + Sync>;

/// Named handler functions available to module manifests.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<String, HandlerFn>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler function under an export name.
    ///
    /// Registering the same name twice replaces the earlier entry.
    pub fn register<F, Fut>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(LambdaEvent<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, Error>> + Send + 'static,
    {
        let handler: HandlerFn = Arc::new(move |event| Box::pin(handler(event)) as HandlerFuture);
        self.handlers.insert(name.into(), handler);
    }

    /// Look up a handler by registered name.
    pub fn get(&self, name: &str) -> Option<HandlerFn> {
        self.handlers.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

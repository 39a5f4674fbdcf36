//! The tracer seam and its default implementation.
//!
//! The shim consumes exactly one capability from the external tracer: wrap a
//! handler, preserving its calling contract. [`Instrumentor`] is that seam;
//! anything satisfying it can be injected through
//! [`ShimConfig`](crate::ShimConfig).
//!
//! [`SpanInstrumentor`] is the default: a `tracing` span per invocation
//! carrying the handler name, the request id, and a cold-start marker. Span
//! export and context propagation belong to whatever subscriber the process
//! installs, not to this crate.

use crate::registry::{HandlerFn, HandlerFuture};
use lambda_runtime::LambdaEvent;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::Instrument;

static IS_COLD_START: AtomicBool = AtomicBool::new(true);

/// External tracer capability: decorate a handler without changing its
/// arguments, result shape, or failure behavior.
pub trait Instrumentor: Send + Sync {
    fn wrap(&self, handler: HandlerFn) -> HandlerFn;
}

/// Default instrumentor: one span per invocation.
#[derive(Debug, Clone)]
pub struct SpanInstrumentor {
    handler_name: String,
}

impl SpanInstrumentor {
    pub fn new(handler_name: impl Into<String>) -> Self {
        Self {
            handler_name: handler_name.into(),
        }
    }
}

impl Default for SpanInstrumentor {
    fn default() -> Self {
        Self::new("handler")
    }
}

impl Instrumentor for SpanInstrumentor {
    fn wrap(&self, handler: HandlerFn) -> HandlerFn {
        let name = self.handler_name.clone();
        Arc::new(move |event: LambdaEvent<Value>| {
            let is_cold = IS_COLD_START.swap(false, Ordering::Relaxed);
            let span = tracing::info_span!(
                "handler",
                otel.name = %name,
                otel.kind = "SERVER",
                requestId = %event.context.request_id,
                faas.coldstart = is_cold,
            );
            Box::pin(handler(event).instrument(span)) as HandlerFuture
        })
    }
}

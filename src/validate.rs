//! Validation of the extracted handler export.
//!
//! Runs once, synchronously, immediately after extraction. A failure here is
//! terminal for the cold start; it is never deferred to first invocation.

use crate::error::ShimError;
use crate::registry::{HandlerFn, HandlerRegistry};
use serde_json::Value;

/// Check that the extracted export exists and names a registered function,
/// and return that function.
///
/// - an absent export fails with [`ShimError::MissingHandler`]
/// - an export that is not a string, or a string with no registered function
///   behind it, fails with [`ShimError::NotCallable`]
///
/// Both errors carry the handler and module names for diagnosability.
pub fn validate_handler_definition(
    candidate: Option<&Value>,
    registry: &HandlerRegistry,
    handler_name: &str,
    module_name: &str,
) -> Result<HandlerFn, ShimError> {
    let export = candidate.ok_or_else(|| ShimError::MissingHandler {
        handler: handler_name.to_string(),
        module: module_name.to_string(),
    })?;

    let not_callable = || ShimError::NotCallable {
        handler: handler_name.to_string(),
        module: module_name.to_string(),
    };

    export
        .as_str()
        .and_then(|name| registry.get(name))
        .ok_or_else(not_callable)
}

//! Error types surfaced during handler resolution.
//!
//! Every failure the shim can produce at cold start is a variant of
//! [`ShimError`]. All variants carry enough context (attempted path,
//! extensions tried, module and handler names) to diagnose a misconfigured
//! deployment without access to the function source.
//!
//! The enum is `Clone` so a memoized failed resolution can be handed out
//! identically to every invocation that awaits it; underlying causes are
//! captured as rendered messages rather than source errors for that reason.

use thiserror::Error;

/// Errors that can occur while resolving, validating, or wrapping a handler.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShimError {
    /// The handler definition string is missing or malformed.
    #[error("{reason}")]
    Configuration { reason: String },

    /// No candidate module file exists under the deployment root.
    #[error("unable to resolve module file at {path} with the following extensions: {attempted}", attempted = .extensions.join(","))]
    ModuleResolution { path: String, extensions: Vec<String> },

    /// The module file disappeared between probing and loading.
    #[error("unable to import module '{module}'")]
    ModuleNotFound { module: String },

    /// The module file exists but could not be read.
    #[error("unable to read module file at {path}: {message}")]
    ModuleLoad { path: String, message: String },

    /// The module file was read but is not a well-formed manifest.
    #[error("unable to parse module file at {path}: {message}")]
    ModuleParse { path: String, message: String },

    /// The dotted export path does not exist in the module.
    #[error("handler '{handler}' missing on module '{module}'")]
    MissingHandler { handler: String, module: String },

    /// The export exists but does not name a registered function.
    #[error("handler '{handler}' from '{module}' is not a function")]
    NotCallable { handler: String, module: String },
}

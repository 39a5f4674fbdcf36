//! Constants for the lambda-handler-shim crate.
//!
//! This file centralizes all constants to ensure consistency across the codebase
//! and provide a single source of truth for configuration parameters.

/// Environment variable names for configuration.
pub mod env_vars {
    /// Handler definition string naming the user module and the export to wrap.
    pub const LAMBDA_HANDLER: &str = "TRACE_AGENT_LAMBDA_HANDLER";

    /// Application name reported by the agent.
    pub const APP_NAME: &str = "TRACE_AGENT_APP_NAME";

    /// Whether the agent participates in distributed tracing.
    pub const DISTRIBUTED_TRACING_ENABLED: &str = "TRACE_AGENT_DISTRIBUTED_TRACING_ENABLED";

    /// Whether the agent skips reading an external configuration file.
    pub const NO_CONFIG_FILE: &str = "TRACE_AGENT_NO_CONFIG_FILE";

    /// Trusted account key used for cross-account trace correlation.
    pub const TRUSTED_ACCOUNT_KEY: &str = "TRACE_AGENT_TRUSTED_ACCOUNT_KEY";

    /// Account id, used as the fallback for the trusted account key.
    pub const ACCOUNT_ID: &str = "TRACE_AGENT_ACCOUNT_ID";

    /// Legacy serverless-mode flag. Removed on Lambda: the agent changes
    /// behavior on the presence of the key, not its value.
    pub const SERVERLESS_MODE_ENABLED: &str = "TRACE_AGENT_SERVERLESS_MODE_ENABLED";

    /// Module loading strategy (dynamic or static).
    pub const LOADING_MODE: &str = "TRACE_AGENT_LOADING_MODE";

    /// AWS Lambda function name (used as the fallback application name).
    pub const AWS_LAMBDA_FUNCTION_NAME: &str = "AWS_LAMBDA_FUNCTION_NAME";

    /// Deployment root of the function package.
    pub const LAMBDA_TASK_ROOT: &str = "LAMBDA_TASK_ROOT";
}

/// Default values for configuration parameters.
pub mod defaults {
    /// Distributed tracing is on unless explicitly disabled.
    pub const DISTRIBUTED_TRACING_ENABLED: &str = "true";

    /// The agent is configured entirely through the environment on Lambda.
    pub const NO_CONFIG_FILE: &str = "true";

    /// Default loading mode token.
    pub const LOADING_MODE: &str = "static";

    /// Deployment root when the platform does not provide one.
    pub const TASK_ROOT: &str = ".";
}

/// Candidate module file extensions, probed in priority order.
///
/// Each loading strategy owns its list: the strategy-native dialect comes
/// first, the generic JSON interchange form second. The two lists are never
/// mixed within one resolution attempt.
pub mod extensions {
    /// Extensions probed by the dynamic (asynchronous) loader.
    pub const DYNAMIC: &[&str] = &[".yaml", ".json"];

    /// Extensions probed by the static (synchronous) loader.
    pub const STATIC: &[&str] = &[".toml", ".json"];
}

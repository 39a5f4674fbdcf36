//! Process environment normalization.
//!
//! Establishes the agent's default configuration values before any user or
//! agent code reads them. Every default uses set-if-absent semantics: a value
//! the operator (or a previous run) already set is never overridden, so the
//! normalizer is idempotent.
//!
//! One setting is removed rather than defaulted: the legacy serverless-mode
//! flag. On Lambda the agent switches behavior on the *presence* of that key,
//! so leaving it set to an empty or falsy value is not enough — the key must
//! be absent.

use crate::constants::{defaults, env_vars};
use std::env;
use std::sync::Once;
use tracing::debug;

static NORMALIZE: Once = Once::new();

/// Run [`normalize_environment`] exactly once for the process lifetime.
///
/// The init path calls this before reading any configuration, so components
/// downstream always observe a normalized environment.
pub(crate) fn normalize_environment_once() {
    NORMALIZE.call_once(normalize_environment);
}

/// Apply the agent's environment defaults.
///
/// For each recognized setting, assigns a derived or constant default only
/// when no explicit value is present:
///
/// - application name falls back to the platform function name
/// - distributed tracing defaults to enabled
/// - the external agent config file is suppressed by default
/// - the trusted account key falls back to the account id
///
/// When running inside the Lambda host (`LAMBDA_TASK_ROOT` present) and the
/// legacy serverless-mode flag key exists with any value, the key is deleted.
pub fn normalize_environment() {
    set_if_absent(
        env_vars::APP_NAME,
        env::var(env_vars::AWS_LAMBDA_FUNCTION_NAME).ok(),
    );
    set_if_absent(
        env_vars::DISTRIBUTED_TRACING_ENABLED,
        Some(defaults::DISTRIBUTED_TRACING_ENABLED.to_string()),
    );
    set_if_absent(
        env_vars::NO_CONFIG_FILE,
        Some(defaults::NO_CONFIG_FILE.to_string()),
    );
    set_if_absent(
        env_vars::TRUSTED_ACCOUNT_KEY,
        env::var(env_vars::ACCOUNT_ID).ok(),
    );

    if env::var_os(env_vars::LAMBDA_TASK_ROOT).is_some()
        && env::var_os(env_vars::SERVERLESS_MODE_ENABLED).is_some()
    {
        debug!(
            key = env_vars::SERVERLESS_MODE_ENABLED,
            "removing legacy serverless-mode flag"
        );
        env::remove_var(env_vars::SERVERLESS_MODE_ENABLED);
    }
}

// `var_os` treats a key set to the empty string as present, which is exactly
// the distinction the serverless-mode removal depends on.
fn set_if_absent(key: &str, value: Option<String>) {
    if env::var_os(key).is_none() {
        if let Some(value) = value {
            env::set_var(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn cleanup_env() {
        env::remove_var(env_vars::APP_NAME);
        env::remove_var(env_vars::DISTRIBUTED_TRACING_ENABLED);
        env::remove_var(env_vars::NO_CONFIG_FILE);
        env::remove_var(env_vars::TRUSTED_ACCOUNT_KEY);
        env::remove_var(env_vars::ACCOUNT_ID);
        env::remove_var(env_vars::SERVERLESS_MODE_ENABLED);
        env::remove_var(env_vars::AWS_LAMBDA_FUNCTION_NAME);
        env::remove_var(env_vars::LAMBDA_TASK_ROOT);
    }

    #[test]
    #[serial]
    fn applies_defaults_when_unset() {
        cleanup_env();
        env::set_var(env_vars::AWS_LAMBDA_FUNCTION_NAME, "my-function");

        normalize_environment();

        assert_eq!(env::var(env_vars::APP_NAME).unwrap(), "my-function");
        assert_eq!(
            env::var(env_vars::DISTRIBUTED_TRACING_ENABLED).unwrap(),
            "true"
        );
        assert_eq!(env::var(env_vars::NO_CONFIG_FILE).unwrap(), "true");

        cleanup_env();
    }

    #[test]
    #[serial]
    fn never_overrides_explicit_values() {
        cleanup_env();
        env::set_var(env_vars::APP_NAME, "explicit-name");
        env::set_var(env_vars::DISTRIBUTED_TRACING_ENABLED, "false");

        normalize_environment();

        assert_eq!(env::var(env_vars::APP_NAME).unwrap(), "explicit-name");
        assert_eq!(
            env::var(env_vars::DISTRIBUTED_TRACING_ENABLED).unwrap(),
            "false"
        );

        cleanup_env();
    }

    #[test]
    #[serial]
    fn is_idempotent_across_runs() {
        cleanup_env();
        env::set_var(env_vars::AWS_LAMBDA_FUNCTION_NAME, "first-run");

        normalize_environment();
        // A value established by the first run survives a name change.
        env::set_var(env_vars::AWS_LAMBDA_FUNCTION_NAME, "second-run");
        normalize_environment();

        assert_eq!(env::var(env_vars::APP_NAME).unwrap(), "first-run");

        cleanup_env();
    }

    #[test]
    #[serial]
    fn trusted_account_key_falls_back_to_account_id() {
        cleanup_env();
        env::set_var(env_vars::ACCOUNT_ID, "123456789012");

        normalize_environment();

        assert_eq!(
            env::var(env_vars::TRUSTED_ACCOUNT_KEY).unwrap(),
            "123456789012"
        );

        // An explicit trusted key is left alone on a second pass.
        env::set_var(env_vars::TRUSTED_ACCOUNT_KEY, "999999999999");
        normalize_environment();
        assert_eq!(
            env::var(env_vars::TRUSTED_ACCOUNT_KEY).unwrap(),
            "999999999999"
        );

        cleanup_env();
    }

    #[test]
    #[serial]
    fn removes_serverless_mode_flag_on_lambda() {
        cleanup_env();
        env::set_var(env_vars::LAMBDA_TASK_ROOT, "/var/task");
        // Even an empty value counts as present and must be removed.
        env::set_var(env_vars::SERVERLESS_MODE_ENABLED, "");

        normalize_environment();

        assert!(env::var_os(env_vars::SERVERLESS_MODE_ENABLED).is_none());

        cleanup_env();
    }

    #[test]
    #[serial]
    fn keeps_serverless_mode_flag_outside_lambda() {
        cleanup_env();
        env::set_var(env_vars::SERVERLESS_MODE_ENABLED, "true");

        normalize_environment();

        assert_eq!(env::var(env_vars::SERVERLESS_MODE_ENABLED).unwrap(), "true");

        cleanup_env();
    }
}

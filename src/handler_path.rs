//! Parsing of the handler definition string.
//!
//! The handler environment variable names a module and an exported symbol in
//! one string, `<modulePath>.<exportPath>`. The module path may contain
//! directory separators and the export path may itself be dotted, so the
//! split happens at the first `.` after the last `/`:
//!
//! ```text
//! nested/dir/index.handler        -> module "nested/dir/index", export "handler"
//! index.outer.inner               -> module "index",            export "outer.inner"
//! ```

use crate::constants::env_vars;
use crate::error::ShimError;
use serde::{Deserialize, Serialize};

/// The two halves of a parsed handler definition string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerPath {
    /// Relative module path under the deployment root, without extension.
    pub module_to_import: String,
    /// Possibly dotted path to the export inside the module.
    pub handler_to_wrap: String,
}

impl HandlerPath {
    /// Parse a raw handler definition string.
    ///
    /// Fails with [`ShimError::Configuration`] when the value is absent or
    /// empty, or when no `.` delimiter follows the final path segment.
    pub fn parse(raw: Option<&str>) -> Result<Self, ShimError> {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                return Err(ShimError::Configuration {
                    reason: format!("no {} environment variable set", env_vars::LAMBDA_HANDLER),
                })
            }
        };

        // The delimiter search starts after the last directory separator so
        // dotted directory names never confuse the split.
        let search_from = raw.rfind('/').map_or(0, |idx| idx + 1);
        let delimiter = raw[search_from..].find('.').map(|idx| search_from + idx);

        match delimiter {
            Some(idx) if idx > 0 && idx + 1 < raw.len() => Ok(Self {
                module_to_import: raw[..idx].to_string(),
                handler_to_wrap: raw[idx + 1..].to_string(),
            }),
            _ => Err(ShimError::Configuration {
                reason: format!("improperly formatted handler environment variable: {raw}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_module_and_export() {
        let path = HandlerPath::parse(Some("dir/file.export")).unwrap();
        assert_eq!(path.module_to_import, "dir/file");
        assert_eq!(path.handler_to_wrap, "export");
    }

    #[test]
    fn keeps_nested_export_path_intact() {
        let path = HandlerPath::parse(Some("dir/file.outer.inner")).unwrap();
        assert_eq!(path.module_to_import, "dir/file");
        assert_eq!(path.handler_to_wrap, "outer.inner");
    }

    #[test]
    fn handles_nested_directories() {
        let path = HandlerPath::parse(Some("nested/dir/index.handler")).unwrap();
        assert_eq!(path.module_to_import, "nested/dir/index");
        assert_eq!(path.handler_to_wrap, "handler");
    }

    #[test]
    fn handles_dotted_directory_names() {
        let path = HandlerPath::parse(Some("v1.2/index.handler")).unwrap();
        assert_eq!(path.module_to_import, "v1.2/index");
        assert_eq!(path.handler_to_wrap, "handler");
    }

    #[test]
    fn rejects_missing_value() {
        let err = HandlerPath::parse(None).unwrap_err();
        assert!(matches!(err, ShimError::Configuration { .. }));
        assert!(err.to_string().contains(env_vars::LAMBDA_HANDLER));
    }

    #[test]
    fn rejects_empty_value() {
        let err = HandlerPath::parse(Some("")).unwrap_err();
        assert!(matches!(err, ShimError::Configuration { .. }));
    }

    #[test]
    fn rejects_string_without_delimiter() {
        let err = HandlerPath::parse(Some("justafilename")).unwrap_err();
        assert!(err.to_string().contains("justafilename"));
    }

    #[test]
    fn rejects_delimiter_only_in_directory_part() {
        // The only dot sits before the final separator, so no export remains.
        let err = HandlerPath::parse(Some("dir.name/file")).unwrap_err();
        assert!(matches!(err, ShimError::Configuration { .. }));
    }

    #[test]
    fn rejects_trailing_delimiter() {
        let err = HandlerPath::parse(Some("file.")).unwrap_err();
        assert!(matches!(err, ShimError::Configuration { .. }));
    }
}

//! In-memory representation of a loaded user module.
//!
//! A module is a handler manifest: a loosely-typed tree of exports in which a
//! leaf names a function registered in the process's
//! [`HandlerRegistry`](crate::HandlerRegistry). The tree is held only long
//! enough to extract the target export.

use crate::error::ShimError;
use serde_json::Value;
use std::path::Path;

/// The export tree obtained from a module loader.
#[derive(Debug, Clone)]
pub struct ResolvedModule {
    exports: Value,
}

impl ResolvedModule {
    /// Build a module from an already-parsed export tree.
    pub fn new(exports: Value) -> Self {
        Self { exports }
    }

    /// Walk a dotted export path through the tree.
    ///
    /// Each segment narrows into a nested field. Absence at any point yields
    /// `None`; this never fails, absence is a valid outcome the validator
    /// turns into a diagnostic.
    pub fn get_nested(&self, dotted_path: &str) -> Option<&Value> {
        dotted_path
            .split('.')
            .try_fold(&self.exports, |node, segment| node.get(segment))
    }
}

/// Parse a manifest file's contents according to its dialect.
///
/// The dialect is picked by file extension: `.yaml` and `.toml` are the
/// strategy-native forms, anything else is treated as JSON.
pub(crate) fn parse_module(path: &Path, contents: &str) -> Result<ResolvedModule, ShimError> {
    let parse_error = |message: String| ShimError::ModuleParse {
        path: path.display().to_string(),
        message,
    };

    let exports = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") => {
            serde_yaml::from_str(contents).map_err(|err| parse_error(err.to_string()))?
        }
        Some("toml") => toml::from_str(contents).map_err(|err| parse_error(err.to_string()))?,
        _ => serde_json::from_str(contents).map_err(|err| parse_error(err.to_string()))?,
    };

    Ok(ResolvedModule::new(exports))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn narrows_single_segment() {
        let module = ResolvedModule::new(json!({ "handler": "process_order" }));
        assert_eq!(module.get_nested("handler"), Some(&json!("process_order")));
    }

    #[test]
    fn narrows_nested_segments() {
        let module = ResolvedModule::new(json!({ "outer": { "inner": "nested_fn" } }));
        assert_eq!(module.get_nested("outer.inner"), Some(&json!("nested_fn")));
    }

    #[test]
    fn missing_intermediate_segment_yields_none() {
        let module = ResolvedModule::new(json!({ "outer": { "inner": "nested_fn" } }));
        assert_eq!(module.get_nested("missing.inner"), None);
        assert_eq!(module.get_nested("outer.missing"), None);
    }

    #[test]
    fn narrowing_through_a_leaf_yields_none() {
        let module = ResolvedModule::new(json!({ "handler": "process_order" }));
        assert_eq!(module.get_nested("handler.deeper"), None);
    }

    #[test]
    fn parses_each_dialect_to_the_same_tree() {
        let expected = json!({ "handler": "process_order" });

        let yaml = parse_module(Path::new("index.yaml"), "handler: process_order\n").unwrap();
        assert_eq!(yaml.get_nested("handler"), expected.get("handler"));

        let toml = parse_module(Path::new("index.toml"), "handler = \"process_order\"\n").unwrap();
        assert_eq!(toml.get_nested("handler"), expected.get("handler"));

        let interchange =
            parse_module(Path::new("index.json"), r#"{ "handler": "process_order" }"#).unwrap();
        assert_eq!(interchange.get_nested("handler"), expected.get("handler"));
    }

    #[test]
    fn malformed_manifest_reports_path() {
        let err = parse_module(Path::new("broken.json"), "{ not json").unwrap_err();
        match err {
            ShimError::ModuleParse { path, .. } => assert_eq!(path, "broken.json"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

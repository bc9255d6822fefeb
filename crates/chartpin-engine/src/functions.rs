//! Global template functions

use std::sync::Arc;

use chartpin_stream::{CatalogClient, VersionKind};
use minijinja::value::Rest;
use minijinja::{Error, ErrorKind, Value};

/// Abort the render with a message
///
/// Usage: {{ fail("provider " ~ provider ~ " needs a static IP") }}
pub fn fail(message: String) -> Result<Value, Error> {
    Err(Error::new(ErrorKind::InvalidOperation, message))
}

/// Build a map from alternating keys and values
///
/// Usage: {{ dict("enabled", true, "class", "nginx") | toyaml }}
pub fn dict(args: Rest<Value>) -> Result<Value, Error> {
    if args.len() % 2 != 0 {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            "dict expects key-value pairs",
        ));
    }

    let mut map = serde_json::Map::new();
    for pair in args.chunks(2) {
        let key = pair[0]
            .as_str()
            .ok_or_else(|| Error::new(ErrorKind::InvalidOperation, "dict keys must be strings"))?;
        let value = serde_json::to_value(&pair[1])
            .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))?;
        map.insert(key.to_string(), value);
    }

    Ok(Value::from_serialize(serde_json::Value::Object(map)))
}

/// Usage: {{ list("a", "b") | toyaml }}
pub fn list(args: Rest<Value>) -> Value {
    Value::from(args.0)
}

/// Look up `key` on `obj`, falling back to `default`
///
/// Usage: {{ get(values.ingress, "host", "localhost") }}
pub fn get(obj: Value, key: String, default: Option<Value>) -> Value {
    match obj.get_attr(&key) {
        Ok(found) if !found.is_undefined() => found,
        _ => default.unwrap_or(Value::UNDEFINED),
    }
}

/// First argument that is neither undefined, null nor an empty string
///
/// Usage: {{ coalesce(values.domain, "example.com") }}
pub fn coalesce(args: Rest<Value>) -> Value {
    args.0
        .into_iter()
        .find(|arg| !arg.is_undefined() && !arg.is_none() && arg.as_str() != Some(""))
        .unwrap_or(Value::UNDEFINED)
}

/// Usage: {{ ternary("LoadBalancer", "NodePort", provider == "gke") }}
pub fn ternary(true_val: Value, false_val: Value, condition: Value) -> Value {
    if condition.is_true() {
        true_val
    } else {
        false_val
    }
}

/// The `versionStream(kind, name)` template function
///
/// Looks a pin up in the version stream. Failures never abort the render:
/// they are logged and the function yields an empty string, so a template
/// can still be rendered against a partial stream.
#[derive(Clone)]
pub struct VersionStreamFn {
    catalog: Arc<dyn CatalogClient>,
}

impl VersionStreamFn {
    pub fn new(catalog: Arc<dyn CatalogClient>) -> Self {
        Self { catalog }
    }

    pub fn call(&self, kind: &str, name: &str) -> String {
        let parsed: VersionKind = match kind.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::error!("failed to find version {} for {}: {}", name, kind, e);
                return String::new();
            }
        };

        match self.catalog.stable_version(parsed, name) {
            Ok(Some(version)) => version,
            Ok(None) => {
                tracing::warn!("could not find a stable version of {} {}", parsed, name);
                String::new()
            }
            Err(e) => {
                tracing::error!("failed to find version {} for {}: {}", name, parsed, e);
                String::new()
            }
        }
    }
}

impl std::fmt::Debug for VersionStreamFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionStreamFn").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartpin_stream::{RepositoryPrefixes, StaticCatalog, StreamError};

    struct Unreachable;

    impl CatalogClient for Unreachable {
        fn stable_version(
            &self,
            _kind: VersionKind,
            _name: &str,
        ) -> chartpin_stream::Result<Option<String>> {
            Err(StreamError::MissingSource)
        }

        fn repository_prefixes(&self) -> chartpin_stream::Result<RepositoryPrefixes> {
            Err(StreamError::MissingSource)
        }
    }

    #[test]
    fn test_version_stream_fn() {
        let catalog = StaticCatalog::new().with_version(VersionKind::Docker, "nginx", "1.25.3");
        let function = VersionStreamFn::new(Arc::new(catalog));

        assert_eq!(function.call("docker", "nginx"), "1.25.3");
        assert_eq!(function.call("docker", "redis"), "");
        assert_eq!(function.call("helm", "nginx"), "");
    }

    #[test]
    fn test_version_stream_fn_swallows_catalog_errors() {
        let function = VersionStreamFn::new(Arc::new(Unreachable));
        assert_eq!(function.call("chart", "stable/nginx"), "");
    }

    #[test]
    fn test_dict_and_list() {
        let map = dict(Rest(vec![Value::from("a"), Value::from(1)])).unwrap();
        assert_eq!(map.get_attr("a").unwrap(), Value::from(1));

        assert!(dict(Rest(vec![Value::from("a")])).is_err());
        assert!(dict(Rest(vec![Value::from(1), Value::from(1)])).is_err());

        assert_eq!(list(Rest(vec![Value::from("x")])).len(), Some(1));
    }

    #[test]
    fn test_get_with_default() {
        let obj = Value::from_serialize(serde_json::json!({"host": "a.example.com"}));

        assert_eq!(get(obj.clone(), "host".into(), None), Value::from("a.example.com"));
        assert_eq!(
            get(obj, "port".into(), Some(Value::from(80))),
            Value::from(80)
        );
    }

    #[test]
    fn test_coalesce_and_ternary() {
        let picked = coalesce(Rest(vec![
            Value::UNDEFINED,
            Value::from(""),
            Value::from("fallback"),
        ]));
        assert_eq!(picked, Value::from("fallback"));
        assert!(coalesce(Rest(vec![])).is_undefined());

        assert_eq!(
            ternary(Value::from("a"), Value::from("b"), Value::from(false)),
            Value::from("b")
        );
    }

    #[test]
    fn test_fail() {
        let err = fail("no static IP".to_string()).unwrap_err();
        assert!(err.to_string().contains("no static IP"));
    }
}

//! Template filters for value override templates
//!
//! Overrides are YAML documents, so most of these exist to emit YAML
//! fragments safely: `toyaml | nindent(n)` for nested blocks, `quote` for
//! strings that would otherwise be reinterpreted.

use base64::Engine as _;
use minijinja::{Error, ErrorKind, Value};

fn to_json(value: &Value) -> Result<serde_json::Value, Error> {
    serde_json::to_value(value).map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))
}

fn as_text(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

/// Render a value as a YAML block
///
/// Usage: {{ values.resources | toyaml | nindent(4) }}
pub fn toyaml(value: Value) -> Result<String, Error> {
    let yaml = serde_yaml::to_string(&to_json(&value)?)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))?;

    Ok(yaml.trim_start_matches("---\n").trim_end().to_string())
}

/// Render a value as compact JSON
///
/// Usage: {{ values.annotations | tojson }}
pub fn tojson(value: Value) -> Result<String, Error> {
    serde_json::to_string(&to_json(&value)?)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))
}

/// Usage: {{ values.ingress.host | quote }}
#[must_use]
pub fn quote(value: Value) -> String {
    let text = as_text(&value);
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Usage: {{ requirements.cluster.namespace | squote }}
#[must_use]
pub fn squote(value: Value) -> String {
    format!("'{}'", as_text(&value).replace('\'', "''"))
}

/// Prefix every non-empty line with `spaces` spaces
///
/// Usage: {{ block | indent(2) }}
#[must_use]
pub fn indent(value: String, spaces: usize) -> String {
    let pad = " ".repeat(spaces);

    value
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Like [`indent`], starting on a fresh line
///
/// Usage: {{ values.nodeSelector | toyaml | nindent(6) }}
#[must_use]
pub fn nindent(value: String, spaces: usize) -> String {
    format!("\n{}", indent(value, spaces))
}

/// Usage: {{ values.secret | b64encode }}
#[must_use]
pub fn b64encode(value: String) -> String {
    base64::engine::general_purpose::STANDARD.encode(value.as_bytes())
}

/// Fail the render when a value is undefined, null or an empty string
///
/// Usage: {{ values.domain | required("a domain is needed on this provider") }}
pub fn required(value: Value, message: Option<String>) -> Result<Value, Error> {
    let missing = value.is_undefined() || value.is_none() || value.as_str() == Some("");

    if missing {
        Err(Error::new(
            ErrorKind::InvalidOperation,
            message.unwrap_or_else(|| "required value is missing".to_string()),
        ))
    } else {
        Ok(value)
    }
}

/// Usage: {{ requirements.cluster.namespace | camelcase }}
#[must_use]
pub fn camelcase(value: String) -> String {
    chartpin_core::to_camel_case(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toyaml_nested() {
        let value = Value::from_serialize(serde_json::json!({
            "limits": { "cpu": "1", "memory": "1Gi" }
        }));

        let yaml = toyaml(value).unwrap();

        assert_eq!(yaml, "limits:\n  cpu: '1'\n  memory: 1Gi");
    }

    #[test]
    fn test_tojson() {
        let value = Value::from_serialize(serde_json::json!({"a": [1, 2]}));
        assert_eq!(tojson(value).unwrap(), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn test_quote_and_squote() {
        assert_eq!(quote(Value::from("say \"hi\"")), r#""say \"hi\"""#);
        assert_eq!(quote(Value::from(8080)), "\"8080\"");
        assert_eq!(squote(Value::from("it's")), "'it''s'");
    }

    #[test]
    fn test_indent_skips_blank_lines() {
        assert_eq!(indent("a: 1\n\nb: 2".to_string(), 2), "  a: 1\n\n  b: 2");
        assert_eq!(nindent("a: 1".to_string(), 4), "\n    a: 1");
    }

    #[test]
    fn test_b64encode() {
        assert_eq!(b64encode("admin".to_string()), "YWRtaW4=");
    }

    #[test]
    fn test_required() {
        assert!(required(Value::from("x"), None).is_ok());
        assert!(required(Value::from(0), None).is_ok());

        let err = required(Value::from(""), Some("domain is required".to_string())).unwrap_err();
        assert!(err.to_string().contains("domain is required"));
        assert!(required(Value::UNDEFINED, None).is_err());
        assert!(required(Value::from(()), None).is_err());
    }

    #[test]
    fn test_camelcase() {
        assert_eq!(camelcase("jx-staging".to_string()), "JxStaging");
    }
}

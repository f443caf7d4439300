//! Best-effort classification of default-value literals.
//!
//! Parameter defaults arrive as raw source text. Two questions get asked of
//! that text during rendering:
//!
//! - is it a structured key-value literal (an options bundle)? Decided by a
//!   strict JSON object parse; anything JSON rejects is not a bundle.
//! - which Ruby class would it evaluate to? Decided by the JSON parse when
//!   possible, then by a handful of Ruby spellings JSON does not cover.
//!
//! Failure is the expected path here, not an error: unrecognized text simply
//! classifies as `Object` and rendering falls through to the generic form.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref INTEGER_RE: Regex = Regex::new(r"^-?\d[\d_]*$").unwrap();
    static ref FLOAT_RE: Regex = Regex::new(r"^-?\d[\d_]*\.\d[\d_]*([eE][+-]?\d+)?$").unwrap();
}

/// Whether the text parses as a structured key-value literal.
pub fn looks_like_hash(text: &str) -> bool {
    matches!(serde_json::from_str::<Value>(text), Ok(Value::Object(_)))
}

/// Name the Ruby class the literal would evaluate to, best effort.
pub fn runtime_type_name(text: &str) -> &'static str {
    let trimmed = text.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return match value {
            Value::Object(_) => "Hash",
            Value::Array(_) => "Array",
            Value::String(_) => "String",
            Value::Number(n) if n.is_f64() => "Float",
            Value::Number(_) => "Integer",
            Value::Bool(true) => "TrueClass",
            Value::Bool(false) => "FalseClass",
            Value::Null => "Object",
        };
    }

    // Ruby spellings that are not JSON.
    if trimmed == "nil" {
        "NilClass"
    } else if trimmed.starts_with(':') && trimmed.len() > 1 {
        "Symbol"
    } else if trimmed.len() >= 2 && trimmed.starts_with('\'') && trimmed.ends_with('\'') {
        "String"
    } else if trimmed.starts_with('{') && trimmed.ends_with('}') {
        "Hash"
    } else if trimmed.starts_with('[') && trimmed.ends_with(']') {
        "Array"
    } else if INTEGER_RE.is_match(trimmed) {
        "Integer"
    } else if FLOAT_RE.is_match(trimmed) {
        "Float"
    } else {
        "Object"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_detection_is_json_strict() {
        assert!(looks_like_hash("{}"));
        assert!(looks_like_hash("{ \"retries\": 3 }"));
        // Ruby hash spellings JSON rejects are not bundles.
        assert!(!looks_like_hash("{ retries: 3 }"));
        assert!(!looks_like_hash("{ :a => 1 }"));
        assert!(!looks_like_hash("[]"));
        assert!(!looks_like_hash("nil"));
        assert!(!looks_like_hash("Config.defaults"));
    }

    #[test]
    fn test_runtime_type_from_json_values() {
        assert_eq!(runtime_type_name("42"), "Integer");
        assert_eq!(runtime_type_name("-7"), "Integer");
        assert_eq!(runtime_type_name("3.14"), "Float");
        assert_eq!(runtime_type_name("\"hello\""), "String");
        assert_eq!(runtime_type_name("[1, 2]"), "Array");
        assert_eq!(runtime_type_name("{ \"a\": 1 }"), "Hash");
        assert_eq!(runtime_type_name("true"), "TrueClass");
        assert_eq!(runtime_type_name("false"), "FalseClass");
    }

    #[test]
    fn test_runtime_type_from_ruby_spellings() {
        assert_eq!(runtime_type_name("nil"), "NilClass");
        assert_eq!(runtime_type_name(":json"), "Symbol");
        assert_eq!(runtime_type_name("'hello'"), "String");
        assert_eq!(runtime_type_name("{ retries: 3 }"), "Hash");
        assert_eq!(runtime_type_name("[a, b]"), "Array");
        assert_eq!(runtime_type_name("1_000"), "Integer");
        assert_eq!(runtime_type_name("1_000.5"), "Float");
    }

    #[test]
    fn test_unrecognized_text_is_object() {
        assert_eq!(runtime_type_name("Config.defaults"), "Object");
        assert_eq!(runtime_type_name("some_method(1)"), "Object");
        assert_eq!(runtime_type_name(""), "Object");
    }
}

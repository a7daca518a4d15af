//! Lenient decoding of submitted fields.
//!
//! Clients may send any JSON scalar for a text column; it is stored as text.
//! Required fields treat `null`, `""`, `false` and `0` as missing.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};

#[derive(Debug, Clone, PartialEq)]
enum Scalar {
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn is_truthy(&self) -> bool {
        match self {
            Scalar::Text(text) => !text.is_empty(),
            Scalar::Int(n) => *n != 0,
            Scalar::UInt(n) => *n != 0,
            Scalar::Float(n) => *n != 0.0 && !n.is_nan(),
            Scalar::Bool(b) => *b,
        }
    }

    /// The text SQLite would hold after binding the value to a TEXT column.
    fn into_text(self) -> String {
        match self {
            Scalar::Text(text) => text,
            Scalar::Int(n) => n.to_string(),
            Scalar::UInt(n) => n.to_string(),
            Scalar::Float(n) if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 => {
                (n as i64).to_string()
            }
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => u8::from(b).to_string(),
        }
    }
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = Option<Scalar>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, number, boolean or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(Scalar::Text(v.to_owned())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Some(Scalar::Text(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(Scalar::Int(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(Scalar::UInt(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(Scalar::Float(v)))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Some(Scalar::Bool(v)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

/// Any scalar as text; `null` stays absent.
pub(crate) fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(deserializer.deserialize_any(ScalarVisitor)?.map(Scalar::into_text))
}

/// Like [`text`], but falsy values count as absent.
pub(crate) fn truthy_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(deserializer
        .deserialize_any(ScalarVisitor)?
        .filter(Scalar::is_truthy)
        .map(Scalar::into_text))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "truthy_text")]
        required: Option<String>,
        #[serde(default, deserialize_with = "text")]
        optional: Option<String>,
    }

    fn decode(value: serde_json::Value) -> Fields {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn scalars_become_text() {
        assert_eq!(decode(json!({ "required": 5550101 })).required.as_deref(), Some("5550101"));
        assert_eq!(decode(json!({ "required": -3 })).required.as_deref(), Some("-3"));
        assert_eq!(decode(json!({ "required": 2.0 })).required.as_deref(), Some("2"));
        assert_eq!(decode(json!({ "required": 2.5 })).required.as_deref(), Some("2.5"));
        assert_eq!(decode(json!({ "required": true })).required.as_deref(), Some("1"));
        assert_eq!(decode(json!({ "required": " " })).required.as_deref(), Some(" "));
    }

    #[test]
    fn falsy_values_are_missing_when_required() {
        for value in [json!(null), json!(""), json!(false), json!(0), json!(0.0)] {
            assert_eq!(decode(json!({ "required": value })).required, None, "{value}");
        }
        assert_eq!(decode(json!({})).required, None);
    }

    #[test]
    fn optional_keeps_falsy_values() {
        assert_eq!(decode(json!({ "optional": 0 })).optional.as_deref(), Some("0"));
        assert_eq!(decode(json!({ "optional": "" })).optional.as_deref(), Some(""));
        assert_eq!(decode(json!({ "optional": null })).optional, None);
    }

    #[test]
    fn objects_are_rejected() {
        assert!(serde_json::from_value::<Fields>(json!({ "required": { "a": 1 } })).is_err());
    }
}

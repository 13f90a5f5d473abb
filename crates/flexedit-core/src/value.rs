//! Parameter value codec.
//!
//! Parameter values are edited as free-text "semi-values": one row per
//! line, each row either a bare value (array form) or an index/value
//! pair (map form). The codec classifies scalar tokens and encodes the
//! whole table into the structured value the backend expects.

use serde_json::{json, Map, Number, Value};

// ── Scalars ───────────────────────────────────────────────────────────────

/// A single classified cell of a semi-value table.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Classifies one free-text token.
    ///
    /// Blank input is null. Numeric input is a number; the float parser
    /// accepts `nan` and `inf` spellings in any case. Anything else
    /// stays text.
    pub fn classify(token: &str) -> Scalar {
        let token = token.trim();
        if token.is_empty() {
            return Scalar::Null;
        }
        match token.parse::<f64>() {
            Ok(number) => Scalar::Number(number),
            Err(_) => Scalar::Text(token.to_string()),
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Scalar::Number(_))
    }

    /// JSON form of the scalar. Non-finite numbers have no JSON
    /// representation and become null.
    pub fn to_json(&self) -> Value {
        match self {
            Scalar::Null => Value::Null,
            Scalar::Number(number) => Number::from_f64(*number)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Scalar::Text(text) => Value::String(text.clone()),
        }
    }
}

// ── Semi-values ───────────────────────────────────────────────────────────

/// The free-text intermediate form of a parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SemiValue {
    pub index_name: Option<String>,
    pub content: String,
}

impl SemiValue {
    pub fn new(content: impl Into<String>) -> Self {
        SemiValue {
            index_name: None,
            content: content.into(),
        }
    }

    pub fn with_index_name(content: impl Into<String>, index_name: impl Into<String>) -> Self {
        SemiValue {
            index_name: Some(index_name.into()),
            content: content.into(),
        }
    }
}

/// A parameter value as held by the editor before commit: either a value
/// already in wire form, or a semi-value still in its text form.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorValue {
    Json(Value),
    Semi(SemiValue),
}

impl EditorValue {
    /// Encodes the value into the backend's wire form. Plain values pass
    /// through untouched.
    pub fn to_wire(&self) -> Value {
        match self {
            EditorValue::Json(value) => value.clone(),
            EditorValue::Semi(semi) => semi_value_to_value(semi),
        }
    }
}

impl From<Value> for EditorValue {
    fn from(value: Value) -> Self {
        EditorValue::Json(value)
    }
}

impl From<SemiValue> for EditorValue {
    fn from(semi: SemiValue) -> Self {
        EditorValue::Semi(semi)
    }
}

impl From<&str> for EditorValue {
    fn from(value: &str) -> Self {
        EditorValue::Json(Value::String(value.to_string()))
    }
}

enum Row {
    Single(Scalar),
    Indexed(String, Scalar),
}

/// Encodes a semi-value into the backend's array or map value.
///
/// Rows come one per non-blank line, whitespace-separated. The first
/// row's arity decides the type tag: one column means an array value,
/// two an indexed map. The array `value_type` is `"float"` when the
/// first scalar is numeric, `"str"` otherwise.
pub fn semi_value_to_value(semi: &SemiValue) -> Value {
    let mut rows = Vec::new();
    for line in semi.content.lines() {
        let mut columns = line.split_whitespace();
        let Some(first) = columns.next() else {
            continue;
        };
        match columns.next() {
            Some(second) => rows.push(Row::Indexed(first.to_string(), Scalar::classify(second))),
            None => rows.push(Row::Single(Scalar::classify(first))),
        }
    }
    let row_to_json = |row: &Row| match row {
        Row::Single(scalar) => scalar.to_json(),
        Row::Indexed(index, scalar) => json!([index, scalar.to_json()]),
    };
    let data: Vec<Value> = rows.iter().map(row_to_json).collect();
    match rows.first() {
        None | Some(Row::Single(_)) => {
            let value_type = match rows.first() {
                Some(Row::Single(scalar)) if scalar.is_number() => "float",
                _ => "str",
            };
            json!({ "type": "array", "value_type": value_type, "data": data })
        }
        Some(Row::Indexed(..)) => {
            let mut map = Map::new();
            map.insert("type".to_string(), json!("map"));
            map.insert("index_type".to_string(), json!("str"));
            if let Some(index_name) = &semi.index_name {
                map.insert("index_name".to_string(), json!(index_name));
            }
            map.insert("data".to_string(), Value::Array(data));
            Value::Object(map)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_string_stays_text() {
        assert_eq!(Scalar::classify("a"), Scalar::Text("a".to_string()));
    }

    #[test]
    fn numeric_token_becomes_number() {
        assert_eq!(Scalar::classify("1"), Scalar::Number(1.0));
    }

    #[test]
    fn nan_token_becomes_not_a_number() {
        let scalar = Scalar::classify("nan");
        match scalar {
            Scalar::Number(number) => assert!(number.is_nan()),
            _ => panic!("expected a number"),
        }
    }

    #[test]
    fn blank_token_becomes_null() {
        assert_eq!(Scalar::classify("  "), Scalar::Null);
    }

    #[test]
    fn two_column_content_encodes_as_map() {
        let value = semi_value_to_value(&SemiValue::new("T1 1\nT2 2\n"));
        assert_eq!(
            value,
            json!({
                "type": "map",
                "index_type": "str",
                "data": [["T1", 1.0], ["T2", 2.0]],
            })
        );
    }

    #[test]
    fn single_column_content_encodes_as_float_array() {
        let value = semi_value_to_value(&SemiValue::new("1\n2\n"));
        assert_eq!(
            value,
            json!({ "type": "array", "value_type": "float", "data": [1.0, 2.0] })
        );
    }

    #[test]
    fn string_rows_encode_as_str_array() {
        let value = semi_value_to_value(&SemiValue::new("high\nlow\n"));
        assert_eq!(
            value,
            json!({ "type": "array", "value_type": "str", "data": ["high", "low"] })
        );
    }

    #[test]
    fn index_name_is_carried_into_map() {
        let value = semi_value_to_value(&SemiValue::with_index_name("T1 11.0\nT2 22.0\n", "idx_x"));
        assert_eq!(
            value,
            json!({
                "type": "map",
                "index_type": "str",
                "index_name": "idx_x",
                "data": [["T1", 11.0], ["T2", 22.0]],
            })
        );
    }

    #[test]
    fn first_row_arity_decides_the_type_tag() {
        let value = semi_value_to_value(&SemiValue::new("1\nT2 2\n"));
        assert_eq!(value["type"], "array");
        assert_eq!(value["data"], json!([1.0, ["T2", 2.0]]));
    }

    #[test]
    fn empty_content_encodes_as_empty_array() {
        let value = semi_value_to_value(&SemiValue::new(""));
        assert_eq!(
            value,
            json!({ "type": "array", "value_type": "str", "data": [] })
        );
    }

    #[test]
    fn extra_whitespace_is_ignored() {
        let value = semi_value_to_value(&SemiValue::new("  T1 \t 1 \n\n  T2  2  \n"));
        assert_eq!(value["data"], json!([["T1", 1.0], ["T2", 2.0]]));
    }
}

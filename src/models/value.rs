use indexmap::IndexMap;
use std::fmt::{Display, Formatter};

/// Ordered map of detail values, kept in the order the daemon printed them.
pub type ValueMap = IndexMap<String, Value>;

/// A value in a protocol detail block or an indentation tree.
///
/// Leaves are integers or strings; a key printed without a value is [Value::Null]; a key with
/// indented children is a [Value::Map].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    Null,
    Int(i64),
    Str(String),
    Map(ValueMap),
}

impl Value {
    /// Build a leaf from raw text: integers when the text parses as one, trimmed strings otherwise.
    pub fn from_scalar(text: &str) -> Value {
        let text = text.trim();
        match text.parse::<i64>() {
            Ok(v) => Value::Int(v),
            Err(_) => Value::Str(text.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Look up `key` if this value is a map.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|m| m.get(key))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Int(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{}", v),
            Value::Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<ValueMap> for Value {
    fn from(v: ValueMap) -> Self {
        Value::Map(v)
    }
}

/// Decoded value of one route attribute line.
///
/// [AttrValue::Null] marks a value the parser deliberately declined to decode, e.g. an AS path
/// that contains an AS-SET (`{...}`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AttrValue {
    Null,
    Int(i64),
    Str(String),
    IntList(Vec<i64>),
}

impl AttrValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_int_list(&self) -> Option<&[i64]> {
        match self {
            AttrValue::IntList(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}

impl Display for AttrValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AttrValue::Null => write!(f, "null"),
            AttrValue::Int(v) => write!(f, "{}", v),
            AttrValue::Str(v) => write!(f, "{}", v),
            AttrValue::IntList(v) => {
                let items: Vec<String> = v.iter().map(|i| i.to_string()).collect();
                write!(f, "{}", items.join(" "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_scalar() {
        assert_eq!(Value::from_scalar(" 240 "), Value::Int(240));
        assert_eq!(Value::from_scalar("-3"), Value::Int(-3));
        assert_eq!(Value::from_scalar("148/240"), Value::Str("148/240".to_string()));
        assert_eq!(Value::from_scalar(""), Value::Str("".to_string()));
    }

    #[test]
    fn test_display() {
        let mut map = ValueMap::new();
        map.insert("imported".to_string(), Value::Int(5));
        map.insert("state".to_string(), Value::Null);
        assert_eq!(Value::Map(map).to_string(), "{imported: 5, state: null}");
        assert_eq!(AttrValue::IntList(vec![65002, 3356]).to_string(), "65002 3356");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_untagged() {
        let mut map = ValueMap::new();
        map.insert("received".to_string(), Value::Int(0));
        map.insert("filtered".to_string(), Value::Str("---".to_string()));
        map.insert("info".to_string(), Value::Null);
        assert_eq!(
            serde_json::to_string(&Value::Map(map)).unwrap(),
            r#"{"received":0,"filtered":"---","info":null}"#
        );
        assert_eq!(
            serde_json::to_string(&AttrValue::IntList(vec![1, 2])).unwrap(),
            "[1,2]"
        );
        assert_eq!(serde_json::to_string(&AttrValue::Null).unwrap(), "null");
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// String-keyed attribute map. Ordered so serialized events are stable.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// A single attribute value.
///
/// The variant set is closed so validation rules can be written against every
/// case. Untagged serde keeps the JSON form natural: `97232`, `"zap"`, `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Map(Attributes),
}

impl AttributeValue {
    /// Short name of the variant, used in validation messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Map(_) => "map",
        }
    }

    /// Number of scalar values held, counting into nested maps. An empty map
    /// still counts as one.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Map(m) => m.values().map(Self::leaf_count).sum::<usize>().max(1),
            _ => 1,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Parse a command-line style value: bool, then integer, then float,
    /// falling back to a string.
    pub fn parse_loose(raw: &str) -> Self {
        if let Ok(b) = raw.parse::<bool>() {
            return Self::Bool(b);
        }
        if let Ok(i) = raw.parse::<i64>() {
            return Self::Int(i);
        }
        if let Ok(u) = raw.parse::<u64>() {
            return Self::UInt(u);
        }
        match raw.parse::<f64>() {
            Ok(f) if f.is_finite() => Self::Float(f),
            _ => Self::String(raw.to_string()),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
            Self::Map(m) => {
                f.write_str("{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for AttributeValue {
    fn from(value: u32) -> Self {
        Self::UInt(u64::from(value))
    }
}

impl From<u64> for AttributeValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<usize> for AttributeValue {
    fn from(value: usize) -> Self {
        Self::UInt(value as u64)
    }
}

impl From<f32> for AttributeValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Attributes> for AttributeValue {
    fn from(value: Attributes) -> Self {
        Self::Map(value)
    }
}

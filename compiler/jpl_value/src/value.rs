//! The `Value` enum.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::compare::equals;
use crate::function::FunctionValue;
use crate::heap::Heap;

/// Object storage. Key order is not observable; anything that renders or
/// iterates an object sorts the keys first.
pub type Object = FxHashMap<String, Value>;

/// Largest integer an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Largest string (in bytes) or array an operation may build out of a
/// number operand.
pub const MAX_COLLECTION_LEN: usize = 1 << 24;

/// Runtime value.
///
/// Values are immutable. Structural changes go through the update library,
/// which copies a container at most once and otherwise shares it.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(Heap<String>),
    Array(Heap<Vec<Value>>),
    Object(Heap<Object>),
    Function(FunctionValue),
}

impl Value {
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Heap::new(s.into()))
    }

    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(items))
    }

    /// A shared list of values that is not (yet) an array value, such as
    /// the source row handed to [`apply_combinations`](crate::apply_combinations).
    #[inline]
    pub fn shared_items(items: Vec<Value>) -> Heap<Vec<Value>> {
        Heap::new(items)
    }

    #[inline]
    pub fn object(entries: Object) -> Self {
        Value::Object(Heap::new(entries))
    }

    #[inline]
    pub fn function(function: FunctionValue) -> Self {
        Value::Function(function)
    }

    /// An empty array.
    pub fn empty_array() -> Self {
        Value::array(Vec::new())
    }

    /// An empty object.
    pub fn empty_object() -> Self {
        Value::object(Object::default())
    }

    /// Name of the value's type as shown in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
        }
    }

    /// Everything except `null` and `false` is truthy, including `0`, `""`,
    /// `[]` and `{}`.
    #[inline]
    pub const fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Bool(false))
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionValue> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Object keys in ascending code point order.
    pub fn sorted_keys(object: &Object) -> Vec<&String> {
        let mut keys: Vec<&String> = object.keys().collect();
        keys.sort_unstable();
        keys
    }

    /// Render the value as compact JSON with sorted object keys.
    ///
    /// With `unescape_string`, a top-level string is returned as-is instead
    /// of as a quoted JSON string.
    pub fn stringify(&self, unescape_string: bool) -> String {
        match self {
            Value::String(s) if unescape_string => s.to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        equals(self, other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{:?}", &**s),
            Value::Array(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Object(entries) => f
                .debug_map()
                .entries(
                    Value::sorted_keys(entries)
                        .into_iter()
                        .map(|key| (key, &entries[key])),
                )
                .finish(),
            Value::Function(func) => write!(f, "{func:?}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// JSON rendering: sorted keys, integral numbers without a fraction,
/// non-finite numbers and functions as `null`.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null | Value::Function(_) => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) if !n.is_finite() => serializer.serialize_unit(),
            Value::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for key in Value::sorted_keys(entries) {
                    map.serialize_entry(key, &entries[key])?;
                }
                map.end()
            }
        }
    }
}

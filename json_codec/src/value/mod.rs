mod array;
mod number;
mod object;
mod string;

use std::fmt;

pub use array::Array;
pub use number::NUMBER_TOLERANCE;
pub use object::Object;
pub use string::JsonString;

pub(crate) use number::write_json as write_json_number;

use crate::{error::ValueError, utf8};

/// The six kinds of JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl JsonType {
    pub fn name(self) -> &'static str {
        match self {
            JsonType::Null => "null",
            JsonType::Boolean => "boolean",
            JsonType::Number => "number",
            JsonType::String => "string",
            JsonType::Array => "array",
            JsonType::Object => "object",
        }
    }

    pub(crate) fn with_article(self) -> &'static str {
        match self {
            JsonType::Null => "null",
            JsonType::Boolean => "a boolean",
            JsonType::Number => "a number",
            JsonType::String => "a string",
            JsonType::Array => "an array",
            JsonType::Object => "an object",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node in a JSON value tree.
///
/// `Clone` is cheap: strings and containers share their storage with the
/// clone, and a write through either handle copies first. Use
/// [`Value::deep_clone`] for a copy that shares nothing.
///
/// Equality is structural (see [`Value::equals`]), so `==` tolerates tiny
/// differences between numbers.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    String(JsonString),
    Array(Array),
    Object(Object),
}

impl Value {
    pub fn null() -> Self {
        Value::Null
    }

    pub fn boolean(value: bool) -> Self {
        Value::Boolean(value)
    }

    pub fn number(value: f64) -> Self {
        Value::Number(value)
    }

    pub fn string(value: impl Into<JsonString>) -> Self {
        Value::String(value.into())
    }

    /// Builds a string value from raw bytes, which must be valid UTF-8.
    pub fn string_from_bytes(bytes: &[u8]) -> Result<Self, ValueError> {
        JsonString::from_bytes(bytes).map(Value::String)
    }

    pub fn array() -> Self {
        Value::Array(Array::new())
    }

    pub fn object() -> Self {
        Value::Object(Object::new())
    }

    pub fn json_type(&self) -> JsonType {
        match self {
            Value::Null => JsonType::Null,
            Value::Boolean(_) => JsonType::Boolean,
            Value::Number(_) => JsonType::Number,
            Value::String(_) => JsonType::String,
            Value::Array(_) => JsonType::Array,
            Value::Object(_) => JsonType::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn boolean_value(&self) -> Result<bool, ValueError> {
        match self {
            Value::Boolean(value) => Ok(*value),
            _ => Err(self.type_error(JsonType::Boolean)),
        }
    }

    pub fn number_value(&self) -> Result<f64, ValueError> {
        match self {
            Value::Number(value) => Ok(*value),
            _ => Err(self.type_error(JsonType::Number)),
        }
    }

    /// The number truncated towards zero, saturating at the `i64` bounds.
    pub fn integer_value(&self) -> Result<i64, ValueError> {
        // `as` truncates and saturates, NaN becomes 0
        self.number_value().map(|value| value as i64)
    }

    pub fn string_value(&self) -> Result<&str, ValueError> {
        match self {
            Value::String(value) => Ok(value.as_str()),
            _ => Err(self.type_error(JsonType::String)),
        }
    }

    pub fn array_value(&self) -> Result<&Array, ValueError> {
        match self {
            Value::Array(array) => Ok(array),
            _ => Err(self.type_error(JsonType::Array)),
        }
    }

    pub fn array_value_mut(&mut self) -> Result<&mut Array, ValueError> {
        match self {
            Value::Array(array) => Ok(array),
            _ => Err(self.type_error(JsonType::Array)),
        }
    }

    pub fn object_value(&self) -> Result<&Object, ValueError> {
        match self {
            Value::Object(object) => Ok(object),
            _ => Err(self.type_error(JsonType::Object)),
        }
    }

    pub fn object_value_mut(&mut self) -> Result<&mut Object, ValueError> {
        match self {
            Value::Object(object) => Ok(object),
            _ => Err(self.type_error(JsonType::Object)),
        }
    }

    /// Structural deep equality.
    ///
    /// Numbers are equal when they differ by less than [`NUMBER_TOLERANCE`].
    /// Arrays compare element by element, objects key by key regardless of
    /// order.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => (a - b).abs() < NUMBER_TOLERANCE,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a.equals(b),
            (Value::Object(a), Value::Object(b)) => a.equals(b),
            _ => false,
        }
    }

    /// Copies the whole tree so that it shares no storage with `self`.
    pub fn deep_clone(&self) -> Self {
        match self {
            Value::Null => Value::Null,
            Value::Boolean(value) => Value::Boolean(*value),
            Value::Number(value) => Value::Number(*value),
            Value::String(value) => Value::String(value.deep_clone()),
            Value::Array(array) => Value::Array(array.deep_clone()),
            Value::Object(object) => Value::Object(object.deep_clone()),
        }
    }

    /// True if both values are containers or strings backed by the same storage.
    pub fn shares_storage_with(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a.ptr_eq(b),
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    fn type_error(&self, expected: JsonType) -> ValueError {
        ValueError::InvalidType {
            expected,
            found: self.json_type(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

/// Debug-oriented rendering; use [`crate::serialize`] for JSON output.
///
/// Non-integral numbers keep six significant digits.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(value) => f.write_str(if *value { "true" } else { "false" }),
            Value::Number(value) => number::write_general(f, *value),
            Value::String(value) => f.write_str(&utf8::escape(value)),
            Value::Array(array) => {
                f.write_str("[")?;
                for (i, item) in array.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(object) => {
                f.write_str("{")?;
                for (i, (key, value)) in object.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {value}", utf8::escape(key))?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        // Magnitudes above 2^53 lose precision
        Value::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value.into())
    }
}

impl From<JsonString> for Value {
    fn from(value: JsonString) -> Self {
        Value::String(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value.into())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

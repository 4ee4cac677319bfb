// Copyright (c) 2025 - Cowboy AI, Inc.
//! Loosely-Typed Input Values
//!
//! Inventory data often arrives untyped: a bus number may be an integer in one
//! source, a decimal string in another and a float in a spreadsheet export.
//! [`RawValue`] captures that input before validation so constructors can tell
//! an absent field from a zero one and a wrong kind of value from a malformed one.
//!
//! # Examples
//!
//! ```rust
//! use cim_typing::RawValue;
//!
//! assert_eq!(RawValue::from(26u8), RawValue::Int(26));
//! assert_eq!(RawValue::from("1a"), RawValue::Text("1a"));
//! assert_eq!(RawValue::from(None::<u32>), RawValue::Missing);
//! ```

use serde_json::Value;

/// An unvalidated input value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    /// Integral number
    Int(i128),
    /// Floating point number
    Float(f64),
    /// Text to be parsed
    Text(&'a str),
    /// Boolean flag
    Bool(bool),
    /// Value not provided
    Missing,
    /// Value of a kind no constructor accepts (arrays, objects, ...)
    Unsupported(&'static str),
}

impl RawValue<'_> {
    /// Human readable name of the input kind, used in type errors
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "string",
            Self::Bool(_) => "boolean",
            Self::Missing => "none",
            Self::Unsupported(name) => name,
        }
    }

    /// Check if the value was not provided
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for RawValue<'_> {
                fn from(value: $ty) -> Self {
                    Self::Int(value as i128)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for RawValue<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for RawValue<'_> {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<bool> for RawValue<'_> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<'a> From<&'a str> for RawValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for RawValue<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

impl<'a, T> From<Option<T>> for RawValue<'a>
where
    T: Into<RawValue<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

impl<'a> From<&'a Value> for RawValue<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::Bool(flag) => Self::Bool(*flag),
            Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    Self::Int(i128::from(int))
                } else if let Some(int) = number.as_u64() {
                    Self::Int(i128::from(int))
                } else {
                    Self::Float(number.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(text) => Self::Text(text.as_str()),
            Value::Array(_) => Self::Unsupported("array"),
            Value::Object(_) => Self::Unsupported("object"),
        }
    }
}

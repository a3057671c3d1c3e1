//! Dynamic value model and target type descriptors.
//!
//! `Value` is the runtime representation every converter consumes and
//! produces; `TypeKind` and `TypeDescriptor` name the conversion targets.

use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The scalar kinds a converter can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Boolean,
    Character,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    BigInteger,
    BigDecimal,
    Date,
    Calendar,
    String,
}

impl TypeKind {
    pub fn name(&self) -> &'static str {
        match self {
            TypeKind::Boolean => "boolean",
            TypeKind::Character => "character",
            TypeKind::Byte => "byte",
            TypeKind::Short => "short",
            TypeKind::Integer => "integer",
            TypeKind::Long => "long",
            TypeKind::Float => "float",
            TypeKind::Double => "double",
            TypeKind::BigInteger => "big-integer",
            TypeKind::BigDecimal => "big-decimal",
            TypeKind::Date => "date",
            TypeKind::Calendar => "calendar",
            TypeKind::String => "string",
        }
    }

    /// Whether this kind belongs to the numeric converter family.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TypeKind::Byte
                | TypeKind::Short
                | TypeKind::Integer
                | TypeKind::Long
                | TypeKind::Float
                | TypeKind::Double
                | TypeKind::BigInteger
                | TypeKind::BigDecimal
        )
    }

    /// Whether this kind has an entry in the default-transformer registry.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            TypeKind::Boolean
                | TypeKind::Character
                | TypeKind::Byte
                | TypeKind::Short
                | TypeKind::Integer
                | TypeKind::Long
                | TypeKind::Float
                | TypeKind::Double
        )
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A conversion target: a scalar kind or an array of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeDescriptor {
    Scalar(TypeKind),
    Array(TypeKind),
}

impl TypeDescriptor {
    /// The scalar kind this descriptor is built from.
    pub fn element_kind(&self) -> TypeKind {
        match self {
            TypeDescriptor::Scalar(kind) | TypeDescriptor::Array(kind) => *kind,
        }
    }
}

impl From<TypeKind> for TypeDescriptor {
    fn from(kind: TypeKind) -> Self {
        TypeDescriptor::Scalar(kind)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Scalar(kind) => f.write_str(kind.name()),
            TypeDescriptor::Array(kind) => write!(f, "array-of-{}", kind.name()),
        }
    }
}

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Boolean(bool),
    Character(char),
    Byte(i8),
    Short(i16),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    BigInteger(BigInt),
    BigDecimal(BigDecimal),
    Date(DateTime<Utc>),
    Calendar(DateTime<FixedOffset>),
    String(String),
    Array(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The scalar kind of this value, if it has one. `Null` and `Array`
    /// values carry no scalar kind.
    pub fn kind(&self) -> Option<TypeKind> {
        match self {
            Value::Null | Value::Array(_) => None,
            Value::Boolean(_) => Some(TypeKind::Boolean),
            Value::Character(_) => Some(TypeKind::Character),
            Value::Byte(_) => Some(TypeKind::Byte),
            Value::Short(_) => Some(TypeKind::Short),
            Value::Integer(_) => Some(TypeKind::Integer),
            Value::Long(_) => Some(TypeKind::Long),
            Value::Float(_) => Some(TypeKind::Float),
            Value::Double(_) => Some(TypeKind::Double),
            Value::BigInteger(_) => Some(TypeKind::BigInteger),
            Value::BigDecimal(_) => Some(TypeKind::BigDecimal),
            Value::Date(_) => Some(TypeKind::Date),
            Value::Calendar(_) => Some(TypeKind::Calendar),
            Value::String(_) => Some(TypeKind::String),
        }
    }

    /// Plain, locale-free stringification used by the string converter and
    /// by the plain (no pattern, no locale) formatting path.
    pub fn display_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Boolean(b) => b.to_string(),
            Value::Character(c) => c.to_string(),
            Value::Byte(n) => n.to_string(),
            Value::Short(n) => n.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Long(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::Double(n) => n.to_string(),
            Value::BigInteger(n) => n.to_string(),
            Value::BigDecimal(n) => n.to_string(),
            Value::Date(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
            Value::Calendar(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
            Value::String(s) => s.clone(),
            Value::Array(items) => {
                let parts: Vec<String> = items.iter().map(Value::display_string).collect();
                format!("[{}]", parts.join(", "))
            }
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Character(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The value of any bounded integral variant, widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Byte(n) => Some(i64::from(*n)),
            Value::Short(n) => Some(i64::from(*n)),
            Value::Integer(n) => Some(i64::from(*n)),
            Value::Long(n) => Some(*n),
            _ => None,
        }
    }

    /// The value of any floating variant, widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(f64::from(*n)),
            Value::Double(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Character(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Byte(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Short(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        Value::BigInteger(v)
    }
}

impl From<BigDecimal> for Value {
    fn from(v: BigDecimal) -> Self {
        Value::BigDecimal(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Date(v)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Value::Calendar(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

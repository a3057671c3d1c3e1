//! Default transformer registry.
//!
//! A constant table mapping each primitive kind to its canonical
//! string-to-value transformer, built on the converter family. The table is
//! a `const` slice of function pointers, so mutation is a compile-time
//! impossibility; lookups hand out `'static` references.

use crate::convert::{
    BooleanConverter, CharacterConverter, Converter, NumberConverter, NumericKind,
};
use crate::error::ConversionResult;
use crate::value::{TypeKind, Value};
use chrono::{DateTime, FixedOffset, Utc};

/// A string-to-value transformer for one primitive kind.
#[derive(Debug, Clone, Copy)]
pub struct Transformer {
    kind: TypeKind,
    apply: fn(&str) -> ConversionResult<Value>,
}

impl Transformer {
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn apply(&self, text: &str) -> ConversionResult<Value> {
        (self.apply)(text)
    }
}

fn to_boolean(text: &str) -> ConversionResult<Value> {
    BooleanConverter::new().convert(None, &Value::from(text))
}

fn to_character(text: &str) -> ConversionResult<Value> {
    CharacterConverter::new().convert(None, &Value::from(text))
}

fn to_byte(text: &str) -> ConversionResult<Value> {
    NumberConverter::new(NumericKind::Byte).convert(None, &Value::from(text))
}

fn to_short(text: &str) -> ConversionResult<Value> {
    NumberConverter::new(NumericKind::Short).convert(None, &Value::from(text))
}

fn to_integer(text: &str) -> ConversionResult<Value> {
    NumberConverter::new(NumericKind::Integer).convert(None, &Value::from(text))
}

fn to_long(text: &str) -> ConversionResult<Value> {
    NumberConverter::new(NumericKind::Long).convert(None, &Value::from(text))
}

fn to_float(text: &str) -> ConversionResult<Value> {
    NumberConverter::new(NumericKind::Float).convert(None, &Value::from(text))
}

fn to_double(text: &str) -> ConversionResult<Value> {
    NumberConverter::new(NumericKind::Double).convert(None, &Value::from(text))
}

/// One entry per primitive kind, nothing else.
pub const DEFAULT_TRANSFORMERS: &[Transformer] = &[
    Transformer { kind: TypeKind::Boolean, apply: to_boolean },
    Transformer { kind: TypeKind::Character, apply: to_character },
    Transformer { kind: TypeKind::Byte, apply: to_byte },
    Transformer { kind: TypeKind::Short, apply: to_short },
    Transformer { kind: TypeKind::Integer, apply: to_integer },
    Transformer { kind: TypeKind::Long, apply: to_long },
    Transformer { kind: TypeKind::Float, apply: to_float },
    Transformer { kind: TypeKind::Double, apply: to_double },
];

/// The canonical transformer for a primitive kind, `None` otherwise.
pub fn default_transformer(kind: TypeKind) -> Option<&'static Transformer> {
    DEFAULT_TRANSFORMERS.iter().find(|t| t.kind == kind)
}

/// The zero/default value a writable property resets to: zero for the
/// primitive kinds, null for the object kinds.
pub fn zero_value(kind: TypeKind) -> Value {
    match kind {
        TypeKind::Boolean => Value::Boolean(false),
        TypeKind::Character => Value::Character('\0'),
        TypeKind::Byte => Value::Byte(0),
        TypeKind::Short => Value::Short(0),
        TypeKind::Integer => Value::Integer(0),
        TypeKind::Long => Value::Long(0),
        TypeKind::Float => Value::Float(0.0),
        TypeKind::Double => Value::Double(0.0),
        TypeKind::BigInteger
        | TypeKind::BigDecimal
        | TypeKind::String
        | TypeKind::Date
        | TypeKind::Calendar => Value::Null,
    }
}

// keep the epoch helpers close to zero_value for adapters that prefer a
// concrete temporal default over null
pub fn epoch_date() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

pub fn epoch_calendar() -> DateTime<FixedOffset> {
    DateTime::<Utc>::UNIX_EPOCH.fixed_offset()
}

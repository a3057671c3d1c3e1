//! Numeric converter: locale/pattern-aware string<->number conversion with
//! range checking against the destination kind's domain.

use crate::convert::{Converter, ConverterConfig};
use crate::error::{ConversionError, ConversionResult};
use crate::format;
use crate::value::{TypeKind, Value};
use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::str::FromStr;

/// The numeric kinds, with their domain bounds where bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    BigInteger,
    BigDecimal,
}

impl NumericKind {
    pub fn type_kind(&self) -> TypeKind {
        match self {
            NumericKind::Byte => TypeKind::Byte,
            NumericKind::Short => TypeKind::Short,
            NumericKind::Integer => TypeKind::Integer,
            NumericKind::Long => TypeKind::Long,
            NumericKind::Float => TypeKind::Float,
            NumericKind::Double => TypeKind::Double,
            NumericKind::BigInteger => TypeKind::BigInteger,
            NumericKind::BigDecimal => TypeKind::BigDecimal,
        }
    }

    pub fn from_type_kind(kind: TypeKind) -> Option<Self> {
        match kind {
            TypeKind::Byte => Some(NumericKind::Byte),
            TypeKind::Short => Some(NumericKind::Short),
            TypeKind::Integer => Some(NumericKind::Integer),
            TypeKind::Long => Some(NumericKind::Long),
            TypeKind::Float => Some(NumericKind::Float),
            TypeKind::Double => Some(NumericKind::Double),
            TypeKind::BigInteger => Some(NumericKind::BigInteger),
            TypeKind::BigDecimal => Some(NumericKind::BigDecimal),
            _ => None,
        }
    }

    /// Domain bounds of the bounded integral kinds.
    fn bounds(&self) -> Option<(i128, i128)> {
        match self {
            NumericKind::Byte => Some((i128::from(i8::MIN), i128::from(i8::MAX))),
            NumericKind::Short => Some((i128::from(i16::MIN), i128::from(i16::MAX))),
            NumericKind::Integer => Some((i128::from(i32::MIN), i128::from(i32::MAX))),
            NumericKind::Long => Some((i128::from(i64::MIN), i128::from(i64::MAX))),
            _ => None,
        }
    }

    /// Build a value of this kind from an integral magnitude, range-checked.
    fn from_i128(&self, n: i128) -> ConversionResult<Value> {
        if let Some((min, max)) = self.bounds() {
            if n < min || n > max {
                return Err(ConversionError::out_of_range(
                    self.type_kind().into(),
                    n,
                    min,
                    max,
                ));
            }
        }
        Ok(match self {
            NumericKind::Byte => Value::Byte(n as i8),
            NumericKind::Short => Value::Short(n as i16),
            NumericKind::Integer => Value::Integer(n as i32),
            NumericKind::Long => Value::Long(n as i64),
            NumericKind::Float => Value::Float(n as f32),
            NumericKind::Double => Value::Double(n as f64),
            NumericKind::BigInteger => Value::BigInteger(BigInt::from(n)),
            NumericKind::BigDecimal => Value::BigDecimal(BigDecimal::from(BigInt::from(n))),
        })
    }

    /// Build a value of this kind from a float, truncating the fraction for
    /// integral kinds, range-checked.
    fn from_f64(&self, x: f64) -> ConversionResult<Value> {
        let target = self.type_kind().into();
        if x.is_nan() {
            return Err(ConversionError::unparseable_text(target, "NaN"));
        }
        match self {
            NumericKind::Float => Ok(Value::Float(x as f32)),
            NumericKind::Double => Ok(Value::Double(x)),
            NumericKind::BigDecimal => BigDecimal::try_from(x)
                .map(Value::BigDecimal)
                .map_err(|e| ConversionError::unparseable_text(target, &x.to_string()).with_cause(e.into())),
            NumericKind::BigInteger => {
                let decimal = BigDecimal::try_from(x).map_err(|e| {
                    ConversionError::unparseable_text(target, &x.to_string()).with_cause(e.into())
                })?;
                Ok(Value::BigInteger(integer_part(&decimal)))
            }
            _ => {
                if !x.is_finite() {
                    return Err(ConversionError::unparseable_text(target, &x.to_string()));
                }
                // saturating cast: anything beyond i128 fails the bounds check
                self.from_i128(x.trunc() as i128)
            }
        }
    }

    fn from_bigint(&self, n: &BigInt) -> ConversionResult<Value> {
        match self {
            NumericKind::BigInteger => Ok(Value::BigInteger(n.clone())),
            NumericKind::BigDecimal => Ok(Value::BigDecimal(BigDecimal::from(n.clone()))),
            NumericKind::Float | NumericKind::Double => {
                let x = n.to_f64().ok_or_else(|| {
                    ConversionError::unparseable_text(self.type_kind().into(), &n.to_string())
                })?;
                self.from_f64(x)
            }
            _ => match n.to_i128() {
                Some(v) => self.from_i128(v),
                None => {
                    // out of i128 range is necessarily out of every bounded range
                    let (min, max) = self.bounds().unwrap_or((i128::MIN, i128::MAX));
                    Err(ConversionError::out_of_range(self.type_kind().into(), n, min, max))
                }
            },
        }
    }

    /// Build a value of this kind from a decimal, truncating the fraction
    /// for integral kinds, range-checked.
    fn from_decimal(&self, d: &BigDecimal) -> ConversionResult<Value> {
        match self {
            NumericKind::BigDecimal => Ok(Value::BigDecimal(d.clone())),
            NumericKind::Float | NumericKind::Double => {
                let x = d.to_f64().ok_or_else(|| {
                    ConversionError::unparseable_text(self.type_kind().into(), &d.to_string())
                })?;
                self.from_f64(x)
            }
            _ => self.from_bigint(&integer_part(d)),
        }
    }

    /// Plain language-level parse for this kind.
    fn parse_plain(&self, text: &str) -> ConversionResult<Value> {
        let target = self.type_kind().into();
        let wrap = |e: anyhow::Error| ConversionError::unparseable_text(target, text).with_cause(e);
        match self {
            NumericKind::Byte => text.parse::<i8>().map(Value::Byte).map_err(|e| wrap(e.into())),
            NumericKind::Short => text.parse::<i16>().map(Value::Short).map_err(|e| wrap(e.into())),
            NumericKind::Integer => text.parse::<i32>().map(Value::Integer).map_err(|e| wrap(e.into())),
            NumericKind::Long => text.parse::<i64>().map(Value::Long).map_err(|e| wrap(e.into())),
            NumericKind::Float => text.parse::<f32>().map(Value::Float).map_err(|e| wrap(e.into())),
            NumericKind::Double => text.parse::<f64>().map(Value::Double).map_err(|e| wrap(e.into())),
            NumericKind::BigInteger => BigInt::from_str(text)
                .map(Value::BigInteger)
                .map_err(|e| wrap(e.into())),
            NumericKind::BigDecimal => BigDecimal::from_str(text)
                .map(Value::BigDecimal)
                .map_err(|e| wrap(e.into())),
        }
    }
}

/// The integer part of a decimal, truncated toward zero.
fn integer_part(d: &BigDecimal) -> BigInt {
    let (digits, _) = d.with_scale_round(0, RoundingMode::Down).into_bigint_and_exponent();
    digits
}

/// Converter for the numeric target kinds.
///
/// String input follows the pattern / locale / plain precedence; numeric,
/// boolean, date and calendar inputs are narrowed through the kind's range
/// check; array input participates only through its first element.
#[derive(Debug, Clone)]
pub struct NumberConverter {
    kind: NumericKind,
    config: ConverterConfig,
}

impl NumberConverter {
    pub fn new(kind: NumericKind) -> Self {
        Self::with_config(kind, ConverterConfig::new())
    }

    pub fn with_config(kind: NumericKind, config: ConverterConfig) -> Self {
        Self { kind, config }
    }

    /// A converter that falls back to `default` on any failure.
    pub fn with_default(kind: NumericKind, default: Value) -> Self {
        Self::with_config(kind, ConverterConfig::new().with_default(default))
    }

    pub fn numeric_kind(&self) -> NumericKind {
        self.kind
    }

    fn parse_text(&self, numeric: NumericKind, text: &str) -> ConversionResult<Value> {
        let target = numeric.type_kind().into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ConversionError::unparseable_text(target, text));
        }
        if let Some(pattern) = self.config.pattern() {
            let format = format::global_cache().pattern_format(pattern, self.config.effective_locale())?;
            let parsed = format
                .parse(trimmed)
                .ok_or_else(|| ConversionError::unparseable_text(target, trimmed))?;
            numeric.from_decimal(&parsed)
        } else if self.config.use_locale_format() {
            let format = format::global_cache().locale_format(self.config.effective_locale());
            let parsed = format
                .parse(trimmed)
                .ok_or_else(|| ConversionError::unparseable_text(target, trimmed))?;
            numeric.from_decimal(&parsed)
        } else {
            numeric.parse_plain(trimmed)
        }
    }
}

impl Converter for NumberConverter {
    fn name(&self) -> &'static str {
        "number"
    }

    fn config(&self) -> &ConverterConfig {
        &self.config
    }

    fn default_kind(&self) -> TypeKind {
        self.kind.type_kind()
    }

    fn supports(&self, kind: TypeKind) -> bool {
        kind.is_numeric()
    }

    fn to_kind(&self, kind: TypeKind, value: &Value) -> ConversionResult<Value> {
        let numeric = NumericKind::from_type_kind(kind)
            .ok_or_else(|| ConversionError::unsupported_target(kind.into(), self.name()))?;
        match value {
            Value::Array(items) => match items.first() {
                None => Err(ConversionError::EmptyArray { target: kind.into() }),
                Some(first) => self.convert_scalar(kind, first),
            },
            Value::Boolean(b) => numeric.from_i128(i128::from(*b)),
            Value::Byte(n) => numeric.from_i128(i128::from(*n)),
            Value::Short(n) => numeric.from_i128(i128::from(*n)),
            Value::Integer(n) => numeric.from_i128(i128::from(*n)),
            Value::Long(n) => numeric.from_i128(i128::from(*n)),
            Value::Float(n) => numeric.from_f64(f64::from(*n)),
            Value::Double(n) => numeric.from_f64(*n),
            Value::BigInteger(n) => numeric.from_bigint(n),
            Value::BigDecimal(n) => numeric.from_decimal(n),
            Value::Date(dt) => numeric.from_i128(i128::from(dt.timestamp_millis())),
            Value::Calendar(dt) => numeric.from_i128(i128::from(dt.timestamp_millis())),
            other => self.parse_text(numeric, &other.display_string()),
        }
    }

    fn to_text(&self, value: &Value) -> ConversionResult<String> {
        if value.kind().is_some_and(|k| k.is_numeric()) {
            if let Some(pattern) = self.config.pattern() {
                let format =
                    format::global_cache().pattern_format(pattern, self.config.effective_locale())?;
                if let Some(text) = format.format_value(value) {
                    return Ok(text);
                }
            } else if self.config.use_locale_format() {
                let format = format::global_cache().locale_format(self.config.effective_locale());
                if let Some(text) = format.format_value(value) {
                    return Ok(text);
                }
            }
        }
        Ok(value.display_string())
    }
}

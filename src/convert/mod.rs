//! The polymorphic converter family.
//!
//! `Converter` supplies the conversion template: null handling, default
//! fallback, the identity fast path, and array-target expansion all live in
//! the provided `convert` method, while each implementation contributes two
//! hooks, `to_kind` for type-specific coercion and `to_text` for
//! stringification.

pub mod config;
pub mod datetime;
pub mod number;
pub mod simple;

pub use config::{ConverterConfig, DefaultPolicy};
pub use datetime::{DateTimeConverter, TemporalKind};
pub use number::{NumberConverter, NumericKind};
pub use simple::{BooleanConverter, CharacterConverter, StringConverter};

use crate::error::{ConversionError, ConversionResult};
use crate::value::{TypeDescriptor, TypeKind, Value};

/// A policy object mapping raw values to a target type.
pub trait Converter {
    /// Short name used in failure messages.
    fn name(&self) -> &'static str;

    fn config(&self) -> &ConverterConfig;

    /// The intrinsic target kind used when none is specified.
    fn default_kind(&self) -> TypeKind;

    /// Whether this converter can produce the given kind.
    fn supports(&self, kind: TypeKind) -> bool;

    /// Type-specific coercion hook. `value` is never null here.
    fn to_kind(&self, kind: TypeKind, value: &Value) -> ConversionResult<Value>;

    /// Stringification hook. `value` is never null here.
    fn to_text(&self, value: &Value) -> ConversionResult<String>;

    /// Convert `value` to `target`, or to the intrinsic default type when
    /// `target` is `None`. Failures yield the configured default value when
    /// one was set, and propagate otherwise.
    fn convert(&self, target: Option<TypeDescriptor>, value: &Value) -> ConversionResult<Value> {
        let target = target.unwrap_or_else(|| TypeDescriptor::Scalar(self.default_kind()));
        if value.is_null() {
            return match self.config().default_value().resolve() {
                Some(fallback) => Ok(fallback),
                None => Err(ConversionError::missing_value(target)),
            };
        }
        match self.convert_present(target, value) {
            Ok(converted) => Ok(converted),
            Err(err) => match self.config().default_value().resolve() {
                Some(fallback) => Ok(fallback),
                None => Err(err),
            },
        }
    }

    /// Dispatch a non-null value to the scalar or array path.
    fn convert_present(&self, target: TypeDescriptor, value: &Value) -> ConversionResult<Value> {
        match target {
            TypeDescriptor::Scalar(kind) => self.convert_scalar(kind, value),
            TypeDescriptor::Array(kind) => match value {
                Value::Array(items) => {
                    let converted: ConversionResult<Vec<Value>> = items
                        .iter()
                        .map(|item| self.convert_scalar(kind, item))
                        .collect();
                    Ok(Value::Array(converted?))
                }
                scalar => Ok(Value::Array(vec![self.convert_scalar(kind, scalar)?])),
            },
        }
    }

    fn convert_scalar(&self, kind: TypeKind, value: &Value) -> ConversionResult<Value> {
        if value.is_null() {
            return Err(ConversionError::missing_value(kind.into()));
        }
        // string targets always go through to_text for consistent formatting
        if kind == TypeKind::String {
            return Ok(Value::String(self.to_text(value)?));
        }
        if value.kind() == Some(kind) {
            return Ok(value.clone());
        }
        if !self.supports(kind) {
            return Err(ConversionError::unsupported_target(kind.into(), self.name()));
        }
        self.to_kind(kind, value)
    }
}

/// The stock converter for a target kind, with default configuration.
pub fn converter_for(kind: TypeKind) -> Box<dyn Converter> {
    converter_with_config(kind, ConverterConfig::new())
}

/// The stock converter for a target kind, with an explicit configuration.
pub fn converter_with_config(kind: TypeKind, config: ConverterConfig) -> Box<dyn Converter> {
    match kind {
        TypeKind::Boolean => Box::new(BooleanConverter::with_config(config)),
        TypeKind::Character => Box::new(CharacterConverter::with_config(config)),
        TypeKind::String => Box::new(StringConverter::with_config(config)),
        TypeKind::Date => Box::new(DateTimeConverter::with_config(TemporalKind::Date, config)),
        TypeKind::Calendar => Box::new(DateTimeConverter::with_config(TemporalKind::Calendar, config)),
        TypeKind::Byte => Box::new(NumberConverter::with_config(NumericKind::Byte, config)),
        TypeKind::Short => Box::new(NumberConverter::with_config(NumericKind::Short, config)),
        TypeKind::Integer => Box::new(NumberConverter::with_config(NumericKind::Integer, config)),
        TypeKind::Long => Box::new(NumberConverter::with_config(NumericKind::Long, config)),
        TypeKind::Float => Box::new(NumberConverter::with_config(NumericKind::Float, config)),
        TypeKind::Double => Box::new(NumberConverter::with_config(NumericKind::Double, config)),
        TypeKind::BigInteger => {
            Box::new(NumberConverter::with_config(NumericKind::BigInteger, config))
        }
        TypeKind::BigDecimal => {
            Box::new(NumberConverter::with_config(NumericKind::BigDecimal, config))
        }
    }
}

//! Dynamic type conversion with locale- and pattern-aware formatting.
//!
//! Given an arbitrary runtime [`Value`] and a target kind, the converter
//! family produces an equivalent value of that kind, or a configured
//! fallback. The property module exposes a structured record as a
//! fixed-key associative view whose writes coerce through the same
//! converter family.

pub mod convert;
pub mod error;
pub mod format;
pub mod property;
pub mod value;

// Re-export commonly used types
pub use convert::{
    converter_for, converter_with_config, BooleanConverter, CharacterConverter, Converter,
    ConverterConfig, DateTimeConverter, DefaultPolicy, NumberConverter, NumericKind,
    StringConverter, TemporalKind,
};
pub use error::{ConversionError, ConversionResult, MappingError, MappingResult};
pub use format::{DecimalFormat, FormatCache, Locale};
pub use property::{PropertyMap, PropertySpec, Record, Transformer};
pub use value::{TypeDescriptor, TypeKind, Value};

/// Convert a value to a target type using that kind's stock converter.
pub fn convert_value(target: TypeDescriptor, value: &Value) -> ConversionResult<Value> {
    converter_for(target.element_kind()).convert(Some(target), value)
}

/// Convert with an explicit configuration (default value, pattern, locale).
pub fn convert_value_with_config(
    target: TypeDescriptor,
    value: &Value,
    config: ConverterConfig,
) -> ConversionResult<Value> {
    converter_with_config(target.element_kind(), config).convert(Some(target), value)
}

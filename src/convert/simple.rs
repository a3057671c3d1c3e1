//! The simple converters: character, boolean and string coercions.

use crate::convert::{Converter, ConverterConfig};
use crate::error::{ConversionError, ConversionResult};
use crate::value::{TypeKind, Value};

/// Converter for the character kind: takes the first character of the
/// stringified input.
#[derive(Debug, Clone, Default)]
pub struct CharacterConverter {
    config: ConverterConfig,
}

impl CharacterConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ConverterConfig) -> Self {
        Self { config }
    }
}

impl Converter for CharacterConverter {
    fn name(&self) -> &'static str {
        "character"
    }

    fn config(&self) -> &ConverterConfig {
        &self.config
    }

    fn default_kind(&self) -> TypeKind {
        TypeKind::Character
    }

    fn supports(&self, kind: TypeKind) -> bool {
        kind == TypeKind::Character
    }

    fn to_kind(&self, kind: TypeKind, value: &Value) -> ConversionResult<Value> {
        let text = value.display_string();
        match text.chars().next() {
            Some(c) => Ok(Value::Character(c)),
            None => Err(ConversionError::unparseable(kind.into(), value)),
        }
    }

    fn to_text(&self, value: &Value) -> ConversionResult<String> {
        let text = value.display_string();
        Ok(text.chars().next().map(String::from).unwrap_or_default())
    }
}

/// Lexical forms accepted as true / false, case-insensitive.
const TRUE_FORMS: &[&str] = &["true", "yes", "y", "on", "1"];
const FALSE_FORMS: &[&str] = &["false", "no", "n", "off", "0"];

/// Converter for the boolean kind.
#[derive(Debug, Clone, Default)]
pub struct BooleanConverter {
    config: ConverterConfig,
}

impl BooleanConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ConverterConfig) -> Self {
        Self { config }
    }
}

impl Converter for BooleanConverter {
    fn name(&self) -> &'static str {
        "boolean"
    }

    fn config(&self) -> &ConverterConfig {
        &self.config
    }

    fn default_kind(&self) -> TypeKind {
        TypeKind::Boolean
    }

    fn supports(&self, kind: TypeKind) -> bool {
        kind == TypeKind::Boolean
    }

    fn to_kind(&self, kind: TypeKind, value: &Value) -> ConversionResult<Value> {
        if let Some(n) = value.as_i64() {
            return Ok(Value::Boolean(n != 0));
        }
        if let Some(x) = value.as_f64() {
            return Ok(Value::Boolean(x != 0.0));
        }
        let text = value.display_string().to_ascii_lowercase();
        if TRUE_FORMS.contains(&text.as_str()) {
            Ok(Value::Boolean(true))
        } else if FALSE_FORMS.contains(&text.as_str()) {
            Ok(Value::Boolean(false))
        } else {
            Err(ConversionError::unparseable(kind.into(), value))
        }
    }

    fn to_text(&self, value: &Value) -> ConversionResult<String> {
        Ok(value.display_string())
    }
}

/// Converter for the string kind; every input stringifies.
#[derive(Debug, Clone, Default)]
pub struct StringConverter {
    config: ConverterConfig,
}

impl StringConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ConverterConfig) -> Self {
        Self { config }
    }
}

impl Converter for StringConverter {
    fn name(&self) -> &'static str {
        "string"
    }

    fn config(&self) -> &ConverterConfig {
        &self.config
    }

    fn default_kind(&self) -> TypeKind {
        TypeKind::String
    }

    fn supports(&self, kind: TypeKind) -> bool {
        kind == TypeKind::String
    }

    fn to_kind(&self, kind: TypeKind, _value: &Value) -> ConversionResult<Value> {
        // string targets are resolved by the template through to_text;
        // any other kind is out of this converter's reach
        Err(ConversionError::unsupported_target(kind.into(), self.name()))
    }

    fn to_text(&self, value: &Value) -> ConversionResult<String> {
        Ok(value.display_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_takes_first_char() {
        let converter = CharacterConverter::new();
        assert_eq!(
            converter.convert(None, &Value::from("BCD")).unwrap(),
            Value::Character('B')
        );
        assert!(converter.convert(None, &Value::from("")).is_err());
    }

    #[test]
    fn test_character_to_string_is_first_char_or_empty() {
        let converter = CharacterConverter::new();
        let target = Some(TypeKind::String.into());
        assert_eq!(
            converter.convert(target, &Value::from("abc")).unwrap(),
            Value::from("a")
        );
        assert_eq!(
            converter.convert(target, &Value::from("")).unwrap(),
            Value::from("")
        );
    }

    #[test]
    fn test_boolean_lexical_forms() {
        let converter = BooleanConverter::new();
        for form in ["true", "YES", "y", "On", "1"] {
            assert_eq!(
                converter.convert(None, &Value::from(form)).unwrap(),
                Value::Boolean(true),
                "form {:?}",
                form
            );
        }
        for form in ["false", "NO", "n", "Off", "0"] {
            assert_eq!(
                converter.convert(None, &Value::from(form)).unwrap(),
                Value::Boolean(false),
                "form {:?}",
                form
            );
        }
        assert!(converter.convert(None, &Value::from("maybe")).is_err());
    }

    #[test]
    fn test_boolean_from_numeric_is_nonzero() {
        let converter = BooleanConverter::new();
        assert_eq!(
            converter.convert(None, &Value::Integer(7)).unwrap(),
            Value::Boolean(true)
        );
        assert_eq!(
            converter.convert(None, &Value::Double(2.5)).unwrap(),
            Value::Boolean(true)
        );
        assert_eq!(
            converter.convert(None, &Value::Float(0.0)).unwrap(),
            Value::Boolean(false)
        );
        assert_eq!(
            converter.convert(None, &Value::Double(0.0)).unwrap(),
            Value::Boolean(false)
        );
    }

    #[test]
    fn test_string_converter_stringifies_anything() {
        let converter = StringConverter::new();
        assert_eq!(
            converter.convert(None, &Value::Integer(42)).unwrap(),
            Value::from("42")
        );
        // a string target cannot become a number through this converter
        assert!(converter
            .convert(Some(TypeKind::Integer.into()), &Value::from("42"))
            .is_err());
    }
}

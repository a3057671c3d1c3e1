//! Converter configuration options.

use crate::format::Locale;
use crate::value::Value;

/// Default-value policy: distinguishes "no default configured" from
/// "default configured as null" from "default configured as a value".
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DefaultPolicy {
    /// No default configured; conversion failures propagate.
    #[default]
    Unset,
    /// Null configured as the default; failures yield `Value::Null`.
    Null,
    /// A concrete default; failures yield this value.
    Value(Value),
}

impl DefaultPolicy {
    pub fn is_set(&self) -> bool {
        !matches!(self, DefaultPolicy::Unset)
    }

    /// The fallback value, if any default was configured.
    pub fn resolve(&self) -> Option<Value> {
        match self {
            DefaultPolicy::Unset => None,
            DefaultPolicy::Null => Some(Value::Null),
            DefaultPolicy::Value(v) => Some(v.clone()),
        }
    }
}

/// Options shared by every converter, set at construction.
///
/// Precedence of the formatting paths: an explicit pattern wins over
/// locale-default formatting, which is applied only when
/// `use_locale_format` is enabled; otherwise the plain language-level
/// parse/format is used. Configure fully before first use; converters are
/// pure functions of their configuration afterward.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConverterConfig {
    pub(crate) default_value: DefaultPolicy,
    pub(crate) pattern: Option<String>,
    pub(crate) locale: Option<Locale>,
    pub(crate) use_locale_format: bool,
}

impl ConverterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coerce conversion failures into this value instead of failing.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = match value {
            Value::Null => DefaultPolicy::Null,
            other => DefaultPolicy::Value(other),
        };
        self
    }

    /// Set a format pattern applied to string<->value conversions.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Set the locale governing separators and digit grouping.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Toggle default-locale formatting absent an explicit pattern.
    pub fn with_locale_format(mut self, enabled: bool) -> Self {
        self.use_locale_format = enabled;
        self
    }

    pub fn default_value(&self) -> &DefaultPolicy {
        &self.default_value
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn locale(&self) -> Option<Locale> {
        self.locale
    }

    pub fn use_locale_format(&self) -> bool {
        self.use_locale_format
    }

    /// The configured locale, or the process default.
    pub fn effective_locale(&self) -> Locale {
        self.locale.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_three_states() {
        assert_eq!(DefaultPolicy::Unset.resolve(), None);
        assert_eq!(DefaultPolicy::Null.resolve(), Some(Value::Null));
        assert_eq!(
            DefaultPolicy::Value(Value::Integer(-1)).resolve(),
            Some(Value::Integer(-1))
        );
    }

    #[test]
    fn test_null_default_is_distinct_from_unset() {
        let unset = ConverterConfig::new();
        let tolerant = ConverterConfig::new().with_default(Value::Null);
        assert!(!unset.default_value().is_set());
        assert!(tolerant.default_value().is_set());
    }

    #[test]
    fn test_builder() {
        let config = ConverterConfig::new()
            .with_pattern("#,##0.0")
            .with_locale(Locale::DeDe)
            .with_locale_format(true);
        assert_eq!(config.pattern(), Some("#,##0.0"));
        assert_eq!(config.effective_locale(), Locale::DeDe);
        assert!(config.use_locale_format());
    }

    #[test]
    fn test_effective_locale_falls_back() {
        assert_eq!(ConverterConfig::new().effective_locale(), Locale::EnUs);
    }
}

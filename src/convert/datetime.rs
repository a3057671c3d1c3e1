//! Temporal converter for the date and calendar kinds.
//!
//! A date is an instant (UTC); a calendar is an instant paired with a fixed
//! offset. Conversion between the two wraps or unwraps the offset; numeric
//! input is taken as epoch milliseconds; string input is parsed with the
//! configured chrono pattern, the locale's default date pattern, or the
//! plain ISO-8601 forms, in that order of precedence.

use crate::convert::{Converter, ConverterConfig};
use crate::error::{ConversionError, ConversionResult};
use crate::value::{TypeKind, Value};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalKind {
    Date,
    Calendar,
}

impl TemporalKind {
    pub fn type_kind(&self) -> TypeKind {
        match self {
            TemporalKind::Date => TypeKind::Date,
            TemporalKind::Calendar => TypeKind::Calendar,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DateTimeConverter {
    kind: TemporalKind,
    config: ConverterConfig,
}

impl DateTimeConverter {
    pub fn date() -> Self {
        Self::with_config(TemporalKind::Date, ConverterConfig::new())
    }

    pub fn calendar() -> Self {
        Self::with_config(TemporalKind::Calendar, ConverterConfig::new())
    }

    pub fn with_config(kind: TemporalKind, config: ConverterConfig) -> Self {
        Self { kind, config }
    }

    pub fn temporal_kind(&self) -> TemporalKind {
        self.kind
    }

    fn from_millis(&self, kind: TypeKind, millis: i64) -> ConversionResult<Value> {
        let instant = DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
            ConversionError::unparseable_text(kind.into(), &millis.to_string())
        })?;
        Ok(match kind {
            TypeKind::Calendar => Value::Calendar(instant.fixed_offset()),
            _ => Value::Date(instant),
        })
    }

    fn parse_text(&self, kind: TypeKind, text: &str) -> ConversionResult<Value> {
        let target = kind.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ConversionError::unparseable_text(target, text));
        }
        let instant = if let Some(pattern) = self.config.pattern() {
            parse_with_pattern(trimmed, pattern)
        } else if self.config.use_locale_format() {
            parse_with_pattern(trimmed, self.config.effective_locale().date_pattern())
        } else {
            parse_plain(trimmed)
        }
        .ok_or_else(|| ConversionError::unparseable_text(target, trimmed))?;
        Ok(match kind {
            TypeKind::Calendar => Value::Calendar(instant.fixed_offset()),
            _ => Value::Date(instant),
        })
    }
}

/// Format through pre-checked strftime items; `DelayedFormat` panics on
/// display of a malformed pattern, so a bad specifier must be caught first.
fn format_checked(dt: &DateTime<Utc>, pattern: &str) -> ConversionResult<String> {
    let items: Vec<Item> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(ConversionError::invalid_pattern(
            pattern,
            "unrecognized strftime specifier",
        ));
    }
    Ok(dt.format_with_items(items.into_iter()).to_string())
}

fn parse_with_pattern(text: &str, pattern: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, pattern) {
        return Some(dt.and_utc());
    }
    // date-only patterns carry no time fields
    let date = NaiveDate::parse_from_str(text, pattern).ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

fn parse_plain(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

impl Converter for DateTimeConverter {
    fn name(&self) -> &'static str {
        "date-time"
    }

    fn config(&self) -> &ConverterConfig {
        &self.config
    }

    fn default_kind(&self) -> TypeKind {
        self.kind.type_kind()
    }

    fn supports(&self, kind: TypeKind) -> bool {
        matches!(kind, TypeKind::Date | TypeKind::Calendar)
    }

    fn to_kind(&self, kind: TypeKind, value: &Value) -> ConversionResult<Value> {
        match value {
            Value::Date(dt) => Ok(match kind {
                TypeKind::Calendar => Value::Calendar(dt.fixed_offset()),
                _ => Value::Date(*dt),
            }),
            Value::Calendar(dt) => Ok(match kind {
                TypeKind::Date => Value::Date(dt.with_timezone(&Utc)),
                _ => Value::Calendar(*dt),
            }),
            Value::Integer(n) => self.from_millis(kind, i64::from(*n)),
            Value::Long(n) => self.from_millis(kind, *n),
            Value::Array(items) => match items.first() {
                None => Err(ConversionError::EmptyArray { target: kind.into() }),
                Some(first) => self.convert_scalar(kind, first),
            },
            other => self.parse_text(kind, &other.display_string()),
        }
    }

    fn to_text(&self, value: &Value) -> ConversionResult<String> {
        let instant: Option<DateTime<Utc>> = match value {
            Value::Date(dt) => Some(*dt),
            Value::Calendar(dt) => Some(dt.with_timezone(&Utc)),
            _ => None,
        };
        match instant {
            Some(dt) => {
                if let Some(pattern) = self.config.pattern() {
                    format_checked(&dt, pattern)
                } else if self.config.use_locale_format() {
                    Ok(dt
                        .format(self.config.effective_locale().date_pattern())
                        .to_string())
                } else {
                    Ok(dt.to_rfc3339_opts(SecondsFormat::Millis, true))
                }
            }
            None => Ok(value.display_string()),
        }
    }
}

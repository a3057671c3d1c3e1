//! Pattern-driven decimal formatting and parsing.
//!
//! A `DecimalFormat` is compiled from a pattern of the form
//! `positive-subpattern[;negative-subpattern]`, where a subpattern is a
//! literal prefix, a digit section built from `0`, `#`, `,` and `.`, and a
//! literal suffix (for example `"[0,0.0];(0,0.0)"` or `"#,##0.##"`). The
//! negative subpattern contributes only its affixes; the digit section is
//! always taken from the positive subpattern. Quoted literals are not
//! supported.
//!
//! Parsing is strict about full consumption: the affixes must match exactly
//! and every character between them must be a digit, a grouping separator
//! (lenient about placement, it may appear after any integer digit), or a
//! single decimal separator. Formatting substitutes the locale's symbols
//! for the grouping and decimal markers.

use crate::error::{ConversionError, ConversionResult};
use crate::format::locale::{DecimalSymbols, Locale};
use crate::value::Value;
use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalFormat {
    positive_prefix: String,
    positive_suffix: String,
    negative_affixes: Option<(String, String)>,
    min_integer_digits: usize,
    min_fraction_digits: usize,
    max_fraction_digits: usize,
    grouping_size: usize,
    symbols: DecimalSymbols,
}

const DIGIT_CHARS: &[char] = &['0', '#', ',', '.'];

impl DecimalFormat {
    /// Compile a pattern under the given locale's symbols.
    pub fn compile(pattern: &str, locale: Locale) -> ConversionResult<Self> {
        if pattern.is_empty() {
            return Err(ConversionError::invalid_pattern(pattern, "empty pattern"));
        }
        let (positive, negative) = match pattern.split_once(';') {
            Some((pos, neg)) => (pos, Some(neg)),
            None => (pattern, None),
        };

        let (prefix, body, suffix) = split_subpattern(positive)
            .ok_or_else(|| ConversionError::invalid_pattern(pattern, "no digit section"))?;

        let (integer_part, fraction_part) = match body.split_once('.') {
            Some((int, frac)) => (int, frac),
            None => (body, ""),
        };
        if fraction_part.contains('.') || fraction_part.contains(',') {
            return Err(ConversionError::invalid_pattern(
                pattern,
                "malformed fraction section",
            ));
        }

        let grouping_size = match integer_part.rfind(',') {
            Some(pos) => integer_part[pos + 1..].chars().filter(|c| *c != ',').count(),
            None => 0,
        };
        let min_integer_digits = integer_part.chars().filter(|c| *c == '0').count();
        let min_fraction_digits = fraction_part.chars().filter(|c| *c == '0').count();
        let max_fraction_digits = fraction_part.len();

        let negative_affixes = match negative {
            Some(neg) => {
                let (neg_prefix, _, neg_suffix) = split_subpattern(neg).ok_or_else(|| {
                    ConversionError::invalid_pattern(pattern, "no digit section in negative subpattern")
                })?;
                Some((neg_prefix.to_string(), neg_suffix.to_string()))
            }
            None => None,
        };

        Ok(Self {
            positive_prefix: prefix.to_string(),
            positive_suffix: suffix.to_string(),
            negative_affixes,
            min_integer_digits: min_integer_digits.max(1),
            min_fraction_digits,
            max_fraction_digits,
            grouping_size,
            symbols: locale.symbols(),
        })
    }

    /// The locale's default format, equivalent to `#,##0.###`.
    pub fn locale_default(locale: Locale) -> Self {
        Self {
            positive_prefix: String::new(),
            positive_suffix: String::new(),
            negative_affixes: None,
            min_integer_digits: 1,
            min_fraction_digits: 0,
            max_fraction_digits: 3,
            grouping_size: 3,
            symbols: locale.symbols(),
        }
    }

    /// Format any numeric value; `None` for non-numeric input.
    pub fn format_value(&self, value: &Value) -> Option<String> {
        match value {
            Value::Byte(n) => Some(self.format_i128(i128::from(*n))),
            Value::Short(n) => Some(self.format_i128(i128::from(*n))),
            Value::Integer(n) => Some(self.format_i128(i128::from(*n))),
            Value::Long(n) => Some(self.format_i128(i128::from(*n))),
            Value::Float(n) => Some(self.format_f64(f64::from(*n))),
            Value::Double(n) => Some(self.format_f64(*n)),
            Value::BigInteger(n) => Some(self.format_bigint(n)),
            Value::BigDecimal(n) => Some(self.format_decimal(n)),
            _ => None,
        }
    }

    pub fn format_i128(&self, n: i128) -> String {
        self.format_parts(n < 0, &n.unsigned_abs().to_string(), "")
    }

    pub fn format_f64(&self, x: f64) -> String {
        if !x.is_finite() {
            return x.to_string();
        }
        let rounded = format!("{:.*}", self.max_fraction_digits, x.abs());
        let (int_digits, frac_digits) = match rounded.split_once('.') {
            Some((int, frac)) => (int, frac),
            None => (rounded.as_str(), ""),
        };
        self.format_parts(x.is_sign_negative() && x != 0.0, int_digits, frac_digits)
    }

    pub fn format_bigint(&self, n: &BigInt) -> String {
        self.format_parts(n.sign() == num_bigint::Sign::Minus, &n.magnitude().to_string(), "")
    }

    pub fn format_decimal(&self, d: &BigDecimal) -> String {
        let rounded = d
            .abs()
            .with_scale_round(self.max_fraction_digits as i64, RoundingMode::HalfUp)
            .to_string();
        let (int_digits, frac_digits) = match rounded.split_once('.') {
            Some((int, frac)) => (int, frac),
            None => (rounded.as_str(), ""),
        };
        self.format_parts(d.sign() == num_bigint::Sign::Minus, int_digits, frac_digits)
    }

    fn format_parts(&self, negative: bool, int_digits: &str, frac_digits: &str) -> String {
        let trimmed = int_digits.trim_start_matches('0');
        let mut digits: String = if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() };
        while digits.len() < self.min_integer_digits {
            digits.insert(0, '0');
        }
        if self.grouping_size > 0 {
            digits = group_digits(&digits, self.grouping_size, self.symbols.grouping_separator);
        }

        let mut fraction: String = frac_digits.chars().take(self.max_fraction_digits).collect();
        while fraction.len() > self.min_fraction_digits && fraction.ends_with('0') {
            fraction.pop();
        }
        while fraction.len() < self.min_fraction_digits {
            fraction.push('0');
        }

        let mut body = digits;
        if !fraction.is_empty() {
            body.push(self.symbols.decimal_separator);
            body.push_str(&fraction);
        }

        match (&self.negative_affixes, negative) {
            (Some((prefix, suffix)), true) => format!("{}{}{}", prefix, body, suffix),
            (None, true) => format!(
                "{}{}{}{}",
                self.positive_prefix, self.symbols.minus_sign, body, self.positive_suffix
            ),
            (_, false) => format!("{}{}{}", self.positive_prefix, body, self.positive_suffix),
        }
    }

    /// Parse the entire text, or `None` when any part of it does not match.
    pub fn parse(&self, text: &str) -> Option<BigDecimal> {
        if let Some((prefix, suffix)) = &self.negative_affixes {
            if let Some(core) = strip_affixes(text, prefix, suffix) {
                // ambiguity with identical affixes resolves in favor of negative
                if let Some(canonical) = self.parse_core(core, true) {
                    return BigDecimal::from_str(&canonical).ok();
                }
            }
        }
        let core = strip_affixes(text, &self.positive_prefix, &self.positive_suffix)?;
        let (core, negative) = match core.strip_prefix(self.symbols.minus_sign) {
            Some(rest) => (rest, true),
            None => (core, false),
        };
        let canonical = self.parse_core(core, negative)?;
        BigDecimal::from_str(&canonical).ok()
    }

    fn parse_core(&self, core: &str, negative: bool) -> Option<String> {
        let mut int_digits = String::new();
        let mut frac_digits = String::new();
        let mut in_fraction = false;
        for c in core.chars() {
            if c.is_ascii_digit() {
                if in_fraction {
                    frac_digits.push(c);
                } else {
                    int_digits.push(c);
                }
            } else if c == self.symbols.grouping_separator && !in_fraction && !int_digits.is_empty() {
                // lenient about grouping placement, strict about everything else
            } else if c == self.symbols.decimal_separator && !in_fraction {
                in_fraction = true;
            } else {
                return None;
            }
        }
        if int_digits.is_empty() && frac_digits.is_empty() {
            return None;
        }
        if int_digits.is_empty() {
            int_digits.push('0');
        }
        let sign = if negative { "-" } else { "" };
        if frac_digits.is_empty() {
            Some(format!("{}{}", sign, int_digits))
        } else {
            Some(format!("{}{}.{}", sign, int_digits, frac_digits))
        }
    }
}

/// Split a subpattern into (prefix, digit section, suffix).
fn split_subpattern(subpattern: &str) -> Option<(&str, &str, &str)> {
    let start = subpattern.find(|c| DIGIT_CHARS.contains(&c))?;
    let body_len = subpattern[start..]
        .find(|c| !DIGIT_CHARS.contains(&c))
        .unwrap_or(subpattern.len() - start);
    let body = &subpattern[start..start + body_len];
    if !body.contains('0') && !body.contains('#') {
        return None;
    }
    Some((&subpattern[..start], body, &subpattern[start + body_len..]))
}

fn strip_affixes<'a>(text: &'a str, prefix: &str, suffix: &str) -> Option<&'a str> {
    text.strip_prefix(prefix)?.strip_suffix(suffix)
}

fn group_digits(digits: &str, size: usize, separator: char) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut grouped = String::new();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % size == 0 {
            grouped.push(separator);
        }
        grouped.push(*c);
    }
    grouped
}

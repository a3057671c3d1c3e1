//! Locale identifiers and their regional formatting conventions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An identifier selecting regional formatting conventions.
///
/// The set is a fixed table rather than a full CLDR database: each entry
/// carries the decimal symbols used by the numeric formatter and the default
/// date pattern used by the date/time converter when locale formatting is
/// enabled without an explicit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    EnUs,
    EnGb,
    DeDe,
    FrFr,
    ItIt,
    EsEs,
    SvSe,
}

/// Symbols governing digit grouping and the decimal marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalSymbols {
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub minus_sign: char,
}

impl Locale {
    pub fn as_tag(&self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::EnGb => "en-GB",
            Locale::DeDe => "de-DE",
            Locale::FrFr => "fr-FR",
            Locale::ItIt => "it-IT",
            Locale::EsEs => "es-ES",
            Locale::SvSe => "sv-SE",
        }
    }

    pub fn from_tag(tag: &str) -> Result<Self, String> {
        match tag {
            "en-US" | "en_US" => Ok(Locale::EnUs),
            "en-GB" | "en_GB" => Ok(Locale::EnGb),
            "de-DE" | "de_DE" => Ok(Locale::DeDe),
            "fr-FR" | "fr_FR" => Ok(Locale::FrFr),
            "it-IT" | "it_IT" => Ok(Locale::ItIt),
            "es-ES" | "es_ES" => Ok(Locale::EsEs),
            "sv-SE" | "sv_SE" => Ok(Locale::SvSe),
            other => Err(format!("unknown locale tag {:?}", other)),
        }
    }

    pub fn symbols(&self) -> DecimalSymbols {
        match self {
            Locale::EnUs | Locale::EnGb => DecimalSymbols {
                decimal_separator: '.',
                grouping_separator: ',',
                minus_sign: '-',
            },
            Locale::DeDe | Locale::ItIt | Locale::EsEs => DecimalSymbols {
                decimal_separator: ',',
                grouping_separator: '.',
                minus_sign: '-',
            },
            Locale::FrFr | Locale::SvSe => DecimalSymbols {
                decimal_separator: ',',
                grouping_separator: ' ',
                minus_sign: '-',
            },
        }
    }

    /// The default date pattern (chrono strftime syntax) applied by the
    /// date/time converter when locale formatting is enabled.
    pub fn date_pattern(&self) -> &'static str {
        match self {
            Locale::EnUs => "%m/%d/%Y",
            Locale::EnGb | Locale::FrFr | Locale::ItIt | Locale::EsEs => "%d/%m/%Y",
            Locale::DeDe => "%d.%m.%Y",
            Locale::SvSe => "%Y-%m-%d",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

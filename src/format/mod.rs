//! Locale- and pattern-aware formatting support.

pub mod cache;
pub mod decimal;
pub mod locale;

pub use cache::{global as global_cache, FormatCache};
pub use decimal::DecimalFormat;
pub use locale::{DecimalSymbols, Locale};

//! Shared cache of compiled formatters.
//!
//! Compiling a pattern is cheap but not free, and converters are typically
//! long-lived and reused; entries are created lazily on first request for a
//! (pattern, locale) pair and never evicted. The map is lock-guarded so
//! get-or-create-and-store is atomic per key.

use crate::error::ConversionResult;
use crate::format::decimal::DecimalFormat;
use crate::format::locale::Locale;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

type CacheKey = (Option<String>, Locale);

#[derive(Default)]
pub struct FormatCache {
    inner: Mutex<HashMap<CacheKey, Arc<DecimalFormat>>>,
}

impl FormatCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The formatter for an explicit pattern under a locale.
    pub fn pattern_format(&self, pattern: &str, locale: Locale) -> ConversionResult<Arc<DecimalFormat>> {
        let key = (Some(pattern.to_string()), locale);
        let mut map = self.inner.lock();
        if let Some(format) = map.get(&key) {
            return Ok(Arc::clone(format));
        }
        let format = Arc::new(DecimalFormat::compile(pattern, locale)?);
        map.insert(key, Arc::clone(&format));
        Ok(format)
    }

    /// The locale's default formatter (no explicit pattern).
    pub fn locale_format(&self, locale: Locale) -> Arc<DecimalFormat> {
        let key = (None, locale);
        let mut map = self.inner.lock();
        if let Some(format) = map.get(&key) {
            return Arc::clone(format);
        }
        let format = Arc::new(DecimalFormat::locale_default(locale));
        map.insert(key, Arc::clone(&format));
        format
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

/// The process-wide cache shared by all converters.
pub fn global() -> &'static FormatCache {
    static CACHE: OnceLock<FormatCache> = OnceLock::new();
    CACHE.get_or_init(FormatCache::new)
}

//! Synthetic property mapping over a record.
//!
//! A `PropertyMap` exposes one record instance as a fixed-key associative
//! view: the key set is the record's declared property names plus the
//! intrinsic `"class"` pseudo-property, and never changes. Reads and writes
//! are routed through the record's accessors, with textual values coerced
//! to the property's declared kind through the default-transformer
//! registry.

pub mod record;
pub mod registry;

pub use record::{PropertySpec, ReadFn, Record, WriteFn};
pub use registry::{default_transformer, zero_value, Transformer, DEFAULT_TRANSFORMERS};

use crate::error::{ConversionError, MappingError, MappingResult};
use crate::value::{TypeKind, Value};

/// The intrinsic pseudo-property present on every bound map.
pub const CLASS_KEY: &str = "class";

/// A fixed-key associative view over one record instance.
#[derive(Debug)]
pub struct PropertyMap<R: Record> {
    record: Option<R>,
}

impl<R: Record> PropertyMap<R> {
    /// A map bound to `record`.
    pub fn new(record: R) -> Self {
        Self { record: Some(record) }
    }

    /// An unbound, empty map: it has no keys and every keyed operation
    /// reports an unknown key.
    pub fn unbound() -> Self {
        Self { record: None }
    }

    pub fn is_bound(&self) -> bool {
        self.record.is_some()
    }

    pub fn record(&self) -> Option<&R> {
        self.record.as_ref()
    }

    pub fn into_record(self) -> Option<R> {
        self.record
    }

    fn spec(key: &str) -> Option<&'static PropertySpec<R>> {
        R::properties().iter().find(|spec| spec.name == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.is_bound() && (key == CLASS_KEY || Self::spec(key).is_some())
    }

    /// Number of mappings: the declared properties plus `"class"`.
    /// Invariant across put calls; zero only for an unbound map.
    pub fn len(&self) -> usize {
        if self.is_bound() {
            R::properties().len() + 1
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn keys(&self) -> Vec<&'static str> {
        if !self.is_bound() {
            return Vec::new();
        }
        let mut keys: Vec<&'static str> = R::properties().iter().map(|spec| spec.name).collect();
        keys.push(CLASS_KEY);
        keys
    }

    /// A fresh snapshot of the current values, in key order. Write-only
    /// properties contribute null.
    pub fn values(&self) -> Vec<Value> {
        let Some(record) = self.record.as_ref() else {
            return Vec::new();
        };
        let mut values: Vec<Value> = R::properties()
            .iter()
            .map(|spec| spec.read.map(|read| read(record)).unwrap_or(Value::Null))
            .collect();
        values.push(Value::String(R::type_name().to_string()));
        values
    }

    pub fn entries(&self) -> Vec<(&'static str, Value)> {
        self.keys().into_iter().zip(self.values()).collect()
    }

    /// Read a property. The result is the accessor's raw value, never
    /// converted.
    pub fn get(&self, key: &str) -> MappingResult<Value> {
        let record = self.record.as_ref().ok_or_else(|| MappingError::unknown_key(key))?;
        if key == CLASS_KEY {
            return Ok(Value::String(R::type_name().to_string()));
        }
        let spec = Self::spec(key).ok_or_else(|| MappingError::unknown_key(key))?;
        let read = spec.read.ok_or_else(|| MappingError::not_readable(key))?;
        Ok(read(record))
    }

    /// Write a property, coercing `value` to the declared kind when it is
    /// textual and the kind is primitive. Returns the previous value (null
    /// when the property is write-only). The key set is fixed: unknown keys
    /// are rejected, never created.
    pub fn put(&mut self, key: &str, value: Value) -> MappingResult<Value> {
        if key == CLASS_KEY {
            return if self.is_bound() {
                Err(MappingError::not_writable(key))
            } else {
                Err(MappingError::unknown_key(key))
            };
        }
        let record = self.record.as_mut().ok_or_else(|| MappingError::unknown_key(key))?;
        let spec = Self::spec(key).ok_or_else(|| MappingError::unknown_key(key))?;
        let write = spec.write.ok_or_else(|| MappingError::not_writable(key))?;
        let coerced = coerce(spec.kind, value).map_err(|e| MappingError::coercion(key, e))?;
        let previous = spec.read.map(|read| read(record)).unwrap_or(Value::Null);
        write(record, coerced);
        Ok(previous)
    }

    /// Copy values from `other` for every key that is readable there and
    /// writable here. Best-effort: a failing key stops the call but leaves
    /// previously applied writes in place.
    pub fn put_all_writeable<S: Record>(&mut self, other: &PropertyMap<S>) -> MappingResult<()> {
        if !self.is_bound() || !other.is_bound() {
            return Ok(());
        }
        for spec in S::properties() {
            if !spec.is_readable() {
                continue;
            }
            let writable = Self::spec(spec.name).map(|s| s.is_writable()).unwrap_or(false);
            if !writable {
                continue;
            }
            let value = other.get(spec.name)?;
            self.put(spec.name, value)?;
        }
        Ok(())
    }

    /// Removal is structurally impossible; the operation always fails.
    pub fn remove(&mut self, _key: &str) -> MappingResult<Value> {
        Err(MappingError::Unsupported { operation: "remove" })
    }

    /// Reset every writable property to its declared kind's zero/default
    /// value. This deliberately deviates from the general mapping contract:
    /// `clear` never removes mappings, because the key set is fixed.
    pub fn clear(&mut self) {
        if let Some(record) = self.record.as_mut() {
            for spec in R::properties() {
                if let Some(write) = spec.write {
                    write(record, registry::zero_value(spec.kind));
                }
            }
        }
    }

    /// The read accessor for a key, for introspection.
    pub fn read_accessor(&self, key: &str) -> Option<ReadFn<R>> {
        Self::spec(key).and_then(|spec| spec.read)
    }

    /// The write accessor for a key, with its declared kind.
    pub fn write_accessor(&self, key: &str) -> Option<(TypeKind, WriteFn<R>)> {
        Self::spec(key).and_then(|spec| spec.write.map(|write| (spec.kind, write)))
    }

    /// The registry transformer used to coerce textual values for a
    /// declared kind.
    pub fn type_transformer(kind: TypeKind) -> Option<&'static Transformer> {
        registry::default_transformer(kind)
    }

    /// A new map bound to a duplicate of the underlying record. Fails with
    /// a descriptive error when the record cannot be duplicated; never
    /// silently aliases.
    pub fn try_clone(&self) -> MappingResult<Self> {
        match &self.record {
            None => Ok(Self::unbound()),
            Some(record) => match record.duplicate() {
                Some(copy) => Ok(Self::new(copy)),
                None => Err(MappingError::CloneUnsupported { type_name: R::type_name() }),
            },
        }
    }
}

/// Coerce an incoming value to a property's declared kind: identity when
/// the kinds already match, the registry transformer for textual input to a
/// primitive kind, null passthrough for the nullable object kinds.
fn coerce(kind: TypeKind, value: Value) -> Result<Value, ConversionError> {
    if value.kind() == Some(kind) {
        return Ok(value);
    }
    if let Value::String(text) = &value {
        if let Some(transformer) = registry::default_transformer(kind) {
            return transformer.apply(text);
        }
    }
    if value.is_null() && !kind.is_primitive() {
        return Ok(Value::Null);
    }
    Err(ConversionError::not_assignable(kind.into(), &value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
        label: Option<String>,
    }

    impl Record for Point {
        fn type_name() -> &'static str {
            "Point"
        }

        fn properties() -> &'static [PropertySpec<Self>] {
            const PROPS: &[PropertySpec<Point>] = &[
                PropertySpec::new(
                    "x",
                    TypeKind::Integer,
                    Some(|p: &Point| Value::Integer(p.x)),
                    Some(|p: &mut Point, v: Value| {
                        if let Value::Integer(n) = v {
                            p.x = n;
                        }
                    }),
                ),
                PropertySpec::new(
                    "y",
                    TypeKind::Integer,
                    Some(|p: &Point| Value::Integer(p.y)),
                    Some(|p: &mut Point, v: Value| {
                        if let Value::Integer(n) = v {
                            p.y = n;
                        }
                    }),
                ),
                PropertySpec::new(
                    "label",
                    TypeKind::String,
                    Some(|p: &Point| {
                        p.label.clone().map(Value::String).unwrap_or(Value::Null)
                    }),
                    Some(|p: &mut Point, v: Value| {
                        p.label = match v {
                            Value::String(s) => Some(s),
                            _ => None,
                        };
                    }),
                ),
            ];
            PROPS
        }

        fn duplicate(&self) -> Option<Self> {
            Some(self.clone())
        }
    }

    #[test]
    fn test_size_is_properties_plus_class() {
        let map = PropertyMap::new(Point::default());
        assert_eq!(map.len(), 4);
        assert!(map.contains_key("x"));
        assert!(map.contains_key(CLASS_KEY));
        assert!(!map.contains_key("z"));
    }

    #[test]
    fn test_get_and_put_round_trip() {
        let mut map = PropertyMap::new(Point::default());
        map.put("x", Value::Integer(7)).unwrap();
        assert_eq!(map.get("x").unwrap(), Value::Integer(7));
        // textual input is coerced through the registry
        map.put("y", Value::from("12")).unwrap();
        assert_eq!(map.get("y").unwrap(), Value::Integer(12));
    }

    #[test]
    fn test_put_unknown_key_is_structural_error() {
        let mut map = PropertyMap::new(Point::default());
        assert!(matches!(
            map.put("z", Value::Integer(1)),
            Err(MappingError::UnknownKey { .. })
        ));
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_remove_is_unsupported() {
        let mut map = PropertyMap::new(Point::default());
        assert!(matches!(
            map.remove("x"),
            Err(MappingError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_class_key_reads_type_name_and_rejects_writes() {
        let mut map = PropertyMap::new(Point::default());
        assert_eq!(map.get(CLASS_KEY).unwrap(), Value::from("Point"));
        assert!(matches!(
            map.put(CLASS_KEY, Value::from("Other")),
            Err(MappingError::NotWritable { .. })
        ));
    }

    #[test]
    fn test_unbound_map_is_empty() {
        let map: PropertyMap<Point> = PropertyMap::unbound();
        assert!(map.is_empty());
        assert!(map.keys().is_empty());
        assert!(matches!(map.get("x"), Err(MappingError::UnknownKey { .. })));
    }

    #[test]
    fn test_clear_resets_writable_properties() {
        let mut map = PropertyMap::new(Point { x: 3, y: 4, label: Some("p".into()) });
        map.clear();
        assert_eq!(map.get("x").unwrap(), Value::Integer(0));
        assert_eq!(map.get("label").unwrap(), Value::Null);
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_try_clone_duplicates_record() {
        let map = PropertyMap::new(Point { x: 1, y: 2, label: None });
        let copy = map.try_clone().unwrap();
        for key in map.keys() {
            assert!(copy.contains_key(key));
        }
        assert_eq!(copy.get("x").unwrap(), Value::Integer(1));
    }

    #[test]
    fn test_coercion_failure_is_distinct_from_structural() {
        let mut map = PropertyMap::new(Point::default());
        assert!(matches!(
            map.put("x", Value::from("not-a-number")),
            Err(MappingError::Coercion { .. })
        ));
    }
}

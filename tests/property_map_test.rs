//! Integration tests for the property-map record view
//!
//! Tests cover:
//! - The fixed key set (declared properties plus `"class"`)
//! - String coercion per declared kind on writes
//! - Read-only, write-only and unknown-key structural errors
//! - Cross-map synchronization, cloning and reset behavior

use assert_matches::assert_matches;
use chrono::{DateTime, Utc};
use dynconv::property::registry::epoch_date;
use dynconv::property::CLASS_KEY;
use dynconv::{MappingError, PropertyMap, PropertySpec, Record, TypeKind, Value};
use pretty_assertions::assert_eq;

#[derive(Debug, Clone, PartialEq)]
struct Widget {
    id: i32,
    count: i64,
    rank: i16,
    flags: i8,
    ratio: f64,
    scale: f32,
    grade: char,
    active: bool,
    name: Option<String>,
    stamp: Option<DateTime<Utc>>,
    serial: String,
    secret: String,
}

impl Default for Widget {
    fn default() -> Self {
        Self {
            id: 0,
            count: 0,
            rank: 0,
            flags: 0,
            ratio: 0.0,
            scale: 0.0,
            grade: '\0',
            active: false,
            name: None,
            stamp: None,
            serial: "W-000".to_string(),
            secret: String::new(),
        }
    }
}

const WIDGET_PROPS: &[PropertySpec<Widget>] = &[
    PropertySpec::new(
        "id",
        TypeKind::Integer,
        Some(|w: &Widget| Value::Integer(w.id)),
        Some(|w: &mut Widget, v: Value| {
            if let Value::Integer(n) = v {
                w.id = n;
            }
        }),
    ),
    PropertySpec::new(
        "count",
        TypeKind::Long,
        Some(|w: &Widget| Value::Long(w.count)),
        Some(|w: &mut Widget, v: Value| {
            if let Value::Long(n) = v {
                w.count = n;
            }
        }),
    ),
    PropertySpec::new(
        "rank",
        TypeKind::Short,
        Some(|w: &Widget| Value::Short(w.rank)),
        Some(|w: &mut Widget, v: Value| {
            if let Value::Short(n) = v {
                w.rank = n;
            }
        }),
    ),
    PropertySpec::new(
        "flags",
        TypeKind::Byte,
        Some(|w: &Widget| Value::Byte(w.flags)),
        Some(|w: &mut Widget, v: Value| {
            if let Value::Byte(n) = v {
                w.flags = n;
            }
        }),
    ),
    PropertySpec::new(
        "ratio",
        TypeKind::Double,
        Some(|w: &Widget| Value::Double(w.ratio)),
        Some(|w: &mut Widget, v: Value| {
            if let Value::Double(x) = v {
                w.ratio = x;
            }
        }),
    ),
    PropertySpec::new(
        "scale",
        TypeKind::Float,
        Some(|w: &Widget| Value::Float(w.scale)),
        Some(|w: &mut Widget, v: Value| {
            if let Value::Float(x) = v {
                w.scale = x;
            }
        }),
    ),
    PropertySpec::new(
        "grade",
        TypeKind::Character,
        Some(|w: &Widget| Value::Character(w.grade)),
        Some(|w: &mut Widget, v: Value| {
            if let Value::Character(c) = v {
                w.grade = c;
            }
        }),
    ),
    PropertySpec::new(
        "active",
        TypeKind::Boolean,
        Some(|w: &Widget| Value::Boolean(w.active)),
        Some(|w: &mut Widget, v: Value| {
            if let Value::Boolean(b) = v {
                w.active = b;
            }
        }),
    ),
    PropertySpec::new(
        "name",
        TypeKind::String,
        Some(|w: &Widget| w.name.clone().map(Value::String).unwrap_or(Value::Null)),
        Some(|w: &mut Widget, v: Value| {
            w.name = match v {
                Value::String(s) => Some(s),
                _ => None,
            };
        }),
    ),
    PropertySpec::new(
        "stamp",
        TypeKind::Date,
        Some(|w: &Widget| w.stamp.map(Value::Date).unwrap_or(Value::Null)),
        Some(|w: &mut Widget, v: Value| {
            w.stamp = match v {
                Value::Date(dt) => Some(dt),
                _ => None,
            };
        }),
    ),
    // read-only
    PropertySpec::new(
        "serial",
        TypeKind::String,
        Some(|w: &Widget| Value::String(w.serial.clone())),
        None,
    ),
    // write-only
    PropertySpec::new(
        "secret",
        TypeKind::String,
        None,
        Some(|w: &mut Widget, v: Value| {
            if let Value::String(s) = v {
                w.secret = s;
            }
        }),
    ),
];

impl Record for Widget {
    fn type_name() -> &'static str {
        "Widget"
    }

    fn properties() -> &'static [PropertySpec<Self>] {
        WIDGET_PROPS
    }

    fn duplicate(&self) -> Option<Self> {
        Some(self.clone())
    }
}

/// A record without duplication support, for the clone failure path.
#[derive(Debug)]
struct Handle {
    fd: i32,
}

impl Record for Handle {
    fn type_name() -> &'static str {
        "Handle"
    }

    fn properties() -> &'static [PropertySpec<Self>] {
        const PROPS: &[PropertySpec<Handle>] = &[PropertySpec::new(
            "fd",
            TypeKind::Integer,
            Some(|h: &Handle| Value::Integer(h.fd)),
            None,
        )];
        PROPS
    }
}

#[test]
fn test_key_set_is_properties_plus_class() {
    let map = PropertyMap::new(Widget::default());
    assert_eq!(map.len(), WIDGET_PROPS.len() + 1);
    assert!(!map.is_empty());

    let keys = map.keys();
    assert_eq!(keys.len(), map.len());
    for name in ["id", "count", "grade", "serial", "secret", CLASS_KEY] {
        assert!(map.contains_key(name), "missing key {:?}", name);
    }
    assert!(!map.contains_key("bogus"));
}

#[test]
fn test_class_pseudo_property() {
    let mut map = PropertyMap::new(Widget::default());
    assert_eq!(map.get(CLASS_KEY).unwrap(), Value::from("Widget"));
    assert_matches!(
        map.put(CLASS_KEY, Value::from("Gadget")),
        Err(MappingError::NotWritable { .. })
    );
}

#[test]
fn test_put_coerces_strings_per_declared_kind() {
    let mut map = PropertyMap::new(Widget::default());

    map.put("id", Value::from("12")).unwrap();
    map.put("count", Value::from("9000000000")).unwrap();
    map.put("rank", Value::from("-17")).unwrap();
    map.put("flags", Value::from("1")).unwrap();
    map.put("ratio", Value::from("12.5")).unwrap();
    map.put("scale", Value::from("0.25")).unwrap();
    map.put("grade", Value::from("BCD")).unwrap();
    map.put("active", Value::from("yes")).unwrap();
    map.put("name", Value::from("widget one")).unwrap();

    assert_eq!(map.get("id").unwrap(), Value::Integer(12));
    assert_eq!(map.get("count").unwrap(), Value::Long(9_000_000_000));
    assert_eq!(map.get("rank").unwrap(), Value::Short(-17));
    assert_eq!(map.get("flags").unwrap(), Value::Byte(1));
    assert_eq!(map.get("ratio").unwrap(), Value::Double(12.5));
    assert_eq!(map.get("scale").unwrap(), Value::Float(0.25));
    assert_eq!(map.get("grade").unwrap(), Value::Character('B'));
    assert_eq!(map.get("active").unwrap(), Value::Boolean(true));
    assert_eq!(map.get("name").unwrap(), Value::from("widget one"));
}

#[test]
fn test_put_accepts_already_typed_values() {
    let mut map = PropertyMap::new(Widget::default());
    let stamp = epoch_date();
    map.put("stamp", Value::Date(stamp)).unwrap();
    assert_eq!(map.get("stamp").unwrap(), Value::Date(stamp));

    // null clears a non-primitive property
    map.put("stamp", Value::Null).unwrap();
    assert_eq!(map.get("stamp").unwrap(), Value::Null);
}

#[test]
fn test_put_returns_previous_value() {
    let mut map = PropertyMap::new(Widget::default());
    assert_eq!(map.put("id", Value::Integer(5)).unwrap(), Value::Integer(0));
    assert_eq!(map.put("id", Value::Integer(6)).unwrap(), Value::Integer(5));
    // a write-only property has no previous value to report
    assert_eq!(map.put("secret", Value::from("s3")).unwrap(), Value::Null);
}

#[test]
fn test_coercion_failure_keeps_old_value() {
    let mut map = PropertyMap::new(Widget::default());
    map.put("id", Value::Integer(41)).unwrap();
    assert_matches!(
        map.put("id", Value::from("not-a-number")),
        Err(MappingError::Coercion { .. })
    );
    assert_eq!(map.get("id").unwrap(), Value::Integer(41));

    // out-of-range text fails the same way
    assert_matches!(
        map.put("flags", Value::from("4096")),
        Err(MappingError::Coercion { .. })
    );
}

#[test]
fn test_structural_errors() {
    let mut map = PropertyMap::new(Widget::default());
    assert_matches!(
        map.put("bogus", Value::Integer(1)),
        Err(MappingError::UnknownKey { .. })
    );
    assert_matches!(map.get("bogus"), Err(MappingError::UnknownKey { .. }));
    assert_matches!(
        map.put("serial", Value::from("W-999")),
        Err(MappingError::NotWritable { .. })
    );
    assert_matches!(map.get("secret"), Err(MappingError::NotReadable { .. }));
    assert_matches!(map.remove("id"), Err(MappingError::Unsupported { .. }));
    // the key set never changes, even after failed writes
    assert_eq!(map.len(), WIDGET_PROPS.len() + 1);
}

#[test]
fn test_values_snapshot_is_dead_copy() {
    let mut map = PropertyMap::new(Widget::default());
    map.put("id", Value::Integer(7)).unwrap();
    let snapshot = map.values();
    assert_eq!(snapshot.len(), map.len());

    map.put("id", Value::Integer(99)).unwrap();
    // the earlier snapshot still carries the old value
    let id_index = map.keys().iter().position(|k| *k == "id").unwrap();
    assert_eq!(snapshot[id_index], Value::Integer(7));
    assert_eq!(map.values()[id_index], Value::Integer(99));
}

#[test]
fn test_entries_pair_keys_with_values() {
    let mut map = PropertyMap::new(Widget::default());
    map.put("name", Value::from("paired")).unwrap();
    let entries = map.entries();
    assert_eq!(entries.len(), map.len());
    assert!(entries.contains(&("name", Value::from("paired"))));
    assert!(entries.contains(&(CLASS_KEY, Value::from("Widget"))));
    // write-only slots surface as null in the snapshot
    assert!(entries.contains(&("secret", Value::Null)));
}

#[test]
fn test_put_all_writeable_syncs_shared_keys() {
    let mut source = PropertyMap::new(Widget::default());
    source.put("id", Value::Integer(21)).unwrap();
    source.put("active", Value::Boolean(true)).unwrap();
    source.put("name", Value::from("origin")).unwrap();

    let mut dest = PropertyMap::new(Widget::default());
    dest.put("secret", Value::from("keep-me")).unwrap();
    dest.put_all_writeable(&source).unwrap();

    assert_eq!(dest.get("id").unwrap(), Value::Integer(21));
    assert_eq!(dest.get("active").unwrap(), Value::Boolean(true));
    assert_eq!(dest.get("name").unwrap(), Value::from("origin"));
    // serial is not writable here and secret is not readable there,
    // so both stay untouched
    assert_eq!(dest.get("serial").unwrap(), Value::from("W-000"));
    assert_eq!(dest.record().unwrap().secret, "keep-me");
}

#[test]
fn test_clear_resets_writable_properties_to_zero() {
    let mut map = PropertyMap::new(Widget {
        id: 3,
        count: 4,
        active: true,
        name: Some("gone".to_string()),
        stamp: Some(epoch_date()),
        ..Widget::default()
    });
    map.clear();

    assert_eq!(map.get("id").unwrap(), Value::Integer(0));
    assert_eq!(map.get("count").unwrap(), Value::Long(0));
    assert_eq!(map.get("active").unwrap(), Value::Boolean(false));
    assert_eq!(map.get("grade").unwrap(), Value::Character('\0'));
    assert_eq!(map.get("name").unwrap(), Value::Null);
    assert_eq!(map.get("stamp").unwrap(), Value::Null);
    // read-only properties are untouched and the key set is unchanged
    assert_eq!(map.get("serial").unwrap(), Value::from("W-000"));
    assert_eq!(map.len(), WIDGET_PROPS.len() + 1);
}

#[test]
fn test_try_clone_produces_independent_map() {
    let mut map = PropertyMap::new(Widget::default());
    map.put("id", Value::Integer(8)).unwrap();

    let mut copy = map.try_clone().unwrap();
    assert_eq!(copy.keys(), map.keys());
    assert_eq!(copy.get("id").unwrap(), Value::Integer(8));

    copy.put("id", Value::Integer(80)).unwrap();
    assert_eq!(map.get("id").unwrap(), Value::Integer(8));
}

#[test]
fn test_try_clone_without_duplication_support_fails() {
    let map = PropertyMap::new(Handle { fd: 3 });
    assert_matches!(
        map.try_clone(),
        Err(MappingError::CloneUnsupported { type_name: "Handle" })
    );
}

#[test]
fn test_unbound_map_has_no_structure() {
    let mut map: PropertyMap<Widget> = PropertyMap::unbound();
    assert!(map.is_empty());
    assert!(!map.contains_key("id"));
    assert!(map.keys().is_empty());
    assert!(map.values().is_empty());
    assert_matches!(map.get("id"), Err(MappingError::UnknownKey { .. }));
    assert_matches!(map.put("id", Value::Integer(1)), Err(MappingError::UnknownKey { .. }));
    // an unbound map clones to another unbound map
    assert!(!map.try_clone().unwrap().is_bound());
}

#[test]
fn test_accessor_introspection() {
    let map = PropertyMap::new(Widget::default());

    assert!(map.read_accessor("id").is_some());
    assert!(map.read_accessor("secret").is_none());
    assert!(map.write_accessor("serial").is_none());

    let (kind, write) = map.write_accessor("grade").unwrap();
    assert_eq!(kind, TypeKind::Character);
    let mut widget = Widget::default();
    write(&mut widget, Value::Character('A'));
    assert_eq!(widget.grade, 'A');
}

#[test]
fn test_type_transformers_cover_primitive_kinds_only() {
    assert!(PropertyMap::<Widget>::type_transformer(TypeKind::Integer).is_some());
    assert!(PropertyMap::<Widget>::type_transformer(TypeKind::Boolean).is_some());
    assert!(PropertyMap::<Widget>::type_transformer(TypeKind::String).is_none());
    assert!(PropertyMap::<Widget>::type_transformer(TypeKind::Date).is_none());
}

//! Record capability interface.
//!
//! A `Record` adapter declares, per type, the named properties a
//! `PropertyMap` exposes: each with a declared kind and optional read and
//! write accessors. The embedding application supplies the adapter
//! explicitly; there is no runtime reflection.

use crate::value::{TypeKind, Value};

/// Read accessor: produce the property's current value.
pub type ReadFn<R> = fn(&R) -> Value;

/// Write accessor: store an already-coerced value. The map coerces the
/// incoming value to the declared kind before invoking this, so the
/// function can match on the expected variant.
pub type WriteFn<R> = fn(&mut R, Value);

/// One named property of a record type.
#[derive(Debug, Clone, Copy)]
pub struct PropertySpec<R> {
    pub name: &'static str,
    pub kind: TypeKind,
    pub read: Option<ReadFn<R>>,
    pub write: Option<WriteFn<R>>,
}

impl<R> PropertySpec<R> {
    pub const fn new(
        name: &'static str,
        kind: TypeKind,
        read: Option<ReadFn<R>>,
        write: Option<WriteFn<R>>,
    ) -> Self {
        Self { name, kind, read, write }
    }

    pub fn is_readable(&self) -> bool {
        self.read.is_some()
    }

    pub fn is_writable(&self) -> bool {
        self.write.is_some()
    }
}

/// A structured record whose properties can be viewed as a mapping.
/// The property table is a `'static` slice, so implementors must own their
/// data rather than borrow it.
pub trait Record: Sized + 'static {
    /// The name reported by the intrinsic `"class"` pseudo-property.
    fn type_name() -> &'static str;

    /// The fixed property table for this type.
    fn properties() -> &'static [PropertySpec<Self>];

    /// An independent copy of this record, when duplication is available.
    /// The default reports that cloning a map over this type is impossible.
    fn duplicate(&self) -> Option<Self> {
        None
    }
}

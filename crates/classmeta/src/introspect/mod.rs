// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Pluggable type introspection.
//!
//! The cache never looks at host types directly. A [`TypeIntrospector`]
//! reports the *declared* shape of one type at a time (its own fields,
//! accessors and methods plus a link to its superclass) as a
//! [`RawTypeShape`]; classification and ancestor composition happen in
//! [`build`](crate::build).
//!
//! Implementations may walk a live reflection API, read tables emitted by a
//! derive macro, or use the manual [`RegistryIntrospector`].

mod registry;

pub use registry::{RegistryIntrospector, TypeShapeBuilder};

use crate::error::IntrospectionError;
use std::fmt;

/// Opaque identity of a concrete type (or meta-type) in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeHandle(u64);

impl TypeHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One stored field as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    pub name: String,
    /// Byte displacement inside an instance.
    pub offset: usize,
    pub type_encoding: String,
}

/// One declared accessor (property) as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAccessor {
    pub name: String,
    /// Attribute list, see [`AccessorAttributes`](crate::AccessorAttributes).
    pub attributes: String,
    /// Declaring protocol/mixin when it is not the concrete type itself.
    pub declared_by: Option<String>,
}

/// One declared method as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMethod {
    pub name: String,
    /// Method type encoding (`v24@0:8@16`).
    pub type_encoding: String,
    /// Opaque implementation handle (function address, table slot, ...).
    pub implementation: u64,
}

/// Declared shape of one type; ancestors are referenced, not included.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTypeShape {
    pub name: String,
    pub superclass: Option<TypeHandle>,
    /// Handle of the matching meta-type, if the host has one.
    pub meta: Option<TypeHandle>,
    pub is_meta: bool,
    pub fields: Vec<RawField>,
    pub accessors: Vec<RawAccessor>,
    pub methods: Vec<RawMethod>,
}

/// Source of type shapes.
///
/// Implementations must be callable from several threads at once; the cache
/// guarantees at most one concurrent `inspect` per handle.
pub trait TypeIntrospector: Send + Sync {
    /// Map a type name to its handle. `None` when no live type has that name.
    fn resolve_name(&self, name: &str) -> Option<TypeHandle>;

    /// Report the declared shape of `handle`.
    fn inspect(&self, handle: TypeHandle) -> Result<RawTypeShape, IntrospectionError>;

    /// Immediate superclass of `handle`.
    ///
    /// Used to validate ancestor chains before building. The default goes
    /// through [`inspect`](Self::inspect); override it when the host can
    /// answer more cheaply.
    fn superclass_of(&self, handle: TypeHandle) -> Result<Option<TypeHandle>, IntrospectionError> {
        Ok(self.inspect(handle)?.superclass)
    }
}

impl<T: TypeIntrospector + ?Sized> TypeIntrospector for std::sync::Arc<T> {
    fn resolve_name(&self, name: &str) -> Option<TypeHandle> {
        (**self).resolve_name(name)
    }

    fn inspect(&self, handle: TypeHandle) -> Result<RawTypeShape, IntrospectionError> {
        (**self).inspect(handle)
    }

    fn superclass_of(&self, handle: TypeHandle) -> Result<Option<TypeHandle>, IntrospectionError> {
        (**self).superclass_of(handle)
    }
}

impl<T: TypeIntrospector + ?Sized> TypeIntrospector for &T {
    fn resolve_name(&self, name: &str) -> Option<TypeHandle> {
        (**self).resolve_name(name)
    }

    fn inspect(&self, handle: TypeHandle) -> Result<RawTypeShape, IntrospectionError> {
        (**self).inspect(handle)
    }

    fn superclass_of(&self, handle: TypeHandle) -> Result<Option<TypeHandle>, IntrospectionError> {
        (**self).superclass_of(handle)
    }
}

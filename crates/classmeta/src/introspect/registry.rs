// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Manual registration table.
//!
//! [`RegistryIntrospector`] stores shapes handed to it by the host (written
//! by hand or emitted by a code generator) and serves them to the cache. It
//! also supports live shape mutation, after which the host is expected to
//! call [`TypeMetadataCache::mark_stale`](crate::TypeMetadataCache::mark_stale).
//!
//! # Example
//!
//! ```rust
//! use classmeta::introspect::{RegistryIntrospector, TypeShapeBuilder};
//!
//! let registry = RegistryIntrospector::new();
//! let root = registry.define(TypeShapeBuilder::new("Object").field("isa", 0, "#"));
//! let user = registry.define(
//!     TypeShapeBuilder::new("User")
//!         .superclass(root)
//!         .field("_uid", 8, "q")
//!         .accessor("uid", "Tq,N,V_uid"),
//! );
//! assert_eq!(registry.handle_of("User"), Some(user));
//! ```

use super::{RawAccessor, RawField, RawMethod, RawTypeShape, TypeHandle, TypeIntrospector};
use crate::error::IntrospectionError;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Builder for [`RawTypeShape`] values.
#[derive(Debug)]
pub struct TypeShapeBuilder {
    shape: RawTypeShape,
}

impl TypeShapeBuilder {
    /// Start a shape for a root type with no members.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            shape: RawTypeShape {
                name: name.into(),
                ..RawTypeShape::default()
            },
        }
    }

    pub fn superclass(mut self, handle: TypeHandle) -> Self {
        self.shape.superclass = Some(handle);
        self
    }

    /// Link the meta-type describing this type's class-level members.
    pub fn meta_type(mut self, handle: TypeHandle) -> Self {
        self.shape.meta = Some(handle);
        self
    }

    /// Mark this shape as a meta-type.
    pub fn is_meta(mut self) -> Self {
        self.shape.is_meta = true;
        self
    }

    /// Add a stored field.
    pub fn field(
        mut self,
        name: impl Into<String>,
        offset: usize,
        type_encoding: impl Into<String>,
    ) -> Self {
        self.shape.fields.push(RawField {
            name: name.into(),
            offset,
            type_encoding: type_encoding.into(),
        });
        self
    }

    /// Add an accessor declared by the type itself.
    pub fn accessor(mut self, name: impl Into<String>, attributes: impl Into<String>) -> Self {
        self.shape.accessors.push(RawAccessor {
            name: name.into(),
            attributes: attributes.into(),
            declared_by: None,
        });
        self
    }

    /// Add an accessor declared by a protocol or mixin and synthesized here.
    pub fn accessor_declared_by(
        mut self,
        name: impl Into<String>,
        attributes: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        self.shape.accessors.push(RawAccessor {
            name: name.into(),
            attributes: attributes.into(),
            declared_by: Some(owner.into()),
        });
        self
    }

    pub fn method(
        mut self,
        name: impl Into<String>,
        type_encoding: impl Into<String>,
        implementation: u64,
    ) -> Self {
        self.shape.methods.push(RawMethod {
            name: name.into(),
            type_encoding: type_encoding.into(),
            implementation,
        });
        self
    }

    pub fn build(self) -> RawTypeShape {
        self.shape
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    shapes: HashMap<TypeHandle, RawTypeShape>,
    names: HashMap<String, TypeHandle>,
    next_handle: u64,
}

/// Thread-safe table of registered type shapes.
#[derive(Debug, Default)]
pub struct RegistryIntrospector {
    state: RwLock<RegistryState>,
}

impl RegistryIntrospector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shape and return its handle.
    ///
    /// Registering a name that already exists replaces that type's shape and
    /// keeps its handle.
    pub fn register(&self, shape: RawTypeShape) -> TypeHandle {
        let mut state = self.state.write();
        if let Some(&handle) = state.names.get(&shape.name) {
            log::debug!("registry: replacing shape of '{}' ({})", shape.name, handle);
            state.shapes.insert(handle, shape);
            return handle;
        }

        state.next_handle += 1;
        let handle = TypeHandle::new(state.next_handle);
        state.names.insert(shape.name.clone(), handle);
        state.shapes.insert(handle, shape);
        handle
    }

    /// Register the shape produced by `builder`.
    pub fn define(&self, builder: TypeShapeBuilder) -> TypeHandle {
        self.register(builder.build())
    }

    /// Remove a type; later lookups of its handle or name fail.
    pub fn unregister(&self, handle: TypeHandle) -> Option<RawTypeShape> {
        let mut state = self.state.write();
        let shape = state.shapes.remove(&handle)?;
        state.names.remove(&shape.name);
        Some(shape)
    }

    pub fn handle_of(&self, name: &str) -> Option<TypeHandle> {
        self.state.read().names.get(name).copied()
    }

    /// Append a field to a registered type.
    pub fn add_field(&self, handle: TypeHandle, field: RawField) -> Result<(), IntrospectionError> {
        self.mutate(handle, |shape| shape.fields.push(field))
    }

    /// Append an accessor to a registered type.
    pub fn add_accessor(
        &self,
        handle: TypeHandle,
        accessor: RawAccessor,
    ) -> Result<(), IntrospectionError> {
        self.mutate(handle, |shape| shape.accessors.push(accessor))
    }

    /// Append a method to a registered type.
    pub fn add_method(&self, handle: TypeHandle, method: RawMethod) -> Result<(), IntrospectionError> {
        self.mutate(handle, |shape| shape.methods.push(method))
    }

    pub fn len(&self) -> usize {
        self.state.read().shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn mutate(
        &self,
        handle: TypeHandle,
        apply: impl FnOnce(&mut RawTypeShape),
    ) -> Result<(), IntrospectionError> {
        let mut state = self.state.write();
        let shape = state
            .shapes
            .get_mut(&handle)
            .ok_or(IntrospectionError::UnresolvedType(handle))?;
        apply(shape);
        Ok(())
    }
}

impl TypeIntrospector for RegistryIntrospector {
    fn resolve_name(&self, name: &str) -> Option<TypeHandle> {
        self.handle_of(name)
    }

    fn inspect(&self, handle: TypeHandle) -> Result<RawTypeShape, IntrospectionError> {
        self.state
            .read()
            .shapes
            .get(&handle)
            .cloned()
            .ok_or(IntrospectionError::UnresolvedType(handle))
    }

    fn superclass_of(&self, handle: TypeHandle) -> Result<Option<TypeHandle>, IntrospectionError> {
        self.state
            .read()
            .shapes
            .get(&handle)
            .map(|shape| shape.superclass)
            .ok_or(IntrospectionError::UnresolvedType(handle))
    }
}

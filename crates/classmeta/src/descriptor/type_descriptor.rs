// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Full shape of one concrete type.

use super::{AccessorDescriptor, FieldDescriptor, MethodDescriptor};
use crate::introspect::TypeHandle;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shape of one type: its own members plus a shared link to its parent.
///
/// Ancestor members are never copied into a child; walk
/// [`super_descriptor`](Self::super_descriptor) or use the chain helpers.
/// Everything is immutable after construction except the staleness flag.
pub struct TypeDescriptor {
    pub(crate) handle: TypeHandle,
    pub(crate) name: String,
    pub(crate) is_meta: bool,
    pub(crate) meta_handle: Option<TypeHandle>,
    pub(crate) super_descriptor: Option<Arc<TypeDescriptor>>,
    pub(crate) fields: Vec<FieldDescriptor>,
    pub(crate) accessors: Vec<AccessorDescriptor>,
    pub(crate) methods: Vec<MethodDescriptor>,
    pub(crate) stale: AtomicBool,
}

impl TypeDescriptor {
    pub fn handle(&self) -> TypeHandle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when this descriptor describes a meta-type.
    pub fn is_meta(&self) -> bool {
        self.is_meta
    }

    pub fn meta_handle(&self) -> Option<TypeHandle> {
        self.meta_handle
    }

    pub fn super_descriptor(&self) -> Option<&Arc<TypeDescriptor>> {
        self.super_descriptor.as_ref()
    }

    /// Own fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Own accessors in declaration order.
    pub fn accessors(&self) -> &[AccessorDescriptor] {
        &self.accessors
    }

    pub fn accessor(&self, name: &str) -> Option<&AccessorDescriptor> {
        self.accessors.iter().find(|a| a.name == name)
    }

    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Whether the type's shape changed since this descriptor was built.
    ///
    /// Once true, stop using this descriptor and request a new one from the
    /// cache.
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::Acquire)
    }

    pub(crate) fn mark_stale(&self) {
        self.stale.store(true, Ordering::Release);
    }

    /// True when this descriptor or any ancestor is stale.
    pub fn chain_is_stale(&self) -> bool {
        self.chain().any(TypeDescriptor::is_stale)
    }

    /// Ancestors, nearest first. Does not include `self`.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors {
            next: self.super_descriptor.as_deref(),
        }
    }

    /// `self` followed by its ancestors.
    pub fn chain(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Number of ancestors.
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    /// Whether `handle` is this type or one of its ancestors.
    pub fn is_kind_of(&self, handle: TypeHandle) -> bool {
        self.chain().any(|d| d.handle == handle)
    }

    /// Nearest field named `name`, searching this type then its ancestors.
    pub fn find_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.chain().find_map(|d| d.field(name))
    }

    /// Nearest accessor named `name`, searching this type then its ancestors.
    pub fn find_accessor(&self, name: &str) -> Option<&AccessorDescriptor> {
        self.chain().find_map(|d| d.accessor(name))
    }

    /// Every accessor visible on this type, root ancestor first.
    ///
    /// An accessor redeclared by a descendant replaces the ancestor's entry in
    /// place, so each name appears once.
    pub fn flattened_accessors(&self) -> Vec<&AccessorDescriptor> {
        let mut levels: Vec<&TypeDescriptor> = self.chain().collect();
        levels.reverse();

        let mut out: Vec<&AccessorDescriptor> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for level in levels {
            for accessor in &level.accessors {
                match index.get(accessor.name.as_str()) {
                    Some(&slot) => out[slot] = accessor,
                    None => {
                        index.insert(accessor.name.as_str(), out.len());
                        out.push(accessor);
                    }
                }
            }
        }
        out
    }
}

/// Iterator over a descriptor chain.
#[derive(Clone)]
pub struct Ancestors<'a> {
    next: Option<&'a TypeDescriptor>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a TypeDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.super_descriptor.as_deref();
        Some(current)
    }
}

/// Structural equality; the staleness flag is not part of the shape.
impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
            && self.name == other.name
            && self.is_meta == other.is_meta
            && self.meta_handle == other.meta_handle
            && self.fields == other.fields
            && self.accessors == other.accessors
            && self.methods == other.methods
            && self.super_descriptor.as_deref() == other.super_descriptor.as_deref()
    }
}

impl Eq for TypeDescriptor {}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("handle", &self.handle)
            .field("name", &self.name)
            .field("is_meta", &self.is_meta)
            .field(
                "super",
                &self.super_descriptor.as_ref().map(|s| s.name.as_str()),
            )
            .field("fields", &self.fields)
            .field("accessors", &self.accessors)
            .field("methods", &self.methods.len())
            .field("stale", &self.is_stale())
            .finish()
    }
}

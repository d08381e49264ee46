// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Descriptor construction.
//!
//! Turns one [`RawTypeShape`] into a [`TypeDescriptor`]:
//! 1. classify every own field and keep its offset
//! 2. parse every own accessor, resolve its backing field and accessor names
//! 3. split every own method signature
//! 4. link the parent descriptor obtained from the caller (usually the cache)
//!
//! Ancestor members are never flattened into the child.

use crate::config::DEFAULT_MAX_ANCESTOR_DEPTH;
use crate::descriptor::{
    default_setter_name, AccessorDescriptor, FieldDescriptor, MethodDescriptor, TypeDescriptor,
};
use crate::encoding::{classify, AccessorAttributes, EncodingKind, QualifierSet};
use crate::error::{IntrospectionError, MemberKind};
use crate::introspect::{RawAccessor, RawTypeShape, TypeHandle, TypeIntrospector};
use std::collections::HashSet;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Build the descriptor of `handle` and all of its ancestors, without caching.
///
/// Every call introspects the whole chain again; two calls for an unchanged
/// type yield structurally equal descriptors.
pub fn build_descriptor<I: TypeIntrospector + ?Sized>(
    introspector: &I,
    handle: TypeHandle,
) -> Result<TypeDescriptor, IntrospectionError> {
    let shape = introspector.inspect(handle)?;
    validate_ancestry(introspector, handle, &shape, DEFAULT_MAX_ANCESTOR_DEPTH, |_| None)?;
    build_uncached(introspector, handle, shape)
}

fn build_uncached<I: TypeIntrospector + ?Sized>(
    introspector: &I,
    handle: TypeHandle,
    shape: RawTypeShape,
) -> Result<TypeDescriptor, IntrospectionError> {
    build_from_shape(handle, shape, classify, |parent| {
        let parent_shape = introspector.inspect(parent)?;
        build_uncached(introspector, parent, parent_shape).map(Arc::new)
    })
}

/// Walk the superclass links of `shape` and reject cyclic or too deep chains.
///
/// `cached` may return an already published descriptor for a handle, which
/// ends the walk early: published chains are acyclic and their depth is known.
pub(crate) fn validate_ancestry<I, C>(
    introspector: &I,
    handle: TypeHandle,
    shape: &RawTypeShape,
    max_depth: usize,
    cached: C,
) -> Result<(), IntrospectionError>
where
    I: TypeIntrospector + ?Sized,
    C: Fn(TypeHandle) -> Option<Arc<TypeDescriptor>>,
{
    let too_deep = || IntrospectionError::AncestorDepthExceeded {
        type_name: shape.name.clone(),
        depth: max_depth,
    };
    let cyclic = || IntrospectionError::CyclicAncestry {
        type_name: shape.name.clone(),
    };

    let mut seen = HashSet::from([handle]);
    let mut next = shape.superclass;
    let mut depth = 0usize;

    while let Some(parent) = next {
        depth += 1;
        if depth > max_depth {
            return Err(too_deep());
        }
        if !seen.insert(parent) {
            return Err(cyclic());
        }
        if let Some(published) = cached(parent) {
            // `parent` itself is in `seen`; only a strict ancestor repeating is a loop.
            if published.ancestors().any(|d| seen.contains(&d.handle())) {
                return Err(cyclic());
            }
            if depth + published.depth() > max_depth {
                return Err(too_deep());
            }
            return Ok(());
        }
        next = introspector.superclass_of(parent)?;
    }
    Ok(())
}

/// Build one descriptor from its raw shape.
///
/// `classify_token` is the encoding classifier to use (plain or memoized);
/// `resolve_super` supplies the parent descriptor when the shape has one.
pub(crate) fn build_from_shape<C, R>(
    handle: TypeHandle,
    shape: RawTypeShape,
    classify_token: C,
    resolve_super: R,
) -> Result<TypeDescriptor, IntrospectionError>
where
    C: Fn(&str) -> (EncodingKind, QualifierSet),
    R: FnOnce(TypeHandle) -> Result<Arc<TypeDescriptor>, IntrospectionError>,
{
    let RawTypeShape {
        name,
        superclass,
        meta,
        is_meta,
        fields: raw_fields,
        accessors: raw_accessors,
        methods: raw_methods,
    } = shape;

    let mut names = HashSet::new();
    let mut fields = Vec::with_capacity(raw_fields.len());
    for raw in raw_fields {
        ensure_unique(&mut names, &name, MemberKind::Field, &raw.name)?;
        let (kind, qualifiers) = classify_token(&raw.type_encoding);
        fields.push(FieldDescriptor::with_kind(
            raw.name,
            raw.offset,
            raw.type_encoding,
            kind,
            qualifiers,
        ));
    }

    names.clear();
    let mut accessors = Vec::with_capacity(raw_accessors.len());
    for raw in raw_accessors {
        ensure_unique(&mut names, &name, MemberKind::Accessor, &raw.name)?;
        accessors.push(build_accessor(&name, &fields, raw));
    }

    names.clear();
    let mut methods = Vec::with_capacity(raw_methods.len());
    for raw in raw_methods {
        ensure_unique(&mut names, &name, MemberKind::Method, &raw.name)?;
        methods.push(MethodDescriptor::new(
            raw.name,
            raw.type_encoding,
            raw.implementation,
        ));
    }

    let super_descriptor = superclass.map(resolve_super).transpose()?;

    Ok(TypeDescriptor {
        handle,
        name,
        is_meta,
        meta_handle: meta,
        super_descriptor,
        fields,
        accessors,
        methods,
        stale: AtomicBool::new(false),
    })
}

fn build_accessor(
    type_name: &str,
    own_fields: &[FieldDescriptor],
    raw: RawAccessor,
) -> AccessorDescriptor {
    let attrs = AccessorAttributes::parse(&raw.attributes);
    if attrs.kind == EncodingKind::Unknown {
        log::trace!(
            "accessor '{}.{}' has unrecognized encoding '{}'",
            type_name,
            raw.name,
            attrs.type_encoding
        );
    }

    // Explicit backing field wins; otherwise the `_name` convention, if such a field exists.
    let backing_field = attrs.backing_field.clone().or_else(|| {
        let conventional = format!("_{}", raw.name);
        own_fields
            .iter()
            .any(|f| f.name == conventional)
            .then_some(conventional)
    });

    let getter = Some(attrs.custom_getter.clone().unwrap_or_else(|| raw.name.clone()));
    let setter = match (&attrs.custom_setter, attrs.is_readonly()) {
        (Some(custom), _) => Some(custom.clone()),
        (None, true) => None,
        (None, false) => Some(default_setter_name(&raw.name)),
    };

    let owner_class = raw.declared_by.filter(|owner| owner != type_name);

    AccessorDescriptor {
        name: raw.name,
        kind: attrs.kind,
        type_encoding: attrs.type_encoding,
        qualifiers: attrs.qualifiers,
        backing_field,
        owner_class,
        getter,
        setter,
        class_name: attrs.class_name,
        protocols: attrs.protocols,
    }
}

fn ensure_unique(
    seen: &mut HashSet<String>,
    type_name: &str,
    kind: MemberKind,
    member: &str,
) -> Result<(), IntrospectionError> {
    if seen.insert(member.to_string()) {
        Ok(())
    } else {
        Err(IntrospectionError::DuplicateMember {
            type_name: type_name.to_string(),
            kind,
            name: member.to_string(),
        })
    }
}

#[cfg(test)]
mod tests;

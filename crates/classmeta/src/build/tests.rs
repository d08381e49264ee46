// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//! Tests for descriptor construction.

use super::*;
use crate::introspect::{RegistryIntrospector, TypeShapeBuilder};

fn object_root(registry: &RegistryIntrospector) -> TypeHandle {
    registry.define(
        TypeShapeBuilder::new("Object")
            .field("isa", 0, "#")
            .method("description", "@16@0:8", 0x10),
    )
}

fn define_user(registry: &RegistryIntrospector, root: TypeHandle) -> TypeHandle {
    registry.define(
        TypeShapeBuilder::new("User")
            .superclass(root)
            .field("_uid", 8, "q")
            .field("_name", 16, r#"@"NSString""#)
            .field("_created", 24, r#"@"NSDate""#)
            .accessor("uid", "Tq,N,V_uid")
            .accessor("name", r#"T@"NSString",C,N,V_name"#)
            .accessor("created", r#"T@"NSDate",C,N,V_created"#)
            .method("setUid:", "v24@0:8q16", 0x20),
    )
}

#[test]
fn builds_user_chain() {
    let registry = RegistryIntrospector::new();
    let root = object_root(&registry);
    let user = define_user(&registry, root);

    let desc = build_descriptor(&registry, user).expect("build");
    assert_eq!(desc.name(), "User");
    assert!(!desc.is_meta());

    let kinds: Vec<_> = desc.fields().iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        vec![
            EncodingKind::Int64,
            EncodingKind::ObjectRef,
            EncodingKind::ObjectRef
        ]
    );
    assert_eq!(desc.field("_name").map(|f| f.offset), Some(16));

    assert_eq!(desc.accessors().len(), 3);
    for accessor in desc.accessors() {
        assert!(accessor.is_read_write(), "{} should be read-write", accessor.name);
    }
    let uid = desc.accessor("uid").expect("uid accessor");
    assert_eq!(uid.getter.as_deref(), Some("uid"));
    assert_eq!(uid.setter.as_deref(), Some("setUid:"));
    assert_eq!(uid.backing_field.as_deref(), Some("_uid"));
    assert_eq!(
        desc.accessor("created").and_then(|a| a.class_name.as_deref()),
        Some("NSDate")
    );

    let method = desc.method("setUid:").expect("method");
    assert_eq!(method.return_type, "v");
    assert_eq!(method.argument_types, vec!["@", ":", "q"]);

    let parent = desc.super_descriptor().expect("super");
    assert_eq!(parent.name(), "Object");
    assert!(parent.super_descriptor().is_none());
    assert_eq!(desc.depth(), 1);
}

#[test]
fn ancestor_members_are_not_flattened() {
    let registry = RegistryIntrospector::new();
    let root = object_root(&registry);
    let user = define_user(&registry, root);

    let desc = build_descriptor(&registry, user).expect("build");
    assert!(desc.field("isa").is_none());
    assert!(desc
        .super_descriptor()
        .and_then(|p| p.field("isa"))
        .is_some());
    assert_eq!(desc.find_field("isa").map(|f| f.kind), Some(EncodingKind::ClassRef));
    assert!(desc.method("description").is_none());
}

#[test]
fn empty_type_has_empty_collections() {
    let registry = RegistryIntrospector::new();
    let empty = registry.define(TypeShapeBuilder::new("Empty"));

    let desc = build_descriptor(&registry, empty).expect("build");
    assert!(desc.fields().is_empty());
    assert!(desc.accessors().is_empty());
    assert!(desc.methods().is_empty());
    assert!(desc.super_descriptor().is_none());
}

#[test]
fn building_twice_is_structurally_equal() {
    let registry = RegistryIntrospector::new();
    let root = object_root(&registry);
    let user = define_user(&registry, root);

    let first = build_descriptor(&registry, user).expect("first");
    let second = build_descriptor(&registry, user).expect("second");
    assert_eq!(first, second);

    first.mark_stale();
    assert_eq!(first, second, "staleness is not part of the shape");
}

#[test]
fn accessor_name_resolution() {
    let registry = RegistryIntrospector::new();
    let handle = registry.define(
        TypeShapeBuilder::new("Switch")
            .field("_enabled", 8, "B")
            .field("_title", 16, "@")
            .accessor("enabled", "TB,N,GisEnabled")
            .accessor("title", "T@,R,N")
            .accessor("summary", r#"T@"NSString",R,N"#)
            .accessor("count", "TQ,N,SresetCount:"),
    );

    let desc = build_descriptor(&registry, handle).expect("build");

    let enabled = desc.accessor("enabled").expect("enabled");
    assert_eq!(enabled.getter.as_deref(), Some("isEnabled"));
    assert_eq!(enabled.setter.as_deref(), Some("setEnabled:"));
    assert_eq!(enabled.backing_field.as_deref(), Some("_enabled"), "convention");
    assert!(enabled.qualifiers.contains(QualifierSet::CUSTOM_GETTER));

    let title = desc.accessor("title").expect("title");
    assert!(title.is_readonly());
    assert_eq!(title.setter, None);
    assert_eq!(title.backing_field.as_deref(), Some("_title"));

    let summary = desc.accessor("summary").expect("summary");
    assert_eq!(summary.backing_field, None, "computed accessor");

    let count = desc.accessor("count").expect("count");
    assert_eq!(count.setter.as_deref(), Some("resetCount:"));
    assert_eq!(count.backing_field, None);
}

#[test]
fn protocol_declared_accessor_keeps_owner_and_field() {
    let registry = RegistryIntrospector::new();
    let handle = registry.define(
        TypeShapeBuilder::new("Document")
            .field("_identifier", 8, r#"@"NSString""#)
            .accessor_declared_by("identifier", r#"T@"NSString",C,N,V_identifier"#, "Identifiable")
            .accessor_declared_by("title", "T@,N", "Document"),
    );

    let desc = build_descriptor(&registry, handle).expect("build");
    let identifier = desc.accessor("identifier").expect("identifier");
    assert_eq!(identifier.owner_class.as_deref(), Some("Identifiable"));
    assert_eq!(identifier.backing_field.as_deref(), Some("_identifier"));
    assert!(identifier.is_inherited_declaration());

    let title = desc.accessor("title").expect("title");
    assert_eq!(title.owner_class, None, "own declaration collapses to None");
}

#[test]
fn unknown_encodings_degrade() {
    let registry = RegistryIntrospector::new();
    let handle = registry.define(
        TypeShapeBuilder::new("Odd")
            .field("_blob", 8, "!weird")
            .accessor("blob", "T!weird,V_blob"),
    );

    let desc = build_descriptor(&registry, handle).expect("unknown encodings are not errors");
    assert_eq!(desc.fields()[0].kind, EncodingKind::Unknown);
    assert_eq!(desc.accessors()[0].kind, EncodingKind::Unknown);
}

#[test]
fn duplicate_members_are_rejected() {
    let registry = RegistryIntrospector::new();
    let handle = registry.define(
        TypeShapeBuilder::new("Twice")
            .field("_a", 8, "i")
            .accessor("a", "Ti")
            .accessor("a", "Tq"),
    );

    let err = build_descriptor(&registry, handle).expect_err("duplicate accessor");
    assert_eq!(
        err,
        IntrospectionError::DuplicateMember {
            type_name: "Twice".into(),
            kind: MemberKind::Accessor,
            name: "a".into(),
        }
    );
}

#[test]
fn unresolvable_handles_fail() {
    let registry = RegistryIntrospector::new();
    let ghost = TypeHandle::new(404);
    assert_eq!(
        build_descriptor(&registry, ghost),
        Err(IntrospectionError::UnresolvedType(ghost))
    );

    // A live type whose parent is gone fails as well.
    let orphan = registry.define(TypeShapeBuilder::new("Orphan").superclass(ghost));
    assert_eq!(
        build_descriptor(&registry, orphan),
        Err(IntrospectionError::UnresolvedType(ghost))
    );
}

#[test]
fn cyclic_chains_are_rejected() {
    let registry = RegistryIntrospector::new();
    let a = registry.define(TypeShapeBuilder::new("A"));
    let b = registry.define(TypeShapeBuilder::new("B").superclass(a));
    registry.define(TypeShapeBuilder::new("A").superclass(b));

    let err = build_descriptor(&registry, a).expect_err("cycle");
    assert_eq!(err, IntrospectionError::CyclicAncestry { type_name: "A".into() });
}

#[test]
fn depth_limit_is_enforced() {
    let registry = RegistryIntrospector::new();
    let mut parent = registry.define(TypeShapeBuilder::new("L0"));
    for level in 1..=4 {
        parent = registry.define(TypeShapeBuilder::new(format!("L{}", level)).superclass(parent));
    }
    let shape = registry.inspect(parent).expect("shape");

    assert!(validate_ancestry(&registry, parent, &shape, 4, |_| None).is_ok());
    assert_eq!(
        validate_ancestry(&registry, parent, &shape, 3, |_| None),
        Err(IntrospectionError::AncestorDepthExceeded {
            type_name: "L4".into(),
            depth: 3,
        })
    );
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # classmeta - type metadata cache
//!
//! Introspects a concrete type once and serves an immutable, shareable
//! description of it: stored fields with their layout offsets, exposed
//! accessors, methods, and a link to the parent type's description. Built
//! for serialization and object-mapping engines that look the same types up
//! on every call.
//!
//! ## Quick Start
//!
//! ```rust
//! use classmeta::{EncodingKind, RegistryIntrospector, TypeMetadataCache, TypeShapeBuilder};
//!
//! let cache = TypeMetadataCache::new(RegistryIntrospector::new());
//! let root = cache
//!     .introspector()
//!     .define(TypeShapeBuilder::new("Object").field("isa", 0, "#"));
//! cache.introspector().define(
//!     TypeShapeBuilder::new("User")
//!         .superclass(root)
//!         .field("_uid", 8, "q")
//!         .field("_name", 16, r#"@"NSString""#)
//!         .accessor("uid", "Tq,N,V_uid")
//!         .accessor("name", r#"T@"NSString",C,N,V_name"#),
//! );
//!
//! let user = cache.descriptor_for_name("User")?;
//! assert_eq!(user.field("_uid").map(|f| f.kind), Some(EncodingKind::Int64));
//! assert_eq!(user.accessor("name").and_then(|a| a.setter.as_deref()), Some("setName:"));
//! assert_eq!(user.super_descriptor().map(|s| s.name()), Some("Object"));
//! # Ok::<(), classmeta::LookupError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +-------------------------------------------------------------+
//! |  TypeMetadataCache   registry (RwLock) + single-flight slots |
//! +-------------------------------------------------------------+
//! |  build               shape -> TypeDescriptor, parent linking |
//! +-------------------------------------------------------------+
//! |  encoding            classify, accessor attributes, memo     |
//! +-------------------------------------------------------------+
//! |  TypeIntrospector    host reflection / RegistryIntrospector  |
//! +-------------------------------------------------------------+
//! ```
//!
//! ## Features
//!
//! - `config-loaders` (default): load [`CacheConfig`] from YAML.

pub mod build;
pub mod cache;
pub mod config;
pub mod descriptor;
pub mod encoding;
pub mod error;
pub mod introspect;

pub use build::build_descriptor;
pub use cache::{LookupStats, TypeMetadataCache};
pub use config::CacheConfig;
pub use descriptor::{
    AccessorDescriptor, Ancestors, FieldDescriptor, MethodDescriptor, TypeDescriptor,
};
pub use encoding::{
    classify, split_signature, AccessorAttributes, EncodingKind, EncodingMemo, MethodSignature,
    QualifierSet,
};
#[cfg(feature = "config-loaders")]
pub use error::ConfigError;
pub use error::{IntrospectionError, LookupError, MemberKind, UnknownTypeError};
pub use introspect::{
    RawAccessor, RawField, RawMethod, RawTypeShape, RegistryIntrospector, TypeHandle,
    TypeIntrospector, TypeShapeBuilder,
};

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for type introspection and descriptor lookups.
//!
//! Encoding classification never fails (unrecognized encodings degrade to
//! [`EncodingKind::Unknown`](crate::EncodingKind::Unknown)), so the only
//! failures surfaced here come from resolving and introspecting types.

use crate::introspect::TypeHandle;
use thiserror::Error;

/// Member collection a duplicate name was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Accessor,
    Method,
}

impl std::fmt::Display for MemberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Field => "field",
            Self::Accessor => "accessor",
            Self::Method => "method",
        };
        f.write_str(label)
    }
}

/// The underlying type could not be introspected.
///
/// `Clone` so a single failed build can be handed to every caller that was
/// waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntrospectionError {
    /// The handle does not denote a live type.
    #[error("type handle {0} does not resolve to a live type")]
    UnresolvedType(TypeHandle),

    /// The introspector returned a shape it could not make sense of.
    #[error("type handle {handle} is malformed: {reason}")]
    Malformed { handle: TypeHandle, reason: String },

    /// The host refused access to the type's layout.
    #[error("access to type handle {0} was refused")]
    AccessDenied(TypeHandle),

    /// Two members of the same collection share a name.
    #[error("type '{type_name}' declares {kind} '{name}' more than once")]
    DuplicateMember {
        type_name: String,
        kind: MemberKind,
        name: String,
    },

    /// The ancestor chain is longer than the configured maximum.
    #[error("ancestor chain of '{type_name}' exceeds {depth} levels")]
    AncestorDepthExceeded { type_name: String, depth: usize },

    /// The ancestor chain loops back on itself.
    #[error("ancestor chain of '{type_name}' is cyclic")]
    CyclicAncestry { type_name: String },

    /// The thread building this type panicked before publishing a result.
    #[error("build of type handle {0} was aborted")]
    BuildAborted(TypeHandle),
}

/// Name-based lookup found no matching live type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no live type named '{name}'")]
pub struct UnknownTypeError {
    pub name: String,
}

impl UnknownTypeError {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Failure of [`TypeMetadataCache::descriptor_for_name`](crate::TypeMetadataCache::descriptor_for_name).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error(transparent)]
    Unknown(#[from] UnknownTypeError),

    #[error(transparent)]
    Introspection(#[from] IntrospectionError),
}

/// Configuration loading failures.
#[cfg(feature = "config-loaders")]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

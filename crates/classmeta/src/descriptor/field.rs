// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use crate::encoding::{classify, EncodingKind, QualifierSet};

/// One stored field of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    /// Byte displacement inside an instance of the owning type.
    pub offset: usize,
    pub type_encoding: String,
    pub kind: EncodingKind,
    /// Type qualifiers read from the encoding prefix.
    pub qualifiers: QualifierSet,
}

impl FieldDescriptor {
    /// Create a field descriptor, classifying `type_encoding`.
    pub fn new(name: impl Into<String>, offset: usize, type_encoding: impl Into<String>) -> Self {
        let type_encoding = type_encoding.into();
        let (kind, qualifiers) = classify(&type_encoding);
        Self::with_kind(name, offset, type_encoding, kind, qualifiers)
    }

    /// Create a field descriptor from an already classified encoding.
    pub fn with_kind(
        name: impl Into<String>,
        offset: usize,
        type_encoding: impl Into<String>,
        kind: EncodingKind,
        qualifiers: QualifierSet,
    ) -> Self {
        Self {
            name: name.into(),
            offset,
            type_encoding: type_encoding.into(),
            kind,
            qualifiers,
        }
    }

    pub fn is_const(&self) -> bool {
        self.qualifiers.contains(QualifierSet::CONST)
    }
}

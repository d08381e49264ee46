// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use crate::encoding::{EncodingKind, QualifierSet};

/// One exposed accessor (property) of a type.
///
/// `owner_class` and `backing_field` are kept side by side: an accessor
/// declared by a protocol may be backed by a field the concrete type
/// synthesized, and the mapping engine decides which fact matters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorDescriptor {
    pub name: String,
    pub kind: EncodingKind,
    pub type_encoding: String,
    /// Type qualifiers of the value encoding plus accessor qualifiers.
    pub qualifiers: QualifierSet,
    /// Stored field behind the accessor; `None` for computed accessors.
    pub backing_field: Option<String>,
    /// Declaring protocol/mixin when it is not the described type.
    pub owner_class: Option<String>,
    /// Read accessor identifier; `None` for write-only accessors.
    pub getter: Option<String>,
    /// Write accessor identifier; `None` for read-only accessors.
    pub setter: Option<String>,
    /// Class named by an object-typed encoding.
    pub class_name: Option<String>,
    pub protocols: Vec<String>,
}

impl AccessorDescriptor {
    pub fn is_readonly(&self) -> bool {
        self.qualifiers.contains(QualifierSet::READONLY)
    }

    pub fn is_weak(&self) -> bool {
        self.qualifiers.contains(QualifierSet::WEAK)
    }

    pub fn is_copy(&self) -> bool {
        self.qualifiers.contains(QualifierSet::COPY)
    }

    pub fn is_dynamic(&self) -> bool {
        self.qualifiers.contains(QualifierSet::DYNAMIC)
    }

    /// Both read and write identifiers are present.
    pub fn is_read_write(&self) -> bool {
        self.getter.is_some() && self.setter.is_some()
    }

    /// Declared through a protocol or mixin rather than the type itself.
    pub fn is_inherited_declaration(&self) -> bool {
        self.owner_class.is_some()
    }
}

/// Default setter identifier for an accessor: `name` -> `setName:`.
pub fn default_setter_name(name: &str) -> String {
    let mut chars = name.chars();
    let mut setter = String::with_capacity(name.len() + 4);
    setter.push_str("set");
    if let Some(first) = chars.next() {
        setter.extend(first.to_uppercase());
    }
    setter.push_str(chars.as_str());
    setter.push(':');
    setter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setter_names() {
        assert_eq!(default_setter_name("uid"), "setUid:");
        assert_eq!(default_setter_name("URL"), "setURL:");
        assert_eq!(default_setter_name("x"), "setX:");
        assert_eq!(default_setter_name("\u{e9}t\u{e9}"), "set\u{c9}t\u{e9}:");
    }
}

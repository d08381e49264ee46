// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use crate::encoding::{split_signature, MethodSignature};

/// One declared method. Metadata only; nothing here invokes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: String,
    /// Dispatch identifier, equal to `name` for hosts without separate selectors.
    pub selector: String,
    /// Opaque implementation handle from the host.
    pub implementation: u64,
    pub type_encoding: String,
    pub return_type: String,
    pub argument_types: Vec<String>,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>, type_encoding: impl Into<String>, implementation: u64) -> Self {
        let name = name.into();
        let type_encoding = type_encoding.into();
        let MethodSignature {
            return_type,
            argument_types,
        } = split_signature(&type_encoding);
        Self {
            selector: name.clone(),
            name,
            implementation,
            type_encoding,
            return_type,
            argument_types,
        }
    }

    pub fn arity(&self) -> usize {
        self.argument_types.len()
    }
}

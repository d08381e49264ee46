// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Descriptor value types.
//!
//! - **FieldDescriptor**: one stored field (name, offset, classified encoding)
//! - **AccessorDescriptor**: one property with its getter/setter identifiers
//! - **MethodDescriptor**: one declared method and its split signature
//! - **TypeDescriptor**: the shape of a type, linked to its parent's shape

mod accessor;
mod field;
mod method;
mod type_descriptor;

pub use accessor::{default_setter_name, AccessorDescriptor};
pub use field::FieldDescriptor;
pub use method::MethodDescriptor;
pub use type_descriptor::{Ancestors, TypeDescriptor};

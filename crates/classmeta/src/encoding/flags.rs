// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Qualifier flags attached to a classified encoding.
//!
//! Two independent groups share one bitset:
//! - type qualifiers, read from the leading characters of an encoding token
//! - accessor qualifiers, read from an accessor's attribute string

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Bitset of encoding qualifiers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct QualifierSet(pub u16);

impl QualifierSet {
    // --- Type qualifiers ---
    /// `r` const
    pub const CONST: Self = Self(0x0001);

    /// `n` in
    pub const IN: Self = Self(0x0002);

    /// `N` inout
    pub const INOUT: Self = Self(0x0004);

    /// `o` out
    pub const OUT: Self = Self(0x0008);

    /// `O` bycopy
    pub const BYCOPY: Self = Self(0x0010);

    /// `R` byref
    pub const BYREF: Self = Self(0x0020);

    /// `V` oneway
    pub const ONEWAY: Self = Self(0x0040);

    // --- Accessor qualifiers ---
    /// `R` read-only accessor
    pub const READONLY: Self = Self(0x0100);

    /// `C` copy semantics on assignment
    pub const COPY: Self = Self(0x0200);

    /// `&` retained reference
    pub const RETAIN: Self = Self(0x0400);

    /// `N` non-atomic accessor
    pub const NONATOMIC: Self = Self(0x0800);

    /// `W` weak reference
    pub const WEAK: Self = Self(0x1000);

    /// `G` custom getter name
    pub const CUSTOM_GETTER: Self = Self(0x2000);

    /// `S` custom setter name
    pub const CUSTOM_SETTER: Self = Self(0x4000);

    /// `D` accessors provided at runtime
    pub const DYNAMIC: Self = Self(0x8000);

    /// Mask of the type qualifier group.
    pub const TYPE_MASK: Self = Self(0x00FF);

    /// Mask of the accessor qualifier group.
    pub const ACCESSOR_MASK: Self = Self(0xFF00);

    const NAMES: [(Self, &'static str); 15] = [
        (Self::CONST, "const"),
        (Self::IN, "in"),
        (Self::INOUT, "inout"),
        (Self::OUT, "out"),
        (Self::BYCOPY, "bycopy"),
        (Self::BYREF, "byref"),
        (Self::ONEWAY, "oneway"),
        (Self::READONLY, "readonly"),
        (Self::COPY, "copy"),
        (Self::RETAIN, "retain"),
        (Self::NONATOMIC, "nonatomic"),
        (Self::WEAK, "weak"),
        (Self::CUSTOM_GETTER, "getter"),
        (Self::CUSTOM_SETTER, "setter"),
        (Self::DYNAMIC, "dynamic"),
    ];

    /// Empty flags
    pub const fn empty() -> Self {
        Self(0)
    }

    /// True when no flag is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Check that every bit of `flag` is set.
    pub const fn contains(self, flag: Self) -> bool {
        (self.0 & flag.0) == flag.0
    }

    pub fn insert(&mut self, flag: Self) {
        self.0 |= flag.0;
    }

    /// Only the type qualifier group.
    pub const fn type_qualifiers(self) -> Self {
        Self(self.0 & Self::TYPE_MASK.0)
    }

    /// Only the accessor qualifier group.
    pub const fn accessor_qualifiers(self) -> Self {
        Self(self.0 & Self::ACCESSOR_MASK.0)
    }

    /// Names of the set flags, low bit first.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMES
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

impl BitOr for QualifierSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for QualifierSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for QualifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

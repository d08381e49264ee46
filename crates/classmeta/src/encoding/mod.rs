// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Encoding classifier.
//!
//! Maps a type-encoding token (`q`, `@"NSString"`, `r^{CGPoint=dd}`, ...) to an
//! [`EncodingKind`] and the [`QualifierSet`] found in its prefix.
//!
//! Classification is total: tokens the classifier does not recognize come
//! back as [`EncodingKind::Unknown`] so a mapping engine can skip the member
//! instead of aborting the whole conversion.
//!
//! # Grammar
//!
//! ```text
//! token      := qualifier* kind-char rest
//! qualifier  := 'r' | 'n' | 'N' | 'o' | 'O' | 'R' | 'V'
//! kind-char  := 'v' | 'B' | 'c' | 'C' | 's' | 'S' | 'i' | 'I' | 'l' | 'L'
//!             | 'q' | 'Q' | 'f' | 'd' | 'D' | '#' | ':' | '*' | '^'
//!             | '[' | '(' | '{' | '@'          ('@?' is a block)
//! ```

mod attributes;
mod flags;
mod memo;
mod signature;

pub use attributes::AccessorAttributes;
pub use flags::QualifierSet;
pub use memo::EncodingMemo;
pub use signature::{split_signature, MethodSignature};

use std::fmt;

/// Semantic kind of an encoded type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum EncodingKind {
    /// Unrecognized or empty encoding
    #[default]
    Unknown = 0,
    /// `v`
    Void = 1,
    /// `B` (C++ bool / C99 _Bool)
    Bool = 2,
    /// `c` char, also the legacy BOOL
    Int8 = 3,
    /// `C`
    UInt8 = 4,
    /// `s`
    Int16 = 5,
    /// `S`
    UInt16 = 6,
    /// `i`, `l`
    Int32 = 7,
    /// `I`, `L`
    UInt32 = 8,
    /// `q`
    Int64 = 9,
    /// `Q`
    UInt64 = 10,
    /// `f`
    Float = 11,
    /// `d`
    Double = 12,
    /// `D`
    LongDouble = 13,
    /// `@` object reference
    ObjectRef = 14,
    /// `#` class object
    ClassRef = 15,
    /// `:` selector
    SelectorRef = 16,
    /// `@?` block / function reference
    FunctionRef = 17,
    /// `^type` pointer
    RawPointer = 18,
    /// `{name=...}`
    Struct = 19,
    /// `(name=...)`
    Union = 20,
    /// `*` char pointer
    CString = 21,
    /// `[len type]`
    FixedArray = 22,
}

impl EncodingKind {
    /// Integer, floating point or boolean scalar.
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Bool
                | Self::Int8
                | Self::UInt8
                | Self::Int16
                | Self::UInt16
                | Self::Int32
                | Self::UInt32
                | Self::Int64
                | Self::UInt64
                | Self::Float
                | Self::Double
                | Self::LongDouble
        )
    }

    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::UInt8
                | Self::Int16
                | Self::UInt16
                | Self::Int32
                | Self::UInt32
                | Self::Int64
                | Self::UInt64
        )
    }

    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float | Self::Double | Self::LongDouble)
    }

    /// References the mapping engine treats as objects (object, class, block).
    pub const fn is_object_like(self) -> bool {
        matches!(self, Self::ObjectRef | Self::ClassRef | Self::FunctionRef)
    }

    /// Size in bytes for fixed-size scalar kinds on a 64-bit host.
    pub const fn size_hint(self) -> Option<usize> {
        match self {
            Self::Bool | Self::Int8 | Self::UInt8 => Some(1),
            Self::Int16 | Self::UInt16 => Some(2),
            Self::Int32 | Self::UInt32 | Self::Float => Some(4),
            Self::Int64 | Self::UInt64 | Self::Double => Some(8),
            Self::LongDouble => Some(16),
            Self::ObjectRef
            | Self::ClassRef
            | Self::SelectorRef
            | Self::FunctionRef
            | Self::RawPointer
            | Self::CString => Some(std::mem::size_of::<usize>()),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Void => "void",
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::UInt8 => "uint8",
            Self::Int16 => "int16",
            Self::UInt16 => "uint16",
            Self::Int32 => "int32",
            Self::UInt32 => "uint32",
            Self::Int64 => "int64",
            Self::UInt64 => "uint64",
            Self::Float => "float",
            Self::Double => "double",
            Self::LongDouble => "long double",
            Self::ObjectRef => "object",
            Self::ClassRef => "class",
            Self::SelectorRef => "selector",
            Self::FunctionRef => "block",
            Self::RawPointer => "pointer",
            Self::Struct => "struct",
            Self::Union => "union",
            Self::CString => "c-string",
            Self::FixedArray => "c-array",
        }
    }
}

impl fmt::Display for EncodingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an encoded type token.
///
/// Never fails: an empty or unrecognized token yields
/// [`EncodingKind::Unknown`] together with whatever qualifiers were read
/// before the classifier gave up.
pub fn classify(token: &str) -> (EncodingKind, QualifierSet) {
    let bytes = token.as_bytes();
    let mut qualifiers = QualifierSet::empty();
    let mut idx = 0;

    while let Some(&b) = bytes.get(idx) {
        let flag = match b {
            b'r' => QualifierSet::CONST,
            b'n' => QualifierSet::IN,
            b'N' => QualifierSet::INOUT,
            b'o' => QualifierSet::OUT,
            b'O' => QualifierSet::BYCOPY,
            b'R' => QualifierSet::BYREF,
            b'V' => QualifierSet::ONEWAY,
            _ => break,
        };
        qualifiers.insert(flag);
        idx += 1;
    }

    let Some(&lead) = bytes.get(idx) else {
        return (EncodingKind::Unknown, qualifiers);
    };

    let kind = match lead {
        b'v' => EncodingKind::Void,
        b'B' => EncodingKind::Bool,
        b'c' => EncodingKind::Int8,
        b'C' => EncodingKind::UInt8,
        b's' => EncodingKind::Int16,
        b'S' => EncodingKind::UInt16,
        b'i' | b'l' => EncodingKind::Int32,
        b'I' | b'L' => EncodingKind::UInt32,
        b'q' => EncodingKind::Int64,
        b'Q' => EncodingKind::UInt64,
        b'f' => EncodingKind::Float,
        b'd' => EncodingKind::Double,
        b'D' => EncodingKind::LongDouble,
        b'#' => EncodingKind::ClassRef,
        b':' => EncodingKind::SelectorRef,
        b'*' => EncodingKind::CString,
        b'^' => EncodingKind::RawPointer,
        b'[' => EncodingKind::FixedArray,
        b'(' => EncodingKind::Union,
        b'{' => EncodingKind::Struct,
        b'@' if bytes.get(idx + 1) == Some(&b'?') => EncodingKind::FunctionRef,
        b'@' => EncodingKind::ObjectRef,
        _ => {
            log::trace!("unrecognized type encoding '{}'", token);
            EncodingKind::Unknown
        }
    };

    (kind, qualifiers)
}

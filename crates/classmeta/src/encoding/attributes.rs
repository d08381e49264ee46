// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Accessor attribute strings.
//!
//! An accessor is described by a comma separated attribute list, e.g.
//! `T@"NSString<NSCopying>",C,N,V_name`:
//!
//! | Attribute | Meaning |
//! |-----------|---------|
//! | `T<enc>`  | value type encoding |
//! | `V<name>` | backing field |
//! | `R`       | read-only |
//! | `C`       | copy |
//! | `&`       | retain |
//! | `N`       | non-atomic |
//! | `D`       | dynamic |
//! | `W`       | weak |
//! | `G<sel>`  | custom getter |
//! | `S<sel>`  | custom setter |

use super::{classify, EncodingKind, QualifierSet};

/// Parsed accessor attribute list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessorAttributes {
    /// Raw `T` encoding (empty when absent).
    pub type_encoding: String,
    pub kind: EncodingKind,
    /// Type qualifiers of the `T` encoding plus accessor qualifiers.
    pub qualifiers: QualifierSet,
    pub backing_field: Option<String>,
    pub custom_getter: Option<String>,
    pub custom_setter: Option<String>,
    /// Class named in an object encoding (`@"NSDate"` -> `NSDate`).
    pub class_name: Option<String>,
    /// Protocols named in an object encoding (`@"<A><B>"` -> `[A, B]`).
    pub protocols: Vec<String>,
}

impl AccessorAttributes {
    /// Parse an attribute list. Unknown attributes are skipped.
    pub fn parse(attributes: &str) -> Self {
        let mut parsed = Self::default();

        for attr in attributes.split(',') {
            let mut chars = attr.chars();
            let Some(tag) = chars.next() else {
                continue;
            };
            let value = chars.as_str();

            match tag {
                'T' => {
                    let (kind, qualifiers) = classify(value);
                    parsed.type_encoding = value.to_string();
                    parsed.kind = kind;
                    parsed.qualifiers |= qualifiers;
                    if kind == EncodingKind::ObjectRef {
                        let (class_name, protocols) = parse_object_type(value);
                        parsed.class_name = class_name;
                        parsed.protocols = protocols;
                    }
                }
                'V' if !value.is_empty() => parsed.backing_field = Some(value.to_string()),
                'R' => parsed.qualifiers |= QualifierSet::READONLY,
                'C' => parsed.qualifiers |= QualifierSet::COPY,
                '&' => parsed.qualifiers |= QualifierSet::RETAIN,
                'N' => parsed.qualifiers |= QualifierSet::NONATOMIC,
                'D' => parsed.qualifiers |= QualifierSet::DYNAMIC,
                'W' => parsed.qualifiers |= QualifierSet::WEAK,
                'G' if !value.is_empty() => {
                    parsed.qualifiers |= QualifierSet::CUSTOM_GETTER;
                    parsed.custom_getter = Some(value.to_string());
                }
                'S' if !value.is_empty() => {
                    parsed.qualifiers |= QualifierSet::CUSTOM_SETTER;
                    parsed.custom_setter = Some(value.to_string());
                }
                _ => {}
            }
        }

        parsed
    }

    pub fn is_readonly(&self) -> bool {
        self.qualifiers.contains(QualifierSet::READONLY)
    }
}

/// Split `@"Class<P1><P2>"` into its class name and protocol list.
fn parse_object_type(encoding: &str) -> (Option<String>, Vec<String>) {
    let start = encoding.find("@\"").map(|i| i + 2);
    let Some(start) = start else {
        return (None, Vec::new());
    };
    let rest = &encoding[start..];
    let quoted = rest.find('"').map_or(rest, |end| &rest[..end]);

    let (class_part, protocol_part) = match quoted.find('<') {
        Some(lt) => quoted.split_at(lt),
        None => (quoted, ""),
    };

    let class_name = (!class_part.is_empty()).then(|| class_part.to_string());
    let protocols = protocol_part
        .split(['<', '>'])
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    (class_name, protocols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_copy_string_accessor() {
        let attrs = AccessorAttributes::parse(r#"T@"NSString",C,N,V_name"#);
        assert_eq!(attrs.kind, EncodingKind::ObjectRef);
        assert_eq!(attrs.type_encoding, r#"@"NSString""#);
        assert_eq!(attrs.class_name.as_deref(), Some("NSString"));
        assert!(attrs.protocols.is_empty());
        assert_eq!(attrs.backing_field.as_deref(), Some("_name"));
        assert_eq!(
            attrs.qualifiers,
            QualifierSet::COPY | QualifierSet::NONATOMIC
        );
        assert!(!attrs.is_readonly());
    }

    #[test]
    fn parses_custom_accessors_and_flags() {
        let attrs = AccessorAttributes::parse("TB,R,N,GisEnabled,SsetOn:,D,W,&");
        assert_eq!(attrs.kind, EncodingKind::Bool);
        assert_eq!(attrs.custom_getter.as_deref(), Some("isEnabled"));
        assert_eq!(attrs.custom_setter.as_deref(), Some("setOn:"));
        assert!(attrs.is_readonly());
        for flag in [
            QualifierSet::CUSTOM_GETTER,
            QualifierSet::CUSTOM_SETTER,
            QualifierSet::DYNAMIC,
            QualifierSet::WEAK,
            QualifierSet::RETAIN,
        ] {
            assert!(attrs.qualifiers.contains(flag), "missing {:?}", flag);
        }
        assert!(attrs.backing_field.is_none());
    }

    #[test]
    fn parses_protocol_qualified_objects() {
        let attrs = AccessorAttributes::parse(r#"T@"NSArray<NSCopying><NSCoding>",&"#);
        assert_eq!(attrs.class_name.as_deref(), Some("NSArray"));
        assert_eq!(attrs.protocols, vec!["NSCopying", "NSCoding"]);

        let attrs = AccessorAttributes::parse(r#"T@"<Delegate>",W"#);
        assert!(attrs.class_name.is_none());
        assert_eq!(attrs.protocols, vec!["Delegate"]);

        let attrs = AccessorAttributes::parse("T@,&");
        assert_eq!(attrs.kind, EncodingKind::ObjectRef);
        assert!(attrs.class_name.is_none());
    }

    #[test]
    fn tolerates_garbage() {
        let attrs = AccessorAttributes::parse(",,Z,V,T");
        assert_eq!(attrs.kind, EncodingKind::Unknown);
        assert!(attrs.backing_field.is_none());
        assert!(attrs.qualifiers.is_empty());

        assert_eq!(AccessorAttributes::parse(""), AccessorAttributes::default());
    }
}

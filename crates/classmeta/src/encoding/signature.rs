// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Method signature splitting.
//!
//! A method type encoding concatenates the return type and every argument
//! type, each optionally followed by a frame offset: `v24@0:8@16` is
//! `void (id self, SEL _cmd, id arg)`.

/// Return and argument encodings of one method.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MethodSignature {
    pub return_type: String,
    pub argument_types: Vec<String>,
}

/// Split a method type encoding into per-value tokens.
///
/// Frame offsets are dropped. Aggregates (`{}`, `()`, `[]`), quoted class
/// names and block signatures (`@?<...>`) stay in one token.
pub fn split_signature(encoding: &str) -> MethodSignature {
    let bytes = encoding.as_bytes();
    let mut tokens = Vec::new();
    let mut idx = 0;

    while idx < bytes.len() {
        let end = scan_type(encoding, idx);
        tokens.push(encoding[idx..end].to_string());
        idx = end;
        while matches!(bytes.get(idx), Some(b'0'..=b'9' | b'-' | b'+')) {
            idx += 1;
        }
    }

    let mut tokens = tokens.into_iter();
    MethodSignature {
        return_type: tokens.next().unwrap_or_default(),
        argument_types: tokens.collect(),
    }
}

/// End index (exclusive) of the type starting at `start`. Always > `start`
/// when `start` is in bounds.
fn scan_type(encoding: &str, start: usize) -> usize {
    let bytes = encoding.as_bytes();
    let mut idx = start;
    while matches!(
        bytes.get(idx),
        Some(b'r' | b'n' | b'N' | b'o' | b'O' | b'R' | b'V')
    ) {
        idx += 1;
    }

    match bytes.get(idx) {
        None => idx,
        Some(b'^') => scan_type(encoding, idx + 1),
        Some(b'@') => {
            idx += 1;
            match bytes.get(idx) {
                Some(b'"') => skip_quoted(bytes, idx),
                Some(b'?') if bytes.get(idx + 1) == Some(&b'<') => {
                    scan_balanced(bytes, idx + 1, b'<', b'>')
                }
                Some(b'?') => idx + 1,
                _ => idx,
            }
        }
        Some(b'{') => scan_balanced(bytes, idx, b'{', b'}'),
        Some(b'(') => scan_balanced(bytes, idx, b'(', b')'),
        Some(b'[') => scan_balanced(bytes, idx, b'[', b']'),
        Some(_) => {
            let width = encoding[idx..].chars().next().map_or(1, char::len_utf8);
            idx + width
        }
    }
}

fn skip_quoted(bytes: &[u8], open_quote: usize) -> usize {
    let mut idx = open_quote + 1;
    while let Some(&b) = bytes.get(idx) {
        idx += 1;
        if b == b'"' {
            break;
        }
    }
    idx
}

fn scan_balanced(bytes: &[u8], start: usize, open: u8, close: u8) -> usize {
    let mut depth = 0usize;
    let mut idx = start;
    while let Some(&b) = bytes.get(idx) {
        if b == b'"' {
            idx = skip_quoted(bytes, idx);
            continue;
        }
        idx += 1;
        if b == open {
            depth += 1;
        } else if b == close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return idx;
            }
        }
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_plain_method() {
        let sig = split_signature("v24@0:8@16");
        assert_eq!(sig.return_type, "v");
        assert_eq!(sig.argument_types, vec!["@", ":", "@"]);
    }

    #[test]
    fn keeps_aggregates_and_class_names_whole() {
        let sig = split_signature(r#"{CGRect={CGPoint=dd}{CGSize=dd}}16@0:8"#);
        assert_eq!(sig.return_type, "{CGRect={CGPoint=dd}{CGSize=dd}}");
        assert_eq!(sig.argument_types, vec!["@", ":"]);

        let sig = split_signature(r#"@"NSString"16@0:8r^{Foo="x"i}[4q](U=ic)"#);
        assert_eq!(sig.return_type, r#"@"NSString""#);
        assert_eq!(
            sig.argument_types,
            vec!["@", ":", r#"r^{Foo="x"i}"#, "[4q]", "(U=ic)"]
        );
    }

    #[test]
    fn handles_blocks_and_offsetless_encodings() {
        let sig = split_signature("v@:@?<v@?@>Vv");
        assert_eq!(sig.return_type, "v");
        assert_eq!(sig.argument_types, vec!["@", ":", "@?<v@?@>", "Vv"]);
    }

    #[test]
    fn empty_and_truncated_input() {
        assert_eq!(split_signature(""), MethodSignature::default());

        let sig = split_signature("v16@0:8{Unclosed=i");
        assert_eq!(sig.argument_types.last().map(String::as_str), Some("{Unclosed=i"));

        let sig = split_signature("^");
        assert_eq!(sig.return_type, "^");
    }
}

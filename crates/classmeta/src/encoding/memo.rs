// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bounded per-token memo for [`classify`](super::classify).
//!
//! Classification is pure, so results can be shared freely between threads.
//! A capacity of zero disables memoization and every call classifies again.

use super::{classify, EncodingKind, QualifierSet};
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;

pub struct EncodingMemo {
    inner: Option<Mutex<LruCache<String, (EncodingKind, QualifierSet)>>>,
}

impl EncodingMemo {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
        }
    }

    /// Memo that never stores anything.
    #[must_use]
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn classify(&self, token: &str) -> (EncodingKind, QualifierSet) {
        let Some(inner) = &self.inner else {
            return classify(token);
        };

        if let Some(hit) = inner.lock().get(token) {
            return *hit;
        }

        // Classify outside the lock; a racing duplicate insert stores the same value.
        let result = classify(token);
        inner.lock().put(token.to_string(), result);
        result
    }

    pub fn len(&self) -> usize {
        self.inner.as_ref().map_or(0, |inner| inner.lock().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.inner
            .as_ref()
            .map_or(0, |inner| inner.lock().cap().get())
    }
}

impl std::fmt::Debug for EncodingMemo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodingMemo")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memo_agrees_with_classify_and_stays_bounded() {
        let memo = EncodingMemo::new(2);
        for token in ["q", "rq", r#"@"NSDate""#, "q", "{S=i}"] {
            assert_eq!(memo.classify(token), classify(token));
        }
        assert_eq!(memo.len(), 2);
        assert_eq!(memo.capacity(), 2);
    }

    #[test]
    fn zero_capacity_disables() {
        let memo = EncodingMemo::new(0);
        assert_eq!(memo.classify("d"), (EncodingKind::Double, QualifierSet::empty()));
        assert!(memo.is_empty());
        assert_eq!(memo.capacity(), 0);
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Cache configuration.
//!
//! Defaults suit most hosts; override them in code with the `with_*`
//! setters or, with the `config-loaders` feature, from YAML:
//!
//! ```yaml
//! encoding_memo_capacity: 1024
//! max_ancestor_depth: 64
//! initial_capacity: 128
//! ```

#[cfg(feature = "config-loaders")]
use crate::error::ConfigError;
#[cfg(feature = "config-loaders")]
use std::path::Path;

/// Default number of memoized encoding tokens.
pub const DEFAULT_ENCODING_MEMO_CAPACITY: usize = 512;

/// Default bound on ancestor chain length; deeper chains are treated as cycles.
pub const DEFAULT_MAX_ANCESTOR_DEPTH: usize = 64;

/// Default number of registry slots reserved up front.
pub const DEFAULT_INITIAL_CAPACITY: usize = 64;

/// Tunables for [`TypeMetadataCache`](crate::TypeMetadataCache).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config-loaders", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "config-loaders", serde(default, deny_unknown_fields))]
pub struct CacheConfig {
    /// Entries kept by the per-token classification memo (0 disables it).
    pub encoding_memo_capacity: usize,
    /// Longest accepted ancestor chain. Must be at least 1.
    pub max_ancestor_depth: usize,
    /// Registry capacity reserved at construction.
    pub initial_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            encoding_memo_capacity: DEFAULT_ENCODING_MEMO_CAPACITY,
            max_ancestor_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub fn with_encoding_memo_capacity(mut self, capacity: usize) -> Self {
        self.encoding_memo_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_max_ancestor_depth(mut self, depth: usize) -> Self {
        self.max_ancestor_depth = depth;
        self
    }

    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_ancestor_depth == 0 {
            return Err("max_ancestor_depth must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(feature = "config-loaders")]
impl CacheConfig {
    /// Parse and validate a YAML document. Missing keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CacheConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_ancestor_depth, DEFAULT_MAX_ANCESTOR_DEPTH);
    }

    #[test]
    fn zero_depth_is_rejected() {
        let config = CacheConfig::default().with_max_ancestor_depth(0);
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "config-loaders")]
    #[test]
    fn yaml_overrides_and_defaults() {
        let config = CacheConfig::from_yaml_str("encoding_memo_capacity: 0\n").expect("parse");
        assert_eq!(config.encoding_memo_capacity, 0);
        assert_eq!(config.initial_capacity, DEFAULT_INITIAL_CAPACITY);

        let err = CacheConfig::from_yaml_str("max_ancestor_depth: 0\n").expect_err("invalid");
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = CacheConfig::from_yaml_str("bogus_key: 1\n").expect_err("unknown key");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[cfg(feature = "config-loaders")]
    #[test]
    fn yaml_file_roundtrip() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "max_ancestor_depth: 8\ninitial_capacity: 4").expect("write");

        let config = CacheConfig::from_yaml_file(file.path()).expect("load");
        assert_eq!(config.max_ancestor_depth, 8);
        assert_eq!(config.initial_capacity, 4);
        assert_eq!(config.encoding_memo_capacity, DEFAULT_ENCODING_MEMO_CAPACITY);

        let missing = CacheConfig::from_yaml_file(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}

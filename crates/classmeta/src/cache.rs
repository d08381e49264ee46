// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Concurrent registry of type descriptors.
//!
//! [`TypeMetadataCache`] makes sure a type is introspected once per shape:
//! the first lookup builds and publishes its descriptor, later lookups share
//! the same `Arc`. Concurrent misses on one handle are coalesced into a
//! single build whose result (success or error) every caller receives.
//!
//! Shape changes are pull-based. The host calls
//! [`mark_stale`](TypeMetadataCache::mark_stale) after mutating a type;
//! holders notice through [`TypeDescriptor::is_stale`] and ask again, which
//! rebuilds and replaces the entry. Nothing is rebuilt in the background.

mod flight;
mod stats;

pub use stats::LookupStats;

use crate::build::{build_from_shape, validate_ancestry};
use crate::config::CacheConfig;
use crate::descriptor::TypeDescriptor;
use crate::encoding::{EncodingKind, EncodingMemo, QualifierSet};
use crate::error::{IntrospectionError, LookupError, UnknownTypeError};
use crate::introspect::{TypeHandle, TypeIntrospector};
use flight::{InFlight, Role};
use parking_lot::RwLock;
use stats::StatsCounters;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Shared, thread-safe descriptor cache over one introspector.
///
/// Typically created once and shared through an `Arc`.
pub struct TypeMetadataCache<I: TypeIntrospector> {
    introspector: I,
    config: CacheConfig,
    registry: RwLock<HashMap<TypeHandle, Arc<TypeDescriptor>>>,
    in_flight: InFlight,
    memo: EncodingMemo,
    stats: StatsCounters,
}

impl<I: TypeIntrospector> TypeMetadataCache<I> {
    /// Cache with the default [`CacheConfig`].
    #[must_use]
    pub fn new(introspector: I) -> Self {
        Self::with_config(introspector, CacheConfig::default())
    }

    /// Cache with explicit tunables. An invalid config is replaced by the defaults.
    #[must_use]
    pub fn with_config(introspector: I, config: CacheConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(reason) => {
                log::warn!("[classmeta] {}, using default cache config", reason);
                CacheConfig::default()
            }
        };

        Self {
            introspector,
            registry: RwLock::new(HashMap::with_capacity(config.initial_capacity)),
            in_flight: InFlight::new(),
            memo: EncodingMemo::new(config.encoding_memo_capacity),
            stats: StatsCounters::default(),
            config,
        }
    }

    /// Descriptor of `handle`, building and publishing it on a miss.
    ///
    /// Entries that are stale, or whose ancestor chain holds a stale
    /// descriptor, count as misses and are rebuilt. Failed builds are not
    /// cached; the next lookup tries again.
    pub fn descriptor_for(&self, handle: TypeHandle) -> Result<Arc<TypeDescriptor>, IntrospectionError> {
        if let Some(hit) = self.fresh(handle) {
            self.stats.record_hit();
            log::trace!("[classmeta] hit {} ({})", hit.name(), handle);
            return Ok(hit);
        }

        match flight::join(&self.in_flight, handle) {
            Role::Waiter(slot) => {
                self.stats.record_miss();
                self.stats.record_coalesced();
                log::trace!("[classmeta] waiting on in-flight build of {}", handle);
                match slot.wait() {
                    // Marked stale after the leader published; ask again.
                    Ok(descriptor) if descriptor.chain_is_stale() => {
                        log::trace!("[classmeta] coalesced result for {} went stale", handle);
                        self.descriptor_for(handle)
                    }
                    outcome => outcome,
                }
            }
            Role::Leader(guard) => {
                // The previous leader may have published between our miss and the election.
                if let Some(hit) = self.fresh(handle) {
                    self.stats.record_hit();
                    return guard.finish(Ok(hit));
                }
                self.stats.record_miss();
                let outcome = self.build_and_publish(handle);
                guard.finish(outcome)
            }
        }
    }

    /// Descriptor of the live type named `name`.
    ///
    /// An unknown name fails with [`UnknownTypeError`] and leaves the cache
    /// untouched.
    pub fn descriptor_for_name(&self, name: &str) -> Result<Arc<TypeDescriptor>, LookupError> {
        let Some(handle) = self.introspector.resolve_name(name) else {
            log::trace!("[classmeta] no live type named '{}'", name);
            return Err(UnknownTypeError::new(name).into());
        };
        Ok(self.descriptor_for(handle)?)
    }

    /// Flag the cached descriptor of `handle` as out of date.
    ///
    /// Returns `false` when nothing is cached for `handle`. The entry stays in
    /// place until the next lookup rebuilds it.
    pub fn mark_stale(&self, handle: TypeHandle) -> bool {
        let registry = self.registry.read();
        match registry.get(&handle) {
            Some(descriptor) => {
                descriptor.mark_stale();
                log::debug!("[classmeta] marked {} ({}) stale", descriptor.name(), handle);
                true
            }
            None => false,
        }
    }

    /// Whether `descriptor` was marked stale after it was built.
    pub fn is_stale(&self, descriptor: &TypeDescriptor) -> bool {
        descriptor.is_stale()
    }

    /// Cached entry for `handle`, stale or not, without building.
    pub fn peek(&self, handle: TypeHandle) -> Option<Arc<TypeDescriptor>> {
        self.registry.read().get(&handle).map(Arc::clone)
    }

    pub fn contains(&self, handle: TypeHandle) -> bool {
        self.registry.read().contains_key(&handle)
    }

    /// Number of cached entries, stale ones included.
    pub fn len(&self) -> usize {
        self.registry.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.read().is_empty()
    }

    /// Drop the entry for `handle`. Outstanding `Arc`s stay valid.
    pub fn evict(&self, handle: TypeHandle) -> Option<Arc<TypeDescriptor>> {
        self.registry.write().remove(&handle)
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.registry.write().clear();
    }

    #[must_use]
    pub fn stats(&self) -> LookupStats {
        self.stats.snapshot()
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn introspector(&self) -> &I {
        &self.introspector
    }

    /// Classify one encoding token through the cache's memo.
    pub fn classify(&self, token: &str) -> (EncodingKind, QualifierSet) {
        self.memo.classify(token)
    }

    fn fresh(&self, handle: TypeHandle) -> Option<Arc<TypeDescriptor>> {
        self.registry
            .read()
            .get(&handle)
            .filter(|descriptor| !descriptor.chain_is_stale())
            .map(Arc::clone)
    }

    fn build_and_publish(&self, handle: TypeHandle) -> Result<Arc<TypeDescriptor>, IntrospectionError> {
        match self.build(handle) {
            Ok(descriptor) => {
                let descriptor = Arc::new(descriptor);
                let replaced = self
                    .registry
                    .write()
                    .insert(handle, Arc::clone(&descriptor));
                self.stats.record_build();
                log::debug!(
                    "[classmeta] {} {} ({}): {} fields, {} accessors, {} methods",
                    if replaced.is_some() { "rebuilt" } else { "built" },
                    descriptor.name(),
                    handle,
                    descriptor.fields().len(),
                    descriptor.accessors().len(),
                    descriptor.methods().len()
                );
                Ok(descriptor)
            }
            Err(err) => {
                self.stats.record_failure();
                log::warn!("[classmeta] build of {} failed: {}", handle, err);
                Err(err)
            }
        }
    }

    // Runs without the registry lock; parents go through `descriptor_for`
    // so shared ancestors are built once.
    fn build(&self, handle: TypeHandle) -> Result<TypeDescriptor, IntrospectionError> {
        let shape = self.introspector.inspect(handle)?;
        validate_ancestry(
            &self.introspector,
            handle,
            &shape,
            self.config.max_ancestor_depth,
            |ancestor| self.fresh(ancestor),
        )?;
        build_from_shape(
            handle,
            shape,
            |token| self.memo.classify(token),
            |parent| self.descriptor_for(parent),
        )
    }
}

impl<I: TypeIntrospector> fmt::Debug for TypeMetadataCache<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMetadataCache")
            .field("entries", &self.len())
            .field("in_flight", &self.in_flight.len())
            .field("memo", &self.memo)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

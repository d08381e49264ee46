// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Single-flight build slots.
//!
//! The first caller to miss on a handle installs a [`BuildSlot`] and becomes
//! the leader; later callers find the slot and block on its condvar until the
//! leader hands over its result. The [`FlightGuard`] held by the leader
//! always completes the slot, with [`IntrospectionError::BuildAborted`] if
//! the leader unwinds.

use crate::descriptor::TypeDescriptor;
use crate::error::IntrospectionError;
use crate::introspect::TypeHandle;
use dashmap::DashMap;
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;

pub(super) type BuildResult = Result<Arc<TypeDescriptor>, IntrospectionError>;

pub(super) type InFlight = DashMap<TypeHandle, Arc<BuildSlot>>;

/// One in-flight build.
#[derive(Debug, Default)]
pub(super) struct BuildSlot {
    result: Mutex<Option<BuildResult>>,
    ready: Condvar,
}

impl BuildSlot {
    /// Store the outcome and wake every waiter. Only the first call counts.
    fn complete(&self, outcome: BuildResult) {
        let mut result = self.result.lock();
        if result.is_none() {
            *result = Some(outcome);
        }
        self.ready.notify_all();
    }

    /// Block until the leader completes the slot.
    pub(super) fn wait(&self) -> BuildResult {
        let mut result = self.result.lock();
        loop {
            if let Some(outcome) = result.as_ref() {
                return outcome.clone();
            }
            self.ready.wait(&mut result);
        }
    }
}

/// Outcome of joining the flight for a handle.
pub(super) enum Role<'a> {
    Leader(FlightGuard<'a>),
    Waiter(Arc<BuildSlot>),
}

/// Install a slot for `handle`, or join the one already there.
pub(super) fn join(in_flight: &InFlight, handle: TypeHandle) -> Role<'_> {
    match in_flight.entry(handle) {
        dashmap::mapref::entry::Entry::Occupied(entry) => Role::Waiter(Arc::clone(entry.get())),
        dashmap::mapref::entry::Entry::Vacant(entry) => {
            let slot = Arc::new(BuildSlot::default());
            entry.insert(Arc::clone(&slot));
            Role::Leader(FlightGuard {
                in_flight,
                handle,
                slot,
                finished: false,
            })
        }
    }
}

/// Leader side of a slot. Dropping it unfinished aborts the build.
pub(super) struct FlightGuard<'a> {
    in_flight: &'a InFlight,
    handle: TypeHandle,
    slot: Arc<BuildSlot>,
    finished: bool,
}

impl FlightGuard<'_> {
    /// Hand `outcome` to the waiters and retire the slot.
    ///
    /// Callers publish a successful result to the registry first, so a caller
    /// arriving after the slot is gone finds the entry there.
    pub(super) fn finish(mut self, outcome: BuildResult) -> BuildResult {
        self.slot.complete(outcome.clone());
        self.retire();
        self.finished = true;
        outcome
    }

    fn retire(&self) {
        self.in_flight
            .remove_if(&self.handle, |_, slot| Arc::ptr_eq(slot, &self.slot));
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        log::warn!(
            "[classmeta] build of {} aborted, releasing waiters",
            self.handle
        );
        self.slot
            .complete(Err(IntrospectionError::BuildAborted(self.handle)));
        self.retire();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn second_joiner_waits_for_leader() {
        let in_flight = InFlight::new();
        let handle = TypeHandle::new(1);

        let Role::Leader(guard) = join(&in_flight, handle) else {
            panic!("first joiner must lead");
        };
        let Role::Waiter(slot) = join(&in_flight, handle) else {
            panic!("second joiner must wait");
        };

        let waiter = thread::spawn(move || slot.wait());
        thread::sleep(Duration::from_millis(10));
        let err = IntrospectionError::UnresolvedType(handle);
        assert_eq!(guard.finish(Err(err.clone())), Err(err.clone()));

        assert_eq!(waiter.join().expect("waiter thread"), Err(err));
        assert!(in_flight.is_empty());
    }

    #[test]
    fn dropped_guard_aborts_waiters() {
        let in_flight = InFlight::new();
        let handle = TypeHandle::new(9);

        let guard = match join(&in_flight, handle) {
            Role::Leader(guard) => guard,
            Role::Waiter(_) => panic!("empty map must elect a leader"),
        };
        let slot = match join(&in_flight, handle) {
            Role::Waiter(slot) => slot,
            Role::Leader(_) => panic!("slot already installed"),
        };

        drop(guard);
        assert_eq!(slot.wait(), Err(IntrospectionError::BuildAborted(handle)));
        assert!(in_flight.is_empty());

        // Next caller leads a fresh flight.
        assert!(matches!(join(&in_flight, handle), Role::Leader(_)));
    }
}

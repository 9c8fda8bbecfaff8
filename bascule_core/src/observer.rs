// Copyright 2026 the Bascule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Toggle notification registry.
//!
//! The control this one descends from held a single weak target/action pair,
//! so registering a second listener silently dropped the first. This module
//! replaces that with an explicit ordered list: any number of observers,
//! each independently removable through a generational [`ObserverId`].
//!
//! Observers are plain `FnMut(SwitchState)` closures. They receive the
//! post-mutation state, so a read inside the callback always observes the
//! value that caused the notification.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::state::SwitchState;

/// A toggle notification callback.
pub type ToggleFn = Box<dyn FnMut(SwitchState)>;

/// A handle to a registered observer.
///
/// Slot indices are recycled; the generation counter makes handles from a
/// previous occupant stale.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId {
    idx: u32,
    generation: u32,
}

impl fmt::Debug for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObserverId({}@gen{})", self.idx, self.generation)
    }
}

/// An ordered collection of toggle observers.
///
/// Notification order is registration order, independent of removals in
/// between.
#[derive(Default)]
pub struct ToggleObservers {
    slots: Vec<Option<ToggleFn>>,
    generation: Vec<u32>,
    /// Live slots in registration order.
    order: Vec<u32>,
    free_list: Vec<u32>,
}

impl fmt::Debug for ToggleObservers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleObservers")
            .field("len", &self.order.len())
            .finish_non_exhaustive()
    }
}

impl ToggleObservers {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer, appending it to the notification order.
    pub fn add(&mut self, observer: ToggleFn) -> ObserverId {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.generation[idx as usize] += 1;
            self.slots[idx as usize] = Some(observer);
            idx
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "more than u32::MAX live observers is not a real workload"
            )]
            let idx = self.slots.len() as u32;
            self.slots.push(Some(observer));
            self.generation.push(0);
            idx
        };
        self.order.push(idx);
        ObserverId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Removes an observer.
    ///
    /// Returns `false` (and does nothing) if the handle is stale — removal
    /// is idempotent, since observers commonly outlive the scopes that
    /// registered them.
    pub fn remove(&mut self, id: ObserverId) -> bool {
        let live = (id.idx as usize) < self.slots.len()
            && self.generation[id.idx as usize] == id.generation
            && self.slots[id.idx as usize].is_some();
        if !live {
            return false;
        }
        self.slots[id.idx as usize] = None;
        self.generation[id.idx as usize] += 1;
        self.order.retain(|&idx| idx != id.idx);
        self.free_list.push(id.idx);
        true
    }

    /// Invokes every observer in registration order with the given state.
    ///
    /// With no observers registered, this is a silent no-op.
    pub fn notify(&mut self, state: SwitchState) {
        for &idx in &self.order {
            if let Some(observer) = &mut self.slots[idx as usize] {
                observer(state);
            }
        }
    }

    /// Returns the number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if no observers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    use super::*;

    fn recording(log: &Rc<RefCell<Vec<(u32, SwitchState)>>>, tag: u32) -> ToggleFn {
        let log = Rc::clone(log);
        Box::new(move |state| log.borrow_mut().push((tag, state)))
    }

    #[test]
    fn notifies_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut observers = ToggleObservers::new();
        observers.add(recording(&log, 1));
        observers.add(recording(&log, 2));

        observers.notify(SwitchState::On);
        assert_eq!(
            *log.borrow(),
            vec![(1, SwitchState::On), (2, SwitchState::On)]
        );
    }

    #[test]
    fn removal_is_independent() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut observers = ToggleObservers::new();
        let first = observers.add(recording(&log, 1));
        observers.add(recording(&log, 2));

        assert!(observers.remove(first));
        observers.notify(SwitchState::Off);
        assert_eq!(*log.borrow(), vec![(2, SwitchState::Off)]);
    }

    #[test]
    fn stale_removal_is_a_no_op() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut observers = ToggleObservers::new();
        let id = observers.add(recording(&log, 1));

        assert!(observers.remove(id));
        assert!(!observers.remove(id), "double removal must report false");
        assert!(observers.is_empty());
    }

    #[test]
    fn recycled_slot_invalidates_old_handle() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut observers = ToggleObservers::new();
        let old = observers.add(recording(&log, 1));
        observers.remove(old);

        let new = observers.add(recording(&log, 2));
        assert!(!observers.remove(old), "stale handle must not remove the new occupant");
        assert_eq!(observers.len(), 1);
        assert!(observers.remove(new));
    }

    #[test]
    fn notify_with_no_observers_is_silent() {
        let mut observers = ToggleObservers::new();
        observers.notify(SwitchState::On);
        assert!(observers.is_empty());
    }

    #[test]
    fn late_registration_appends_to_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut observers = ToggleObservers::new();
        let first = observers.add(recording(&log, 1));
        observers.add(recording(&log, 2));
        observers.remove(first);
        observers.add(recording(&log, 3));

        observers.notify(SwitchState::On);
        let tags: Vec<u32> = log.borrow().iter().map(|&(tag, _)| tag).collect();
        assert_eq!(tags, vec![2, 3]);
    }
}

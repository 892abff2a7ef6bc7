//! Change notification for the player store.

use crate::core::player_state::PlayerState;
use std::panic::{self, AssertUnwindSafe};

/// What subscribers are told after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent<'a> {
    /// A mutator changed the record.
    Changed(&'a PlayerState),
    /// The record was wiped back to the initial state; views built on the
    /// old record should be rebuilt from scratch.
    Reset(&'a PlayerState),
}

impl<'a> StateEvent<'a> {
    pub fn state(&self) -> &'a PlayerState {
        match self {
            StateEvent::Changed(state) | StateEvent::Reset(state) => state,
        }
    }

    pub fn is_reset(&self) -> bool {
        matches!(self, StateEvent::Reset(_))
    }
}

/// Removal token returned by `subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&StateEvent<'_>)>;

/// Registered callbacks, notified in registration order.
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Callback)>,
}

impl Subscribers {
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StateEvent<'_>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Returns false if the id was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Call every subscriber. A panicking subscriber is logged and skipped;
    /// it stays registered and the others still run.
    pub fn notify(&mut self, event: &StateEvent<'_>) {
        for (id, callback) in self.entries.iter_mut() {
            let result = panic::catch_unwind(AssertUnwindSafe(|| callback(event)));
            if result.is_err() {
                log::error!("State subscriber {:?} panicked during notification", id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_notify_in_registration_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut subs = Subscribers::default();
        for n in 0..3 {
            let calls = Rc::clone(&calls);
            subs.subscribe(move |_| calls.borrow_mut().push(n));
        }
        let state = PlayerState::initial();
        subs.notify(&StateEvent::Changed(&state));
        assert_eq!(*calls.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_unsubscribe_removes_only_that_callback() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut subs = Subscribers::default();
        let first = {
            let calls = Rc::clone(&calls);
            subs.subscribe(move |_| calls.borrow_mut().push("first"))
        };
        {
            let calls = Rc::clone(&calls);
            subs.subscribe(move |_| calls.borrow_mut().push("second"));
        }

        assert!(subs.unsubscribe(first));
        assert!(!subs.unsubscribe(first));
        assert_eq!(subs.len(), 1);

        let state = PlayerState::initial();
        subs.notify(&StateEvent::Changed(&state));
        assert_eq!(*calls.borrow(), vec!["second"]);
    }

    #[test]
    fn test_panicking_subscriber_does_not_block_others() {
        let seen = Rc::new(RefCell::new(0));
        let mut subs = Subscribers::default();
        subs.subscribe(|_| panic!("broken HUD"));
        {
            let seen = Rc::clone(&seen);
            subs.subscribe(move |event| *seen.borrow_mut() += event.state().coins());
        }

        let state = PlayerState::initial();
        subs.notify(&StateEvent::Changed(&state));
        subs.notify(&StateEvent::Reset(&state));

        assert_eq!(*seen.borrow(), 1000);
        assert_eq!(subs.len(), 2);
    }
}

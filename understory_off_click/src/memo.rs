// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Memoized handler derivation: keep one handler while its inputs stay the same.
//!
//! Component frameworks re-run their render functions often. Deriving a fresh
//! [`OffClick`] on every render is correct but makes the listener identity churn, which
//! forces hosts to unsubscribe and resubscribe. [`OffClickMemo`] hands back the previous
//! handler as long as the reaction is the same `Rc` and the protected handles are the
//! same handles in the same order.
//!
//! ```
//! use std::rc::Rc;
//! use understory_off_click::{Click, NodeRef, OffClickMemo};
//! use understory_off_click::tree::Ancestry;
//!
//! let parents = [None, Some(0), Some(1)];
//! let mut memo = OffClickMemo::new(Ancestry::new(&parents[..]));
//!
//! let reaction: Rc<dyn Fn(&Click<usize>)> = Rc::new(|_: &Click<usize>| {});
//! let panel = NodeRef::mounted(1_usize);
//!
//! let first = memo.derive(&reaction, &[panel.clone()]);
//! let again = memo.derive(&reaction, &[panel.clone()]);
//! assert!(Rc::ptr_eq(&first, &again));
//! assert_eq!(memo.revision(), 1);
//!
//! // A new reaction identity derives a new handler.
//! let other: Rc<dyn Fn(&Click<usize>)> = Rc::new(|_: &Click<usize>| {});
//! let next = memo.derive(&other, &[panel]);
//! assert!(!Rc::ptr_eq(&first, &next));
//! assert_eq!(memo.revision(), 2);
//! ```

use alloc::rc::Rc;
use core::fmt;

use crate::handle::NodeRef;
use crate::handler::{OffClick, Reaction};

/// A reaction shared by reference count, compared by identity.
pub struct SharedReaction<F: ?Sized>(Rc<F>);

impl<F: ?Sized> SharedReaction<F> {
    /// Wrap a shared reaction.
    pub fn new(reaction: Rc<F>) -> Self {
        Self(reaction)
    }

    /// The shared reaction.
    pub fn get(&self) -> &Rc<F> {
        &self.0
    }
}

impl<F: ?Sized> Clone for SharedReaction<F> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<E: ?Sized, F: Reaction<E> + ?Sized> Reaction<E> for SharedReaction<F> {
    fn react(&self, event: &E) {
        (*self.0).react(event);
    }
}

impl<F: ?Sized> fmt::Debug for SharedReaction<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedReaction").finish_non_exhaustive()
    }
}

/// Handler type produced by [`OffClickMemo`].
pub type SharedOffClick<K, C, F> = Rc<OffClick<K, C, SharedReaction<F>>>;

/// Caches the last derived off-click handler for one component.
pub struct OffClickMemo<K, C, F: ?Sized> {
    scope: C,
    current: Option<SharedOffClick<K, C, F>>,
    revision: u64,
}

impl<K, C: Clone, F: ?Sized> OffClickMemo<K, C, F> {
    /// Create an empty memo that derives handlers over `scope`.
    pub fn new(scope: C) -> Self {
        Self {
            scope,
            current: None,
            revision: 0,
        }
    }

    /// Return the cached handler if `reaction` and `protected` are unchanged, or derive a new one.
    ///
    /// "Unchanged" is identity, not value: the same `Rc` for the reaction and pointer-equal
    /// handles in the same order. Handles that merely point at the same node are different
    /// handles.
    pub fn derive(
        &mut self,
        reaction: &Rc<F>,
        protected: &[NodeRef<K>],
    ) -> SharedOffClick<K, C, F> {
        if let Some(current) = &self.current
            && Rc::ptr_eq(current.reaction().get(), reaction)
            && same_handles(current.protected(), protected)
        {
            return Rc::clone(current);
        }

        let handler = Rc::new(OffClick::new(
            self.scope.clone(),
            SharedReaction::new(Rc::clone(reaction)),
            protected.iter().cloned(),
        ));
        self.revision += 1;
        tracing::debug!(
            revision = self.revision,
            protected = protected.len(),
            "derived off-click handler"
        );
        self.current = Some(Rc::clone(&handler));
        handler
    }

    /// The cached handler, if one has been derived since the last reset.
    pub fn current(&self) -> Option<&SharedOffClick<K, C, F>> {
        self.current.as_ref()
    }

    /// Number of handlers derived so far. Bumps only when a new handler is created.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Drop the cached handler, typically when the owning component unmounts.
    pub fn reset(&mut self) {
        self.current = None;
    }
}

impl<K: fmt::Debug, C: fmt::Debug, F: ?Sized> fmt::Debug for OffClickMemo<K, C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OffClickMemo")
            .field("scope", &self.scope)
            .field("current", &self.current)
            .field("revision", &self.revision)
            .finish()
    }
}

fn same_handles<K>(a: &[NodeRef<K>], b: &[NodeRef<K>]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| NodeRef::ptr_eq(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Click;
    use crate::tree::Ancestry;
    use core::cell::Cell;

    type Scope = Ancestry<&'static [Option<usize>]>;
    type Dyn = dyn Fn(&Click<usize>);

    static PARENTS: [Option<usize>; 4] = [None, Some(0), Some(1), Some(0)];

    fn memo() -> OffClickMemo<usize, Scope, Dyn> {
        OffClickMemo::new(Ancestry::new(&PARENTS[..]))
    }

    #[test]
    fn same_inputs_keep_identity() {
        let mut memo = memo();
        let reaction: Rc<Dyn> = Rc::new(|_: &Click<usize>| {});
        let a = NodeRef::mounted(1);
        let b = NodeRef::new();

        let first = memo.derive(&reaction, &[a.clone(), b.clone()]);
        let second = memo.derive(&reaction, &[a, b]);

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(memo.revision(), 1);
    }

    #[test]
    fn changed_handles_rederive() {
        let mut memo = memo();
        let reaction: Rc<Dyn> = Rc::new(|_: &Click<usize>| {});
        let a = NodeRef::mounted(1);
        let b = NodeRef::mounted(3);

        let first = memo.derive(&reaction, &[a.clone()]);
        let reordered = memo.derive(&reaction, &[a.clone(), b.clone()]);
        assert!(!Rc::ptr_eq(&first, &reordered));

        let swapped = memo.derive(&reaction, &[b, a.clone()]);
        assert!(!Rc::ptr_eq(&reordered, &swapped));

        // Same node, different handle.
        let lookalike = NodeRef::mounted(1);
        memo.derive(&reaction, &[a]);
        memo.derive(&reaction, &[lookalike]);
        assert_eq!(memo.revision(), 5);
    }

    #[test]
    fn mount_changes_do_not_rederive() {
        let mut memo = memo();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let reaction: Rc<Dyn> = Rc::new(move |_: &Click<usize>| {
            counter.set(counter.get() + 1);
        });
        let panel = NodeRef::new();

        let handler = memo.derive(&reaction, &[panel.clone()]);
        handler.handle(&Click::on(2));
        assert_eq!(calls.get(), 1);

        panel.set(1);
        let same = memo.derive(&reaction, &[panel.clone()]);
        assert!(Rc::ptr_eq(&handler, &same));
        same.handle(&Click::on(2));
        assert_eq!(calls.get(), 1, "mounted panel now protects its text");
    }

    #[test]
    fn reset_forgets_the_handler() {
        let mut memo = memo();
        let reaction: Rc<Dyn> = Rc::new(|_: &Click<usize>| {});
        let first = memo.derive(&reaction, &[]);
        assert!(memo.current().is_some());

        memo.reset();
        assert!(memo.current().is_none());

        let second = memo.derive(&reaction, &[]);
        assert!(!Rc::ptr_eq(&first, &second));
        assert_eq!(memo.revision(), 2);
    }

    #[test]
    fn shared_reaction_forwards_events() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let reaction: Rc<Dyn> = Rc::new(move |_: &Click<usize>| {
            counter.set(counter.get() + 1);
        });
        let shared = SharedReaction::new(reaction);
        shared.clone().react(&Click::on(0));
        assert_eq!(calls.get(), 1);
    }
}

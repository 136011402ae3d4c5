// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The off-click handler: decide whether a click landed outside every protected node.
//!
//! ## Decision
//!
//! For each event the handler:
//!
//! 1) Resolves the event origin with [`HasTarget::target`] and checks it with
//!    [`Containment::is_node`]. Events without a node origin are ignored.
//! 2) Reads the current node of every protected [`NodeRef`]. Absent handles protect nothing.
//! 3) Classifies the event as an off-click when no mounted protected node contains the
//!    origin. Containment is inclusive: a click on a protected node itself is inside.
//! 4) Invokes the reaction with the original event on an off-click; otherwise does nothing.
//!
//! The handler never consumes or cancels the event, and it never fails.
//! Handles are re-read on every call, so mounting and unmounting between events is observed.
//!
//! ## Minimal example
//!
//! ```
//! use core::cell::Cell;
//! use understory_off_click::{off_click, Click, NodeRef};
//! use understory_off_click::tree::Ancestry;
//!
//! // 0: container, 1: popover, 2: text inside the popover, 3: a sibling button.
//! let parents = [None, Some(0), Some(1), Some(0)];
//! let popover = NodeRef::mounted(1_usize);
//!
//! let closed = Cell::new(0);
//! let handler = off_click(Ancestry::new(&parents[..]), |_: &Click<usize>| {
//!     closed.set(closed.get() + 1);
//! }, [popover.clone()]);
//!
//! handler.handle(&Click::on(2)); // inside the popover
//! assert_eq!(closed.get(), 0);
//!
//! handler.handle(&Click::on(3)); // elsewhere
//! assert_eq!(closed.get(), 1);
//! ```

use core::fmt;

use smallvec::SmallVec;

use crate::event::HasTarget;
use crate::handle::NodeRef;
use crate::tree::Containment;

/// Something that reacts to an event.
///
/// Implemented for every `Fn(&E)`, so closures and function items can be used directly.
pub trait Reaction<E: ?Sized> {
    /// React to `event`.
    fn react(&self, event: &E);
}

impl<E: ?Sized, F: Fn(&E) + ?Sized> Reaction<E> for F {
    fn react(&self, event: &E) {
        self(event);
    }
}

/// Classification of a single event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The event has no origin node in the handler's document.
    Ignored,
    /// The origin is inside a protected node.
    Contained {
        /// Position of the first protecting handle in the protected set.
        index: usize,
    },
    /// The origin is outside every protected node.
    OffClick,
}

impl Verdict {
    /// Returns `true` for [`Verdict::OffClick`].
    pub fn is_off_click(self) -> bool {
        matches!(self, Self::OffClick)
    }
}

/// Inline storage for protected handles; sets are almost always a handful of nodes.
type ProtectedSet<K> = SmallVec<[NodeRef<K>; 4]>;

/// A reusable handler that invokes a reaction for clicks outside a set of protected nodes.
///
/// Build one with [`off_click`] or [`OffClick::new`], then feed it every click from the
/// event source you subscribed to (usually an ancestor of the protected nodes, or the
/// document root).
pub struct OffClick<K, C, F> {
    scope: C,
    protected: ProtectedSet<K>,
    reaction: F,
}

/// Create an off-click handler.
///
/// - `scope` answers containment questions for the document the nodes live in.
/// - `reaction` is invoked with the event for every off-click.
/// - `protected` lists the handles whose nodes (and descendants) do not count as "off".
///   An empty list makes every click with a node origin an off-click.
pub fn off_click<K, C, F>(
    scope: C,
    reaction: F,
    protected: impl IntoIterator<Item = NodeRef<K>>,
) -> OffClick<K, C, F> {
    OffClick::new(scope, reaction, protected)
}

impl<K, C, F> OffClick<K, C, F> {
    /// Create an off-click handler. See [`off_click`].
    pub fn new(scope: C, reaction: F, protected: impl IntoIterator<Item = NodeRef<K>>) -> Self {
        Self {
            scope,
            protected: protected.into_iter().collect(),
            reaction,
        }
    }

    /// The protected handles, in the order they were given.
    pub fn protected(&self) -> &[NodeRef<K>] {
        &self.protected
    }

    /// The containment scope.
    pub fn scope(&self) -> &C {
        &self.scope
    }

    /// The reaction.
    pub fn reaction(&self) -> &F {
        &self.reaction
    }
}

impl<K: Clone, C: Containment<K>, F> OffClick<K, C, F> {
    /// Returns `true` if no mounted protected node contains `origin`.
    ///
    /// `origin` is assumed to be a node of the scope's document; use
    /// [`OffClick::classify`] to run the full check on an event.
    pub fn is_off_click(&self, origin: &K) -> bool {
        self.protector_of(origin).is_none()
    }

    /// Classify `event` without invoking the reaction.
    pub fn classify<E: HasTarget<K> + ?Sized>(&self, event: &E) -> Verdict {
        let Some(origin) = event.target() else {
            return Verdict::Ignored;
        };
        if !self.scope.is_node(&origin) {
            return Verdict::Ignored;
        }
        match self.protector_of(&origin) {
            Some(index) => Verdict::Contained { index },
            None => Verdict::OffClick,
        }
    }

    /// Handle one click: invoke the reaction if it is an off-click.
    pub fn handle<E>(&self, event: &E)
    where
        E: HasTarget<K> + ?Sized,
        F: Reaction<E>,
    {
        match self.classify(event) {
            Verdict::OffClick => {
                tracing::trace!(protected = self.protected.len(), "off-click");
                self.reaction.react(event);
            }
            Verdict::Contained { index } => {
                tracing::trace!(index, "click inside protected node");
            }
            Verdict::Ignored => {
                tracing::trace!("click origin is not a node; ignored");
            }
        }
    }

    /// Borrow this handler as a plain listener closure.
    pub fn listener<E>(&self) -> impl Fn(&E) + '_
    where
        E: HasTarget<K> + ?Sized,
        F: Reaction<E>,
    {
        move |event: &E| self.handle(event)
    }

    /// Index of the first mounted handle whose node contains `origin`.
    fn protector_of(&self, origin: &K) -> Option<usize> {
        self.protected.iter().position(|handle| {
            handle
                .get()
                .is_some_and(|node| self.scope.contains(&node, origin))
        })
    }
}

impl<K: fmt::Debug, C: fmt::Debug, F> fmt::Debug for OffClick<K, C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OffClick")
            .field("scope", &self.scope)
            .field("protected", &self.protected)
            .finish_non_exhaustive()
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click events and the origin capability check.
//!
//! Hosts usually have their own event types; implement [`HasTarget`] for them.
//! The origin is optional on purpose: synthetic events, window-level events, and
//! events whose target is not a node of the document simply have no origin, and the
//! detector ignores them.
//!
//! [`AnyClick`] covers hosts whose event targets are dynamically typed: the origin is
//! a node only if it downcasts to the scope's node type.
//!
//! ```
//! use understory_off_click::event::{AnyClick, HasTarget};
//!
//! let on_node = AnyClick::on(4_u32);
//! let on_window = AnyClick::on("window");
//!
//! assert_eq!(HasTarget::<u32>::target(&on_node), Some(4));
//! assert_eq!(HasTarget::<u32>::target(&on_window), None);
//! assert_eq!(HasTarget::<u32>::target(&AnyClick::untargeted()), None);
//! ```

use alloc::rc::Rc;
use core::any::Any;

/// An event that may have originated on a node of type `K`.
pub trait HasTarget<K> {
    /// The node the event originated on, or `None` if the origin is not a node.
    fn target(&self) -> Option<K>;
}

impl<K, E: HasTarget<K> + ?Sized> HasTarget<K> for &E {
    fn target(&self) -> Option<K> {
        (**self).target()
    }
}

impl<K: Clone> HasTarget<K> for Option<K> {
    fn target(&self) -> Option<K> {
        self.clone()
    }
}

/// A click with a statically typed, optional origin.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Click<K> {
    /// Node the click landed on.
    pub target: Option<K>,
}

impl<K> Click<K> {
    /// A click on `node`.
    pub fn on(node: K) -> Self {
        Self { target: Some(node) }
    }

    /// A click with no node origin.
    pub fn untargeted() -> Self {
        Self { target: None }
    }
}

impl<K: Clone> HasTarget<K> for Click<K> {
    fn target(&self) -> Option<K> {
        self.target.clone()
    }
}

/// A click whose origin is a dynamically typed value.
#[derive(Clone, Debug, Default)]
pub struct AnyClick {
    /// Whatever the host reported as the click origin.
    pub target: Option<Rc<dyn Any>>,
}

impl AnyClick {
    /// A click reported on `value`.
    pub fn on<T: Any>(value: T) -> Self {
        Self {
            target: Some(Rc::new(value)),
        }
    }

    /// A click with no origin at all.
    pub fn untargeted() -> Self {
        Self { target: None }
    }
}

impl<K: Any + Clone> HasTarget<K> for AnyClick {
    fn target(&self) -> Option<K> {
        let origin: &dyn Any = &**self.target.as_ref()?;
        origin.downcast_ref::<K>().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_reports_its_origin() {
        assert_eq!(Click::on(3_u16).target(), Some(3));
        assert_eq!(HasTarget::<u16>::target(&Click::untargeted()), None);
    }

    #[test]
    fn option_is_its_own_origin() {
        assert_eq!(Some(5_u8).target(), Some(5));
        assert_eq!(HasTarget::<u8>::target(&None), None);
    }

    #[test]
    fn any_click_downcasts_to_node_type() {
        #[derive(Clone, Debug, PartialEq)]
        struct Synthetic;

        let ev = AnyClick::on(12_usize);
        assert_eq!(HasTarget::<usize>::target(&ev), Some(12));
        // Same value, different node type: not a node of that model.
        assert_eq!(HasTarget::<u32>::target(&ev), None);

        let synthetic = AnyClick::on(Synthetic);
        assert_eq!(HasTarget::<usize>::target(&synthetic), None);
        assert_eq!(HasTarget::<Synthetic>::target(&synthetic), Some(Synthetic));
    }

    #[test]
    fn references_forward() {
        let ev = Click::on('x');
        let by_ref = &ev;
        assert_eq!(HasTarget::<char>::target(&by_ref), Some('x'));
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node handles: shared, mutable cells pointing at a mounted node or at nothing.
//!
//! A [`NodeRef`] is what a component hands to the off-click detector in place of a node.
//! The component owns the mount lifecycle and updates the cell as nodes come and go;
//! the detector only reads the current value when an event arrives.
//!
//! ```
//! use understory_off_click::NodeRef;
//!
//! let panel: NodeRef<u32> = NodeRef::new();
//! assert!(!panel.is_mounted());
//!
//! // The host attaches the handle once the node exists.
//! let shared = panel.clone();
//! shared.set(7);
//! assert_eq!(panel.get(), Some(7));
//!
//! // ...and detaches it on unmount.
//! assert_eq!(shared.clear(), Some(7));
//! assert_eq!(panel.get(), None);
//! ```

use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

/// A shared, mutable reference to a node that may or may not be mounted.
///
/// Cloning a `NodeRef` shares the underlying cell: every clone observes the
/// same mount state. Use [`NodeRef::ptr_eq`] to ask whether two handles are the
/// same handle rather than two handles that happen to point at the same node.
pub struct NodeRef<K> {
    cell: Rc<RefCell<Option<K>>>,
}

impl<K> NodeRef<K> {
    /// Create an absent handle.
    pub fn new() -> Self {
        Self {
            cell: Rc::new(RefCell::new(None)),
        }
    }

    /// Create a handle that is already mounted on `node`.
    pub fn mounted(node: K) -> Self {
        Self {
            cell: Rc::new(RefCell::new(Some(node))),
        }
    }

    /// Point the handle at `node`, returning the node it pointed at before.
    pub fn set(&self, node: K) -> Option<K> {
        self.cell.replace(Some(node))
    }

    /// Detach the handle, returning the node it pointed at.
    pub fn clear(&self) -> Option<K> {
        self.cell.take()
    }

    /// Returns `true` while the handle points at a node.
    pub fn is_mounted(&self) -> bool {
        self.cell.borrow().is_some()
    }

    /// Returns `true` if both handles share the same cell.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.cell, &b.cell)
    }
}

impl<K: Clone> NodeRef<K> {
    /// The node this handle currently points at, if any.
    pub fn get(&self) -> Option<K> {
        self.cell.borrow().clone()
    }
}

impl<K> Clone for NodeRef<K> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<K> Default for NodeRef<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> From<Option<K>> for NodeRef<K> {
    fn from(node: Option<K>) -> Self {
        Self {
            cell: Rc::new(RefCell::new(node)),
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for NodeRef<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("cell", &*self.cell.borrow())
            .finish()
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document scopes: structural containment over a tree of nodes.
//!
//! The detector never walks a tree itself. It asks a [`Containment`] scope two
//! questions: "is this value a node of your document?" and "does this node contain
//! that one?". Scopes are usually thin views over a tree the application already has.
//!
//! - Implement [`Containment`] directly when your nodes can answer containment
//!   natively (for example DOM-like handles).
//! - Implement [`ParentLookup`] and wrap it in [`Ancestry`] when all you have is a
//!   parent pointer per node (scene trees, generational ids).
//! - Use [`ParentMap`] for a small self-contained document keyed by your own ids.
//! - A slice of parent indices (`[Option<usize>]`) is a [`ParentLookup`] over `usize`
//!   arena slots.
//!
//! ```
//! use understory_off_click::tree::{Ancestry, Containment};
//!
//! // 0 is the root; 1 and 2 are its children; 3 is a child of 1.
//! let parents = [None, Some(0), Some(0), Some(1)];
//! let scope = Ancestry::new(&parents[..]);
//!
//! let (a, b, a1) = (1_usize, 2_usize, 3_usize);
//! assert!(scope.contains(&a, &a1));
//! assert!(scope.contains(&a, &a));
//! assert!(!scope.contains(&b, &a1));
//! assert!(!scope.is_node(&8_usize));
//! ```

use alloc::rc::Rc;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

/// Structural containment over one document model.
pub trait Containment<K> {
    /// Returns `true` if `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &K, node: &K) -> bool;

    /// Returns `true` if `node` is a live node of this document.
    ///
    /// Values that fail this check (stale ids, nodes of another tree) are not
    /// eligible event origins.
    fn is_node(&self, node: &K) -> bool {
        let _ = node;
        true
    }
}

impl<K, T: Containment<K> + ?Sized> Containment<K> for &T {
    fn contains(&self, ancestor: &K, node: &K) -> bool {
        (**self).contains(ancestor, node)
    }

    fn is_node(&self, node: &K) -> bool {
        (**self).is_node(node)
    }
}

impl<K, T: Containment<K> + ?Sized> Containment<K> for Rc<T> {
    fn contains(&self, ancestor: &K, node: &K) -> bool {
        (**self).contains(ancestor, node)
    }

    fn is_node(&self, node: &K) -> bool {
        (**self).is_node(node)
    }
}

/// Parent lookup for a tree of nodes.
pub trait ParentLookup<K> {
    /// The parent of `node`, or `None` for roots and unknown nodes.
    fn parent_of(&self, node: &K) -> Option<K>;

    /// Returns `true` if `node` still refers to a live node.
    fn is_alive(&self, node: &K) -> bool {
        let _ = node;
        true
    }
}

impl<K, T: ParentLookup<K> + ?Sized> ParentLookup<K> for &T {
    fn parent_of(&self, node: &K) -> Option<K> {
        (**self).parent_of(node)
    }

    fn is_alive(&self, node: &K) -> bool {
        (**self).is_alive(node)
    }
}

/// Arena of parent indices: slot `i` holds the parent of node `i`.
impl ParentLookup<usize> for [Option<usize>] {
    fn parent_of(&self, node: &usize) -> Option<usize> {
        self.get(*node).copied().flatten()
    }

    fn is_alive(&self, node: &usize) -> bool {
        *node < self.len()
    }
}

/// Adapts a [`ParentLookup`] into a [`Containment`] scope by walking ancestors.
///
/// The walk is bounded by [`Ancestry::max_depth`]; a lookup that never reaches a
/// root within that many steps (a cycle, usually) answers "not contained".
#[derive(Clone, Copy, Debug)]
pub struct Ancestry<P> {
    lookup: P,
    max_depth: usize,
}

impl<P> Ancestry<P> {
    /// Default bound on the number of parent hops per containment query.
    pub const DEFAULT_MAX_DEPTH: usize = 4096;

    /// Wrap a parent lookup.
    pub fn new(lookup: P) -> Self {
        Self {
            lookup,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the bound on parent hops per query.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The bound on parent hops per query.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The wrapped lookup.
    pub fn lookup(&self) -> &P {
        &self.lookup
    }
}

impl<K: PartialEq, P: ParentLookup<K>> Containment<K> for Ancestry<P> {
    fn contains(&self, ancestor: &K, node: &K) -> bool {
        if node == ancestor {
            return true;
        }
        let mut current = self.lookup.parent_of(node);
        let mut hops = 0;
        while let Some(parent) = current {
            if &parent == ancestor {
                return true;
            }
            hops += 1;
            if hops >= self.max_depth {
                tracing::warn!(
                    max_depth = self.max_depth,
                    "ancestor walk exceeded depth bound"
                );
                return false;
            }
            current = self.lookup.parent_of(&parent);
        }
        false
    }

    fn is_node(&self, node: &K) -> bool {
        self.lookup.is_alive(node)
    }
}

/// A small document keyed by caller-chosen ids, storing one parent link per node.
///
/// Good for tests, tools, and hosts that keep their own node storage and only need
/// the shape of the tree mirrored for off-click decisions.
#[derive(Clone, Debug)]
pub struct ParentMap<K> {
    parents: HashMap<K, Option<K>>,
}

impl<K> Default for ParentMap<K> {
    fn default() -> Self {
        Self {
            parents: HashMap::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> ParentMap<K> {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root node. Re-inserting an existing node detaches it from its parent.
    pub fn insert_root(&mut self, node: K) {
        self.parents.insert(node, None);
    }

    /// Add `child` under `parent`.
    ///
    /// Returns `false` and leaves the document unchanged if `parent` is not a
    /// node of this document or if the link would make `child` its own ancestor.
    pub fn insert(&mut self, child: K, parent: K) -> bool {
        if !self.parents.contains_key(&parent) || self.contains(&child, &parent) {
            return false;
        }
        self.parents.insert(child, Some(parent));
        true
    }

    /// Remove `node` and every node below it, returning how many were removed.
    pub fn remove(&mut self, node: &K) -> usize {
        if !self.parents.contains_key(node) {
            return 0;
        }
        let doomed: SmallVec<[K; 8]> = self
            .parents
            .keys()
            .filter(|k| self.contains(node, k))
            .cloned()
            .collect();
        for k in &doomed {
            self.parents.remove(k);
        }
        doomed.len()
    }

    /// Returns `true` if `node` belongs to this document.
    pub fn contains_node(&self, node: &K) -> bool {
        self.parents.contains_key(node)
    }

    /// The parent of `node`, if it has one.
    pub fn parent(&self, node: &K) -> Option<&K> {
        self.parents.get(node).and_then(Option::as_ref)
    }

    /// Number of nodes in the document.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Returns `true` if the document has no nodes.
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

impl<K: Clone + Eq + Hash> ParentLookup<K> for ParentMap<K> {
    fn parent_of(&self, node: &K) -> Option<K> {
        self.parent(node).cloned()
    }

    fn is_alive(&self, node: &K) -> bool {
        self.contains_node(node)
    }
}

impl<K: Clone + Eq + Hash> Containment<K> for ParentMap<K> {
    fn contains(&self, ancestor: &K, node: &K) -> bool {
        // Links are acyclic by construction, so the walk terminates.
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    fn is_node(&self, node: &K) -> bool {
        self.contains_node(node)
    }
}

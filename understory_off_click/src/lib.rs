// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_off_click --heading-base-level=0

//! Understory Off Click: react to clicks that land outside a set of protected nodes.
//!
//! ## Overview
//!
//! Popovers, menus, and dialogs usually close when the user clicks "somewhere else".
//! This crate provides the decision behind that behavior as a small, reusable handler.
//! Given a reaction and a list of protected node handles, [`off_click`] returns an
//! [`OffClick`] handler. Feed it clicks; it invokes the reaction exactly when the click
//! originated on a node that no mounted protected node contains.
//!
//! The crate does not subscribe to any event source and does not know your UI toolkit.
//! It is generic over:
//!
//! - the node type `K` (generational ids, arena slots, DOM-like handles),
//! - a containment scope ([`tree::Containment`]) that answers "does `a` contain `b`?",
//! - the event type, through [`event::HasTarget`], which yields the click origin if it is a node.
//!
//! ## Rules
//!
//! - Events without a node origin are ignored: no target, a value that is not a node,
//!   or a node the scope does not recognize.
//! - Containment is inclusive. A click on a protected node, or on any of its descendants,
//!   is inside.
//! - Absent handles (not yet mounted, or unmounted) protect nothing.
//! - With no protected handles every node click is an off-click.
//! - Handles are read on every event. Nothing about the tree is cached.
//! - The handler never fails, never consumes the event, and invokes the reaction
//!   synchronously with the original event.
//!
//! ## Minimal example
//!
//! ```
//! use core::cell::Cell;
//! use understory_off_click::{off_click, Click, NodeRef, Verdict};
//! use understory_off_click::tree::ParentMap;
//!
//! let mut doc = ParentMap::new();
//! doc.insert_root("body");
//! doc.insert("toggle", "body");
//! doc.insert("menu", "body");
//! doc.insert("menu-item", "menu");
//! doc.insert("page", "body");
//!
//! // Refs the component attaches once its nodes are mounted.
//! let menu = NodeRef::mounted("menu");
//! let toggle = NodeRef::mounted("toggle");
//!
//! let open = Cell::new(true);
//! let handler = off_click(&doc, |_: &Click<&str>| open.set(false), [menu, toggle]);
//!
//! assert_eq!(handler.classify(&Click::on("menu-item")), Verdict::Contained { index: 0 });
//! handler.handle(&Click::on("toggle"));
//! assert!(open.get());
//!
//! handler.handle(&Click::on("page"));
//! assert!(!open.get());
//! ```
//!
//! ## Handles
//!
//! [`NodeRef`] is a shared mutable cell: the host sets and clears it as nodes mount and
//! unmount, and the handler sees the change on the next event. A handler can therefore be
//! built before its protected nodes exist.
//!
//! ## Stable identity
//!
//! Frameworks that re-render often can keep a single handler alive with [`OffClickMemo`].
//! It re-derives only when the reaction `Rc` or the list of handles changes identity.
//!
//! ## Features
//!
//! - `std` (default): forward `std` to dependencies.
//!
//! Diagnostics are emitted with `tracing` at `trace` (per decision) and `debug`
//! (handler derivation) levels.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod event;
mod handle;
mod handler;
mod memo;
pub mod tree;

pub use event::{AnyClick, Click, HasTarget};
pub use handle::NodeRef;
pub use handler::{OffClick, Reaction, Verdict, off_click};
pub use memo::{OffClickMemo, SharedOffClick, SharedReaction};

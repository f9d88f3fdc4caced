#![forbid(unsafe_code)]

//! In-memory host surface tree for overlay controllers.
//!
//! `veil-host` models the mutable UI host an overlay manipulates: a tree of
//! named [`Node`]s with class tokens and inline style pairs (consumed by an
//! external style layer as plain strings), a focus slot, an overflow style
//! with capture/restore for scroll locking, and canonical input events.
//!
//! The tree is deliberately runtime-agnostic. A UI layer with native
//! re-parenting can mirror it directly; one without can replay the
//! structural mutations as manual node migration. Overlay logic built on
//! top (see `veil-overlay`) works against this surface only.

pub mod document;
pub mod event;
pub mod node;

pub use document::{Document, Overflow};
pub use node::{Node, NodeId};

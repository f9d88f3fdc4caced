#![forbid(unsafe_code)]

//! Container resolution: where the dialog's visual tree gets mounted.
//!
//! A [`ContainerTarget`] describes the mount destination: the document
//! body (the default), a concrete node, an anchor selector, a factory
//! closure producing any of those, or the explicit in-place flag meaning
//! "no re-parenting". Resolution happens lazily, once per mount attempt;
//! the controller re-resolves on every re-entry, so a factory may return
//! different nodes across remounts.
//!
//! # Failure Modes
//!
//! - A selector matching no node, or a stale node id, degrades to
//!   [`ResolvedContainer::InPlace`] rather than erroring.
//! - Factories that keep returning factories are cut off after a small
//!   fixed depth and degrade to in-place.

use std::fmt;
use std::rc::Rc;

use tracing::debug;
use veil_host::{Document, NodeId};

/// Factories nested beyond this resolve to in-place.
const MAX_FACTORY_DEPTH: usize = 4;

/// Mount destination for the dialog subtree.
#[derive(Clone)]
pub enum ContainerTarget {
    /// The document body (the default when no target is supplied).
    Body,
    /// A concrete host node.
    Node(NodeId),
    /// A node found by anchor selector.
    Selector(String),
    /// A factory producing any of the above, re-run on every resolution.
    Factory(Rc<dyn Fn(&Document) -> ContainerTarget>),
    /// Render in the local tree; no re-parenting.
    InPlace,
}

impl Default for ContainerTarget {
    fn default() -> Self {
        Self::Body
    }
}

impl fmt::Debug for ContainerTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Body => f.write_str("Body"),
            Self::Node(id) => f.debug_tuple("Node").field(id).finish(),
            Self::Selector(s) => f.debug_tuple("Selector").field(s).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
            Self::InPlace => f.write_str("InPlace"),
        }
    }
}

/// Outcome of resolving a [`ContainerTarget`] against a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedContainer {
    /// Mount under this host node.
    Host(NodeId),
    /// Mount in the controller's local position; no re-parenting.
    InPlace,
}

impl ContainerTarget {
    /// Selector target.
    #[must_use]
    pub fn selector(anchor: impl Into<String>) -> Self {
        Self::Selector(anchor.into())
    }

    /// Factory target.
    #[must_use]
    pub fn factory(f: impl Fn(&Document) -> ContainerTarget + 'static) -> Self {
        Self::Factory(Rc::new(f))
    }

    /// Resolve to a concrete destination for one mount attempt.
    pub fn resolve(&self, doc: &Document) -> ResolvedContainer {
        let mut target = self.clone();
        let mut depth = 0;
        loop {
            match target {
                Self::Body => return ResolvedContainer::Host(doc.body()),
                Self::Node(id) => {
                    if doc.contains(id) {
                        return ResolvedContainer::Host(id);
                    }
                    debug!(id = id.raw(), "container node is stale; mounting in place");
                    return ResolvedContainer::InPlace;
                }
                Self::Selector(anchor) => match doc.query(&anchor) {
                    Some(id) => return ResolvedContainer::Host(id),
                    None => {
                        debug!(%anchor, "container selector matched nothing; mounting in place");
                        return ResolvedContainer::InPlace;
                    }
                },
                Self::Factory(f) => {
                    depth += 1;
                    if depth > MAX_FACTORY_DEPTH {
                        debug!("container factory nesting exceeded; mounting in place");
                        return ResolvedContainer::InPlace;
                    }
                    target = f(doc);
                }
                Self::InPlace => return ResolvedContainer::InPlace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_resolves_to_body() {
        let doc = Document::new();
        assert_eq!(
            ContainerTarget::default().resolve(&doc),
            ResolvedContainer::Host(doc.body())
        );
    }

    #[test]
    fn node_target_resolves_when_live() {
        let mut doc = Document::new();
        let host = doc.create_node("portal");
        let body = doc.body();
        doc.append_child(body, host);
        assert_eq!(
            ContainerTarget::Node(host).resolve(&doc),
            ResolvedContainer::Host(host)
        );
    }

    #[test]
    fn stale_node_degrades_to_in_place() {
        let mut doc = Document::new();
        let host = doc.create_node("portal");
        doc.append_child(doc.body(), host);
        doc.remove(host);
        assert_eq!(
            ContainerTarget::Node(host).resolve(&doc),
            ResolvedContainer::InPlace
        );
    }

    #[test]
    fn selector_hit_and_miss() {
        let mut doc = Document::new();
        let host = doc.create_node("portal");
        doc.append_child(doc.body(), host);
        doc.node_mut(host).unwrap().set_anchor("dialog-root");

        assert_eq!(
            ContainerTarget::selector("dialog-root").resolve(&doc),
            ResolvedContainer::Host(host)
        );
        assert_eq!(
            ContainerTarget::selector("missing").resolve(&doc),
            ResolvedContainer::InPlace
        );
    }

    #[test]
    fn factory_resolves_through() {
        let mut doc = Document::new();
        let host = doc.create_node("portal");
        doc.append_child(doc.body(), host);
        doc.node_mut(host).unwrap().set_anchor("dialog-root");

        let target = ContainerTarget::factory(|_| ContainerTarget::selector("dialog-root"));
        assert_eq!(target.resolve(&doc), ResolvedContainer::Host(host));
    }

    #[test]
    fn factory_may_return_different_nodes_across_calls() {
        use std::cell::Cell;

        let mut doc = Document::new();
        let first = doc.create_node("a");
        let second = doc.create_node("b");
        let body = doc.body();
        doc.append_child(body, first);
        doc.append_child(body, second);

        let flip = Rc::new(Cell::new(false));
        let target = {
            let flip = Rc::clone(&flip);
            ContainerTarget::factory(move |_| {
                let use_second = flip.get();
                flip.set(true);
                ContainerTarget::Node(if use_second { second } else { first })
            })
        };

        assert_eq!(target.resolve(&doc), ResolvedContainer::Host(first));
        assert_eq!(target.resolve(&doc), ResolvedContainer::Host(second));
    }

    #[test]
    fn endless_factory_nesting_degrades() {
        let doc = Document::new();
        fn nested() -> ContainerTarget {
            ContainerTarget::factory(|_| nested())
        }
        assert_eq!(nested().resolve(&doc), ResolvedContainer::InPlace);
    }

    #[test]
    fn in_place_skips_resolution() {
        let doc = Document::new();
        assert_eq!(
            ContainerTarget::InPlace.resolve(&doc),
            ResolvedContainer::InPlace
        );
    }

    #[test]
    fn debug_formats_without_closure() {
        let target = ContainerTarget::factory(|_| ContainerTarget::Body);
        assert_eq!(format!("{target:?}"), "Factory(..)");
    }
}

//! Mutation observation for the document model
//!
//! Mutations fan out over unbounded channels: the document pushes a record
//! for every structural change, subscribers drain their receiver whenever
//! they want to inspect the tree. Dropping a [`MutationSubscription`]
//! deregisters it; the document prunes closed senders on the next emit.

use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use indextree::NodeId;

/// One structural change to the document tree
#[derive(Debug, Clone)]
pub enum Mutation {
    /// A node was inserted under `parent`
    ChildInserted { parent: NodeId, node: NodeId },
    /// A node was detached from `parent`
    ChildDetached { parent: NodeId, node: NodeId },
    /// An attribute on `node` was set or removed
    AttributeChanged { node: NodeId, name: String },
}

/// A live subscription to document mutations.
///
/// Records accumulate until drained. Drop the subscription to deregister.
pub struct MutationSubscription {
    rx: UnboundedReceiver<Mutation>,
}

impl MutationSubscription {
    /// Take all mutation records observed since the last drain
    pub fn drain(&mut self) -> Vec<Mutation> {
        let mut out = Vec::new();
        while let Ok(Some(mutation)) = self.rx.try_next() {
            out.push(mutation);
        }
        out
    }
}

pub(crate) fn channel() -> (UnboundedSender<Mutation>, MutationSubscription) {
    let (tx, rx) = unbounded();
    (tx, MutationSubscription { rx })
}

//! Mutable document model
//!
//! The stand-in for the host page's DOM: an arena tree parsed from XML text,
//! mutated through stable node ids, observable through mutation
//! subscriptions, and serializable back to text once splicing is done.

pub mod observer;
pub mod serialize;
pub mod tree;

pub use observer::{Mutation, MutationSubscription};
pub use tree::{Document, NodeData};

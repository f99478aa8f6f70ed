//! Install gating on pending placeholder injection
//!
//! Hosts often inject inline SVGs asynchronously: an `<img>` placeholder is
//! dropped into the document and later swapped for the real SVG content.
//! Scanning before all placeholders are swapped would miss math, so install
//! is gated on the pending count reaching zero.
//!
//! The gate is level-triggered: it re-checks the count on every observed
//! mutation batch rather than tracking individual placeholders. The first
//! time the count reaches zero it drops its subscription and signals
//! install, exactly once. When nothing is pending at engage time, install
//! is signalled immediately and no subscription is ever registered.

use crate::dom::{Document, MutationSubscription};

/// Class token marking an image element as pending SVG injection
pub const PENDING_CLASS: &str = "svg-injectable";

/// Outcome of engaging the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Nothing pending; run install now. The gate never subscribed.
    InstallNow,
    /// Placeholders pending; the gate is watching mutations.
    Deferred,
}

/// One-shot gate that triggers install once placeholder injection settles.
pub struct InstallGate {
    subscription: Option<MutationSubscription>,
    fired: bool,
}

impl InstallGate {
    /// Count placeholder images still pending injection
    pub fn pending_count(doc: &Document) -> usize {
        doc.descendants(doc.root())
            .filter(|&id| doc.tag_name(id) == Some("img") && doc.has_class(id, PENDING_CLASS))
            .count()
    }

    /// Engage the gate against a document.
    ///
    /// Subscribes to mutations only when placeholders are actually pending.
    pub fn engage(doc: &mut Document) -> (Self, GateDecision) {
        if Self::pending_count(doc) == 0 {
            tracing::debug!("no pending placeholders, install can run immediately");
            return (
                Self {
                    subscription: None,
                    fired: true,
                },
                GateDecision::InstallNow,
            );
        }
        tracing::debug!(
            pending = Self::pending_count(doc),
            "placeholders pending, watching mutations"
        );
        let subscription = doc.subscribe();
        (
            Self {
                subscription: Some(subscription),
                fired: false,
            },
            GateDecision::Deferred,
        )
    }

    /// Inspect mutations observed since the last check.
    ///
    /// Returns `true` exactly once: the first time a mutation batch leaves
    /// zero placeholders pending. The subscription is dropped at that point,
    /// so later mutations are no longer observed.
    pub fn check(&mut self, doc: &Document) -> bool {
        if self.fired {
            return false;
        }
        let Some(subscription) = self.subscription.as_mut() else {
            return false;
        };
        if subscription.drain().is_empty() {
            return false;
        }
        if Self::pending_count(doc) > 0 {
            return false;
        }

        // One-shot: disconnect before signalling
        self.subscription = None;
        self.fired = true;
        tracing::debug!("placeholder injection settled, triggering install");
        true
    }

    /// Whether the gate still holds a live subscription
    pub fn is_watching(&self) -> bool {
        self.subscription.is_some()
    }
}

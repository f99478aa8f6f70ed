//! Staging area for batch math rendering
//!
//! The external renderer is process-wide and much cheaper to invoke once per
//! batch than once per expression, so every candidate from a scan pass is
//! staged under a single scratch root before the one typeset call. The
//! scratch root lives in the document while rendering runs and is torn down
//! afterwards, on the success path and the render-failure path alike.

use indextree::NodeId;

use crate::dom::Document;
use crate::scanner::{Justification, MathCandidate};

/// `id` attribute of the staging root element
pub const STAGING_ROOT_ID: &str = "math-staging";

/// One staged candidate: the original text element plus the scratch
/// container its markup was moved into.
#[derive(Debug, Clone)]
pub struct StagingItem {
    /// The original `<text>` element to replace
    pub target: NodeId,
    /// The scratch container holding the markup (and later the rendered
    /// output)
    pub container: NodeId,
    pub justification: Justification,
}

/// The scratch subtree for one install pass
pub struct StagingArea {
    root: NodeId,
    items: Vec<StagingItem>,
}

impl StagingArea {
    /// Stage a scan pass's candidates for rendering.
    ///
    /// Appends the staging root to the document body (or the document root
    /// when there is no body), then one container per candidate, each
    /// holding its math markup as a text node. The staging root is created
    /// even for an empty batch so every pass has the same cleanup path.
    pub fn stage(doc: &mut Document, candidates: Vec<MathCandidate>) -> Self {
        let root = doc.create_element("div");
        doc.set_attribute(root, "id", STAGING_ROOT_ID);
        let body = doc.body_or_root();
        doc.append(body, root);

        let mut items = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let container = doc.create_element("div");
            doc.append(root, container);
            let markup = doc.create_text(&candidate.math_markup);
            doc.append(container, markup);
            items.push(StagingItem {
                target: candidate.text_node,
                container,
                justification: candidate.justification,
            });
        }

        tracing::debug!(staged = items.len(), "staged math candidates");
        Self { root, items }
    }

    /// The staging root element
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Staged items, in scan order
    pub fn items(&self) -> &[StagingItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove the staging root (and everything still inside it) from the
    /// document.
    pub fn teardown(self, doc: &mut Document) {
        doc.detach(self.root);
    }
}

//! Splicing rendered math back into the source SVG
//!
//! The final pipeline step: each staged item's rendered glyph is positioned
//! with a [`PlacementTransform`] and swapped in for the original `<text>`
//! element. Items are processed in staging (scan) order. Structural errors
//! are not caught here; a failure aborts the remaining items and leaves
//! already-spliced ones in place.

use crate::config::SpliceConfig;
use crate::dom::Document;
use crate::error::DomError;
use crate::staging::StagingItem;
use crate::transform::{PlacementTransform, Point, RenderedBounds};

/// Splice every rendered item into place, in order.
///
/// Returns the number of items spliced. On error, items before the failing
/// one stay spliced and the rest stay untouched.
pub fn splice_all(
    doc: &mut Document,
    items: &[StagingItem],
    config: &SpliceConfig,
) -> Result<usize, DomError> {
    let mut spliced = 0;
    for item in items {
        splice_item(doc, item, config)?;
        spliced += 1;
    }
    Ok(spliced)
}

fn splice_item(doc: &mut Document, item: &StagingItem, config: &SpliceConfig) -> Result<(), DomError> {
    let rendered = doc
        .descendants(item.container)
        .find(|&id| doc.tag_name(id) == Some("svg"))
        .ok_or(DomError::MissingOutput)?;

    // A missing anchor attribute reads as 0, like a numeric coercion of an
    // absent DOM attribute.
    let anchor = Point::new(
        doc.attr_f64(item.target, "x").unwrap_or(0.0),
        doc.attr_f64(item.target, "y").unwrap_or(0.0),
    );
    let bounds = RenderedBounds::new(
        doc.attr_f64(rendered, "width").unwrap_or(0.0),
        doc.attr_f64(rendered, "height").unwrap_or(0.0),
    );
    let font_size = doc.computed_font_size(item.target);

    let placement = PlacementTransform::compute(
        bounds,
        anchor,
        font_size,
        config.scale,
        item.justification,
    );
    doc.set_attribute(rendered, "transform", &placement.to_attribute());

    let parent = doc.parent(item.target).ok_or(DomError::MissingParent)?;
    if config.escape_clip {
        doc.remove_attribute(parent, "clip-path");
    }
    doc.replace(item.target, rendered)?;

    tracing::debug!(
        scale = placement.scale,
        x = anchor.x,
        y = anchor.y,
        "spliced rendered math"
    );
    Ok(())
}

//! External math renderer interface
//!
//! The actual math typesetting engine is a collaborator, not part of this
//! crate: all the pipeline needs is a readiness signal and a batch typeset
//! operation that converts staged markup into rendered SVG in place. Both
//! are async and awaited without any timeout; a renderer that never resolves
//! stalls the install pass, which mirrors the upstream behavior this crate
//! models.

use async_trait::async_trait;
use indextree::NodeId;

use crate::dom::Document;
use crate::error::RenderError;

/// A math typesetting engine.
#[async_trait]
pub trait MathRenderer: Send + Sync {
    /// Resolves once the renderer is initialized and able to typeset.
    async fn ready(&self) -> Result<(), RenderError>;

    /// Typeset every piece of staged markup under `scope`, in place.
    ///
    /// Each `\(...\)` markup text node in the subtree is replaced by a
    /// rendered `<svg>` element carrying numeric `width` and `height`
    /// attributes, the glyph's measured bounds in the renderer's internal
    /// units. One call handles the whole batch.
    async fn typeset(&self, doc: &mut Document, scope: NodeId) -> Result<(), RenderError>;
}

/// A renderer with deterministic, font-free metrics.
///
/// Stands in for a real typesetting engine: each expression becomes an
/// italic `<text>` glyph inside an `<svg class="math-glyph">`, measured by
/// character count alone. Deterministic output makes pipeline results
/// reproducible in tests and gives the CLI a renderer that needs no
/// external process.
#[derive(Debug, Clone)]
pub struct DeterministicMathRenderer {
    /// Horizontal advance per character, in internal units
    pub char_advance: f64,
    /// Glyph box height, in internal units
    pub line_height: f64,
}

impl Default for DeterministicMathRenderer {
    fn default() -> Self {
        Self {
            char_advance: 8.0,
            line_height: 16.0,
        }
    }
}

impl DeterministicMathRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-character advance
    pub fn with_char_advance(mut self, advance: f64) -> Self {
        self.char_advance = advance;
        self
    }

    /// Set the glyph box height
    pub fn with_line_height(mut self, height: f64) -> Self {
        self.line_height = height;
        self
    }

    fn render_glyph(&self, doc: &mut Document, body: &str) -> NodeId {
        let width = self.char_advance * body.chars().count() as f64;
        let height = self.line_height;

        let svg = doc.create_element("svg");
        doc.set_attribute(svg, "class", "math-glyph");
        doc.set_attribute(svg, "width", &width.to_string());
        doc.set_attribute(svg, "height", &height.to_string());
        doc.set_attribute(svg, "viewBox", &format!("0 0 {} {}", width, height));

        let glyph = doc.create_element("text");
        doc.set_attribute(glyph, "x", "0");
        // Baseline sits at 80% of the box, close to common font metrics
        doc.set_attribute(glyph, "y", &(height * 0.8).to_string());
        doc.set_attribute(glyph, "font-style", "italic");
        let body_node = doc.create_text(body);
        doc.append(glyph, body_node);
        doc.append(svg, glyph);
        svg
    }
}

#[async_trait]
impl MathRenderer for DeterministicMathRenderer {
    async fn ready(&self) -> Result<(), RenderError> {
        Ok(())
    }

    async fn typeset(&self, doc: &mut Document, scope: NodeId) -> Result<(), RenderError> {
        let staged: Vec<(NodeId, String)> = doc
            .descendants(scope)
            .filter_map(|id| {
                let text = doc.text(id)?.trim();
                let body = text.strip_prefix(r"\(")?.strip_suffix(r"\)")?;
                Some((id, body.to_string()))
            })
            .collect();

        for (markup_node, body) in staged {
            let glyph = self.render_glyph(doc, &body);
            doc.replace(markup_node, glyph)
                .map_err(|e| RenderError::Typeset(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::scanner::scan;
    use crate::staging::StagingArea;

    #[test]
    fn test_typeset_replaces_markup_with_measured_glyph() {
        let mut doc =
            Document::parse(r#"<html><body><svg><text>$abc$</text></svg></body></html>"#).unwrap();
        let candidates = scan(&doc, None);
        let staging = StagingArea::stage(&mut doc, candidates);

        let renderer = DeterministicMathRenderer::new();
        block_on(renderer.typeset(&mut doc, staging.root())).expect("typeset should succeed");

        let container = staging.items()[0].container;
        let rendered = doc
            .descendants(container)
            .find(|&id| doc.tag_name(id) == Some("svg"))
            .expect("rendered glyph present");
        // 3 characters at the default advance of 8
        assert_eq!(doc.attribute(rendered, "width"), Some("24"));
        assert_eq!(doc.attribute(rendered, "height"), Some("16"));
        assert_eq!(doc.text_content(rendered), "abc");
    }

    #[test]
    fn test_typeset_is_scoped() {
        let mut doc = Document::parse(
            r#"<html><body><div id="scope"/><div id="outside">\(u\)</div></body></html>"#,
        )
        .unwrap();
        let scope = doc
            .descendants(doc.root())
            .find(|&id| doc.attribute(id, "id") == Some("scope"))
            .unwrap();

        let renderer = DeterministicMathRenderer::new();
        block_on(renderer.typeset(&mut doc, scope)).expect("typeset should succeed");

        // Markup outside the scope is untouched
        assert!(doc.to_xml().contains(r"\(u\)"));
    }

    #[test]
    fn test_custom_metrics() {
        let renderer = DeterministicMathRenderer::new()
            .with_char_advance(10.0)
            .with_line_height(20.0);
        let mut doc = Document::parse(r#"<div>\(ab\)</div>"#).unwrap();
        let root = doc.root();

        block_on(renderer.typeset(&mut doc, root)).expect("typeset should succeed");

        let xml = doc.to_xml();
        assert!(xml.contains(r#"width="20""#), "got: {xml}");
        assert!(xml.contains(r#"height="20""#), "got: {xml}");
    }
}

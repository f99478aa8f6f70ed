//! Mathsplice - typeset math inside inline SVG diagrams
//!
//! This library post-processes documents containing inline SVG: `<text>`
//! elements whose content is delimited math markup (`\(...\)` or `$...$`,
//! with an optional `L`/`R`/`C` justification letter) are rendered through
//! an external math renderer and replaced by the rendered vector glyph,
//! positioned at the original anchor with the right scale and justification.
//!
//! # Example
//!
//! ```rust
//! use futures::executor::block_on;
//! use mathsplice::{process_document, DeterministicMathRenderer};
//!
//! let svg = r#"<svg><text x="40" y="90">$x^2$</text></svg>"#;
//! let out = block_on(process_document(svg, DeterministicMathRenderer::new())).unwrap();
//! assert!(out.contains("math-glyph"));
//! ```

pub mod config;
pub mod dom;
pub mod error;
pub mod install;
pub mod renderer;
pub mod scanner;
pub mod splice;
pub mod staging;
pub mod transform;
pub mod watcher;

pub use config::{ConfigError, SpliceConfig};
pub use dom::Document;
pub use error::{DomError, RenderError};
pub use install::{InstallPhase, InstallReport, Installer};
pub use renderer::{DeterministicMathRenderer, MathRenderer};
pub use scanner::{scan, Justification, MathCandidate};
pub use transform::{PlacementTransform, Point, RenderedBounds};
pub use watcher::{GateDecision, InstallGate};

use thiserror::Error;

/// Errors that can end an install pass
#[derive(Debug, Error)]
pub enum SpliceError {
    /// Structural document error (parse failure, or a splice target that
    /// lost its place in the tree)
    #[error("document error: {0}")]
    Dom(#[from] DomError),

    /// The renderer never became ready. Typeset failures are handled inside
    /// the pass and never surface here.
    #[error("renderer error: {0}")]
    Renderer(#[from] RenderError),
}

/// Process a document with default configuration.
///
/// This is the main entry point for the library: parse the document, run one
/// install pass with the given renderer, and serialize the result.
///
/// # Example
///
/// ```rust
/// use futures::executor::block_on;
/// use mathsplice::{process_document, DeterministicMathRenderer};
///
/// let out = block_on(process_document(
///     r#"<svg><text x="10" y="20" font-size="12">R$a+b$</text></svg>"#,
///     DeterministicMathRenderer::new(),
/// ))
/// .unwrap();
///
/// assert!(out.contains("transform="));
/// assert!(!out.contains("$a+b$"));
/// ```
pub async fn process_document<R: MathRenderer>(
    input: &str,
    renderer: R,
) -> Result<String, SpliceError> {
    process_document_with_config(input, renderer, SpliceConfig::default()).await
}

/// Process a document with custom configuration.
///
/// # Example
///
/// ```rust
/// use futures::executor::block_on;
/// use mathsplice::{process_document_with_config, DeterministicMathRenderer, SpliceConfig};
///
/// let config = SpliceConfig::new().with_scale(0.12).with_escape_clip(true);
/// let out = block_on(process_document_with_config(
///     r#"<svg><g clip-path="url(#c)"><text x="1" y="2">$m$</text></g></svg>"#,
///     DeterministicMathRenderer::new(),
///     config,
/// ))
/// .unwrap();
///
/// assert!(!out.contains("clip-path"));
/// ```
pub async fn process_document_with_config<R: MathRenderer>(
    input: &str,
    renderer: R,
    config: SpliceConfig,
) -> Result<String, SpliceError> {
    let mut doc = Document::parse(input).map_err(SpliceError::Dom)?;
    let mut installer = Installer::new(renderer).with_config(config);
    installer.install(&mut doc).await?;
    Ok(doc.to_xml())
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn test_process_simple_document() {
        let out = block_on(process_document(
            r#"<svg><text x="40" y="90">$x^2$</text></svg>"#,
            DeterministicMathRenderer::new(),
        ))
        .unwrap();

        assert!(out.contains("math-glyph"));
        assert!(out.contains("translate(40 90)"));
        assert!(!out.contains("$x^2$"));
    }

    #[test]
    fn test_process_leaves_plain_text_alone() {
        let input = r#"<svg><text x="1" y="2">just a label</text></svg>"#;
        let out = block_on(process_document(input, DeterministicMathRenderer::new())).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_process_rejects_malformed_input() {
        let result = block_on(process_document(
            "<svg><text>$a$</text>",
            DeterministicMathRenderer::new(),
        ));
        assert!(matches!(result, Err(SpliceError::Dom(DomError::Parse(_)))));
    }

    #[test]
    fn test_process_with_custom_scale() {
        let config = SpliceConfig::new().with_scale(0.5);
        let out = block_on(process_document_with_config(
            r#"<svg><text x="0" y="0" font-size="10">L$a$</text></svg>"#,
            DeterministicMathRenderer::new(),
            config,
        ))
        .unwrap();

        // scale = 0.5 * 10 = 5, left-justified so no x offset
        assert!(out.contains("translate(0 0) translate(0 -80) scale(5)"), "got: {out}");
    }
}

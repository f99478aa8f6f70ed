//! Scanner for math placeholders inside inline SVG
//!
//! A `<text>` element is a math placeholder when its whole content is a
//! single delimited math expression, optionally prefixed by a one-letter
//! justification marker:
//!
//! ```text
//! <text x="40" y="90">C\(x^2 + 1\)</text>
//! <text x="40" y="90">$e^{i\pi}$</text>
//! ```
//!
//! Dollar-delimited bodies are normalized to the escaped-paren form before
//! staging so the renderer only ever sees one delimiter style. Anything that
//! does not match the grammar is simply not math; the scanner never errors.

use std::collections::HashSet;
use std::sync::OnceLock;

use indextree::NodeId;
use regex::Regex;

use crate::dom::Document;

/// Horizontal alignment of rendered math relative to its anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justification {
    Left,
    Right,
    #[default]
    Center,
}

impl Justification {
    /// Map a justification marker to an alignment.
    ///
    /// `L`/`R`/`C` in either case; anything else (including the empty
    /// marker) is centered.
    pub fn from_marker(marker: &str) -> Self {
        match marker {
            "L" | "l" => Justification::Left,
            "R" | "r" => Justification::Right,
            _ => Justification::Center,
        }
    }
}

/// A text node identified as holding math markup to re-render
#[derive(Debug, Clone)]
pub struct MathCandidate {
    /// The `<text>` element to be replaced
    pub text_node: NodeId,
    pub justification: Justification,
    /// Normalized math markup, always `\(...\)`-delimited
    pub math_markup: String,
}

fn math_text_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([LlRrCc]?)(\\\(.*\\\)|\$.*\$)\s*$").expect("valid regex")
    })
}

fn dollar_form_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\$(.*)\$$").expect("valid regex"))
}

/// Parse one text-content string against the math grammar.
///
/// Returns the justification and the normalized markup, or `None` when the
/// content is not math.
pub fn parse_math_text(content: &str) -> Option<(Justification, String)> {
    let caps = math_text_re().captures(content)?;
    let justification = Justification::from_marker(&caps[1]);
    let markup = dollar_form_re().replace(&caps[2], r"\($1\)").into_owned();
    Some((justification, markup))
}

/// Collect every math candidate under `root` (default: the whole document).
///
/// Walks every `<svg>` element in the subtree and every `<text>` element
/// inside those. Each text element yields at most one candidate, even when
/// SVGs nest.
pub fn scan(doc: &Document, root: Option<NodeId>) -> Vec<MathCandidate> {
    let root = root.unwrap_or_else(|| doc.root());
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut candidates = Vec::new();

    for svg in doc
        .descendants(root)
        .filter(|&id| doc.tag_name(id) == Some("svg"))
        .collect::<Vec<_>>()
    {
        for text_node in doc
            .descendants(svg)
            .filter(|&id| doc.tag_name(id) == Some("text"))
        {
            if !seen.insert(text_node) {
                continue;
            }
            if let Some((justification, math_markup)) = parse_math_text(&doc.text_content(text_node))
            {
                candidates.push(MathCandidate {
                    text_node,
                    justification,
                    math_markup,
                });
            }
        }
    }
    candidates
}

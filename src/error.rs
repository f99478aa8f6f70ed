//! Error types for document handling and math rendering

use thiserror::Error;

/// Structural errors raised by the document model.
///
/// These mirror what a live DOM would raise: a malformed input document, or
/// a splice target that is no longer where the pipeline expects it to be.
/// Splice-time structural errors are never caught inside an install pass;
/// they abort the remainder of the splice loop.
#[derive(Error, Debug)]
pub enum DomError {
    /// The input document could not be parsed as XML
    #[error("failed to parse document: {0}")]
    Parse(#[from] roxmltree::Error),

    /// A splice target has no parent element to splice into
    #[error("node has no parent to splice into")]
    MissingParent,

    /// A staging container holds no rendered output after typesetting
    #[error("staging container holds no rendered output")]
    MissingOutput,
}

/// Errors reported by an external math renderer.
///
/// `Typeset` failures are caught by the install orchestrator, logged, and
/// turned into a failed-but-clean pass. `Unavailable` is returned before any
/// staging happens and propagates to the caller.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The renderer never became ready to accept typeset requests
    #[error("renderer unavailable: {0}")]
    Unavailable(String),

    /// The batch typeset operation failed
    #[error("typeset failed: {0}")]
    Typeset(String),
}

//! Install orchestration
//!
//! One install pass drives the whole pipeline: wait for the renderer, scan,
//! stage, typeset, splice, tear down. The pass is a small state machine so
//! hosts (and tests) can observe where a pass is or how it ended. Passes
//! are not reentrant; `install` takes `&mut self`, so a second concurrent
//! pass on the same installer cannot be expressed.

use crate::config::SpliceConfig;
use crate::dom::Document;
use crate::renderer::MathRenderer;
use crate::scanner::scan;
use crate::splice::splice_all;
use crate::staging::StagingArea;
use crate::SpliceError;

/// Progress of an install pass.
///
/// `Failed` is only reachable from `Rendering`: a typeset failure is caught,
/// logged, and followed by staging cleanup. Splice-time structural errors
/// propagate to the caller instead of transitioning here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallPhase {
    Idle,
    WaitingForRenderer,
    Scanning,
    Staging,
    Rendering,
    Splicing,
    Done,
    Failed,
}

/// What one completed install pass did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Math candidates found by the scan
    pub candidates: usize,
    /// Candidates spliced into the document
    pub spliced: usize,
    /// Whether the batch typeset failed (logged, not raised)
    pub renderer_failed: bool,
}

/// Owns the renderer and configuration for install passes over documents.
pub struct Installer<R> {
    renderer: R,
    config: SpliceConfig,
    phase: InstallPhase,
}

impl<R: MathRenderer> Installer<R> {
    /// Create an installer with default configuration
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            config: SpliceConfig::default(),
            phase: InstallPhase::Idle,
        }
    }

    /// Set the splice configuration
    pub fn with_config(mut self, config: SpliceConfig) -> Self {
        self.config = config;
        self
    }

    /// Current phase of the most recent install pass
    pub fn phase(&self) -> InstallPhase {
        self.phase
    }

    pub fn config(&self) -> &SpliceConfig {
        &self.config
    }

    /// Run one install pass over `doc`.
    ///
    /// Awaits renderer readiness and the batch typeset; neither await is
    /// bounded by a timeout. A typeset failure is logged and reported via
    /// [`InstallReport::renderer_failed`] after staging cleanup; it does
    /// not surface as an error. Structural splice errors propagate and end
    /// the pass with already-spliced items left in place.
    pub async fn install(&mut self, doc: &mut Document) -> Result<InstallReport, SpliceError> {
        self.phase = InstallPhase::WaitingForRenderer;
        self.renderer.ready().await?;

        self.phase = InstallPhase::Scanning;
        let candidates = scan(doc, None);
        let found = candidates.len();
        tracing::debug!(candidates = found, "scan pass complete");

        self.phase = InstallPhase::Staging;
        let staging = StagingArea::stage(doc, candidates);

        self.phase = InstallPhase::Rendering;
        match self.renderer.typeset(doc, staging.root()).await {
            Ok(()) => {
                self.phase = InstallPhase::Splicing;
                let spliced = splice_all(doc, staging.items(), &self.config)?;
                staging.teardown(doc);
                self.phase = InstallPhase::Done;
                Ok(InstallReport {
                    candidates: found,
                    spliced,
                    renderer_failed: false,
                })
            }
            Err(err) => {
                tracing::error!(error = %err, "math typeset failed");
                self.phase = InstallPhase::Splicing;
                staging.teardown(doc);
                self.phase = InstallPhase::Failed;
                Ok(InstallReport {
                    candidates: found,
                    spliced: 0,
                    renderer_failed: true,
                })
            }
        }
    }
}

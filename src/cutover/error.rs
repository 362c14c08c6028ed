// ABOUTME: Error types for cutover runs.
// ABOUTME: Preserves the failing step and target alongside the platform error.

use crate::platform::AppError;

use super::plan::CutoverStep;

/// Errors that can occur during a cutover run.
///
/// The run is fail-fast: the first error halts the remaining sequence, and
/// completed side effects are not rolled back. A re-run snapshots whatever
/// was left behind and converges from there.
#[derive(Debug, thiserror::Error)]
pub enum CutoverError {
    /// An existence check failed before any mutation started.
    #[error("existence check for '{target}' failed: {source}")]
    Query { target: String, source: AppError },

    /// A mutating step failed; no later step was attempted.
    #[error("could not {step} ('{target}'): {source}")]
    Step {
        step: CutoverStep,
        target: String,
        source: AppError,
    },
}

impl CutoverError {
    /// The step that failed, if the failure happened during execution.
    pub fn failed_step(&self) -> Option<CutoverStep> {
        match self {
            CutoverError::Query { .. } => None,
            CutoverError::Step { step, .. } => Some(*step),
        }
    }
}

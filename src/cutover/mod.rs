// ABOUTME: Stage-2 blue/green cutover orchestration.
// ABOUTME: Snapshot existence once, build an ordered plan, execute fail-fast.

mod error;
mod identity;
mod plan;
mod run;
mod snapshot;

pub use error::CutoverError;
pub use identity::CutoverIdentities;
pub use plan::{CutoverPlan, CutoverStep};
pub use run::{StatusReport, run_cutover, survey};
pub use snapshot::ExistenceSnapshot;

// ABOUTME: Existence snapshot captured before any mutation begins.
// ABOUTME: Two concurrent queries joined into one immutable pair of flags.

use futures::future;

use crate::platform::AppOps;

use super::error::CutoverError;
use super::identity::CutoverIdentities;

/// What already exists on the platform, read once at the start of a run.
///
/// Both flags are captured before the first mutating step, and the plan is
/// computed from this value alone; branch decisions are never re-evaluated
/// mid-sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExistenceSnapshot {
    /// A stale `-blue` backup is present from a previous cutover.
    pub backup_exists: bool,
    /// An application currently owns the primary name.
    pub live_exists: bool,
}

impl ExistenceSnapshot {
    /// Query backup and live existence concurrently and join the results.
    /// The join is the barrier: no mutation may start before both answers
    /// are in.
    pub async fn capture<P: AppOps + ?Sized>(
        platform: &P,
        ids: &CutoverIdentities,
    ) -> Result<Self, CutoverError> {
        let backup = async {
            platform
                .get_app_details(&ids.blue)
                .await
                .map_err(|source| CutoverError::Query {
                    target: ids.blue.name().to_string(),
                    source,
                })
        };
        let live = async {
            platform
                .get_app_details(&ids.live)
                .await
                .map_err(|source| CutoverError::Query {
                    target: ids.live.name().to_string(),
                    source,
                })
        };

        let (backup, live) = future::try_join(backup, live).await?;

        Ok(Self {
            backup_exists: backup.is_some(),
            live_exists: live.is_some(),
        })
    }
}

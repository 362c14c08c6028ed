// ABOUTME: Cutover plan: the ordered, conditionally-included step sequence.
// ABOUTME: Built once from the existence snapshot, then executed top to bottom.

use std::fmt;

use super::snapshot::ExistenceSnapshot;

/// One step of the cutover sequence.
///
/// The order of the variants is the execution order. Binding the candidate
/// (`BindGreen`) always precedes unbinding the old application
/// (`UnbindLive`), which is what keeps the primary route backed by at least
/// one application throughout the handover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutoverStep {
    /// Delete the stale `-blue` backup so the upcoming rename target is free.
    ClearBackup,
    /// Bind the primary route to the green candidate.
    BindGreen,
    /// Unbind the primary route from the old live application.
    UnbindLive,
    /// Detach the temporary `-green` route from the candidate.
    ClearGreenRoute,
    /// Rename the old live application to the `-blue` backup name.
    RetireLive,
    /// Rename the candidate to the primary application name.
    PromoteGreen,
    /// Stop the retired backup; it stays around for manual fallback.
    StopBackup,
}

impl fmt::Display for CutoverStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CutoverStep::ClearBackup => "delete stale backup",
            CutoverStep::BindGreen => "bind primary route to candidate",
            CutoverStep::UnbindLive => "unbind primary route from old application",
            CutoverStep::ClearGreenRoute => "detach temporary route from candidate",
            CutoverStep::RetireLive => "rename old application to backup",
            CutoverStep::PromoteGreen => "rename candidate to primary name",
            CutoverStep::StopBackup => "stop retired backup",
        };
        f.write_str(label)
    }
}

/// The ordered list of steps a run will execute. A value: once built from
/// the snapshot it is immutable and is executed top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutoverPlan {
    steps: Vec<CutoverStep>,
}

impl CutoverPlan {
    /// Compute the applicable steps from the snapshot.
    ///
    /// `ClearGreenRoute` is included even on a first deployment: stage 1
    /// always maps the temporary route, so it always needs detaching.
    pub fn build(snapshot: &ExistenceSnapshot) -> Self {
        let mut steps = Vec::with_capacity(7);

        if snapshot.backup_exists {
            steps.push(CutoverStep::ClearBackup);
        }
        steps.push(CutoverStep::BindGreen);
        if snapshot.live_exists {
            steps.push(CutoverStep::UnbindLive);
        }
        steps.push(CutoverStep::ClearGreenRoute);
        if snapshot.live_exists {
            steps.push(CutoverStep::RetireLive);
        }
        steps.push(CutoverStep::PromoteGreen);
        if snapshot.live_exists {
            steps.push(CutoverStep::StopBackup);
        }

        Self { steps }
    }

    pub fn steps(&self) -> &[CutoverStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CutoverStep::*;

    fn plan(backup_exists: bool, live_exists: bool) -> CutoverPlan {
        CutoverPlan::build(&ExistenceSnapshot {
            backup_exists,
            live_exists,
        })
    }

    #[test]
    fn full_plan_when_backup_and_live_exist() {
        assert_eq!(
            plan(true, true).steps(),
            [
                ClearBackup,
                BindGreen,
                UnbindLive,
                ClearGreenRoute,
                RetireLive,
                PromoteGreen,
                StopBackup,
            ]
        );
    }

    #[test]
    fn first_deployment_only_binds_and_promotes() {
        assert_eq!(
            plan(false, false).steps(),
            [BindGreen, ClearGreenRoute, PromoteGreen]
        );
    }

    #[test]
    fn stale_backup_without_live_is_cleared_first() {
        assert_eq!(
            plan(true, false).steps(),
            [ClearBackup, BindGreen, ClearGreenRoute, PromoteGreen]
        );
    }

    #[test]
    fn live_without_backup_skips_clear_only() {
        assert_eq!(
            plan(false, true).steps(),
            [
                BindGreen,
                UnbindLive,
                ClearGreenRoute,
                RetireLive,
                PromoteGreen,
                StopBackup,
            ]
        );
    }

    #[test]
    fn bind_always_precedes_unbind() {
        for backup in [false, true] {
            for live in [false, true] {
                let plan = plan(backup, live);
                let bind = plan.steps().iter().position(|s| *s == BindGreen).unwrap();
                if let Some(unbind) = plan.steps().iter().position(|s| *s == UnbindLive) {
                    assert!(bind < unbind, "bind must come before unbind");
                }
            }
        }
    }
}

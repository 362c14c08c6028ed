// ABOUTME: Stage-2 cutover execution: snapshot, plan, then sequential steps.
// ABOUTME: Also provides the read-only status survey used by the CLI.

use futures::future;

use crate::platform::{AppDetail, AppError, AppOps};
use crate::types::AppIdentity;

use super::error::CutoverError;
use super::identity::CutoverIdentities;
use super::plan::{CutoverPlan, CutoverStep};
use super::snapshot::ExistenceSnapshot;

/// Run the stage-2 cutover for `live`.
///
/// Derives the green/blue identities, snapshots existence (both queries
/// complete before anything mutates), builds the plan, and executes it
/// strictly in order. Each step's completion gates the next; the first
/// failure is returned and nothing further runs.
pub async fn run_cutover<P: AppOps + ?Sized>(
    platform: &P,
    live: &AppIdentity,
) -> Result<(), CutoverError> {
    let ids = CutoverIdentities::derive(live);
    tracing::info!(app = %ids.live.name(), route = %ids.live.route(), "starting blue/green cutover");

    let snapshot = ExistenceSnapshot::capture(platform, &ids).await?;
    tracing::debug!(
        backup_exists = snapshot.backup_exists,
        live_exists = snapshot.live_exists,
        "captured existence snapshot"
    );

    let plan = CutoverPlan::build(&snapshot);
    tracing::info!(steps = plan.len(), "executing cutover plan");

    execute(platform, &ids, &plan).await?;

    tracing::info!(app = %ids.live.name(), route = %ids.live.route(), "cutover complete");
    Ok(())
}

async fn execute<P: AppOps + ?Sized>(
    platform: &P,
    ids: &CutoverIdentities,
    plan: &CutoverPlan,
) -> Result<(), CutoverError> {
    let green_on_primary = ids.green_on_primary();

    for step in plan.steps() {
        tracing::info!(%step, "cutover step");

        let result = match step {
            CutoverStep::ClearBackup => platform.delete_app(&ids.blue).await,
            CutoverStep::BindGreen => platform.map_route(&green_on_primary).await,
            CutoverStep::UnbindLive => platform.unmap_route(&ids.live).await,
            CutoverStep::ClearGreenRoute => platform.unmap_route(&ids.green).await,
            CutoverStep::RetireLive => platform.rename_app(&ids.live, &ids.blue).await,
            CutoverStep::PromoteGreen => platform.rename_app(&ids.green, &ids.live).await,
            CutoverStep::StopBackup => platform.stop_app(&ids.blue).await,
        };

        result.map_err(|source| CutoverError::Step {
            step: *step,
            target: step_target(*step, ids).name().to_string(),
            source,
        })?;
    }

    Ok(())
}

/// The application a step operates on, for error reporting.
fn step_target(step: CutoverStep, ids: &CutoverIdentities) -> &AppIdentity {
    match step {
        CutoverStep::ClearBackup | CutoverStep::StopBackup => &ids.blue,
        CutoverStep::BindGreen | CutoverStep::ClearGreenRoute | CutoverStep::PromoteGreen => {
            &ids.green
        }
        CutoverStep::UnbindLive | CutoverStep::RetireLive => &ids.live,
    }
}

/// Existence and state of the live, green, and blue applications.
#[derive(Debug)]
pub struct StatusReport {
    pub live: (AppIdentity, Option<AppDetail>),
    pub green: (AppIdentity, Option<AppDetail>),
    pub blue: (AppIdentity, Option<AppDetail>),
}

/// Query all three identities for the `status` command. Read-only.
pub async fn survey<P: AppOps + ?Sized>(
    platform: &P,
    live: &AppIdentity,
) -> Result<StatusReport, CutoverError> {
    let ids = CutoverIdentities::derive(live);

    let query = |app: &AppIdentity| {
        let app = app.clone();
        async move {
            let detail = platform
                .get_app_details(&app)
                .await
                .map_err(|source: AppError| CutoverError::Query {
                    target: app.name().to_string(),
                    source,
                })?;
            Ok::<_, CutoverError>((app, detail))
        }
    };

    let (live, green, blue) =
        future::try_join3(query(&ids.live), query(&ids.green), query(&ids.blue)).await?;

    Ok(StatusReport { live, green, blue })
}

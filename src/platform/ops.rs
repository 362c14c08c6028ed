// ABOUTME: Application operations trait for the platform control plane.
// ABOUTME: Route binding, rename, stop, delete, and existence queries.

use crate::types::AppIdentity;
use async_trait::async_trait;

/// Application and route operations against the platform control plane.
///
/// Every operation is a single control-plane call. Implementations are
/// injectable so the cutover sequence can run against an in-memory model in
/// tests.
#[async_trait]
pub trait AppOps: Send + Sync {
    /// Look up an application by name. Returns `None` if it does not exist;
    /// "not found" is not an error for this query.
    async fn get_app_details(&self, app: &AppIdentity) -> Result<Option<AppDetail>, AppError>;

    /// Bind the identity's route (host.domain) to its application.
    async fn map_route(&self, app: &AppIdentity) -> Result<(), AppError>;

    /// Remove the identity's route binding. Unbinding a route that is not
    /// bound is success.
    async fn unmap_route(&self, app: &AppIdentity) -> Result<(), AppError>;

    /// Rename an existing application. Fails if `from` does not exist.
    async fn rename_app(&self, from: &AppIdentity, to: &AppIdentity) -> Result<(), AppError>;

    /// Stop a running application. Fails if it does not exist.
    async fn stop_app(&self, app: &AppIdentity) -> Result<(), AppError>;

    /// Delete an application and its instances.
    async fn delete_app(&self, app: &AppIdentity) -> Result<(), AppError>;
}

/// The platform's record of an existing application.
#[derive(Debug, Clone)]
pub struct AppDetail {
    /// Application name as the platform reports it.
    pub name: String,
    /// Requested state, e.g. "started" or "stopped".
    pub state: Option<String>,
    /// Number of instances, when the platform reports it.
    pub instances: Option<u32>,
}

/// Errors from application operations.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("application not found: {0}")]
    NotFound(String),

    #[error("route not found: {0}")]
    RouteNotFound(String),

    #[error("conflicting application or route: {0}")]
    Conflict(String),

    #[error("not authorized: {0}")]
    Unauthorized(String),

    #[error("platform error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),
}

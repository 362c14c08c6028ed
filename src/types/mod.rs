// ABOUTME: Validated domain types for applications and routes.
// ABOUTME: Newtypes reject invalid names before they reach the platform.

mod app_name;
mod host_name;
mod identity;

pub use app_name::{AppName, AppNameError, MAX_APP_NAME_LEN};
pub use host_name::{HostName, HostNameError};
pub use identity::AppIdentity;

// ABOUTME: Platform control-plane client facade.
// ABOUTME: Exposes the AppOps trait and its HTTP implementation.

mod error;
mod http;
mod ops;

pub use error::{PlatformError, PlatformErrorKind};
pub use http::HttpPlatform;
pub use ops::{AppDetail, AppError, AppOps};

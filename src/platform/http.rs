// ABOUTME: HTTP implementation of AppOps against the platform control plane.
// ABOUTME: One http1 request per operation, with status-code error mapping.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::{AUTHORIZATION, CONTENT_TYPE, HOST};
use hyper::{Method, Request, Uri};
use hyper_util::rt::TokioIo;
use parking_lot::Mutex;
use serde::Deserialize;
use std::time::Duration;
use tokio::net::TcpStream;

use crate::config::EnvValue;
use crate::types::AppIdentity;

use super::error::PlatformError;
use super::ops::{AppDetail, AppError, AppOps};
use async_trait::async_trait;

/// Control-plane API surface, one path per operation:
///
///   GET    /v1/apps?name=<name>                      app details
///   PUT    /v1/routes/<host>/apps/<name>?domain=<d>  bind route
///   DELETE /v1/routes/<host>/apps/<name>?domain=<d>  unbind route
///   PUT    /v1/apps/<name>/name                      rename ({"name": <to>})
///   POST   /v1/apps/<name>/actions/stop              stop
///   DELETE /v1/apps/<name>?recursive=true            delete
#[derive(Debug)]
pub struct HttpPlatform {
    host: String,
    port: u16,
    authority: String,
    timeout: Duration,
    token_source: EnvValue,
    // Resolved lazily on first request so a missing credential surfaces
    // against the operation that needed it.
    token: Mutex<Option<String>>,
}

impl HttpPlatform {
    /// Create a client for the control plane at `endpoint`
    /// (e.g. `http://api.pcf.example.com`).
    pub fn new(
        endpoint: &str,
        token_source: EnvValue,
        timeout: Duration,
    ) -> Result<Self, PlatformError> {
        let uri: Uri = endpoint.parse().map_err(|e| PlatformError::Endpoint {
            endpoint: endpoint.to_string(),
            reason: format!("{e}"),
        })?;

        if let Some(scheme) = uri.scheme_str()
            && scheme != "http"
        {
            return Err(PlatformError::UnsupportedScheme {
                scheme: scheme.to_string(),
            });
        }

        let host = uri
            .host()
            .ok_or_else(|| PlatformError::Endpoint {
                endpoint: endpoint.to_string(),
                reason: "missing host".to_string(),
            })?
            .to_string();
        let port = uri.port_u16().unwrap_or(80);

        let authority = if port == 80 {
            host.clone()
        } else {
            format!("{host}:{port}")
        };

        Ok(Self {
            host,
            port,
            authority,
            timeout,
            token_source,
            token: Mutex::new(None),
        })
    }

    fn bearer(&self) -> Result<String, AppError> {
        if let Some(token) = self.token.lock().as_ref() {
            return Ok(token.clone());
        }
        let resolved = self
            .token_source
            .resolve()
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;
        *self.token.lock() = Some(resolved.clone());
        Ok(resolved)
    }

    /// Issue one request and collect the response. The timeout covers the
    /// whole round trip.
    async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Vec<u8>>,
    ) -> Result<(u16, Bytes), AppError> {
        let token = self.bearer()?;
        tracing::debug!(%method, path = %path_and_query, "platform request");

        let round_trip = async {
            let stream = TcpStream::connect((self.host.as_str(), self.port))
                .await
                .map_err(|e| AppError::Transport(format!("connect {}: {e}", self.authority)))?;
            let io = TokioIo::new(stream);

            let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
                .await
                .map_err(|e| AppError::Transport(e.to_string()))?;
            tokio::spawn(async move {
                if let Err(e) = conn.await {
                    tracing::debug!("platform connection closed with error: {e}");
                }
            });

            let mut builder = Request::builder()
                .method(method)
                .uri(path_and_query)
                .header(HOST, self.authority.as_str())
                .header(AUTHORIZATION, format!("bearer {token}"));
            if body.is_some() {
                builder = builder.header(CONTENT_TYPE, "application/json");
            }
            let request = builder
                .body(Full::new(Bytes::from(body.unwrap_or_default())))
                .map_err(|e| AppError::Transport(e.to_string()))?;

            let response = sender
                .send_request(request)
                .await
                .map_err(|e| AppError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            let bytes = response
                .into_body()
                .collect()
                .await
                .map_err(|e| AppError::Transport(e.to_string()))?
                .to_bytes();

            Ok((status, bytes))
        };

        tokio::time::timeout(self.timeout, round_trip)
            .await
            .map_err(|_| {
                AppError::Transport(format!(
                    "request to {} timed out after {:?}",
                    self.authority, self.timeout
                ))
            })?
    }

    fn app_path(&self, app: &AppIdentity) -> String {
        format!("/v1/apps/{}", urlencoding::encode(app.name().as_str()))
    }

    fn route_binding_path(&self, app: &AppIdentity) -> String {
        format!(
            "/v1/routes/{}/apps/{}?domain={}",
            urlencoding::encode(app.host().as_str()),
            urlencoding::encode(app.name().as_str()),
            urlencoding::encode(app.domain()),
        )
    }
}

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn body_message(body: &Bytes) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(alias = "description")]
        message: String,
    }

    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}

fn map_api_error(status: u16, body: &Bytes) -> AppError {
    match status {
        401 | 403 => AppError::Unauthorized(body_message(body)),
        _ => AppError::Api {
            status,
            message: body_message(body),
        },
    }
}

fn map_app_error(status: u16, body: &Bytes, app: &AppIdentity) -> AppError {
    match status {
        404 => AppError::NotFound(app.name().to_string()),
        409 => AppError::Conflict(body_message(body)),
        _ => map_api_error(status, body),
    }
}

// =============================================================================
// AppOps Implementation
// =============================================================================

#[derive(Debug, Deserialize)]
struct AppListResponse {
    resources: Vec<AppResource>,
}

#[derive(Debug, Deserialize)]
struct AppResource {
    name: String,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    instances: Option<u32>,
}

#[async_trait]
impl AppOps for HttpPlatform {
    async fn get_app_details(&self, app: &AppIdentity) -> Result<Option<AppDetail>, AppError> {
        let path = format!("/v1/apps?name={}", urlencoding::encode(app.name().as_str()));
        let (status, body) = self.request(Method::GET, &path, None).await?;

        match status {
            200 => {
                let list: AppListResponse = serde_json::from_slice(&body)
                    .map_err(|e| AppError::Transport(format!("malformed app listing: {e}")))?;
                Ok(list.resources.into_iter().next().map(|r| AppDetail {
                    name: r.name,
                    state: r.state,
                    instances: r.instances,
                }))
            }
            404 => Ok(None),
            _ => Err(map_api_error(status, &body)),
        }
    }

    async fn map_route(&self, app: &AppIdentity) -> Result<(), AppError> {
        let path = self.route_binding_path(app);
        let (status, body) = self.request(Method::PUT, &path, None).await?;

        match status {
            200..=299 => Ok(()),
            _ => Err(map_app_error(status, &body, app)),
        }
    }

    async fn unmap_route(&self, app: &AppIdentity) -> Result<(), AppError> {
        let path = self.route_binding_path(app);
        let (status, body) = self.request(Method::DELETE, &path, None).await?;

        match status {
            200..=299 => Ok(()),
            // Route or binding already gone counts as unbound.
            404 => Ok(()),
            _ => Err(map_api_error(status, &body)),
        }
    }

    async fn rename_app(&self, from: &AppIdentity, to: &AppIdentity) -> Result<(), AppError> {
        let path = format!("{}/name", self.app_path(from));
        let payload = serde_json::to_vec(&serde_json::json!({ "name": to.name().as_str() }))
            .map_err(|e| AppError::Transport(e.to_string()))?;
        let (status, body) = self.request(Method::PUT, &path, Some(payload)).await?;

        match status {
            200..=299 => Ok(()),
            _ => Err(map_app_error(status, &body, from)),
        }
    }

    async fn stop_app(&self, app: &AppIdentity) -> Result<(), AppError> {
        let path = format!("{}/actions/stop", self.app_path(app));
        let (status, body) = self.request(Method::POST, &path, None).await?;

        match status {
            200..=299 => Ok(()),
            _ => Err(map_app_error(status, &body, app)),
        }
    }

    async fn delete_app(&self, app: &AppIdentity) -> Result<(), AppError> {
        let path = format!("{}?recursive=true", self.app_path(app));
        let (status, body) = self.request(Method::DELETE, &path, None).await?;

        match status {
            200..=299 => Ok(()),
            _ => Err(map_app_error(status, &body, app)),
        }
    }
}

//! Authentication provider capability.
//!
//! A provider (password, phone OTP, OAuth, ...) is registered by name and
//! shared read-only across every request. Per-request state lives in
//! [`Session`], never in the provider.
//!
//! Each action receives the request and the session and returns the full
//! response; error responses are the provider's own business.

use async_trait::async_trait;
use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};

use crate::auth::Session;
use crate::error::AppError;

#[async_trait]
pub trait Provider: Send + Sync + 'static {
    /// Registration key, matched against the first path segment.
    fn name(&self) -> &str;

    async fn login(&self, req: Request, session: &mut Session) -> Response;

    async fn logout(&self, req: Request, session: &mut Session) -> Response;

    async fn register(&self, _req: Request, _session: &mut Session) -> Response {
        AppError::NotFound.into_response()
    }

    async fn callback(&self, _req: Request, _session: &mut Session) -> Response {
        AppError::NotFound.into_response()
    }

    /// Fallback for any other sub-route under `{prefix}/{name}/`.
    async fn serve_http(&self, _req: Request, _session: &mut Session) -> Response {
        AppError::NotFound.into_response()
    }
}

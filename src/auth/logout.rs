/*
 * Responsibility
 * - top-level の /logout を処理する collaborator の契約 (LogoutHandler)
 * - 既定実装: claims を破棄して redirect するだけ (session store の破棄は外部の責務)
 */
use async_trait::async_trait;
use axum::{
    extract::Request,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::Session;

#[async_trait]
pub trait LogoutHandler: Send + Sync + 'static {
    async fn handle(&self, req: Request, session: &mut Session) -> Response;
}

/// Drops the session's claims and answers `303 See Other` to `location`.
#[derive(Clone, Debug)]
pub struct RedirectLogoutHandler {
    location: String,
}

impl RedirectLogoutHandler {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

impl Default for RedirectLogoutHandler {
    fn default() -> Self {
        Self::new("/")
    }
}

#[async_trait]
impl LogoutHandler for RedirectLogoutHandler {
    async fn handle(&self, _req: Request, session: &mut Session) -> Response {
        if let Some(claims) = session.claims.take() {
            tracing::debug!(user_id = %claims.user_id, provider = %claims.provider, "logged out");
        }
        Redirect::to(&self.location).into_response()
    }
}

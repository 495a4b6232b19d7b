//! Request dispatcher for the auth namespace.
//!
//! ```text
//! {prefix}/login                     -> Render("auth/login")
//! {prefix}/logout                    -> LogoutHandler
//! {prefix}/register                  -> Render("auth/register")
//! {prefix}/{provider}/login          -> Provider::login
//! {prefix}/{provider}/logout         -> Provider::logout
//! {prefix}/{provider}/register       -> Provider::register
//! {prefix}/{provider}/callback       -> Provider::callback
//! {prefix}/{provider}/{anything}     -> Provider::serve_http
//! otherwise                          -> 404
//! ```
//!
//! Exactly one handler runs per request. The dispatcher itself never fails;
//! handlers own their responses, errors included.

use std::{
    convert::Infallible,
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use axum::{
    Router,
    extract::Request,
    response::{IntoResponse, Response},
};
use tower::Service;

use crate::auth::{Auth, LOGIN_TEMPLATE, REGISTER_TEMPLATE, Session};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProviderAction {
    Login,
    Logout,
    Register,
    Callback,
    Serve,
}

impl ProviderAction {
    fn from_segment(segment: &str) -> Self {
        match segment {
            "login" => Self::Login,
            "logout" => Self::Logout,
            "register" => Self::Register,
            "callback" => Self::Callback,
            _ => Self::Serve,
        }
    }
}

/// Strip `prefix` exactly, drop one leading `/`, and split the rest on `/`.
///
/// A path that does not start with `prefix` is split as-is. The result always
/// holds at least one (possibly empty) segment.
pub(crate) fn split_path<'a>(prefix: &str, path: &'a str) -> Vec<&'a str> {
    let rest = path.strip_prefix(prefix).unwrap_or(path);
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    rest.split('/').collect()
}

/// Cloneable dispatcher over a frozen [`Auth`].
///
/// Implements `tower::Service`, so it can be mounted with
/// `Router::fallback_service` or driven directly in tests.
#[derive(Clone, Debug)]
pub struct ServeMux {
    auth: Arc<Auth>,
}

impl ServeMux {
    pub fn new(auth: Arc<Auth>) -> Self {
        Self { auth }
    }

    pub fn auth(&self) -> &Arc<Auth> {
        &self.auth
    }

    /// Mount the dispatcher as the fallback of an otherwise empty router.
    pub fn into_router(self) -> Router {
        Router::new().fallback_service(self)
    }

    pub async fn dispatch(&self, req: Request) -> Response {
        let path = req.uri().path().to_owned();
        let segments = split_path(self.auth.prefix(), &path);
        let mut session = Session::new(Arc::clone(&self.auth));

        match segments.as_slice() {
            [name, action, ..] => {
                let Some(provider) = self.auth.get_provider(name) else {
                    return not_found();
                };
                session.provider = Some(Arc::clone(&provider));

                let action = ProviderAction::from_segment(action);
                tracing::debug!(provider = %name, ?action, "auth provider dispatch");

                match action {
                    ProviderAction::Login => provider.login(req, &mut session).await,
                    ProviderAction::Logout => provider.logout(req, &mut session).await,
                    ProviderAction::Register => provider.register(req, &mut session).await,
                    ProviderAction::Callback => provider.callback(req, &mut session).await,
                    ProviderAction::Serve => provider.serve_http(req, &mut session).await,
                }
            }
            [page] => match *page {
                "login" => {
                    tracing::debug!(template = LOGIN_TEMPLATE, "auth page");
                    self.auth
                        .render()
                        .execute(LOGIN_TEMPLATE, &mut session, req)
                        .await
                }
                "logout" => {
                    tracing::debug!("auth logout");
                    self.auth.logout_handler().handle(req, &mut session).await
                }
                "register" => {
                    tracing::debug!(template = REGISTER_TEMPLATE, "auth page");
                    self.auth
                        .render()
                        .execute(REGISTER_TEMPLATE, &mut session, req)
                        .await
                }
                _ => not_found(),
            },
            [] => not_found(),
        }
    }
}

fn not_found() -> Response {
    AppError::NotFound.into_response()
}

impl Service<Request> for ServeMux {
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let mux = self.clone();
        Box::pin(async move { Ok(mux.dispatch(req).await) })
    }
}

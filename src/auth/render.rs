//! Page rendering collaborator.
//!
//! The router only asks for `auth/login` and `auth/register`. [`PageRender`]
//! is a bare default so the service runs without a template engine; real
//! deployments plug their own [`Render`].

use async_trait::async_trait;
use axum::{
    extract::Request,
    response::{Html, IntoResponse, Response},
};

use crate::auth::Session;
use crate::error::AppError;

pub const LOGIN_TEMPLATE: &str = "auth/login";
pub const REGISTER_TEMPLATE: &str = "auth/register";

#[async_trait]
pub trait Render: Send + Sync + 'static {
    async fn execute(&self, template: &str, session: &mut Session, req: Request) -> Response;
}

/// Minimal HTML page listing the registered providers.
#[derive(Clone, Copy, Debug, Default)]
pub struct PageRender;

#[async_trait]
impl Render for PageRender {
    async fn execute(&self, template: &str, session: &mut Session, _req: Request) -> Response {
        let (title, action) = match template {
            LOGIN_TEMPLATE => ("Sign in", "login"),
            REGISTER_TEMPLATE => ("Create account", "register"),
            _ => {
                tracing::warn!(template, "unknown auth template");
                return AppError::NotFound.into_response();
            }
        };

        let mut body = format!(
            "<!doctype html>\n<html>\n<head><title>{title}</title></head>\n<body>\n<h1>{title}</h1>\n<ul>\n"
        );
        for provider in session.auth.providers() {
            let name = escape_html(provider.name());
            let href = escape_html(&session.auth_url(&format!("{}/{action}", provider.name())));
            body.push_str(&format!("<li><a href=\"{href}\">{name}</a></li>\n"));
        }
        body.push_str("</ul>\n</body>\n</html>\n");

        Html(body).into_response()
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{body::Body, http::StatusCode};

    use super::*;
    use crate::auth::{Auth, Provider, RedirectLogoutHandler};

    struct Dummy(&'static str);

    #[async_trait]
    impl Provider for Dummy {
        fn name(&self) -> &str {
            self.0
        }

        async fn login(&self, _req: Request, _session: &mut Session) -> Response {
            StatusCode::OK.into_response()
        }

        async fn logout(&self, _req: Request, _session: &mut Session) -> Response {
            StatusCode::OK.into_response()
        }
    }

    fn session() -> Session {
        let mut auth = Auth::new("/auth", PageRender, RedirectLogoutHandler::default());
        auth.register_provider(Dummy("phone")).unwrap();
        auth.register_provider(Dummy("<x>")).unwrap();
        Session::new(Arc::new(auth))
    }

    async fn body_text(res: Response) -> String {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn login_page_links_providers() {
        let mut session = session();
        let res = PageRender
            .execute(LOGIN_TEMPLATE, &mut session, Request::new(Body::empty()))
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = body_text(res).await;
        assert!(body.contains("<title>Sign in</title>"));
        assert!(body.contains("href=\"/auth/phone/login\""));
        assert!(body.contains("&lt;x&gt;"));
        assert!(!body.contains("<x>"));
    }

    #[tokio::test]
    async fn register_page_links_register_actions() {
        let mut session = session();
        let res = PageRender
            .execute(REGISTER_TEMPLATE, &mut session, Request::new(Body::empty()))
            .await;

        let body = body_text(res).await;
        assert!(body.contains("href=\"/auth/phone/register\""));
    }

    #[tokio::test]
    async fn unknown_template_is_not_found() {
        let mut session = session();
        let res = PageRender
            .execute("auth/other", &mut session, Request::new(Body::empty()))
            .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}

//! Recording collaborators shared by the dispatch tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use auth_mux::auth::{Auth, LogoutHandler, Provider, Render, ServeMux, Session};
use axum::{
    body::Body,
    extract::Request,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tower::ServiceExt;

/// One handler invocation as seen by the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// `provider:action`, `render:template` or `logout_handler`
    pub handler: String,
    /// provider name stored on the session at call time
    pub session_provider: Option<String>,
    pub path: String,
}

#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Recorder {
    pub fn record(&self, handler: String, req: &Request, session: &Session) {
        self.calls.lock().unwrap().push(Call {
            handler,
            session_provider: session.provider_name().map(str::to_string),
            path: req.uri().path().to_string(),
        });
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn handlers(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.handler).collect()
    }
}

pub struct RecordingProvider {
    pub name: &'static str,
    pub recorder: Recorder,
}

impl RecordingProvider {
    fn hit(&self, action: &str, req: &Request, session: &Session) -> Response {
        self.recorder.record(format!("{}:{action}", self.name), req, session);
        (StatusCode::OK, format!("{}:{action}", self.name)).into_response()
    }
}

#[async_trait]
impl Provider for RecordingProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn login(&self, req: Request, session: &mut Session) -> Response {
        self.hit("login", &req, session)
    }

    async fn logout(&self, req: Request, session: &mut Session) -> Response {
        self.hit("logout", &req, session)
    }

    async fn register(&self, req: Request, session: &mut Session) -> Response {
        self.hit("register", &req, session)
    }

    async fn callback(&self, req: Request, session: &mut Session) -> Response {
        self.hit("callback", &req, session)
    }

    async fn serve_http(&self, req: Request, session: &mut Session) -> Response {
        self.hit("serve_http", &req, session)
    }
}

pub struct RecordingRender {
    pub recorder: Recorder,
}

#[async_trait]
impl Render for RecordingRender {
    async fn execute(&self, template: &str, session: &mut Session, req: Request) -> Response {
        self.recorder.record(format!("render:{template}"), &req, session);
        (StatusCode::OK, template.to_string()).into_response()
    }
}

pub struct RecordingLogout {
    pub recorder: Recorder,
}

#[async_trait]
impl LogoutHandler for RecordingLogout {
    async fn handle(&self, req: Request, session: &mut Session) -> Response {
        self.recorder.record("logout_handler".to_string(), &req, session);
        StatusCode::SEE_OTHER.into_response()
    }
}

/// Auth over `prefix` with recording collaborators and the given providers.
pub fn mux(prefix: &str, providers: &[&'static str]) -> (ServeMux, Recorder) {
    let recorder = Recorder::default();
    let mut auth = Auth::new(
        prefix,
        RecordingRender {
            recorder: recorder.clone(),
        },
        RecordingLogout {
            recorder: recorder.clone(),
        },
    );
    for &name in providers {
        auth.register_provider(RecordingProvider {
            name,
            recorder: recorder.clone(),
        })
        .unwrap();
    }
    (auth.serve_mux(), recorder)
}

pub async fn get(mux: &ServeMux, path: &str) -> Response {
    mux.clone()
        .oneshot(
            axum::http::Request::get(path)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_text(res: Response) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

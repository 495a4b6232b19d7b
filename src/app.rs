/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config 読み込み → Auth 組み立て → Router 組み立て
 * - Middleware の適用 (request-id / trace / timeout / security headers)
 * - axum::serve() で起動、Ctrl-C / SIGTERM で graceful shutdown
 */
use std::{panic, process};

use anyhow::Result;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::auth::{Auth, PageRender, RedirectLogoutHandler, ServeMux};
use crate::config::Config;
use crate::middleware;

fn init_tracing() {
    // RUST_LOG=info,auth_mux=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash the whole process so we notice immediately.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

/// Run with the default collaborators and no providers registered.
pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    let auth = default_auth(&config);
    serve(&config, auth).await
}

/// Auth with the built-in page render and redirecting logout handler.
///
/// Callers register their providers on the returned value before [`serve`].
pub fn default_auth(config: &Config) -> Auth {
    Auth::new(
        config.auth_prefix.clone(),
        PageRender,
        RedirectLogoutHandler::new(config.logout_redirect.clone()),
    )
}

pub async fn serve(config: &Config, auth: Auth) -> Result<()> {
    tracing::info!(
        prefix = %auth.prefix(),
        providers = auth.providers().len(),
        "starting auth router in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let app = build_router(auth.serve_mux());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("auth router stopped");
    Ok(())
}

pub fn build_router(mux: ServeMux) -> Router {
    async fn health() -> Json<Value> {
        Json(json!({"status": "ok"}))
    }

    let router = Router::new()
        .route("/health", get(health))
        .fallback_service(mux);

    let router = middleware::security_headers::apply(router);
    middleware::http::apply(router)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}

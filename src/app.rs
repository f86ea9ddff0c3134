/*
 * Responsibility
 * - tracing / panic hook 初期化
 * - Config読み込み → 依存生成 → Router 組み立て
 * - Middleware の適用 (CORS / request-id / trace / timeout)
 * - axum::serve() で起動、SIGINT/SIGTERM で graceful shutdown (猶予 5 秒)
 */
use std::future::{Future, IntoFuture};
use std::sync::Arc;
use std::time::Duration;
use std::{panic, process};

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::auth::build_auth_service;
use crate::state::AppState;
use crate::{api, middleware};

// In-flight requests still running this long after the signal are dropped.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

fn init_tracing() {
    // RUST_LOG=info,user_info_api=debug,tower_http=debug cargo run
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

        // Development: crash the whole process so the defect is noticed.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config);
    let app = build_router(state, &config);

    let listener = TcpListener::bind(config.addr).await?;
    serve(listener, app, shutdown_signal(), SHUTDOWN_GRACE).await?;

    tracing::info!("server exited");
    Ok(())
}

/// Serves until `signal` resolves, then drains for at most `grace`.
async fn serve<S>(
    listener: TcpListener,
    app: Router,
    signal: S,
    grace: Duration,
) -> std::io::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    let signalled = Arc::new(Notify::new());

    let server = axum::serve(listener, app)
        .with_graceful_shutdown({
            let signalled = signalled.clone();
            async move {
                signal.await;
                signalled.notify_one();
            }
        })
        .into_future();

    let deadline = async {
        signalled.notified().await;
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = server => result,
        _ = deadline => {
            tracing::warn!(grace = ?grace, "graceful shutdown timed out, dropping in-flight requests");
            Ok(())
        }
    }
}

fn build_state(config: &Config) -> AppState {
    let auth = build_auth_service(config);
    tracing::info!(issuer = %auth.issuer(), "access token verifier ready");

    AppState::new(auth)
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .merge(api::routes(state.clone()))
        .with_state(state);

    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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

    tracing::info!("shutting down server");
}

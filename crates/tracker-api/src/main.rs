//! 주문 추적 API 서버 진입점.
//!
//! 설정 로드, 로깅 초기화, 데모 데이터 시딩 후 HTTP 서버를 시작합니다.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracker_api::openapi::openapi_router;
use tracker_api::routes::create_api_router;
use tracker_api::seed::seed_demo_data;
use tracker_api::AppState;
use tracker_core::{init_logging, AppConfig, CorsConfig, LogConfig};

/// CORS 레이어 생성.
///
/// 설정된 단일 origin만 허용하며, 헤더와 메서드는 모두 허용합니다.
fn cors_layer(config: &CorsConfig) -> anyhow::Result<CorsLayer> {
    let origin: HeaderValue = config
        .allowed_origin
        .parse()
        .with_context(|| format!("invalid CORS origin: {}", config.allowed_origin))?;

    info!(origin = %config.allowed_origin, "CORS configured");

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_headers(Any)
        .allow_methods(Any))
}

/// 전체 라우터 조합.
fn create_router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .merge(create_api_router())
        // OpenAPI 문서
        .merge(openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// OpenAPI 스펙 내보내기 처리.
///
/// `--export-openapi` 플래그가 있으면 OpenAPI JSON을 stdout으로 출력하고 `true`를 반환합니다.
fn handle_export_openapi() -> anyhow::Result<bool> {
    use tracker_api::openapi::ApiDoc;
    use utoipa::OpenApi as _;

    if !std::env::args().any(|arg| arg == "--export-openapi") {
        return Ok(false);
    }

    let json = serde_json::to_string_pretty(&ApiDoc::openapi())?;
    println!("{}", json);
    Ok(true)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    // OpenAPI 내보내기 처리 (서버 시작 전)
    if handle_export_openapi()? {
        return Ok(());
    }

    let config = AppConfig::load_default().context("failed to load configuration")?;

    init_logging(LogConfig::from(&config.logging))
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    info!("Starting Order Tracker API server...");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| {
            error!(
                host = %config.server.host,
                port = config.server.port,
                error = %e,
                "Invalid socket address. Check TRACKER__SERVER__HOST and TRACKER__SERVER__PORT"
            );
            e
        })?;

    let state = Arc::new(AppState::from_config(&config.auth)?);
    info!(version = %state.version, issuer = %state.jwt.issuer, "Application state initialized");

    if config.seed.enabled {
        seed_demo_data(&state).await;
    } else {
        info!("Seeding disabled");
    }

    let app = create_router(state, cors_layer(&config.cors)?);

    info!(%addr, "API server listening");
    info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

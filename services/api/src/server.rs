use crate::cli::ServeArgs;
use crate::infra::{default_scoring_policy, AppState};
use crate::routes::with_advisor_routes;
use axum::http::{HeaderValue, Method};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use ib_advisor::config::{AppConfig, ConfigError, ServerConfig};
use ib_advisor::error::AppError;
use ib_advisor::notification::MailerSendClient;
use ib_advisor::recommendation::RecommendationEngine;
use ib_advisor::service::AdvisorService;
use ib_advisor::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let mailer = Arc::new(MailerSendClient::from_config(&config.mail)?);
    let engine = RecommendationEngine::new(default_scoring_policy());
    let advisor_service = Arc::new(AdvisorService::new(engine, mailer));

    let app = with_advisor_routes(advisor_service)
        .layer(Extension(app_state))
        .layer(cors_layer(&config.server)?)
        .layer(TraceLayer::new_for_http())
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "ib math advisor ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn cors_layer(server: &ServerConfig) -> Result<CorsLayer, ConfigError> {
    let origin = match &server.allowed_origin {
        Some(origin) => {
            let value = HeaderValue::from_str(origin)
                .map_err(|_| ConfigError::InvalidOrigin(origin.clone()))?;
            AllowOrigin::exact(value)
        }
        None => AllowOrigin::from(Any),
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(allowed_origin: Option<&str>) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 4000,
            allowed_origin: allowed_origin.map(str::to_string),
        }
    }

    #[test]
    fn cors_accepts_any_or_a_single_origin() {
        assert!(cors_layer(&server(None)).is_ok());
        assert!(cors_layer(&server(Some("https://advisor.school.example"))).is_ok());
    }

    #[test]
    fn cors_rejects_unencodable_origin() {
        assert!(matches!(
            cors_layer(&server(Some("https://bad\norigin"))),
            Err(ConfigError::InvalidOrigin(_))
        ));
    }
}

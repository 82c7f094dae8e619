use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryEvaluationRepository};
use crate::routes::with_evaluation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use skills360::config::AppConfig;
use skills360::error::AppError;
use skills360::telemetry;
use skills360::workflows::review::{
    DisabledAnalyst, EvaluationService, GeminiAnalyst, NarrativeAnalyst,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

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

    let repository = Arc::new(InMemoryEvaluationRepository::default());
    let analyst: Arc<dyn NarrativeAnalyst> = match GeminiAnalyst::new(&config.analysis) {
        Ok(analyst) => Arc::new(analyst),
        Err(error) => {
            warn!(%error, "narrative backend disabled, rule-based analysis only");
            Arc::new(DisabledAnalyst)
        }
    };
    let evaluation_service = Arc::new(EvaluationService::new(repository, analyst));

    let app = with_evaluation_routes(evaluation_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "skills review service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryProfileRepository};
use crate::routes::with_calculator_routes;
use akassa::config::AppConfig;
use akassa::error::AppError;
use akassa::telemetry;
use akassa::workflows::benefit::BenefitCalculator;
use akassa::workflows::eligibility::ProfileService;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
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

    let calculator = Arc::new(BenefitCalculator::new(config.rules.benefit.clone()));
    let repository = Arc::new(InMemoryProfileRepository::default());
    let profiles = Arc::new(ProfileService::new(repository, &config.rules));

    let app = with_calculator_routes(calculator, profiles)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        ceiling = config.rules.benefit.max_monthly_amount,
        "benefit calculator ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

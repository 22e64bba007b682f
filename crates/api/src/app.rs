use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::jobs::{
    GenerateMonthlyPaymentsJob, JobFrequency, JobRegistry, LeaseExpiryJob, OverdueSweepJob,
    SendRentRemindersJob,
};
use crate::middleware::{init_metrics, metrics_handler};
use crate::routes::{health, jobs};
use crate::services::{
    EmailService, PaymentGeneratorService, ReminderService, RetryPolicy, TwilioService,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub registry: Arc<JobRegistry>,
}

/// Build the job registry: services wired to their channel senders, each
/// job keyed by its stable task name.
pub fn build_registry(config: &Config, pool: PgPool) -> JobRegistry {
    let frequency = match config.jobs.daily_interval_secs {
        Some(secs) => JobFrequency::Seconds(secs),
        None => JobFrequency::Daily,
    };
    let retry = RetryPolicy::new(config.jobs.max_send_attempts, config.jobs.retry_base_ms);

    let email = Arc::new(EmailService::new(config.email.clone()));
    let twilio = Arc::new(TwilioService::new(config.twilio.clone()));

    let generator = Arc::new(PaymentGeneratorService::new(pool.clone()));
    let reminders = Arc::new(ReminderService::new(
        pool.clone(),
        email,
        twilio.clone(),
        twilio,
        retry,
    ));

    let mut registry = JobRegistry::new();
    registry.register(SendRentRemindersJob::new(
        pool.clone(),
        Arc::clone(&generator),
        reminders,
        frequency,
    ));
    registry.register(GenerateMonthlyPaymentsJob::new(
        pool.clone(),
        generator,
        frequency,
    ));
    registry.register(OverdueSweepJob::new(pool.clone(), frequency));
    registry.register(LeaseExpiryJob::new(pool, frequency));
    registry
}

pub fn create_app(config: Config, pool: PgPool, registry: Arc<JobRegistry>) -> Router {
    let config = Arc::new(config);

    init_metrics();

    let state = AppState {
        pool,
        config: config.clone(),
        registry,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Job trigger/status surface consumed by the web/CLI layer.
    let job_routes = Router::new()
        .route("/api/v1/jobs", get(jobs::job_status))
        .route("/api/v1/jobs/:name/run", post(jobs::trigger_job));

    // Public probes and metrics.
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(job_routes)
        .merge(public_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

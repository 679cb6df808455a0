use std::sync::Arc;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{Level, info};

use server::config::AppConfig;
use server::database::init_db;
use server::jobs;
use server::seed::seed_default_settings;
use server::services::achievements::{
    AchievementEvaluator, DisabledAchievementEvaluator, HttpAchievementEvaluator,
};
use server::services::notifier::DbNotifier;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = Arc::new(AppConfig::load().context("Failed to load config")?);

    let db = init_db(&config.database.url)
        .await
        .context("Failed to initialize database")?;
    seed_default_settings(&db)
        .await
        .context("Failed to seed default settings")?;

    let evaluator: Arc<dyn AchievementEvaluator> = match &config.achievements.base_url {
        Some(base_url) => Arc::new(HttpAchievementEvaluator::new(
            base_url.clone(),
            std::time::Duration::from_secs(config.achievements.timeout_secs),
        )?),
        None => Arc::new(DisabledAchievementEvaluator),
    };

    let state = AppState {
        db: db.clone(),
        config: config.clone(),
        notifier: Arc::new(DbNotifier::new(db)),
        evaluator,
    };

    if config.scheduler.enabled {
        tokio::spawn(jobs::run_scheduler_loop(state.clone()));
    } else {
        info!("Scheduler loop disabled; jobs run only via POST /api/v1/scheduler/run");
    }

    let cors = build_cors_layer(&config)?;
    let app = server::build_router(state).layer(cors);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_cors_layer(config: &AppConfig) -> anyhow::Result<CorsLayer> {
    let cors_config = &config.server.cors;

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .max_age(std::time::Duration::from_secs(cors_config.max_age));

    if cors_config.allow_origins.iter().any(|o| o == "*") {
        Ok(layer.allow_origin(Any))
    } else {
        let origins = cors_config
            .allow_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin: {o}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(layer.allow_origin(AllowOrigin::list(origins)))
    }
}

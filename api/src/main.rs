use api::{routes::routes, state::AppState};
use axum::Router;
use common::{config::Config, logger::init_logger};
use migration::Migrator;
use sea_orm_migration::MigratorTrait;
use services::{AnalysisConfig, AnalysisService, FileTextExtractor, LogNotifier};
use similarity::Strategy;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() {
    // Load configuration and initialize logging
    let config = Config::init(".env");
    init_logger(&config.log_level, &config.log_file);

    // Set up dependencies
    let db = db::connect().await;
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let strategy: Strategy = config
        .similarity_strategy
        .parse()
        .expect("SIMILARITY_STRATEGY must be 'shingle' or 'token_diff'");

    let analysis = Arc::new(AnalysisService::new(
        Arc::new(FileTextExtractor::new(
            config.submission_storage_root.as_str(),
        )),
        Arc::new(LogNotifier),
        AnalysisConfig {
            strategy,
            notify_threshold: config.high_similarity_threshold,
            extraction_timeout: Duration::from_secs(config.extraction_timeout_secs),
        },
    ));
    let app_state = AppState::new(db, analysis);

    // Build app router
    let cors = CorsLayer::very_permissive();
    let app = Router::new().nest("/api", routes(app_state)).layer(cors);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid address");

    println!(
        "Starting {} on http://{}:{}",
        config.project_name, config.host, config.port
    );

    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .await
    .expect("Server crashed");
}

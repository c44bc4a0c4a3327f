use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wordcade::results::repository::{
    InMemoryResultRepository, PostgresResultRepository, ResultRepository,
};
use wordcade::shared::AppState;
use wordcade::stats::ScoringConfig;
use wordcade::{ingest, stats};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wordcade=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Wordcade result tracker");

    // In-memory storage by default; Postgres when DATABASE_URL is set.
    let result_repository: Arc<dyn ResultRepository> = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = sqlx::PgPool::connect(&database_url)
                .await
                .expect("Failed to connect to database");
            sqlx::migrate!()
                .run(&pool)
                .await
                .expect("Failed to run database migrations");
            info!("Using PostgreSQL result repository");
            Arc::new(PostgresResultRepository::new(pool))
        }
        Err(_) => {
            info!("DATABASE_URL not set, using in-memory result repository");
            Arc::new(InMemoryResultRepository::new())
        }
    };

    let app_state = AppState::new(result_repository, ScoringConfig::from_env());

    let app = Router::new()
        .route("/", get(|| async { "Wordcade" }))
        .route("/events", post(ingest::handlers::ingest_event))
        .route("/events/batch", post(ingest::handlers::ingest_batch))
        .route("/streaks", post(ingest::handlers::import_streak))
        .route("/players/:player_id/stats", get(stats::handlers::player_stats))
        .route(
            "/players/:player_id/history",
            get(stats::handlers::player_history),
        )
        .route(
            "/guilds/:guild_id/leaderboard",
            get(stats::handlers::guild_leaderboard),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Server running on http://localhost:3000");
    axum::serve(listener, app).await.unwrap();
}

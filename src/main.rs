use std::sync::Arc;

mod admin;
mod app;
mod auth;
mod config;
mod db;
mod error;
mod extract;
mod ratings;
mod state;
mod stores;
#[cfg(test)]
mod test_support;

use crate::{config::AppConfig, db::PgDatabase, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "storerate=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    let pool = db::connect(&config).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("migrations applied");

    let state = AppState::new(Arc::new(PgDatabase::new(pool)), &config);
    let app = app::build_app(state);

    app::serve(app, &config.bind_addr()).await
}

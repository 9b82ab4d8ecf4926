//! Restaurant API server: loads settings, prepares PostgreSQL, seeds the first superuser, serves HTTP.
//!
//! Run from repo root: `cargo run -p restaurant-server`

use restaurant_api::{app, apply_migrations, ensure_database_exists, AppState, AuthService, PgStore, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("restaurant_api=info,restaurant_server=info")
            }),
        )
        .init();

    let settings = Settings::from_env()?;
    ensure_database_exists(&settings.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.database_max_connections)
        .connect(&settings.database_url)
        .await?;

    apply_migrations(&pool).await?;
    let store = PgStore::new(pool);
    AuthService::init_db(&store, &settings).await?;

    if !settings.emails_enabled() && !settings.emails_enabled_real() {
        tracing::warn!("no SMTP transport configured, emails will not be sent");
    }

    let bind_addr = settings.bind_addr.clone();
    let state = AppState::new(store, settings);
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}

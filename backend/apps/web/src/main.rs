//! Web Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors go through
//! `AppError`.

mod config;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use auth::domain::repository::SessionRepository;
use auth::{
    AuthAppState, MemorySessionStore, MemoryUserRepository, PgSessionStore, PgUserRepository,
};
use platform::password::Argon2Hasher;
use snippet::{MemorySnippetRepository, PgSnippetRepository, SnippetAppState};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tokio::time::MissedTickBehavior;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::WebConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "web=info,auth=info,snippet=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WebConfig::from_env()?;
    let hasher = Argon2Hasher::default();

    let app = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect(database_url)
                .await?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            let auth_state = AuthAppState::new(
                PgUserRepository::new(pool.clone()),
                PgSessionStore::new(pool.clone()),
                hasher,
                config.auth.clone(),
            );
            spawn_session_cleanup(auth_state.sessions.clone(), config.session_cleanup_interval);

            routes::build_app(
                auth_state,
                SnippetAppState::new(PgSnippetRepository::new(pool)),
                &config.static_dir,
            )
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory stores; data is lost on exit");

            let auth_state = AuthAppState::new(
                MemoryUserRepository::new(),
                MemorySessionStore::new(),
                hasher,
                config.auth.clone(),
            );
            spawn_session_cleanup(auth_state.sessions.clone(), config.session_cleanup_interval);

            routes::build_app(
                auth_state,
                SnippetAppState::new(MemorySnippetRepository::new()),
                &config.static_dir,
            )
        }
    };

    // Start server
    tracing::info!(addr = %config.addr, "Listening");

    let listener = TcpListener::bind(config.addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
        tracing::info!("Gracefully shutdown");
    })
    .await?;

    Ok(())
}

/// Remove expired sessions now and then every `period`.
/// Failures are logged; the server keeps running.
fn spawn_session_cleanup<S>(sessions: Arc<S>, period: Duration)
where
    S: SessionRepository + Sync + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            // first tick completes immediately
            ticker.tick().await;
            // the store logs the count
            if let Err(e) = sessions.cleanup_expired().await {
                tracing::warn!(error = %e, "Session cleanup failed, continuing anyway");
            }
        }
    });
}

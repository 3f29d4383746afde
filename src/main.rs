// src/main.rs

use dotenvy::dotenv;
use quizdesk::config::Config;
use quizdesk::models::user::User;
use quizdesk::routes;
use quizdesk::state::AppState;
use quizdesk::utils::hash::hash_password;
use std::net::SocketAddr;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Make sure the data directory for the JSON collections exists
    if let Err(e) = tokio::fs::create_dir_all(&config.data_dir).await {
        panic!("Failed to create data directory {}: {}", config.data_dir, e);
    }
    tracing::info!("Using data directory: {}", config.data_dir);

    let port = config.port;
    let state = AppState::new(config);

    // Seed Admin User
    if let Err(e) = seed_admin_user(&state).await {
        tracing::error!("Failed to seed admin user: {:?}", e);
    }

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    // Start the server
    axum::serve(listener, app).await.unwrap();
}

async fn seed_admin_user(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    if let (Some(mobile), Some(password)) = (
        &state.config.admin_mobile,
        &state.config.admin_password,
    ) {
        let existing = state.users.find(|u| &u.mobile == mobile).await?;

        if existing.is_empty() {
            tracing::info!("Seeding admin user: {}", mobile);
            let hashed_password = hash_password(password)?;

            state
                .users
                .save(User::new(
                    "Administrator".to_string(),
                    mobile.clone(),
                    hashed_password,
                    "admin".to_string(),
                ))
                .await?;
            tracing::info!("Admin user created successfully.");
        }
    }
    Ok(())
}

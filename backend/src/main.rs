//! Main entry point for the job portal backend.
//!
//! This file initializes the Axum web server, sets up the database
//! connection, and serves the application router. It orchestrates the
//! application's startup and defines its overall structure.

use backend::app;
use backend::config::Config;
use backend::database::Database;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() {
    init();

    let config = Config::from_env().unwrap();
    let db = Database::new(&config).await.unwrap();

    let app = app(db.pool().clone());

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await.unwrap();

    info!("Starting job portal server on port {}", config.server_port);
    axum::serve(listener, app).await.unwrap();
}

use clap::Parser;
use engram::{
    config::{get_config, CliArgs},
    create_app, db, run_migrations,
};
use std::{net::SocketAddr, sync::Arc};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load environment variables from a .env file if present
    if std::fs::metadata(".env").is_ok() {
        dotenv::dotenv().ok();
    }

    let args = CliArgs::parse();

    // Initialize logging; --debug lowers the default filter
    let default_filter = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    let config = get_config(args);

    // Initialize the database pool and apply migrations
    let pool = Arc::new(db::init_pool(&config.database_url));
    {
        let mut conn = pool.get().expect("Failed to get database connection");
        run_migrations(&mut conn);
    }

    // Build the application with all routes
    let app = create_app(pool);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}

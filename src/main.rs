//! Dealership API - car inventory, inquiries, and contact relay
//!
//! A REST backend for a dealership storefront. Cars and customer
//! inquiries live in MongoDB when MONGODB_URI is configured; without it
//! the server runs standalone against a seeded local inventory file, so
//! the storefront works end-to-end with no database at hand. A contact
//! relay endpoint forwards inquiry emails over SMTP in both modes.

use dealership_api::config::{Settings, StorageConfig};
use dealership_api::db;
use dealership_api::inventory::{InventoryStore, JsonFileInventory};
use dealership_api::mailer::Mailer;
use dealership_api::routes::create_router;
use dealership_api::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber for structured logging
    init_tracing();

    info!("🚀 Starting Dealership API...");

    // Load configuration
    let settings = Settings::load()?;
    info!("📋 Configuration loaded successfully");

    let mailer = Mailer::new(settings.email.clone());

    // Pick the storage backend: MongoDB when configured, otherwise the
    // seeded local inventory (demo mode)
    let state = match &settings.storage {
        StorageConfig::Mongo { uri, database } => {
            let db = db::connect(uri, database).await?;
            info!("✅ Database connection established");
            Arc::new(AppState::with_database(db, mailer))
        }
        StorageConfig::Local { path } => {
            info!(
                "⚠️  MONGODB_URI not set - running in demo mode against {}",
                path.display()
            );
            let store = InventoryStore::open(Box::new(JsonFileInventory::new(path.clone())))?;
            Arc::new(AppState::standalone(store, mailer))
        }
    };

    // Build the router
    let app = create_router(state, &settings);

    // Create socket address
    let addr = SocketAddr::from((settings.server.host, settings.server.port));

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📚 API Endpoints:");
    info!("   ─── Car Catalog ───");
    info!("   POST   /api/cars                  - Create car listing");
    info!("   GET    /api/cars                  - List all cars");
    info!("   GET    /api/cars/:id              - Fetch one car");
    info!("   PUT    /api/cars/:id              - Replace car fields");
    info!("   DELETE /api/cars/:id              - Delete car");
    info!("");
    info!("   ─── Inquiries ───");
    info!("   POST   /api/inquiries             - Submit contact inquiry");
    info!("   GET    /api/inquiries             - List inquiries (newest first)");
    info!("   PUT    /api/inquiries/:id/status  - Mark contacted/rejected");
    info!("   DELETE /api/inquiries/:id         - Delete inquiry");
    info!("");
    info!("   ─── Misc ───");
    info!("   GET    /api/health                - Liveness + db flag");
    info!("   POST   /api/send-email            - Contact relay");
    info!("");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutdown complete");
    Ok(())
}

/// Initialize tracing with structured logging
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,dealership_api=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("📴 Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("📴 Received terminate signal, initiating graceful shutdown...");
        },
    }
}

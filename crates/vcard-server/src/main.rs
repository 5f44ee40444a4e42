use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use vcard_api::{AppStateInner, health, users};
use vcard_db::{RecordService, StoreBackend};

fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vcard=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let host = std::env::var("VCARD_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("VCARD_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;
    let db_path = std::env::var("VCARD_DB_PATH").unwrap_or_else(|_| "server_db.json".into());
    let supabase_url = env_nonempty("VCARD_SUPABASE_URL").or_else(|| env_nonempty("SUPABASE_URL"));
    let supabase_key = env_nonempty("VCARD_SUPABASE_KEY").or_else(|| env_nonempty("SUPABASE_KEY"));

    // Backend selection is fixed for the process lifetime: the Supabase
    // users table when both settings are present, the local JSON file
    // otherwise.
    let backend = match (supabase_url, supabase_key) {
        (Some(url), Some(key)) => {
            info!("Using Supabase users table at {}", url);
            StoreBackend::supabase(url, key)?
        }
        _ => {
            info!("Using file store at {}", db_path);
            StoreBackend::file(db_path)
        }
    };

    // Shared state
    let state = Arc::new(AppStateInner {
        service: RecordService::new(backend),
    });

    // Routes
    let app = Router::new()
        .route("/health", get(health::health))
        .route("/user/{username}", get(users::get_user).post(users::post_user))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Virtual card server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

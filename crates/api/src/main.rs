use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use premarket_core::config::Settings;
use premarket_core::diagnostics::StoreConfig;
use premarket_core::storage::{self, DocumentStore};

mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let store = connect_store(&settings).await;
    let state = routes::AppState {
        store,
        store_config: StoreConfig {
            backend_compiled: storage::BACKEND_COMPILED,
            database_url_set: settings.database_url.is_some(),
        },
    };

    let app = routes::router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], settings.port));
    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

// Resolved once; request handlers only ever see the result.
#[cfg(feature = "postgres")]
async fn connect_store(settings: &Settings) -> Option<Arc<dyn DocumentStore>> {
    use premarket_core::storage::postgres::PgDocumentStore;

    let Ok(db_url) = settings.require_database_url() else {
        tracing::warn!("DATABASE_URL not set; mirror writes disabled");
        return None;
    };

    match PgDocumentStore::connect(db_url, settings.database_max_connections).await {
        Ok(store) => {
            tracing::info!("document store connected");
            Some(store.into_shared())
        }
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "db connect failed; starting API in degraded mode");
            None
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn connect_store(_settings: &Settings) -> Option<Arc<dyn DocumentStore>> {
    tracing::warn!("built without a document store backend; mirror writes disabled");
    None
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

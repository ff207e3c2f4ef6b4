use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use premarket_core::config::Settings;
use premarket_core::curated;
use premarket_core::storage::postgres::PgDocumentStore;

mod snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Dataset {
    All,
    News,
    Recommendations,
}

impl Dataset {
    fn includes_news(self) -> bool {
        matches!(self, Dataset::All | Dataset::News)
    }

    fn includes_recommendations(self) -> bool {
        matches!(self, Dataset::All | Dataset::Recommendations)
    }
}

/// Writes the curated pre-market datasets into the document store once.
#[derive(Debug, Parser)]
#[command(name = "premarket_worker")]
struct Args {
    /// Which dataset to snapshot.
    #[arg(long, value_enum, default_value_t = Dataset::All)]
    dataset: Dataset,

    /// Print the documents instead of writing them.
    #[arg(long)]
    dry_run: bool,
}

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

    let args = Args::parse();

    let news = if args.dataset.includes_news() {
        curated::news()?
    } else {
        Vec::new()
    };
    let recommendations = if args.dataset.includes_recommendations() {
        curated::recommendations()?
    } else {
        Vec::new()
    };

    if args.dry_run {
        let payload = serde_json::json!({
            "newsitem": news,
            "stockrecommendation": recommendations,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        tracing::info!(
            dry_run = true,
            news_len = news.len(),
            recommendations_len = recommendations.len(),
            "snapshot (dry-run)"
        );
        return Ok(());
    }

    let db_url = settings.require_database_url()?;
    let store = PgDocumentStore::connect(db_url, settings.database_max_connections)
        .await
        .context("document store unavailable")?;

    let report = snapshot::write_all(&store, &news)
        .await
        .merge(snapshot::write_all(&store, &recommendations).await);

    for rec in &recommendations {
        tracing::debug!(ticker = %rec.ticker, risk = %rec.risk, bias = %rec.bias, sentiment = %rec.sentiment, "recommendation");
    }

    tracing::info!(written = report.written, failed = report.failed, "snapshot finished");
    anyhow::ensure!(
        report.failed == 0,
        "{} of {} snapshot writes failed",
        report.failed,
        report.failed + report.written
    );
    Ok(())
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

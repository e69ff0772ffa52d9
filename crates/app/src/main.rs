use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::QuizSettings;
use services::{CatalogService, Clock, QuizLoopService};
use storage::repository::Storage;
use storage::sqlite::{normalize_sqlite_url, prepare_sqlite_file};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

#[derive(Debug, Parser)]
#[command(name = "quiz", about = "Flashcard quiz over a question catalog")]
struct Args {
    /// JSON catalog (`[{"id", "question", "answer"}, ...]`).
    #[arg(long, env = "QUIZ_CATALOG", default_value = "words.json")]
    catalog: PathBuf,

    /// Load the catalog from SQLite instead of JSON.
    #[arg(long, env = "QUIZ_DB_URL")]
    db: Option<String>,

    /// Seconds allowed per question.
    #[arg(long, env = "QUIZ_TIME_LIMIT_SECS", default_value_t = QuizSettings::DEFAULT_TIME_LIMIT_SECS)]
    time_limit: u32,
}

struct DesktopApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for DesktopApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

async fn open_storage(args: &Args) -> Result<Storage, Box<dyn std::error::Error>> {
    match args.db.as_deref() {
        Some(raw) => {
            let db_url = normalize_sqlite_url(raw);
            prepare_sqlite_file(&db_url)?;
            info!(db = %db_url, "loading catalog from sqlite");
            Ok(Storage::sqlite(&db_url).await?)
        }
        None => {
            info!(path = %args.catalog.display(), "loading catalog from json");
            Ok(Storage::json_file(&args.catalog))
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let settings = QuizSettings::new(args.time_limit)?;

    // Load the catalog once; every session shares it read-only.
    let storage = open_storage(&args).await?;
    let loaded = CatalogService::new(Arc::clone(&storage.questions))
        .load()
        .await?;

    let quiz_loop = Arc::new(QuizLoopService::new(
        Clock::default_clock(),
        Arc::new(loaded.catalog),
        settings,
    ));
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { quiz_loop });
    let context = build_app_context(&app)?;

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "app=info,services=info,storage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

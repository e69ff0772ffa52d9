//! Import a JSON question catalog into a `SQLite` database.

use std::path::PathBuf;

use clap::Parser;
use storage::json::JsonCatalogFile;
use storage::import_catalog;
use storage::repository::Storage;
use storage::sqlite::{normalize_sqlite_url, prepare_sqlite_file};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Import a words.json catalog into SQLite")]
struct Args {
    /// JSON catalog to import.
    #[arg(long, env = "QUIZ_CATALOG", default_value = "words.json")]
    json: PathBuf,

    /// Target database url or path.
    #[arg(long, env = "QUIZ_DB_URL", default_value = "sqlite:quiz.sqlite3")]
    db: String,
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let source = JsonCatalogFile::new(&args.json);

    let db_url = normalize_sqlite_url(&args.db);
    prepare_sqlite_file(&db_url)?;
    let storage = Storage::sqlite(&db_url).await?;
    let report = import_catalog(&source, storage.questions.as_ref()).await?;

    info!(
        json = %args.json.display(),
        db = %db_url,
        written = report.written,
        skipped = report.skipped.len(),
        duplicates = report.duplicates.len(),
        "catalog imported"
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "seed=info,storage=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run(Args::parse()).await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

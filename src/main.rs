use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use strike::config::AppConfig;
use strike::storage::SqliteStorage;
use strike::store::TaskStore;
use strike::ui::{self, App};

#[derive(Parser)]
#[command(name = "strike")]
#[command(about = "Persistent terminal to-do list")]
struct Cli {
    /// Database location (defaults to the platform data directory)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Log file location (defaults to strike.log in the data directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Initialize tracing writing to a file; the terminal belongs to the UI.
fn init_tracing(path: &Path) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "strike=info".into()),
    );

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false),
        )
        .init();

    Ok(())
}

fn default_data_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "strike")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(dirs.data_dir().to_path_buf())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = match cli.log_file {
        Some(path) => path,
        None => default_data_dir()?.join("strike.log"),
    };
    init_tracing(&log_path)?;

    let config = AppConfig::load();
    let storage = match cli.db.or(config.db_path) {
        Some(path) => SqliteStorage::open(path)?,
        None => SqliteStorage::open_default()?,
    };
    storage.migrate()?;

    let store = TaskStore::load(Box::new(storage))?;
    ui::run(App::new(store))?;

    Ok(())
}

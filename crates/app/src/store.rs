use std::path::Path;

use anyhow::{Context, Result, bail};
use storage::repository::Storage;

use crate::config::StoreConfig;

/// Open the configured session store, creating the `SQLite` file if needed.
///
/// # Errors
///
/// Returns an error if the database file cannot be created or the store cannot
/// be connected and migrated.
pub async fn open_store(config: &StoreConfig) -> Result<Storage> {
    match config {
        StoreConfig::Memory => {
            tracing::info!("using in-memory session store");
            Ok(Storage::in_memory())
        }
        StoreConfig::Sqlite(url) => {
            prepare_sqlite_file(url)?;
            let storage = Storage::sqlite(url)
                .await
                .with_context(|| format!("failed to open session store {url}"))?;
            tracing::info!(url = %url, "using sqlite session store");
            Ok(storage)
        }
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<()> {
    if db_url.contains(":memory:") || db_url.contains("mode=memory") {
        return Ok(());
    }

    let Some(path) = db_url.strip_prefix("sqlite://") else {
        bail!("invalid sqlite url: {db_url}");
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        bail!("invalid sqlite url: {db_url}");
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)
            .with_context(|| format!("cannot create {}", path.display()))?;
    }
    Ok(())
}

//! `crm serve` -- run the HTTP API over a SQLite store.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use crm_storage::{SqliteStore, Storage};
use tracing::info;

use crate::cli::ServeArgs;
use crate::context::RuntimeContext;

/// Execute the `crm serve` command. Blocks until Ctrl+C.
pub fn run(ctx: &RuntimeContext, args: &ServeArgs) -> Result<()> {
    let addr = bind_addr(ctx, args)?;
    let db_path = args
        .db
        .clone()
        .unwrap_or_else(|| PathBuf::from(&ctx.config.database.path));

    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("failed to open database: {}", db_path.display()))?;
    info!(path = %db_path.display(), "database opened");
    let store: Arc<dyn Storage> = Arc::new(store);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;
    runtime
        .block_on(crm_api::serve(addr, store))
        .with_context(|| format!("server on {addr} failed"))?;
    Ok(())
}

/// `--bind` wins over `server.bind` from the config.
fn bind_addr(ctx: &RuntimeContext, args: &ServeArgs) -> Result<SocketAddr> {
    match args.bind.as_deref() {
        Some(bind) => bind
            .parse()
            .with_context(|| format!("invalid bind address '{bind}'")),
        None => ctx
            .config
            .bind_addr()
            .context("invalid server.bind in the config"),
    }
}

//! `nl2sql` binary.
//!
//! Without arguments it serves the HTTP API. With arguments, each argument
//! is translated and executed once and the JSON response is printed, which
//! is handy for trying out recognizers from a shell:
//!
//! ```text
//! nl2sql "Show me all employees" "Sales to Acme Corp"
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use nl2sql::engine::Engine;
use nl2sql::error::Result;
use nl2sql::persist::{SqliteStorage, Storage};
use nl2sql::seed;
use nl2sql::server::{respond, router};
use nl2sql::settings::Settings;

#[tokio::main]
async fn main() -> ExitCode {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log)))
        .init();

    match run(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "failed to initialize");
            ExitCode::FAILURE
        }
    }
}

async fn run(settings: Settings) -> Result<()> {
    let storage = SqliteStorage::open(settings.persistence_mode())?;
    if settings.seed {
        seed::provision(&storage)?;
    }
    let storage: Arc<dyn Storage> = Arc::new(storage);
    let engine = Arc::new(Engine::new()?.with_storage(storage));
    info!(recognizers = engine.rules().len(), "engine ready");

    let queries: Vec<String> = std::env::args().skip(1).collect();
    if !queries.is_empty() {
        for (i, query) in queries.iter().enumerate() {
            let (_, body) = respond(i as u64 + 1, engine.translate_and_execute(query));
            match serde_json::to_string_pretty(&body) {
                Ok(json) => println!("{json}"),
                Err(e) => error!(error = %e, "could not render response"),
            }
        }
        return Ok(());
    }

    let address = settings.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| nl2sql::error::Nl2SqlError::Settings(format!("cannot bind {address}: {e}")))?;
    info!(%address, "NL2SQL server running");
    axum::serve(listener, router(engine))
        .await
        .map_err(|e| nl2sql::error::Nl2SqlError::Settings(e.to_string()))?;
    Ok(())
}

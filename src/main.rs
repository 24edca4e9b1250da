//! `todos` server binary.
//!
//! Run with:
//!   TODOS_BIND=127.0.0.1:3000 RUST_LOG=todos=debug cargo run
//!
//! Try:
//!   curl -i -X POST http://localhost:3000/api/v1/todos \
//!        -H 'content-type: application/json' \
//!        -d '{"title":"Learn Rust"}'
//!   curl http://localhost:3000/api/v1/todos

use std::process::ExitCode;
use std::sync::Arc;

use todos::{Config, Error, FileStore, MemoryStore, Server, TodoStore};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("todos: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log_level);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run(config: Config) -> Result<(), Error> {
    let store: Arc<dyn TodoStore> = match &config.data_file {
        Some(path) => Arc::new(FileStore::open(path).await?),
        None => {
            info!("no data file configured, todos are kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    let app = todos::app(store, &config.root);
    Server::bind(config.bind).serve(app).await
}

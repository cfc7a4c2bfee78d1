//! Terminal client for a remote todo list.
//!
//! Loads the list once on start, then reads commands from stdin. The view is
//! printed to stdout after every server answer; logs go to stderr.

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tasksync::{
    shell::{self, Console},
    view, ClientConfig, HttpTodoApi, TodoAction, TodoEnvironment, TodoReducer, TodoState,
    TodoStore,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "tasksync", version, about = "Keep a todo list in sync with a remote API")]
struct Cli {
    /// Base URL of the todo API (overrides TASKSYNC_API_URL)
    #[arg(long = "api-url")]
    api_url: Option<String>,

    /// Seconds to wait for in-flight requests when quitting
    #[arg(long = "shutdown-timeout-secs", default_value_t = 30)]
    shutdown_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    let config = match cli.api_url {
        Some(url) => ClientConfig::new(url),
        None => ClientConfig::from_env(),
    }
    .context("invalid API configuration")?;

    tracing::info!(api_url = config.api_url(), "Starting tasksync");

    let env = TodoEnvironment::new(Arc::new(HttpTodoApi::new(&config)));
    let store = TodoStore::new(TodoState::new(), TodoReducer::new(), env);
    let console = Console::new(std::io::stdout());
    let renderer = shell::spawn_renderer(&store, console.clone());

    store.send(TodoAction::Refresh).await?;
    let view = store.state(view::render).await;
    console.write_block(&format!("{view}type `help` for commands\n"))?;

    let lines = BufReader::new(tokio::io::stdin()).lines();
    let result = shell::run(&store, lines, &console).await;

    let shutdown = store
        .shutdown(Duration::from_secs(cli.shutdown_timeout_secs))
        .await;
    renderer.abort();

    result?;
    shutdown.context("requests were still running at exit")?;

    tracing::info!("Bye");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasksync=info,tasksync_runtime=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

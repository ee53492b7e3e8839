mod cli;
mod config;
mod dispatcher;
mod loader;
mod protocol;
mod report;
mod server;
mod tools;

use clap::Parser;
use cli::Cli;
use config::{DEFAULT_LOG_FILTER, ServerConfig};
use dispatcher::Dispatcher;
use loader::FileLoader;
use pdf_reader_parse::LopdfParser;
use server::McpServer;
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &ServerConfig) {
    let filter = match config.log_filter.as_deref() {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };
    // stdout carries protocol frames only
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = ServerConfig::from(&cli);
    init_tracing(&config);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        timeout = ?config.timeout,
        max_file_size = ?config.max_file_size,
        "pdf-reader-mcp starting"
    );

    let loader = FileLoader::new(LopdfParser).with_max_file_size(config.max_file_size);
    let server = McpServer::new(Dispatcher::new(loader).with_timeout(config.timeout));

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    if let Err(e) = server::serve(&server, stdin, stdout).await {
        tracing::error!(error = %e, "transport failed");
        std::process::exit(1);
    }

    tracing::info!("pdf-reader-mcp shutting down");
}

//! Server settings resolved from the command line.

use std::time::Duration;

use crate::cli::Cli;

/// Filter used when neither `--log-level` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "pdf_reader_mcp=info,pdf_reader_parse=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub timeout: Option<Duration>,
    pub max_file_size: Option<u64>,
    pub log_filter: Option<String>,
}

impl From<&Cli> for ServerConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            timeout: cli
                .timeout_secs
                .filter(|&secs| secs > 0)
                .map(Duration::from_secs),
            max_file_size: (cli.max_file_size > 0).then_some(cli.max_file_size),
            log_filter: cli.log_level.clone(),
        }
    }
}

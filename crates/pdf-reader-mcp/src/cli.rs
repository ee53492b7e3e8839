use clap::Parser;

/// Default cap on the size of a document the server will read (256 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 256 * 1024 * 1024;

/// Serve PDF reading, search, and metadata tools over MCP on stdio.
#[derive(Debug, Parser)]
#[command(name = "pdf-reader-mcp", about, version)]
pub struct Cli {
    /// Abandon a tool call after this many seconds. Default: no limit
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Refuse PDF files larger than this many bytes (0 disables the check)
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_FILE_SIZE)]
    pub max_file_size: u64,

    /// Log filter (e.g. 'debug', 'pdf_reader_mcp=trace'). Overrides RUST_LOG
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["pdf-reader-mcp"]);
        assert_eq!(cli.timeout_secs, None);
        assert_eq!(cli.max_file_size, DEFAULT_MAX_FILE_SIZE);
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn all_flags() {
        let cli = Cli::parse_from([
            "pdf-reader-mcp",
            "--timeout-secs",
            "30",
            "--max-file-size",
            "0",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.timeout_secs, Some(30));
        assert_eq!(cli.max_file_size, 0);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        assert!(Cli::try_parse_from(["pdf-reader-mcp", "--timeout-secs", "soon"]).is_err());
    }

    #[test]
    fn rejects_positional_args() {
        assert!(Cli::try_parse_from(["pdf-reader-mcp", "doc.pdf"]).is_err());
    }
}

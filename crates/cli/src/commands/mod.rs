//! CLI definition and execution
//!
//! `store` has a single operation, so the arguments of the store command
//! are flattened into the top-level parser.

use clap::Parser;

use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

pub mod store;

/// store - save text to S3-compatible object storage
///
/// Writes TEXT to PATH.txt, where PATH has the form bucket/key.
/// Connection settings come from MINIO_ENDPOINT, MINIO_ACCESS_ID,
/// MINIO_ACCESS_KEY and MINIO_USE_SSL, or from the config file.
#[derive(Parser, Debug)]
#[command(name = "store")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub args: store::StoreArgs,

    /// Output format: human-readable or JSON
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub debug: bool,
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    };

    store::execute(cli.args, output_config).await
}

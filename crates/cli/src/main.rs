//! store - save text to S3-compatible object storage
//!
//! `store <path> <text>` writes the text to `<path>.txt`, where the path
//! is `bucket/key`. Connection settings come from the `MINIO_*`
//! environment variables or the config file.

use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use docstore_cli::commands::{self, Cli};
use docstore_cli::exit_code::ExitCode;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::Success,
                _ => ExitCode::Failure,
            };
            let _ = e.print();
            std::process::exit(code.as_i32());
        }
    };

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}

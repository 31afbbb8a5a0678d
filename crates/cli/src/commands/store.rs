//! store command - Save text to an object
//!
//! Writes the given text to `<path>.txt` with content type `text/plain`.

use clap::Args;
use ds_core::Metadata;
use ds_core::store::TEXT_SUFFIX;
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Save text to an object
///
/// Options must precede the path; everything after it is taken verbatim,
/// so text such as `-5 degrees` or `--json` is stored as given.
#[derive(Args, Debug)]
pub struct StoreArgs {
    /// Object path (bucket/key); ".txt" is appended to the key
    #[arg(allow_hyphen_values = true)]
    pub path: String,

    /// Text to store
    #[arg(allow_hyphen_values = true)]
    pub text: String,

    /// Attach user metadata (repeatable)
    #[arg(long, value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub meta: Vec<(String, String)>,
}

#[derive(Debug, Serialize)]
struct StoreOutput {
    status: &'static str,
    target: String,
    size_bytes: i64,
    size_human: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    etag: Option<String>,
}

/// Execute the store command
pub async fn execute(args: StoreArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);
    let metadata: Metadata = args.meta.into_iter().collect();

    match ds_s3::save_text_with_metadata(&args.path, &args.text, &metadata).await {
        Ok(info) => {
            let size = info.size_bytes.unwrap_or(args.text.len() as i64);
            let output = StoreOutput {
                status: "success",
                target: format!("{}{TEXT_SUFFIX}", args.path),
                size_bytes: size,
                size_human: humansize::format_size(size as u64, humansize::BINARY),
                etag: info.etag,
            };

            if formatter.is_json() {
                formatter.json(&output);
            } else {
                formatter.success(&format!(
                    "Stored {} ({})",
                    output.target, output.size_human
                ));
            }
            ExitCode::Success
        }
        Err(e) => {
            tracing::debug!(error = ?e, "store failed");
            formatter.error(&e.to_string());
            ExitCode::from(&e)
        }
    }
}

/// Parse a `KEY=VALUE` metadata argument
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{s}'"))?;

    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in '{s}'"));
    }

    Ok((key.to_string(), value.to_string()))
}

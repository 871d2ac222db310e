//! put command - Upload files
//!
//! Uploads a single file, or every file directly inside a directory with
//! --recursive, to an S3-compatible bucket. Key naming and batch control
//! flow live in bucketit-core; this module is presentation and wiring.

use std::path::PathBuf;

use clap::Args;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

use bucketit_core::{BatchResult, ConfigManager, UploadRequest};
use bucketit_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Upload a file or directory to a bucket
#[derive(Args, Debug)]
pub struct PutArgs {
    /// Path to the file to upload (a directory with --recursive)
    pub source: PathBuf,

    /// Bucket to upload into; defaults to the configured default bucket
    #[arg(short, long)]
    pub bucket: Option<String>,

    /// Filename to use in the bucket instead of the original filename
    #[arg(long)]
    pub filename: Option<String>,

    /// Prefix the key with the current date as YYYY/MM/DD
    #[arg(long)]
    pub date: bool,

    /// Folder inside the bucket to upload into
    #[arg(long)]
    pub folder: Option<String>,

    /// Upload every file directly inside the source directory
    #[arg(short, long)]
    pub recursive: bool,

    /// Do not create a folder named after the source directory (recursive mode)
    #[arg(long)]
    pub no_subfolder: bool,
}

/// Execute the put command
pub async fn execute(args: PutArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let config_manager = match ConfigManager::new() {
        Ok(cm) => cm,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from(&e);
        }
    };

    let config = match config_manager.load() {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from(&e);
        }
    };

    // Bucket resolution: explicit flag wins, then the configured default.
    // An empty bucket is rejected by the orchestrator before any upload.
    let bucket = args
        .bucket
        .or_else(|| config.default_bucket.clone())
        .unwrap_or_default();
    tracing::debug!(bucket = %bucket, source = %args.source.display(), "resolved upload target");

    let request = UploadRequest {
        source: args.source,
        bucket,
        filename: args.filename,
        date_prefix: args.date,
        folder: args.folder,
        recursive: args.recursive,
        subfolder: !args.no_subfolder,
    };

    let client = match S3Client::new(&config).await {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&format!("Failed to create S3 client: {e}"));
            return ExitCode::from(&e);
        }
    };

    let batch = match bucketit_core::run(&client, &request).await {
        Ok(b) => b,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from(&e);
        }
    };

    report(&batch, &formatter);

    if batch.all_succeeded() {
        ExitCode::Success
    } else {
        ExitCode::GeneralError
    }
}

/// Print the batch result in the active output mode
fn report(batch: &BatchResult, formatter: &Formatter) {
    if formatter.is_json() {
        formatter.json(batch);
        return;
    }

    if batch.outcomes.len() > 1 {
        formatter.println(&render_table(batch));
    } else {
        for outcome in &batch.outcomes {
            match &outcome.error {
                None => formatter.println(&format!(
                    "{} -> {}/{} ({})",
                    outcome.local_path.display(),
                    outcome.bucket,
                    outcome.key,
                    outcome.size_human.as_deref().unwrap_or("?")
                )),
                Some(reason) => formatter.error(&format!(
                    "{}: {reason}",
                    outcome.local_path.display()
                )),
            }
        }
    }

    if batch.failed() > 0 {
        formatter.warning(&format!(
            "Completed with errors: {} uploaded, {} failed",
            batch.uploaded(),
            batch.failed()
        ));
    } else if batch.outcomes.len() > 1 {
        formatter.success(&format!("Uploaded {} file(s).", batch.uploaded()));
    }
}

/// Render a multi-file batch as a table
fn render_table(batch: &BatchResult) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["File", "Key", "Status", "Size"]);

    for outcome in &batch.outcomes {
        let status = match &outcome.error {
            None => "uploaded".to_string(),
            Some(reason) => format!("failed: {reason}"),
        };
        table.add_row(vec![
            Cell::new(outcome.local_path.display()),
            Cell::new(&outcome.key),
            Cell::new(status),
            Cell::new(outcome.size_human.as_deref().unwrap_or("-")),
        ]);
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bucketit_core::UploadOutcome;

    fn outcome(key: &str, error: Option<&str>) -> UploadOutcome {
        UploadOutcome {
            status: if error.is_none() { "uploaded" } else { "failed" },
            local_path: PathBuf::from(format!("/tmp/{key}")),
            bucket: "uploads".to_string(),
            key: key.to_string(),
            size_bytes: error.is_none().then_some(4),
            size_human: error.is_none().then(|| "4 B".to_string()),
            etag: None,
            error: error.map(|e| e.to_string()),
        }
    }

    #[test]
    fn test_render_table_contains_keys_and_status() {
        let batch = BatchResult {
            outcomes: vec![
                outcome("a.txt", None),
                outcome("b.txt", Some("connection reset")),
            ],
        };
        let rendered = render_table(&batch);
        assert!(rendered.contains("a.txt"));
        assert!(rendered.contains("uploaded"));
        assert!(rendered.contains("failed: connection reset"));
    }
}

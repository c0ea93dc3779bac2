// UI layer: spinner while the upload runs and the final report. Results go
// to stdout, failures to stderr.

use crate::pipeline::UploadOutcome;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Spinner shown on stderr while the pipeline runs. indicatif hides it
/// when stderr is not a terminal.
pub fn spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Progress line for the storage transfer.
pub fn upload_message(file_path: &Path) -> String {
    format!(
        "Uploading {} to MediaSilo S3 ingest bucket",
        file_path.display()
    )
}

/// Show the transfer line on stderr even when the spinner is hidden
/// (stderr not a terminal, or a library caller passing a hidden bar).
pub fn announce_upload(progress: &ProgressBar, file_path: &Path) {
    let message = upload_message(file_path);
    if progress.is_hidden() {
        eprintln!("{}", message);
    } else {
        progress.println(&message);
    }
    progress.set_message(message);
}

/// One-line summary of a successful upload.
pub fn created_message(outcome: &UploadOutcome) -> String {
    let file = outcome.context.file_path.display();
    match outcome.asset.id() {
        Some(id) => format!("Created asset {} from {}", id, file),
        None => format!("Created asset from {}", file),
    }
}

/// Context line: where the bytes were uploaded to. The ticket's signature
/// is left out.
pub fn source_message(outcome: &UploadOutcome) -> String {
    format!("Source URL: {}", outcome.context.asset_url())
}

/// Print the summary and upload context, then the asset record as pretty
/// JSON.
pub fn report_success(outcome: &UploadOutcome) -> Result<()> {
    println!("{}", created_message(outcome));
    println!("{}", source_message(outcome));
    println!("{}", serde_json::to_string_pretty(&outcome.asset)?);
    Ok(())
}

/// Print an error and its cause chain.
pub fn report_failure(err: &anyhow::Error) {
    eprintln!("Error: {}", err);
    for cause in err.chain().skip(1) {
        eprintln!("  caused by: {}", cause);
    }
}

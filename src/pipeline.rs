// The upload workflow: upload ticket -> file transfer -> asset creation.
//
// Each stage starts only after the previous one succeeded, and the first
// failure is returned as-is. Nothing is retried or rolled back.

use crate::api::{ApiClient, Asset};
use crate::config::Config;
use crate::error::UploadError;
use crate::ui;
use crate::upload::{upload_file, UploadContext};
use indicatif::ProgressBar;
use std::path::Path;
use tracing::info;

/// What a successful run produced.
#[derive(Debug)]
pub struct UploadOutcome {
    pub context: UploadContext,
    pub asset: Asset,
}

/// Run the whole workflow for one file without terminal progress.
pub async fn run(config: &Config, file_path: &Path) -> Result<UploadOutcome, UploadError> {
    run_with_progress(config, file_path, &ProgressBar::hidden()).await
}

/// Same as [`run`], updating `progress` as stages start.
pub async fn run_with_progress(
    config: &Config,
    file_path: &Path,
    progress: &ProgressBar,
) -> Result<UploadOutcome, UploadError> {
    let api = ApiClient::new(config.clone())?;

    progress.set_message("Requesting upload ticket...");
    let context = api.request_upload_ticket(file_path).await?;

    ui::announce_upload(progress, &context.file_path);
    let context = upload_file(api.http(), context).await?;

    progress.set_message("Creating asset...");
    let asset = api.create_asset(context.asset_url()).await?;

    info!(file = %context.file_path.display(), asset_id = ?asset.id(), "asset created");
    Ok(UploadOutcome { context, asset })
}

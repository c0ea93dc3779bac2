// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, build the `Config`, run the
//   pipeline once and report the result.
// - Exits with status 1 when any stage fails.
//
// Example usage:
//   mediasilo-upload <HOSTNAME> <USERNAME> <PASSWORD> <PROJECT_ID> <FILE_PATH>

use anyhow::Context;
use clap::Parser;
use mediasilo_upload::config::DEFAULT_API_URL;
use mediasilo_upload::{pipeline, ui, Config, Credentials};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "mediasilo-upload", about = "Upload a file as a MediaSilo asset")]
struct Cli {
    /// Subdomain you log into MediaSilo with (YOURCOMPANY.mediasilo.com)
    hostname: String,
    /// User with the Asset.Create permission
    username: String,
    password: String,
    /// Project the asset is created in
    project_id: String,
    /// Local file to upload
    file_path: PathBuf,

    /// MediaSilo API base URL
    #[arg(long, env = "MEDIASILO_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Per-request timeout in seconds (none by default)
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn upload(cli: Cli) -> anyhow::Result<()> {
    let credentials = Credentials {
        host_context: cli.hostname,
        username: cli.username,
        password: cli.password,
    };
    let config = Config::new(&cli.api_url, credentials, cli.project_id)
        .context("Invalid MediaSilo API URL")?
        .with_timeout(cli.timeout_secs.map(Duration::from_secs));

    let spinner = ui::spinner();
    let result = pipeline::run_with_progress(&config, &cli.file_path, &spinner).await;
    spinner.finish_and_clear();

    let outcome =
        result.with_context(|| format!("Upload of {} failed", cli.file_path.display()))?;
    ui::report_success(&outcome)?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match upload(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::report_failure(&e);
            ExitCode::FAILURE
        }
    }
}

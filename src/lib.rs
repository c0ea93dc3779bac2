// Library root
// -----------
// This crate exposes the upload workflow used by the CLI. The binary
// (`main.rs`) parses arguments, builds a `Config` and hands it to
// `pipeline::run`.
//
// Module responsibilities:
// - `config`: Immutable credentials and endpoint settings shared by every
//   stage.
// - `api`: HTTP calls against the MediaSilo REST API (upload ticket and
//   asset creation).
// - `upload`: Transfers the file bytes to the storage URL named in a ticket.
// - `pipeline`: Chains ticket -> upload -> asset, stopping at the first
//   failure.
// - `ui`: Spinner and result reporting for the terminal.
// - `error`: The error type returned by every stage.
pub mod api;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod ui;
pub mod upload;

pub use config::{Config, Credentials};
pub use error::UploadError;
pub use pipeline::{run, UploadOutcome};

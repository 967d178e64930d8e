//! Error types emitted by the isowalk CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use isowalk_core::WalkError;
use isowalk_data::ServiceBuildError;
use thiserror::Error;

/// Errors emitted by the isowalk CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// The break values list contained something other than numbers.
    #[error("invalid break values {value:?}: expected comma-separated minutes")]
    InvalidBreakValues { value: String },
    /// Reading the points-of-interest file failed.
    #[error("failed to read points of interest from {path:?}: {source}")]
    ReadPois {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The points-of-interest file was not a JSON list of targets.
    #[error("failed to parse points of interest JSON at {path:?}: {source}")]
    ParsePois {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Constructing the HTTP service failed.
    #[error("failed to build walk service for {base_url:?}: {source}")]
    BuildService {
        base_url: String,
        #[source]
        source: ServiceBuildError,
    },
    /// Validation, transport or decoding failed.
    #[error(transparent)]
    Walk(#[from] WalkError),
    /// Serialising the result failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the result failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

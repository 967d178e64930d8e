//! Error taxonomy shared by every isowalk operation.

use thiserror::Error;

use crate::grid::GridError;
use crate::response::Endpoint;

/// Errors produced while building a request, validating a response or
/// decoding its payload.
///
/// Every variant is terminal for the call in progress. Nothing in the library
/// retries or substitutes a default after one of these is raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum WalkError {
    /// A required query input was absent; no request was sent.
    #[error("missing required field `{field}`")]
    MissingRequiredField {
        /// Name of the absent input (`x`, `y` or `key`).
        field: &'static str,
    },
    /// The service answered with a status other than 200.
    #[error("request to {url} returned unexpected status {status}")]
    UnexpectedStatus {
        /// HTTP status code reported by the service.
        status: u16,
        /// URL the response originated from.
        url: String,
    },
    /// The response did not come from the endpoint the decoder expects.
    #[error("response from {url} does not originate from the `{expected}` endpoint")]
    WrongEndpoint {
        /// Endpoint the decoder was prepared for.
        expected: Endpoint,
        /// URL the response originated from.
        url: String,
    },
    /// The payload lacked its magic marker or could not be decoded.
    #[error("malformed payload: {reason}")]
    MalformedPayload {
        /// Short description of what was wrong.
        reason: String,
    },
    /// The decoded grid text was not a valid grid.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// A table builder received no rows where at least one was expected.
    #[error("no {what} returned")]
    EmptyResult {
        /// Kind of row that was missing.
        what: &'static str,
    },
    /// The JSON envelope could not be deserialised.
    #[error("failed to parse response from {url}: {message}")]
    ParseError {
        /// URL the response originated from.
        url: String,
        /// Deserialiser message.
        message: String,
    },
    /// The request could not reach the service.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Fully qualified request URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The transport gave up waiting for the service.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Fully qualified request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// Writing a decoded artefact to disk failed.
    #[error("failed to write {path}: {message}")]
    WriteOutput {
        /// Destination path.
        path: String,
        /// I/O error description.
        message: String,
    },
}

impl WalkError {
    /// Build a [`WalkError::MalformedPayload`] from any displayable reason.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
        }
    }
}

//! Raw service responses and the checks that gate access to their bodies.
//!
//! A [`RawResponse`] keeps its body private. The only way to read it is
//! [`RawResponse::validated_body`], which first confirms the status code and
//! the originating endpoint, so a decoder can never inspect the payload of a
//! failed or unrelated response.

use std::fmt;

use crate::WalkError;

/// HTTP status code the service uses for success.
pub const SUCCESS_STATUS: u16 = 200;

/// Service endpoints a response may originate from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `/v1/isochrone`: isochrone images, raw grids and POI walk times.
    Isochrone,
    /// `/v1/pubtrans/ch/nearby`: public transport stations near a source.
    PubTrans,
}

impl Endpoint {
    /// Tag that must appear in the URL of a response from this endpoint.
    ///
    /// # Examples
    /// ```
    /// use isowalk_core::Endpoint;
    ///
    /// assert_eq!(Endpoint::PubTrans.tag(), "pubtrans");
    /// ```
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Isochrone => "isochrone",
            Self::PubTrans => "pubtrans",
        }
    }

    /// Path of the endpoint relative to the service base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Isochrone => "/v1/isochrone",
            Self::PubTrans => "/v1/pubtrans/ch/nearby",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A buffered response as returned by the transport.
///
/// # Examples
/// ```
/// use isowalk_core::{Endpoint, RawResponse, WalkError};
///
/// let response = RawResponse::new(
///     404,
///     "https://api.example.test/v1/isochrone?x=1&y=2",
///     b"{}".to_vec(),
/// );
/// let err = response.validated_body(Endpoint::Isochrone).unwrap_err();
/// assert!(matches!(err, WalkError::UnexpectedStatus { status: 404, .. }));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct RawResponse {
    status: u16,
    url: String,
    body: Vec<u8>,
}

impl fmt::Debug for RawResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawResponse")
            .field("status", &self.status)
            .field("url", &self.url)
            .field("body_len", &self.body.len())
            .finish()
    }
}

impl RawResponse {
    /// Wrap a status code, originating URL and body.
    pub fn new(status: u16, url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            status,
            url: url.into(),
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// URL of the request that produced this response.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Check the status code and origin of the response.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::UnexpectedStatus`] unless the status is 200, then
    /// [`WalkError::WrongEndpoint`] unless the URL contains the endpoint tag.
    pub fn validate(&self, expected: Endpoint) -> Result<(), WalkError> {
        if self.status != SUCCESS_STATUS {
            return Err(WalkError::UnexpectedStatus {
                status: self.status,
                url: self.url.clone(),
            });
        }
        if !self.url.contains(expected.tag()) {
            return Err(WalkError::WrongEndpoint {
                expected,
                url: self.url.clone(),
            });
        }
        Ok(())
    }

    /// Return the body once [`RawResponse::validate`] has passed.
    ///
    /// # Errors
    ///
    /// Propagates any failure from [`RawResponse::validate`].
    pub fn validated_body(&self, expected: Endpoint) -> Result<&[u8], WalkError> {
        self.validate(expected)?;
        Ok(&self.body)
    }
}

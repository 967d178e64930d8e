//! Test utilities for walk services.
//!
//! [`StubWalkService`] is a deterministic test double for [`WalkService`]
//! that replays pre-configured responses without touching the network.

use std::cell::{Cell, RefCell};

use isowalk_core::{IsochroneQuery, NearbyQuery, PoiTarget, RawResponse, WalkError, WalkService};

/// URL the stub reports for isochrone responses.
pub const STUB_ISOCHRONE_URL: &str = "https://stub.invalid/v1/isochrone";

/// URL the stub reports for station responses.
pub const STUB_PUBTRANS_URL: &str = "https://stub.invalid/v1/pubtrans/ch/nearby";

/// Stub `WalkService` for testing.
///
/// Every call returns the configured outcome, whichever endpoint was asked
/// for, and is counted. The last query and POI list seen are retained so
/// tests can assert on what would have been sent.
///
/// # Example
///
/// ```
/// use isowalk_core::{IsochroneParams, WalkService};
/// use isowalk_data::service::test_support::StubWalkService;
///
/// let stub = StubWalkService::with_json(200, r#"{"img": null}"#);
/// let query = IsochroneParams::at(8.5, 47.3).validate()?;
/// let response = stub.isochrone(&query, &[])?;
///
/// assert_eq!(response.status(), 200);
/// assert_eq!(stub.calls(), 1);
/// # Ok::<(), isowalk_core::WalkError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StubWalkService {
    outcome: StubOutcome,
    calls: Cell<usize>,
    last_isochrone: RefCell<Option<(IsochroneQuery, Vec<PoiTarget>)>>,
    last_nearby: RefCell<Option<NearbyQuery>>,
}

#[derive(Debug, Clone)]
enum StubOutcome {
    Reply {
        status: u16,
        url: Option<String>,
        body: Vec<u8>,
    },
    Error(WalkError),
}

impl StubWalkService {
    fn from_outcome(outcome: StubOutcome) -> Self {
        Self {
            outcome,
            calls: Cell::new(0),
            last_isochrone: RefCell::new(None),
            last_nearby: RefCell::new(None),
        }
    }

    /// Reply with `status` and a JSON `body`, from the endpoint that was
    /// called.
    #[must_use]
    pub fn with_json(status: u16, body: &str) -> Self {
        Self::from_outcome(StubOutcome::Reply {
            status,
            url: None,
            body: body.as_bytes().to_vec(),
        })
    }

    /// Reply with `status` and `body`, reporting `url` as the origin for
    /// every endpoint.
    #[must_use]
    pub fn with_response(status: u16, url: impl Into<String>, body: Vec<u8>) -> Self {
        Self::from_outcome(StubOutcome::Reply {
            status,
            url: Some(url.into()),
            body,
        })
    }

    /// Fail every call with `error`.
    #[must_use]
    pub fn with_error(error: WalkError) -> Self {
        Self::from_outcome(StubOutcome::Error(error))
    }

    /// Number of calls made so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Query and POIs of the most recent isochrone call.
    #[must_use]
    pub fn last_isochrone(&self) -> Option<(IsochroneQuery, Vec<PoiTarget>)> {
        self.last_isochrone.borrow().clone()
    }

    /// Query of the most recent nearby-stations call.
    #[must_use]
    pub fn last_nearby(&self) -> Option<NearbyQuery> {
        self.last_nearby.borrow().clone()
    }

    fn reply(&self, default_url: &str) -> Result<RawResponse, WalkError> {
        self.calls.set(self.calls.get() + 1);
        match &self.outcome {
            StubOutcome::Reply { status, url, body } => Ok(RawResponse::new(
                *status,
                url.as_deref().unwrap_or(default_url),
                body.clone(),
            )),
            StubOutcome::Error(error) => Err(error.clone()),
        }
    }
}

impl WalkService for StubWalkService {
    fn isochrone(
        &self,
        query: &IsochroneQuery,
        pois: &[PoiTarget],
    ) -> Result<RawResponse, WalkError> {
        self.last_isochrone
            .replace(Some((query.clone(), pois.to_vec())));
        self.reply(STUB_ISOCHRONE_URL)
    }

    fn nearby_stations(&self, query: &NearbyQuery) -> Result<RawResponse, WalkError> {
        self.last_nearby.replace(Some(query.clone()));
        self.reply(STUB_PUBTRANS_URL)
    }
}

//! The seam between request construction and the network.

use crate::{IsochroneQuery, NearbyQuery, PoiTarget, RawResponse, WalkError};

/// Issue requests against the walking-isochrone service.
///
/// Each call sends exactly one request and returns the buffered response
/// without judging its status; validation belongs to the decoders. There is
/// no retry and no batching. Implementations must fail with
/// [`WalkError::MissingRequiredField`] before touching the network when
/// their credentials are absent.
///
/// # Examples
///
/// ```rust
/// use isowalk_core::{
///     IsochroneParams, IsochroneQuery, NearbyQuery, PoiTarget, RawResponse, WalkError,
///     WalkService,
/// };
///
/// struct Offline;
///
/// impl WalkService for Offline {
///     fn isochrone(
///         &self,
///         _query: &IsochroneQuery,
///         _pois: &[PoiTarget],
///     ) -> Result<RawResponse, WalkError> {
///         Ok(RawResponse::new(503, "https://example.test/v1/isochrone", Vec::new()))
///     }
///
///     fn nearby_stations(&self, _query: &NearbyQuery) -> Result<RawResponse, WalkError> {
///         Ok(RawResponse::new(503, "https://example.test/v1/pubtrans/ch/nearby", Vec::new()))
///     }
/// }
///
/// let query = IsochroneParams::at(8.5, 47.4).validate()?;
/// let response = Offline.isochrone(&query, &[])?;
/// assert_eq!(response.status(), 503);
/// # Ok::<(), WalkError>(())
/// ```
pub trait WalkService {
    /// `POST /v1/isochrone`, with a FeatureCollection body when `pois` is
    /// non-empty.
    fn isochrone(
        &self,
        query: &IsochroneQuery,
        pois: &[PoiTarget],
    ) -> Result<RawResponse, WalkError>;

    /// `GET /v1/pubtrans/ch/nearby`.
    fn nearby_stations(&self, query: &NearbyQuery) -> Result<RawResponse, WalkError>;
}

impl<T: WalkService + ?Sized> WalkService for &T {
    fn isochrone(
        &self,
        query: &IsochroneQuery,
        pois: &[PoiTarget],
    ) -> Result<RawResponse, WalkError> {
        (**self).isochrone(query, pois)
    }

    fn nearby_stations(&self, query: &NearbyQuery) -> Result<RawResponse, WalkError> {
        (**self).nearby_stations(query)
    }
}

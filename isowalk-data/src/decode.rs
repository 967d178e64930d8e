//! Response decoders.
//!
//! Each decoder validates the response against its endpoint before reading
//! a single byte of the body, then reads the JSON envelope and reshapes the
//! relevant part of it. None of them performs I/O.

use isowalk_core::{
    Endpoint, RasterGrid, RawResponse, StationRecord, WalkError, WalkTimeRecord, parse_grid,
    station_table, walktime_table,
};
use serde::de::DeserializeOwned;

use crate::envelope::{IsochroneEnvelope, StationEntry};
use crate::payload::{decode_grid_text, decode_png};

fn read_envelope<T: DeserializeOwned>(
    response: &RawResponse,
    endpoint: Endpoint,
) -> Result<T, WalkError> {
    let body = response.validated_body(endpoint)?;
    serde_json::from_slice(body).map_err(|err| WalkError::ParseError {
        url: response.url().to_owned(),
        message: err.to_string(),
    })
}

fn required_field(value: Option<String>, field: &str) -> Result<String, WalkError> {
    value.ok_or_else(|| WalkError::malformed(format!("response has no `{field}` field")))
}

/// Extract the PNG image from an isochrone response.
///
/// # Errors
///
/// Fails with [`WalkError::UnexpectedStatus`] or [`WalkError::WrongEndpoint`]
/// when validation fails, [`WalkError::ParseError`] when the body is not the
/// expected JSON, and [`WalkError::MalformedPayload`] when the `img` field is
/// absent or lacks the PNG marker.
pub fn decode_isochrone_png(response: &RawResponse) -> Result<Vec<u8>, WalkError> {
    let envelope: IsochroneEnvelope = read_envelope(response, Endpoint::Isochrone)?;
    decode_png(&required_field(envelope.img, "img")?)
}

/// Extract and parse the raw grid from an isochrone response.
///
/// # Errors
///
/// As [`decode_isochrone_png`] for validation and envelope failures; the
/// `raw_data` field must carry the gzip marker, and the inflated text must
/// be a valid grid (see [`isowalk_core::GridError`]).
pub fn decode_isochrone_grid(response: &RawResponse) -> Result<RasterGrid, WalkError> {
    let envelope: IsochroneEnvelope = read_envelope(response, Endpoint::Isochrone)?;
    let text = decode_grid_text(&required_field(envelope.raw_data, "raw_data")?)?;
    Ok(parse_grid(&text)?)
}

/// Extract the POI walk-time table from an isochrone response.
///
/// # Errors
///
/// As [`decode_isochrone_png`] for validation and envelope failures, plus
/// [`WalkError::EmptyResult`] when the response lists no features.
pub fn decode_poi_walktimes(response: &RawResponse) -> Result<Vec<WalkTimeRecord>, WalkError> {
    let envelope: IsochroneEnvelope = read_envelope(response, Endpoint::Isochrone)?;
    let features = envelope.pois.map(|pois| pois.features).unwrap_or_default();
    walktime_table(features.into_iter().map(WalkTimeRecord::from))
}

/// Extract the station table from a nearby-stations response.
///
/// An empty list is a valid answer and yields an empty table.
///
/// # Errors
///
/// Fails with [`WalkError::UnexpectedStatus`] or [`WalkError::WrongEndpoint`]
/// when validation fails and [`WalkError::ParseError`] when the body is not
/// a JSON list of stations.
pub fn decode_stations(response: &RawResponse) -> Result<Vec<StationRecord>, WalkError> {
    let entries: Vec<StationEntry> = read_envelope(response, Endpoint::PubTrans)?;
    Ok(station_table(entries.into_iter().map(StationRecord::from)))
}

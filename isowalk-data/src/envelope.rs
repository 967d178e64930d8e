//! Response envelope types for the walking-isochrone service.
//!
//! These mirror the JSON the service returns closely enough for `serde` to
//! read them, and no more. Conversion into the row types of
//! [`isowalk_core::table`] happens through the `From` impls at the bottom.

use geo::Coord;
use isowalk_core::{StationRecord, WalkTimeRecord, duration_from_minutes, duration_from_seconds};
use serde::Deserialize;

/// Body of a `/v1/isochrone` response.
///
/// Which fields are present depends on the request flags: `img` unless
/// `only_pois` was set, `raw_data` when the raw grid was asked for, and
/// `pois` when a POI collection was posted.
#[derive(Debug, Default, Deserialize)]
pub struct IsochroneEnvelope {
    /// Data-URI string holding a PNG image.
    #[serde(default)]
    pub img: Option<String>,
    /// Data-URI string holding a gzipped ASCII grid.
    #[serde(default)]
    pub raw_data: Option<String>,
    /// Walk times to the posted points of interest.
    #[serde(default)]
    pub pois: Option<PoiCollection>,
}

/// GeoJSON `FeatureCollection` of points of interest with walk times.
#[derive(Debug, Default, Deserialize)]
pub struct PoiCollection {
    /// One feature per posted point of interest.
    #[serde(default)]
    pub features: Vec<PoiFeature>,
}

/// A single point feature.
#[derive(Debug, Deserialize)]
pub struct PoiFeature {
    /// Point geometry.
    pub geometry: PointGeometry,
    /// Identifier echoed from the request and the computed walk time.
    #[serde(default)]
    pub properties: PoiProperties,
}

/// GeoJSON point geometry, `[x, y]`.
#[derive(Debug, Deserialize)]
pub struct PointGeometry {
    /// Position as `[x, y]`.
    pub coordinates: [f64; 2],
}

/// Properties attached to each returned point of interest.
#[derive(Debug, Default, Deserialize)]
pub struct PoiProperties {
    /// Identifier echoed from the request.
    #[serde(default)]
    pub id: Option<Scalar>,
    /// Walk time in seconds; `null` when the target is unreachable.
    #[serde(default)]
    pub time: Option<f64>,
}

/// One entry of a `/v1/pubtrans/ch/nearby` response.
#[derive(Debug, Deserialize)]
pub struct StationEntry {
    /// Station name.
    pub name: String,
    /// Walk time in minutes.
    #[serde(default)]
    pub walktime: Option<f64>,
    /// Station category code.
    #[serde(default)]
    pub station_category: Option<Scalar>,
    /// Station position.
    pub coordinates: StationCoordinates,
    /// Transport category (bus, tram, train, ...).
    #[serde(default)]
    pub transport_category: Option<String>,
    /// Station identifier.
    #[serde(default)]
    pub id: Option<Scalar>,
}

/// Station position as reported by the transport API.
///
/// Despite the names, `x` holds the latitude and `y` the longitude.
#[derive(Debug, Deserialize)]
pub struct StationCoordinates {
    /// Latitude.
    pub x: f64,
    /// Longitude.
    pub y: f64,
    /// Coordinate system tag, such as `WGS84`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// A JSON value the service sends as either a string or a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// A JSON string.
    Text(String),
    /// A JSON number, kept in its textual form.
    Number(serde_json::Number),
}

impl Scalar {
    /// Render the value as text.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

fn text_or_empty(value: Option<Scalar>) -> String {
    value.map(Scalar::into_text).unwrap_or_default()
}

impl From<PoiFeature> for WalkTimeRecord {
    fn from(feature: PoiFeature) -> Self {
        let [x, y] = feature.geometry.coordinates;
        Self {
            id: text_or_empty(feature.properties.id),
            walktime: duration_from_seconds(feature.properties.time),
            location: Coord { x, y },
        }
    }
}

impl From<StationEntry> for StationRecord {
    fn from(entry: StationEntry) -> Self {
        Self {
            walktime: duration_from_minutes(entry.walktime),
            station_category: text_or_empty(entry.station_category),
            latitude: entry.coordinates.x,
            longitude: entry.coordinates.y,
            coordinate_system: entry.coordinates.kind.unwrap_or_default(),
            transport_category: entry.transport_category.unwrap_or_default(),
            id: text_or_empty(entry.id),
            name: entry.name,
        }
    }
}

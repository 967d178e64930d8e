//! Request construction for the isochrone endpoint.

use isowalk_core::{Endpoint, PoiTarget};
use serde::Serialize;
use url::Url;

/// GeoJSON `FeatureCollection` body listing the points of interest.
///
/// Every feature carries an `id` property, empty when the caller gave none,
/// so the service echoes a uniform shape back.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use isowalk_core::PoiTarget;
/// use isowalk_data::request::PoiFeatureCollection;
///
/// let targets = [PoiTarget::anonymous(Coord { x: 1.0, y: 2.0 })];
/// let body = PoiFeatureCollection::from_targets(&targets);
/// let json = serde_json::to_value(&body).expect("serialises");
/// assert_eq!(json["features"][0]["geometry"]["coordinates"][1], 2.0);
/// assert_eq!(json["features"][0]["properties"]["id"], "");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoiFeatureCollection<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    features: Vec<PoiFeature<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct PoiFeature<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    geometry: PointGeometry,
    properties: PoiProperties<'a>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct PointGeometry {
    #[serde(rename = "type")]
    kind: &'static str,
    coordinates: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct PoiProperties<'a> {
    id: &'a str,
}

impl<'a> PoiFeatureCollection<'a> {
    /// Build the collection for `targets`, in order.
    #[must_use]
    pub fn from_targets(targets: &'a [PoiTarget]) -> Self {
        let features = targets
            .iter()
            .map(|target| PoiFeature {
                kind: "Feature",
                geometry: PointGeometry {
                    kind: "Point",
                    coordinates: [target.location.x, target.location.y],
                },
                properties: PoiProperties { id: &target.id },
            })
            .collect();
        Self {
            kind: "FeatureCollection",
            features,
        }
    }

    /// Number of features in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the collection has no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Join the endpoint path onto `base_url` and append the query pairs.
///
/// Trailing slashes on the base URL are ignored, and any path it already
/// carries is kept as a prefix.
///
/// # Errors
///
/// Returns [`url::ParseError`] when the combined URL is invalid.
pub fn endpoint_url(
    base_url: &str,
    endpoint: Endpoint,
    pairs: &[(&'static str, String)],
) -> Result<Url, url::ParseError> {
    let joined = format!("{}{}", base_url.trim_end_matches('/'), endpoint.path());
    Url::parse_with_params(joined.as_str(), pairs.iter().map(|(k, v)| (*k, v.as_str())))
}

//! Query parameters for the two service endpoints.
//!
//! Parameters are gathered in `*Params` builders whose source coordinates
//! may still be absent (for instance while configuration layers are being
//! merged). [`IsochroneParams::validate`] and [`NearbyParams::validate`]
//! turn them into `*Query` values that are guaranteed to carry a finite
//! source, failing fast with [`WalkError::MissingRequiredField`] otherwise.

use geo::Coord;

use crate::WalkError;

/// EPSG code for WGS84 longitude/latitude.
pub const DEFAULT_EPSG: u32 = 4326;
/// Default isochrone time budget in minutes.
pub const DEFAULT_MAX_MINUTES: u32 = 15;
/// Default isochrone break values in minutes.
pub const DEFAULT_BREAK_VALUES: [f64; 3] = [5.0, 10.0, 15.0];
/// Default walking range for nearby station searches, in minutes.
pub const DEFAULT_MAX_WALKTIME: u32 = 10;

/// Builder for an isochrone request.
///
/// # Examples
/// ```
/// use isowalk_core::IsochroneParams;
///
/// # fn main() -> Result<(), isowalk_core::WalkError> {
/// let query = IsochroneParams::at(8.54, 47.37)
///     .with_max_minutes(20)
///     .with_break_values(vec![10.0, 20.0])
///     .validate()?;
/// assert!(query
///     .query_pairs()
///     .contains(&("break_values", "10,20".to_owned())));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IsochroneParams {
    /// Source x coordinate.
    pub x: Option<f64>,
    /// Source y coordinate.
    pub y: Option<f64>,
    /// EPSG code of the source and target coordinates.
    pub epsg: u32,
    /// Upper bound of the isochrone in minutes.
    pub max_minutes: u32,
    /// Isochrone class boundaries in minutes.
    pub break_values: Vec<f64>,
    /// Ask the service to return only POI walk times.
    pub only_pois: bool,
    /// Ask the service to include the gzipped raw grid.
    pub raw_data: bool,
}

impl Default for IsochroneParams {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            epsg: DEFAULT_EPSG,
            max_minutes: DEFAULT_MAX_MINUTES,
            break_values: DEFAULT_BREAK_VALUES.to_vec(),
            only_pois: false,
            raw_data: false,
        }
    }
}

impl IsochroneParams {
    /// Start a request for the given source coordinates.
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Set the EPSG code.
    #[must_use]
    pub fn with_epsg(mut self, epsg: u32) -> Self {
        self.epsg = epsg;
        self
    }

    /// Set the time budget in minutes.
    #[must_use]
    pub fn with_max_minutes(mut self, max_minutes: u32) -> Self {
        self.max_minutes = max_minutes;
        self
    }

    /// Set the isochrone class boundaries.
    #[must_use]
    pub fn with_break_values(mut self, break_values: Vec<f64>) -> Self {
        self.break_values = break_values;
        self
    }

    /// Request only POI walk times.
    #[must_use]
    pub fn with_only_pois(mut self, only_pois: bool) -> Self {
        self.only_pois = only_pois;
        self
    }

    /// Request the gzipped raw grid alongside the image.
    #[must_use]
    pub fn with_raw_data(mut self, raw_data: bool) -> Self {
        self.raw_data = raw_data;
        self
    }

    /// Check that the source is present.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::MissingRequiredField`] naming `x` or `y` when a
    /// coordinate is absent or not finite.
    pub fn validate(&self) -> Result<IsochroneQuery, WalkError> {
        Ok(IsochroneQuery {
            source: require_source(self.x, self.y)?,
            epsg: self.epsg,
            max_minutes: self.max_minutes,
            break_values: self.break_values.clone(),
            only_pois: self.only_pois,
            raw_data: self.raw_data,
        })
    }
}

/// A validated isochrone request.
#[derive(Debug, Clone, PartialEq)]
pub struct IsochroneQuery {
    source: Coord<f64>,
    epsg: u32,
    max_minutes: u32,
    break_values: Vec<f64>,
    only_pois: bool,
    raw_data: bool,
}

impl IsochroneQuery {
    /// Source of the isochrone.
    #[must_use]
    pub const fn source(&self) -> Coord<f64> {
        self.source
    }

    /// Whether the raw grid was requested.
    #[must_use]
    pub const fn raw_data(&self) -> bool {
        self.raw_data
    }

    /// Copy of this query with the raw grid requested.
    #[must_use]
    pub fn with_raw_data(mut self) -> Self {
        self.raw_data = true;
        self
    }

    /// Query-string parameters in the order the service documents them.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let break_values = self
            .break_values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        vec![
            ("x", self.source.x.to_string()),
            ("y", self.source.y.to_string()),
            ("epsg", self.epsg.to_string()),
            ("max_min", self.max_minutes.to_string()),
            ("only_pois", self.only_pois.to_string()),
            ("raw_data", self.raw_data.to_string()),
            ("break_values", break_values),
        ]
    }
}

/// Builder for a nearby-stations request.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyParams {
    /// Source x coordinate.
    pub x: Option<f64>,
    /// Source y coordinate.
    pub y: Option<f64>,
    /// Maximum walking time to a station in minutes.
    pub max_walktime: u32,
}

impl Default for NearbyParams {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            max_walktime: DEFAULT_MAX_WALKTIME,
        }
    }
}

impl NearbyParams {
    /// Start a request for the given source coordinates.
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Set the maximum walking time in minutes.
    #[must_use]
    pub fn with_max_walktime(mut self, max_walktime: u32) -> Self {
        self.max_walktime = max_walktime;
        self
    }

    /// Check that the source is present.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::MissingRequiredField`] naming `x` or `y` when a
    /// coordinate is absent or not finite.
    pub fn validate(&self) -> Result<NearbyQuery, WalkError> {
        Ok(NearbyQuery {
            source: require_source(self.x, self.y)?,
            max_walktime: self.max_walktime,
        })
    }
}

/// A validated nearby-stations request.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    source: Coord<f64>,
    max_walktime: u32,
}

impl NearbyQuery {
    /// Source of the search.
    #[must_use]
    pub const fn source(&self) -> Coord<f64> {
        self.source
    }

    /// Query-string parameters.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("x", self.source.x.to_string()),
            ("y", self.source.y.to_string()),
            ("max_walktime", self.max_walktime.to_string()),
        ]
    }
}

fn require_source(x: Option<f64>, y: Option<f64>) -> Result<Coord<f64>, WalkError> {
    let x = require_coordinate(x, "x")?;
    let y = require_coordinate(y, "y")?;
    Ok(Coord { x, y })
}

fn require_coordinate(value: Option<f64>, field: &'static str) -> Result<f64, WalkError> {
    value
        .filter(|v| v.is_finite())
        .ok_or(WalkError::MissingRequiredField { field })
}

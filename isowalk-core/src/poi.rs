use geo::Coord;

/// A caller-supplied target location for walk-time queries.
///
/// Coordinates are expressed in the coordinate system named by the request's
/// EPSG code. The identifier is always present; callers without their own
/// identifiers get an empty string, which is also what the service echoes
/// back.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use isowalk_core::PoiTarget;
///
/// let named = PoiTarget::new("bakery", Coord { x: 8.54, y: 47.37 });
/// assert_eq!(named.id, "bakery");
///
/// let anonymous = PoiTarget::anonymous(Coord { x: 8.55, y: 47.38 });
/// assert!(anonymous.id.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoiTarget {
    /// Caller identifier, empty when none was supplied.
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: String,
    /// Position of the target.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub location: Coord<f64>,
}

impl PoiTarget {
    /// Construct a target with an identifier.
    pub fn new(id: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            id: id.into(),
            location,
        }
    }

    /// Construct a target without an identifier.
    #[must_use]
    pub fn anonymous(location: Coord<f64>) -> Self {
        Self::new(String::new(), location)
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn deserialises_with_and_without_id() {
        let targets: Vec<PoiTarget> =
            serde_json::from_str(r#"[{"id":"A","x":1.0,"y":2.0},{"x":3.0,"y":4.0}]"#)
                .expect("targets should deserialise");
        assert_eq!(targets[0], PoiTarget::new("A", Coord { x: 1.0, y: 2.0 }));
        assert_eq!(targets[1], PoiTarget::anonymous(Coord { x: 3.0, y: 4.0 }));
    }
}

//! Grid header keys and the six-field header record.

use std::fmt;

use geo::Coord;

use super::GridError;

/// Horizontal or vertical grid axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Easting / longitude.
    X,
    /// Northing / latitude.
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
        })
    }
}

/// Where the lower-left reference coordinate of an axis sits.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Anchor {
    /// Outer edge of the lower-left cell (`xllcorner`/`yllcorner`).
    Corner(f64),
    /// Middle of the lower-left cell (`xllcenter`/`yllcenter`).
    Center(f64),
}

impl Anchor {
    /// Return `(corner, center)` for a cell of the given size.
    #[must_use]
    pub fn resolve(self, cell_size: f64) -> (f64, f64) {
        let half = 0.5 * cell_size;
        match self {
            Self::Corner(corner) => (corner, corner + half),
            Self::Center(center) => (center - half, center),
        }
    }
}

/// Recognised header keys.
///
/// Keys are compared after trimming and lower-casing, and must match
/// exactly; substrings of values never count as keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum HeaderKey {
    NCols,
    NRows,
    XllCorner,
    XllCenter,
    YllCorner,
    YllCenter,
    CellSize,
    NoDataValue,
}

impl HeaderKey {
    const ALL: [Self; 8] = [
        Self::NCols,
        Self::NRows,
        Self::XllCorner,
        Self::XllCenter,
        Self::YllCorner,
        Self::YllCenter,
        Self::CellSize,
        Self::NoDataValue,
    ];

    pub(crate) const fn name(self) -> &'static str {
        match self {
            Self::NCols => "ncols",
            Self::NRows => "nrows",
            Self::XllCorner => "xllcorner",
            Self::XllCenter => "xllcenter",
            Self::YllCorner => "yllcorner",
            Self::YllCenter => "yllcenter",
            Self::CellSize => "cellsize",
            Self::NoDataValue => "nodata_value",
        }
    }

    pub(crate) fn parse(token: &str) -> Option<Self> {
        let normalised = token.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|key| key.name() == normalised)
    }
}

/// Accumulates header lines in any order before validation.
#[derive(Debug, Default)]
pub(crate) struct HeaderFields {
    ncols: Option<usize>,
    nrows: Option<usize>,
    x: Option<Anchor>,
    y: Option<Anchor>,
    cell_size: Option<f64>,
    nodata_value: Option<f64>,
}

impl HeaderFields {
    /// Record one `key value` line.
    pub(crate) fn insert(
        &mut self,
        line: usize,
        key: HeaderKey,
        value: &str,
    ) -> Result<(), GridError> {
        let duplicate = || GridError::DuplicateHeaderKey {
            line,
            key: key.name(),
        };
        match key {
            HeaderKey::NCols => set_once(&mut self.ncols, parse_count(line, value)?, duplicate),
            HeaderKey::NRows => set_once(&mut self.nrows, parse_count(line, value)?, duplicate),
            HeaderKey::XllCorner => {
                set_once(&mut self.x, Anchor::Corner(parse_float(line, value)?), duplicate)
            }
            HeaderKey::XllCenter => {
                set_once(&mut self.x, Anchor::Center(parse_float(line, value)?), duplicate)
            }
            HeaderKey::YllCorner => {
                set_once(&mut self.y, Anchor::Corner(parse_float(line, value)?), duplicate)
            }
            HeaderKey::YllCenter => {
                set_once(&mut self.y, Anchor::Center(parse_float(line, value)?), duplicate)
            }
            HeaderKey::CellSize => {
                set_once(&mut self.cell_size, parse_float(line, value)?, duplicate)
            }
            HeaderKey::NoDataValue => {
                set_once(&mut self.nodata_value, parse_float(line, value)?, duplicate)
            }
        }
    }

    /// Validate the collected fields into a [`GridHeader`].
    pub(crate) fn finish(self) -> Result<GridHeader, GridError> {
        let ncols = self.ncols.ok_or(GridError::MissingHeaderField { key: "ncols" })?;
        let nrows = self.nrows.ok_or(GridError::MissingHeaderField { key: "nrows" })?;
        let x = self.x.ok_or(GridError::MissingAnchor { axis: Axis::X })?;
        let y = self.y.ok_or(GridError::MissingAnchor { axis: Axis::Y })?;
        let cell_size = self
            .cell_size
            .ok_or(GridError::MissingHeaderField { key: "cellsize" })?;
        let nodata_value = self
            .nodata_value
            .ok_or(GridError::MissingHeaderField {
                key: "nodata_value",
            })?;
        GridHeader::new(ncols, nrows, x, y, cell_size, nodata_value)
    }
}

fn set_once<T>(
    slot: &mut Option<T>,
    value: T,
    duplicate: impl FnOnce() -> GridError,
) -> Result<(), GridError> {
    if slot.is_some() {
        return Err(duplicate());
    }
    *slot = Some(value);
    Ok(())
}

fn parse_count(line: usize, token: &str) -> Result<usize, GridError> {
    token.parse().map_err(|_| GridError::InvalidNumber {
        line,
        token: token.to_owned(),
    })
}

pub(crate) fn parse_float(line: usize, token: &str) -> Result<f64, GridError> {
    token.parse().map_err(|_| GridError::InvalidNumber {
        line,
        token: token.to_owned(),
    })
}

/// Geo-referencing and sentinel information for a raster grid.
///
/// Both the corner and the centre of the lower-left cell are kept. The one
/// supplied by the source is stored verbatim and the other is derived with
/// `center = corner + 0.5 * cell_size`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use isowalk_core::{Anchor, GridHeader};
///
/// # fn main() -> Result<(), isowalk_core::GridError> {
/// let header = GridHeader::new(2, 2, Anchor::Corner(0.0), Anchor::Center(5.0), 10.0, -9999.0)?;
/// assert_eq!(header.center(), Coord { x: 5.0, y: 5.0 });
/// assert_eq!(header.corner(), Coord { x: 0.0, y: 0.0 });
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GridHeader {
    ncols: usize,
    nrows: usize,
    corner: Coord<f64>,
    center: Coord<f64>,
    cell_size: f64,
    nodata_value: f64,
}

impl GridHeader {
    /// Validate and construct a header.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] when either count is zero and
    /// [`GridError::InvalidCellSize`] unless the cell size is positive and
    /// finite.
    pub fn new(
        ncols: usize,
        nrows: usize,
        x: Anchor,
        y: Anchor,
        cell_size: f64,
        nodata_value: f64,
    ) -> Result<Self, GridError> {
        if ncols == 0 || nrows == 0 {
            return Err(GridError::InvalidDimensions { ncols, nrows });
        }
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(GridError::InvalidCellSize {
                value: cell_size.to_string(),
            });
        }
        let (corner_x, center_x) = x.resolve(cell_size);
        let (corner_y, center_y) = y.resolve(cell_size);
        Ok(Self {
            ncols,
            nrows,
            corner: Coord {
                x: corner_x,
                y: corner_y,
            },
            center: Coord {
                x: center_x,
                y: center_y,
            },
            cell_size,
            nodata_value,
        })
    }

    /// Number of columns.
    #[must_use]
    pub const fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of rows.
    #[must_use]
    pub const fn nrows(&self) -> usize {
        self.nrows
    }

    /// Total number of cells, `ncols * nrows`.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.ncols.saturating_mul(self.nrows)
    }

    /// Outer lower-left corner of the grid.
    #[must_use]
    pub const fn corner(&self) -> Coord<f64> {
        self.corner
    }

    /// Centre of the lower-left cell.
    #[must_use]
    pub const fn center(&self) -> Coord<f64> {
        self.center
    }

    /// Edge length of a (square) cell.
    #[must_use]
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Sentinel marking cells without a measurement.
    #[must_use]
    pub const fn nodata_value(&self) -> f64 {
        self.nodata_value
    }
}

//! In-memory raster grid anchored at the centre of its lower-left cell.

use geo::{Coord, Rect};

use super::{GridError, GridHeader};

/// A planar raster grid with uniform square cells.
///
/// Cells are stored row-major in the order they were read: row 0 is the
/// northernmost row and column 0 the westernmost. Cells that carried the
/// header's no-data sentinel are `None`. No coordinate reference system is
/// attached; callers that know the EPSG code of the request can pair it with
/// the grid themselves.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use isowalk_core::{Anchor, GridHeader, RasterGrid};
///
/// # fn main() -> Result<(), isowalk_core::GridError> {
/// let header = GridHeader::new(2, 1, Anchor::Corner(0.0), Anchor::Corner(0.0), 2.0, -1.0)?;
/// let grid = RasterGrid::from_values(header, vec![7.0, -1.0])?;
/// assert_eq!(grid.value(0, 0), Some(7.0));
/// assert_eq!(grid.value(0, 1), None);
/// assert_eq!(grid.cell_center(0, 1), Coord { x: 3.0, y: 1.0 });
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RasterGrid {
    header: GridHeader,
    cells: Vec<Option<f64>>,
}

impl RasterGrid {
    /// Build a grid from a flat row-major sequence of cell values.
    ///
    /// Values equal to the header's no-data sentinel become `None`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] unless exactly
    /// `ncols * nrows` values are supplied.
    pub fn from_values(header: GridHeader, values: Vec<f64>) -> Result<Self, GridError> {
        let expected = header.cell_count();
        if values.len() != expected {
            return Err(GridError::DimensionMismatch {
                expected,
                actual: values.len(),
            });
        }
        let nodata = header.nodata_value();
        let cells = values
            .into_iter()
            .map(|value| (value != nodata).then_some(value))
            .collect();
        Ok(Self { header, cells })
    }

    /// Header the grid was built from.
    #[must_use]
    pub const fn header(&self) -> &GridHeader {
        &self.header
    }

    /// Number of columns.
    #[must_use]
    pub const fn ncols(&self) -> usize {
        self.header.ncols()
    }

    /// Number of rows.
    #[must_use]
    pub const fn nrows(&self) -> usize {
        self.header.nrows()
    }

    /// Edge length of every cell on both axes.
    #[must_use]
    pub const fn cell_size(&self) -> f64 {
        self.header.cell_size()
    }

    /// Centre of the lower-left cell, the grid's anchor.
    #[must_use]
    pub const fn origin(&self) -> Coord<f64> {
        self.header.center()
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Option<f64>] {
        &self.cells
    }

    /// Value at `(row, col)`, or `None` when missing or out of bounds.
    #[must_use]
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.nrows() || col >= self.ncols() {
            return None;
        }
        self.cells
            .get(row * self.ncols() + col)
            .copied()
            .flatten()
    }

    /// Whether `(row, col)` lies inside the grid and carries no value.
    #[must_use]
    pub fn is_missing(&self, row: usize, col: usize) -> bool {
        row < self.nrows() && col < self.ncols() && self.value(row, col).is_none()
    }

    /// Number of cells that held the no-data sentinel.
    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Planar coordinate of the centre of `(row, col)`.
    ///
    /// Row 0 is the top of the grid, so its centre lies
    /// `(nrows - 1) * cell_size` above the origin.
    #[must_use]
    pub fn cell_center(&self, row: usize, col: usize) -> Coord<f64> {
        let size = self.cell_size();
        let origin = self.origin();
        let rows_above_bottom = self.nrows().saturating_sub(1).saturating_sub(row);
        Coord {
            x: origin.x + col as f64 * size,
            y: origin.y + rows_above_bottom as f64 * size,
        }
    }

    /// Bounding rectangle covering the outer edges of every cell.
    #[must_use]
    pub fn extent(&self) -> Rect<f64> {
        let corner = self.header.corner();
        let size = self.cell_size();
        Rect::new(
            corner,
            Coord {
                x: corner.x + self.ncols() as f64 * size,
                y: corner.y + self.nrows() as f64 * size,
            },
        )
    }

    /// Iterate over `(row, col, value)` for every cell in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Option<f64>)> + '_ {
        let ncols = self.ncols();
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, cell)| (index / ncols, index % ncols, *cell))
    }
}

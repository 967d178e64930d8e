//! Row-oriented result tables, always ordered by ascending walk time.
//!
//! Ordering is part of the contract of every builder here: for any two
//! adjacent rows `a` and `b`, `a <= b` on the sort key. Sorting is stable, so
//! rows with equal keys keep the order in which the service returned them.

use std::cmp::Ordering;
use std::time::Duration;

use geo::Coord;
use log::warn;

use crate::{RasterGrid, WalkError};

/// One grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PixelRow {
    /// Cell value (walk time as encoded by the service), `None` when the
    /// cell held the no-data sentinel.
    pub value: Option<f64>,
    /// Centre of the cell.
    pub location: Coord<f64>,
}

/// Walk time from the query source to one point of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkTimeRecord {
    /// Caller identifier, empty when none was supplied.
    pub id: String,
    /// Walking duration; [`Duration::MAX`] when the target is unreachable.
    pub walktime: Duration,
    /// Position of the point of interest.
    pub location: Coord<f64>,
}

/// A public transport station within walking range of the source.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    /// Station name.
    pub name: String,
    /// Walking duration; [`Duration::MAX`] when the service gave none.
    pub walktime: Duration,
    /// Service category code of the station.
    pub station_category: String,
    /// Latitude of the station.
    pub latitude: f64,
    /// Longitude of the station.
    pub longitude: f64,
    /// Coordinate system tag reported with the position (e.g. `WGS84`).
    pub coordinate_system: String,
    /// Transport category (bus, tram, train, ...).
    pub transport_category: String,
    /// Station identifier.
    pub id: String,
}

/// Rows that can be ordered by walking duration.
pub trait WalkTimed {
    /// Walking duration used as the sort key.
    fn walktime(&self) -> Duration;
}

impl WalkTimed for WalkTimeRecord {
    fn walktime(&self) -> Duration {
        self.walktime
    }
}

impl WalkTimed for StationRecord {
    fn walktime(&self) -> Duration {
        self.walktime
    }
}

/// Stable-sort rows by ascending walk time.
pub fn sort_by_walktime<T: WalkTimed>(rows: &mut [T]) {
    rows.sort_by_key(T::walktime);
}

/// Flatten a grid into one row per cell, sorted by ascending value.
///
/// Missing cells sort after every valued cell and keep their row-major
/// order among themselves. A parsed grid has at least one cell, so the
/// table is never empty.
///
/// # Examples
/// ```
/// use isowalk_core::{parse_grid, pixel_table};
///
/// # fn main() -> Result<(), isowalk_core::GridError> {
/// let text = "ncols 3\nnrows 1\nxllcorner 0\nyllcorner 0\ncellsize 1\nnodata_value -1\n9 -1 3";
/// let rows = pixel_table(&parse_grid(text)?);
/// assert_eq!(rows[0].value, Some(3.0));
/// assert_eq!(rows[1].value, Some(9.0));
/// assert_eq!(rows[2].value, None);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn pixel_table(grid: &RasterGrid) -> Vec<PixelRow> {
    let mut rows: Vec<PixelRow> = grid
        .iter_cells()
        .map(|(row, col, value)| PixelRow {
            value,
            location: grid.cell_center(row, col),
        })
        .collect();
    rows.sort_by(|a, b| missing_last(a.value, b.value));
    rows
}

fn missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Collect walk-time records into a table sorted by ascending walk time.
///
/// # Errors
///
/// Returns [`WalkError::EmptyResult`] when no records are supplied.
pub fn walktime_table(
    records: impl IntoIterator<Item = WalkTimeRecord>,
) -> Result<Vec<WalkTimeRecord>, WalkError> {
    let mut rows: Vec<WalkTimeRecord> = records.into_iter().collect();
    if rows.is_empty() {
        return Err(WalkError::EmptyResult {
            what: "points of interest",
        });
    }
    sort_by_walktime(&mut rows);
    Ok(rows)
}

/// Collect station records into a table sorted by ascending walk time.
///
/// An empty table is a valid answer: no station lies within the requested
/// walking range.
pub fn station_table(records: impl IntoIterator<Item = StationRecord>) -> Vec<StationRecord> {
    let mut rows: Vec<StationRecord> = records.into_iter().collect();
    sort_by_walktime(&mut rows);
    rows
}

/// Convert a reported number of seconds to a [`Duration`].
///
/// Absent, negative, non-finite and out-of-range values become
/// [`Duration::MAX`], which marks the row as unreachable and sorts it last.
#[must_use]
pub fn duration_from_seconds(seconds: Option<f64>) -> Duration {
    valid_duration(seconds).unwrap_or_else(|| {
        warn!("walk time {seconds:?} is not a valid duration; treating as unreachable");
        Duration::MAX
    })
}

/// `None` when the value is absent or no `Duration` can represent it.
fn valid_duration(seconds: Option<f64>) -> Option<Duration> {
    seconds.and_then(|value| Duration::try_from_secs_f64(value).ok())
}

/// Convert a reported number of minutes to a [`Duration`].
///
/// Invalid values are handled as in [`duration_from_seconds`].
#[must_use]
pub fn duration_from_minutes(minutes: Option<f64>) -> Duration {
    duration_from_seconds(minutes.map(|m| m * 60.0))
}

//! JSON rendering of result tables.
//!
//! Durations are written as plain numbers in the unit the service uses for
//! the endpoint (seconds for POIs, minutes for stations); unreachable rows
//! get `null`.

use std::io::Write;
use std::time::Duration;

use isowalk_core::{PixelRow, RasterGrid, StationRecord, WalkTimeRecord};
use serde::{Deserialize, Serialize};

use crate::CliError;

/// One pixel-table row; missing cells have a `null` value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PixelOut {
    pub(crate) value: Option<f64>,
    pub(crate) x: f64,
    pub(crate) y: f64,
}

impl From<&PixelRow> for PixelOut {
    fn from(row: &PixelRow) -> Self {
        Self {
            value: row.value,
            x: row.location.x,
            y: row.location.y,
        }
    }
}

/// One walk-time row; `walktime` is in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct WalkTimeOut {
    pub(crate) id: String,
    pub(crate) walktime: Option<f64>,
    pub(crate) x: f64,
    pub(crate) y: f64,
}

impl From<&WalkTimeRecord> for WalkTimeOut {
    fn from(record: &WalkTimeRecord) -> Self {
        Self {
            id: record.id.clone(),
            walktime: reachable(record.walktime).map(|d| d.as_secs_f64()),
            x: record.location.x,
            y: record.location.y,
        }
    }
}

/// One station row; `walktime` is in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct StationOut {
    pub(crate) name: String,
    pub(crate) walktime: Option<f64>,
    pub(crate) station_category: String,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) coordinate_system: String,
    pub(crate) transport_category: String,
    pub(crate) id: String,
}

impl From<&StationRecord> for StationOut {
    fn from(record: &StationRecord) -> Self {
        Self {
            name: record.name.clone(),
            walktime: reachable(record.walktime).map(|d| d.as_secs_f64() / 60.0),
            station_category: record.station_category.clone(),
            latitude: record.latitude,
            longitude: record.longitude,
            coordinate_system: record.coordinate_system.clone(),
            transport_category: record.transport_category.clone(),
            id: record.id.clone(),
        }
    }
}

/// Header-level description of a raster grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct GridSummary {
    pub(crate) ncols: usize,
    pub(crate) nrows: usize,
    pub(crate) cell_size: f64,
    pub(crate) xllcorner: f64,
    pub(crate) yllcorner: f64,
    pub(crate) xllcenter: f64,
    pub(crate) yllcenter: f64,
    pub(crate) missing_cells: usize,
}

impl From<&RasterGrid> for GridSummary {
    fn from(grid: &RasterGrid) -> Self {
        let header = grid.header();
        Self {
            ncols: grid.ncols(),
            nrows: grid.nrows(),
            cell_size: grid.cell_size(),
            xllcorner: header.corner().x,
            yllcorner: header.corner().y,
            xllcenter: header.center().x,
            yllcenter: header.center().y,
            missing_cells: grid.missing_count(),
        }
    }
}

fn reachable(walktime: Duration) -> Option<Duration> {
    (walktime != Duration::MAX).then_some(walktime)
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

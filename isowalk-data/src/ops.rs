//! End-to-end operations: validate, send one request, decode.
//!
//! Every operation validates its parameters before the service is touched,
//! so a missing source coordinate never costs a network round trip.

use camino::Utf8Path;
use isowalk_core::{
    IsochroneParams, NearbyParams, PixelRow, PoiTarget, RasterGrid, StationRecord, WalkError,
    WalkService, WalkTimeRecord, pixel_table,
};

use crate::decode::{
    decode_isochrone_grid, decode_isochrone_png, decode_poi_walktimes, decode_stations,
};

/// Fetch the isochrone image and write it to `output`.
///
/// Missing parent directories are created and an existing file is replaced.
/// Returns the number of bytes written.
///
/// # Errors
///
/// Any [`WalkError`] from validation, transport or decoding, and
/// [`WalkError::WriteOutput`] when the file cannot be written.
pub fn isochrone_png<S>(
    service: &S,
    params: &IsochroneParams,
    output: &Utf8Path,
) -> Result<usize, WalkError>
where
    S: WalkService + ?Sized,
{
    let query = params.validate()?;
    let image = decode_isochrone_png(&service.isochrone(&query, &[])?)?;
    isowalk_fs::write_bytes(output, &image).map_err(|err| WalkError::WriteOutput {
        path: output.to_string(),
        message: err.to_string(),
    })?;
    log::debug!("wrote {} byte isochrone image to {output}", image.len());
    Ok(image.len())
}

/// Fetch the raw isochrone grid.
///
/// The raw grid is always requested, whatever `params.raw_data` says.
///
/// # Errors
///
/// Any [`WalkError`] from validation, transport, decoding or grid parsing.
pub fn isochrone_grid<S>(service: &S, params: &IsochroneParams) -> Result<RasterGrid, WalkError>
where
    S: WalkService + ?Sized,
{
    let query = params.validate()?.with_raw_data();
    decode_isochrone_grid(&service.isochrone(&query, &[])?)
}

/// Fetch the raw isochrone grid flattened into a pixel table with one row
/// per cell, sorted by value with missing cells last.
///
/// # Errors
///
/// As [`isochrone_grid`].
pub fn isochrone_pixels<S>(service: &S, params: &IsochroneParams) -> Result<Vec<PixelRow>, WalkError>
where
    S: WalkService + ?Sized,
{
    Ok(pixel_table(&isochrone_grid(service, params)?))
}

/// Fetch walk times from the source to each of `pois`, sorted ascending.
///
/// Only POI walk times are requested from the service.
///
/// # Errors
///
/// [`WalkError::EmptyResult`] before any request when `pois` is empty, and
/// any [`WalkError`] from validation, transport or decoding.
pub fn poi_walktimes<S>(
    service: &S,
    params: &IsochroneParams,
    pois: &[PoiTarget],
) -> Result<Vec<WalkTimeRecord>, WalkError>
where
    S: WalkService + ?Sized,
{
    let query = params.clone().with_only_pois(true).validate()?;
    if pois.is_empty() {
        return Err(WalkError::EmptyResult {
            what: "points of interest",
        });
    }
    decode_poi_walktimes(&service.isochrone(&query, pois)?)
}

/// Fetch public transport stations within walking range, sorted ascending
/// by walk time.
///
/// # Errors
///
/// Any [`WalkError`] from validation, transport or decoding.
pub fn nearby_stations<S>(
    service: &S,
    params: &NearbyParams,
) -> Result<Vec<StationRecord>, WalkError>
where
    S: WalkService + ?Sized,
{
    let query = params.validate()?;
    decode_stations(&service.nearby_stations(&query)?)
}

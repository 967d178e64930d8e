//! Facade crate for the isowalk walking-isochrone client.
//!
//! This crate re-exports the core domain types together with the HTTP
//! transport and the end-to-end operations built on top of it.

#![forbid(unsafe_code)]

pub use isowalk_core::{
    Endpoint, GridError, GridHeader, IsochroneParams, NearbyParams, PixelRow, PoiTarget,
    RasterGrid, RawResponse, StationRecord, WalkError, WalkService, WalkTimeRecord, parse_grid,
};

pub use isowalk_data::{
    HttpWalkService, ServiceBuildError, WalkServiceConfig, isochrone_grid, isochrone_pixels,
    isochrone_png, nearby_stations, poi_walktimes,
};

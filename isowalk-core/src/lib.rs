//! Core domain types for the isowalk client.
//!
//! Everything here is pure: no network, no filesystem. The crate holds the
//! response validator, the grid parser, the result tables and the query
//! builders, plus the [`WalkService`] seam that transports implement.
//!
//! Constructors and parsers return `Result` so invalid input surfaces at the
//! boundary instead of deep inside a decoder.

#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod poi;
pub mod query;
pub mod response;
pub mod service;
pub mod table;

pub use error::WalkError;
pub use grid::{Anchor, Axis, GridError, GridHeader, RasterGrid, parse_grid};
pub use poi::PoiTarget;
pub use query::{IsochroneParams, IsochroneQuery, NearbyParams, NearbyQuery};
pub use response::{Endpoint, RawResponse};
pub use service::WalkService;
pub use table::{
    PixelRow, StationRecord, WalkTimeRecord, WalkTimed, duration_from_minutes,
    duration_from_seconds, pixel_table, sort_by_walktime, station_table, walktime_table,
};

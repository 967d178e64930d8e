//! Transport and decoding for the walking-isochrone service.
//!
//! Responsibilities:
//! - Decode the base64 data-URI payloads the service embeds in JSON.
//! - Read the JSON response envelopes and reshape them into core tables.
//! - Build the outbound query and GeoJSON body and send them over HTTP.
//! - Chain validation, transport and decoding into one call per operation.
//!
//! Boundaries:
//! - Domain rules (grid parsing, ordering, validation) live in `isowalk-core`.
//! - One request per operation; no retry, no caching.
//!
//! Invariants:
//! - No response body is read before its status and origin are validated.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod decode;
pub mod envelope;
pub mod ops;
pub mod payload;
pub mod request;
pub mod service;

pub use decode::{decode_isochrone_grid, decode_isochrone_png, decode_poi_walktimes, decode_stations};
pub use ops::{isochrone_grid, isochrone_pixels, isochrone_png, nearby_stations, poi_walktimes};
pub use payload::{GZIP_MARKER, PNG_MARKER, Payload, decode_grid_text, decode_png};
pub use service::{HttpWalkService, ServiceBuildError, WalkServiceConfig};

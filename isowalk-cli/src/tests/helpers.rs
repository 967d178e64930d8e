//! Test doubles and fixture builders for the CLI commands.

use std::cell::RefCell;
use std::io::Write;

use base64::{Engine as _, engine::general_purpose};
use camino::Utf8Path;
use flate2::{Compression, write::GzEncoder};
use isowalk_core::WalkService;
use isowalk_data::service::test_support::StubWalkService;

use crate::CliError;
use crate::service::{ServiceBuilder, ServiceSettings};

/// Builder handing out clones of a pre-configured stub service.
#[derive(Debug)]
pub(super) struct StubServiceBuilder {
    stub: StubWalkService,
    seen: RefCell<Option<ServiceSettings>>,
}

impl StubServiceBuilder {
    pub(super) fn new(stub: StubWalkService) -> Self {
        Self {
            stub,
            seen: RefCell::new(None),
        }
    }

    pub(super) fn json(status: u16, body: &str) -> Self {
        Self::new(StubWalkService::with_json(status, body))
    }

    /// Settings the command asked for, if it got as far as building.
    pub(super) fn seen(&self) -> Option<ServiceSettings> {
        self.seen.borrow().clone()
    }
}

impl ServiceBuilder for StubServiceBuilder {
    fn build(&self, settings: &ServiceSettings) -> Result<Box<dyn WalkService>, CliError> {
        self.seen.replace(Some(settings.clone()));
        Ok(Box::new(self.stub.clone()))
    }
}

pub(super) const GRID_2X2: &str =
    "ncols 2\nnrows 2\nxllcorner 0\nyllcorner 0\ncellsize 10\nnodata_value -9999\n1 -9999 3 4\n";

/// JSON body of an isochrone response carrying `grid` as raw data.
pub(super) fn raw_grid_body(grid: &str) -> String {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(grid.as_bytes()).expect("compress grid");
    let encoded = general_purpose::STANDARD.encode(encoder.finish().expect("finish gzip"));
    format!(r#"{{"raw_data": "data:application/gzip;base64,{encoded}"}}"#)
}

pub(super) const PNG_BODY: &str = r#"{"img": "data:image/png;base64,iVBORw0KGgo="}"#;

pub(super) const POI_BODY: &str = r#"{"pois": {"type": "FeatureCollection", "features": [
    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [1, 2]},
     "properties": {"id": "A", "time": 500}},
    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [3, 4]},
     "properties": {"id": "B", "time": 100}}
]}}"#;

pub(super) const STATIONS_BODY: &str = r#"[
    {"name": "Bahnhofplatz", "walktime": 7, "station_category": "1",
     "coordinates": {"x": 47.378, "y": 8.540, "type": "WGS84"},
     "transport_category": "train", "id": "8503000"},
    {"name": "Central", "walktime": 3, "station_category": 2,
     "coordinates": {"x": 47.377, "y": 8.544, "type": "WGS84"},
     "transport_category": "tram", "id": 8591105}
]"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

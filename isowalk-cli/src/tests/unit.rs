//! Focused unit tests covering CLI configuration, input loading and output.

use super::helpers::{
    GRID_2X2, PNG_BODY, POI_BODY, STATIONS_BODY, StubServiceBuilder, raw_grid_body, write_utf8,
};
use super::*;
use crate::isochrone::{
    DEFAULT_OUTPUT, IsochroneConfig, IsochroneFormat, IsochroneTarget, PngWritten,
    execute_isochrone, parse_break_values,
};
use crate::output::{GridSummary, PixelOut, StationOut, WalkTimeOut};
use crate::pois::{PoisConfig, execute_pois, load_pois};
use crate::service::ServiceSettings;
use crate::stations::{StationsConfig, execute_stations};
use camino::Utf8PathBuf;
use geo::Coord;
use isowalk_core::{IsochroneParams, NearbyParams, PoiTarget, WalkError};
use isowalk_data::service::DEFAULT_BASE_URL;
use rstest::{fixture, rstest};
use tempfile::TempDir;

fn settings() -> ServiceSettings {
    ServiceSettings {
        base_url: "https://api.example.test".to_owned(),
        key: "secret".to_owned(),
    }
}

fn isochrone_args() -> IsochroneArgs {
    IsochroneArgs {
        x: Some(8.54),
        y: Some(47.37),
        key: Some("secret".to_owned()),
        ..IsochroneArgs::default()
    }
}

#[fixture]
fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

fn expect_missing(err: CliError, expected_field: &str, expected_env: &str) {
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, expected_field);
            assert_eq!(env, expected_env);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn isochrone_config_applies_defaults() {
    let config = IsochroneConfig::try_from(isochrone_args()).expect("config should build");

    assert_eq!(config.params, IsochroneParams::at(8.54, 47.37));
    assert_eq!(
        config.target,
        IsochroneTarget::Png(Utf8PathBuf::from(DEFAULT_OUTPUT))
    );
    assert_eq!(config.service.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.service.key, "secret");
}

#[rstest]
fn isochrone_config_reads_overrides() {
    let args = IsochroneArgs {
        epsg: Some(2056),
        max_min: Some(20),
        break_values: Some("10, 20".to_owned()),
        format: Some(IsochroneFormat::Pixels),
        base_url: Some("http://localhost:8080".to_owned()),
        ..isochrone_args()
    };

    let config = IsochroneConfig::try_from(args).expect("config should build");

    assert_eq!(
        config.params,
        IsochroneParams::at(8.54, 47.37)
            .with_epsg(2056)
            .with_max_minutes(20)
            .with_break_values(vec![10.0, 20.0])
    );
    assert_eq!(config.target, IsochroneTarget::Pixels);
    assert_eq!(config.service.base_url, "http://localhost:8080");
}

#[rstest]
#[case::missing_x(None, Some(47.0), ARG_X, ENV_ISOCHRONE_X)]
#[case::missing_y(Some(8.0), None, ARG_Y, ENV_ISOCHRONE_Y)]
fn isochrone_config_requires_source(
    #[case] x: Option<f64>,
    #[case] y: Option<f64>,
    #[case] field: &str,
    #[case] env: &str,
) {
    let args = IsochroneArgs {
        x,
        y,
        ..isochrone_args()
    };
    let err = IsochroneConfig::try_from(args).expect_err("source is incomplete");
    expect_missing(err, field, env);
}

#[rstest]
#[case::absent(None)]
#[case::blank(Some("  ".to_owned()))]
fn isochrone_config_requires_key(#[case] key: Option<String>) {
    let args = IsochroneArgs {
        key,
        ..isochrone_args()
    };
    let err = IsochroneConfig::try_from(args).expect_err("key is missing");
    expect_missing(err, ARG_KEY, ENV_ISOCHRONE_KEY);
}

#[rstest]
#[case("5,10,15", vec![5.0, 10.0, 15.0])]
#[case(" 2.5 , 7.5 ", vec![2.5, 7.5])]
#[case("", Vec::new())]
#[case("10,,20,", vec![10.0, 20.0])]
fn parses_break_values(#[case] list: &str, #[case] expected: Vec<f64>) {
    assert_eq!(parse_break_values(list).expect("valid list"), expected);
}

#[rstest]
#[case("5;10")]
#[case("ten")]
#[case("5,inf")]
fn rejects_invalid_break_values(#[case] list: &str) {
    let err = parse_break_values(list).expect_err("invalid list");
    assert!(matches!(err, CliError::InvalidBreakValues { .. }));
}

#[rstest]
fn pois_config_requires_file() {
    let args = PoisArgs {
        x: Some(1.0),
        y: Some(2.0),
        key: Some("secret".to_owned()),
        ..PoisArgs::default()
    };
    let err = PoisConfig::try_from(args).expect_err("file is missing");
    expect_missing(err, ARG_POIS, ENV_POIS_FILE);
}

#[rstest]
fn stations_config_defaults_walktime() {
    let args = StationsArgs {
        x: Some(8.54),
        y: Some(47.37),
        key: Some("secret".to_owned()),
        ..StationsArgs::default()
    };
    let config = StationsConfig::try_from(args).expect("config should build");
    assert_eq!(config.params, NearbyParams::at(8.54, 47.37));
}

#[rstest]
fn stations_config_requires_key() {
    let args = StationsArgs {
        x: Some(8.54),
        y: Some(47.37),
        ..StationsArgs::default()
    };
    let err = StationsConfig::try_from(args).expect_err("key is missing");
    expect_missing(err, ARG_KEY, ENV_STATIONS_KEY);
}

#[rstest]
fn load_pois_accepts_optional_ids(workspace: (TempDir, Utf8PathBuf)) {
    let (_tmp, root) = workspace;
    let path = root.join("pois.json");
    write_utf8(&path, br#"[{"id": "A", "x": 1, "y": 2}, {"x": 3, "y": 4}]"#);

    let pois = load_pois(&path).expect("pois should load");

    assert_eq!(
        pois,
        vec![
            PoiTarget::new("A", Coord { x: 1.0, y: 2.0 }),
            PoiTarget::anonymous(Coord { x: 3.0, y: 4.0 }),
        ]
    );
}

#[rstest]
fn load_pois_reports_missing_file(workspace: (TempDir, Utf8PathBuf)) {
    let (_tmp, root) = workspace;
    let err = load_pois(&root.join("absent.json")).expect_err("file is missing");
    assert!(matches!(err, CliError::ReadPois { .. }));
}

#[rstest]
fn load_pois_reports_invalid_json(workspace: (TempDir, Utf8PathBuf)) {
    let (_tmp, root) = workspace;
    let path = root.join("pois.json");
    write_utf8(&path, b"{ not a list");
    let err = load_pois(&path).expect_err("invalid JSON");
    assert!(matches!(err, CliError::ParsePois { .. }));
}

#[rstest]
fn isochrone_writes_png_and_reports_it(workspace: (TempDir, Utf8PathBuf)) {
    let (_tmp, root) = workspace;
    let output = root.join("maps/iso.png");
    let config = IsochroneConfig {
        params: IsochroneParams::at(8.54, 47.37),
        target: IsochroneTarget::Png(output.clone()),
        service: settings(),
    };
    let builder = StubServiceBuilder::json(200, PNG_BODY);
    let mut stdout = Vec::new();

    execute_isochrone(&config, &builder, &mut stdout).expect("command should succeed");

    let report: PngWritten = serde_json::from_slice(&stdout).expect("JSON report");
    assert_eq!(report, PngWritten { output: output.clone(), bytes: 8 });
    let bytes = std::fs::read(output.as_std_path()).expect("png written");
    assert_eq!(bytes, b"\x89PNG\r\n\x1a\n");
    assert_eq!(builder.seen(), Some(settings()));
}

#[rstest]
fn isochrone_prints_sorted_pixels() {
    let config = IsochroneConfig {
        params: IsochroneParams::at(0.0, 0.0),
        target: IsochroneTarget::Pixels,
        service: settings(),
    };
    let builder = StubServiceBuilder::json(200, &raw_grid_body(GRID_2X2));
    let mut stdout = Vec::new();

    execute_isochrone(&config, &builder, &mut stdout).expect("command should succeed");

    let rows: Vec<PixelOut> = serde_json::from_slice(&stdout).expect("JSON rows");
    let values: Vec<Option<f64>> = rows.iter().map(|row| row.value).collect();
    assert_eq!(values, vec![Some(1.0), Some(3.0), Some(4.0), None]);
    assert_eq!((rows[0].x, rows[0].y), (5.0, 15.0));
    assert_eq!((rows[3].x, rows[3].y), (15.0, 15.0));
}

#[rstest]
fn isochrone_prints_grid_summary() {
    let config = IsochroneConfig {
        params: IsochroneParams::at(0.0, 0.0),
        target: IsochroneTarget::Grid,
        service: settings(),
    };
    let builder = StubServiceBuilder::json(200, &raw_grid_body(GRID_2X2));
    let mut stdout = Vec::new();

    execute_isochrone(&config, &builder, &mut stdout).expect("command should succeed");

    let summary: GridSummary = serde_json::from_slice(&stdout).expect("JSON summary");
    assert_eq!(
        summary,
        GridSummary {
            ncols: 2,
            nrows: 2,
            cell_size: 10.0,
            xllcorner: 0.0,
            yllcorner: 0.0,
            xllcenter: 5.0,
            yllcenter: 5.0,
            missing_cells: 1,
        }
    );
}

#[rstest]
fn pois_prints_walk_times_in_seconds(workspace: (TempDir, Utf8PathBuf)) {
    let (_tmp, root) = workspace;
    let path = root.join("pois.json");
    write_utf8(&path, br#"[{"id": "A", "x": 1, "y": 2}, {"id": "B", "x": 3, "y": 4}]"#);
    let config = PoisConfig {
        params: IsochroneParams::at(0.0, 0.0),
        pois_path: path,
        service: settings(),
    };
    let builder = StubServiceBuilder::json(200, POI_BODY);
    let mut stdout = Vec::new();

    execute_pois(&config, &builder, &mut stdout).expect("command should succeed");

    let rows: Vec<WalkTimeOut> = serde_json::from_slice(&stdout).expect("JSON rows");
    assert_eq!(
        rows,
        vec![
            WalkTimeOut {
                id: "B".to_owned(),
                walktime: Some(100.0),
                x: 3.0,
                y: 4.0,
            },
            WalkTimeOut {
                id: "A".to_owned(),
                walktime: Some(500.0),
                x: 1.0,
                y: 2.0,
            },
        ]
    );
}

#[rstest]
fn stations_print_walk_times_in_minutes() {
    let config = StationsConfig {
        params: NearbyParams::at(8.54, 47.37),
        service: settings(),
    };
    let builder = StubServiceBuilder::json(200, STATIONS_BODY);
    let mut stdout = Vec::new();

    execute_stations(&config, &builder, &mut stdout).expect("command should succeed");

    let rows: Vec<StationOut> = serde_json::from_slice(&stdout).expect("JSON rows");
    assert_eq!(rows[0].name, "Central");
    assert_eq!(rows[0].walktime, Some(3.0));
    assert_eq!(rows[0].id, "8591105");
    assert_eq!(rows[1].station_category, "1");
}

#[rstest]
fn service_failures_surface_as_walk_errors() {
    let config = StationsConfig {
        params: NearbyParams::at(8.54, 47.37),
        service: settings(),
    };
    let builder = StubServiceBuilder::json(401, "Access denied");
    let mut stdout = Vec::new();

    let err = execute_stations(&config, &builder, &mut stdout).expect_err("401");

    assert!(matches!(
        err,
        CliError::Walk(WalkError::UnexpectedStatus { status: 401, .. })
    ));
    assert!(stdout.is_empty());
}

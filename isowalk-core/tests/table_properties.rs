//! Property-based tests for the walk-time and station tables.

use std::time::Duration;

use geo::Coord;
use isowalk_core::{StationRecord, WalkTimeRecord, station_table, walktime_table};
use proptest::prelude::*;

fn walk_record(index: usize, seconds: Option<u32>) -> WalkTimeRecord {
    WalkTimeRecord {
        id: format!("poi-{index}"),
        walktime: seconds.map_or(Duration::MAX, |s| Duration::from_secs(u64::from(s))),
        location: Coord { x: 0.0, y: 0.0 },
    }
}

fn station_record(index: usize, minutes: u16) -> StationRecord {
    StationRecord {
        name: format!("station-{index}"),
        walktime: Duration::from_secs(u64::from(minutes) * 60),
        station_category: String::new(),
        latitude: 47.0,
        longitude: 8.0,
        coordinate_system: "WGS84".to_owned(),
        transport_category: "tram".to_owned(),
        id: index.to_string(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: adjacent walk-time rows never decrease, and no row is lost.
    #[test]
    fn walktime_table_is_sorted(
        times in prop::collection::vec(prop::option::weighted(0.9, 0_u32..10_000), 1..40),
    ) {
        let records: Vec<_> = times
            .iter()
            .enumerate()
            .map(|(index, seconds)| walk_record(index, *seconds))
            .collect();
        let table = walktime_table(records).expect("non-empty input");

        prop_assert_eq!(table.len(), times.len());
        for pair in table.windows(2) {
            prop_assert!(pair[0].walktime <= pair[1].walktime);
        }
    }

    /// Property: adjacent station rows never decrease.
    #[test]
    fn station_table_is_sorted(minutes in prop::collection::vec(0_u16..60, 0..30)) {
        let table = station_table(
            minutes
                .iter()
                .enumerate()
                .map(|(index, m)| station_record(index, *m)),
        );

        prop_assert_eq!(table.len(), minutes.len());
        for pair in table.windows(2) {
            prop_assert!(pair[0].walktime <= pair[1].walktime);
        }
    }
}

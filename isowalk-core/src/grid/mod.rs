//! Parse the service's gzipped ASCII grid dialect into a [`RasterGrid`].
//!
//! The text starts with six `key value` header lines in any order:
//! `ncols`, `nrows`, one of `xllcorner`/`xllcenter`, one of
//! `yllcorner`/`yllcenter`, `cellsize` and `nodata_value`. A flat,
//! whitespace-separated sequence of `ncols * nrows` numbers follows.

mod error;
mod header;
mod raster;

pub use error::GridError;
pub use header::{Anchor, Axis, GridHeader};
pub use raster::RasterGrid;

use header::{HeaderFields, HeaderKey, parse_float};

/// Number of header lines preceding the cell values.
pub const HEADER_LINES: usize = 6;

/// Upper bound on the up-front cell allocation; a header may lie.
const MAX_PREALLOCATED_CELLS: usize = 1 << 20;

/// Parse grid text into a [`RasterGrid`].
///
/// Blank lines are skipped. Header keys are matched case-insensitively but
/// exactly, so a key must be one of the six recognised names, and each
/// header line holds exactly one key and one value.
///
/// # Errors
///
/// Returns a [`GridError`] describing the first problem found: a short or
/// unrecognised header, an axis without an anchor, an unparsable number, or
/// a cell count that differs from `ncols * nrows`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use isowalk_core::parse_grid;
///
/// # fn main() -> Result<(), isowalk_core::GridError> {
/// let text = "ncols 2\nnrows 2\nxllcorner 0\nyllcorner 0\ncellsize 10\nNODATA_value -9999\n\
///             1 -9999\n3 4\n";
/// let grid = parse_grid(text)?;
/// assert_eq!(grid.origin(), Coord { x: 5.0, y: 5.0 });
/// assert!(grid.is_missing(0, 1));
/// # Ok(())
/// # }
/// ```
pub fn parse_grid(text: &str) -> Result<RasterGrid, GridError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let mut fields = HeaderFields::default();
    for found in 0..HEADER_LINES {
        let (line_no, line) = lines.next().ok_or(GridError::MissingHeaderLines { found })?;
        let (key, value) = split_header_line(line_no, line)?;
        fields.insert(line_no, key, value)?;
    }
    let header = fields.finish()?;

    let mut values = Vec::with_capacity(header.cell_count().min(MAX_PREALLOCATED_CELLS));
    for (line_no, line) in lines {
        for token in line.split_whitespace() {
            values.push(parse_float(line_no, token)?);
        }
    }
    log::debug!(
        "parsed {}x{} grid header, {} cell values",
        header.ncols(),
        header.nrows(),
        values.len()
    );
    RasterGrid::from_values(header, values)
}

fn split_header_line(line_no: usize, line: &str) -> Result<(HeaderKey, &str), GridError> {
    let unknown = || GridError::UnknownHeaderKey {
        line: line_no,
        entry: line.trim().to_owned(),
    };
    let mut tokens = line.split_whitespace();
    let key = tokens.next().and_then(HeaderKey::parse).ok_or_else(unknown)?;
    let value = tokens.next().ok_or_else(unknown)?;
    if tokens.next().is_some() {
        return Err(unknown());
    }
    Ok((key, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::rstest;

    const SCENARIO: &str = "ncols 2\nnrows 2\nxllcorner 0\nyllcorner 0\ncellsize 10\n\
                            nodata_value -9999\n1 -9999 3 4\n";

    #[rstest]
    fn parses_reference_grid() {
        let grid = parse_grid(SCENARIO).expect("grid should parse");
        assert_eq!(grid.ncols(), 2);
        assert_eq!(grid.nrows(), 2);
        assert_eq!(grid.cell_size(), 10.0);
        assert_eq!(grid.origin(), Coord { x: 5.0, y: 5.0 });
        assert!(grid.is_missing(0, 1));
        assert_eq!(grid.value(0, 0), Some(1.0));
        assert_eq!(grid.value(1, 0), Some(3.0));
        assert_eq!(grid.value(1, 1), Some(4.0));
    }

    #[rstest]
    fn accepts_header_lines_in_any_order() {
        let text = "CELLSIZE 10\nYLLCENTER 5\nNODATA_VALUE -1\nNROWS 1\nXLLCENTER 5\nNCOLS 3\n\
                    0 1 2";
        let grid = parse_grid(text).expect("grid should parse");
        assert_eq!(grid.header().corner(), Coord { x: 0.0, y: 0.0 });
        assert_eq!(grid.ncols(), 3);
        assert_eq!(grid.value(0, 2), Some(2.0));
    }

    #[rstest]
    fn mixes_corner_and_center_anchors() {
        let text = "ncols 1\nnrows 1\nxllcorner 100\nyllcenter 250\ncellsize 50\n\
                    nodata_value -9999\n42";
        let grid = parse_grid(text).expect("grid should parse");
        assert_eq!(grid.header().corner(), Coord { x: 100.0, y: 225.0 });
        assert_eq!(grid.header().center(), Coord { x: 125.0, y: 250.0 });
    }

    #[rstest]
    fn skips_blank_lines_and_spreads_values_across_lines() {
        let text = "\nncols 2\n\nnrows 2\nxllcorner 0\nyllcorner 0\ncellsize 1\n\
                    nodata_value -1\n\n1\n2\n\n3 4\n";
        let grid = parse_grid(text).expect("grid should parse");
        assert_eq!(grid.cells(), &[Some(1.0), Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[rstest]
    #[case("ncols 2\nnrows 2\n", 2)]
    #[case("", 0)]
    fn reports_short_header(#[case] text: &str, #[case] found: usize) {
        let err = parse_grid(text).expect_err("should fail");
        assert_eq!(err, GridError::MissingHeaderLines { found });
    }

    #[rstest]
    fn rejects_unknown_header_key() {
        let text = "ncols 2\nnrows 2\nxllcorner 0\nyllcorner 0\nresolution 10\n\
                    nodata_value -9999\n1 2 3 4";
        let err = parse_grid(text).expect_err("should fail");
        assert_eq!(
            err,
            GridError::UnknownHeaderKey {
                line: 5,
                entry: "resolution 10".to_owned(),
            }
        );
    }

    #[rstest]
    fn does_not_treat_values_containing_key_names_as_keys() {
        let text = "ncols 2\nnrows 2\nxllcorner 0\nyllcorner 0\ncellsize 10\nnrows_total 4\n1 2 3 4";
        let err = parse_grid(text).expect_err("should fail");
        assert!(matches!(err, GridError::UnknownHeaderKey { line: 6, .. }));
    }

    #[rstest]
    fn rejects_header_key_without_value() {
        let text = "ncols\nnrows 2\nxllcorner 0\nyllcorner 0\ncellsize 10\nnodata_value 0\n1 2";
        let err = parse_grid(text).expect_err("should fail");
        assert!(matches!(err, GridError::UnknownHeaderKey { line: 1, .. }));
    }

    #[rstest]
    #[case("ncols 2 junk\nnrows 1\nxllcorner 0\nyllcorner 0\ncellsize 1\nnodata_value -1\n1 2", 1, "ncols 2 junk")]
    #[case("ncols 2\nnrows 1 7\nxllcorner 0\nyllcorner 0\ncellsize 1\nnodata_value -1\n1 2", 2, "nrows 1 7")]
    fn rejects_header_line_with_trailing_tokens(
        #[case] text: &str,
        #[case] line: usize,
        #[case] entry: &str,
    ) {
        let err = parse_grid(text).expect_err("should fail");
        assert_eq!(
            err,
            GridError::UnknownHeaderKey {
                line,
                entry: entry.to_owned(),
            }
        );
    }

    #[rstest]
    fn rejects_both_anchors_for_one_axis() {
        let text = "ncols 1\nnrows 1\nxllcorner 0\nxllcenter 5\ncellsize 10\nnodata_value 0\n1";
        let err = parse_grid(text).expect_err("should fail");
        assert_eq!(
            err,
            GridError::DuplicateHeaderKey {
                line: 4,
                key: "xllcenter",
            }
        );
    }

    #[rstest]
    fn repeated_anchor_takes_the_place_of_the_other_axis() {
        let text = "ncols 1\nnrows 1\nxllcorner 0\ncellsize 10\nnodata_value 0\nxllcorner 0\n1";
        let err = parse_grid(text).expect_err("should fail");
        assert_eq!(
            err,
            GridError::DuplicateHeaderKey {
                line: 6,
                key: "xllcorner",
            }
        );
    }

    #[rstest]
    fn rejects_non_numeric_cell() {
        let text = "ncols 2\nnrows 1\nxllcorner 0\nyllcorner 0\ncellsize 1\nnodata_value 0\n1 abc";
        let err = parse_grid(text).expect_err("should fail");
        assert_eq!(
            err,
            GridError::InvalidNumber {
                line: 7,
                token: "abc".to_owned(),
            }
        );
    }

    #[rstest]
    #[case("1 2 3")]
    #[case("1 2 3 4 5")]
    fn rejects_cell_count_mismatch(#[case] cells: &str) {
        let text = format!(
            "ncols 2\nnrows 2\nxllcorner 0\nyllcorner 0\ncellsize 1\nnodata_value 0\n{cells}"
        );
        let err = parse_grid(&text).expect_err("should fail");
        assert!(matches!(
            err,
            GridError::DimensionMismatch { expected: 4, .. }
        ));
    }
}

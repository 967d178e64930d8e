//! Data-URI payload decoding.
//!
//! The service embeds binary artefacts in JSON strings of the form
//! `data:<mime>;base64,<data>`. The MIME prefix is not trusted; instead the
//! decoder looks for the base64 rendering of the artefact's magic signature
//! and decodes from there to the end of the string. Which signature to look
//! for is chosen by the calling operation, never guessed from the content.

use std::io::Read;

use base64::{Engine as _, engine::general_purpose};
use flate2::read::GzDecoder;
use isowalk_core::WalkError;

/// Base64 rendering of the PNG signature `89 50 4E 47 0D 0A 1A 0A`.
pub const PNG_MARKER: &str = "iVBORw0KGgo";

/// Base64 rendering of the gzip member header `1F 8B 08`.
pub const GZIP_MARKER: &str = "H4sI";

/// An encoded payload tagged with the artefact it is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload<'a> {
    /// A PNG raster image.
    Png(&'a str),
    /// A gzip-compressed ASCII grid.
    GzipGrid(&'a str),
}

impl<'a> Payload<'a> {
    /// Magic marker the payload must contain.
    #[must_use]
    pub const fn marker(&self) -> &'static str {
        match self {
            Self::Png(_) => PNG_MARKER,
            Self::GzipGrid(_) => GZIP_MARKER,
        }
    }

    const fn encoded(&self) -> &'a str {
        match self {
            Self::Png(text) | Self::GzipGrid(text) => text,
        }
    }

    /// Substring from the first occurrence of the marker to the end.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::MalformedPayload`] when the marker is absent.
    pub fn from_marker(&self) -> Result<&'a str, WalkError> {
        let encoded = self.encoded();
        encoded
            .find(self.marker())
            .and_then(|start| encoded.get(start..))
            .ok_or_else(|| WalkError::malformed(format!("marker `{}` not found", self.marker())))
    }

    /// Base64-decode the payload from its marker onwards.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::MalformedPayload`] when the marker is absent or
    /// the remainder is not valid base64.
    pub fn decode_bytes(&self) -> Result<Vec<u8>, WalkError> {
        let data = self.from_marker()?;
        general_purpose::STANDARD
            .decode(data)
            .map_err(|err| WalkError::malformed(format!("invalid base64: {err}")))
    }
}

/// Decode a PNG payload to the raw image bytes.
///
/// # Errors
///
/// Returns [`WalkError::MalformedPayload`] when the PNG marker is absent or
/// the data is not valid base64.
///
/// # Examples
/// ```
/// use isowalk_data::payload::decode_png;
///
/// let bytes = decode_png("data:image/png;base64,iVBORw0KGgo=")?;
/// assert_eq!(bytes, b"\x89PNG\r\n\x1a\n");
/// # Ok::<(), isowalk_core::WalkError>(())
/// ```
pub fn decode_png(encoded: &str) -> Result<Vec<u8>, WalkError> {
    Payload::Png(encoded).decode_bytes()
}

/// Decode a gzipped grid payload to the grid text.
///
/// Decompression runs over an in-memory buffer that is dropped on every
/// exit path.
///
/// # Errors
///
/// Returns [`WalkError::MalformedPayload`] when the gzip marker is absent,
/// the data is not valid base64, the stream does not inflate, or the
/// inflated text is not UTF-8.
pub fn decode_grid_text(encoded: &str) -> Result<String, WalkError> {
    let compressed = Payload::GzipGrid(encoded).decode_bytes()?;
    let mut text = String::new();
    GzDecoder::new(compressed.as_slice())
        .read_to_string(&mut text)
        .map_err(|err| WalkError::malformed(format!("grid does not decompress: {err}")))?;
    log::debug!(
        "inflated grid payload from {} to {} bytes",
        compressed.len(),
        text.len()
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{Compression, write::GzEncoder};
    use rstest::rstest;
    use std::io::Write;

    fn gzip_data_uri(text: &str) -> String {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).expect("compress");
        let bytes = encoder.finish().expect("finish gzip");
        format!(
            "data:application/gzip;base64,{}",
            general_purpose::STANDARD.encode(bytes)
        )
    }

    #[rstest]
    fn gzip_marker_matches_gzip_header() {
        let encoded = general_purpose::STANDARD.encode([0x1f, 0x8b, 0x08]);
        assert_eq!(encoded, GZIP_MARKER);
    }

    #[rstest]
    fn png_marker_prefixes_png_signature() {
        let encoded = general_purpose::STANDARD.encode(b"\x89PNG\r\n\x1a\n");
        assert!(encoded.starts_with(PNG_MARKER));
    }

    #[rstest]
    fn decodes_png_after_data_uri_prefix() {
        let image = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
        let uri = format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(image)
        );
        assert_eq!(decode_png(&uri).expect("decode"), image);
    }

    #[rstest]
    fn inflates_grid_text() {
        let text = "ncols 1\nnrows 1\nxllcorner 0\nyllcorner 0\ncellsize 1\nnodata_value -1\n5\n";
        let uri = gzip_data_uri(text);
        assert_eq!(decode_grid_text(&uri).expect("decode"), text);
    }

    #[rstest]
    #[case::empty_gzip_uri("data:application/gzip;base64,")]
    #[case::empty("")]
    #[case::png_given_for_grid("data:image/png;base64,iVBORw0KGgo=")]
    fn grid_without_marker_is_malformed(#[case] encoded: &str) {
        let err = decode_grid_text(encoded).expect_err("marker is missing");
        assert!(matches!(err, WalkError::MalformedPayload { .. }));
    }

    #[rstest]
    fn png_without_marker_is_malformed() {
        let uri = gzip_data_uri("not an image");
        let err = decode_png(&uri).expect_err("marker is missing");
        assert!(matches!(err, WalkError::MalformedPayload { .. }));
    }

    #[rstest]
    fn truncated_gzip_stream_is_malformed() {
        let uri = gzip_data_uri("ncols 1\nnrows 1\n");
        let truncated = &uri[..uri.len() - 8];
        let err = decode_grid_text(truncated).expect_err("stream is cut short");
        assert!(matches!(err, WalkError::MalformedPayload { .. }));
    }

    #[rstest]
    fn invalid_base64_after_marker_is_malformed() {
        let err = decode_png("data:image/png;base64,iVBORw0KGgo!!").expect_err("bad base64");
        assert!(matches!(err, WalkError::MalformedPayload { .. }));
    }
}

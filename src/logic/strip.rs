// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The ExitExif Authors

//! JPEG metadata removal over a parsed marker-segment model.
//!
//! Responsibilities:
//! - Split a JPEG into its header segments and the opaque image data that
//!   starts at the first Start-Of-Scan marker.
//! - Classify header segments (Exif, XMP, IPTC, comments, everything else).
//! - Re-serialize without the metadata kinds selected by a [`StripPolicy`],
//!   writing a single empty Exif block in place of the original one.
//!
//! Only header segments are ever rewritten; the image data is copied verbatim.

use thiserror::Error;

const SOI: u8 = 0xD8;
const EOI: u8 = 0xD9;
const SOS: u8 = 0xDA;
const TEM: u8 = 0x01;
const APP0: u8 = 0xE0;
const APP1: u8 = 0xE1;
const APP13: u8 = 0xED;
const COM: u8 = 0xFE;

const EXIF_HEADER: &[u8] = b"Exif\0";
const XMP_HEADER: &[u8] = b"http://ns.adobe.com/xap/1.0/\0";
const XMP_EXTENSION_HEADER: &[u8] = b"http://ns.adobe.com/xmp/extension/\0";
const PHOTOSHOP_HEADER: &[u8] = b"Photoshop 3.0\0";

/// Exif payload with a big-endian TIFF header and an IFD0 holding zero entries.
pub const EMPTY_EXIF_PAYLOAD: &[u8] = b"Exif\0\0MM\0\x2a\0\0\0\x08\0\0\0\0\0\0";

/// Reasons a buffer cannot be sanitized.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StripError {
    #[error("data is not a JPEG image")]
    NotJpeg,
    #[error("JPEG segment at byte offset {offset} is truncated")]
    Truncated { offset: usize },
    #[error("expected a JPEG marker at byte offset {offset}")]
    UnexpectedByte { offset: usize },
    #[error("JPEG header ends without image data")]
    MissingImageData,
}

/// Semantic class of a header segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Jfif,
    Exif,
    Xmp,
    XmpExtended,
    Iptc,
    Comment,
    Other(u8),
}

/// One header segment, borrowing its payload from the source buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment<'a> {
    pub marker: u8,
    /// Payload without the length prefix; `None` for standalone markers.
    pub payload: Option<&'a [u8]>,
}

impl Segment<'_> {
    pub fn kind(&self) -> SegmentKind {
        let payload = self.payload.unwrap_or_default();
        match self.marker {
            APP0 if payload.starts_with(b"JFIF\0") || payload.starts_with(b"JFXX\0") => {
                SegmentKind::Jfif
            }
            APP1 if payload.starts_with(EXIF_HEADER) => SegmentKind::Exif,
            APP1 if payload.starts_with(XMP_HEADER) => SegmentKind::Xmp,
            APP1 if payload.starts_with(XMP_EXTENSION_HEADER) => SegmentKind::XmpExtended,
            APP13 if payload.starts_with(PHOTOSHOP_HEADER) => SegmentKind::Iptc,
            COM => SegmentKind::Comment,
            other => SegmentKind::Other(other),
        }
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        out.push(0xFF);
        out.push(self.marker);
        if let Some(payload) = self.payload {
            // Parsed payloads came from a valid u16 length, so this cannot overflow.
            let len = (payload.len() + 2) as u16;
            out.extend_from_slice(&len.to_be_bytes());
            out.extend_from_slice(payload);
        }
    }
}

/// Which metadata kinds are removed.
///
/// Exif is replaced by [`EMPTY_EXIF_PAYLOAD`] rather than dropped outright.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StripPolicy {
    pub exif: bool,
    pub xmp: bool,
    pub iptc: bool,
    pub comments: bool,
}

impl Default for StripPolicy {
    fn default() -> Self {
        Self {
            exif: true,
            xmp: true,
            iptc: true,
            comments: true,
        }
    }
}

impl StripPolicy {
    fn removes(&self, kind: SegmentKind) -> bool {
        match kind {
            SegmentKind::Exif => self.exif,
            SegmentKind::Xmp | SegmentKind::XmpExtended => self.xmp,
            SegmentKind::Iptc => self.iptc,
            SegmentKind::Comment => self.comments,
            SegmentKind::Jfif | SegmentKind::Other(_) => false,
        }
    }
}

/// A JPEG split into header segments and the trailing image data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JpegFile<'a> {
    segments: Vec<Segment<'a>>,
    image_data: &'a [u8],
}

impl<'a> JpegFile<'a> {
    /// Parse the header of a JPEG stream.
    ///
    /// Parsing stops at the first SOS (or EOI) marker; that marker and
    /// everything after it is kept as opaque image data.
    ///
    /// # Errors
    ///
    /// - [`StripError::NotJpeg`] when the input is shorter than a marker
    ///   segment or the SOI marker is missing.
    /// - [`StripError::Truncated`] when a segment runs past the end.
    /// - [`StripError::UnexpectedByte`] when the header holds a non-marker byte.
    /// - [`StripError::MissingImageData`] when no SOS or EOI marker follows the header.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, StripError> {
        if bytes.len() < 4 || bytes[0] != 0xFF || bytes[1] != SOI {
            return Err(StripError::NotJpeg);
        }

        let mut segments = Vec::new();
        let mut pos = 2usize;
        let image_data = loop {
            if pos >= bytes.len() {
                return Err(StripError::MissingImageData);
            }
            if bytes[pos] != 0xFF {
                return Err(StripError::UnexpectedByte { offset: pos });
            }
            if pos + 1 >= bytes.len() {
                return Err(StripError::Truncated { offset: pos });
            }

            let marker = bytes[pos + 1];
            match marker {
                // Fill byte before a marker.
                0xFF => {
                    pos += 1;
                    continue;
                }
                SOS | EOI => break &bytes[pos..],
                TEM | SOI | 0x00 | 0xD0..=0xD7 => {
                    segments.push(Segment {
                        marker,
                        payload: None,
                    });
                    pos += 2;
                    continue;
                }
                _ => {}
            }

            if pos + 4 > bytes.len() {
                return Err(StripError::Truncated { offset: pos });
            }
            let len = u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]) as usize;
            if len < 2 || pos + 2 + len > bytes.len() {
                return Err(StripError::Truncated { offset: pos });
            }

            segments.push(Segment {
                marker,
                payload: Some(&bytes[pos + 4..pos + 2 + len]),
            });
            pos += 2 + len;
        };

        Ok(Self {
            segments,
            image_data,
        })
    }

    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// Bytes from the first SOS/EOI marker to the end of input.
    pub fn image_data(&self) -> &'a [u8] {
        self.image_data
    }

    /// Segment kinds in file order.
    pub fn kinds(&self) -> Vec<SegmentKind> {
        self.segments.iter().map(Segment::kind).collect()
    }

    /// Serialize the file without the segments `policy` removes.
    ///
    /// When Exif is removed, one empty Exif block is written after SOI and
    /// any leading JFIF/JFXX segments, so repeated runs produce identical bytes.
    pub fn to_stripped_bytes(&self, policy: &StripPolicy) -> Vec<u8> {
        let kept: Vec<&Segment<'a>> = self
            .segments
            .iter()
            .filter(|segment| !policy.removes(segment.kind()))
            .collect();
        let leading_jfif = kept
            .iter()
            .take_while(|segment| segment.kind() == SegmentKind::Jfif)
            .count();

        let mut out = Vec::with_capacity(self.image_data.len() + 1024);
        out.push(0xFF);
        out.push(SOI);
        for segment in &kept[..leading_jfif] {
            segment.write_to(&mut out);
        }
        if policy.exif {
            Segment {
                marker: APP1,
                payload: Some(EMPTY_EXIF_PAYLOAD),
            }
            .write_to(&mut out);
        }
        for segment in &kept[leading_jfif..] {
            segment.write_to(&mut out);
        }
        out.extend_from_slice(self.image_data);
        out
    }
}

/// Strip all embedded metadata using the default policy.
pub fn strip_metadata(bytes: &[u8]) -> Result<Vec<u8>, StripError> {
    strip_metadata_with(bytes, &StripPolicy::default())
}

/// Strip the metadata kinds selected by `policy`.
pub fn strip_metadata_with(bytes: &[u8], policy: &StripPolicy) -> Result<Vec<u8>, StripError> {
    let parsed = JpegFile::parse(bytes)?;
    let removed = parsed
        .segments()
        .iter()
        .filter(|segment| policy.removes(segment.kind()))
        .count();
    tracing::debug!(
        segments = parsed.segments().len(),
        removed,
        "rewrote JPEG header"
    );
    Ok(parsed.to_stripped_bytes(policy))
}

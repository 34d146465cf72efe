// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The ExitExif Authors

//! Test-only JPEG builders with hand-assembled metadata segments.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

pub const CAMERA_MAKE: &str = "Acme";
pub const CAMERA_MODEL: &str = "Z-42";
pub const CAPTURE_TIME: &str = "2024:01:02 03:04:05";
pub const COMMENT: &[u8] = b"shot at home";

const ASCII: u16 = 2;
const LONG: u16 = 4;
const RATIONAL: u16 = 5;

/// Baseline JPEG straight out of the encoder (no Exif).
pub fn plain_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 5 % 256) as u8, (y * 7 % 256) as u8, 128])
    });
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut out, ImageFormat::Jpeg)
        .expect("jpeg encoded");
    out.into_inner()
}

/// JPEG carrying an Exif block with camera, timestamp, and GPS tags right after SOI.
pub fn jpeg_with_exif(width: u32, height: u32) -> Vec<u8> {
    insert_after_soi(&plain_jpeg(width, height), &exif_segment())
}

/// JPEG carrying Exif, XMP, and a comment segment.
pub fn jpeg_with_all_metadata(width: u32, height: u32) -> Vec<u8> {
    let with_exif = jpeg_with_exif(width, height);
    let with_xmp = insert_after_soi(&with_exif, &xmp_segment());
    insert_after_soi(&with_xmp, &segment(0xFE, COMMENT))
}

pub fn insert_after_soi(jpeg: &[u8], segment: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(jpeg.len() + segment.len());
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(segment);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// Marker segment with a big-endian length prefix.
pub fn segment(marker: u8, payload: &[u8]) -> Vec<u8> {
    let len = (payload.len() + 2) as u16;
    let mut out = vec![0xFF, marker];
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(payload);
    out
}

pub fn exif_segment() -> Vec<u8> {
    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(&tiff_block());
    segment(0xE1, &payload)
}

pub fn xmp_segment() -> Vec<u8> {
    let mut payload = b"http://ns.adobe.com/xap/1.0/\0".to_vec();
    payload.extend_from_slice(b"<x:xmpmeta xmlns:x='adobe:ns:meta/'/>");
    segment(0xE1, &payload)
}

/// Little-endian TIFF structure: IFD0 (Make, Model, DateTime, GPS pointer) and a GPS IFD.
fn tiff_block() -> Vec<u8> {
    let ifd0_start = 8usize;
    let ifd0_entries = |gps_offset: u32| {
        vec![
            (0x010F, ASCII, ascii(CAMERA_MAKE)),
            (0x0110, ASCII, ascii(CAMERA_MODEL)),
            (0x0132, ASCII, ascii(CAPTURE_TIME)),
            (0x8825, LONG, gps_offset.to_le_bytes().to_vec()),
        ]
    };
    let ifd0_len = ifd(&ifd0_entries(0), ifd0_start).len();
    let gps_start = ifd0_start + ifd0_len;
    let ifd0 = ifd(&ifd0_entries(gps_start as u32), ifd0_start);

    let mut latitude = Vec::new();
    for (num, den) in [(48u32, 1u32), (51, 1), (0, 1)] {
        latitude.extend_from_slice(&num.to_le_bytes());
        latitude.extend_from_slice(&den.to_le_bytes());
    }
    let gps = ifd(
        &[(0x0001, ASCII, ascii("N")), (0x0002, RATIONAL, latitude)],
        gps_start,
    );

    let mut out = b"II\x2A\x00".to_vec();
    out.extend_from_slice(&(ifd0_start as u32).to_le_bytes());
    out.extend_from_slice(&ifd0);
    out.extend_from_slice(&gps);
    out
}

fn ascii(text: &str) -> Vec<u8> {
    let mut bytes = text.as_bytes().to_vec();
    bytes.push(0);
    bytes
}

/// Serialize one IFD located at `start`, followed by its out-of-line values.
fn ifd(entries: &[(u16, u16, Vec<u8>)], start: usize) -> Vec<u8> {
    let mut table = Vec::new();
    let mut data = Vec::new();
    let data_start = start + 2 + entries.len() * 12 + 4;

    table.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for (tag, kind, value) in entries {
        let count = match *kind {
            RATIONAL => value.len() / 8,
            LONG => value.len() / 4,
            _ => value.len(),
        } as u32;
        table.extend_from_slice(&tag.to_le_bytes());
        table.extend_from_slice(&kind.to_le_bytes());
        table.extend_from_slice(&count.to_le_bytes());
        if value.len() <= 4 {
            let mut inline = value.clone();
            inline.resize(4, 0);
            table.extend_from_slice(&inline);
        } else {
            let offset = (data_start + data.len()) as u32;
            table.extend_from_slice(&offset.to_le_bytes());
            data.extend_from_slice(value);
            if data.len() % 2 == 1 {
                data.push(0);
            }
        }
    }
    table.extend_from_slice(&0u32.to_le_bytes());
    table.extend_from_slice(&data);
    table
}

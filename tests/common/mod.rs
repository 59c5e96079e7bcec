//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use seasonal_gallery::core::scanner::CandidateFile;
use std::io::Cursor;
use std::time::UNIX_EPOCH;

/// Tags to embed in a fixture JPEG
#[derive(Default)]
pub struct Tags<'a> {
    pub date_time_original: Option<&'a str>,
    pub date_time_digitized: Option<&'a str>,
    pub make: Option<&'a str>,
    pub model: Option<&'a str>,
    /// Degrees, minutes, seconds and hemisphere ref
    pub gps_latitude: Option<([u32; 3], &'a str)>,
    pub gps_longitude: Option<([u32; 3], &'a str)>,
}

pub fn plain_jpeg(width: u32, height: u32) -> Vec<u8> {
    let pixels = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x * 7) as u8, (y * 5) as u8, 90])
    });
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(pixels)
        .write_to(&mut buffer, ImageFormat::Jpeg)
        .unwrap();
    buffer.into_inner()
}

fn ascii(tag: Tag, text: &str) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![text.as_bytes().to_vec()]),
    }
}

fn dms(tag: Tag, parts: [u32; 3]) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Rational(parts.iter().map(|&num| Rational { num, denom: 1 }).collect()),
    }
}

/// A small JPEG carrying the given EXIF tags in an APP1 segment
pub fn exif_jpeg(tags: &Tags<'_>) -> Vec<u8> {
    let mut fields = Vec::new();
    if let Some(ts) = tags.date_time_original {
        fields.push(ascii(Tag::DateTimeOriginal, ts));
    }
    if let Some(ts) = tags.date_time_digitized {
        fields.push(ascii(Tag::DateTimeDigitized, ts));
    }
    if let Some(make) = tags.make {
        fields.push(ascii(Tag::Make, make));
    }
    if let Some(model) = tags.model {
        fields.push(ascii(Tag::Model, model));
    }
    if let Some((lat, lat_ref)) = tags.gps_latitude {
        fields.push(dms(Tag::GPSLatitude, lat));
        fields.push(ascii(Tag::GPSLatitudeRef, lat_ref));
    }
    if let Some((lon, lon_ref)) = tags.gps_longitude {
        fields.push(dms(Tag::GPSLongitude, lon));
        fields.push(ascii(Tag::GPSLongitudeRef, lon_ref));
    }

    let mut writer = Writer::new();
    for field in &fields {
        writer.push_field(field);
    }
    let mut tiff = Cursor::new(Vec::new());
    writer.write(&mut tiff, false).unwrap();
    let tiff = tiff.into_inner();

    let jpeg = plain_jpeg(24, 16);
    let segment_len = (2 + 6 + tiff.len()) as u16;

    let mut out = Vec::with_capacity(jpeg.len() + tiff.len() + 10);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// JPEG captured at `timestamp` ("YYYY:MM:DD HH:MM:SS")
pub fn dated_jpeg(timestamp: &str) -> Vec<u8> {
    exif_jpeg(&Tags {
        date_time_original: Some(timestamp),
        ..Default::default()
    })
}

pub fn candidate(name: &str, bytes: Vec<u8>) -> CandidateFile {
    CandidateFile::from_bytes(name, "image/jpeg", bytes, UNIX_EPOCH)
}

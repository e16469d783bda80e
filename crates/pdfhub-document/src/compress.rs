// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Compress service — re-encode embedded raster images as JPEG at a
// tier-selected quality, then strip unreferenced objects.

use std::collections::BTreeSet;
use std::io::Read;

use flate2::read::ZlibDecoder;
use image::DynamicImage;
use lopdf::{Dictionary, Document, Object, ObjectId};
use pdfhub_core::error::{PdfHubError, Result};
use pdfhub_core::types::CompressionTier;
use tracing::{debug, info, instrument};

/// Metadata of an image XObject stream.
#[derive(Debug, Clone)]
struct ImageMeta {
    width: u32,
    height: u32,
    bits_per_component: u8,
    /// `None` when /ColorSpace exists but is not a plain name (ICCBased,
    /// Indexed, Separation, ...); such images are never re-encoded.
    color_space: Option<String>,
    filter: Option<String>,
}

/// Compress a PDF by re-encoding its embedded images at the tier's JPEG
/// quality.
///
/// Pages, text, and vector content are untouched. Images that cannot be
/// decoded (unsupported filters, exotic color spaces) are left as they
/// are, so the output is never worse than the input apart from JPEG loss
/// on the images that were re-encoded.
#[instrument(skip(bytes), fields(bytes_len = bytes.len()))]
pub fn compress(bytes: &[u8], tier: CompressionTier) -> Result<Vec<u8>> {
    let reader = crate::pdf::PdfReader::from_bytes(bytes)?;
    let mut document = reader.into_document();

    let image_ids = collect_image_xobjects(&document);
    let mut reencoded = 0usize;
    for id in &image_ids {
        match reencode_image(&mut document, *id, tier.quality()) {
            Ok(true) => reencoded += 1,
            Ok(false) => {}
            Err(err) => {
                // A single stubborn image must not fail the whole document.
                debug!(object = ?id, %err, "image left unchanged");
            }
        }
    }

    document.prune_objects();
    document.compress();

    let mut buffer = Vec::new();
    document
        .save_to(&mut buffer)
        .map_err(|err| PdfHubError::Compress(format!("could not write result: {err}")))?;

    info!(
        tier = tier.name(),
        images = image_ids.len(),
        reencoded,
        input_bytes = bytes.len(),
        output_bytes = buffer.len(),
        "PDF compressed"
    );
    Ok(buffer)
}

/// IDs of every image XObject referenced from any page's resources,
/// deduplicated across pages.
fn collect_image_xobjects(document: &Document) -> Vec<ObjectId> {
    let mut ids = BTreeSet::new();

    for page_id in document.get_pages().values() {
        let Some(page_dict) = document
            .get_object(*page_id)
            .ok()
            .and_then(|obj| obj.as_dict().ok())
        else {
            continue;
        };
        let Some(resources) = page_dict
            .get(b"Resources")
            .ok()
            .and_then(|obj| resolve_dict(document, obj))
        else {
            continue;
        };
        let Some(xobjects) = resources
            .get(b"XObject")
            .ok()
            .and_then(|obj| resolve_dict(document, obj))
        else {
            continue;
        };

        for (_, entry) in xobjects.iter() {
            let Ok(id) = entry.as_reference() else {
                continue;
            };
            let is_image = document
                .get_object(id)
                .ok()
                .and_then(|obj| obj.as_stream().ok())
                .and_then(|stream| stream.dict.get(b"Subtype").ok())
                .and_then(|subtype| subtype.as_name().ok())
                .is_some_and(|name| name == b"Image");
            if is_image {
                ids.insert(id);
            }
        }
    }

    ids.into_iter().collect()
}

/// Follow one level of indirection to a dictionary.
fn resolve_dict<'a>(document: &'a Document, object: &'a Object) -> Option<&'a Dictionary> {
    match object {
        Object::Dictionary(dict) => Some(dict),
        Object::Reference(id) => document
            .get_object(*id)
            .ok()
            .and_then(|obj| obj.as_dict().ok()),
        _ => None,
    }
}

/// Decode one image XObject and replace it with a JPEG at `quality`.
///
/// Returns `Ok(false)` when the image is deliberately skipped: CMYK and
/// other unsupported color spaces, filters we cannot decode, or a
/// re-encoding that would be larger than the original stream.
fn reencode_image(document: &mut Document, id: ObjectId, quality: u8) -> Result<bool> {
    let (meta, decoded, original_len) = {
        let stream = document
            .get_object(id)
            .and_then(|obj| obj.as_stream())
            .map_err(|err| PdfHubError::Compress(format!("image stream unavailable: {err}")))?;
        let meta = read_image_meta(&stream.dict)?;

        // CMYK and the composite color-space forms have no safe path
        // through the `image` crate; guessing a channel count here would
        // corrupt pixels.
        let supported = meta
            .color_space
            .as_deref()
            .is_some_and(|cs| channels_for(cs).is_some());
        if !supported {
            debug!(color_space = ?meta.color_space, "unsupported color space, skipped");
            return Ok(false);
        }

        let Some(decoded) = decode_image_stream(stream, &meta)? else {
            return Ok(false);
        };
        (meta, decoded, stream.content.len())
    };

    let grayscale = meta.color_space.as_deref() == Some("DeviceGray");
    let mut jpeg = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, quality);
    let encode_result = if grayscale {
        decoded.to_luma8().write_with_encoder(encoder)
    } else {
        decoded.to_rgb8().write_with_encoder(encoder)
    };
    encode_result.map_err(|err| PdfHubError::Compress(format!("JPEG encode failed: {err}")))?;

    // Keep the original if re-encoding gained nothing.
    if jpeg.len() >= original_len {
        return Ok(false);
    }

    let Ok(Object::Stream(stream)) = document.get_object_mut(id) else {
        return Ok(false);
    };
    stream.dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));
    stream.dict.set(
        "ColorSpace",
        Object::Name(if grayscale {
            b"DeviceGray".to_vec()
        } else {
            b"DeviceRGB".to_vec()
        }),
    );
    stream.dict.set("BitsPerComponent", Object::Integer(8));
    stream.dict.remove(b"DecodeParms");
    stream.set_content(jpeg);
    Ok(true)
}

fn read_image_meta(dict: &Dictionary) -> Result<ImageMeta> {
    let width = dict_get_u32(dict, b"Width")?;
    let height = dict_get_u32(dict, b"Height")?;
    let bits_per_component = match dict.get(b"BitsPerComponent") {
        Ok(_) => dict_get_u32(dict, b"BitsPerComponent")? as u8,
        Err(_) => 8,
    };

    let color_space = match dict.get(b"ColorSpace") {
        Ok(Object::Name(name)) => Some(String::from_utf8_lossy(name).to_string()),
        // Array and reference forms stay opaque; the image is skipped.
        Ok(_) => None,
        Err(_) => Some("DeviceRGB".to_string()),
    };

    let filter = match dict.get(b"Filter") {
        Ok(Object::Name(name)) => Some(String::from_utf8_lossy(name).to_string()),
        Ok(Object::Array(items)) => items.first().and_then(|obj| {
            if let Object::Name(name) = obj {
                Some(String::from_utf8_lossy(name).to_string())
            } else {
                None
            }
        }),
        _ => None,
    };

    Ok(ImageMeta {
        width,
        height,
        bits_per_component,
        color_space,
        filter,
    })
}

fn dict_get_u32(dict: &Dictionary, key: &[u8]) -> Result<u32> {
    match dict.get(key) {
        Ok(Object::Integer(value)) if (0..=u32::MAX as i64).contains(value) => Ok(*value as u32),
        Ok(other) => Err(PdfHubError::Compress(format!(
            "expected a non-negative integer for {:?}, got {other:?}",
            String::from_utf8_lossy(key)
        ))),
        Err(_) => Err(PdfHubError::Compress(format!(
            "image stream is missing {:?}",
            String::from_utf8_lossy(key)
        ))),
    }
}

/// Samples per pixel for the color spaces we can decode.
fn channels_for(color_space: &str) -> Option<u32> {
    match color_space {
        "DeviceGray" => Some(1),
        "DeviceRGB" => Some(3),
        _ => None,
    }
}

/// Decode the stream to pixels. `None` means the filter is recognized but
/// not decodable here, so the image should be skipped rather than failed.
fn decode_image_stream(stream: &lopdf::Stream, meta: &ImageMeta) -> Result<Option<DynamicImage>> {
    match meta.filter.as_deref() {
        Some("DCTDecode") => decode_jpeg(&stream.content).map(Some),
        Some("FlateDecode") => {
            // Predictor-filtered sample data is not raw pixels; decoding
            // it as such would re-encode garbage.
            if has_predictor(&stream.dict) {
                debug!("FlateDecode stream uses a predictor, skipped");
                return Ok(None);
            }
            let mut decoder = ZlibDecoder::new(stream.content.as_slice());
            let mut raw = Vec::new();
            decoder
                .read_to_end(&mut raw)
                .map_err(|err| PdfHubError::Compress(format!("FlateDecode failed: {err}")))?;
            decode_raw(&raw, meta).map(Some)
        }
        None => decode_raw(&stream.content, meta).map(Some),
        Some(other) => {
            debug!(filter = other, "unsupported image filter, skipped");
            Ok(None)
        }
    }
}

/// Whether the stream declares decode parameters that change the sample
/// layout. Parameters held behind a reference cannot be inspected here,
/// so they count as a predictor.
fn has_predictor(dict: &Dictionary) -> bool {
    let parms = match dict.get(b"DecodeParms").or_else(|_| dict.get(b"DP")) {
        Ok(Object::Dictionary(parms)) => parms,
        Ok(_) => return true,
        Err(_) => return false,
    };
    match parms.get(b"Predictor") {
        Ok(Object::Integer(predictor)) => *predictor > 1,
        Ok(_) => true,
        Err(_) => false,
    }
}

fn decode_jpeg(data: &[u8]) -> Result<DynamicImage> {
    image::ImageReader::new(std::io::Cursor::new(data))
        .with_guessed_format()
        .map_err(|err| PdfHubError::Compress(format!("JPEG decode failed: {err}")))?
        .decode()
        .map_err(|err| PdfHubError::Compress(format!("JPEG decode failed: {err}")))
}

fn decode_raw(data: &[u8], meta: &ImageMeta) -> Result<DynamicImage> {
    if meta.bits_per_component != 8 {
        return Err(PdfHubError::Compress(format!(
            "unsupported bits per component: {}",
            meta.bits_per_component
        )));
    }
    let width = meta.width;
    let height = meta.height;

    match meta.color_space.as_deref() {
        Some("DeviceRGB") => {
            let expected = width as usize * height as usize * 3;
            if data.len() < expected {
                return Err(PdfHubError::Compress(format!(
                    "RGB data too short: expected {expected}, got {}",
                    data.len()
                )));
            }
            image::RgbImage::from_raw(width, height, data[..expected].to_vec())
                .map(DynamicImage::ImageRgb8)
                .ok_or_else(|| PdfHubError::Compress("invalid RGB image data".to_string()))
        }
        Some("DeviceGray") => {
            let expected = width as usize * height as usize;
            if data.len() < expected {
                return Err(PdfHubError::Compress(format!(
                    "gray data too short: expected {expected}, got {}",
                    data.len()
                )));
            }
            image::GrayImage::from_raw(width, height, data[..expected].to_vec())
                .map(DynamicImage::ImageLuma8)
                .ok_or_else(|| PdfHubError::Compress("invalid gray image data".to_string()))
        }
        other => Err(PdfHubError::Compress(format!(
            "unsupported color space: {other:?}"
        ))),
    }
}

//! Profile photo lookup among the images embedded in a résumé PDF.

use crate::error::IryeokError;
use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};
use lopdf::{Dictionary, Document, Object, Stream};
use serde::Serialize;
use std::path::Path;

/// Pixel size of the photo cell in the résumé templates.
pub const DEFAULT_PHOTO_FOOTPRINT: (u32, u32) = (120, 160);

/// Extension for raw samples and for encodings that cannot be decoded.
pub const DEFAULT_EXTENSION: &str = "png";

/// An image XObject found in a PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbeddedImage {
    pub object_id: u32,
    pub width: u32,
    pub height: u32,
    /// First entry of `/Filter`, or `None` for raw samples.
    pub filter: String,
    pub color_space: String,
    pub bits_per_component: u32,
}

impl EmbeddedImage {
    /// File extension for the stored image, falling back to
    /// [`DEFAULT_EXTENSION`].
    pub fn extension(&self) -> &'static str {
        match self.filter.as_str() {
            "DCTDecode" => "jpg",
            "JPXDecode" => "jp2",
            _ => DEFAULT_EXTENSION,
        }
    }
}

/// List every image XObject in the document.
pub fn list_images(pdf_bytes: &[u8]) -> Result<Vec<EmbeddedImage>, IryeokError> {
    let doc = load(pdf_bytes)?;
    Ok(image_streams(&doc).map(|(_, image)| image).collect())
}

/// Find the first image whose size equals `footprint` and write it to
/// `out_dir` as `<stem>_photo.<ext>`.
///
/// Raw samples in a gray, RGB, CMYK or indexed colour space become PNG.
/// Other raw encodings are written undecoded under [`DEFAULT_EXTENSION`].
/// Returns the written file name, or `None` when no image matches or the
/// matching image's samples are truncated.
pub fn locate_profile_photo(
    pdf_bytes: &[u8],
    footprint: (u32, u32),
    out_dir: &Path,
    stem: &str,
) -> Result<Option<String>, IryeokError> {
    let doc = load(pdf_bytes)?;
    let Some((stream, image)) = image_streams(&doc)
        .find(|(_, image)| (image.width, image.height) == footprint)
    else {
        tracing::debug!(width = footprint.0, height = footprint.1, "no profile photo found");
        return Ok(None);
    };

    let Some(bytes) = encode(&doc, stream, &image) else {
        tracing::warn!(
            object = image.object_id,
            color_space = %image.color_space,
            "profile photo samples do not fill the image"
        );
        return Ok(None);
    };

    std::fs::create_dir_all(out_dir)?;
    let filename = format!("{}_photo.{}", stem, image.extension());
    std::fs::write(out_dir.join(&filename), bytes)?;
    tracing::debug!(file = %filename, "wrote profile photo");
    Ok(Some(filename))
}

fn load(pdf_bytes: &[u8]) -> Result<Document, IryeokError> {
    Document::load_mem(pdf_bytes).map_err(|e| IryeokError::Photo(format!("cannot load PDF: {}", e)))
}

fn image_streams(doc: &Document) -> impl Iterator<Item = (&Stream, EmbeddedImage)> {
    doc.objects.iter().filter_map(|((id, _), object)| {
        let Object::Stream(stream) = object else {
            return None;
        };
        if name(&stream.dict, b"Subtype")? != "Image" {
            return None;
        }
        let image = EmbeddedImage {
            object_id: *id,
            width: integer(&stream.dict, b"Width")?,
            height: integer(&stream.dict, b"Height")?,
            filter: name(&stream.dict, b"Filter").unwrap_or_else(|| "None".to_string()),
            color_space: name(&stream.dict, b"ColorSpace").unwrap_or_else(|| "DeviceRGB".to_string()),
            bits_per_component: integer(&stream.dict, b"BitsPerComponent").unwrap_or(8),
        };
        Some((stream, image))
    })
}

/// Name value of `key`, taking the first element when it is an array.
fn name(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::Name(n) => Some(String::from_utf8_lossy(n).into_owned()),
        Object::Array(items) => match items.first()? {
            Object::Name(n) => Some(String::from_utf8_lossy(n).into_owned()),
            _ => None,
        },
        _ => None,
    }
}

fn integer(dict: &Dictionary, key: &[u8]) -> Option<u32> {
    match dict.get(key).ok()? {
        Object::Integer(v) => u32::try_from(*v).ok(),
        _ => None,
    }
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        _ => object,
    }
}

/// Colour model of raw image samples.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ColorModel {
    Gray,
    Rgb,
    Cmyk,
    /// Palette already converted to RGB triples.
    Indexed(Vec<u8>),
}

fn color_model(doc: &Document, space: &Object) -> Option<ColorModel> {
    match resolve(doc, space) {
        Object::Name(n) => match n.as_slice() {
            b"DeviceGray" | b"CalGray" | b"G" => Some(ColorModel::Gray),
            b"DeviceRGB" | b"CalRGB" | b"RGB" => Some(ColorModel::Rgb),
            b"DeviceCMYK" | b"CMYK" => Some(ColorModel::Cmyk),
            _ => None,
        },
        Object::Array(items) => {
            let Object::Name(family) = items.first()? else {
                return None;
            };
            match family.as_slice() {
                b"ICCBased" => {
                    let Object::Stream(profile) = resolve(doc, items.get(1)?) else {
                        return None;
                    };
                    match profile.dict.get(b"N").ok()? {
                        Object::Integer(1) => Some(ColorModel::Gray),
                        Object::Integer(3) => Some(ColorModel::Rgb),
                        Object::Integer(4) => Some(ColorModel::Cmyk),
                        _ => None,
                    }
                }
                b"Indexed" | b"I" => {
                    let base = color_model(doc, items.get(1)?)?;
                    let lookup = match resolve(doc, items.get(3)?) {
                        Object::String(bytes, _) => bytes.clone(),
                        Object::Stream(s) => s
                            .decompressed_content()
                            .unwrap_or_else(|_| s.content.clone()),
                        _ => return None,
                    };
                    Some(ColorModel::Indexed(palette_to_rgb(&base, &lookup)?))
                }
                _ if items.len() == 1 => color_model(doc, &items[0]),
                _ => None,
            }
        }
        _ => None,
    }
}

fn palette_to_rgb(base: &ColorModel, lookup: &[u8]) -> Option<Vec<u8>> {
    match base {
        ColorModel::Gray => Some(lookup.iter().flat_map(|&g| [g, g, g]).collect()),
        ColorModel::Rgb => Some(lookup.to_vec()),
        ColorModel::Cmyk => Some(cmyk_to_rgb(lookup)),
        ColorModel::Indexed(_) => None,
    }
}

fn cmyk_to_rgb(samples: &[u8]) -> Vec<u8> {
    samples
        .chunks_exact(4)
        .flat_map(|px| {
            let k = 255 - u16::from(px[3]);
            let channel = |c: u8| ((255 - u16::from(c)) * k / 255) as u8;
            [channel(px[0]), channel(px[1]), channel(px[2])]
        })
        .collect()
}

/// Bytes to store for an image: JPEG and JPEG 2000 data is kept as is, raw
/// 8-bit samples in a known colour model become PNG, anything else is kept
/// undecoded. `None` means the samples are too short for the image.
fn encode(doc: &Document, stream: &Stream, image: &EmbeddedImage) -> Option<Vec<u8>> {
    if matches!(image.filter.as_str(), "DCTDecode" | "JPXDecode") {
        return Some(stream.content.clone());
    }
    let samples = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());
    let model = stream
        .dict
        .get(b"ColorSpace")
        .ok()
        .map_or(Some(ColorModel::Rgb), |space| color_model(doc, space));

    let Some(model) = model.filter(|_| image.bits_per_component == 8) else {
        tracing::warn!(
            object = image.object_id,
            color_space = %image.color_space,
            bits = image.bits_per_component,
            "unsupported photo encoding, writing samples undecoded"
        );
        return Some(samples);
    };

    let (width, height) = (image.width, image.height);
    let decoded = match model {
        ColorModel::Gray => GrayImage::from_raw(width, height, samples).map(DynamicImage::ImageLuma8),
        ColorModel::Rgb => RgbImage::from_raw(width, height, samples).map(DynamicImage::ImageRgb8),
        ColorModel::Cmyk => {
            RgbImage::from_raw(width, height, cmyk_to_rgb(&samples)).map(DynamicImage::ImageRgb8)
        }
        ColorModel::Indexed(palette) => {
            let rgb: Option<Vec<u8>> = samples
                .iter()
                .map(|&i| palette.get(usize::from(i) * 3..usize::from(i) * 3 + 3))
                .collect::<Option<Vec<&[u8]>>>()
                .map(|px| px.concat());
            rgb.and_then(|rgb| RgbImage::from_raw(width, height, rgb))
                .map(DynamicImage::ImageRgb8)
        }
    }?;

    let mut png = Vec::new();
    decoded
        .write_to(&mut std::io::Cursor::new(&mut png), ImageFormat::Png)
        .ok()?;
    Some(png)
}

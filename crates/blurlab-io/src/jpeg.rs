use std::{fs, path::Path};

use blurlab_image::PlanarImage;
use jpeg_encoder::{ColorType, Encoder};
use zune_jpeg::zune_core::colorspace::ColorSpace;
use zune_jpeg::zune_core::options::DecoderOptions;

use crate::error::IoError;

/// Reads a JPEG file into a planar float image.
///
/// The channel count follows the file: one plane for grayscale, three for
/// color. Color files in other colorspaces are converted to RGB by the
/// decoder.
///
/// # Arguments
///
/// * `file_path` - The path to the JPEG file.
///
/// # Returns
///
/// A planar image with one or three channels.
pub fn read_image_jpeg(file_path: impl AsRef<Path>) -> Result<PlanarImage, IoError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }
    if file_path.extension().map_or(true, |ext| {
        !ext.eq_ignore_ascii_case("jpg") && !ext.eq_ignore_ascii_case("jpeg")
    }) {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let jpeg_data = fs::read(file_path)?;
    let mut headers = zune_jpeg::JpegDecoder::new(jpeg_data.as_slice());
    headers.decode_headers()?;

    let image_info = headers.info().ok_or_else(|| {
        IoError::JpegDecodingError(zune_jpeg::errors::DecodeErrors::Format(String::from(
            "Failed to find image info from its metadata",
        )))
    })?;
    let width = image_info.width as usize;
    let height = image_info.height as usize;
    let (channels, colorspace) = match image_info.components {
        1 => (1, ColorSpace::Luma),
        _ => (3, ColorSpace::RGB),
    };

    let options = DecoderOptions::default().jpeg_set_out_colorspace(colorspace);
    let mut decoder = zune_jpeg::JpegDecoder::new_with_options(jpeg_data.as_slice(), options);
    let pixels = decoder.decode()?;
    if pixels.len() != width * height * channels {
        return Err(IoError::JpegDecodingError(
            zune_jpeg::errors::DecodeErrors::Format(format!(
                "Decoded {} bytes for a {width}x{height}x{channels} image",
                pixels.len()
            )),
        ));
    }

    Ok(PlanarImage::from_interleaved(&pixels, width, height, channels)?)
}

/// Writes a planar float image to a JPEG file.
///
/// # Arguments
///
/// * `file_path` - The path to the JPEG file to create.
/// * `image` - The image to encode.
/// * `quality` - The quality of the JPEG encoding, from 0 (lowest) to 100
///   (highest).
pub fn write_image_jpeg(
    file_path: impl AsRef<Path>,
    image: &PlanarImage,
    quality: u8,
) -> Result<(), IoError> {
    let color_type = match image.num_channels() {
        1 => ColorType::Luma,
        3 => ColorType::Rgb,
        other => return Err(IoError::UnsupportedChannelCount(other)),
    };

    let encoder = Encoder::new_file(file_path, quality)?;
    encoder.encode(
        &image.to_interleaved(),
        image.width() as u16,
        image.height() as u16,
        color_type,
    )?;
    Ok(())
}

use std::{fs::File, path::Path};

use blurlab_image::PlanarImage;
use png::{BitDepth, ColorType, Decoder, Encoder};

use crate::error::IoError;

/// Reads a PNG file into a planar float image.
///
/// Supports 8-bit grayscale and RGB files; the interleaved samples are
/// widened to `f32` and split into channel planes.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
///
/// # Returns
///
/// A planar image with one or three channels.
pub fn read_image_png(file_path: impl AsRef<Path>) -> Result<PlanarImage, IoError> {
    // verify the file exists and carries the right extension
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }
    if file_path
        .extension()
        .map_or(true, |ext| !ext.eq_ignore_ascii_case("png"))
    {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let file = File::open(file_path)?;
    let mut reader = Decoder::new(file)
        .read_info()
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;

    if info.bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedColorType(format!(
            "{:?} at {:?}",
            info.color_type, info.bit_depth
        )));
    }
    let channels = match info.color_type {
        ColorType::Grayscale => 1,
        ColorType::Rgb => 3,
        other => return Err(IoError::UnsupportedColorType(format!("{other:?}"))),
    };

    Ok(PlanarImage::from_interleaved(
        &buf[..info.buffer_size()],
        info.width as usize,
        info.height as usize,
        channels,
    )?)
}

/// Writes a planar float image to a PNG file.
///
/// Samples are clamped to `[0, 255]`, rounded and narrowed to 8 bits. One
/// channel is written as grayscale, three as RGB.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file to create.
/// * `image` - The image to encode.
pub fn write_image_png(file_path: impl AsRef<Path>, image: &PlanarImage) -> Result<(), IoError> {
    let color_type = match image.num_channels() {
        1 => ColorType::Grayscale,
        3 => ColorType::Rgb,
        other => return Err(IoError::UnsupportedChannelCount(other)),
    };

    let file = File::create(file_path)?;
    let mut encoder = Encoder::new(file, image.width() as u32, image.height() as u32);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::PngEncodeError(e.to_string()))?;
    writer
        .write_image_data(&image.to_interleaved())
        .map_err(|e| IoError::PngEncodeError(e.to_string()))?;
    Ok(())
}

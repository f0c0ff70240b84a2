use std::path::Path;

use blurlab_image::PlanarImage;

use crate::error::IoError;
use crate::jpeg::{read_image_jpeg, write_image_jpeg};
use crate::png::{read_image_png, write_image_png};

/// Quality used when [`write_image`] dispatches to the JPEG encoder.
const JPEG_QUALITY: u8 = 95;

/// Reads an image from the given file path, picking the codec from the
/// extension.
///
/// # Arguments
///
/// * `file_path` - The path to a `.png`, `.jpg` or `.jpeg` file.
///
/// # Returns
///
/// A planar image with one or three channels.
///
/// # Example
///
/// ```no_run
/// use blurlab_io::functional::read_image;
///
/// let image = read_image("data/card.png").unwrap();
/// println!("{}x{}", image.width(), image.height());
/// ```
pub fn read_image(file_path: impl AsRef<Path>) -> Result<PlanarImage, IoError> {
    let file_path = file_path.as_ref();
    match extension_of(file_path).as_deref() {
        Some("png") => read_image_png(file_path),
        Some("jpg") | Some("jpeg") => read_image_jpeg(file_path),
        _ => Err(IoError::InvalidFileExtension(file_path.to_path_buf())),
    }
}

/// Writes an image to the given file path, picking the codec from the
/// extension.
///
/// # Arguments
///
/// * `file_path` - The path to a `.png`, `.jpg` or `.jpeg` file to create.
/// * `image` - The image to encode.
pub fn write_image(file_path: impl AsRef<Path>, image: &PlanarImage) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    match extension_of(file_path).as_deref() {
        Some("png") => write_image_png(file_path, image),
        Some("jpg") | Some("jpeg") => write_image_jpeg(file_path, image, JPEG_QUALITY),
        _ => Err(IoError::InvalidFileExtension(file_path.to_path_buf())),
    }
}

fn extension_of(file_path: &Path) -> Option<String> {
    file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

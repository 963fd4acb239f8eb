//! PNG loading and saving.
//!
//! File handles are scoped to each call and released on every exit path.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use image::{ImageError, ImageFormat, ImageResult, RgbaImage};

/// Decode a PNG file into RGBA pixels.
pub fn load_png(path: &Path) -> ImageResult<RgbaImage> {
    let file = File::open(path).map_err(ImageError::IoError)?;
    let image = image::load(BufReader::new(file), ImageFormat::Png)?;
    Ok(image.into_rgba8())
}

/// Encode `image` as PNG at `path`, replacing any existing file.
pub fn save_png(image: &RgbaImage, path: &Path) -> ImageResult<()> {
    let file = File::create(path).map_err(ImageError::IoError)?;
    let mut writer = BufWriter::new(file);
    image.write_to(&mut writer, ImageFormat::Png)?;
    writer.flush().map_err(ImageError::IoError)
}

//! Image sinks: plain-text PPM and PNG.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{ImageBuffer, RenderError, RenderResult};

/// Write an image as plain-text PPM (P3), top row first.
pub fn write_ppm<W: Write>(image: &ImageBuffer, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", image.width, image.height)?;
    writeln!(out, "255")?;
    for rgb in image.to_rgb8().chunks_exact(3) {
        writeln!(out, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
    }
    Ok(())
}

/// Save an image as a plain-text PPM file.
pub fn save_ppm<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> RenderResult<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_ppm(image, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Save an image as an 8-bit PNG file.
pub fn save_png<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> RenderResult<()> {
    image::save_buffer(
        path.as_ref(),
        &image.to_rgb8(),
        image.width,
        image.height,
        image::ColorType::Rgb8,
    )?;
    Ok(())
}

/// Save an image, choosing the format from the file extension.
pub fn save_image<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> RenderResult<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => save_ppm(image, path)?,
        "png" => save_png(image, path)?,
        _ => return Err(RenderError::UnsupportedFormat(path.display().to_string())),
    }
    log::info!("Saved {}", path.display());
    Ok(())
}

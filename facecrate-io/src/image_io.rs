//! Image loading and writing in texture orientation
//!
//! Images handed to reconstruction and texture baking are float RGB(A) in
//! `[0, 1]` with the bottom row first. Loading flips decoded files
//! vertically; writing flips back before encoding.

use crate::error::IoResult;
use facecrate_core::{report_step, ProgressCallback};
use image::imageops::flip_vertical_in_place;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb32FImage, Rgba, Rgba32FImage, RgbaImage};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Load an image as RGBA floats in `[0, 1]`, bottom row first
pub fn load_image_rgba<P: AsRef<Path>>(path: P) -> IoResult<Rgba32FImage> {
    let path = path.as_ref();
    let mut img = image::open(path)?.to_rgba32f();
    flip_vertical_in_place(&mut img);
    debug!("Loaded {:?} ({}x{} RGBA)", path, img.width(), img.height());
    Ok(img)
}

/// Load an image as RGB floats in `[0, 1]`, bottom row first
pub fn load_image_rgb<P: AsRef<Path>>(path: P) -> IoResult<Rgb32FImage> {
    let path = path.as_ref();
    let mut img = image::open(path)?.to_rgb32f();
    flip_vertical_in_place(&mut img);
    debug!("Loaded {:?} ({}x{} RGB)", path, img.width(), img.height());
    Ok(img)
}

/// Convert a float RGBA image to 8 bits per channel. Components are clamped
/// to `[0, 1]`, scaled by 255 and truncated.
pub fn to_rgba8(img: &Rgba32FImage) -> RgbaImage {
    ImageBuffer::from_fn(img.width(), img.height(), |x, y| {
        let p = img.get_pixel(x, y);
        Rgba(p.0.map(|c| (c.clamp(0.0, 1.0) * 255.0) as u8))
    })
}

/// Write a bottom-row-first float RGBA image. The encoder is chosen from the
/// file extension; JPEG output drops the alpha channel.
pub fn write_image_rgba<P: AsRef<Path>>(path: P, img: &Rgba32FImage) -> IoResult<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;

    let mut bytes = to_rgba8(img);
    flip_vertical_in_place(&mut bytes);
    let out = DynamicImage::ImageRgba8(bytes);

    match format {
        ImageFormat::Jpeg => out.to_rgb8().save_with_format(path, format)?,
        _ => out.save_with_format(path, format)?,
    }
    debug!("Wrote {:?} ({}x{}, {:?})", path, img.width(), img.height(), format);
    Ok(())
}

/// Image files of a directory in file-name order. Files whose extension is
/// not a known image format are skipped.
pub fn list_images<P: AsRef<Path>>(dir: P) -> IoResult<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if ImageFormat::from_path(&path).is_err() {
            warn!("Skipping {:?}: not a recognised image file", path);
            continue;
        }
        paths.push(path);
    }
    paths.sort();
    Ok(paths)
}

/// Load every image of a directory as RGBA, reporting progress after each
/// one. An abort request stops loading with
/// [`facecrate_core::Error::Aborted`].
pub fn load_images<P, C>(dir: P, progress: &mut C) -> IoResult<Vec<Rgba32FImage>>
where
    P: AsRef<Path>,
    C: ProgressCallback + ?Sized,
{
    let paths = list_images(dir.as_ref())?;
    let mut images = Vec::with_capacity(paths.len());
    for (i, path) in paths.iter().enumerate() {
        images.push(load_image_rgba(path)?);
        report_step(progress, i + 1, paths.len())?;
    }
    info!("Loaded {} images from {:?}", images.len(), dir.as_ref());
    Ok(images)
}

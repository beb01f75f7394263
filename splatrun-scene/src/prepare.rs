//! Input image preparation.
//!
//! The reconstruction tool works best on modestly sized JPEGs. This module
//! decodes whatever sits in `images/`, shrinks anything larger than a
//! maximum edge length, and re-encodes the result as JPEG into `input/`.
//! This is the only in-process image work in the whole pipeline.

use std::fs::{self, File};
use std::io::BufWriter;

use image::codecs::jpeg::JpegEncoder;
use image::ImageReader;
use tracing::{debug, info, warn};

use crate::error::SceneError;
use crate::layout::SceneLayout;

/// Decode every image directly under `images/`, shrink it to fit
/// `max_dim` on its longer edge, and write it as a JPEG at `quality` into
/// `input/`.
///
/// Files already present in `input/` are skipped, so re-runs only process
/// new photographs. Files the decoder cannot handle are logged and skipped
/// rather than failing the batch. Returns the number of JPEGs written.
#[tracing::instrument(skip_all, fields(scene = %scene.root().display()))]
pub fn downscale_into_input(
    scene: &SceneLayout,
    max_dim: u32,
    quality: u8,
) -> Result<usize, SceneError> {
    let images = scene.images_dir();
    if !images.is_dir() {
        return Err(SceneError::MissingImages { path: images });
    }
    let input = scene.input_dir();
    fs::create_dir_all(&input)?;

    let mut entries: Vec<_> = fs::read_dir(&images)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    let mut written = 0;
    for entry in entries {
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let Some(stem) = path.file_stem() else {
            continue;
        };
        let dest = input.join(format!("{}.jpg", stem.to_string_lossy()));
        if dest.exists() {
            debug!("Skipping {} (already converted)", path.display());
            continue;
        }

        let img = match ImageReader::open(&path)?.with_guessed_format()?.decode() {
            Ok(img) => img,
            Err(e) => {
                warn!("Skipping undecodable {}: {}", path.display(), e);
                continue;
            }
        };

        let resized = if img.width().max(img.height()) > max_dim {
            img.thumbnail(max_dim, max_dim)
        } else {
            img
        };

        let mut out = BufWriter::new(File::create(&dest)?);
        JpegEncoder::new_with_quality(&mut out, quality).encode_image(&resized.to_rgb8())?;
        written += 1;
    }

    info!("Wrote {} downscaled JPEGs into {}", written, input.display());
    Ok(written)
}

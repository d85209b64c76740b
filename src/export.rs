use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::ColorImage;

/// Write a viewport screenshot to `path` as PNG.
pub fn save_png(path: &Path, shot: &ColorImage) -> Result<()> {
    let [w, h] = shot.size;
    let bytes: Vec<u8> = shot.pixels.iter().flat_map(|c| c.to_array()).collect();
    let buffer = image::RgbaImage::from_raw(w as u32, h as u32, bytes)
        .context("screenshot size does not match its pixel buffer")?;
    buffer
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("Saved {w}x{h} chart image to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use eframe::egui::Color32;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn writes_readable_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("charts.png");
        let shot = ColorImage::new([4, 3], Color32::from_rgb(0, 128, 0));

        save_png(&path, &shot).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.get_pixel(2, 1).0, [0, 128, 0, 255]);
    }

    #[test]
    fn unwritable_path_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("charts.png");
        let shot = ColorImage::new([1, 1], Color32::WHITE);
        assert!(save_png(&path, &shot).is_err());
    }
}

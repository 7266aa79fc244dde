//! Test fixtures and constants.

use std::path::{Path, PathBuf};

use inkframe::models::AppConfig;

/// Frame size used by integration tests
pub const WIDTH: u32 = 16;
pub const HEIGHT: u32 = 8;

/// Small-frame configuration, default palette, no preprocessing
pub fn test_config() -> AppConfig {
    AppConfig::from_yaml(&format!(
        "frame:\n  width: {WIDTH}\n  height: {HEIGHT}\nprepare:\n  brightness: 1.0\n  contrast: 1.0\n"
    ))
    .expect("test config must parse")
}

/// Write a PNG photo with a horizontal red-to-blue gradient into `dir`
pub fn write_gradient_photo(dir: &Path, width: u32, height: u32) -> PathBuf {
    let image = image::RgbImage::from_fn(width, height, |x, _| {
        let t = (x * 255 / width.max(2).saturating_sub(1)) as u8;
        image::Rgb([255 - t, 40, t])
    });
    let path = dir.join("photo.png");
    image.save(&path).expect("Failed to write test photo");
    path
}

/// Write a solid-color PNG photo into `dir`
pub fn write_solid_photo(dir: &Path, width: u32, height: u32, rgb: [u8; 3]) -> PathBuf {
    let image = image::RgbImage::from_pixel(width, height, image::Rgb(rgb));
    let path = dir.join("solid.png");
    image.save(&path).expect("Failed to write test photo");
    path
}

/// Write a file that claims to be a JPEG but is not
pub fn write_corrupt_photo(dir: &Path) -> PathBuf {
    let path = dir.join("broken.jpg");
    std::fs::write(&path, b"definitely not a jpeg").expect("Failed to write file");
    path
}

/// A valid artifact for the test frame: pen `x % 8` in every row
pub fn stripe_artifact() -> Vec<u8> {
    (0..HEIGHT)
        .flat_map(|_| (0..WIDTH).map(|x| (x % 8) as u8))
        .collect()
}

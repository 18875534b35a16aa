use crate::core_modules::raster::Raster;
use crate::error::Result;
use image::ImageEncoder;
use std::path::Path;

/// Writes `raster` to `path` as an RGBA PNG.
///
/// Handy for inspecting a channel map: detail shows up green, saturation blue.
pub fn save(path: impl AsRef<Path>, raster: &Raster) -> Result<()> {
    let output = std::fs::File::create(path.as_ref())?;
    let encoder = image::codecs::png::PngEncoder::new(output);

    encoder.write_image(
        raster.data(),
        raster.width(),
        raster.height(),
        image::ExtendedColorType::Rgba8,
    )?;

    Ok(())
}

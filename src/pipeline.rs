// THEORY:
// The `pipeline` module is the top-level API of the scoring engine. It wires the
// stages together in a fixed order and hides the intermediate rasters:
//
//   decoded image -> input raster -> edge detector + saturation detector
//     -> channel map -> (optional down-sample) -> scorer -> Score
//
// The pipeline holds nothing but an immutable, validated `Config`. Every call
// allocates its own rasters and drops them before returning, so one pipeline can
// be shared freely between threads and repeated calls are bit-identical.

use crate::config::Config;
use crate::core_modules::edge_detector::edge_detect;
use crate::core_modules::raster::{Dimensions, Raster};
use crate::core_modules::saturation_detector::saturation_detect;
use crate::core_modules::scorer::score;
use crate::error::Result;
use image::DynamicImage;
use log::debug;
use std::path::Path;

// Re-export key data structures for the public API.
pub use crate::core_modules::scorer::Score;

/// Scores images with one fixed configuration.
#[derive(Debug, Clone)]
pub struct InterestingnessPipeline {
    config: Config,
}

impl InterestingnessPipeline {
    /// Validates `config` and builds a pipeline around it.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scores a decoded image.
    pub fn analyze(&self, image: &DynamicImage) -> Score {
        self.analyze_raster(&Raster::from_image(image))
    }

    /// Scores a raw, row-major RGBA8 buffer.
    pub fn analyze_rgba(&self, width: u32, height: u32, data: &[u8]) -> Result<Score> {
        let input = Raster::from_rgba(width, height, data.to_vec())?;
        Ok(self.analyze_raster(&input))
    }

    /// Decodes an in-memory encoded image (PNG, JPEG, ...) and scores it.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<Score> {
        let image = image::load_from_memory(bytes)?;
        Ok(self.analyze(&image))
    }

    /// Decodes the image file at `path` and scores it.
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<Score> {
        let path = path.as_ref();
        let image = image::open(path)?;
        debug!("decoded {} ({}x{})", path.display(), image.width(), image.height());
        Ok(self.analyze(&image))
    }

    /// Scores an input raster.
    pub fn analyze_raster(&self, input: &Raster) -> Score {
        let dimensions = input.dimensions();
        if dimensions.is_empty() {
            debug!(
                "degenerate raster {}x{}, returning a zero score",
                dimensions.width, dimensions.height
            );
            return Score::default();
        }

        // Stage 1: Detail and saturation channels
        let output = self.detect(input);

        // Stage 2: Optional down-sampling of the channel map
        let scoring = self.scoring_raster(&output, dimensions);

        // Stage 3: Importance-weighted aggregation
        let result = score(&scoring, dimensions, &self.config);
        debug!(
            "scored {}x{} image on a {}x{} raster: {:?}",
            dimensions.width,
            dimensions.height,
            scoring.width(),
            scoring.height(),
            result
        );
        result
    }

    /// Runs both detectors and returns the full-size channel map: detail in the
    /// green channel, saturation in the blue channel.
    pub fn channel_map(&self, image: &DynamicImage) -> Raster {
        self.detect(&Raster::from_image(image))
    }

    fn detect(&self, input: &Raster) -> Raster {
        let mut output = input.clone();
        edge_detect(input, &mut output);
        saturation_detect(input, &mut output, &self.config);
        output
    }

    fn scoring_raster(&self, output: &Raster, dimensions: Dimensions) -> Raster {
        let down_sample = self.config.score_down_sample.max(1);
        let width = dimensions.width.div_ceil(down_sample);
        let height = dimensions.height.div_ceil(down_sample);

        if width == dimensions.width && height == dimensions.height {
            return output.clone();
        }

        debug!(
            "down-sampling channel map {}x{} -> {}x{}",
            dimensions.width, dimensions.height, width, height
        );
        output.resample(width, height)
    }
}

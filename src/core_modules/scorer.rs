// THEORY:
// The scorer is the aggregation stage. It reads the two measures written by the
// detectors (detail in green, saturation in blue), weights each sample by its
// spatial importance and sums them into a `Score`.
//
// The scoring raster may be a shrunk copy of the channel map. The walk therefore
// happens in the original image's coordinate space, stepping by the down-sample
// factor, and each step reads the shrunk pixel at `(x / ds, y / ds)`. Importance
// always sees coordinates at original scale, so a down-sampled score stays
// comparable with a full-resolution one.

use crate::config::Config;
use crate::core_modules::importance::importance;
use crate::core_modules::raster::{DETAIL_CHANNEL, Dimensions, Raster, SATURATION_CHANNEL};
use serde::Serialize;

/// The result of one analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Score {
    /// Importance-weighted sum of detail.
    pub detail: f64,
    /// Importance-weighted sum of saturation, biased by detail.
    pub saturation: f64,
    /// `detail * detail_weight + saturation * saturation_weight`.
    pub total: f64,
}

/// Aggregates the detail and saturation channels of `raster` into a `Score`.
///
/// `dimensions` is the size of the original image. An empty raster or empty
/// dimensions yield a zero score.
pub fn score(raster: &Raster, dimensions: Dimensions, config: &Config) -> Score {
    let mut score = Score::default();

    if raster.is_empty() || dimensions.is_empty() {
        return score;
    }

    let down_sample = config.score_down_sample.max(1) as u64;
    let height = raster.height() as u64 * down_sample;
    let width = raster.width() as u64 * down_sample;

    for y in (0..height).step_by(down_sample as usize) {
        let row = (y / down_sample) as u32;
        for x in (0..width).step_by(down_sample as usize) {
            let column = (x / down_sample) as u32;
            let weight = importance(dimensions, x as f64, y as f64, config);
            let detail = raster.channel(column, row, DETAIL_CHANNEL) as f64 / 255.0;

            score.detail += detail * weight;
            score.saturation += raster.channel(column, row, SATURATION_CHANNEL) as f64 / 255.0
                * (detail + config.saturation_bias)
                * weight;
        }
    }

    score.total = score.detail * config.detail_weight + score.saturation * config.saturation_weight;

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_map(width: u32, height: u32, detail: u8, saturation: u8) -> Raster {
        Raster::from_rgba(
            width,
            height,
            [0, detail, saturation, 255].repeat((width * height) as usize),
        )
        .expect("valid")
    }

    #[test]
    fn empty_raster_scores_zero() {
        let raster = Raster::new(0, 0);
        assert_eq!(
            score(&raster, Dimensions::new(0, 0), &Config::default()),
            Score::default()
        );
    }

    #[test]
    fn empty_dimensions_score_zero() {
        let raster = channel_map(2, 2, 255, 255);
        assert_eq!(
            score(&raster, Dimensions::new(0, 2), &Config::default()),
            Score::default()
        );
    }

    #[test]
    fn blank_channels_score_zero() {
        let raster = channel_map(6, 4, 0, 0);
        let result = score(&raster, Dimensions::new(6, 4), &Config::default());
        assert_eq!(result.detail, 0.0);
        assert_eq!(result.saturation, 0.0);
        assert_eq!(result.total, 0.0);
    }

    #[test]
    fn single_pixel_accumulates_weighted_channels() {
        let config = Config::default();
        let raster = channel_map(1, 1, 51, 255);
        let result = score(&raster, Dimensions::new(1, 1), &config);

        let weight = importance(Dimensions::new(1, 1), 0.0, 0.0, &config);
        let detail = 51.0 / 255.0;
        assert_eq!(result.detail, detail * weight);
        assert_eq!(result.saturation, 1.0 * (detail + 5.0) * weight);
        assert_eq!(result.total, result.detail * 1.0 + result.saturation * 0.5);
    }

    #[test]
    fn down_sampled_walk_uses_original_coordinates() {
        let config = Config {
            score_down_sample: 2,
            ..Config::default()
        };
        let dimensions = Dimensions::new(4, 4);
        let raster = channel_map(2, 2, 255, 0);
        let result = score(&raster, dimensions, &config);

        let mut expected = 0.0;
        for y in [0.0, 2.0] {
            for x in [0.0, 2.0] {
                expected += importance(dimensions, x, y, &config);
            }
        }
        assert_eq!(result.detail, expected);
        assert_eq!(result.saturation, 0.0);
    }

    #[test]
    fn weights_combine_into_total() {
        let config = Config {
            detail_weight: 2.0,
            saturation_weight: 3.0,
            ..Config::default()
        };
        let raster = channel_map(5, 5, 128, 64);
        let result = score(&raster, Dimensions::new(5, 5), &config);
        assert_eq!(result.total, result.detail * 2.0 + result.saturation * 3.0);
    }
}

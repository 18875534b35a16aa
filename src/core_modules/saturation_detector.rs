use crate::config::Config;
use crate::core_modules::pixel::{CHANNELS, normalized_luminance, saturation, to_channel};
use crate::core_modules::raster::{Raster, SATURATION_CHANNEL};

/// Writes the saturation measure of every pixel of `input` into `output`'s blue channel.
///
/// A pixel only counts when its saturation is above `saturation_threshold` and its
/// normalized luminance sits inside the configured brightness window (inclusive).
/// The excess over the threshold is rescaled so a fully saturated pixel reaches 255.
pub fn saturation_detect(input: &Raster, output: &mut Raster, config: &Config) {
    debug_assert_eq!(input.dimensions(), output.dimensions());

    let threshold = config.saturation_threshold;
    let scale = 255.0 / (1.0 - threshold);
    let source = input.data();
    let target = output.data_mut();

    for (p, rgba) in source.chunks_exact(CHANNELS).enumerate() {
        let (r, g, b) = (rgba[0], rgba[1], rgba[2]);
        let lightness = normalized_luminance(r, g, b);
        let sat = saturation(r, g, b);

        let value = if sat > threshold
            && lightness >= config.saturation_brightness_min
            && lightness <= config.saturation_brightness_max
        {
            to_channel((sat - threshold) * scale)
        } else {
            0
        };

        target[p * CHANNELS + SATURATION_CHANNEL] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(rgba: [u8; 4]) -> Raster {
        Raster::from_rgba(1, 1, rgba.to_vec()).expect("valid")
    }

    fn detect(rgba: [u8; 4], config: &Config) -> u8 {
        let input = single(rgba);
        let mut output = input.clone();
        saturation_detect(&input, &mut output, config);
        output.channel(0, 0, SATURATION_CHANNEL)
    }

    #[test]
    fn pure_red_is_fully_saturated() {
        assert_eq!(detect([255, 0, 0, 255], &Config::default()), 255);
    }

    #[test]
    fn gray_is_never_saturated() {
        let config = Config::default();
        for value in [0u8, 64, 128, 200] {
            assert_eq!(detect([value, value, value, 255], &config), 0);
        }
    }

    #[test]
    fn brightness_window_gates_saturation() {
        // Pure green: normalized luminance 0.7152, inside the default window.
        assert_eq!(detect([0, 255, 0, 255], &Config::default()), 255);

        let narrow = Config {
            saturation_brightness_max: 0.5,
            ..Config::default()
        };
        assert_eq!(detect([0, 255, 0, 255], &narrow), 0);

        // Very dark red: luminance 0.0722 * 100 / 255 ~ 0.028, below the minimum.
        assert_eq!(detect([100, 0, 0, 255], &Config::default()), 0);
    }

    #[test]
    fn gray_fails_even_a_zero_threshold() {
        let config = Config {
            saturation_threshold: 0.0,
            saturation_brightness_min: 0.0,
            ..Config::default()
        };
        assert_eq!(detect([30, 30, 30, 255], &config), 0);
    }

    #[test]
    fn partial_saturation_is_rescaled_above_threshold() {
        // max = 0.4, min = 0.2 -> saturation 1/3; threshold 0.2 -> (1/3 - 0.2) * 255 / 0.8 = 42.5
        let config = Config {
            saturation_threshold: 0.2,
            saturation_brightness_min: 0.0,
            ..Config::default()
        };
        let value = detect([102, 51, 51, 255], &config);
        assert!(value == 42 || value == 43, "saturation channel was {value}");
    }

    #[test]
    fn other_channels_are_untouched() {
        let input = single([255, 0, 0, 255]);
        let mut output = Raster::from_rgba(1, 1, vec![7, 8, 9, 10]).expect("valid");
        saturation_detect(&input, &mut output, &Config::default());
        assert_eq!(output.data(), &[7, 8, 255, 10]);
    }
}

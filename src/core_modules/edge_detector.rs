// THEORY:
// The edge detector turns the input raster into a "detail" channel. For every
// interior pixel it applies a 4-connected discrete Laplacian to luminance:
//
//        -1
//     -1  4 -1
//        -1
//
// A flat region cancels to zero, while a pixel that differs from its neighbors
// produces a large response. Border pixels have no complete neighborhood, so they
// report their own luminance instead. The result lands in channel 1 of the output
// raster; the input is never written.

use crate::core_modules::pixel::{CHANNELS, luminance, to_channel};
use crate::core_modules::raster::{DETAIL_CHANNEL, Raster};

#[inline]
fn sample(data: &[u8], p: usize) -> f64 {
    luminance(data[p], data[p + 1], data[p + 2])
}

/// Writes the detail measure of every pixel of `input` into `output`'s green channel.
///
/// Both rasters must have the same dimensions.
pub fn edge_detect(input: &Raster, output: &mut Raster) {
    debug_assert_eq!(input.dimensions(), output.dimensions());

    let w = input.width() as usize;
    let h = input.height() as usize;
    let row = w * CHANNELS;
    let source = input.data();
    let target = output.data_mut();

    for y in 0..h {
        for x in 0..w {
            let p = (y * w + x) * CHANNELS;

            let detail = if x == 0 || x + 1 >= w || y == 0 || y + 1 >= h {
                sample(source, p)
            } else {
                sample(source, p) * 4.0
                    - sample(source, p - row)
                    - sample(source, p - CHANNELS)
                    - sample(source, p + CHANNELS)
                    - sample(source, p + row)
            };

            target[p + DETAIL_CHANNEL] = to_channel(detail);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(width: u32, height: u32, rgba: [u8; 4]) -> Raster {
        Raster::from_rgba(width, height, rgba.repeat((width * height) as usize)).expect("valid")
    }

    #[test]
    fn flat_raster_has_zero_interior_and_luminance_border() {
        let input = flat(5, 4, [40, 40, 40, 255]);
        let mut output = input.clone();
        edge_detect(&input, &mut output);

        let border = to_channel(luminance(40, 40, 40));
        assert_eq!(border, 52);
        for y in 0..4 {
            for x in 0..5 {
                let on_border = x == 0 || x == 4 || y == 0 || y == 3;
                let expected = if on_border { border } else { 0 };
                assert_eq!(output.channel(x, y, DETAIL_CHANNEL), expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn isolated_bright_pixel_responds_strongly() {
        let mut input = flat(3, 3, [0, 0, 0, 255]);
        let p = input.offset(1, 1);
        input.data_mut()[p..p + 3].copy_from_slice(&[0, 30, 0]);
        let mut output = input.clone();
        edge_detect(&input, &mut output);

        // 4 * 0.7152 * 30 = 85.824
        assert_eq!(output.channel(1, 1, DETAIL_CHANNEL), 86);
    }

    #[test]
    fn dark_pixel_among_bright_neighbors_clamps_to_zero() {
        let mut input = flat(3, 3, [200, 200, 200, 255]);
        let p = input.offset(1, 1);
        input.data_mut()[p..p + 3].copy_from_slice(&[0, 0, 0]);
        let mut output = input.clone();
        edge_detect(&input, &mut output);

        assert_eq!(output.channel(1, 1, DETAIL_CHANNEL), 0);
    }

    #[test]
    fn single_pixel_is_a_border_pixel() {
        let input = flat(1, 1, [255, 0, 0, 255]);
        let mut output = input.clone();
        edge_detect(&input, &mut output);

        assert_eq!(output.channel(0, 0, DETAIL_CHANNEL), 18);
    }

    #[test]
    fn only_the_green_channel_is_written() {
        let input = flat(3, 3, [11, 22, 33, 44]);
        let mut output = input.clone();
        edge_detect(&input, &mut output);

        for y in 0..3 {
            for x in 0..3 {
                let pixel = output.pixel(x, y);
                assert_eq!((pixel.red, pixel.blue, pixel.alpha), (11, 33, 44));
            }
        }
        assert_eq!(input, flat(3, 3, [11, 22, 33, 44]));
    }
}

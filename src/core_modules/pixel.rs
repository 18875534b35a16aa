// THEORY (1D Pixel Math):
// Everything in this module is computed from a single pixel's own channels, with no
// knowledge of neighbors. It is the leaf of the scoring engine: the edge detector,
// the saturation detector and the scorer all reduce to these few formulas.
//
// The luminance weights are a fixed part of the scoring formula. Blue carries the
// largest weight and red the smallest, and the weights sum to 1.3, so a white pixel
// has a luminance above 255. Scores are only comparable against this exact formula,
// so it is not a Rec. 601/709 luma and must not be "corrected" into one.
//
// Saturation is the HSL-style saturation: chroma over the lightness-dependent
// denominator. The lightness test is strict (`l > 0.5`), so a pure primary
// (l == 0.5) takes the `d / (max + min)` branch.

pub type Byte = u8;
pub type Channel = Byte;
pub type Luminance = f64;
pub type Saturation = f64;

pub const CHANNELS: usize = 4;

const RED_WEIGHT: f64 = 0.0722;
const GREEN_WEIGHT: f64 = 0.7152;
const BLUE_WEIGHT: f64 = 0.5126;

/// Weighted luminance over 0..255 channel values.
#[inline]
pub fn luminance(red: Channel, green: Channel, blue: Channel) -> Luminance {
    BLUE_WEIGHT * blue as f64 + GREEN_WEIGHT * green as f64 + RED_WEIGHT * red as f64
}

/// `luminance` rescaled by 1/255.
#[inline]
pub fn normalized_luminance(red: Channel, green: Channel, blue: Channel) -> Luminance {
    luminance(red, green, blue) / 255.0
}

/// HSL saturation in [0, 1]. Achromatic pixels return 0.
pub fn saturation(red: Channel, green: Channel, blue: Channel) -> Saturation {
    let r = red as f64 / 255.0;
    let g = green as f64 / 255.0;
    let b = blue as f64 / 255.0;
    let maximum = r.max(g).max(b);
    let minimum = r.min(g).min(b);

    if maximum == minimum {
        return 0.0;
    }

    let lightness = (maximum + minimum) / 2.0;
    let chroma = maximum - minimum;

    if lightness > 0.5 {
        chroma / (2.0 - maximum - minimum)
    } else {
        chroma / (maximum + minimum)
    }
}

/// Converts a real-valued measure into a stored channel byte: NaN becomes 0, the
/// value is clamped to [0, 255] and rounded half-to-even.
#[inline]
pub fn to_channel(value: f64) -> Channel {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0).round_ties_even() as Channel
}

/// A "dumb" data container for one RGBA pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pixel {
    /// The red channel value (0-255).
    pub red: Channel,
    /// The green channel value (0-255).
    pub green: Channel,
    /// The blue channel value (0-255).
    pub blue: Channel,
    /// The alpha (transparency) channel value (0-255).
    pub alpha: Channel,
}

impl Pixel {
    pub fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
        Pixel {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn luminance(&self) -> Luminance {
        luminance(self.red, self.green, self.blue)
    }

    pub fn normalized_luminance(&self) -> Luminance {
        normalized_luminance(self.red, self.green, self.blue)
    }

    pub fn saturation(&self) -> Saturation {
        saturation(self.red, self.green, self.blue)
    }
}

impl From<[Byte; CHANNELS]> for Pixel {
    fn from(bytes: [Byte; CHANNELS]) -> Self {
        Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

impl From<Pixel> for [Byte; CHANNELS] {
    fn from(pixel: Pixel) -> Self {
        [pixel.red, pixel.green, pixel.blue, pixel.alpha]
    }
}

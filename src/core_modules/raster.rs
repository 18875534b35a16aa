// THEORY:
// `Raster` is the data container every scoring stage works on: a flat, row-major
// RGBA8 buffer with its width and height. It owns its bytes and enforces the one
// invariant the rest of the engine relies on, `data.len() == width * height * 4`.
//
// Allocation, copying and resampling are delegated to the `image` crate. The raster
// converts to and from `image::RgbaImage` losslessly so the pipeline can hand it
// to `imageops::resize` when a smaller scoring raster is requested.

use crate::core_modules::pixel::{CHANNELS, Pixel};
use crate::error::{Error, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

/// Channel index that holds the detail measure in an output raster.
pub const DETAIL_CHANNEL: usize = 1;
/// Channel index that holds the saturation measure in an output raster.
pub const SATURATION_CHANNEL: usize = 2;

/// Resampling filter used when shrinking the channel map before scoring.
const DOWNSAMPLE_FILTER: FilterType = FilterType::Triangle;

/// Size of the original image, used to normalize coordinates for importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// An owned RGBA8 pixel grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Allocates a zeroed raster.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; Self::buffer_len(width, height)],
        }
    }

    /// Wraps an existing RGBA buffer, checking its length.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = Self::buffer_len(width, height);
        if data.len() != expected {
            return Err(Error::InvalidBuffer {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Draws a decoded image into a new raster of the same size.
    pub fn from_image(image: &DynamicImage) -> Self {
        Self::from(image.to_rgba8())
    }

    fn buffer_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * CHANNELS
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of the first channel of pixel `(x, y)`.
    #[inline]
    pub fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    pub fn pixel(&self, x: u32, y: u32) -> Pixel {
        let p = self.offset(x, y);
        Pixel::new(
            self.data[p],
            self.data[p + 1],
            self.data[p + 2],
            self.data[p + 3],
        )
    }

    #[inline]
    pub fn channel(&self, x: u32, y: u32, channel: usize) -> u8 {
        self.data[self.offset(x, y) + channel]
    }

    /// Redraws this raster at `width` x `height`. Returns a plain copy when the
    /// size is unchanged.
    pub fn resample(&self, width: u32, height: u32) -> Raster {
        if width == self.width && height == self.height {
            return self.clone();
        }
        let source = self.to_rgba_image();
        Raster::from(imageops::resize(&source, width, height, DOWNSAMPLE_FILTER))
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.width, self.height);
        image.copy_from_slice(&self.data);
        image
    }
}

impl From<RgbaImage> for Raster {
    fn from(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: image.into_raw(),
        }
    }
}

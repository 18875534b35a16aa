pub mod edge_detector;
pub mod importance;
pub mod pixel;
pub mod raster;
pub mod saturation_detector;
pub mod scorer;
pub mod utils;

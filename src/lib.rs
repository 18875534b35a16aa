// THEORY:
// This is the entry point of the `image_interestingness` library crate. It scores
// how "interesting" an image is, for driving automatic crops: more detail, more
// saturated color and better composition all raise the score.
//
// The high-level interface is `InterestingnessPipeline` (synchronous, one image at
// a time) and `ParallelPipeline` (a tokio worker pool for batches). Both are built
// from a `Config` and return a `Score`. The individual stages live in
// `core_modules` and are public for callers that want a single pass, such as the
// importance function on its own.

pub mod config;
pub mod core_modules;
pub mod error;
pub mod parallel_pipeline;
pub mod pipeline;

pub use config::Config;
pub use core_modules::raster::{Dimensions, Raster};
pub use error::{Error, Result};
pub use parallel_pipeline::ParallelPipeline;
pub use pipeline::{InterestingnessPipeline, Score};

// THEORY:
// Importance is the spatial half of the score. It answers "how much should a pixel
// at this position count?" without looking at the pixel at all.
//
// Coordinates are folded into distances from the center, `px` and `py`, each 0 at
// the center and 1 at the frame edge. Three terms are then combined:
// 1.  **Center bias**: `1.41 - |(px, py)|`, highest in the middle and slightly
//     negative in the corners.
// 2.  **Edge suppression**: once a pixel is within `edge_radius` of the border the
//     squared overshoot is multiplied by `edge_weight` (large and negative by
//     default), so content hugging the frame is heavily penalized.
// 3.  **Rule of thirds** (optional): a narrow bump around the thirds gridlines,
//     scaled by how positive the rest of the score already is.
//
// The constants 1.41, 1.2, 0.5 and 16 are empirically tuned. Scores are only
// meaningful relative to this exact formula, so they stay literal.

use crate::config::Config;
use crate::core_modules::raster::Dimensions;

pub type Importance = f64;

/// Spatial weight of the scoring coordinate `(x, y)`.
///
/// `x` and `y` are in the original image's coordinate space and are normalized by
/// `dimensions`, which must be non-empty.
pub fn importance(dimensions: Dimensions, x: f64, y: f64, config: &Config) -> Importance {
    let x = x / dimensions.width as f64;
    let y = y / dimensions.height as f64;

    let px = (0.5 - x).abs() * 2.0;
    let py = (0.5 - y).abs() * 2.0;

    // distance from edge
    let dx = (px - 1.0 + config.edge_radius).max(0.0);
    let dy = (py - 1.0 + config.edge_radius).max(0.0);

    let d = (dx * dx + dy * dy) * config.edge_weight;

    let mut s = 1.41 - (px * px + py * py).sqrt();

    if config.rule_of_thirds {
        s += (0.0f64.max(s + d + 0.5) * 1.2) * (thirds(px) + thirds(py));
    }

    s + d
}

/// Rule-of-thirds weight in [0, 1] for a center distance `x`.
///
/// Peaks at exactly 1 when `x == 1/3`, reaches 0 at 1/8 either side, and repeats
/// with period 2.
pub fn thirds(x: f64) -> f64 {
    let x = ((x - (1.0 / 3.0) + 1.0) % 2.0 * 0.5 - 0.5) * 16.0;
    (1.0 - x * x).max(0.0)
}

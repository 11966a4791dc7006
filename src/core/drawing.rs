//! Linear base <-> pixel conversion for a displayed region

use crate::core::error::{ViewportError, ViewportResult};
use crate::core::navigation::FeatureCoordinate;
use crate::core::region::DisplayedRegion;

/// Label font sizes to try, largest first
pub const FEATURE_LABEL_SIZES: [f64; 3] = [16.0, 12.0, 8.0];

/// Approximate glyph width as a fraction of the font size
const LABEL_GLYPH_WIDTH: f64 = 0.6;

/// Largest font size at which `label` fits in `max_width` pixels
///
/// None when even the smallest size is too wide.
pub fn feature_label_size(label: &str, max_width: f64) -> Option<f64> {
    let glyphs = label.chars().count() as f64;
    FEATURE_LABEL_SIZES
        .iter()
        .copied()
        .find(|size| glyphs * size * LABEL_GLYPH_WIDTH < max_width)
}

/// Horizontal pixel range `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSpan {
    pub start: f64,
    pub end: f64,
}

impl PixelSpan {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// `start < x <= end`
    pub fn holds(&self, x: f64) -> bool {
        self.start < x && x <= self.end
    }

    /// X in `query` at the same fraction of the span as `x` is of this one
    ///
    /// A zero-length span maps everything to `query.start`.
    pub fn project_to(&self, query: &PixelSpan, x: f64) -> f64 {
        let len = self.len();
        if len == 0.0 {
            return query.start;
        }
        query.start + query.len() * (x - self.start) / len
    }
}

/// Index of the fragment whose span holds `x`; the last one wins on overlap
pub fn fragment_at(spans: &[PixelSpan], x: f64) -> Option<usize> {
    spans.iter().rposition(|span| span.holds(x))
}

/// Aligned fragment under `x` and the matching X in its query span
///
/// `targets[i]` and `queries[i]` are the two sides of fragment `i`. Returns
/// None when no target span holds `x` or it has no query counterpart.
pub fn locate_fragment(targets: &[PixelSpan], queries: &[PixelSpan], x: f64) -> Option<(usize, f64)> {
    let index = fragment_at(targets, x)?;
    let query = queries.get(index)?;
    Some((index, targets[index].project_to(query, x)))
}

/// Maps the bases of a region linearly onto `[0, draw_width)` pixels
#[derive(Debug, Clone)]
pub struct LinearDrawingModel {
    region: DisplayedRegion,
    draw_width: f64,
    bases_per_pixel: f64,
}

impl LinearDrawingModel {
    pub fn new(region: &DisplayedRegion, draw_width: f64) -> ViewportResult<Self> {
        if !(draw_width.is_finite() && draw_width > 0.0) {
            return Err(ViewportError::InvalidWidth(draw_width));
        }
        Ok(Self {
            region: region.clone(),
            draw_width,
            bases_per_pixel: region.len() as f64 / draw_width,
        })
    }

    pub fn region(&self) -> &DisplayedRegion {
        &self.region
    }

    pub fn draw_width(&self) -> f64 {
        self.draw_width
    }

    pub fn bases_per_pixel(&self) -> f64 {
        self.bases_per_pixel
    }

    pub fn pixels_per_base(&self) -> f64 {
        1.0 / self.bases_per_pixel
    }

    /// Zoomed in far enough to draw single bases
    pub fn shows_individual_bases(&self) -> bool {
        self.bases_per_pixel <= 1.0
    }

    pub fn bases_to_x_width(&self, bases: f64) -> f64 {
        bases / self.bases_per_pixel
    }

    pub fn x_width_to_bases(&self, pixels: f64) -> f64 {
        pixels * self.bases_per_pixel
    }

    /// X coordinate of an absolute base; negative or past `draw_width` when off screen
    pub fn base_to_x(&self, base: f64) -> f64 {
        (base - self.region.start() as f64) / self.bases_per_pixel
    }

    /// Absolute base under an X coordinate
    pub fn x_to_base(&self, x: f64) -> f64 {
        self.region.start() as f64 + x * self.bases_per_pixel
    }

    /// Feature and relative base under an X coordinate
    pub fn x_to_feature_coordinate(&self, x: f64) -> ViewportResult<FeatureCoordinate> {
        let base = self.x_to_base(x).floor();
        let total = self.region.context().total_bases();
        if !(base >= 0.0 && base <= total as f64) {
            let base = base.max(0.0) as u64;
            return Err(ViewportError::OutOfBounds { start: base, end: base, total });
        }
        self.region.context().convert_base_to_feature_coordinate(base as u64)
    }
}

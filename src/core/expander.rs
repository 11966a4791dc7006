//! Region expansion for prefetching
//!
//! Pads a visible region by a multiple of its own length on each side so
//! that a track can fetch and draw off-screen data ahead of panning. The
//! padded region is fitted into the navigation context: margin that would
//! fall off one edge of the genome is moved to the other side, and a
//! request longer than the genome becomes the whole genome.

use crate::core::error::{ViewportError, ViewportResult};
use crate::core::interval::OpenInterval;
use crate::core::region::{fit_within, DisplayedRegion};
use log::debug;

/// Default number of visible widths added on each side
pub const DEFAULT_EXPANSION_RATIO: f64 = 1.0;

/// Result of expanding a visible region
#[derive(Debug, Clone, PartialEq)]
pub struct RegionExpansion {
    /// Padded region, always enclosing the visible one
    pub expanded_region: DisplayedRegion,
    /// Pixel width of `expanded_region` at the visible scale
    pub expanded_width: f64,
    /// Pixel width of the visible region
    pub visible_width: f64,
    /// Pixels added left of the visible region
    pub left_extra_pixels: f64,
    /// Pixels added right of the visible region
    pub right_extra_pixels: f64,
}

impl RegionExpansion {
    /// Where the visible region sits inside the expanded drawing, in pixels
    pub fn visible_x_span(&self) -> (f64, f64) {
        (self.left_extra_pixels, self.left_extra_pixels + self.visible_width)
    }

    /// Whether the expansion added nothing on either side
    pub fn is_noop(&self) -> bool {
        self.left_extra_pixels == 0.0 && self.right_extra_pixels == 0.0
    }
}

/// Pads regions by `ratio` visible widths on each side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionExpander {
    ratio: f64,
}

impl Default for RegionExpander {
    fn default() -> Self {
        Self { ratio: DEFAULT_EXPANSION_RATIO }
    }
}

impl RegionExpander {
    /// `ratio = 1.0` adds one full screen on each side
    pub fn new(ratio: f64) -> ViewportResult<Self> {
        if !(ratio.is_finite() && ratio >= 0.0) {
            return Err(ViewportError::InvalidRatio(ratio));
        }
        Ok(Self { ratio })
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Expand `region`, currently drawn `width` pixels wide
    ///
    /// Extra pixel counts are rounded to the nearest pixel.
    ///
    /// # Errors
    /// `InvalidWidth` when `width` is not a positive finite number. Region
    /// bounds are already checked by `DisplayedRegion::new`.
    pub fn calculate_expansion(&self, width: f64, region: &DisplayedRegion) -> ViewportResult<RegionExpansion> {
        if !(width.is_finite() && width > 0.0) {
            return Err(ViewportError::InvalidWidth(width));
        }

        let (start, end) = (region.start(), region.end());
        let total = region.context().total_bases();

        let region_len = end - start;
        let bases_per_pixel = region_len as f64 / width;
        let margin = (self.ratio * region_len as f64).round() as u64;
        let desired_len = region_len.saturating_add(margin.saturating_mul(2));

        let desired_start = start as i64 - margin.min(i64::MAX as u64) as i64;
        let (new_start, new_end) = fit_within(desired_start, desired_len, total);

        let left_extra_pixels = ((start - new_start) as f64 / bases_per_pixel).round();
        let right_extra_pixels = ((new_end - end) as f64 / bases_per_pixel).round();
        let expanded_width = width + left_extra_pixels + right_extra_pixels;

        let expanded_region = DisplayedRegion::new(region.context().clone(), new_start, new_end)?;

        debug!(
            "Expanded {} -> {} ({}px + {}px left, {}px right)",
            region.absolute_region(),
            OpenInterval { start: new_start, end: new_end },
            width,
            left_extra_pixels,
            right_extra_pixels
        );

        Ok(RegionExpansion {
            expanded_region,
            expanded_width,
            visible_width: width,
            left_extra_pixels,
            right_extra_pixels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::navigation::NavigationContext;
    use std::sync::Arc;

    /// Three 10-base chromosomes, 30 bases in total
    fn toy_region(start: u64, end: u64) -> DisplayedRegion {
        let ctx = Arc::new(
            NavigationContext::from_chrom_sizes("toy", vec![("chr1", 10), ("chr2", 10), ("chr3", 10)]).unwrap(),
        );
        DisplayedRegion::new(ctx, start, end).unwrap()
    }

    #[test]
    fn test_expands_region_in_middle_of_genome() {
        let region = toy_region(10, 15);
        let expansion = RegionExpander::new(1.0).unwrap().calculate_expansion(5.0, &region).unwrap();
        assert_eq!(expansion.expanded_region.absolute_region(), OpenInterval { start: 5, end: 20 });
        assert_eq!(expansion.expanded_width, 15.0);
        assert_eq!(expansion.left_extra_pixels, 5.0);
        assert_eq!(expansion.right_extra_pixels, 5.0);
    }

    #[test]
    fn test_expands_region_on_edge_of_genome() {
        let region = toy_region(0, 5);
        let expansion = RegionExpander::new(1.0).unwrap().calculate_expansion(5.0, &region).unwrap();
        assert_eq!(expansion.expanded_region.absolute_region(), OpenInterval { start: 0, end: 15 });
        assert_eq!(expansion.expanded_width, 15.0);
        assert_eq!(expansion.left_extra_pixels, 0.0);
        assert_eq!(expansion.right_extra_pixels, 10.0);
    }

    #[test]
    fn test_whole_genome_is_unchanged() {
        let region = toy_region(0, 30);
        let expansion = RegionExpander::new(1.0).unwrap().calculate_expansion(30.0, &region).unwrap();
        assert_eq!(expansion.expanded_region, region);
        assert_eq!(expansion.expanded_width, 30.0);
        assert!(expansion.is_noop());
    }

    #[test]
    fn test_right_edge_moves_margin_left() {
        let region = toy_region(25, 30);
        let expansion = RegionExpander::new(1.0).unwrap().calculate_expansion(5.0, &region).unwrap();
        assert_eq!(expansion.expanded_region.absolute_region(), OpenInterval { start: 15, end: 30 });
        assert_eq!(expansion.left_extra_pixels, 10.0);
        assert_eq!(expansion.right_extra_pixels, 0.0);
    }

    #[test]
    fn test_pixel_scale_is_preserved() {
        // 2 pixels per base
        let region = toy_region(10, 15);
        let expansion = RegionExpander::new(0.5).unwrap().calculate_expansion(10.0, &region).unwrap();
        // margin = round(2.5) = 3 bases on each side
        assert_eq!(expansion.expanded_region.absolute_region(), OpenInterval { start: 7, end: 18 });
        assert_eq!(expansion.left_extra_pixels, 6.0);
        assert_eq!(expansion.right_extra_pixels, 6.0);
        assert_eq!(expansion.expanded_width, 22.0);
        assert_eq!(expansion.visible_x_span(), (6.0, 16.0));
    }

    #[test]
    fn test_zero_ratio_is_noop() {
        let region = toy_region(10, 15);
        let expansion = RegionExpander::new(0.0).unwrap().calculate_expansion(5.0, &region).unwrap();
        assert_eq!(expansion.expanded_region, region);
        assert!(expansion.is_noop());
    }

    #[test]
    fn test_invalid_arguments() {
        let region = toy_region(10, 15);
        let expander = RegionExpander::default();
        assert_eq!(expander.ratio(), 1.0);
        assert!(matches!(expander.calculate_expansion(0.0, &region), Err(ViewportError::InvalidWidth(_))));
        assert!(matches!(expander.calculate_expansion(-3.0, &region), Err(ViewportError::InvalidWidth(_))));
        assert!(matches!(expander.calculate_expansion(f64::NAN, &region), Err(ViewportError::InvalidWidth(_))));
        assert!(matches!(RegionExpander::new(-1.0), Err(ViewportError::InvalidRatio(_))));
        assert!(matches!(RegionExpander::new(f64::INFINITY), Err(ViewportError::InvalidRatio(_))));
    }

    #[test]
    fn test_bad_bounds_rejected_before_expansion() {
        let ctx = toy_region(0, 30).context().clone();
        assert!(matches!(DisplayedRegion::new(ctx.clone(), 15, 10), Err(ViewportError::InvalidRange { .. })));
        assert!(matches!(DisplayedRegion::new(ctx.clone(), 25, 31), Err(ViewportError::OutOfBounds { .. })));

        // Every constructible region expands
        let expander = RegionExpander::default();
        for (start, end) in [(0, 1), (29, 30), (0, 30)] {
            let region = DisplayedRegion::new(ctx.clone(), start, end).unwrap();
            assert!(expander.calculate_expansion(1.0, &region).is_ok());
        }
    }
}

//! Navigation context and displayed region property tests

use genome_viewport::core::OpenInterval;
use genome_viewport::{DisplayedRegion, LinearDrawingModel, NavigationContext};
use proptest::prelude::*;
use std::sync::Arc;

// ============================================================================
// Generators
// ============================================================================

fn arb_sizes() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(1u64..100_000, 1..8)
}

fn context_from(sizes: &[u64]) -> Arc<NavigationContext> {
    let named = sizes.iter().enumerate().map(|(i, &size)| (format!("chr{}", i + 1), size));
    Arc::new(NavigationContext::from_chrom_sizes("random", named).unwrap())
}

fn arb_context_and_interval() -> impl Strategy<Value = (Arc<NavigationContext>, u64, u64)> {
    arb_sizes().prop_flat_map(|sizes| {
        let ctx = context_from(&sizes);
        let total = ctx.total_bases();
        (Just(ctx), 0..total).prop_flat_map(move |(ctx, start)| (Just(ctx), Just(start), (start + 1)..=total))
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: total length is the sum of feature lengths
    #[test]
    fn test_total_is_sum_of_features(sizes in arb_sizes()) {
        let ctx = context_from(&sizes);
        prop_assert_eq!(ctx.total_bases(), sizes.iter().sum::<u64>());
        prop_assert_eq!(ctx.feature_count(), sizes.len());
    }

    /// Property: base -> feature coordinate -> base is the identity
    #[test]
    fn test_base_roundtrip((ctx, base, _) in arb_context_and_interval()) {
        let coord = ctx.convert_base_to_feature_coordinate(base).unwrap();
        prop_assert!(coord.relative_base < ctx.features()[coord.feature_index].len());
        let back = ctx.convert_feature_coordinate_to_base(&coord.feature_name, coord.relative_base).unwrap();
        prop_assert_eq!(back, base);
    }

    /// Property: bases past the end are rejected
    #[test]
    fn test_base_past_end_rejected(sizes in arb_sizes(), extra in 1u64..1000) {
        let ctx = context_from(&sizes);
        prop_assert!(ctx.convert_base_to_feature_coordinate(ctx.total_bases() + extra).is_err());
    }

    /// Property: feature segments tile the interval exactly
    #[test]
    fn test_segments_tile_interval((ctx, start, end) in arb_context_and_interval()) {
        let segments = ctx.feature_segments(&OpenInterval { start, end });
        prop_assert!(!segments.is_empty());
        prop_assert_eq!(segments.iter().map(|s| s.len()).sum::<u64>(), end - start);
        prop_assert_eq!(segments.first().unwrap().absolute.start, start);
        prop_assert_eq!(segments.last().unwrap().absolute.end, end);
        for pair in segments.windows(2) {
            prop_assert_eq!(pair[0].absolute.end, pair[1].absolute.start);
        }
    }

    /// Property: genome coordinates of a segment map back to the same absolute interval
    #[test]
    fn test_segment_genome_roundtrip((ctx, start, end) in arb_context_and_interval()) {
        for segment in ctx.feature_segments(&OpenInterval { start, end }) {
            let locus = segment.genome_coordinates();
            let back = ctx.convert_genome_interval_to_bases(&locus);
            prop_assert_eq!(back, vec![segment.absolute]);
        }
    }

    /// Property: pan never leaves the genome and keeps the length
    #[test]
    fn test_pan_stays_inside(
        (ctx, start, end) in arb_context_and_interval(),
        delta in prop_oneof![-200_000i64..200_000, any::<i64>(), Just(i64::MAX), Just(i64::MIN)],
    ) {
        let mut region = DisplayedRegion::new(ctx.clone(), start, end).unwrap();
        let len = region.len();
        region.pan(delta);
        prop_assert_eq!(region.len(), len);
        prop_assert!(region.end() <= ctx.total_bases());
    }

    /// Property: zoom never leaves the genome
    #[test]
    fn test_zoom_stays_inside(
        (ctx, start, end) in arb_context_and_interval(),
        factor in 0.01f64..100.0,
        focal in 0.0f64..=1.0,
    ) {
        let mut region = DisplayedRegion::new(ctx.clone(), start, end).unwrap();
        region.zoom(factor, focal).unwrap();
        prop_assert!(region.start() < region.end());
        prop_assert!(region.end() <= ctx.total_bases());
    }

    /// Property: x -> base -> x is the identity
    #[test]
    fn test_drawing_roundtrip((ctx, start, end) in arb_context_and_interval(), width in 1.0f64..4000.0, x in 0.0f64..4000.0) {
        let region = DisplayedRegion::new(ctx, start, end).unwrap();
        let model = LinearDrawingModel::new(&region, width).unwrap();
        let back = model.base_to_x(model.x_to_base(x));
        prop_assert!((back - x).abs() < 1e-3);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn test_hg19_like_layout() {
    let ctx = NavigationContext::from_chrom_sizes(
        "hg19",
        vec![("chr1", 249_250_621), ("chr2", 243_199_373), ("chrM", 16_571)],
    )
    .unwrap();

    assert_eq!(ctx.feature_start("chr2").unwrap(), 249_250_621);
    assert_eq!(ctx.feature_start("MT").unwrap(), 249_250_621 + 243_199_373);
    assert_eq!(
        ctx.parse_locus("chr2:1,000-2,000").unwrap(),
        OpenInterval { start: 249_251_621, end: 249_252_621 }
    );
}

#[test]
fn test_region_display_and_segments() {
    let ctx = context_from(&[100, 50]);
    let region = DisplayedRegion::new(ctx, 90, 120).unwrap();
    let names: Vec<String> = region.feature_segments().iter().map(|s| s.name().to_string()).collect();
    assert_eq!(names, vec!["chr1", "chr2"]);
    assert_eq!(region.to_string(), "chr1:90-chr2:20");
}

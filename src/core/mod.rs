//! Core coordinate model
//!
//! This module contains the navigation context, displayed regions,
//! base/pixel conversion, and the region expander used for prefetching.

pub mod drawing;
mod error;
mod expander;
pub mod interval;
pub mod io;
mod navigation;
mod prefetch;
mod region;
pub mod throttle;

pub use drawing::{feature_label_size, fragment_at, locate_fragment, LinearDrawingModel, PixelSpan};
pub use error::{
    GenomeFileError, GenomeFileResult, GenomeViewError, Result, ViewportError, ViewportResult,
};
pub use expander::{RegionExpander, RegionExpansion, DEFAULT_EXPANSION_RATIO};
pub use interval::{chroms_equivalent, intersect_intervals, normalize_chrom, ChromosomeInterval, OpenInterval};
pub use navigation::{Feature, FeatureCoordinate, FeatureSegment, NavigationContext};
pub use prefetch::Prefetcher;
pub use region::DisplayedRegion;
pub use throttle::{FetchGate, FetchPolicy};

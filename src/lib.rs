//! genome-viewport - coordinate geometry for linear genome browsers
//!
//! Models the absolute coordinate space of a genome browser view and the
//! arithmetic around it.
//!
//! # Features
//!
//! - Navigation contexts: named features laid end to end
//! - Displayed regions with clamped pan and zoom
//! - Base <-> pixel conversion
//! - Region expansion for prefetching, with explicit fetch throttling
//! - chrom.sizes and cytoBand loaders (gzip/bzip2 aware)
//!
//! # Example
//!
//! ```
//! use genome_viewport::{DisplayedRegion, NavigationContext, RegionExpander};
//! use std::sync::Arc;
//!
//! let genome = NavigationContext::from_chrom_sizes("toy", vec![("chr1", 10), ("chr2", 10), ("chr3", 10)])?;
//! let region = DisplayedRegion::new(Arc::new(genome), 10, 15)?;
//!
//! let expansion = RegionExpander::new(1.0)?.calculate_expansion(5.0, &region)?;
//! assert_eq!((expansion.expanded_region.start(), expansion.expanded_region.end()), (5, 20));
//! assert_eq!(expansion.expanded_width, 15.0);
//! # Ok::<(), genome_viewport::ViewportError>(())
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use crate::core::{
    ChromosomeInterval, DisplayedRegion, Feature, FeatureCoordinate, FeatureSegment, FetchGate,
    FetchPolicy, GenomeFileError, GenomeViewError, LinearDrawingModel, NavigationContext,
    OpenInterval, Prefetcher, RegionExpander, RegionExpansion, ViewportError,
};
pub use crate::formats::{chrom_sizes, cytoband};

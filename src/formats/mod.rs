//! File format adapters
//!
//! Loaders for genome layout (chrom.sizes) and ideogram annotation (cytoBand).

pub mod chrom_sizes;
pub mod cytoband;

pub use chrom_sizes::{load_chrom_sizes, load_navigation_context, load_region, parse_chrom_sizes_reader};
pub use cytoband::{Cytoband, CytobandIndex, PlacedCytoband, Stain, StainColors};

//! Cytoband adapter
//!
//! Loads UCSC `cytoBand.txt` tables (`chrom start end name gieStain`) into
//! per-chromosome interval trees and places bands on a displayed region for
//! ideogram drawing.

use crate::core::io::open_text;
use crate::core::{
    normalize_chrom, ChromosomeInterval, DisplayedRegion, GenomeFileError, GenomeFileResult, OpenInterval,
};
use log::{info, warn};
use rust_lapper::{Interval, Lapper};
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

/// Giemsa stain of a band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stain {
    Gneg,
    Gpos25,
    Gpos33,
    Gpos50,
    Gpos66,
    Gpos75,
    Gpos100,
    Gvar,
    Stalk,
    /// Centromere
    Acen,
}

/// Fill and label colours for a stain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StainColors {
    pub band: &'static str,
    pub text: &'static str,
}

impl Stain {
    /// Parse a `gieStain` column value
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "gneg" => Some(Stain::Gneg),
            "gpos25" => Some(Stain::Gpos25),
            "gpos33" => Some(Stain::Gpos33),
            "gpos50" => Some(Stain::Gpos50),
            "gpos66" => Some(Stain::Gpos66),
            "gpos75" => Some(Stain::Gpos75),
            "gpos100" => Some(Stain::Gpos100),
            "gvar" => Some(Stain::Gvar),
            "stalk" => Some(Stain::Stalk),
            "acen" => Some(Stain::Acen),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stain::Gneg => "gneg",
            Stain::Gpos25 => "gpos25",
            Stain::Gpos33 => "gpos33",
            Stain::Gpos50 => "gpos50",
            Stain::Gpos66 => "gpos66",
            Stain::Gpos75 => "gpos75",
            Stain::Gpos100 => "gpos100",
            Stain::Gvar => "gvar",
            Stain::Stalk => "stalk",
            Stain::Acen => "acen",
        }
    }

    pub fn colors(&self) -> StainColors {
        const BLACK: &str = "rgb(0,0,0)";
        const WHITE: &str = "rgb(255,255,255)";
        let (band, text) = match self {
            Stain::Gneg => (WHITE, BLACK),
            Stain::Gpos25 => ("rgb(180,180,180)", BLACK),
            Stain::Gpos33 => ("rgb(142,142,142)", WHITE),
            Stain::Gpos50 => ("rgb(120,120,120)", WHITE),
            Stain::Gpos66 => ("rgb(57,57,57)", WHITE),
            Stain::Gpos75 => ("rgb(60,60,60)", WHITE),
            Stain::Gpos100 | Stain::Gvar => (BLACK, WHITE),
            Stain::Stalk => ("rgb(180,180,180)", BLACK),
            Stain::Acen => ("rgb(141,64,52)", WHITE),
        };
        StainColors { band, text }
    }

    pub fn is_centromere(&self) -> bool {
        matches!(self, Stain::Acen)
    }
}

/// One cytoband record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cytoband {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub name: String,
    pub stain: Stain,
}

impl Cytoband {
    pub fn locus(&self) -> ChromosomeInterval {
        ChromosomeInterval { chr: self.chrom.clone(), start: self.start, end: self.end }
    }
}

/// A cytoband placed in a region's absolute coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedCytoband {
    pub band: Cytoband,
    /// Absolute interval, clipped to the region
    pub absolute: OpenInterval,
}

/// Cytobands indexed by chromosome
#[derive(Debug, Default)]
pub struct CytobandIndex {
    /// Normalized chromosome -> interval tree (using Lapper)
    maps: HashMap<String, Lapper<u64, Cytoband>>,
    count: usize,
}

impl CytobandIndex {
    pub fn from_records(records: Vec<Cytoband>) -> Self {
        let count = records.len();
        let mut by_chrom: HashMap<String, Vec<Interval<u64, Cytoband>>> = HashMap::new();
        for band in records {
            by_chrom.entry(normalize_chrom(&band.chrom)).or_default().push(Interval {
                start: band.start,
                stop: band.end,
                val: band,
            });
        }

        let maps = by_chrom
            .into_iter()
            .map(|(chrom, intervals)| (chrom, Lapper::new(intervals)))
            .collect();
        Self { maps, count }
    }

    /// Parse a cytoband table
    ///
    /// Rows with an unrecognised stain are skipped with a warning.
    pub fn parse_reader<R: BufRead>(reader: R) -> GenomeFileResult<Self> {
        let mut records = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = index + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = trimmed.split('\t').collect();
            if fields.len() < 5 {
                return Err(GenomeFileError::InvalidRecord {
                    line: line_number,
                    message: format!("expected 5 fields, got {}", fields.len()),
                });
            }

            let parse_pos = |value: &str| {
                value.parse::<u64>().map_err(|_| GenomeFileError::ParseInt {
                    line: line_number,
                    value: value.to_string(),
                })
            };
            let start = parse_pos(fields[1])?;
            let end = parse_pos(fields[2])?;
            if start >= end {
                return Err(GenomeFileError::InvalidRecord {
                    line: line_number,
                    message: format!("start ({}) >= end ({})", start, end),
                });
            }

            let Some(stain) = Stain::parse(fields[4]) else {
                warn!("Skipping cytoband at line {}: unknown stain '{}'", line_number, fields[4]);
                continue;
            };

            records.push(Cytoband {
                chrom: fields[0].to_string(),
                start,
                end,
                name: fields[3].to_string(),
                stain,
            });
        }

        Ok(Self::from_records(records))
    }

    /// Parse cytoband content from bytes (for testing)
    pub fn parse_bytes(data: &[u8]) -> GenomeFileResult<Self> {
        Self::parse_reader(data)
    }

    /// Load a cytoband file; gzip and bzip2 are detected automatically
    pub fn from_file(path: &Path) -> GenomeFileResult<Self> {
        if !path.exists() {
            return Err(GenomeFileError::FileNotFound(path.to_path_buf()));
        }
        let index = Self::parse_reader(open_text(path)?)?;
        info!("Loaded {} cytobands on {} chromosomes", index.len(), index.maps.len());
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Bands overlapping a locus, ordered by start
    pub fn query(&self, locus: &ChromosomeInterval) -> Vec<&Cytoband> {
        let Some(lapper) = self.maps.get(&normalize_chrom(&locus.chr)) else {
            return Vec::new();
        };
        let mut bands: Vec<&Cytoband> = lapper.find(locus.start, locus.end).map(|iv| &iv.val).collect();
        bands.sort_by_key(|band| band.start);
        bands
    }

    /// Bands visible in a region, in absolute coordinates clipped to it
    pub fn bands_in_view(&self, region: &DisplayedRegion) -> Vec<PlacedCytoband> {
        let mut placed = Vec::new();
        for segment in region.feature_segments() {
            let locus = segment.genome_coordinates();
            for band in self.query(&locus) {
                if let Some(overlap) = band.locus().overlap(&locus) {
                    let start = segment.absolute.start + (overlap.start - locus.start);
                    placed.push(PlacedCytoband {
                        band: band.clone(),
                        absolute: OpenInterval { start, end: start + overlap.len() },
                    });
                }
            }
        }
        placed
    }
}

//! Navigation context: the absolute coordinate space
//!
//! A navigation context lays its features (usually chromosomes) end to end,
//! giving one linear axis of `total_bases()` bases. Cumulative offsets make
//! feature starts O(1) and base lookups O(log n).

use crate::core::error::{ViewportError, ViewportResult};
use crate::core::interval::{normalize_chrom, ChromosomeInterval, OpenInterval};
use std::collections::HashMap;

/// A named, contiguous piece of the genome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    name: String,
    locus: ChromosomeInterval,
}

impl Feature {
    pub fn new(name: impl Into<String>, locus: ChromosomeInterval) -> Self {
        Self { name: name.into(), locus }
    }

    /// Feature covering a whole chromosome `[0, size)`
    pub fn whole_chromosome(chrom: impl Into<String>, size: u64) -> Self {
        let chrom = chrom.into();
        Self {
            name: chrom.clone(),
            locus: ChromosomeInterval { chr: chrom, start: 0, end: size },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn locus(&self) -> &ChromosomeInterval {
        &self.locus
    }

    pub fn len(&self) -> u64 {
        self.locus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locus.is_empty()
    }
}

/// A base expressed relative to the feature containing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureCoordinate {
    pub feature_index: usize,
    pub feature_name: String,
    /// 0-based offset from the feature start
    pub relative_base: u64,
}

/// The part of one feature covered by an absolute interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSegment {
    pub feature: Feature,
    /// Range relative to the feature start
    pub relative: OpenInterval,
    /// Same range in absolute coordinates
    pub absolute: OpenInterval,
}

impl FeatureSegment {
    pub fn name(&self) -> &str {
        self.feature.name()
    }

    pub fn len(&self) -> u64 {
        self.relative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relative.is_empty()
    }

    /// Genomic locus of this segment, e.g. `chr1:100-200`
    pub fn genome_coordinates(&self) -> ChromosomeInterval {
        let locus = self.feature.locus();
        ChromosomeInterval {
            chr: locus.chr.clone(),
            start: locus.start + self.relative.start,
            end: locus.start + self.relative.end,
        }
    }
}

/// Ordered features laid end to end
#[derive(Debug, Clone)]
pub struct NavigationContext {
    name: String,
    features: Vec<Feature>,
    /// Absolute start of each feature
    offsets: Vec<u64>,
    total_bases: u64,
    /// Normalized feature name -> index
    by_name: HashMap<String, usize>,
}

impl NavigationContext {
    /// Build a context from features in display order
    pub fn new(name: impl Into<String>, features: Vec<Feature>) -> ViewportResult<Self> {
        let name = name.into();
        if features.is_empty() {
            return Err(ViewportError::EmptyContext(name));
        }

        let mut offsets = Vec::with_capacity(features.len());
        let mut by_name = HashMap::with_capacity(features.len());
        let mut total_bases = 0u64;

        for (index, feature) in features.iter().enumerate() {
            if feature.is_empty() {
                return Err(ViewportError::EmptyFeature(feature.name.clone()));
            }
            if by_name.insert(normalize_chrom(&feature.name), index).is_some() {
                return Err(ViewportError::DuplicateFeature(feature.name.clone()));
            }
            offsets.push(total_bases);
            total_bases += feature.len();
        }

        Ok(Self { name, features, offsets, total_bases, by_name })
    }

    /// Build a context of whole chromosomes from `(name, size)` pairs
    pub fn from_chrom_sizes<I, S>(name: impl Into<String>, sizes: I) -> ViewportResult<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let features = sizes
            .into_iter()
            .map(|(chrom, size)| Feature::whole_chromosome(chrom, size))
            .collect();
        Self::new(name, features)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Total length L of the absolute coordinate space
    pub fn total_bases(&self) -> u64 {
        self.total_bases
    }

    /// Index of a feature; accepts chr1/1/CHR1 spellings
    pub fn feature_index(&self, name: &str) -> ViewportResult<usize> {
        self.by_name
            .get(&normalize_chrom(name))
            .copied()
            .ok_or_else(|| ViewportError::FeatureNotFound(name.to_string()))
    }

    pub fn feature(&self, name: &str) -> ViewportResult<&Feature> {
        self.feature_index(name).map(|i| &self.features[i])
    }

    /// Absolute base where a feature begins
    pub fn feature_start(&self, name: &str) -> ViewportResult<u64> {
        self.feature_index(name).map(|i| self.offsets[i])
    }

    /// Absolute interval occupied by a feature
    pub fn feature_interval(&self, name: &str) -> ViewportResult<OpenInterval> {
        let index = self.feature_index(name)?;
        let start = self.offsets[index];
        Ok(OpenInterval { start, end: start + self.features[index].len() })
    }

    /// Map an absolute base to the feature containing it
    ///
    /// `base == total_bases()` maps to the end of the last feature.
    pub fn convert_base_to_feature_coordinate(&self, base: u64) -> ViewportResult<FeatureCoordinate> {
        if base > self.total_bases {
            return Err(ViewportError::OutOfBounds { start: base, end: base, total: self.total_bases });
        }

        let index = if base == self.total_bases {
            self.features.len() - 1
        } else {
            self.offsets.partition_point(|&offset| offset <= base) - 1
        };

        Ok(FeatureCoordinate {
            feature_index: index,
            feature_name: self.features[index].name.clone(),
            relative_base: base - self.offsets[index],
        })
    }

    /// Inverse of `convert_base_to_feature_coordinate`
    pub fn convert_feature_coordinate_to_base(&self, name: &str, relative_base: u64) -> ViewportResult<u64> {
        let index = self.feature_index(name)?;
        let len = self.features[index].len();
        if relative_base > len {
            return Err(ViewportError::OutOfBounds { start: relative_base, end: relative_base, total: len });
        }
        Ok(self.offsets[index] + relative_base)
    }

    /// Absolute intervals where a genomic locus overlaps features
    ///
    /// A locus can appear more than once when several features cover the
    /// same chromosome.
    pub fn convert_genome_interval_to_bases(&self, locus: &ChromosomeInterval) -> Vec<OpenInterval> {
        self.features
            .iter()
            .zip(&self.offsets)
            .filter_map(|(feature, &offset)| {
                feature.locus.overlap(locus).map(|overlap| OpenInterval {
                    start: offset + (overlap.start - feature.locus.start),
                    end: offset + (overlap.end - feature.locus.start),
                })
            })
            .collect()
    }

    /// Feature pieces covered by an absolute interval, in order
    ///
    /// The interval is clipped to `[0, total_bases())`.
    pub fn feature_segments(&self, interval: &OpenInterval) -> Vec<FeatureSegment> {
        let end = interval.end.min(self.total_bases);
        if interval.start >= end {
            return Vec::new();
        }

        let first = self.offsets.partition_point(|&offset| offset <= interval.start) - 1;
        let mut segments = Vec::new();

        for index in first..self.features.len() {
            let offset = self.offsets[index];
            if offset >= end {
                break;
            }
            let feature = &self.features[index];
            let abs_start = interval.start.max(offset);
            let abs_end = end.min(offset + feature.len());
            segments.push(FeatureSegment {
                feature: feature.clone(),
                relative: OpenInterval { start: abs_start - offset, end: abs_end - offset },
                absolute: OpenInterval { start: abs_start, end: abs_end },
            });
        }

        segments
    }

    /// Parse `chr:start-end` or a bare feature name into absolute coordinates
    ///
    /// A locus is clipped to the first feature it overlaps.
    pub fn parse_locus(&self, text: &str) -> ViewportResult<OpenInterval> {
        let text = text.trim();
        if !text.contains(':') {
            return self.feature_interval(text);
        }

        let locus: ChromosomeInterval = text.parse()?;
        self.feature_index(&locus.chr)?;
        self.convert_genome_interval_to_bases(&locus)
            .into_iter()
            .next()
            .ok_or(ViewportError::OutOfBounds { start: locus.start, end: locus.end, total: self.total_bases })
    }
}

//! Half-open intervals
//!
//! `OpenInterval` lives in the absolute coordinate space of a navigation
//! context; `ChromosomeInterval` is a genomic locus such as `chr1:100-200`.

use crate::core::error::{ViewportError, ViewportResult};
use std::fmt;
use std::str::FromStr;

/// Compute the intersection of two half-open intervals
///
/// Returns None if the intervals don't overlap (touching counts as no overlap).
#[inline]
pub fn intersect_intervals(start1: u64, end1: u64, start2: u64, end2: u64) -> Option<(u64, u64)> {
    if start1 >= end2 || end1 <= start2 {
        return None;
    }
    Some((start1.max(start2), end1.min(end2)))
}

/// Normalize chromosome name for lookup (handles chr1/1/CHR1 variants)
///
/// # Examples
/// ```
/// use genome_viewport::core::normalize_chrom;
/// assert_eq!(normalize_chrom("chr1"), "1");
/// assert_eq!(normalize_chrom("chrM"), "MT");
/// assert_eq!(normalize_chrom("x"), "X");
/// ```
pub fn normalize_chrom(chrom: &str) -> String {
    let without_prefix = match (chrom.get(..3), chrom.get(3..)) {
        (Some(prefix), Some(rest)) if !rest.is_empty() && prefix.eq_ignore_ascii_case("chr") => rest,
        _ => chrom,
    };

    let upper = without_prefix.to_uppercase();
    if upper == "M" {
        "MT".to_string()
    } else {
        upper
    }
}

/// Check if two chromosome names are equivalent
pub fn chroms_equivalent(chrom1: &str, chrom2: &str) -> bool {
    normalize_chrom(chrom1) == normalize_chrom(chrom2)
}

/// Interval `[start, end)` of absolute bases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpenInterval {
    pub start: u64,
    pub end: u64,
}

impl OpenInterval {
    /// Create an interval; fails if `start > end`
    pub fn new(start: u64, end: u64) -> ViewportResult<Self> {
        if start > end {
            return Err(ViewportError::InvalidRange { start: start as i64, end: end as i64 });
        }
        Ok(Self { start, end })
    }

    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, pos: u64) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Whether `other` lies entirely inside this interval
    pub fn encloses(&self, other: &OpenInterval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn overlap(&self, other: &OpenInterval) -> Option<OpenInterval> {
        intersect_intervals(self.start, self.end, other.start, other.end)
            .map(|(start, end)| OpenInterval { start, end })
    }
}

impl fmt::Display for OpenInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// A genomic locus: chromosome name plus 0-based half-open range
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChromosomeInterval {
    pub chr: String,
    pub start: u64,
    pub end: u64,
}

impl ChromosomeInterval {
    pub fn new(chr: impl Into<String>, start: u64, end: u64) -> ViewportResult<Self> {
        if start > end {
            return Err(ViewportError::InvalidRange { start: start as i64, end: end as i64 });
        }
        Ok(Self { chr: chr.into(), start, end })
    }

    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Overlap with another locus; None on different chromosomes
    pub fn overlap(&self, other: &ChromosomeInterval) -> Option<ChromosomeInterval> {
        if !chroms_equivalent(&self.chr, &other.chr) {
            return None;
        }
        intersect_intervals(self.start, self.end, other.start, other.end).map(|(start, end)| {
            ChromosomeInterval { chr: self.chr.clone(), start, end }
        })
    }
}

impl fmt::Display for ChromosomeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chr, self.start, self.end)
    }
}

fn parse_position(value: &str, locus: &str) -> ViewportResult<u64> {
    let digits: String = value.trim().chars().filter(|c| *c != ',').collect();
    digits
        .parse()
        .map_err(|_| ViewportError::InvalidLocus(locus.to_string()))
}

impl FromStr for ChromosomeInterval {
    type Err = ViewportError;

    /// Parse `chr:start-end`; thousands separators are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (chr, range) = trimmed
            .rsplit_once(':')
            .ok_or_else(|| ViewportError::InvalidLocus(s.to_string()))?;
        let (start, end) = range
            .split_once('-')
            .ok_or_else(|| ViewportError::InvalidLocus(s.to_string()))?;

        if chr.is_empty() {
            return Err(ViewportError::InvalidLocus(s.to_string()));
        }

        let start = parse_position(start, s)?;
        let end = parse_position(end, s)?;
        if start >= end {
            return Err(ViewportError::InvalidRange { start: start as i64, end: end as i64 });
        }
        Ok(Self { chr: chr.to_string(), start, end })
    }
}

//! The visible window into a navigation context

use crate::core::error::{ViewportError, ViewportResult};
use crate::core::interval::OpenInterval;
use crate::core::navigation::{FeatureSegment, NavigationContext};
use std::fmt;
use std::sync::Arc;

/// Fit an interval of `len` bases starting near `start` into `[0, total)`
///
/// The interval is shifted, never shrunk, unless it is longer than the
/// whole coordinate space.
pub(crate) fn fit_within(start: i64, len: u64, total: u64) -> (u64, u64) {
    if len >= total {
        return (0, total);
    }
    let max_start = total - len;
    let start = start.clamp(0, max_start as i64) as u64;
    (start, start + len)
}

/// Region `[start, end)` of a navigation context's absolute coordinates
///
/// Always satisfies `0 <= start < end <= context.total_bases()`.
#[derive(Debug, Clone)]
pub struct DisplayedRegion {
    context: Arc<NavigationContext>,
    start: u64,
    end: u64,
}

impl DisplayedRegion {
    pub fn new(context: Arc<NavigationContext>, start: u64, end: u64) -> ViewportResult<Self> {
        if start >= end {
            return Err(ViewportError::InvalidRange { start: start as i64, end: end as i64 });
        }
        let total = context.total_bases();
        if end > total {
            return Err(ViewportError::OutOfBounds { start, end, total });
        }
        Ok(Self { context, start, end })
    }

    /// Region spanning the whole context
    pub fn whole(context: Arc<NavigationContext>) -> Self {
        let end = context.total_bases();
        Self { context, start: 0, end }
    }

    /// Region for a locus string such as `chr1:100-200`
    pub fn from_locus(context: Arc<NavigationContext>, locus: &str) -> ViewportResult<Self> {
        let interval = context.parse_locus(locus)?;
        Self::new(context, interval.start, interval.end)
    }

    pub fn context(&self) -> &Arc<NavigationContext> {
        &self.context
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// Always false; a displayed region has at least one base
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn absolute_region(&self) -> OpenInterval {
        OpenInterval { start: self.start, end: self.end }
    }

    /// Whether the region covers the whole navigation context
    pub fn is_whole(&self) -> bool {
        self.start == 0 && self.end == self.context.total_bases()
    }

    /// Feature pieces visible in this region
    pub fn feature_segments(&self) -> Vec<FeatureSegment> {
        self.context.feature_segments(&self.absolute_region())
    }

    /// Move to `[start, end)`, shifting the request back inside the genome
    ///
    /// A request longer than the genome becomes the whole genome.
    pub fn set_region(&mut self, start: i64, end: i64) -> ViewportResult<()> {
        if start >= end {
            return Err(ViewportError::InvalidRange { start, end });
        }
        let (start, end) = fit_within(start, end.abs_diff(start), self.context.total_bases());
        self.start = start;
        self.end = end;
        Ok(())
    }

    /// Shift by `bases` (negative pans left), keeping the length
    pub fn pan(&mut self, bases: i64) {
        let start = (self.start as i64).saturating_add(bases);
        let (start, end) = fit_within(start, self.len(), self.context.total_bases());
        self.start = start;
        self.end = end;
    }

    /// Scale the length by `factor` around `focal_point`
    ///
    /// `focal_point` is a fraction of the region (0.5 = centre) that stays
    /// at the same base; `factor > 1` zooms out.
    pub fn zoom(&mut self, factor: f64, focal_point: f64) -> ViewportResult<()> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(ViewportError::InvalidZoom(factor));
        }
        let focal_point = if focal_point.is_finite() { focal_point.clamp(0.0, 1.0) } else { 0.5 };

        let len = self.len() as f64;
        let new_len = (len * factor).round().max(1.0);
        let focal_base = self.start as f64 + len * focal_point;
        let new_start = (focal_base - new_len * focal_point).round();

        let (start, end) = fit_within(new_start as i64, new_len as u64, self.context.total_bases());
        self.start = start;
        self.end = end;
        Ok(())
    }
}

impl PartialEq for DisplayedRegion {
    fn eq(&self, other: &Self) -> bool {
        let same_context = Arc::ptr_eq(&self.context, &other.context)
            || (self.context.name() == other.context.name()
                && self.context.total_bases() == other.context.total_bases());
        same_context && self.start == other.start && self.end == other.end
    }
}

impl Eq for DisplayedRegion {}

impl fmt::Display for DisplayedRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments = self.feature_segments();
        match (segments.first(), segments.last()) {
            (Some(first), Some(_)) if segments.len() == 1 => {
                write!(f, "{}", first.genome_coordinates())
            }
            (Some(first), Some(last)) => {
                let first = first.genome_coordinates();
                let last = last.genome_coordinates();
                write!(f, "{}:{}-{}:{}", first.chr, first.start, last.chr, last.end)
            }
            _ => write!(f, "{}", self.absolute_region()),
        }
    }
}

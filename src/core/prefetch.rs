//! Prefetch scheduling for a single view
//!
//! Combines a `RegionExpander` with a caller-chosen `FetchPolicy`: each view
//! change yields the padded region to fetch, subject to the policy.

use crate::core::error::ViewportResult;
use crate::core::expander::{RegionExpander, RegionExpansion};
use crate::core::region::DisplayedRegion;
use crate::core::throttle::{FetchGate, FetchPolicy};
use log::debug;
use std::sync::Arc;
use std::time::Instant;

/// Decides what to fetch as the visible region changes
#[derive(Debug, Clone)]
pub struct Prefetcher {
    expander: RegionExpander,
    gate: FetchGate,
    /// Deferred expansion and the view's bases-per-pixel
    pending: Option<(RegionExpansion, f64)>,
    /// Last fetched region and the view bases-per-pixel it was fetched for
    fetched: Option<(DisplayedRegion, f64)>,
}

impl Prefetcher {
    pub fn new(expander: RegionExpander, policy: FetchPolicy) -> Self {
        Self {
            expander,
            gate: FetchGate::new(policy),
            pending: None,
            fetched: None,
        }
    }

    pub fn expander(&self) -> &RegionExpander {
        &self.expander
    }

    /// Region covered by the last fetch
    pub fn last_fetched(&self) -> Option<&DisplayedRegion> {
        self.fetched.as_ref().map(|(region, _)| region)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Handle a view change
    ///
    /// Returns the expansion to fetch now, or `None` when the policy defers
    /// the fetch (see `poll`) or the last fetch already covers the view at
    /// the same scale.
    pub fn on_view_change(
        &mut self,
        width: f64,
        region: &DisplayedRegion,
        now: Instant,
    ) -> ViewportResult<Option<RegionExpansion>> {
        let expansion = self.expander.calculate_expansion(width, region)?;
        let bases_per_pixel = region.len() as f64 / width;

        if self.is_covered(region, bases_per_pixel) {
            debug!("View {} already fetched, skipping", region.absolute_region());
            self.pending = None;
            self.gate.cancel();
            return Ok(None);
        }

        if self.gate.request(now) {
            self.pending = None;
            Ok(Some(self.record_fetch(expansion, bases_per_pixel)))
        } else {
            debug!("Deferring fetch for {}", region.absolute_region());
            self.pending = Some((expansion, bases_per_pixel));
            Ok(None)
        }
    }

    /// Deferred expansion, once the policy allows it
    pub fn poll(&mut self, now: Instant) -> Option<RegionExpansion> {
        if self.pending.is_none() || !self.gate.poll(now) {
            return None;
        }
        self.pending
            .take()
            .map(|(expansion, bases_per_pixel)| self.record_fetch(expansion, bases_per_pixel))
    }

    fn is_covered(&self, region: &DisplayedRegion, bases_per_pixel: f64) -> bool {
        let Some((fetched, fetched_bases_per_pixel)) = &self.fetched else {
            return false;
        };
        Arc::ptr_eq(fetched.context(), region.context())
            && bases_per_pixel == *fetched_bases_per_pixel
            && fetched.absolute_region().encloses(&region.absolute_region())
    }

    /// Expanded widths are rounded to whole pixels, so the scale is taken
    /// from the visible view rather than the expansion.
    fn record_fetch(&mut self, expansion: RegionExpansion, bases_per_pixel: f64) -> RegionExpansion {
        debug!("Fetching {}", expansion.expanded_region.absolute_region());
        self.fetched = Some((expansion.expanded_region.clone(), bases_per_pixel));
        expansion
    }
}

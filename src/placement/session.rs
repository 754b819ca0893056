use std::sync::Arc;

use crate::assets::library::StampAsset;
use crate::config::PlacementConfig;
use crate::foundation::core::Point;
use crate::foundation::rng::RandomSource;
use crate::placement::footprint::Footprint;
use crate::placement::overlap::{OverlapEvaluator, PlacementSpec, overlap_percent};

/// One stamp on the page.
#[derive(Clone, Debug)]
pub struct PlacedStamp {
    pub asset: Arc<StampAsset>,
    pub center: Point,
    pub size_multiplier: f64,
    /// Rendered raster, page box and opaque count; computed once when placed.
    pub footprint: Footprint,
}

/// Decides which existing placements a new one displaces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReplacePolicy {
    /// Overlap percentage at or above which an existing placement is removed.
    pub threshold_pct: f64,
}

impl Default for ReplacePolicy {
    fn default() -> Self {
        Self {
            threshold_pct: 10.0,
        }
    }
}

impl ReplacePolicy {
    /// The boundary value itself displaces: `overlap == threshold` removes.
    pub fn displaces(self, overlap_pct: f64) -> bool {
        overlap_pct > 0.0 && overlap_pct >= self.threshold_pct
    }
}

/// Result of a placement gesture.
#[derive(Clone, Debug)]
pub struct PlacementOutcome {
    /// Placements displaced by the new stamp, in their former page order.
    pub removed: Vec<PlacedStamp>,
}

impl PlacementOutcome {
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    /// `true` when nothing was displaced: the placement counts as new progress.
    pub fn is_distinct(&self) -> bool {
        self.removed.is_empty()
    }
}

/// Owner of the page content: the ordered list of placed stamps (bottom to top).
#[derive(Debug)]
pub struct PlacementSession {
    placements: Vec<PlacedStamp>,
    evaluator: OverlapEvaluator,
    policy: ReplacePolicy,
    multiplier_range: (f64, f64),
}

impl Default for PlacementSession {
    fn default() -> Self {
        Self::from_config(&PlacementConfig::default())
    }
}

impl PlacementSession {
    pub fn new(
        evaluator: OverlapEvaluator,
        policy: ReplacePolicy,
        multiplier_range: (f64, f64),
    ) -> Self {
        Self {
            placements: Vec::new(),
            evaluator,
            policy,
            multiplier_range,
        }
    }

    pub fn from_config(cfg: &PlacementConfig) -> Self {
        Self::new(
            OverlapEvaluator::new(cfg.render_fraction),
            ReplacePolicy {
                threshold_pct: cfg.replace_threshold_pct,
            },
            (cfg.multiplier_min, cfg.multiplier_max),
        )
    }

    /// Place `asset` at `center` with a size multiplier drawn from `rng`.
    pub fn place(
        &mut self,
        asset: Arc<StampAsset>,
        center: Point,
        rng: &mut dyn RandomSource,
    ) -> PlacementOutcome {
        let (lo, hi) = self.multiplier_range;
        let multiplier = rng.range(lo, hi);
        self.place_with_multiplier(asset, center, multiplier)
    }

    /// Place with an explicit size multiplier.
    ///
    /// Every existing placement the candidate overlaps at or above the policy threshold is
    /// removed in this same call; the candidate is then appended on top.
    #[tracing::instrument(skip(self, asset), fields(stamp = %asset.name))]
    pub fn place_with_multiplier(
        &mut self,
        asset: Arc<StampAsset>,
        center: Point,
        size_multiplier: f64,
    ) -> PlacementOutcome {
        let spec = PlacementSpec {
            asset,
            center,
            size_multiplier,
        };
        let candidate = self.evaluator.footprint(&spec);

        let policy = self.policy;
        let (removed, kept): (Vec<PlacedStamp>, Vec<PlacedStamp>) =
            std::mem::take(&mut self.placements)
                .into_iter()
                .partition(|p| policy.displaces(overlap_percent(&p.footprint, &candidate)));
        self.placements = kept;
        self.placements.push(PlacedStamp {
            asset: spec.asset,
            center: spec.center,
            size_multiplier: spec.size_multiplier,
            footprint: candidate,
        });

        tracing::debug!(
            removed = removed.len(),
            total = self.placements.len(),
            "stamp placed"
        );
        PlacementOutcome { removed }
    }

    /// Remove the topmost placement with an opaque pixel under `point`.
    pub fn erase_at(&mut self, point: Point) -> Option<PlacedStamp> {
        let idx = self
            .placements
            .iter()
            .rposition(|p| p.footprint.hit(point))?;
        let removed = self.placements.remove(idx);
        tracing::debug!(stamp = %removed.asset.name, "stamp erased");
        Some(removed)
    }

    /// Page content in paint order.
    pub fn placements(&self) -> &[PlacedStamp] {
        &self.placements
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn evaluator(&self) -> &OverlapEvaluator {
        &self.evaluator
    }

    pub fn policy(&self) -> ReplacePolicy {
        self.policy
    }
}

#[cfg(test)]
#[path = "../../tests/unit/placement/session.rs"]
mod tests;

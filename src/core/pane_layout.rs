use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::core::float::{LAYOUT_TOLERANCE, approx_eq, correct_float};
use crate::core::pane::{PaneDescriptor, PanePlacement, ResizeLink};
use crate::error::{StockToolsError, StockToolsResult};

/// Height given to a pane that carries no height of its own, in percent.
pub const DEFAULT_PANE_HEIGHT_PERCENT: f64 = 20.0;

/// From this many panes on, an added pane takes space from every pane
/// instead of only from the first one.
pub const ADD_REDISTRIBUTE_MIN_PANES: usize = 6;

/// From this many panes on, space freed by a removed pane is shared by every
/// pane instead of going to the first one.
pub const REMOVE_REDISTRIBUTE_MIN_PANES: usize = 5;

const INLINE_PANES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaneLayoutConfig {
    #[serde(default = "default_height_percent")]
    pub default_height_percent: f64,
}

fn default_height_percent() -> f64 {
    DEFAULT_PANE_HEIGHT_PERCENT
}

impl Default for PaneLayoutConfig {
    fn default() -> Self {
        Self {
            default_height_percent: DEFAULT_PANE_HEIGHT_PERCENT,
        }
    }
}

impl PaneLayoutConfig {
    #[must_use]
    pub fn with_default_height_percent(mut self, default_height_percent: f64) -> Self {
        self.default_height_percent = default_height_percent;
        self
    }

    pub fn validate(&self) -> StockToolsResult<()> {
        validate_default_height(self.default_height_percent)
    }
}

fn validate_default_height(value: f64) -> StockToolsResult<()> {
    if !value.is_finite() || value <= 0.0 || value > 100.0 {
        return Err(StockToolsError::InvalidConfig(format!(
            "default pane height must be finite and in (0, 100], got {value}"
        )));
    }
    Ok(())
}

/// Which redistribution rule produced a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutBranch {
    /// No non-navigator panes, nothing to place.
    Empty,
    /// Panes overflow the plot; the first pane gives up the default height.
    ShrinkFirst,
    /// Panes overflow the plot; every pane gives up an equal share.
    RedistributeShrink,
    /// Panes underfill the plot; the first pane takes the free space.
    GrowFirst,
    /// Panes underfill the plot; the free space is shared equally.
    RedistributeGrow,
}

/// Current geometry of one pane in percent, before redistribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanePosition {
    pub height: f64,
    pub top: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanePositions {
    pub positions: SmallVec<[PanePosition; INLINE_PANES]>,
    /// Sum of all pane heights as a fraction of the plot height.
    pub total_height_fraction: f64,
}

/// Reads the current height and top of every pane, in percent.
///
/// Pixel values are relative to the plot top. A pane without a usable height
/// gets `default_height_percent`; a pane without a usable top is placed right
/// below its predecessor.
#[must_use]
pub fn measure_pane_positions(
    panes: &[&PaneDescriptor],
    plot_height_px: f64,
    default_height_percent: f64,
) -> PanePositions {
    let mut total_height_fraction = 0.0;
    let mut positions: SmallVec<[PanePosition; INLINE_PANES]> = SmallVec::with_capacity(panes.len());

    for pane in panes {
        let height_fraction = pane
            .height
            .and_then(|extent| extent.fraction_of(plot_height_px))
            .filter(|fraction| fraction.is_finite())
            .unwrap_or(default_height_percent / 100.0);
        let fallback_top = positions
            .last()
            .map_or(0.0, |previous: &PanePosition| previous.top + previous.height)
            / 100.0;
        let top_fraction = pane
            .top
            .and_then(|extent| extent.fraction_of(plot_height_px))
            .filter(|fraction| fraction.is_finite())
            .unwrap_or(fallback_top);

        total_height_fraction = correct_float(total_height_fraction + height_fraction);
        positions.push(PanePosition {
            height: correct_float(height_fraction * 100.0),
            top: correct_float(top_fraction * 100.0),
        });
    }

    PanePositions {
        positions,
        total_height_fraction,
    }
}

/// Links every pane to the one below it; the last pane gets no link so the
/// bottom edge cannot be dragged into the navigator.
#[must_use]
pub fn resize_links(panes: &[&PaneDescriptor]) -> Vec<ResizeLink> {
    panes
        .iter()
        .enumerate()
        .map(|(index, _)| match panes.get(index + 1) {
            Some(next) => ResizeLink::to(next.id),
            None => ResizeLink::disabled(),
        })
        .collect()
}

/// Restacks tops from zero and optionally shifts every height by `height_delta`.
///
/// Heights are adjusted in order, so each top is computed from the already
/// adjusted predecessor.
pub fn recalculate_positions(positions: &mut [PanePosition], height_delta: Option<f64>) {
    for index in 0..positions.len() {
        let top = match index.checked_sub(1).map(|previous| positions[previous]) {
            Some(previous) => correct_float(previous.height + previous.top),
            None => 0.0,
        };
        let position = &mut positions[index];
        position.top = top;
        if let Some(delta) = height_delta {
            position.height = correct_float(position.height + delta);
        }
    }
}

/// Geometry for every non-navigator pane, applied by the host in one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneLayoutPlan {
    pub placements: Vec<PanePlacement>,
    pub branch: LayoutBranch,
}

impl PaneLayoutPlan {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            placements: Vec::new(),
            branch: LayoutBranch::Empty,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    #[must_use]
    pub fn total_height_percent(&self) -> f64 {
        self.placements
            .iter()
            .map(|placement| placement.height_percent)
            .sum()
    }

    /// Checks that heights sum to 100, tops are contiguous from zero and the
    /// resize links chain each pane to its successor.
    pub fn verify(&self) -> StockToolsResult<()> {
        let Some(first) = self.placements.first() else {
            return Ok(());
        };

        let total = self.total_height_percent();
        if !approx_eq(total, 100.0) {
            return Err(StockToolsError::LayoutInvariant(format!(
                "pane heights sum to {total}, expected 100 within {LAYOUT_TOLERANCE}"
            )));
        }
        if !approx_eq(first.top_percent, 0.0) {
            return Err(StockToolsError::LayoutInvariant(format!(
                "first pane starts at {}, expected 0",
                first.top_percent
            )));
        }

        for (index, pair) in self.placements.windows(2).enumerate() {
            let (upper, lower) = (&pair[0], &pair[1]);
            if !approx_eq(lower.top_percent, upper.bottom_percent()) {
                return Err(StockToolsError::LayoutInvariant(format!(
                    "pane {} starts at {} but pane {} ends at {}",
                    index + 1,
                    lower.top_percent,
                    index,
                    upper.bottom_percent()
                )));
            }
            if upper.resize != ResizeLink::to(lower.pane_id) {
                return Err(StockToolsError::LayoutInvariant(format!(
                    "pane {index} is not resize-linked to its successor"
                )));
            }
        }

        let last = &self.placements[self.placements.len() - 1];
        if last.resize.enabled {
            return Err(StockToolsError::LayoutInvariant(
                "last pane must not carry an enabled resize link".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Keeps indicator panes filling the plot as panes come and go.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PaneLayoutAllocator {
    config: PaneLayoutConfig,
}

impl PaneLayoutAllocator {
    pub fn new(config: PaneLayoutConfig) -> StockToolsResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> PaneLayoutConfig {
        self.config
    }

    /// Recomputes heights, tops and resize links using the configured default height.
    #[must_use]
    pub fn resize(&self, panes: &[PaneDescriptor], plot_height_px: f64) -> PaneLayoutPlan {
        self.resize_with_default_height(panes, plot_height_px, self.config.default_height_percent)
    }

    /// Recomputes the layout after a pane was added or removed.
    ///
    /// When the panes overflow the plot a pane was added: with fewer than
    /// [`ADD_REDISTRIBUTE_MIN_PANES`] panes the first pane shrinks by the
    /// default height, otherwise every pane shrinks so the new last pane gets
    /// `100 / count` percent. When they underfill it a pane was removed: with
    /// fewer than [`REMOVE_REDISTRIBUTE_MIN_PANES`] panes the first pane takes
    /// the freed space, otherwise it is shared equally. Navigator panes are
    /// skipped entirely.
    #[must_use]
    pub fn resize_with_default_height(
        &self,
        panes: &[PaneDescriptor],
        plot_height_px: f64,
        default_height_percent: f64,
    ) -> PaneLayoutPlan {
        let default_height = if validate_default_height(default_height_percent).is_ok() {
            default_height_percent
        } else {
            warn!(
                default_height_percent,
                fallback = self.config.default_height_percent,
                "ignoring invalid default pane height"
            );
            self.config.default_height_percent
        };

        let axes: SmallVec<[&PaneDescriptor; INLINE_PANES]> =
            panes.iter().filter(|pane| !pane.is_navigator).collect();
        if axes.is_empty() {
            trace!("no non-navigator panes to lay out");
            return PaneLayoutPlan::empty();
        }

        let count = axes.len();
        let PanePositions {
            mut positions,
            total_height_fraction,
        } = measure_pane_positions(&axes, plot_height_px, default_height);
        let links = resize_links(&axes);

        let branch = if total_height_fraction > 1.0 {
            shrink_for_added_pane(&mut positions, default_height)
        } else {
            grow_for_removed_pane(&mut positions, total_height_fraction)
        };

        debug!(
            count,
            total_height_fraction,
            ?branch,
            "recomputed pane layout"
        );

        let placements: Vec<PanePlacement> = axes
            .iter()
            .zip(positions.iter())
            .zip(links)
            .map(|((pane, position), resize)| PanePlacement {
                pane_id: pane.id,
                height_percent: position.height,
                top_percent: position.top,
                resize,
            })
            .collect();

        if let Some(collapsed) = placements
            .iter()
            .find(|placement| placement.height_percent <= 0.0)
        {
            warn!(
                pane = collapsed.pane_id.raw(),
                height_percent = collapsed.height_percent,
                "pane collapsed while making room for a new pane"
            );
        }

        let plan = PaneLayoutPlan { placements, branch };
        if let Err(err) = plan.verify() {
            warn!(error = %err, "pane layout inputs did not fill the plot before the change");
        }
        plan
    }
}

fn shrink_for_added_pane(positions: &mut [PanePosition], default_height: f64) -> LayoutBranch {
    let count = positions.len();
    if count == 1 {
        positions[0] = PanePosition {
            height: 100.0,
            top: 0.0,
        };
        return LayoutBranch::ShrinkFirst;
    }

    let mut new_pane_height = default_height;
    let branch = if count < ADD_REDISTRIBUTE_MIN_PANES {
        positions[0].height = correct_float(positions[0].height - default_height);
        recalculate_positions(positions, None);
        LayoutBranch::ShrinkFirst
    } else {
        new_pane_height = 100.0 / count as f64;
        let changed_space = new_pane_height / (count - 1) as f64;
        recalculate_positions(positions, Some(-changed_space));
        LayoutBranch::RedistributeShrink
    };

    positions[count - 1] = PanePosition {
        height: new_pane_height,
        top: correct_float(100.0 - new_pane_height),
    };
    branch
}

fn grow_for_removed_pane(positions: &mut [PanePosition], total_height_fraction: f64) -> LayoutBranch {
    let count = positions.len();
    let changed_space = correct_float(1.0 - total_height_fraction) * 100.0;

    if count < REMOVE_REDISTRIBUTE_MIN_PANES {
        positions[0].height = correct_float(positions[0].height + changed_space);
        recalculate_positions(positions, None);
        LayoutBranch::GrowFirst
    } else {
        recalculate_positions(positions, Some(changed_space / count as f64));
        LayoutBranch::RedistributeGrow
    }
}

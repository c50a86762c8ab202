use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StockToolsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PaneId(u32);

impl PaneId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Configured vertical size or offset of a pane.
///
/// Parsed from the option strings chart engines accept: `"20%"` is a
/// percentage of the plot height, `"120"` and `"120px"` are pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PaneExtent {
    Percent(f64),
    Pixels(f64),
}

impl PaneExtent {
    #[must_use]
    pub fn is_percent(self) -> bool {
        matches!(self, Self::Percent(_))
    }

    /// Fraction of `plot_height_px` covered by this extent.
    ///
    /// Returns `None` when the extent is in pixels and the plot height cannot
    /// be used as a divisor.
    #[must_use]
    pub fn fraction_of(self, plot_height_px: f64) -> Option<f64> {
        match self {
            Self::Percent(percent) => Some(percent / 100.0),
            Self::Pixels(pixels) => {
                if plot_height_px.is_finite() && plot_height_px > 0.0 {
                    Some(pixels / plot_height_px)
                } else {
                    None
                }
            }
        }
    }
}

impl FromStr for PaneExtent {
    type Err = StockToolsError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let (number, percent) = if let Some(stripped) = trimmed.strip_suffix('%') {
            (stripped, true)
        } else if let Some(stripped) = trimmed.strip_suffix("px") {
            (stripped, false)
        } else {
            (trimmed, false)
        };
        let value: f64 = number.trim().parse().map_err(|_| {
            StockToolsError::InvalidExtent(format!("`{input}` is not a number or percentage"))
        })?;
        if !value.is_finite() {
            return Err(StockToolsError::InvalidExtent(format!(
                "`{input}` must be finite"
            )));
        }
        Ok(if percent {
            Self::Percent(value)
        } else {
            Self::Pixels(value)
        })
    }
}

impl TryFrom<String> for PaneExtent {
    type Error = StockToolsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PaneExtent> for String {
    fn from(value: PaneExtent) -> Self {
        value.to_string()
    }
}

impl fmt::Display for PaneExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(value) => write!(f, "{value}%"),
            Self::Pixels(value) => write!(f, "{value}px"),
        }
    }
}

/// Drag-resize binding between a pane and the pane directly below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeLink {
    pub enabled: bool,
    pub next: Option<PaneId>,
}

impl ResizeLink {
    #[must_use]
    pub const fn to(next: PaneId) -> Self {
        Self {
            enabled: true,
            next: Some(next),
        }
    }

    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            next: None,
        }
    }
}

impl Default for ResizeLink {
    fn default() -> Self {
        Self::disabled()
    }
}

/// One stacked Y-axis region as seen by the layout allocator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaneDescriptor {
    pub id: PaneId,
    #[serde(default)]
    pub height: Option<PaneExtent>,
    #[serde(default)]
    pub top: Option<PaneExtent>,
    #[serde(default)]
    pub is_navigator: bool,
    #[serde(default)]
    pub resize: ResizeLink,
}

impl PaneDescriptor {
    /// A pane without configured geometry, as created by an indicator.
    #[must_use]
    pub fn new(id: PaneId) -> Self {
        Self {
            id,
            height: None,
            top: None,
            is_navigator: false,
            resize: ResizeLink::disabled(),
        }
    }

    #[must_use]
    pub fn navigator(id: PaneId) -> Self {
        Self {
            is_navigator: true,
            ..Self::new(id)
        }
    }

    #[must_use]
    pub fn with_height(mut self, height: PaneExtent) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn with_top(mut self, top: PaneExtent) -> Self {
        self.top = Some(top);
        self
    }

    /// Shorthand for a pane placed at `top_percent` with `height_percent`.
    #[must_use]
    pub fn with_percent_geometry(self, top_percent: f64, height_percent: f64) -> Self {
        self.with_top(PaneExtent::Percent(top_percent))
            .with_height(PaneExtent::Percent(height_percent))
    }

    pub fn apply(&mut self, placement: &PanePlacement) {
        debug_assert_eq!(self.id, placement.pane_id);
        self.height = Some(PaneExtent::Percent(placement.height_percent));
        self.top = Some(PaneExtent::Percent(placement.top_percent));
        self.resize = placement.resize;
    }
}

/// Final geometry of one pane, in percent of the plot height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanePlacement {
    pub pane_id: PaneId,
    pub height_percent: f64,
    pub top_percent: f64,
    pub resize: ResizeLink,
}

impl PanePlacement {
    #[must_use]
    pub fn bottom_percent(&self) -> f64 {
        self.top_percent + self.height_percent
    }

    /// Height as a percentage option string, e.g. `"80%"`.
    #[must_use]
    pub fn height_option(&self) -> String {
        PaneExtent::Percent(self.height_percent).to_string()
    }

    /// Top offset as a percentage option string, e.g. `"0%"`.
    #[must_use]
    pub fn top_option(&self) -> String {
        PaneExtent::Percent(self.top_percent).to_string()
    }
}

pub mod float;
pub mod pane;
pub mod pane_layout;

pub use float::{CORRECT_FLOAT_PRECISION, LAYOUT_TOLERANCE, approx_eq, correct_float};
pub use pane::{PaneDescriptor, PaneExtent, PaneId, PanePlacement, ResizeLink};
pub use pane_layout::{
    ADD_REDISTRIBUTE_MIN_PANES, DEFAULT_PANE_HEIGHT_PERCENT, LayoutBranch, PaneLayoutAllocator,
    PaneLayoutConfig, PaneLayoutPlan, PanePosition, PanePositions, REMOVE_REDISTRIBUTE_MIN_PANES,
    measure_pane_positions, recalculate_positions, resize_links,
};

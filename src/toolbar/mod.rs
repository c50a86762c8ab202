//! Toolbar construction and selection state.
//!
//! `builder` turns the declarative button table into view nodes; `state`
//! tracks the single armed button and the single open submenu.

pub mod builder;
pub mod definitions;
pub mod labels;
pub mod state;

pub use builder::{
    CLASS_PREFIX, DEFAULT_ICONS_URL, ToolbarBuilder, ToolbarButtonView, build, class_mapping,
};
pub use definitions::{
    ToolbarButtonDefinition, ToolbarDefinitions, default_buttons, default_definitions,
};
pub use labels::ToolbarLabels;
pub use state::{ToolbarSelection, ToolbarState};

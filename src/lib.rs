//! stock-tools-rs: stock-tools core for multi-pane charts.
//!
//! The crate keeps indicator panes filling the plot height as panes are
//! added and removed, and tracks the toolbar's single armed tool and single
//! open submenu. Rendering, drawing and popups stay with the host chart.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;
pub mod toolbar;

pub use api::{StockToolsChart, StockToolsConfig};
pub use error::{StockToolsError, StockToolsResult};

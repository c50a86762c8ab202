mod bindings;
mod config;
mod json_contract;
mod observer;
mod stock_chart;

pub use bindings::{BindingKind, INDICATORS_WITH_PANE, binding_kind, indicator_requires_pane};
pub use config::{StockToolsConfig, ToolbarGuiConfig};
pub use json_contract::{PANE_LAYOUT_PLAN_JSON_SCHEMA_V1, PaneLayoutPlanJsonContractV1};
pub use observer::{PopupFormType, PopupRequest, StockToolsObserver};
pub use stock_chart::{LayoutChange, StockToolsChart};

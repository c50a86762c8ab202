use serde::{Deserialize, Serialize};

use crate::core::PaneLayoutConfig;
use crate::error::{StockToolsError, StockToolsResult};
use crate::toolbar::{
    DEFAULT_ICONS_URL, ToolbarBuilder, ToolbarDefinitions, ToolbarLabels, default_buttons,
    default_definitions,
};

/// Toolbar GUI options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolbarGuiConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub placed: bool,
    /// Chart is hosted inside a frame; disables the full screen button.
    #[serde(default)]
    pub embedded: bool,
    #[serde(default = "default_class_name")]
    pub class_name: String,
    #[serde(default = "default_toolbar_class_name")]
    pub toolbar_class_name: String,
    #[serde(default)]
    pub icons_url: Option<String>,
    #[serde(default = "default_buttons")]
    pub buttons: Vec<String>,
    #[serde(default = "default_definitions")]
    pub definitions: ToolbarDefinitions,
}

fn default_true() -> bool {
    true
}

fn default_class_name() -> String {
    "stocktools-bindings-wrapper".to_owned()
}

fn default_toolbar_class_name() -> String {
    "stocktools-toolbar".to_owned()
}

impl Default for ToolbarGuiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            visible: true,
            placed: false,
            embedded: false,
            class_name: default_class_name(),
            toolbar_class_name: default_toolbar_class_name(),
            icons_url: None,
            buttons: default_buttons(),
            definitions: default_definitions(),
        }
    }
}

impl ToolbarGuiConfig {
    #[must_use]
    pub fn resolved_icons_url(&self) -> &str {
        self.icons_url.as_deref().unwrap_or(DEFAULT_ICONS_URL)
    }

    #[must_use]
    pub fn builder(&self) -> ToolbarBuilder {
        ToolbarBuilder::new(self.resolved_icons_url()).embedded(self.embedded)
    }
}

/// Per-chart configuration handed to [`super::StockToolsChart::new`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StockToolsConfig {
    #[serde(default)]
    pub layout: PaneLayoutConfig,
    #[serde(default)]
    pub gui: ToolbarGuiConfig,
    #[serde(default)]
    pub labels: ToolbarLabels,
}

impl StockToolsConfig {
    #[must_use]
    pub fn with_layout(mut self, layout: PaneLayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_gui(mut self, gui: ToolbarGuiConfig) -> Self {
        self.gui = gui;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labels: ToolbarLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn validate(&self) -> StockToolsResult<()> {
        self.layout.validate()
    }

    pub fn from_json_str(input: &str) -> StockToolsResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            StockToolsError::InvalidConfig(format!("failed to parse stock tools config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> StockToolsResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            StockToolsError::InvalidConfig(format!("failed to serialize stock tools config: {e}"))
        })
    }
}

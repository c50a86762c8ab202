use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StockToolsError, StockToolsResult};

use super::definitions::{ToolbarButtonDefinition, ToolbarDefinitions};
use super::labels::ToolbarLabels;

pub const CLASS_PREFIX: &str = "stocktools-";
pub const DEFAULT_ICONS_URL: &str = "https://code.highcharts.com/8.0.1/gfx/stock-icons/";
const SUBMENU_ARROW_SYMBOL: &str = "arrow-bottom.svg";

/// Built-in CSS class suffix for well-known tools.
#[must_use]
pub fn class_mapping(name: &str) -> Option<&'static str> {
    let suffix = match name {
        "circle" => "circle-annotation",
        "rectangle" => "rectangle-annotation",
        "label" => "label-annotation",
        "segment" => "segment",
        "arrowSegment" => "arrow-segment",
        "ray" => "ray",
        "arrowRay" => "arrow-ray",
        "line" => "infinity-line",
        "arrowLine" => "arrow-infinity-line",
        "verticalLine" => "vertical-line",
        "horizontalLine" => "horizontal-line",
        "crooked3" => "crooked3",
        "crooked5" => "crooked5",
        "elliott3" => "elliott3",
        "elliott5" => "elliott5",
        "pitchfork" => "pitchfork",
        "fibonacci" => "fibonacci",
        "parallelChannel" => "parallel-channel",
        "measureX" => "measure-x",
        "measureY" => "measure-y",
        "measureXY" => "measure-xy",
        "verticalCounter" => "vertical-counter",
        "verticalLabel" => "vertical-label",
        "verticalArrow" => "vertical-arrow",
        "currentPriceIndicator" => "current-price-indicator",
        "indicators" => "indicators",
        "flagCirclepin" => "flag-circlepin",
        "flagDiamondpin" => "flag-diamondpin",
        "flagSquarepin" => "flag-squarepin",
        "flagSimplepin" => "flag-simplepin",
        "zoomX" => "zoom-x",
        "zoomY" => "zoom-y",
        "zoomXY" => "zoom-xy",
        "typeLine" => "series-type-line",
        "typeOHLC" => "series-type-ohlc",
        "typeCandlestick" => "series-type-candlestick",
        "fullScreen" => "full-screen",
        "toggleAnnotations" => "toggle-annotations",
        "saveChart" => "save-chart",
        "separator" => "separator",
        _ => return None,
    };
    Some(suffix)
}

/// One rendered toolbar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarButtonView {
    pub name: String,
    pub title: String,
    pub class_name: String,
    /// Icon shown on the button. Submenu parents show their first item's icon.
    pub symbol_url: Option<String>,
    /// Arrow icon opening the submenu, present only on submenu parents.
    pub arrow_url: Option<String>,
    pub disabled: bool,
    pub items: Vec<ToolbarButtonView>,
}

impl ToolbarButtonView {
    #[must_use]
    pub fn has_submenu(&self) -> bool {
        !self.items.is_empty()
    }

    #[must_use]
    pub fn item(&self, name: &str) -> Option<&ToolbarButtonView> {
        self.items.iter().find(|item| item.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarBuilder {
    icons_url: String,
    embedded: bool,
}

impl Default for ToolbarBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_ICONS_URL)
    }
}

impl ToolbarBuilder {
    #[must_use]
    pub fn new(icons_url: impl Into<String>) -> Self {
        Self {
            icons_url: icons_url.into(),
            embedded: false,
        }
    }

    /// Marks the chart as embedded in a frame, where full screen is unavailable.
    #[must_use]
    pub fn embedded(mut self, embedded: bool) -> Self {
        self.embedded = embedded;
        self
    }

    #[must_use]
    pub fn icons_url(&self) -> &str {
        &self.icons_url
    }

    /// Builds the two-level button tree in `ordered_buttons` order.
    pub fn build(
        &self,
        ordered_buttons: &[String],
        definitions: &ToolbarDefinitions,
        labels: &ToolbarLabels,
    ) -> StockToolsResult<Vec<ToolbarButtonView>> {
        let views = ordered_buttons
            .iter()
            .map(|name| {
                let definition =
                    definitions
                        .get(name)
                        .ok_or_else(|| StockToolsError::UnknownButton {
                            name: name.clone(),
                        })?;
                self.build_button(name, definition, labels)
            })
            .collect::<StockToolsResult<Vec<_>>>()?;
        debug!(buttons = views.len(), "built toolbar");
        Ok(views)
    }

    fn build_button(
        &self,
        name: &str,
        definition: &ToolbarButtonDefinition,
        labels: &ToolbarLabels,
    ) -> StockToolsResult<ToolbarButtonView> {
        let items = definition
            .items
            .iter()
            .map(|item| {
                let item_definition = definition.definitions.get(item).ok_or_else(|| {
                    StockToolsError::UnknownSubmenuItem {
                        parent: name.to_owned(),
                        name: item.clone(),
                    }
                })?;
                Ok(self.leaf_view(item, item_definition, labels))
            })
            .collect::<StockToolsResult<Vec<_>>>()?;

        let mut view = self.leaf_view(name, definition, labels);
        if let Some(first) = items.first() {
            view.symbol_url = first.symbol_url.clone();
            view.arrow_url = Some(self.symbol_url(SUBMENU_ARROW_SYMBOL));
        }
        view.disabled = self.embedded && name == "fullScreen";
        view.items = items;
        Ok(view)
    }

    fn leaf_view(
        &self,
        name: &str,
        definition: &ToolbarButtonDefinition,
        labels: &ToolbarLabels,
    ) -> ToolbarButtonView {
        ToolbarButtonView {
            name: name.to_owned(),
            title: labels.title(name).to_owned(),
            class_name: class_name(name, definition),
            symbol_url: definition
                .symbol
                .as_deref()
                .map(|symbol| self.symbol_url(symbol)),
            arrow_url: None,
            disabled: false,
            items: Vec::new(),
        }
    }

    fn symbol_url(&self, symbol: &str) -> String {
        format!("{}{symbol}", self.icons_url)
    }
}

fn class_name(name: &str, definition: &ToolbarButtonDefinition) -> String {
    let mapped = class_mapping(name).map(|suffix| format!("{CLASS_PREFIX}{suffix}"));
    [mapped.as_deref(), definition.class_name.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds with default icons and no embedding restrictions.
pub fn build(
    ordered_buttons: &[String],
    definitions: &ToolbarDefinitions,
    labels: &ToolbarLabels,
) -> StockToolsResult<Vec<ToolbarButtonView>> {
    ToolbarBuilder::default().build(ordered_buttons, definitions, labels)
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_ICONS_URL, ToolbarBuilder, build};
    use crate::error::StockToolsError;
    use crate::toolbar::definitions::{
        ToolbarButtonDefinition, ToolbarDefinitions, default_buttons, default_definitions,
    };
    use crate::toolbar::labels::ToolbarLabels;

    #[test]
    fn default_table_builds_in_configured_order() {
        let views = build(&default_buttons(), &default_definitions(), &ToolbarLabels::default())
            .expect("default toolbar");
        assert_eq!(views.len(), default_buttons().len());
        assert_eq!(views[0].name, "indicators");
        assert_eq!(views[0].title, "Indicators");
        assert!(!views[0].has_submenu());

        let lines = views.iter().find(|view| view.name == "lines").expect("lines");
        assert_eq!(lines.items.len(), 8);
        assert_eq!(lines.items[0].class_name, "stocktools-segment");
        assert_eq!(
            lines.symbol_url.as_deref(),
            Some(format!("{DEFAULT_ICONS_URL}segment.svg").as_str())
        );
        assert_eq!(
            lines.arrow_url.as_deref(),
            Some(format!("{DEFAULT_ICONS_URL}arrow-bottom.svg").as_str())
        );
    }

    #[test]
    fn missing_top_level_definition_is_a_configuration_error() {
        let err = build(
            &["lines".to_owned(), "laser".to_owned()],
            &default_definitions(),
            &ToolbarLabels::default(),
        )
        .expect_err("unknown button");
        assert!(matches!(err, StockToolsError::UnknownButton { name } if name == "laser"));
    }

    #[test]
    fn missing_submenu_definition_is_a_configuration_error() {
        let mut definitions = ToolbarDefinitions::new();
        let mut broken = ToolbarButtonDefinition::submenu(&[("a", "a.svg")]);
        broken.items.push("b".to_owned());
        definitions.insert("tools".to_owned(), broken);

        let err = build(&["tools".to_owned()], &definitions, &ToolbarLabels::empty())
            .expect_err("unknown submenu item");
        assert!(matches!(
            err,
            StockToolsError::UnknownSubmenuItem { parent, name } if parent == "tools" && name == "b"
        ));
    }

    #[test]
    fn user_class_and_embedding_are_reflected() {
        let mut definitions = default_definitions();
        definitions.insert(
            "saveChart".to_owned(),
            ToolbarButtonDefinition::with_symbol("save.svg").with_class_name("custom"),
        );
        let views = ToolbarBuilder::new("/icons/")
            .embedded(true)
            .build(
                &["saveChart".to_owned(), "fullScreen".to_owned()],
                &definitions,
                &ToolbarLabels::default(),
            )
            .expect("toolbar");
        assert_eq!(views[0].class_name, "stocktools-save-chart custom");
        assert_eq!(views[0].symbol_url.as_deref(), Some("/icons/save.svg"));
        assert!(views[1].disabled);
    }
}

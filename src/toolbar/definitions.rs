use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub type ToolbarDefinitions = IndexMap<String, ToolbarButtonDefinition>;

/// Declarative description of one toolbar button.
///
/// A button with `items` opens a submenu; the definitions of those items are
/// nested under the button itself.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ToolbarButtonDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: ToolbarDefinitions,
}

impl ToolbarButtonDefinition {
    #[must_use]
    pub fn with_symbol(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            ..Self::default()
        }
    }

    /// Submenu from `(item name, item symbol)` pairs, in display order.
    #[must_use]
    pub fn submenu(items: &[(&str, &str)]) -> Self {
        Self {
            items: items.iter().map(|(name, _)| (*name).to_owned()).collect(),
            definitions: items
                .iter()
                .map(|(name, symbol)| ((*name).to_owned(), Self::with_symbol(*symbol)))
                .collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn has_submenu(&self) -> bool {
        !self.items.is_empty()
    }
}

#[must_use]
pub fn default_buttons() -> Vec<String> {
    [
        "indicators",
        "separator",
        "simpleShapes",
        "lines",
        "crookedLines",
        "measure",
        "advanced",
        "toggleAnnotations",
        "separator",
        "verticalLabels",
        "flags",
        "separator",
        "zoomChange",
        "fullScreen",
        "typeChange",
        "separator",
        "currentPriceIndicator",
        "saveChart",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

#[must_use]
pub fn default_definitions() -> ToolbarDefinitions {
    let single = ToolbarButtonDefinition::with_symbol;
    let submenu = ToolbarButtonDefinition::submenu;

    [
        ("separator", single("separator.svg")),
        (
            "simpleShapes",
            submenu(&[
                ("label", "label.svg"),
                ("circle", "circle.svg"),
                ("rectangle", "rectangle.svg"),
            ]),
        ),
        (
            "flags",
            submenu(&[
                ("flagCirclepin", "flag-elipse.svg"),
                ("flagDiamondpin", "flag-diamond.svg"),
                ("flagSquarepin", "flag-trapeze.svg"),
                ("flagSimplepin", "flag-basic.svg"),
            ]),
        ),
        (
            "lines",
            submenu(&[
                ("segment", "segment.svg"),
                ("arrowSegment", "arrow-segment.svg"),
                ("ray", "ray.svg"),
                ("arrowRay", "arrow-ray.svg"),
                ("line", "line.svg"),
                ("arrowLine", "arrow-line.svg"),
                ("horizontalLine", "horizontal-line.svg"),
                ("verticalLine", "vertical-line.svg"),
            ]),
        ),
        (
            "crookedLines",
            submenu(&[
                ("elliott3", "elliott-3.svg"),
                ("elliott5", "elliott-5.svg"),
                ("crooked3", "crooked-3.svg"),
                ("crooked5", "crooked-5.svg"),
            ]),
        ),
        (
            "verticalLabels",
            submenu(&[
                ("verticalCounter", "vertical-counter.svg"),
                ("verticalLabel", "vertical-label.svg"),
                ("verticalArrow", "vertical-arrow.svg"),
            ]),
        ),
        (
            "advanced",
            submenu(&[
                ("fibonacci", "fibonacci.svg"),
                ("pitchfork", "pitchfork.svg"),
                ("parallelChannel", "parallel-channel.svg"),
            ]),
        ),
        (
            "measure",
            submenu(&[
                ("measureXY", "measure-xy.svg"),
                ("measureX", "measure-x.svg"),
                ("measureY", "measure-y.svg"),
            ]),
        ),
        ("toggleAnnotations", single("annotations-visible.svg")),
        ("currentPriceIndicator", single("current-price-show.svg")),
        ("indicators", single("indicators.svg")),
        (
            "zoomChange",
            submenu(&[
                ("zoomX", "zoom-x.svg"),
                ("zoomY", "zoom-y.svg"),
                ("zoomXY", "zoom-xy.svg"),
            ]),
        ),
        (
            "typeChange",
            submenu(&[
                ("typeOHLC", "series-ohlc.svg"),
                ("typeLine", "series-line.svg"),
                ("typeCandlestick", "series-candlestick.svg"),
            ]),
        ),
        ("fullScreen", single("fullscreen.svg")),
        ("saveChart", single("save-chart.svg")),
    ]
    .into_iter()
    .map(|(name, definition)| (name.to_owned(), definition))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::{ToolbarButtonDefinition, default_buttons, default_definitions};

    #[test]
    fn every_default_button_has_a_definition() {
        let definitions = default_definitions();
        for name in default_buttons() {
            assert!(definitions.contains_key(&name), "missing definition for {name}");
        }
    }

    #[test]
    fn submenu_items_have_nested_definitions_in_order() {
        let definitions = default_definitions();
        let lines = &definitions["lines"];
        assert!(lines.has_submenu());
        assert_eq!(lines.items.first().map(String::as_str), Some("segment"));
        for item in &lines.items {
            assert!(lines.definitions[item].symbol.is_some());
        }
        assert!(!definitions["saveChart"].has_submenu());
    }

    #[test]
    fn definitions_deserialize_from_json() {
        let json = r#"{
            "symbol": "custom.svg",
            "class_name": "my-tool",
            "items": ["a"],
            "definitions": { "a": { "symbol": "a.svg" } }
        }"#;
        let definition: ToolbarButtonDefinition = serde_json::from_str(json).expect("parse");
        assert_eq!(definition.class_name.as_deref(), Some("my-tool"));
        assert_eq!(definition.definitions["a"].symbol.as_deref(), Some("a.svg"));
    }
}

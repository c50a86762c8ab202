use serde::{Deserialize, Serialize};

use super::observer::PopupFormType;

/// How a tool behaves once its button is armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingKind {
    /// Layout filler with no action.
    Inert,
    /// Acts immediately on selection and disarms itself.
    Instant,
    /// Opens a popup as soon as it is selected.
    PopupOnSelect(PopupFormType),
    /// Opens a popup when the user starts it on the chart.
    PopupOnStart(PopupFormType),
    /// Stays armed until the drawing on the chart is finished.
    Drawing,
}

#[must_use]
pub fn binding_kind(tool: &str) -> BindingKind {
    match tool {
        "separator" => BindingKind::Inert,
        "indicators" => BindingKind::PopupOnSelect(PopupFormType::Indicators),
        "flagCirclepin" | "flagDiamondpin" | "flagSquarepin" | "flagSimplepin" => {
            BindingKind::PopupOnStart(PopupFormType::Flag)
        }
        "zoomX" | "zoomY" | "zoomXY" | "typeOHLC" | "typeLine" | "typeCandlestick"
        | "fullScreen" | "toggleAnnotations" | "currentPriceIndicator" | "saveChart" => {
            BindingKind::Instant
        }
        _ => BindingKind::Drawing,
    }
}

/// Indicator types drawn on a pane of their own rather than over the price series.
pub const INDICATORS_WITH_PANE: &[&str] = &[
    "ad",
    "atr",
    "cci",
    "cmf",
    "macd",
    "mfi",
    "roc",
    "rsi",
    "ao",
    "aroon",
    "aroonoscillator",
    "trix",
    "apo",
    "dpo",
    "ppo",
    "natr",
    "williamsr",
    "stochastic",
    "slowstochastic",
    "linearRegression",
    "linearRegressionSlope",
    "linearRegressionIntercept",
    "linearRegressionAngle",
];

#[must_use]
pub fn indicator_requires_pane(indicator_type: &str) -> bool {
    INDICATORS_WITH_PANE.contains(&indicator_type)
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Button titles (hover hints) keyed by button name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolbarLabels(IndexMap<String, String>);

impl ToolbarLabels {
    #[must_use]
    pub fn empty() -> Self {
        Self(IndexMap::new())
    }

    /// Title for `name`, falling back to the name itself.
    #[must_use]
    pub fn title<'a>(&'a self, name: &'a str) -> &'a str {
        self.0.get(name).map_or(name, String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, title: impl Into<String>) {
        self.0.insert(name.into(), title.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ToolbarLabels {
    fn default() -> Self {
        let labels = [
            ("simpleShapes", "Simple shapes"),
            ("lines", "Lines"),
            ("crookedLines", "Crooked lines"),
            ("measure", "Measure"),
            ("advanced", "Advanced"),
            ("toggleAnnotations", "Toggle annotations"),
            ("verticalLabels", "Vertical labels"),
            ("flags", "Flags"),
            ("zoomChange", "Zoom change"),
            ("typeChange", "Type change"),
            ("saveChart", "Save chart"),
            ("indicators", "Indicators"),
            ("currentPriceIndicator", "Current Price Indicators"),
            ("zoomX", "Zoom X"),
            ("zoomY", "Zoom Y"),
            ("zoomXY", "Zoom XY"),
            ("fullScreen", "Fullscreen"),
            ("typeOHLC", "OHLC"),
            ("typeLine", "Line"),
            ("typeCandlestick", "Candlestick"),
            ("circle", "Circle"),
            ("label", "Label"),
            ("rectangle", "Rectangle"),
            ("flagCirclepin", "Flag circle"),
            ("flagDiamondpin", "Flag diamond"),
            ("flagSquarepin", "Flag square"),
            ("flagSimplepin", "Flag simple"),
            ("measureXY", "Measure XY"),
            ("measureX", "Measure X"),
            ("measureY", "Measure Y"),
            ("segment", "Segment"),
            ("arrowSegment", "Arrow segment"),
            ("ray", "Ray"),
            ("arrowRay", "Arrow ray"),
            ("line", "Line"),
            ("arrowLine", "Arrow line"),
            ("horizontalLine", "Horizontal line"),
            ("verticalLine", "Vertical line"),
            ("infinityLine", "Infinity line"),
            ("crooked3", "Crooked 3 line"),
            ("crooked5", "Crooked 5 line"),
            ("elliott3", "Elliott 3 line"),
            ("elliott5", "Elliott 5 line"),
            ("verticalCounter", "Vertical counter"),
            ("verticalLabel", "Vertical label"),
            ("verticalArrow", "Vertical arrow"),
            ("fibonacci", "Fibonacci"),
            ("pitchfork", "Pitchfork"),
            ("parallelChannel", "Parallel channel"),
        ];
        Self(
            labels
                .into_iter()
                .map(|(name, title)| (name.to_owned(), title.to_owned()))
                .collect(),
        )
    }
}

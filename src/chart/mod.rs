// Chart option builders: tabular records -> declarative chart-option documents

pub mod cartesian;
pub mod funnel;
pub mod gauge;
pub mod heatmap;
pub mod pie;
pub mod radar;
pub mod scatter;

use crate::data::RecordSet;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub use cartesian::{BarChart, LineChart};
pub use funnel::FunnelChart;
pub use gauge::GaugeChart;
pub use heatmap::HeatmapChart;
pub use pie::PieChart;
pub use radar::RadarChart;
pub use scatter::ScatterChart;

pub(crate) const ANIMATION_DURATION_MS: u32 = 1000;
pub(crate) const ANIMATION_EASING: &str = "cubicOut";
pub(crate) const SERIES_NAME: &str = "Data";
pub(crate) const EMPHASIS_SHADOW: &str = "rgba(0, 0, 0, 0.5)";

/// The closed set of chart families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Bar,
    Pie,
    Scatter,
    Radar,
    Heatmap,
    Funnel,
    Gauge,
}

impl ChartType {
    pub const ALL: [ChartType; 8] = [
        ChartType::Line,
        ChartType::Bar,
        ChartType::Pie,
        ChartType::Scatter,
        ChartType::Radar,
        ChartType::Heatmap,
        ChartType::Funnel,
        ChartType::Gauge,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            ChartType::Line => "line",
            ChartType::Bar => "bar",
            ChartType::Pie => "pie",
            ChartType::Scatter => "scatter",
            ChartType::Radar => "radar",
            ChartType::Heatmap => "heatmap",
            ChartType::Funnel => "funnel",
            ChartType::Gauge => "gauge",
        }
    }

    /// Permissive lookup: unrecognized tags resolve to `Bar`.
    pub fn from_tag(tag: &str) -> ChartType {
        tag.parse().unwrap_or(ChartType::Bar)
    }

    pub fn builder(self) -> &'static dyn ChartBuilder {
        REGISTRY
            .iter()
            .copied()
            .find(|b| b.chart_type() == self)
            .unwrap_or(&BarChart)
    }
}

impl FromStr for ChartType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartType::ALL
            .into_iter()
            .find(|t| t.tag() == s)
            .ok_or_else(|| anyhow!("Unknown chart type '{}'", s))
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A rendered chart-option document. Produced fresh per call and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChartOption(Value);

impl ChartOption {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// The `series` array; empty if the document has none.
    pub fn series(&self) -> &[Value] {
        self.0["series"].as_array().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.0)
    }
}

impl From<Value> for ChartOption {
    fn from(value: Value) -> Self {
        ChartOption(value)
    }
}

/// One chart family's mapping from records to an option document.
///
/// Column 0 is the label/category column for every builder.
pub trait ChartBuilder: Sync {
    fn chart_type(&self) -> ChartType;

    /// Title used when the caller gives none (or an empty one)
    fn default_title(&self) -> &'static str;

    fn build(&self, records: &RecordSet, title: Option<&str>) -> ChartOption;
}

/// Registered builders; adding a chart family is one entry here plus a `ChartType` variant.
static REGISTRY: [&dyn ChartBuilder; 8] = [
    &LineChart,
    &BarChart,
    &PieChart,
    &ScatterChart,
    &RadarChart,
    &HeatmapChart,
    &FunnelChart,
    &GaugeChart,
];

/// Build the option document for `tag`. Unknown tags use the bar builder.
pub fn build_chart_option(records: &RecordSet, tag: &str, title: Option<&str>) -> ChartOption {
    let chart_type = ChartType::from_tag(tag);
    if chart_type.tag() != tag {
        debug!(tag, "unrecognized chart type, using bar");
    }
    debug!(
        chart = %chart_type,
        rows = records.len(),
        columns = records.columns().len(),
        "building chart option"
    );
    chart_type.builder().build(records, title)
}

// =============================================================================
// Shared option fragments
// =============================================================================

pub(crate) fn title_block(title: Option<&str>, default: &str) -> Value {
    let text = title.filter(|t| !t.is_empty()).unwrap_or(default);
    json!({ "text": text })
}

pub(crate) fn grid() -> Value {
    json!({ "left": "3%", "right": "4%", "bottom": "3%", "containLabel": true })
}

/// Inline + slider zoom over the full range
pub(crate) fn data_zoom() -> Value {
    json!([
        { "type": "inside", "start": 0, "end": 100 },
        { "type": "slider", "start": 0, "end": 100 }
    ])
}

pub(crate) fn with_animation(mut option: Value) -> Value {
    if let Some(obj) = option.as_object_mut() {
        obj.insert("animation".to_string(), json!(true));
        obj.insert("animationDuration".to_string(), json!(ANIMATION_DURATION_MS));
        obj.insert("animationEasing".to_string(), json!(ANIMATION_EASING));
    }
    option
}

/// Empty label cell: null, missing, or an empty string.
pub(crate) fn is_blank(cell: &Value) -> bool {
    match cell {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

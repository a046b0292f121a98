use super::{title_block, with_animation, ChartBuilder, ChartOption, ChartType, EMPHASIS_SHADOW};
use crate::data::RecordSet;
use serde_json::{json, Value};

/// Ring chart with one series per column.
///
/// Slice names come from column 0. Column 0 itself is also emitted as a
/// series (its slices weigh the label values), matching the existing
/// rendering consumer's output.
pub struct PieChart;

impl ChartBuilder for PieChart {
    fn chart_type(&self) -> ChartType {
        ChartType::Pie
    }

    fn default_title(&self) -> &'static str {
        "Interactive Pie Chart"
    }

    fn build(&self, records: &RecordSet, title: Option<&str>) -> ChartOption {
        let labels = records.column_values(0);

        let series: Vec<Value> = records
            .columns()
            .iter()
            .enumerate()
            .map(|(idx, col)| {
                let data: Vec<Value> = labels
                    .iter()
                    .zip(records.column_values(idx))
                    .map(|(name, value)| json!({ "name": name, "value": value }))
                    .collect();
                json!({
                    "name": col,
                    "type": "pie",
                    "radius": ["40%", "70%"],
                    "center": ["50%", "50%"],
                    "data": data,
                    "emphasis": {
                        "itemStyle": {
                            "shadowBlur": 10,
                            "shadowOffsetX": 0,
                            "shadowColor": EMPHASIS_SHADOW
                        }
                    }
                })
            })
            .collect();

        with_animation(json!({
            "title": title_block(title, self.default_title()),
            "tooltip": {
                "trigger": "item",
                "formatter": "{a} <br/>{b}: {c} ({d}%)"
            },
            "legend": {
                "orient": "vertical",
                "left": "left",
                "selectedMode": true
            },
            "series": series
        }))
        .into()
    }
}

// Line and bar charts: column 0 is the category axis, every other column is a series

use super::{
    data_zoom, grid, is_blank, title_block, with_animation, ChartBuilder, ChartOption, ChartType,
};
use crate::data::RecordSet;
use serde_json::{json, Value};

pub struct LineChart;
pub struct BarChart;

/// Category labels from column 0; blank cells become `Data{n}` (1-based).
fn category_labels(records: &RecordSet) -> Vec<Value> {
    records
        .column_values(0)
        .into_iter()
        .enumerate()
        .map(|(idx, cell)| {
            if is_blank(&cell) {
                Value::String(format!("Data{}", idx + 1))
            } else {
                cell
            }
        })
        .collect()
}

/// (name, raw values) for every value column.
///
/// A single-column set has no value columns, so column 0 is plotted against itself.
fn value_columns(records: &RecordSet) -> Vec<(String, Vec<Value>)> {
    let columns = records.columns();
    let range = if columns.len() > 1 { 1..columns.len() } else { 0..1 };
    range
        .map(|idx| (columns[idx].clone(), records.column_values(idx)))
        .collect()
}

impl ChartBuilder for LineChart {
    fn chart_type(&self) -> ChartType {
        ChartType::Line
    }

    fn default_title(&self) -> &'static str {
        "Interactive Line Chart"
    }

    fn build(&self, records: &RecordSet, title: Option<&str>) -> ChartOption {
        let columns = value_columns(records);
        let legend: Vec<&str> = columns.iter().map(|(name, _)| name.as_str()).collect();
        let series: Vec<Value> = columns
            .iter()
            .map(|(name, data)| {
                json!({
                    "name": name,
                    "type": "line",
                    "data": data,
                    "smooth": true,
                    "symbol": "circle",
                    "symbolSize": 6
                })
            })
            .collect();

        with_animation(json!({
            "title": title_block(title, self.default_title()),
            "tooltip": {
                "trigger": "axis",
                "axisPointer": { "type": "cross" }
            },
            "legend": { "data": legend, "selectedMode": true },
            "grid": grid(),
            "xAxis": {
                "type": "category",
                "data": category_labels(records),
                "boundaryGap": false
            },
            "yAxis": { "type": "value" },
            "dataZoom": data_zoom(),
            "series": series
        }))
        .into()
    }
}

impl ChartBuilder for BarChart {
    fn chart_type(&self) -> ChartType {
        ChartType::Bar
    }

    fn default_title(&self) -> &'static str {
        "Interactive Bar Chart"
    }

    fn build(&self, records: &RecordSet, title: Option<&str>) -> ChartOption {
        let columns = value_columns(records);
        let legend: Vec<&str> = columns.iter().map(|(name, _)| name.as_str()).collect();
        let series: Vec<Value> = columns
            .iter()
            .map(|(name, data)| {
                json!({
                    "name": name,
                    "type": "bar",
                    "data": data,
                    "itemStyle": { "borderRadius": [4, 4, 0, 0] }
                })
            })
            .collect();

        with_animation(json!({
            "title": title_block(title, self.default_title()),
            "tooltip": {
                "trigger": "axis",
                "axisPointer": { "type": "shadow" }
            },
            "legend": { "data": legend, "selectedMode": true },
            "grid": grid(),
            "xAxis": {
                "type": "category",
                "data": category_labels(records),
                "axisLabel": { "rotate": 45 }
            },
            "yAxis": { "type": "value" },
            "dataZoom": data_zoom(),
            "series": series
        }))
        .into()
    }
}

use super::{title_block, ChartBuilder, ChartOption, ChartType, SERIES_NAME};
use crate::coerce::{coerce_numeric, max_of};
use crate::data::RecordSet;
use serde_json::{json, Value};

/// One indicator per value column, one polygon per record.
pub struct RadarChart;

impl ChartBuilder for RadarChart {
    fn chart_type(&self) -> ChartType {
        ChartType::Radar
    }

    fn default_title(&self) -> &'static str {
        "Radar Chart"
    }

    fn build(&self, records: &RecordSet, title: Option<&str>) -> ChartOption {
        let value_cols = records.columns().get(1..).unwrap_or(&[]);
        let label_col = records.column(0).unwrap_or_default();

        // indicator ceiling = max coerced value in that column
        let indicators: Vec<Value> = value_cols
            .iter()
            .map(|col| {
                let max = max_of(
                    records
                        .records()
                        .iter()
                        .map(|r| coerce_numeric(RecordSet::cell(r, col))),
                );
                json!({ "name": col, "max": max })
            })
            .collect();

        let labels: Vec<&Value> = records
            .records()
            .iter()
            .map(|r| RecordSet::cell(r, label_col))
            .collect();

        let data: Vec<Value> = records
            .records()
            .iter()
            .map(|r| {
                let values: Vec<f64> = value_cols
                    .iter()
                    .map(|col| coerce_numeric(RecordSet::cell(r, col)))
                    .collect();
                json!({ "name": RecordSet::cell(r, label_col), "value": values })
            })
            .collect();

        json!({
            "title": title_block(title, self.default_title()),
            "tooltip": { "trigger": "item" },
            "legend": { "data": labels },
            "radar": { "indicator": indicators },
            "series": [{
                "name": SERIES_NAME,
                "type": "radar",
                "data": data
            }]
        })
        .into()
    }
}

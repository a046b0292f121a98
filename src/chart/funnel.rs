use super::{title_block, ChartBuilder, ChartOption, ChartType, SERIES_NAME};
use crate::coerce::coerce_numeric;
use crate::data::RecordSet;
use serde_json::{json, Value};

/// Stages from column 0, sizes from column 1, always widest first.
pub struct FunnelChart;

/// (label, coerced value) per record, sorted descending by value.
/// Equal values keep their input order.
fn stages(records: &RecordSet) -> Vec<(Value, f64)> {
    let label_col = records.column(0).unwrap_or_default();
    let value_col = records.column(1);

    let mut stages: Vec<(Value, f64)> = records
        .records()
        .iter()
        .map(|r| {
            let value = value_col
                .map(|col| coerce_numeric(RecordSet::cell(r, col)))
                .unwrap_or(0.0);
            (RecordSet::cell(r, label_col).clone(), value)
        })
        .collect();
    stages.sort_by(|a, b| b.1.total_cmp(&a.1));
    stages
}

impl ChartBuilder for FunnelChart {
    fn chart_type(&self) -> ChartType {
        ChartType::Funnel
    }

    fn default_title(&self) -> &'static str {
        "Funnel Chart"
    }

    fn build(&self, records: &RecordSet, title: Option<&str>) -> ChartOption {
        let stages = stages(records);
        let max = stages.first().map(|(_, v)| *v).unwrap_or(0.0);
        let data: Vec<Value> = stages
            .into_iter()
            .map(|(name, value)| json!({ "name": name, "value": value }))
            .collect();

        json!({
            "title": title_block(title, self.default_title()),
            "tooltip": { "trigger": "item" },
            "series": [{
                "name": SERIES_NAME,
                "type": "funnel",
                "left": "10%",
                "top": 60,
                "width": "80%",
                "height": "80%",
                "min": 0,
                "max": max,
                "minSize": "0%",
                "maxSize": "100%",
                "sort": "descending",
                "gap": 2,
                "label": { "show": true, "position": "inside" },
                "labelLine": { "length": 10, "lineStyle": { "width": 1, "type": "solid" } },
                "itemStyle": { "borderColor": "#fff", "borderWidth": 1 },
                "emphasis": { "label": { "fontSize": 20 } },
                "data": data
            }]
        })
        .into()
    }
}

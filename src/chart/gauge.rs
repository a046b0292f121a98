use super::{is_blank, title_block, ChartBuilder, ChartOption, ChartType};
use crate::coerce::{coerce_numeric, max_of};
use crate::data::RecordSet;
use serde_json::{json, Value};

/// First record's column-1 value as a percentage of the column-1 maximum.
pub struct GaugeChart;

/// Percentage of `max`; 0 when `max` is zero so the gauge never shows NaN or infinity.
pub fn percent_of(value: f64, max: f64) -> f64 {
    if max == 0.0 {
        return 0.0;
    }
    let pct = value / max * 100.0;
    if pct.is_finite() {
        pct
    } else {
        0.0
    }
}

impl ChartBuilder for GaugeChart {
    fn chart_type(&self) -> ChartType {
        ChartType::Gauge
    }

    fn default_title(&self) -> &'static str {
        "Gauge"
    }

    fn build(&self, records: &RecordSet, title: Option<&str>) -> ChartOption {
        let first = records.first();
        let label_col = records.column(0).unwrap_or_default();

        let (series_name, value, max) = match records.column(1) {
            Some(col) => {
                let value = coerce_numeric(RecordSet::cell(first, col));
                let max = max_of(
                    records
                        .records()
                        .iter()
                        .map(|r| coerce_numeric(RecordSet::cell(r, col))),
                );
                let name = if col.is_empty() { "Metric" } else { col };
                (name, value, max)
            }
            None => ("Metric", 0.0, 0.0),
        };

        let label = RecordSet::cell(first, label_col);
        let label = if is_blank(label) {
            Value::String("Current".to_string())
        } else {
            label.clone()
        };

        json!({
            "title": title_block(title, self.default_title()),
            "tooltip": { "formatter": "{a} <br/>{b} : {c}%" },
            "series": [{
                "name": series_name,
                "type": "gauge",
                "detail": { "formatter": "{value}%" },
                "data": [{ "value": percent_of(value, max), "name": label }],
                "axisLabel": { "formatter": "{value}%" },
                "max": 100
            }]
        })
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::test_support::records;

    fn gauge_value(option: &ChartOption) -> f64 {
        option.series()[0]["data"][0]["value"].as_f64().unwrap()
    }

    #[test]
    fn test_first_record_against_column_max() {
        let data = records(json!([
            {"site": "a", "load": 20},
            {"site": "b", "load": "40"},
            {"site": "c", "load": 80}
        ]));
        let option = GaugeChart.build(&data, None);
        assert_eq!(gauge_value(&option), 25.0);
        assert_eq!(option.series()[0]["name"], "load");
        assert_eq!(option.series()[0]["data"][0]["name"], "a");
        assert_eq!(option.series()[0]["max"], 100);
    }

    #[test]
    fn test_zero_max_is_zero_percent() {
        let data = records(json!([{"site": "a", "load": 0}, {"site": "b", "load": "n/a"}]));
        let option = GaugeChart.build(&data, None);
        assert_eq!(gauge_value(&option), 0.0);
    }

    #[test]
    fn test_single_column_gauge() {
        let data = records(json!([{"site": ""}]));
        let option = GaugeChart.build(&data, None);
        assert_eq!(gauge_value(&option), 0.0);
        assert_eq!(option.series()[0]["name"], "Metric");
        assert_eq!(option.series()[0]["data"][0]["name"], "Current");
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(20.0, 80.0), 25.0);
        assert_eq!(percent_of(5.0, 0.0), 0.0);
        assert_eq!(percent_of(0.0, 0.0), 0.0);
    }
}

use super::{title_block, ChartBuilder, ChartOption, ChartType, EMPHASIS_SHADOW, SERIES_NAME};
use crate::coerce::{coerce_numeric, max_of};
use crate::data::RecordSet;
use serde_json::{json, Value};

/// Rows on the y axis, value columns on the x axis, coerced cells as colour.
pub struct HeatmapChart;

/// `[x_index, y_index, value]` for every (record, value column) pair, row-major.
fn cells(records: &RecordSet) -> Vec<(usize, usize, f64)> {
    let value_cols = records.columns().get(1..).unwrap_or(&[]);
    let mut out = Vec::with_capacity(records.len() * value_cols.len());
    for (y, record) in records.records().iter().enumerate() {
        for (x, col) in value_cols.iter().enumerate() {
            out.push((x, y, coerce_numeric(RecordSet::cell(record, col))));
        }
    }
    out
}

impl ChartBuilder for HeatmapChart {
    fn chart_type(&self) -> ChartType {
        ChartType::Heatmap
    }

    fn default_title(&self) -> &'static str {
        "Heatmap"
    }

    fn build(&self, records: &RecordSet, title: Option<&str>) -> ChartOption {
        let x_axis = records.columns().get(1..).unwrap_or(&[]);
        let y_axis = records.column_values(0);
        let cells = cells(records);

        // No division happens here, so a zero maximum is emitted as-is.
        let max = max_of(cells.iter().map(|&(_, _, v)| v));
        let data: Vec<Value> = cells.iter().map(|&(x, y, v)| json!([x, y, v])).collect();

        json!({
            "title": title_block(title, self.default_title()),
            "tooltip": { "position": "top" },
            "xAxis": { "type": "category", "data": x_axis },
            "yAxis": { "type": "category", "data": y_axis },
            "visualMap": {
                "min": 0,
                "max": max,
                "calculable": true,
                "orient": "horizontal",
                "left": "center",
                "bottom": "15%"
            },
            "series": [{
                "name": SERIES_NAME,
                "type": "heatmap",
                "data": data,
                "label": { "show": true },
                "emphasis": {
                    "itemStyle": { "shadowBlur": 10, "shadowColor": EMPHASIS_SHADOW }
                }
            }]
        })
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::test_support::records;

    fn grid() -> RecordSet {
        records(json!([
            {"day": "Mon", "am": 3, "pm": "7"},
            {"day": "Tue", "am": "x", "pm": 12},
            {"day": "Wed", "am": 5, "pm": null}
        ]))
    }

    #[test]
    fn test_triple_count_is_rows_times_value_columns() {
        let option = HeatmapChart.build(&grid(), None);
        assert_eq!(option.series()[0]["data"].as_array().unwrap().len(), 3 * 2);
    }

    #[test]
    fn test_triples_and_axes() {
        let option = HeatmapChart.build(&grid(), None);
        let v = option.as_value();
        assert_eq!(v["series"][0]["data"][0], json!([0, 0, 3.0]));
        assert_eq!(v["series"][0]["data"][1], json!([1, 0, 7.0]));
        assert_eq!(v["series"][0]["data"][2], json!([0, 1, 0.0]));
        assert_eq!(v["xAxis"]["data"], json!(["am", "pm"]));
        assert_eq!(v["yAxis"]["data"], json!(["Mon", "Tue", "Wed"]));
        assert_eq!(v["visualMap"]["max"].as_f64(), Some(12.0));
    }

    #[test]
    fn test_all_zero_grid_has_zero_max() {
        let data = records(json!([{"k": "a", "v": "none"}, {"k": "b", "v": 0}]));
        let option = HeatmapChart.build(&data, None);
        assert_eq!(option.as_value()["visualMap"]["max"].as_f64(), Some(0.0));
    }
}

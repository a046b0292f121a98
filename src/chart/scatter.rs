use super::{data_zoom, grid, title_block, with_animation, BarChart, ChartBuilder, ChartOption, ChartType};
use crate::data::RecordSet;
use serde_json::{json, Value};

const POINT_SIZE: u32 = 8;
const POINT_OPACITY: f64 = 0.8;

/// Column 0 against column 1 on two value axes. Needs two columns, otherwise
/// the bar chart is produced instead.
pub struct ScatterChart;

impl ChartBuilder for ScatterChart {
    fn chart_type(&self) -> ChartType {
        ChartType::Scatter
    }

    fn default_title(&self) -> &'static str {
        "Interactive Scatter Chart"
    }

    fn build(&self, records: &RecordSet, title: Option<&str>) -> ChartOption {
        let (x_col, y_col) = match (records.column(0), records.column(1)) {
            (Some(x), Some(y)) => (x, y),
            _ => return BarChart.build(records, title),
        };

        let points: Vec<Value> = records
            .records()
            .iter()
            .map(|r| json!([RecordSet::cell(r, x_col), RecordSet::cell(r, y_col)]))
            .collect();

        with_animation(json!({
            "title": title_block(title, self.default_title()),
            "tooltip": { "trigger": "item" },
            "grid": grid(),
            "xAxis": {
                "type": "value",
                "name": x_col,
                "nameLocation": "middle",
                "nameGap": 30
            },
            "yAxis": {
                "type": "value",
                "name": y_col,
                "nameLocation": "middle",
                "nameGap": 30
            },
            "dataZoom": data_zoom(),
            "series": [{
                "name": "Scatter",
                "type": "scatter",
                "data": points,
                "symbolSize": POINT_SIZE,
                "itemStyle": { "opacity": POINT_OPACITY }
            }]
        }))
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::build_chart_option;
    use crate::chart::test_support::records;

    #[test]
    fn test_points_use_raw_cells() {
        let data = records(json!([
            {"height": "170", "weight": 65, "age": 30},
            {"height": 180, "weight": null, "age": 40}
        ]));
        let option = ScatterChart.build(&data, None);
        let v = option.as_value();
        assert_eq!(v["series"][0]["data"], json!([["170", 65], [180, null]]));
        assert_eq!(v["xAxis"]["name"], "height");
        assert_eq!(v["yAxis"]["name"], "weight");
        assert_eq!(v["series"][0]["itemStyle"]["opacity"], 0.8);
        assert_eq!(v["series"][0]["symbolSize"], 8);
    }

    #[test]
    fn test_single_column_falls_back_to_bar() {
        let data = records(json!([{"v": 1}, {"v": 2}]));
        let option = build_chart_option(&data, "scatter", Some("T"));
        assert_eq!(option, BarChart.build(&data, Some("T")));
    }
}

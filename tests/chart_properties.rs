use serde_json::{json, Value};
use tablechart::chart::{BarChart, FunnelChart, GaugeChart, HeatmapChart, RadarChart};
use tablechart::{build_chart_option, ChartBuilder, ChartType, RecordSet};

fn records(value: Value) -> RecordSet {
    RecordSet::from_json(&value).unwrap()
}

fn datasets() -> Vec<RecordSet> {
    vec![
        records(json!([{"only": "a"}])),
        records(json!([{"k": "a", "v": 1}])),
        records(json!([
            {"k": "a", "v": 1, "w": "x"},
            {"k": null, "v": "2", "w": 3.5},
            {"k": "c", "v": null, "w": ""}
        ])),
        records(json!([{"k": 0, "v": -4}, {"k": 1, "v": -9}])),
    ]
}

#[test]
fn every_builder_emits_series() {
    for data in datasets() {
        for t in ChartType::ALL {
            let option = build_chart_option(&data, t.tag(), None);
            assert!(!option.series().is_empty(), "{} produced no series", t);
        }
    }
}

#[test]
fn bar_and_line_series_shape() {
    let data = records(json!([
        {"month": "Jan", "a": 1, "b": 2, "c": 3},
        {"month": "Feb", "a": 4, "b": 5, "c": 6}
    ]));
    for tag in ["bar", "line"] {
        let option = build_chart_option(&data, tag, None);
        assert_eq!(option.series().len(), data.columns().len() - 1);
        for s in option.series() {
            assert_eq!(s["data"].as_array().unwrap().len(), data.len());
        }
    }
}

#[test]
fn scatter_with_one_column_matches_bar() {
    let data = records(json!([{"v": 1}, {"v": 2}]));
    assert_eq!(
        build_chart_option(&data, "scatter", Some("t")),
        BarChart.build(&data, Some("t"))
    );
}

#[test]
fn radar_indicator_maxima() {
    let data = records(json!([
        {"label": "p", "a": 1, "b": 2},
        {"label": "q", "a": 5, "b": 8}
    ]));
    let option = RadarChart.build(&data, None);
    let indicators = &option.as_value()["radar"]["indicator"];
    assert_eq!(indicators[0]["max"].as_f64(), Some(5.0));
    assert_eq!(indicators[1]["max"].as_f64(), Some(8.0));
}

#[test]
fn funnel_sorted_descending() {
    let data = records(json!([
        {"s": "a", "v": 10},
        {"s": "b", "v": 50},
        {"s": "c", "v": 20}
    ]));
    let option = FunnelChart.build(&data, None);
    let values: Vec<f64> = option.series()[0]["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["value"].as_f64().unwrap())
        .collect();
    assert_eq!(values, vec![50.0, 20.0, 10.0]);
}

#[test]
fn gauge_percentage() {
    let data = records(json!([
        {"s": "a", "v": 20},
        {"s": "b", "v": 40},
        {"s": "c", "v": 80}
    ]));
    let option = GaugeChart.build(&data, None);
    assert_eq!(option.series()[0]["data"][0]["value"].as_f64(), Some(25.0));
}

#[test]
fn heatmap_triple_count() {
    for data in datasets() {
        let option = HeatmapChart.build(&data, None);
        let triples = option.series()[0]["data"].as_array().unwrap().len();
        assert_eq!(triples, data.len() * (data.columns().len() - 1));
    }
}

#[test]
fn unknown_tag_matches_bar() {
    for data in datasets() {
        assert_eq!(
            build_chart_option(&data, "unknown", None),
            BarChart.build(&data, None)
        );
    }
}

#[test]
fn builders_are_idempotent() {
    for data in datasets() {
        let before = data.clone();
        for t in ChartType::ALL {
            let first = build_chart_option(&data, t.tag(), Some("x"));
            let second = build_chart_option(&data, t.tag(), Some("x"));
            assert_eq!(first, second, "{} is not repeatable", t);
        }
        assert_eq!(data, before);
    }
}

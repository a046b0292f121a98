use crate::chart::ChartType;
use crate::data::RecordSet;

pub const CLEANING_MAX_TOKENS: u32 = 1500;
pub const RECOMMENDATION_MAX_TOKENS: u32 = 1000;

fn chart_hint(chart: ChartType) -> &'static str {
    match chart {
        ChartType::Line => "interactive line chart (trends over time; zoom, hover, click)",
        ChartType::Bar => "interactive bar chart (category comparison; highlight, filtering)",
        ChartType::Pie => "interactive pie chart (share of total; slice click, legend toggling)",
        ChartType::Scatter => "interactive scatter chart (correlation; zoom, point selection)",
        ChartType::Radar => "interactive radar chart (multi-dimension comparison; indicator toggling)",
        ChartType::Heatmap => "interactive heatmap (density distribution; colour mapping)",
        ChartType::Funnel => "interactive funnel chart (process conversion; stage click)",
        ChartType::Gauge => "interactive gauge (single metric; live updates)",
    }
}

/// Shared dataset description: full data as JSON plus its shape
fn describe(records: &RecordSet) -> String {
    format!(
        "Full data ({rows} rows):\n{data:#}\n\nData profile:\n- Rows: {rows}\n- Columns: {cols}\n- Column names: {names}",
        rows = records.len(),
        data = records.to_json(),
        cols = records.columns().len(),
        names = records.columns().join(", "),
    )
}

fn label_range(records: &RecordSet) -> String {
    let label = |idx: usize| {
        records
            .records()
            .get(idx)
            .zip(records.column(0))
            .map(|(r, col)| match RecordSet::cell(r, col) {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_default()
    };
    format!("from {} to {}", label(0), label(records.len().saturating_sub(1)))
}

pub fn recommendation_prompt(records: &RecordSet) -> String {
    let hints: Vec<String> = ChartType::ALL
        .iter()
        .map(|t| format!("- {}: {}", t.tag(), chart_hint(*t)))
        .collect();

    format!(
        r#"As a data visualization expert, analyze the following data and recommend the most suitable interactive chart types.

{description}
- Data range: {range}

Choose the 3-5 most suitable chart types from the list below, taking the user's interaction experience into account:
{hints}

Analyze the data characteristics in detail and give a concrete reason for each recommendation. Answer in this format:
{{
  "recommendations": [
    {{
      "chartType": "chart type",
      "reason": "detailed reason, including the data characteristics and the use case",
      "suitable": true
    }}
  ],
  "dataInsights": "insights about the data: characteristics, trends, anomalies"
}}"#,
        description = describe(records),
        range = label_range(records),
        hints = hints.join("\n"),
    )
}

pub fn cleaning_prompt(records: &RecordSet) -> String {
    format!(
        r#"Clean the following data: handle missing values, outliers and formatting problems.

{description}

Return the complete cleaned data and notes on the processing. Answer in this format:
{{
  "cleanedData": [the complete cleaned data, all {rows} rows],
  "processingNotes": "processing notes",
  "dataQuality": "data quality assessment"
}}"#,
        description = describe(records),
        rows = records.len(),
    )
}

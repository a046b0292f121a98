// Data cleaning and chart recommendation through a remote model, with
// deterministic fallbacks whenever the model is unavailable or unhelpful.

pub mod gateway;
pub mod prompt;
pub mod response;

use crate::chart::ChartType;
use crate::data::RecordSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

pub use gateway::{DeepSeekGateway, GatewayError, ModelGateway};

const QUALITY_PENDING: &str = "Data quality to be assessed";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRecommendation {
    /// Usually a chart tag; unknown tags still render (as bar charts)
    pub chart_type: String,
    pub reason: String,
    #[serde(default = "default_suitable")]
    pub suitable: bool,
}

fn default_suitable() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub recommendations: Vec<ChartRecommendation>,
    #[serde(default)]
    pub data_insights: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleaningReport {
    pub records: RecordSet,
    pub processing_notes: String,
    pub data_quality: String,
}

/// What the model is asked to send back when cleaning
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CleaningReply {
    cleaned_data: Value,
    #[serde(default)]
    processing_notes: Option<String>,
    #[serde(default)]
    data_quality: Option<String>,
}

/// Response body for an analyzed upload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReport {
    pub success: bool,
    pub data: Value,
    pub recommendations: Vec<ChartRecommendation>,
    pub data_insights: String,
    pub processing_notes: String,
    pub data_quality: String,
}

fn default_reason(chart: ChartType) -> &'static str {
    match chart {
        ChartType::Line => "Shows how values change over time or another continuous variable, making trends easy to follow",
        ChartType::Bar => "Compares values across categories for direct side-by-side comparison",
        ChartType::Pie => "Shows the share each part contributes to the whole",
        ChartType::Scatter => "Shows the relationship between two variables and reveals correlation",
        ChartType::Radar => "Compares several indicators at once across multiple dimensions",
        ChartType::Heatmap => "Shows the density of two-dimensional data and highlights hot spots",
        ChartType::Funnel => "Shows process conversion and how each stage narrows",
        ChartType::Gauge => "Shows progress of a single metric towards its target",
    }
}

/// Recommendation set used whenever the model cannot answer
pub fn default_analysis() -> Analysis {
    Analysis {
        recommendations: ChartType::ALL
            .iter()
            .map(|t| ChartRecommendation {
                chart_type: t.tag().to_string(),
                reason: default_reason(*t).to_string(),
                suitable: true,
            })
            .collect(),
        data_insights: "Data parsed successfully; choose a chart type that fits its characteristics"
            .to_string(),
    }
}

fn request_cleaning(gateway: &dyn ModelGateway, records: &RecordSet) -> Result<CleaningReport, GatewayError> {
    let text = gateway.complete(&prompt::cleaning_prompt(records), prompt::CLEANING_MAX_TOKENS)?;
    let value = response::extract_json(&text)?;
    let reply: CleaningReply =
        serde_json::from_value(value).map_err(|e| GatewayError::Unparseable(e.to_string()))?;
    let cleaned = RecordSet::from_json(&reply.cleaned_data)
        .map_err(|e| GatewayError::Unparseable(format!("cleanedData: {}", e)))?;

    Ok(CleaningReport {
        records: cleaned,
        processing_notes: reply.processing_notes.unwrap_or_default(),
        data_quality: reply
            .data_quality
            .unwrap_or_else(|| QUALITY_PENDING.to_string()),
    })
}

/// Ask the model to clean `records`. Falls back to the input unchanged.
pub fn clean_records(gateway: Option<&dyn ModelGateway>, records: &RecordSet) -> CleaningReport {
    let gateway = match gateway {
        Some(g) => g,
        None => {
            return CleaningReport {
                records: records.clone(),
                processing_notes: "API key not configured, using original data".to_string(),
                data_quality: QUALITY_PENDING.to_string(),
            }
        }
    };

    match request_cleaning(gateway, records) {
        Ok(report) => {
            info!(rows = report.records.len(), "model cleaned data");
            report
        }
        Err(err) => {
            warn!(error = %err, "data cleaning failed, using original data");
            CleaningReport {
                records: records.clone(),
                processing_notes: "Data cleaning failed, using original data".to_string(),
                data_quality: QUALITY_PENDING.to_string(),
            }
        }
    }
}

fn request_recommendations(gateway: &dyn ModelGateway, records: &RecordSet) -> Result<Analysis, GatewayError> {
    let text = gateway.complete(
        &prompt::recommendation_prompt(records),
        prompt::RECOMMENDATION_MAX_TOKENS,
    )?;
    let value = response::extract_json(&text)?;
    serde_json::from_value(value).map_err(|e| GatewayError::Unparseable(e.to_string()))
}

/// Ask the model which charts suit `records`. Falls back to [`default_analysis`].
pub fn recommend_charts(gateway: Option<&dyn ModelGateway>, records: &RecordSet) -> Analysis {
    let result = match gateway {
        Some(g) => request_recommendations(g, records),
        None => Err(GatewayError::MissingApiKey),
    };

    match result {
        Ok(analysis) => {
            info!(count = analysis.recommendations.len(), "model recommended charts");
            analysis
        }
        Err(err) => {
            warn!(error = %err, "chart recommendation failed, using defaults");
            default_analysis()
        }
    }
}

/// Clean, then recommend on the cleaned data.
pub fn analyze_upload(gateway: Option<&dyn ModelGateway>, records: &RecordSet) -> UploadReport {
    let cleaning = clean_records(gateway, records);
    let analysis = recommend_charts(gateway, &cleaning.records);

    UploadReport {
        success: true,
        data: cleaning.records.to_json(),
        recommendations: analysis.recommendations,
        data_insights: analysis.data_insights,
        processing_notes: cleaning.processing_notes,
        data_quality: cleaning.data_quality,
    }
}

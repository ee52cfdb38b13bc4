//! Core data types for the crop recommendation client.
//!
//! This module defines the shared domain model imported by all other modules:
//! the feature vector sent to the prediction service, the ranked crops it
//! returns, the display-ready recommendations derived from them, and the
//! feedback contract. Types only, no logic or I/O.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// The seven-field numeric payload sent to `POST /api/predict`.
///
/// Field names match the service's wire format exactly (`N`, `P`, `K` are
/// upper-case on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    #[serde(rename = "N")]
    pub nitrogen: f64,
    #[serde(rename = "P")]
    pub phosphorus: f64,
    #[serde(rename = "K")]
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

// ---------------------------------------------------------------------------
// Prediction response types
// ---------------------------------------------------------------------------

/// One scored crop candidate, in the order the service ranked it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCrop {
    #[serde(rename = "crop")]
    pub crop_id: String,
    /// Model probability in [0, 1].
    #[serde(rename = "score")]
    pub raw_score: f64,
    #[serde(default)]
    pub reason: String,
}

/// Optional assessment block attached to a prediction response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default)]
    pub soil_health: Option<String>,
    #[serde(default)]
    pub weather_suitability: Option<String>,
    #[serde(default)]
    pub risk_level: Option<String>,
}

/// Body of a successful `POST /api/predict` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub recommendations: Vec<RankedCrop>,
    #[serde(default)]
    pub analysis: Option<Analysis>,
}

// ---------------------------------------------------------------------------
// Display types
// ---------------------------------------------------------------------------

/// Coarse profitability bucket derived from the model score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfitabilityTier {
    Low,
    Medium,
    High,
}

impl fmt::Display for ProfitabilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfitabilityTier::Low => write!(f, "Low"),
            ProfitabilityTier::Medium => write!(f, "Medium"),
            ProfitabilityTier::High => write!(f, "High"),
        }
    }
}

/// A `RankedCrop` augmented with static agronomic/economic metadata.
///
/// Recomputed on every call from the service response plus
/// `crops::CROP_REGISTRY`; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRecommendation {
    pub crop: String,
    pub estimated_yield: u32,
    pub confidence_percent: u8,
    pub reason: String,
    pub profitability_tier: ProfitabilityTier,
    pub season: String,
    pub water_requirement: String,
    /// Rupees per tonne.
    pub market_price: u32,
    /// Rupees per hectare.
    pub investment_required: u32,
}

/// Analysis block with the display defaults filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub soil_health: String,
    pub weather_suitability: String,
    pub risk_level: String,
}

/// Everything the results page renders for one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsView {
    pub recommendations: Vec<EnrichedRecommendation>,
    pub analysis: AnalysisSummary,
}

// ---------------------------------------------------------------------------
// Feedback types
// ---------------------------------------------------------------------------

/// A user's verdict on one recommended crop.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackRecord {
    pub farm_id: String,
    pub crop: String,
    pub accepted: bool,
    /// 1–5 stars, if the user gave any.
    pub rating: Option<u8>,
    pub comments: String,
}

/// Acknowledgment returned by `POST /api/feedback`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeedbackAck {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub feedback_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when shaping input for, or talking to, the
/// prediction service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CrsError {
    /// Malformed or missing input; never sent over the wire.
    #[error("{field} {reason}")]
    Validation { field: &'static str, reason: String },
    /// No response was received (DNS, connection refused, timeout).
    #[error("Network error: {0}")]
    Network(String),
    /// Non-2xx response. Display is the server-provided message verbatim.
    #[error("{message}")]
    Service { status: u16, message: String },
    /// A 2xx response whose body was not the documented shape.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl CrsError {
    /// Text for the dismissable alert shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            CrsError::Network(_) => {
                "Service unreachable. Please check your connection and try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_vector_uses_wire_field_names() {
        let vector = FeatureVector {
            nitrogen: 90.0,
            phosphorus: 42.0,
            potassium: 43.0,
            temperature: 20.88,
            humidity: 82.0,
            ph: 6.5,
            rainfall: 202.9,
        };
        let json = serde_json::to_value(vector).unwrap();
        assert_eq!(json["N"], 90.0);
        assert_eq!(json["P"], 42.0);
        assert_eq!(json["K"], 43.0);
        assert_eq!(json["ph"], 6.5);
        assert_eq!(json.as_object().unwrap().len(), 7);
    }

    #[test]
    fn test_prediction_response_without_analysis_parses() {
        let body = r#"{"recommendations":[{"crop":"rice","score":0.92,"reason":"x"}]}"#;
        let parsed: PredictionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.recommendations.len(), 1);
        assert_eq!(parsed.recommendations[0].crop_id, "rice");
        assert!(parsed.analysis.is_none());
    }

    #[test]
    fn test_service_error_displays_server_message_verbatim() {
        let err = CrsError::Service {
            status: 422,
            message: "ph out of range".to_string(),
        };
        assert_eq!(err.to_string(), "ph out of range");
        assert_eq!(err.user_message(), "ph out of range");
    }

    #[test]
    fn test_network_error_user_message_is_generic() {
        let err = CrsError::Network("connection refused".to_string());
        assert!(err.user_message().starts_with("Service unreachable"));
    }
}

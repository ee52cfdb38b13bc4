//! Prediction requests and response enrichment.
//!
//! The service answers with a bare ranked list of `{crop, score, reason}`.
//! Enrichment turns each entry into an `EnrichedRecommendation` using the
//! score and `crops::CROP_REGISTRY`; it never fails and never reorders.

use crate::api::ApiClient;
use crate::crops;
use crate::form::{RawFormInput, normalize_form_input};
use crate::logging::{self, Endpoint};
use crate::model::{
    Analysis, AnalysisSummary, CrsError, EnrichedRecommendation, FeatureVector,
    PredictionResponse, ProfitabilityTier, RankedCrop, ResultsView,
};

/// Yield estimate in kg/ha for a score of 1.0.
pub const YIELD_SCALE: f64 = 4000.0;

pub const DEFAULT_SOIL_HEALTH: &str = "Good";
pub const DEFAULT_WEATHER_SUITABILITY: &str = "Good";
pub const DEFAULT_RISK_LEVEL: &str = "Medium";

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

impl ApiClient {
    /// `POST /api/predict[?farm_id=...]` with the feature vector as the body.
    pub fn request_recommendations(
        &self,
        vector: &FeatureVector,
        farm_id: Option<&str>,
    ) -> Result<PredictionResponse, CrsError> {
        let mut request = self.http.post(self.api_url("/predict")).json(vector);
        if let Some(id) = farm_id {
            request = request.query(&[("farm_id", id)]);
        }

        logging::debug(Endpoint::Predict, farm_id, "dispatching prediction request");

        match self.send_json::<PredictionResponse>(request) {
            Ok(response) => {
                logging::info(
                    Endpoint::Predict,
                    farm_id,
                    &format!("received {} recommendations", response.recommendations.len()),
                );
                Ok(response)
            }
            Err(e) => {
                logging::log_request_failure(Endpoint::Predict, farm_id, "prediction", &e);
                Err(e)
            }
        }
    }

    /// Form text in, display model out: normalize, request, enrich.
    ///
    /// Validation failures return before anything is sent.
    pub fn get_crop_recommendations(
        &self,
        raw: &RawFormInput,
        farm_id: Option<&str>,
    ) -> Result<ResultsView, CrsError> {
        let vector = normalize_form_input(raw).inspect_err(|e| {
            logging::log_request_failure(Endpoint::Predict, farm_id, "form validation", e);
        })?;
        let response = self.request_recommendations(&vector, farm_id)?;
        Ok(build_results(response))
    }
}

// ---------------------------------------------------------------------------
// Enrichment
// ---------------------------------------------------------------------------

/// Score thresholds are strict: 0.8 itself is Medium, 0.6 itself is Low.
pub fn profitability_tier(raw_score: f64) -> ProfitabilityTier {
    if raw_score > 0.8 {
        ProfitabilityTier::High
    } else if raw_score > 0.6 {
        ProfitabilityTier::Medium
    } else {
        ProfitabilityTier::Low
    }
}

/// Upper-cases the first character and leaves the rest untouched.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn enrich(ranked: &RankedCrop) -> EnrichedRecommendation {
    let score = ranked.raw_score.clamp(0.0, 1.0);
    let key = ranked.crop_id.as_str();

    EnrichedRecommendation {
        crop: capitalize(key),
        estimated_yield: (score * YIELD_SCALE).round() as u32,
        confidence_percent: (score * 100.0).round() as u8,
        reason: ranked.reason.clone(),
        profitability_tier: profitability_tier(ranked.raw_score),
        season: crops::season_for(key).to_string(),
        water_requirement: crops::water_requirement_for(key).to_string(),
        market_price: crops::market_price_for(key),
        investment_required: crops::investment_required_for(key),
    }
}

/// Enriches every entry, preserving the service's order.
pub fn enrich_recommendations(ranked: &[RankedCrop]) -> Vec<EnrichedRecommendation> {
    ranked.iter().map(enrich).collect()
}

pub fn summarize_analysis(analysis: Option<&Analysis>) -> AnalysisSummary {
    let pick = |value: Option<&String>, default: &str| {
        value
            .filter(|v| !v.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| default.to_string())
    };

    AnalysisSummary {
        soil_health: pick(analysis.and_then(|a| a.soil_health.as_ref()), DEFAULT_SOIL_HEALTH),
        weather_suitability: pick(
            analysis.and_then(|a| a.weather_suitability.as_ref()),
            DEFAULT_WEATHER_SUITABILITY,
        ),
        risk_level: pick(analysis.and_then(|a| a.risk_level.as_ref()), DEFAULT_RISK_LEVEL),
    }
}

pub fn build_results(response: PredictionResponse) -> ResultsView {
    ResultsView {
        recommendations: enrich_recommendations(&response.recommendations),
        analysis: summarize_analysis(response.analysis.as_ref()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Farm profiles and recommendation history.

use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::logging::{self, Endpoint};
use crate::model::{CrsError, FeatureVector, RankedCrop};

/// Body for `POST /api/farms`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmProfile {
    pub farm_id: String,
    pub owner_name: String,
    pub location: String,
    /// Hectares.
    pub area: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FarmCreated {
    #[serde(default)]
    pub message: String,
    pub farm_id: String,
    #[serde(default)]
    pub record_id: Option<String>,
}

/// One stored prediction for a farm.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PastRecommendation {
    #[serde(default)]
    pub input_data: Option<FeatureVector>,
    #[serde(default)]
    pub recommendations: Vec<RankedCrop>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
}

/// Response of `GET /api/recommendation/{farm_id}/history`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecommendationHistory {
    pub farm_id: String,
    #[serde(default)]
    pub recommendations: Vec<PastRecommendation>,
    #[serde(default)]
    pub total_count: usize,
}

impl ApiClient {
    /// `POST /api/farms`.
    pub fn create_farm(&self, farm: &FarmProfile) -> Result<FarmCreated, CrsError> {
        let request = self.http.post(self.api_url("/farms")).json(farm);
        match self.send_json::<FarmCreated>(request) {
            Ok(created) => {
                logging::info(Endpoint::Farms, Some(&farm.farm_id), "farm created");
                Ok(created)
            }
            Err(e) => {
                logging::log_request_failure(Endpoint::Farms, Some(&farm.farm_id), "farm creation", &e);
                Err(e)
            }
        }
    }

    /// `GET /api/recommendation/{farm_id}/history`.
    pub fn get_recommendation_history(&self, farm_id: &str) -> Result<RecommendationHistory, CrsError> {
        let url = self.api_url_with_segments(&["recommendation", farm_id, "history"])?;
        self.send_json(self.http.get(url)).inspect_err(|e| {
            logging::log_request_failure(Endpoint::Farms, Some(farm_id), "history lookup", e);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_parses_stored_predictions() {
        let body = r#"{
            "farm_id": "farm_1",
            "total_count": 1,
            "recommendations": [{
                "farm_id": "farm_1",
                "input_data": {"N": 90, "P": 42, "K": 43, "temperature": 25,
                               "humidity": 80, "ph": 6.5, "rainfall": 200},
                "recommendations": [{"crop": "rice", "score": 0.92, "reason": "x"}],
                "created_at": "2024-05-01T12:00:00",
                "season": null
            }]
        }"#;
        let history: RecommendationHistory = serde_json::from_str(body).unwrap();
        assert_eq!(history.total_count, 1);
        let past = &history.recommendations[0];
        assert_eq!(past.input_data.unwrap().nitrogen, 90.0);
        assert_eq!(past.recommendations[0].crop_id, "rice");
        assert!(past.season.is_none());
    }

    #[test]
    fn test_empty_history_parses() {
        let history: RecommendationHistory =
            serde_json::from_str(r#"{"farm_id":"farm_2","recommendations":[],"total_count":0}"#)
                .unwrap();
        assert!(history.recommendations.is_empty());
    }
}

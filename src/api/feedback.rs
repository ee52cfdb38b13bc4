//! Feedback submission.
//!
//! Feedback is sent once and not retried. Whether a failure is shown to the
//! user or only logged is the caller's decision; this module always returns
//! it.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::logging::{self, Endpoint};
use crate::model::{CrsError, FeedbackAck, FeedbackRecord};

/// Request body for `POST /api/feedback`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackPayload<'a> {
    pub farm_id: &'a str,
    /// Always lower-case on the wire.
    pub crop: String,
    pub accepted: bool,
    pub rating: Option<u8>,
    pub comments: &'a str,
}

/// Response of `GET /api/feedback/stats`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedbackStats {
    pub total_feedback: u64,
    pub accepted_count: u64,
    /// Percentage, 0–100.
    pub acceptance_rate: f64,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub crops_with_feedback: Vec<String>,
    #[serde(default)]
    pub filtered_by_crop: Option<String>,
}

/// Identifier for a submission when the caller has no farm on record.
pub fn generate_farm_id() -> String {
    format!("farm_{}", Utc::now().timestamp_millis())
}

/// Checks a record and shapes it for the wire.
pub fn feedback_payload(record: &FeedbackRecord) -> Result<FeedbackPayload<'_>, CrsError> {
    if record.farm_id.trim().is_empty() {
        return Err(CrsError::Validation {
            field: "farm_id",
            reason: "is required".to_string(),
        });
    }
    if record.crop.trim().is_empty() {
        return Err(CrsError::Validation {
            field: "crop",
            reason: "is required".to_string(),
        });
    }
    if let Some(rating) = record.rating {
        if !(1..=5).contains(&rating) {
            return Err(CrsError::Validation {
                field: "rating",
                reason: format!("must be between 1 and 5, got {}", rating),
            });
        }
    }

    Ok(FeedbackPayload {
        farm_id: &record.farm_id,
        crop: record.crop.to_lowercase(),
        accepted: record.accepted,
        rating: record.rating,
        comments: &record.comments,
    })
}

impl ApiClient {
    /// `POST /api/feedback`.
    pub fn submit_feedback(&self, record: &FeedbackRecord) -> Result<FeedbackAck, CrsError> {
        let farm_id = Some(record.farm_id.as_str());
        let payload = feedback_payload(record).inspect_err(|e| {
            logging::log_request_failure(Endpoint::Feedback, farm_id, "feedback validation", e);
        })?;

        let request = self.http.post(self.api_url("/feedback")).json(&payload);
        match self.send_json::<FeedbackAck>(request) {
            Ok(ack) => {
                logging::info(
                    Endpoint::Feedback,
                    farm_id,
                    &format!("feedback for {} recorded", payload.crop),
                );
                Ok(ack)
            }
            Err(e) => {
                logging::log_request_failure(Endpoint::Feedback, farm_id, "feedback submission", &e);
                Err(e)
            }
        }
    }

    /// `GET /api/feedback/stats[?crop=...]`.
    pub fn get_feedback_stats(&self, crop: Option<&str>) -> Result<FeedbackStats, CrsError> {
        let mut request = self.http.get(self.api_url("/feedback/stats"));
        if let Some(crop) = crop {
            request = request.query(&[("crop", crop.trim().to_lowercase())]);
        }
        self.send_json(request).inspect_err(|e| {
            logging::log_request_failure(Endpoint::Feedback, crop, "feedback stats", e);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rating: Option<u8>) -> FeedbackRecord {
        FeedbackRecord {
            farm_id: "farm_1".to_string(),
            crop: "Rice".to_string(),
            accepted: true,
            rating,
            comments: "Good yield".to_string(),
        }
    }

    #[test]
    fn test_crop_is_lowercased_and_other_fields_pass_through() {
        let rec = record(Some(5));
        let payload = feedback_payload(&rec).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["farm_id"], "farm_1");
        assert_eq!(json["crop"], "rice");
        assert_eq!(json["accepted"], true);
        assert_eq!(json["rating"], 5);
        assert_eq!(json["comments"], "Good yield");
    }

    #[test]
    fn test_crop_is_only_lowercased() {
        let mut rec = record(Some(4));
        rec.crop = " Sugarcane ".to_string();
        assert_eq!(feedback_payload(&rec).unwrap().crop, " sugarcane ");
    }

    #[test]
    fn test_absent_rating_serializes_as_null() {
        let rec = record(None);
        let json = serde_json::to_value(feedback_payload(&rec).unwrap()).unwrap();
        assert!(json["rating"].is_null());
        assert!(json.as_object().unwrap().contains_key("rating"));
    }

    #[test]
    fn test_rating_outside_one_to_five_is_rejected() {
        for bad in [0, 6] {
            let rec = record(Some(bad));
            assert!(matches!(
                feedback_payload(&rec),
                Err(CrsError::Validation { field: "rating", .. })
            ));
        }
    }

    #[test]
    fn test_blank_farm_id_is_rejected() {
        let mut rec = record(Some(3));
        rec.farm_id = " ".to_string();
        assert!(matches!(
            feedback_payload(&rec),
            Err(CrsError::Validation { field: "farm_id", .. })
        ));
    }

    #[test]
    fn test_generated_farm_id_has_prefix_and_timestamp() {
        let id = generate_farm_id();
        let millis = id.strip_prefix("farm_").expect("id should start with farm_");
        assert!(millis.parse::<i64>().unwrap() > 0);
    }
}

//! Weather, soil and market-price lookups.
//!
//! These endpoints have no fixed response shape yet, so bodies come back as
//! raw JSON. Failures propagate like every other request.

use serde::Serialize;
use serde_json::Value;

use crate::api::ApiClient;
use crate::logging::{self, Endpoint};
use crate::model::CrsError;

#[derive(Serialize)]
struct LocationQuery<'a> {
    location: &'a str,
}

#[derive(Serialize)]
struct MarketPriceQuery<'a> {
    crops: &'a [String],
    location: &'a str,
}

impl ApiClient {
    fn post_auxiliary<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, CrsError> {
        let request = self.http.post(self.api_url(path)).json(body);
        self.send_json(request).inspect_err(|e| {
            logging::log_request_failure(Endpoint::Auxiliary, None, path, e);
        })
    }

    /// `POST /api/weather`.
    pub fn get_weather_data(&self, location: &str) -> Result<Value, CrsError> {
        self.post_auxiliary("/weather", &LocationQuery { location })
    }

    /// `POST /api/soil`.
    pub fn get_soil_data(&self, location: &str) -> Result<Value, CrsError> {
        self.post_auxiliary("/soil", &LocationQuery { location })
    }

    /// `POST /api/market-prices`.
    pub fn get_market_prices(&self, crops: &[String], location: &str) -> Result<Value, CrsError> {
        self.post_auxiliary("/market-prices", &MarketPriceQuery { crops, location })
    }
}

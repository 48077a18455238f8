// src/services/availability.rs

//! Open-area discovery service.
//!
//! Queries the portal's find-open-areas endpoint for a given date and
//! builds the availability lookup table.

use chrono::NaiveDate;
use reqwest::Client;
use reqwest::header::HeaderMap;
use serde::Deserialize;

use crate::error::Result;
use crate::models::{Area, AvailabilityMap, Config, build_availability_map};
use crate::services::SERVICE_ID;
use crate::utils::http;

/// Response body of the find-open-areas endpoint.
#[derive(Debug, Deserialize)]
struct FindOkAreaResponse {
    #[serde(default)]
    object: Vec<Area>,
}

/// Service for fetching bookable areas for a date.
pub struct AvailabilityFetcher {
    client: Client,
    headers: HeaderMap,
    url: String,
}

impl AvailabilityFetcher {
    /// Create a new fetcher from the application configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: http::create_client(&config.portal)?,
            headers: http::portal_headers(&config.portal)?,
            url: config.apis.find_ok_area.clone(),
        })
    }

    /// Fetch the availability map for `date`.
    ///
    /// Sent once, no retry; the caller treats any failure as fatal for
    /// the run.
    pub async fn fetch(&self, date: NaiveDate) -> Result<AvailabilityMap> {
        let date = date.format("%Y-%m-%d").to_string();
        log::info!("Fetching open areas for {date}");

        let body: FindOkAreaResponse = self
            .client
            .get(&self.url)
            .headers(self.headers.clone())
            .query(&[("s_date", date.as_str()), ("serviceid", SERVICE_ID)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        log::info!("Portal returned {} bookable areas", body.object.len());
        Ok(build_availability_map(body.object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SlotKey, Target};

    #[test]
    fn decodes_portal_response() {
        let body = r#"{
            "message": "ok",
            "object": [
                {"sname": "场地1", "stock": {"time_no": "14:01-15:00"}, "stock_id": 101, "id": 11},
                {"sname": "场地2", "stock": {"time_no": "14:01-15:00"}, "stock_id": 102, "id": 12}
            ]
        }"#;
        let response: FindOkAreaResponse = serde_json::from_str(body).unwrap();
        let map = build_availability_map(response.object);

        assert_eq!(map.len(), 2);
        let key = Target { time: 14, number: 2 }.slot_key();
        assert_eq!(map.get(&key).unwrap().stock_id, 102);
    }

    #[test]
    fn decodes_empty_object_list() {
        let response: FindOkAreaResponse = serde_json::from_str(r#"{"object": []}"#).unwrap();
        assert!(build_availability_map(response.object).is_empty());
    }

    #[test]
    fn missing_object_field_means_no_areas() {
        let response: FindOkAreaResponse =
            serde_json::from_str(r#"{"message": "no data"}"#).unwrap();
        assert!(response.object.is_empty());
    }

    #[test]
    fn duplicate_keys_keep_last_entry() {
        let body = r#"{"object": [
            {"sname": "场地1", "stock": {"time_no": "14:01-15:00"}, "stock_id": 1, "id": 10},
            {"sname": "场地1", "stock": {"time_no": "14:01-15:00"}, "stock_id": 2, "id": 20}
        ]}"#;
        let response: FindOkAreaResponse = serde_json::from_str(body).unwrap();
        let map = build_availability_map(response.object);

        let key = SlotKey {
            time_no: "14:01-15:00".to_string(),
            area_name: "场地1".to_string(),
        };
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&key).unwrap().stock_id, 2);
    }
}

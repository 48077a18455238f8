// src/services/order.rs

//! Order submission service.
//!
//! Builds the portal's nested order payload for a target slot and posts it
//! to the payment endpoint, classifying the free-text reply message into an
//! explicit [`OrderStatus`].

use std::collections::HashMap;
use std::fmt;

use reqwest::Client;
use reqwest::header::{COOKIE, HeaderMap};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{AvailabilityMap, Config, Target};
use crate::services::SERVICE_ID;
use crate::utils::http;

/// Portal reply messages, classified.
///
/// The portal signals outcomes only through the free-text `message` field;
/// these are the known replies. `Booked`, `Unpaid` and `LimitExceeded` all
/// mean an order was registered (or already counted) for the user, so they
/// count as reserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStatus {
    /// "预订成功" — reservation confirmed
    Booked,
    /// "未支付" — reserved, payment pending
    Unpaid,
    /// "本天预订数量超过限制" — daily reservation limit reached
    LimitExceeded,
    /// A known rejection, e.g. "座位已被预订" (slot already taken)
    Rejected(String),
    /// A reply message this client does not recognize
    Unknown(String),
}

impl OrderStatus {
    /// Classify a portal reply message.
    pub fn from_message(message: &str) -> Self {
        match message {
            "预订成功" => OrderStatus::Booked,
            "未支付" => OrderStatus::Unpaid,
            "本天预订数量超过限制" => OrderStatus::LimitExceeded,
            "座位已被预订" => OrderStatus::Rejected(message.to_string()),
            other => OrderStatus::Unknown(other.to_string()),
        }
    }

    /// Whether the portal registered an order for this attempt.
    pub fn is_reserved(&self) -> bool {
        matches!(
            self,
            OrderStatus::Booked | OrderStatus::Unpaid | OrderStatus::LimitExceeded
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Booked => write!(f, "reservation booked"),
            OrderStatus::Unpaid => write!(f, "reserved, payment pending"),
            OrderStatus::LimitExceeded => write!(f, "daily reservation limit reached"),
            OrderStatus::Rejected(message) => write!(f, "rejected: {message}"),
            OrderStatus::Unknown(message) => write!(f, "unrecognized portal reply: {message}"),
        }
    }
}

/// Outcome of one order attempt for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderOutcome {
    /// The order was posted and the portal replied
    Submitted(OrderStatus),
    /// The target's slot key was not in the availability map; no request
    /// was sent
    NotAvailable,
}

/// Inner order parameters, serialized to a JSON string and embedded in the
/// outer payload.
#[derive(Debug, Serialize, Deserialize)]
struct OrderParam {
    /// Stock id → area id, one entry for a single-slot order
    stockdetail: HashMap<String, String>,
    serviceid: String,
    /// Stock id with a trailing comma, the portal's single-stock encoding
    stockid: String,
    remark: String,
}

/// Outer order payload posted to the payment endpoint.
#[derive(Debug, Serialize)]
pub struct OrderPayload {
    param: String,
    num: String,
    json: String,
}

/// Build the order payload for `target`, or `None` when the slot is not in
/// today's availability. Performs no network activity.
pub fn prepare_order(target: &Target, availability: &AvailabilityMap) -> Result<Option<OrderPayload>> {
    let Some(info) = availability.get(&target.slot_key()) else {
        return Ok(None);
    };

    let mut stockdetail = HashMap::new();
    stockdetail.insert(info.stock_id.to_string(), info.id.to_string());
    let param = OrderParam {
        stockdetail,
        serviceid: SERVICE_ID.to_string(),
        stockid: format!("{},", info.stock_id),
        remark: String::new(),
    };

    Ok(Some(OrderPayload {
        param: serde_json::to_string(&param)?,
        num: "1".to_string(),
        json: "true".to_string(),
    }))
}

/// Portal reply to an order POST.
#[derive(Debug, Deserialize)]
struct OrderResponse {
    #[serde(default)]
    message: String,
}

/// Service that posts order payloads with the session cookies attached.
pub struct OrderSubmitter {
    client: Client,
    headers: HeaderMap,
    url: String,
}

impl OrderSubmitter {
    /// Create a new submitter from the application configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: http::create_client(&config.portal)?,
            headers: http::portal_headers(&config.portal)?,
            url: config.apis.pay.clone(),
        })
    }

    /// Attempt one order for `target`. One POST, no retry at this layer.
    ///
    /// Short-circuits with [`OrderOutcome::NotAvailable`] and zero network
    /// calls when the slot key is absent from the availability map.
    pub async fn submit(
        &self,
        target: &Target,
        cookies: &HashMap<String, String>,
        availability: &AvailabilityMap,
    ) -> Result<OrderOutcome> {
        let Some(payload) = prepare_order(target, availability)? else {
            return Ok(OrderOutcome::NotAvailable);
        };

        log::info!("Submitting order for {target}");

        // The portal expects JSON bytes under the form-urlencoded
        // Content-Type from the fixed header set, so the payload is sent
        // as a raw body.
        let response = self
            .client
            .post(&self.url)
            .headers(self.headers.clone())
            .header(COOKIE, http::cookie_header(cookies))
            .body(serde_json::to_vec(&payload)?)
            .send()
            .await?;

        let reply: OrderResponse = response
            .json()
            .await
            .map_err(|e| AppError::order(target.to_string(), format!("undecodable reply: {e}")))?;

        Ok(OrderOutcome::Submitted(OrderStatus::from_message(
            &reply.message,
        )))
    }
}

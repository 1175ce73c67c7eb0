use chrono::{DateTime, FixedOffset, SecondsFormat};
use log::info;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use vantage_decode::{ForecastLabel, FrameLayout};

use crate::pipeline::Reading;

pub const DEFAULT_FRIENDLY_NAME: &str = "Campus Weather";

/// Body of the state update.
#[derive(Debug, Serialize)]
pub struct StatePayload {
    pub state: ForecastLabel,
    pub attributes: Attributes,
}

#[derive(Debug, Serialize)]
pub struct Attributes {
    pub friendly_name: String,
    pub pressure: Option<f64>,
    pub temperature: Option<f64>,
    pub wind_speed: Option<u8>,
    /// Outer `None` leaves the key out for layouts without a bearing field;
    /// inner `None` publishes `null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_bearing: Option<Option<u16>>,
    pub humidity: Option<u8>,
    pub last_update: String,
}

impl StatePayload {
    pub fn new(reading: &Reading, layout: &FrameLayout, friendly_name: &str, now: DateTime<FixedOffset>) -> Self {
        let m = &reading.measurement;
        Self {
            state: reading.forecast,
            attributes: Attributes {
                friendly_name: friendly_name.to_string(),
                pressure: m.pressure,
                temperature: m.temperature,
                wind_speed: m.wind_speed,
                wind_bearing: layout.reports_bearing().then_some(m.wind_bearing),
                humidity: m.humidity,
                last_update: now.to_rfc3339_opts(SecondsFormat::Secs, false),
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("publish request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("endpoint rejected state update with HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Posts state updates to one endpoint with a bearer token.
pub struct Publisher {
    client: reqwest::blocking::Client,
    url: String,
    token: String,
}

impl Publisher {
    pub fn new(url: &str, token: &str) -> Result<Self, PublishError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
            token: token.to_string(),
        })
    }

    pub fn post(&self, payload: &StatePayload) -> Result<(), PublishError> {
        // json() sets Content-Type: application/json
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(payload)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(PublishError::Status {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        info!("published state {} to {} ({status})", payload.state, self.url);
        Ok(())
    }
}

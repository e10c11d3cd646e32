use std::{env, time::Duration};

use serde::Deserialize;

mod records;
pub use records::{FlightNumber, FlightRecord, Leg};

/// Endpoint used when `FLIGHTS_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://api.aviationstack.com/v1";

const API_URL_VAR: &str = "FLIGHTS_API_URL";
const API_KEY_VAR: &str = "FLIGHTS_API_KEY";
const SCHEDULED_STATUS: &str = "scheduled";
const REQUEST_TIMEOUT_SECS: u64 = 5;

#[derive(Debug)]
pub enum ApiError {
    MissingKey,
    ClientBuild(String),
    Transport(String),
    Status(u16),
    Decode(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::MissingKey => {
                write!(f, "access key not configured (set {})", API_KEY_VAR)
            }
            ApiError::ClientBuild(msg) => write!(f, "could not build HTTP client: {}", msg),
            ApiError::Transport(msg) => write!(f, "request failed: {}", msg),
            ApiError::Status(code) => write!(f, "API answered with status {}", code),
            ApiError::Decode(msg) => write!(f, "malformed API response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Where to reach the flight API and how to authenticate against it.
/// Read once at startup; there is no runtime reconfiguration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub access_key: String,
}

impl ApiConfig {
    pub fn new(base_url: &str, access_key: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            access_key: access_key.to_string(),
        }
    }

    /// Reads `FLIGHTS_API_URL` and `FLIGHTS_API_KEY` from the environment.
    /// The URL falls back to the public endpoint; the key is required.
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url = env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let access_key = env::var(API_KEY_VAR).map_err(|_| ApiError::MissingKey)?;
        Ok(Self {
            base_url,
            access_key,
        })
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    data: Vec<FlightRecord>,
}

/// Parses the `{ "data": [...] }` envelope returned by the flights endpoint.
pub fn decode_flights(body: &str) -> Result<Vec<FlightRecord>, ApiError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(envelope.data)
}

/// Blocking client for the flight-tracking API with a preconfigured base URL
/// and a fixed request timeout. One best-effort attempt per call; retries and
/// backoff are deliberately absent.
#[derive(Debug, Clone)]
pub struct FlightApiClient {
    client: reqwest::blocking::Client,
    config: ApiConfig,
}

impl FlightApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// The `/flights` endpoint this client queries.
    pub fn flights_url(&self) -> String {
        format!("{}/flights", self.config.base_url.trim_end_matches('/'))
    }

    /// Requests up to `limit` scheduled flights. The status filter is fixed
    /// to `scheduled`; authentication travels as the `access_key` parameter.
    pub fn get_flights(&self, limit: u32) -> Result<Vec<FlightRecord>, ApiError> {
        let response = self
            .client
            .get(self.flights_url())
            .query(&[
                ("limit", limit.to_string()),
                ("access_key", self.config.access_key.clone()),
                ("flight_status", SCHEDULED_STATUS.to_string()),
            ])
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        decode_flights(&body)
    }
}

use super::advice::{Advice, AdviceRequest, Advisor, SoilEstimate, advice_prompt, soil_prompt};
use crate::config::AdvisorConfig;
use crate::domain::{Coordinate, SoilProfile};
use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;

const USER_AGENT: &str = concat!("agriflow/", env!("CARGO_PKG_VERSION"));

/// Failures talking to the model. These never leave this module: the
/// [`Advisor`] impl logs them and answers `None`.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model API returned status {0}")]
    Status(u16),
    #[error("model API still busy after {attempts} attempts (last status {last_status})")]
    RetriesExhausted { attempts: u32, last_status: u16 },
    #[error("model returned no text")]
    EmptyResponse,
    #[error("model output is not the expected JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("model suggested unknown soil id {0:?}")]
    UnknownSoil(String),
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

/// Advisory collaborator backed by the Gemini `generateContent` REST API
pub struct GeminiAdvisor {
    client: reqwest::blocking::Client,
    url: String,
    api_key: String,
    max_retries: u32,
}

impl GeminiAdvisor {
    pub fn new(config: &AdvisorConfig, api_key: String) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: generate_url(&config.endpoint, &config.model),
            api_key,
            max_retries: config.max_retries.max(1),
        })
    }

    fn try_advise(&self, request: &AdviceRequest) -> Result<Advice, AdvisorError> {
        let body = request_body(&advice_prompt(request), advice_schema());
        self.generate(&body)
    }

    fn try_estimate_soil(
        &self,
        at: Coordinate,
        soils: &[SoilProfile],
    ) -> Result<SoilEstimate, AdvisorError> {
        let body = request_body(&soil_prompt(at, soils), soil_schema());
        let estimate: SoilEstimate = self.generate(&body)?;
        check_soil(estimate, soils)
    }

    /// POST the request, retrying while the service reports overload
    fn generate<T: DeserializeOwned>(&self, body: &Value) -> Result<T, AdvisorError> {
        let mut last_status = 0;

        for attempt in 0..self.max_retries {
            if attempt > 0 {
                let wait_secs = 2 * attempt as u64;
                log::warn!(
                    "Model API busy (status {}), retrying in {}s (attempt {}/{})",
                    last_status,
                    wait_secs,
                    attempt + 1,
                    self.max_retries
                );
                std::thread::sleep(Duration::from_secs(wait_secs));
            }

            log::debug!("POST {}", self.url);
            let response = self
                .client
                .post(&self.url)
                .header("x-goog-api-key", &self.api_key)
                .json(body)
                .send()?;

            match response.status().as_u16() {
                200 => {
                    let raw = response.text()?;
                    log::debug!("Model answered with {} bytes", raw.len());
                    return decode(&raw);
                }
                // 429 = rate limited, 503 = overloaded
                429 | 503 => {
                    last_status = response.status().as_u16();
                    continue;
                }
                status => return Err(AdvisorError::Status(status)),
            }
        }

        Err(AdvisorError::RetriesExhausted {
            attempts: self.max_retries,
            last_status,
        })
    }
}

impl Advisor for GeminiAdvisor {
    fn advise(&self, request: &AdviceRequest) -> Option<Advice> {
        or_none(self.try_advise(request), "Advice request")
    }

    fn estimate_soil(&self, at: Coordinate, soils: &[SoilProfile]) -> Option<SoilEstimate> {
        or_none(self.try_estimate_soil(at, soils), "Soil estimation")
    }
}

/// Log a failed call and turn it into "no data"
fn or_none<T>(result: Result<T, AdvisorError>, what: &str) -> Option<T> {
    result
        .map_err(|e| log::warn!("{} failed: {}", what, e))
        .ok()
}

/// Structured model output from a raw `generateContent` response body
fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, AdvisorError> {
    let parsed: GenerateContentResponse = serde_json::from_str(raw)?;
    let text = candidate_text(&parsed)?;
    Ok(serde_json::from_str(&text)?)
}

fn generate_url(endpoint: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        endpoint.trim_end_matches('/'),
        model
    )
}

fn request_body(prompt: &str, schema: Value) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": schema,
        }
    })
}

fn advice_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "dailyWaterNeeds": { "type": "STRING" },
            "bestTiming": { "type": "STRING" },
            "precautions": { "type": "ARRAY", "items": { "type": "STRING" } },
            "automationTips": { "type": "STRING" }
        },
        "required": ["dailyWaterNeeds", "bestTiming", "precautions", "automationTips"]
    })
}

fn soil_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "soilId": { "type": "STRING" },
            "reason": { "type": "STRING" }
        },
        "required": ["soilId", "reason"]
    })
}

/// Concatenated text parts of the first candidate
fn candidate_text(response: &GenerateContentResponse) -> Result<String, AdvisorError> {
    let text: String = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AdvisorError::EmptyResponse);
    }
    Ok(text)
}

fn check_soil(estimate: SoilEstimate, soils: &[SoilProfile]) -> Result<SoilEstimate, AdvisorError> {
    if soils.iter().any(|s| s.id == estimate.soil_id) {
        Ok(estimate)
    } else {
        Err(AdvisorError::UnknownSoil(estimate.soil_id))
    }
}

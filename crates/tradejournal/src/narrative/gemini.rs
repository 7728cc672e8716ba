//! Google Gemini narrative generator.
//!
//! Calls the `generateContent` REST endpoint with a JSON response schema so
//! the model answers with a [`CoachAnalysis`] document.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{CoachAnalysis, NarrativeGenerator, NarrativeRequest, parse_analysis};
use crate::error::NarrativeError;
use crate::settings::NarrativeSettings;

/// Checked when the configured variable is unset
const FALLBACK_KEY_ENV: &str = "GEMINI_API_KEY";

/// Error bodies are cut to this many characters before they reach the status bar
const MAX_ERROR_BODY: usize = 200;

/// Blocking Gemini client
#[derive(Debug)]
pub struct GeminiGenerator {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiGenerator {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NarrativeError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into(),
        })
    }

    /// Build a client from the `narrative` settings section.
    ///
    /// The key comes from the environment variable named in settings, or
    /// `GEMINI_API_KEY` when that one is unset.
    pub fn from_settings(settings: &NarrativeSettings) -> Result<Self, NarrativeError> {
        let api_key = lookup_key(&settings.api_key_env, |name| std::env::var(name).ok())
            .ok_or_else(|| NarrativeError::MissingCredential {
                var: settings.api_key_env.clone(),
            })?;

        Self::new(
            api_key,
            settings.model.clone(),
            settings.endpoint.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

fn lookup_key(primary: &str, env: impl Fn(&str) -> Option<String>) -> Option<String> {
    [primary, FALLBACK_KEY_ENV]
        .into_iter()
        .filter_map(|name| env(name))
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Default)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

fn text_content(role: Option<&str>, text: String) -> Content {
    Content {
        role: role.map(str::to_string),
        parts: vec![Part { text }],
    }
}

fn analysis_schema() -> Value {
    let string = json!({ "type": "STRING" });
    json!({
        "type": "OBJECT",
        "properties": {
            "vibeReport": {
                "type": "OBJECT",
                "properties": {
                    "stokeMeter": string,
                    "mustangProgress": string,
                    "momentumRating": string,
                    "hypeLine": string,
                    "realityCheck": string,
                }
            },
            "coachInsights": string,
            "nextFocus": string,
        }
    })
}

fn build_request(request: &NarrativeRequest) -> Result<GenerateRequest, NarrativeError> {
    Ok(GenerateRequest {
        system_instruction: text_content(None, request.system_instruction()),
        contents: vec![text_content(Some("user"), request.prompt()?)],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: analysis_schema(),
        },
    })
}

/// Text of the first candidate, parts joined
fn response_text(response: GenerateResponse) -> Result<String, NarrativeError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .map(|c| c.content.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err(NarrativeError::EmptyResponse)
    } else {
        Ok(text)
    }
}

impl NarrativeGenerator for GeminiGenerator {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn generate(&self, request: &NarrativeRequest) -> Result<CoachAnalysis, NarrativeError> {
        let body = build_request(request)?;

        tracing::debug!(model = %self.model, entries = request.recent_entries.len(), "Requesting coach analysis");

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body: String = response
                .text()
                .unwrap_or_default()
                .chars()
                .take(MAX_ERROR_BODY)
                .collect();
            return Err(NarrativeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response_text(response.json::<GenerateResponse>()?)?;
        parse_analysis(&text)
    }
}

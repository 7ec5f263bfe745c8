//! AI plan-generation provider client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use wanderly_core::Upstream;
use wanderly_plans::{CostBreakdown, DayPlan, Hotel};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used for the first generation attempt.
pub const PRIMARY_MODEL: &str = "gemini-2.0-flash";
/// Model substituted exactly once when the primary attempt fails.
pub const FALLBACK_MODEL: &str = "gemini-flash-latest";

/// The structured trip plan a generation request produces.
///
/// This is the payload the AI cache stores verbatim; the planner grafts it
/// onto the trip parameters to assemble a full record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlan {
    /// Ordered day plans.
    pub itinerary: Vec<DayPlan>,
    /// Recommended hotels.
    #[serde(default)]
    pub hotels: Vec<Hotel>,
    /// Estimated cost breakdown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub costs: Option<CostBreakdown>,
    /// Packing list items.
    #[serde(default)]
    pub packing: Vec<String>,
    /// Destination tips.
    #[serde(default)]
    pub tips: Vec<String>,
}

/// Error type for plan generation.
#[derive(Debug, Error)]
pub enum PlanProviderError {
    /// The request could not be sent or the response body not read.
    #[error("plan request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("plan provider returned {status}: {body}")]
    Status {
        /// HTTP status the provider answered with.
        status: reqwest::StatusCode,
        /// Response body, kept for diagnosis.
        body: String,
    },

    /// The response parsed but carried no candidate content.
    #[error("plan response has no candidate content")]
    InvalidStructure,

    /// The generated text is not a valid plan, even after fence-stripping.
    /// The raw text is logged for diagnosis.
    #[error("plan payload is not valid JSON: {0}")]
    MalformedPayload(#[source] serde_json::Error),
}

// Generation API wire shapes.
#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: String,
}

/// Client for the generative plan provider.
///
/// One generation attempt per model: the primary model first, then the
/// fallback model exactly once if the primary attempt fails in transport
/// or status. Retrying is the extent of the policy here; the cache layer
/// above never retries.
#[derive(Clone, Debug)]
pub struct PlanClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    primary_model: String,
    fallback_model: String,
}

impl PlanClient {
    /// Creates a client against the production endpoint with the default
    /// model pair.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: api_key.into(),
            primary_model: PRIMARY_MODEL.to_owned(),
            fallback_model: FALLBACK_MODEL.to_owned(),
        }
    }

    /// Overrides the provider base URL (tests point this at a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the primary/fallback model pair.
    pub fn with_models(
        mut self,
        primary: impl Into<String>,
        fallback: impl Into<String>,
    ) -> Self {
        self.primary_model = primary.into();
        self.fallback_model = fallback.into();
        self
    }

    /// Generate a trip plan from the given prompt.
    pub async fn generate(&self, prompt: &str) -> Result<GeneratedPlan, PlanProviderError> {
        let text = match self.generate_text(prompt, &self.primary_model).await {
            Ok(text) => text,
            Err(
                error @ (PlanProviderError::Transport(_) | PlanProviderError::Status { .. }),
            ) => {
                warn!(
                    %error,
                    model = %self.primary_model,
                    fallback = %self.fallback_model,
                    "primary model failed, substituting fallback model"
                );
                self.generate_text(prompt, &self.fallback_model).await?
            }
            Err(error) => return Err(error),
        };
        parse_plan(&text)
    }

    async fn generate_text(
        &self,
        prompt: &str,
        model: &str,
    ) -> Result<String, PlanProviderError> {
        debug!(model, "calling plan generation");
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        let response = self
            .http
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&GenerateRequest {
                contents: [RequestContent {
                    parts: [RequestPart { text: prompt }],
                }],
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlanProviderError::Status { status, body });
        }

        let data: GenerateResponse = response.json().await?;
        data.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or(PlanProviderError::InvalidStructure)
    }
}

#[async_trait]
impl Upstream<String> for PlanClient {
    type Response = GeneratedPlan;
    type Error = PlanProviderError;

    async fn call(&self, prompt: String) -> Result<Self::Response, Self::Error> {
        self.generate(&prompt).await
    }
}

/// Strip markdown code fences the model sometimes wraps its JSON in.
fn strip_fences(text: &str) -> String {
    text.trim()
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_owned()
}

fn parse_plan(text: &str) -> Result<GeneratedPlan, PlanProviderError> {
    let cleaned = strip_fences(text);
    serde_json::from_str(&cleaned).map_err(|error| {
        warn!(raw = %text, "generated plan failed to parse");
        PlanProviderError::MalformedPayload(error)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fences_removes_json_fence() {
        let fenced = "```json\n{\"itinerary\": []}\n```";
        assert_eq!(strip_fences(fenced), "{\"itinerary\": []}");
    }

    #[test]
    fn test_strip_fences_leaves_plain_text() {
        assert_eq!(strip_fences(" {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn test_parse_plan_rejects_garbage() {
        let err = parse_plan("the model apologized instead").unwrap_err();
        assert!(matches!(err, PlanProviderError::MalformedPayload(_)));
    }

    #[test]
    fn test_parse_plan_accepts_minimal_payload() {
        let plan = parse_plan(r#"{"itinerary": [], "packing": ["socks"]}"#).unwrap();
        assert!(plan.itinerary.is_empty());
        assert_eq!(plan.packing, vec!["socks"]);
        assert!(plan.costs.is_none());
    }
}

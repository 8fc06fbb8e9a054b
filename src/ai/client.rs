use super::prompt;
use crate::error::Error;
use crate::hands::hand::HandRecord;
use crate::solver::result::SolverResult;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Seam between the enrichment pipeline and the paid language-model
/// endpoint. Every call costs money; callers are responsible for only
/// reviewing hands that earned it.
#[async_trait]
pub trait Analyst {
    async fn review(&self, hand: &HandRecord, solver: &SolverResult) -> Result<String, Error>;
}

/// Chat-completions client. A failed call is an `Error`; an empty
/// analysis string is a successful (if useless) response, and the two
/// are never conflated.
pub struct OpenAi {
    url: String,
    key: String,
    model: String,
    temperature: f32,
    timeout: Duration,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct Completion {
    choices: Vec<Choice>,
}
#[derive(Deserialize)]
struct Choice {
    message: Message,
}
#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

impl OpenAi {
    pub fn new(url: &str, key: &str, model: &str, temperature: f32, timeout: Duration) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            key: key.to_string(),
            model: model.to_string(),
            temperature,
            timeout,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Analyst for OpenAi {
    async fn review(&self, hand: &HandRecord, solver: &SolverResult) -> Result<String, Error> {
        let payload = serde_json::json!({
            "model": self.model,
            "temperature": self.temperature,
            "messages": [
                { "role": "system", "content": prompt::SYSTEM },
                { "role": "user",   "content": prompt::build(hand, solver) },
            ],
        });
        let response = self
            .http
            .post(format!("{}/v1/chat/completions", self.url))
            .bearer_auth(&self.key)
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Error::AiUnavailable(e.to_string()))?;
        match response.status() {
            status if status.is_success() => response
                .json::<Completion>()
                .await
                .map_err(|e| Error::AiMalformedResponse(e.to_string()))?
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .ok_or_else(|| Error::AiMalformedResponse("no choices in response".to_string())),
            status => Err(Error::AiUnavailable(format!("status {}", status))),
        }
    }
}

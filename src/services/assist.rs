//! AI-assisted content generation
//!
//! Client for an OpenAI-compatible chat-completions gateway. The model is
//! instructed to return strict JSON; responses are stripped of optional
//! Markdown code fences before parsing. HTTP 429 and 402 map to distinct
//! user-facing errors; everything else is a generic gateway failure. No
//! retry or backoff. ureq is blocking, so handlers call this through
//! `web::block`.

use std::sync::OnceLock;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};
use ts_rs::TS;
use ureq::Agent;

use crate::api::admin::types::TS_EXPORT_PATH;
use crate::config::AssistConfig;
use crate::errors::{Result, RotatorError};

const HTTP_TIMEOUT_SECS: u64 = 60;

static HTTP_AGENT: OnceLock<Agent> = OnceLock::new();

fn get_agent() -> &'static Agent {
    HTTP_AGENT.get_or_init(|| {
        Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(HTTP_TIMEOUT_SECS)))
            .build()
            .into()
    })
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct BlogContentDraft {
    pub content: String,
    pub related_searches: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct GeneratedWebResult {
    pub title: String,
    pub description: String,
    pub link: String,
}

#[derive(Clone)]
pub struct AssistClient {
    gateway_url: String,
    api_key: String,
    text_model: String,
    image_model: String,
}

impl AssistClient {
    pub fn new(config: &AssistConfig) -> Self {
        Self {
            gateway_url: config.gateway_url.clone(),
            api_key: config.api_key.clone(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
        }
    }

    /// Draft blog copy plus related-search phrases for a title
    pub fn generate_blog_content(&self, title: &str) -> Result<BlogContentDraft> {
        if title.trim().is_empty() {
            return Err(RotatorError::validation("title is required"));
        }

        let system = "You are a professional blog content writer. Generate content and \
                      related searches based on the title.\n\n\
                      CRITICAL FORMAT - Return ONLY valid JSON, no markdown, no code blocks:\n\
                      {\"content\": \"Short 50-word blog content here.\", \
                      \"related_searches\": [\"search phrase 1\", \"search phrase 2\"]}\n\n\
                      Guidelines:\n\
                      - content: around 50 words, simple, tight, direct writing\n\
                      - related_searches: 4-6 search phrases related to the blog topic\n\
                      - Return ONLY the JSON object, nothing else";
        let user = format!("Generate for blog title: \"{}\"", title);

        let text = self.chat_text(&self.text_model, system, &user)?;
        parse_json_payload(&text, "generated content")
    }

    /// Generate listing triples for a search phrase
    pub fn generate_web_results(&self, search_text: &str) -> Result<Vec<GeneratedWebResult>> {
        if search_text.trim().is_empty() {
            return Err(RotatorError::validation("search_text is required"));
        }

        let system = "You are a web results generator. Generate 6 web search results based \
                      on the search query.\n\n\
                      CRITICAL FORMAT - Return ONLY valid JSON, no markdown, no code blocks:\n\
                      {\"results\": [{\"title\": \"Result title (5-8 words)\", \
                      \"description\": \"Short description (15-20 words)\", \
                      \"link\": \"https://example.com/path\"}]}\n\n\
                      Guidelines:\n\
                      - Generate exactly 6 results\n\
                      - Links should be realistic looking URLs related to the topic\n\
                      - Return ONLY the JSON object, nothing else";
        let user = format!("Generate web results for search: \"{}\"", search_text);

        let text = self.chat_text(&self.text_model, system, &user)?;

        #[derive(Deserialize)]
        struct Envelope {
            #[serde(default)]
            results: Vec<GeneratedWebResult>,
        }

        let envelope: Envelope = parse_json_payload(&text, "generated results")?;
        Ok(envelope.results)
    }

    /// Generate a featured-image URL for a blog title
    pub fn generate_blog_image(&self, title: &str) -> Result<String> {
        if title.trim().is_empty() {
            return Err(RotatorError::validation("title is required"));
        }

        let prompt = format!(
            "Generate a professional blog featured image for: \"{}\". Modern, clean design \
             with gradients and professional colors. 16:9 aspect ratio blog header.",
            title
        );

        let body = json!({
            "model": self.image_model,
            "messages": [{"role": "user", "content": prompt}],
            "modalities": ["image", "text"],
        });

        let response = self.post(body)?;

        let image_url = response["choices"][0]["message"]["images"][0]["image_url"]["url"]
            .as_str()
            .map(String::from)
            .or_else(|| {
                // Some gateways return the image inline as a data URL
                response["choices"][0]["message"]["content"]
                    .as_str()
                    .filter(|c| c.starts_with("data:image"))
                    .map(String::from)
            });

        image_url.ok_or_else(|| RotatorError::gateway("No image generated"))
    }

    fn chat_text(&self, model: &str, system: &str, user: &str) -> Result<String> {
        let body = json!({
            "model": model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
        });

        let response = self.post(body)?;

        response["choices"][0]["message"]["content"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| RotatorError::gateway("No content generated"))
    }

    fn post(&self, body: serde_json::Value) -> Result<serde_json::Value> {
        debug!("Assist gateway request to {}", self.gateway_url);

        let result = get_agent()
            .post(&self.gateway_url)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(&body);

        let resp = match result {
            Ok(r) => r,
            Err(ureq::Error::StatusCode(429)) => {
                return Err(RotatorError::rate_limited(
                    "Rate limit exceeded. Please try again later.",
                ));
            }
            Err(ureq::Error::StatusCode(402)) => {
                return Err(RotatorError::payment_required(
                    "Payment required. Please add funds to your workspace.",
                ));
            }
            Err(e) => {
                error!("Assist gateway error: {}", e);
                return Err(RotatorError::gateway(format!("AI gateway error: {}", e)));
            }
        };

        resp.into_body()
            .read_json()
            .map_err(|e| RotatorError::gateway(format!("AI gateway response unreadable: {}", e)))
    }
}

/// Strip an optional ```json / ``` fence wrapper
pub fn strip_code_fences(text: &str) -> &str {
    let mut text = text.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

fn parse_json_payload<T: serde::de::DeserializeOwned>(text: &str, what: &str) -> Result<T> {
    let cleaned = strip_code_fences(text);
    serde_json::from_str(cleaned).map_err(|e| {
        error!("Failed to parse AI response as {}: {}", what, e);
        RotatorError::serialization(format!("Failed to parse {}", what))
    })
}

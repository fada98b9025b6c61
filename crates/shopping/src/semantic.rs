//! Ollama-backed ingredient name normalization.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::NormalizeError;
use crate::normalize::SemanticNormalizer;

pub const DEFAULT_MODEL: &str = "qwen2.5:0.5b";
pub const DEFAULT_HOST: &str = "http://localhost:11434";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Longest answer accepted as an ingredient name
const MAX_NAME_LEN: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OllamaSettings {
    pub host: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Asks a local Ollama model which words of an ingredient name matter for
/// shopping. One blocking request per ingredient, no retries.
#[derive(Debug)]
pub struct OllamaNormalizer {
    settings: OllamaSettings,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaNormalizer {
    pub fn new(settings: OllamaSettings) -> Result<Self, NormalizeError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| NormalizeError::Unavailable(e.to_string()))?;

        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &OllamaSettings {
        &self.settings
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.settings.host.trim_end_matches('/'))
    }
}

impl SemanticNormalizer for OllamaNormalizer {
    fn try_normalize(&self, name: &str, modifiers: Option<&str>) -> Result<String, NormalizeError> {
        let request = GenerateRequest {
            model: &self.settings.model,
            prompt: build_prompt(name, modifiers),
            stream: false,
            options: GenerateOptions { temperature: 0.0 },
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .map_err(|e| NormalizeError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(NormalizeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response
            .json()
            .map_err(|e| NormalizeError::Malformed(e.to_string()))?;

        let normalized = clean_response(&body.response)?;
        tracing::debug!(ingredient = name, normalized = %normalized, "semantic normalization");

        Ok(normalized)
    }
}

pub(crate) fn build_prompt(name: &str, modifiers: Option<&str>) -> String {
    let full_text = match modifiers.map(str::trim).filter(|m| !m.is_empty()) {
        Some(modifiers) => format!("{modifiers} {name}"),
        None => name.to_string(),
    };

    format!(
        r#"Given this ingredient: "{full_text}"

Return ONLY the base ingredient name that should be used for matching across recipes.
Remove modifiers that don't change the ingredient (sizes, preparation, brand names).
Keep modifiers that meaningfully change the ingredient (red onion vs white onion, brown sugar vs white sugar).

Examples:
"all-purpose flour" → "flour"
"red onion" → "red onion" (keep color)
"large egg" → "egg"
"brown sugar" → "brown sugar" (keep type)
"unsalted butter" → "butter"
"kosher salt" → "salt"

Return ONLY the normalized name, nothing else."#
    )
}

/// Trim, unquote and lowercase a model answer
pub(crate) fn clean_response(raw: &str) -> Result<String, NormalizeError> {
    let cleaned = raw.trim().trim_matches('"').trim().to_lowercase();

    if cleaned.is_empty() {
        return Err(NormalizeError::Malformed("empty response".to_string()));
    }

    if cleaned.contains('\n') || cleaned.chars().count() > MAX_NAME_LEN {
        return Err(NormalizeError::Malformed(format!(
            "not a single ingredient name: {cleaned:?}"
        )));
    }

    Ok(cleaned)
}

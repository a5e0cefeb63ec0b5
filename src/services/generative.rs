use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use crate::core::explain::{ExplainError, ExplanationContext, FitExplainer};

/// Client for a `generateContent`-style text generation API
///
/// Turns an [`ExplanationContext`] into a prompt and returns the first
/// candidate's text. Every failure surfaces as an [`ExplainError`] so the
/// recommender can fall back to its template.
pub struct GenerativeExplainer {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl GenerativeExplainer {
    /// Create a new client; `timeout` bounds each HTTP request
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, ExplainError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            model,
            client,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.model)
        )
    }
}

/// Prompt for one recommendation
pub fn build_prompt(context: &ExplanationContext) -> String {
    let mut prompt = format!(
        "Shopper profile:\n\
         - Gender: {:?}\n\
         - Category: {:?}\n\
         - Material: {}\n\
         - Preference: {}\n\
         - Baseline: {}\n",
        context.gender,
        context.category,
        context.material.as_str(),
        context.preference.as_str(),
        context.baseline.as_deref().unwrap_or("N/A"),
    );

    if let Some(vision) = &context.vision {
        prompt.push_str(&format!(
            "- Photo fit signals: waist {}, hips {}, length {}, silhouette {}, overall {}\n",
            vision.waist_fit, vision.hip_fit, vision.length, vision.overall_silhouette, vision.overall_fit
        ));
    }

    let target = match &context.product_name {
        Some(product) => format!("\"{}\" by \"{}\"", product, context.brand_name),
        None => format!("brand \"{}\"", context.brand_name),
    };

    prompt.push_str(&format!(
        "\nThe engine recommended size \"{}\" for {} (sizing tendency: {}).\n\
         Calculation notes: {}\n",
        context.recommended_size,
        target,
        if context.brand_tendency.is_empty() { "unknown" } else { context.brand_tendency.as_str() },
        context.delta_description(),
    ));

    if !context.warnings.is_empty() {
        prompt.push_str(&format!("Adjustments: {}\n", context.warnings.join("; ")));
    }

    prompt.push_str(
        "\nWrite a friendly, non-judgmental explanation of how this size will feel. \
         Mention the fit difference in cm. Keep it under 3 sentences.",
    );

    prompt
}

#[async_trait]
impl FitExplainer for GenerativeExplainer {
    async fn explain(&self, context: &ExplanationContext) -> Result<String, ExplainError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": build_prompt(context) }] }],
        });

        tracing::debug!("Requesting explanation from model {}", self.model);

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Explanation request failed: {} - {}", status, text);
            return Err(ExplainError::ApiError(format!("Failed to generate explanation: {}", status)));
        }

        let json: Value = response.json().await?;

        let text = json
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c| c.pointer("/content/parts/0/text"))
            .and_then(|t| t.as_str())
            .ok_or_else(|| ExplainError::InvalidResponse("Missing candidate text".into()))?;

        let text = text.trim();
        if text.is_empty() {
            return Err(ExplainError::InvalidResponse("Empty candidate text".into()));
        }

        Ok(text.to_string())
    }
}

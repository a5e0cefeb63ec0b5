use async_trait::async_trait;
use thiserror::Error;
use crate::models::{ClothingCategory, Dimension, FitPreference, Gender, MaterialType, VisionFitSignals};

/// Errors from an explanation collaborator
///
/// All of them are recovered by the recommender with [`fallback_explanation`].
#[derive(Debug, Error)]
pub enum ExplainError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Explanation timed out after {0}ms")]
    Timeout(u64),
}

/// Structured facts about one recommendation, handed to the explainer
#[derive(Debug, Clone, PartialEq)]
pub struct ExplanationContext {
    pub brand_name: String,
    pub brand_tendency: String,
    pub product_name: Option<String>,
    pub recommended_size: String,
    pub matched_size: String,
    pub dimension: Dimension,
    pub user_value_cm: f64,
    pub chart_value_cm: f64,
    pub gender: Gender,
    pub category: ClothingCategory,
    pub preference: FitPreference,
    pub material: MaterialType,
    pub baseline: Option<String>,
    pub vision: Option<VisionFitSignals>,
    pub warnings: Vec<String>,
}

impl ExplanationContext {
    /// Chart value minus the shopper's value, in cm
    pub fn delta_cm(&self) -> f64 {
        self.chart_value_cm - self.user_value_cm
    }

    /// Calculation notes in plain text, used inside prompts
    pub fn delta_description(&self) -> String {
        format!(
            "Shopper {dim}: {user:.1}cm. Size {size} at {brand} has a {dim} of {chart:.1}cm \
             (difference {delta:+.1}cm). Matched size before preference adjustment: {matched}.",
            dim = self.dimension.as_str(),
            user = self.user_value_cm,
            size = self.recommended_size,
            brand = self.brand_name,
            chart = self.chart_value_cm,
            delta = self.delta_cm(),
            matched = self.matched_size,
        )
    }
}

/// Source of free-text fit explanations
///
/// Implementations may be slow or fail; callers always hold a fallback.
#[async_trait]
pub trait FitExplainer: Send + Sync {
    async fn explain(&self, context: &ExplanationContext) -> Result<String, ExplainError>;
}

/// Explains fits with the deterministic template only
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateExplainer;

#[async_trait]
impl FitExplainer for TemplateExplainer {
    async fn explain(&self, context: &ExplanationContext) -> Result<String, ExplainError> {
        Ok(fallback_explanation(context))
    }
}

/// Deterministic one-to-two sentence explanation built from the size delta
pub fn fallback_explanation(context: &ExplanationContext) -> String {
    let delta = context.delta_cm();
    let dim = context.dimension.as_str();
    let target = match &context.product_name {
        Some(product) => format!("{} {}", context.brand_name, product),
        None => context.brand_name.clone(),
    };

    let feel = if delta.abs() < 1.0 {
        format!("should sit close to your {} measurement", dim)
    } else if delta > 0.0 {
        format!("gives about {:.1}cm of room at the {}", delta, dim)
    } else {
        format!("runs about {:.1}cm snug at the {}", delta.abs(), dim)
    };

    let mut text = format!(
        "Size {} in {} {}, which suits your {} fit preference in {}.",
        context.recommended_size,
        target,
        feel,
        context.preference.as_str(),
        context.material.as_str()
    );

    if !context.brand_tendency.is_empty() {
        text.push_str(&format!(" This brand is known to be {}.", context.brand_tendency.to_lowercase()));
    }

    text
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn context(user: f64, chart: f64) -> ExplanationContext {
        ExplanationContext {
            brand_name: "Levi's".to_string(),
            brand_tendency: "True to size".to_string(),
            product_name: None,
            recommended_size: "32".to_string(),
            matched_size: "32".to_string(),
            dimension: Dimension::Waist,
            user_value_cm: user,
            chart_value_cm: chart,
            gender: Gender::Female,
            category: ClothingCategory::Jeans,
            preference: FitPreference::Regular,
            material: MaterialType::Denim,
            baseline: None,
            vision: None,
            warnings: vec![],
        }
    }

    #[test]
    fn test_fallback_true_to_size() {
        let text = fallback_explanation(&context(81.0, 81.0));
        assert!(text.contains("Size 32 in Levi's"));
        assert!(text.contains("close to your waist"));
        assert!(text.contains("true to size"));
    }

    #[test]
    fn test_fallback_describes_room_and_snugness() {
        assert!(fallback_explanation(&context(78.0, 81.0)).contains("3.0cm of room"));
        assert!(fallback_explanation(&context(84.0, 81.0)).contains("3.0cm snug"));
    }

    #[test]
    fn test_delta_description_sign() {
        let notes = context(79.0, 81.0).delta_description();
        assert!(notes.contains("+2.0cm"));
    }

    #[test]
    fn test_template_explainer_never_fails() {
        let text = tokio_test::block_on(TemplateExplainer.explain(&context(80.0, 81.0))).unwrap();
        assert!(!text.is_empty());
    }
}

use std::sync::Arc;
use std::time::Duration;
use futures::future::join_all;
use tokio::sync::watch;
use crate::core::{
    adjust::{adjust, AdjustmentRules},
    baseline::infer_from_baseline,
    chart::find_closest,
    error::SizingError,
    explain::{fallback_explanation, ExplainError, ExplanationContext, FitExplainer},
    units::normalize,
};
use crate::models::{BodyMeasurements, FitRecommendation, Recommendations, SkippedTarget, Target, UserProfile};

/// Default time allowed for one explanation request
pub const DEFAULT_EXPLAIN_TIMEOUT: Duration = Duration::from_millis(3000);

pub const NO_MEASUREMENTS_WARNING: &str =
    "no measurements could be derived; provide measurements or a recognizable baseline size";

/// Recommendation orchestrator
///
/// # Pipeline per target
/// 1. Normalize direct measurements, fill gaps from the baseline
/// 2. Match the nearest chart entry on the category's primary dimension
/// 3. Adjust for material and fit preference
/// 4. Ask the explainer for text, falling back to a template
///
/// Targets are evaluated concurrently and reported in the order given.
#[derive(Clone)]
pub struct Recommender {
    explainer: Arc<dyn FitExplainer>,
    rules: AdjustmentRules,
    explain_timeout: Duration,
}

impl Recommender {
    pub fn new(explainer: Arc<dyn FitExplainer>, rules: AdjustmentRules, explain_timeout: Duration) -> Self {
        Self {
            explainer,
            rules,
            explain_timeout,
        }
    }

    pub fn with_default_rules(explainer: Arc<dyn FitExplainer>) -> Self {
        Self::new(explainer, AdjustmentRules::default(), DEFAULT_EXPLAIN_TIMEOUT)
    }

    pub fn rules(&self) -> &AdjustmentRules {
        &self.rules
    }

    /// Recommend a size for every target
    pub async fn recommend(&self, profile: &UserProfile, targets: &[Target<'_>]) -> Recommendations {
        // Held until return so the receiver never observes a cancellation
        let (_guard, cancel) = watch::channel(false);
        self.recommend_with_cancel(profile, targets, cancel).await
    }

    /// Recommend a size for every target, abandoning explanation calls on cancel
    ///
    /// Once `cancel` turns `true`, pending explanation requests are dropped and
    /// the remaining targets get the templated explanation. Size matches are
    /// unaffected.
    pub async fn recommend_with_cancel(
        &self,
        profile: &UserProfile,
        targets: &[Target<'_>],
        cancel: watch::Receiver<bool>,
    ) -> Recommendations {
        let Some(measurements) = resolve_measurements(profile) else {
            tracing::info!("No usable measurements in profile; skipping {} targets", targets.len());
            return Recommendations {
                recommendations: vec![],
                skipped: targets
                    .iter()
                    .map(|t| SkippedTarget {
                        target_id: t.id().to_string(),
                        reason: NO_MEASUREMENTS_WARNING.to_string(),
                    })
                    .collect(),
                warnings: vec![NO_MEASUREMENTS_WARNING.to_string()],
            };
        };

        let evaluations = targets
            .iter()
            .map(|target| self.evaluate(profile, &measurements, *target, cancel.clone()));

        // join_all keeps input order regardless of completion order
        let outcomes = join_all(evaluations).await;

        let mut result = Recommendations::default();
        for (target, outcome) in targets.iter().zip(outcomes) {
            match outcome {
                Ok(recommendation) => result.recommendations.push(recommendation),
                Err(e) => {
                    tracing::info!("Skipping target {}: {}", target.id(), e);
                    result.warnings.push(format!("{}: {}", target.id(), e));
                    result.skipped.push(SkippedTarget {
                        target_id: target.id().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "Produced {} recommendations ({} skipped)",
            result.recommendations.len(),
            result.skipped.len()
        );

        result
    }

    async fn evaluate(
        &self,
        profile: &UserProfile,
        measurements: &BodyMeasurements,
        target: Target<'_>,
        cancel: watch::Receiver<bool>,
    ) -> Result<FitRecommendation, SizingError> {
        let brand = target.brand();
        let chart = target.chart();
        let dimension = target.category(profile.category).primary_dimension();

        let user_value = measurements
            .dimension(dimension)
            .ok_or_else(|| SizingError::insufficient(dimension))?;

        let matched = find_closest(chart, measurements, dimension)?;
        let adjustment = adjust(chart, matched, profile, &self.rules);

        let matched_value = chart
            .dimension_cm(matched, dimension)
            .ok_or_else(|| SizingError::MalformedInput(format!("size {} has no {}", matched.size, dimension.as_str())))?;
        // A sized-up entry may lack the dimension; describe it by the matched value then
        let chart_value = chart
            .dimension_cm(adjustment.final_entry, dimension)
            .unwrap_or(matched_value);

        let context = ExplanationContext {
            brand_name: brand.name.clone(),
            brand_tendency: brand.tendency.clone(),
            product_name: target.product().map(|p| p.name.clone()),
            recommended_size: adjustment.final_entry.size.clone(),
            matched_size: matched.size.clone(),
            dimension,
            user_value_cm: user_value,
            chart_value_cm: chart_value,
            gender: profile.gender,
            category: target.category(profile.category),
            preference: profile.fit_preference,
            material: profile.material,
            baseline: profile.baseline.clone(),
            vision: profile.vision_signals.clone(),
            warnings: adjustment.warnings.clone(),
        };

        let explanation = self.explain(&context, cancel).await;

        tracing::debug!(
            "Target {}: matched {} -> recommended {} (score {:.0})",
            target.id(),
            matched.size,
            adjustment.final_entry.size,
            adjustment.score
        );

        Ok(FitRecommendation {
            target_id: target.id().to_string(),
            brand_id: brand.id.clone(),
            brand_name: brand.name.clone(),
            product_id: target.product().map(|p| p.id.clone()),
            recommended_size: adjustment.final_entry.size.clone(),
            matched_size: matched.size.clone(),
            confidence_score: adjustment.score,
            warnings: adjustment.warnings,
            explanation,
            delta_cm: context.delta_cm(),
            sku: format!("{}-{}", target.id(), context.recommended_size),
        })
    }

    /// Explanation text for one target; never empty, never an error
    async fn explain(&self, context: &ExplanationContext, cancel: watch::Receiver<bool>) -> String {
        let request = tokio::time::timeout(self.explain_timeout, self.explainer.explain(context));

        tokio::select! {
            biased;
            _ = wait_cancelled(cancel) => {
                tracing::debug!("Explanation for {} cancelled, using template", context.brand_name);
                fallback_explanation(context)
            }
            result = request => {
                let outcome = result.unwrap_or_else(|_| {
                    Err(ExplainError::Timeout(self.explain_timeout.as_millis() as u64))
                });
                match outcome {
                    Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
                    Ok(_) => {
                        tracing::warn!("Explainer returned empty text for {}, using template", context.brand_name);
                        fallback_explanation(context)
                    }
                    Err(e) => {
                        tracing::warn!("Explainer failed for {}: {}, using template", context.brand_name, e);
                        fallback_explanation(context)
                    }
                }
            }
        }
    }
}

/// Resolves once `cancel` holds `true`; never resolves if the sender is dropped first
async fn wait_cancelled(mut cancel: watch::Receiver<bool>) {
    loop {
        if *cancel.borrow_and_update() {
            return;
        }
        if cancel.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Canonical (cm) measurements for a profile
///
/// Direct measurements take precedence; the baseline only fills dimensions
/// they lack. Returns `None` when nothing at all can be derived.
pub fn resolve_measurements(profile: &UserProfile) -> Option<BodyMeasurements> {
    let direct = profile.measurements.as_ref().map(normalize);
    let inferred = profile.baseline.as_deref().map(infer_from_baseline);

    let merged = match (direct, inferred) {
        (Some(direct), Some(inferred)) => direct.or_fill(&inferred),
        (Some(direct), None) => direct,
        (None, Some(inferred)) => inferred,
        (None, None) => return None,
    };

    (!merged.is_empty()).then_some(merged)
}

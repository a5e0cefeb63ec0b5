use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use crate::core::explain::{ExplainError, ExplanationContext, FitExplainer};

/// In-memory memo in front of an explainer
///
/// Recommendations built from the same structured facts read the same, so
/// repeated requests skip the slow upstream call. Contexts carrying a baseline
/// or photo signals are personal to one shopper and always go upstream.
/// Only successful explanations are stored.
pub struct CachedExplainer {
    inner: Arc<dyn FitExplainer>,
    cache: moka::future::Cache<String, String>,
}

impl CachedExplainer {
    pub fn new(inner: Arc<dyn FitExplainer>, max_entries: u64, ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner, cache }
    }
}

#[async_trait]
impl FitExplainer for CachedExplainer {
    async fn explain(&self, context: &ExplanationContext) -> Result<String, ExplainError> {
        let Some(key) = CacheKey::explanation(context) else {
            return self.inner.explain(context).await;
        };

        if let Some(text) = self.cache.get(&key).await {
            tracing::trace!("Explanation cache hit: {}", key);
            return Ok(text);
        }

        let text = self.inner.explain(context).await?;
        self.cache.insert(key.clone(), text.clone()).await;
        tracing::trace!("Explanation cache set: {}", key);

        Ok(text)
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Key for an explanation; the delta is rounded to whole centimetres
    ///
    /// `None` when the context holds free text or photo signals, which the
    /// prompt uses but a shared key must not.
    pub fn explanation(context: &ExplanationContext) -> Option<String> {
        if context.baseline.is_some() || context.vision.is_some() {
            return None;
        }

        Some(format!(
            "explain:{}:{}:{}:{}:{:?}:{:?}:{}:{}:{}:{}",
            context.brand_name,
            context.product_name.as_deref().unwrap_or("-"),
            context.recommended_size,
            context.matched_size,
            context.gender,
            context.category,
            context.preference.as_str(),
            context.material.as_str(),
            context.dimension.as_str(),
            context.delta_cm().round() as i64
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::explain::tests::context;
    use crate::models::{Gender, VisionFitSignals};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingExplainer {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl FitExplainer for CountingExplainer {
        async fn explain(&self, _context: &ExplanationContext) -> Result<String, ExplainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ExplainError::ApiError("down".to_string()))
            } else {
                Ok("Fits well.".to_string())
            }
        }
    }

    #[tokio::test]
    async fn test_repeated_context_hits_cache() {
        let inner = Arc::new(CountingExplainer::default());
        let cached = CachedExplainer::new(inner.clone(), 100, 60);

        assert_eq!(cached.explain(&context(80.0, 81.0)).await.unwrap(), "Fits well.");
        // Same rounded delta
        assert_eq!(cached.explain(&context(80.2, 81.0)).await.unwrap(), "Fits well.");

        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let inner = Arc::new(CountingExplainer {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let cached = CachedExplainer::new(inner.clone(), 100, 60);

        assert!(cached.explain(&context(80.0, 81.0)).await.is_err());
        assert!(cached.explain(&context(80.0, 81.0)).await.is_err());

        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_personal_context_bypasses_cache() {
        let inner = Arc::new(CountingExplainer::default());
        let cached = CachedExplainer::new(inner.clone(), 100, 60);

        let mut ctx = context(80.0, 81.0);
        ctx.vision = Some(VisionFitSignals {
            waist_fit: "tight".to_string(),
            hip_fit: "regular".to_string(),
            length: "regular".to_string(),
            overall_silhouette: "straight".to_string(),
            overall_fit: "snug".to_string(),
        });
        cached.explain(&ctx).await.unwrap();
        cached.explain(&ctx).await.unwrap();

        let mut ctx = context(80.0, 81.0);
        ctx.baseline = Some("Levi's 32".to_string());
        cached.explain(&ctx).await.unwrap();

        assert_eq!(inner.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(
            CacheKey::explanation(&context(78.0, 81.0)).as_deref(),
            Some("explain:Levi's:-:32:32:Female:Jeans:regular:denim:waist:3")
        );
    }

    #[test]
    fn test_cache_key_separates_shoppers() {
        let mut other = context(78.0, 81.0);
        other.gender = Gender::Male;
        assert_ne!(CacheKey::explanation(&context(78.0, 81.0)), CacheKey::explanation(&other));

        other.baseline = Some("Zara 38".to_string());
        assert_eq!(CacheKey::explanation(&other), None);
    }
}

//! Fit Engine - garment size recommendation service
//!
//! This library provides the deterministic sizing core: unit normalization,
//! baseline inference, nearest-size chart matching and fit adjustment, plus an
//! aggregator that explains each recommendation through a pluggable service.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{find_closest, infer_from_baseline, normalize, FitExplainer, Recommender, TemplateExplainer};
pub use models::{BodyMeasurements, Brand, FitRecommendation, Recommendations, SizeChart, Target, UserProfile};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let waist = infer_from_baseline("Zara 38").waist;
        assert_eq!(waist, Some(70.0));
    }
}

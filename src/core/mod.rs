// Core sizing engine exports
pub mod adjust;
pub mod baseline;
pub mod chart;
pub mod error;
pub mod explain;
pub mod recommender;
pub mod units;
pub mod validation;

pub use adjust::{adjust, Adjustment, AdjustmentRules};
pub use baseline::{infer_from_baseline, BaselineRule};
pub use chart::find_closest;
pub use error::SizingError;
pub use explain::{fallback_explanation, ExplainError, ExplanationContext, FitExplainer, TemplateExplainer};
pub use recommender::{resolve_measurements, Recommender};
pub use units::normalize;
pub use validation::validate_measurements;

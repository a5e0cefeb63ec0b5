// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Brand, BodyMeasurements, ClothingCategory, Dimension, FitPreference, FitRecommendation,
    Gender, MaterialType, MeasurementUnit, Product, Recommendations, SizeChart, SizeChartEntry,
    SkippedTarget, Target, UserProfile, VisionFitSignals,
};
pub use requests::RecommendRequest;
pub use responses::{BrandsResponse, ErrorResponse, HealthResponse, ProductsResponse, RecommendResponse};

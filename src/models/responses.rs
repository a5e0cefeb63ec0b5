use serde::{Deserialize, Serialize};
use crate::models::domain::{Brand, FitRecommendation, Product, SkippedTarget};

/// Response for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub recommendations: Vec<FitRecommendation>,
    pub skipped: Vec<SkippedTarget>,
    pub warnings: Vec<String>,
}

/// Catalog listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandsResponse {
    pub brands: Vec<Brand>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsResponse {
    #[serde(rename = "brandId")]
    pub brand_id: String,
    pub products: Vec<Product>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

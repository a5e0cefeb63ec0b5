use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{normalize, validate_measurements, Recommender};
use crate::models::{
    BrandsResponse, ErrorResponse, HealthResponse, ProductsResponse, RecommendRequest, RecommendResponse,
};
use crate::services::{Catalog, CatalogError};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub recommender: Recommender,
}

/// Configure all recommendation-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/brands", web::get().to(list_brands))
        .route("/brands/{brand_id}/products", web::get().to(list_products))
        .route("/recommendations", web::post().to(recommend));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// List catalog brands with their size charts
///
/// GET /api/v1/brands
async fn list_brands(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(BrandsResponse {
        brands: state.catalog.brands().to_vec(),
    })
}

/// List products for a brand
///
/// GET /api/v1/brands/{brand_id}/products
async fn list_products(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let brand_id = path.into_inner();

    match state.catalog.products_for(&brand_id) {
        Ok(products) => HttpResponse::Ok().json(ProductsResponse {
            brand_id,
            products: products.into_iter().cloned().collect(),
        }),
        Err(e) => not_found(e),
    }
}

/// Size recommendation endpoint
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "profile": {
///     "gender": "female",
///     "category": "jeans",
///     "fitPreference": "regular",
///     "material": "denim",
///     "measurements": { "waist": 32, "unit": "inch" },
///     "baseline": "Levi's 32"
///   },
///   "productId": "p2"
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommendation request: {:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let profile = &req.profile;

    if let Some(measurements) = &profile.measurements {
        let issues = validate_measurements(&normalize(measurements));
        if !issues.is_empty() {
            tracing::info!("Rejected implausible measurements: {:?}", issues);
            return bad_request("Implausible measurements", issues.join("; "));
        }
    }

    let targets = match &req.product_id {
        Some(product_id) => match state.catalog.product_target(product_id) {
            Ok(target) => vec![target],
            Err(e) => return not_found(e),
        },
        None => state.catalog.brand_targets(),
    };

    let request_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(
        "Recommending {:?} sizes across {} targets (request {})",
        profile.category,
        targets.len(),
        request_id
    );

    let result = state.recommender.recommend(profile, &targets).await;

    HttpResponse::Ok().json(RecommendResponse {
        request_id,
        recommendations: result.recommendations,
        skipped: result.skipped,
        warnings: result.warnings,
    })
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

fn not_found(e: CatalogError) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "Not found".to_string(),
        message: e.to_string(),
        status_code: 404,
    })
}

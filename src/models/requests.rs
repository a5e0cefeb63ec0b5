use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::{BodyMeasurements, UserProfile};

/// Request for size recommendations
///
/// Without `productId` every brand in the catalog is evaluated.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(custom(function = "validate_profile"))]
    pub profile: UserProfile,
    #[validate(length(min = 1))]
    #[serde(alias = "product_id", rename = "productId", default)]
    pub product_id: Option<String>,
}

fn validate_profile(profile: &UserProfile) -> Result<(), ValidationError> {
    if let Some(baseline) = &profile.baseline {
        if baseline.len() > 120 {
            return Err(ValidationError::new("baseline_too_long"));
        }
    }

    if let Some(measurements) = &profile.measurements {
        if has_negative_field(measurements) {
            return Err(ValidationError::new("negative_measurement"));
        }
    }

    Ok(())
}

fn has_negative_field(m: &BodyMeasurements) -> bool {
    [m.height, m.weight, m.waist, m.hips, m.chest, m.shoulders, m.inseam]
        .iter()
        .flatten()
        .any(|v| !v.is_finite() || *v < 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{ClothingCategory, FitPreference, Gender, MaterialType};

    fn request(measurements: Option<BodyMeasurements>, baseline: Option<&str>) -> RecommendRequest {
        RecommendRequest {
            profile: UserProfile {
                gender: Gender::Female,
                category: ClothingCategory::Jeans,
                fit_preference: FitPreference::Regular,
                material: MaterialType::Cotton,
                measurements,
                baseline: baseline.map(str::to_string),
                images: vec![],
                vision_signals: None,
            },
            product_id: None,
        }
    }

    #[test]
    fn test_valid_request() {
        let req = request(
            Some(BodyMeasurements { waist: Some(80.0), ..Default::default() }),
            None,
        );
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_negative_measurement_rejected() {
        let req = request(
            Some(BodyMeasurements { waist: Some(-3.0), ..Default::default() }),
            None,
        );
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_empty_product_id_rejected() {
        let mut req = request(None, Some("Levi's 32"));
        req.product_id = Some(String::new());
        assert!(req.validate().is_err());
    }
}

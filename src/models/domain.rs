use serde::{Deserialize, Serialize};

/// Unit a measurement record or size chart is declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementUnit {
    #[default]
    Cm,
    #[serde(alias = "in")]
    Inch,
}

/// Body measurements as entered by a shopper or inferred from a baseline
///
/// Lengths are in `unit`. Weight keeps whatever mass unit the shopper used
/// and is never converted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyMeasurements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hips: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chest: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoulders: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inseam: Option<f64>,
    #[serde(default)]
    pub unit: MeasurementUnit,
}

impl BodyMeasurements {
    /// Empty record in centimetres
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no numeric field is populated
    pub fn is_empty(&self) -> bool {
        self.height.is_none()
            && self.weight.is_none()
            && self.waist.is_none()
            && self.hips.is_none()
            && self.chest.is_none()
            && self.shoulders.is_none()
            && self.inseam.is_none()
    }

    /// Value of a chart dimension, if present
    pub fn dimension(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::Waist => self.waist,
            Dimension::Chest => self.chest,
            Dimension::Hips => self.hips,
            Dimension::Inseam => self.inseam,
        }
    }

    /// Fill every field missing here from `other`. Both records must share a unit.
    pub fn or_fill(self, other: &BodyMeasurements) -> BodyMeasurements {
        BodyMeasurements {
            height: self.height.or(other.height),
            weight: self.weight.or(other.weight),
            waist: self.waist.or(other.waist),
            hips: self.hips.or(other.hips),
            chest: self.chest.or(other.chest),
            shoulders: self.shoulders.or(other.shoulders),
            inseam: self.inseam.or(other.inseam),
            unit: self.unit,
        }
    }
}

/// Dimensions a size chart can be keyed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Waist,
    Chest,
    Hips,
    Inseam,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Waist => "waist",
            Dimension::Chest => "chest",
            Dimension::Hips => "hips",
            Dimension::Inseam => "inseam",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unisex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClothingCategory {
    Jeans,
    Tops,
    Dresses,
    Jackets,
}

impl ClothingCategory {
    /// Chart dimension used for nearest-size matching
    ///
    /// Bottoms are matched on the waist, everything worn on the torso on the chest.
    pub fn primary_dimension(&self) -> Dimension {
        match self {
            ClothingCategory::Jeans => Dimension::Waist,
            ClothingCategory::Tops | ClothingCategory::Dresses | ClothingCategory::Jackets => {
                Dimension::Chest
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitPreference {
    Tight,
    #[default]
    Regular,
    Baggy,
}

impl FitPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitPreference::Tight => "tight",
            FitPreference::Regular => "regular",
            FitPreference::Baggy => "baggy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaterialType {
    Denim,
    Cotton,
    #[serde(alias = "stretch")]
    StretchBlend,
    Linen,
}

impl MaterialType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialType::Denim => "denim",
            MaterialType::Cotton => "cotton",
            MaterialType::StretchBlend => "stretch-blend",
            MaterialType::Linen => "linen",
        }
    }
}

/// Qualitative fit signals produced by the external photo analysis service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisionFitSignals {
    pub waist_fit: String,
    pub hip_fit: String,
    pub length: String,
    pub overall_silhouette: String,
    pub overall_fit: String,
}

/// Shopper profile for a single recommendation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub gender: Gender,
    pub category: ClothingCategory,
    #[serde(rename = "fitPreference", default)]
    pub fit_preference: FitPreference,
    pub material: MaterialType,
    #[serde(default)]
    pub measurements: Option<BodyMeasurements>,
    #[serde(default)]
    pub baseline: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(rename = "visionSignals", default)]
    pub vision_signals: Option<VisionFitSignals>,
}

/// One row of a size chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeChartEntry {
    pub size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chest: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hips: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inseam: Option<f64>,
}

impl SizeChartEntry {
    /// Entry with only a waist value
    pub fn waist(size: impl Into<String>, waist: f64) -> Self {
        Self {
            size: size.into(),
            waist: Some(waist),
            chest: None,
            hips: None,
            inseam: None,
        }
    }

    pub fn dimension(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::Waist => self.waist,
            Dimension::Chest => self.chest,
            Dimension::Hips => self.hips,
            Dimension::Inseam => self.inseam,
        }
    }
}

/// Size chart ordered from smallest to largest size
///
/// Chart order is significant: size-up adjustments walk it through
/// [`SizeChart::next_larger`]. Entries are kept exactly as supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeChart {
    #[serde(default)]
    pub unit: MeasurementUnit,
    entries: Vec<SizeChartEntry>,
}

impl SizeChart {
    pub fn new(unit: MeasurementUnit, entries: Vec<SizeChartEntry>) -> Self {
        Self { unit, entries }
    }

    /// Chart in centimetres
    pub fn cm(entries: Vec<SizeChartEntry>) -> Self {
        Self::new(MeasurementUnit::Cm, entries)
    }

    pub fn entries(&self) -> &[SizeChartEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The entry immediately after `size` in chart order
    ///
    /// Returns `None` for the largest entry or an unknown label.
    pub fn next_larger(&self, size: &str) -> Option<&SizeChartEntry> {
        let mut iter = self.entries.iter().skip_while(|e| e.size != size);
        iter.next()?;
        iter.next()
    }

    /// Value of `dimension` for `entry` converted to centimetres
    pub fn dimension_cm(&self, entry: &SizeChartEntry, dimension: Dimension) -> Option<f64> {
        let value = entry.dimension(dimension)?;
        Some(match self.unit {
            MeasurementUnit::Cm => value,
            MeasurementUnit::Inch => crate::core::units::inches_to_cm(value),
        })
    }
}

/// Brand with its default size chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,
    pub name: String,
    /// Qualitative sizing tendency, e.g. "Runs small"
    #[serde(default)]
    pub tendency: String,
    #[serde(rename = "sizeChart")]
    pub size_chart: SizeChart,
}

/// Product sold by exactly one brand
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(rename = "brandId")]
    pub brand_id: String,
    pub name: String,
    pub category: ClothingCategory,
    #[serde(rename = "fitType", default)]
    pub fit_type: Option<String>,
    /// Fit-specific chart overriding the brand chart
    #[serde(rename = "sizeChart", default)]
    pub size_chart: Option<SizeChart>,
}

/// What a single recommendation is computed against
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    Brand(&'a Brand),
    Product { brand: &'a Brand, product: &'a Product },
}

impl<'a> Target<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            Target::Brand(brand) => &brand.id,
            Target::Product { product, .. } => &product.id,
        }
    }

    pub fn brand(&self) -> &'a Brand {
        match self {
            Target::Brand(brand) => brand,
            Target::Product { brand, .. } => brand,
        }
    }

    pub fn product(&self) -> Option<&'a Product> {
        match self {
            Target::Brand(_) => None,
            Target::Product { product, .. } => Some(product),
        }
    }

    /// Chart to match against: the product's own chart when it has one
    pub fn chart(&self) -> &'a SizeChart {
        match self {
            Target::Brand(brand) => &brand.size_chart,
            Target::Product { brand, product } => {
                product.size_chart.as_ref().unwrap_or(&brand.size_chart)
            }
        }
    }

    /// Category of the target; brand mode uses the shopper's requested category
    pub fn category(&self, requested: ClothingCategory) -> ClothingCategory {
        match self {
            Target::Brand(_) => requested,
            Target::Product { product, .. } => product.category,
        }
    }
}

/// Final size recommendation for one brand or product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitRecommendation {
    #[serde(rename = "targetId")]
    pub target_id: String,
    #[serde(rename = "brandId")]
    pub brand_id: String,
    #[serde(rename = "brandName")]
    pub brand_name: String,
    #[serde(rename = "productId", skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(rename = "recommendedSize")]
    pub recommended_size: String,
    /// Nearest chart entry before preference adjustments
    #[serde(rename = "matchedSize")]
    pub matched_size: String,
    /// Heuristic fit certainty on a 0-100 scale
    #[serde(rename = "confidenceScore")]
    pub confidence_score: f64,
    pub warnings: Vec<String>,
    pub explanation: String,
    /// Recommended chart value minus the shopper's value, in cm
    #[serde(rename = "deltaCm")]
    pub delta_cm: f64,
    pub sku: String,
}

/// A target that produced no recommendation, with the reason
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedTarget {
    #[serde(rename = "targetId")]
    pub target_id: String,
    pub reason: String,
}

/// Aggregate result of one recommendation request, in catalog order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recommendations {
    pub recommendations: Vec<FitRecommendation>,
    pub skipped: Vec<SkippedTarget>,
    pub warnings: Vec<String>,
}

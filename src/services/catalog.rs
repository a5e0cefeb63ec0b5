use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use crate::models::{Brand, ClothingCategory, Product, SizeChart, SizeChartEntry, Target};

/// Errors that can occur when loading or querying the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Unknown brand: {0}")]
    UnknownBrand(String),

    #[error("Unknown product: {0}")]
    UnknownProduct(String),
}

/// Read-only brand and product catalog
///
/// Brand order here is the order recommendations are reported in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    brands: Vec<Brand>,
    #[serde(default)]
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, checking every product belongs to a listed brand
    pub fn new(brands: Vec<Brand>, products: Vec<Product>) -> Result<Self, CatalogError> {
        if let Some(orphan) = products
            .iter()
            .find(|p| !brands.iter().any(|b| b.id == p.brand_id))
        {
            return Err(CatalogError::UnknownBrand(orphan.brand_id.clone()));
        }

        Ok(Self { brands, products })
    }

    /// Load a catalog from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let catalog: Catalog = serde_json::from_str(&raw)?;
        tracing::info!(
            "Loaded catalog from {} ({} brands, {} products)",
            path.as_ref().display(),
            catalog.brands.len(),
            catalog.products.len()
        );
        Self::new(catalog.brands, catalog.products)
    }

    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    pub fn brand(&self, brand_id: &str) -> Result<&Brand, CatalogError> {
        self.brands
            .iter()
            .find(|b| b.id == brand_id)
            .ok_or_else(|| CatalogError::UnknownBrand(brand_id.to_string()))
    }

    pub fn products_for(&self, brand_id: &str) -> Result<Vec<&Product>, CatalogError> {
        let brand = self.brand(brand_id)?;
        Ok(self.products.iter().filter(|p| p.brand_id == brand.id).collect())
    }

    /// Every brand as a target, in catalog order
    pub fn brand_targets(&self) -> Vec<Target<'_>> {
        self.brands.iter().map(Target::Brand).collect()
    }

    /// A single product as a target
    pub fn product_target(&self, product_id: &str) -> Result<Target<'_>, CatalogError> {
        let product = self
            .products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| CatalogError::UnknownProduct(product_id.to_string()))?;
        let brand = self.brand(&product.brand_id)?;

        Ok(Target::Product { brand, product })
    }

    /// Catalog shipped with the service
    pub fn builtin() -> Self {
        Self {
            brands: builtin_brands(),
            products: builtin_products(),
        }
    }
}

fn entry(size: &str, waist: f64, hips: f64) -> SizeChartEntry {
    SizeChartEntry {
        size: size.to_string(),
        waist: Some(waist),
        chest: None,
        hips: Some(hips),
        inseam: None,
    }
}

fn builtin_brands() -> Vec<Brand> {
    vec![
        Brand {
            id: "levis".to_string(),
            name: "Levi's".to_string(),
            tendency: "True to size".to_string(),
            size_chart: SizeChart::cm(vec![
                entry("24", 61.0, 86.0),
                entry("25", 63.5, 89.0),
                entry("26", 66.0, 91.0),
                entry("27", 68.5, 94.0),
                entry("28", 71.0, 96.5),
                entry("29", 73.5, 99.0),
                entry("30", 76.0, 101.5),
                entry("32", 81.0, 106.5),
            ]),
        },
        Brand {
            id: "zara".to_string(),
            name: "Zara".to_string(),
            tendency: "Runs small".to_string(),
            size_chart: SizeChart::cm(vec![
                entry("34", 62.0, 90.0),
                entry("36", 66.0, 94.0),
                entry("38", 70.0, 98.0),
                entry("40", 74.0, 102.0),
                entry("42", 78.0, 106.0),
            ]),
        },
        Brand {
            id: "uniqlo".to_string(),
            name: "Uniqlo".to_string(),
            tendency: "Generous fit".to_string(),
            size_chart: SizeChart::cm(vec![
                entry("23", 58.5, 85.0),
                entry("24", 61.0, 87.5),
                entry("25", 63.5, 90.0),
                entry("26", 66.0, 92.5),
                entry("27", 68.5, 95.0),
                entry("28", 71.0, 97.5),
            ]),
        },
    ]
}

fn product(id: &str, brand_id: &str, name: &str, fit_type: &str, chart: Option<SizeChart>) -> Product {
    Product {
        id: id.to_string(),
        brand_id: brand_id.to_string(),
        name: name.to_string(),
        category: ClothingCategory::Jeans,
        fit_type: Some(fit_type.to_string()),
        size_chart: chart,
    }
}

fn builtin_products() -> Vec<Product> {
    vec![
        product("p1", "levis", "501 Original Fit Jeans", "original", None),
        product(
            "p2",
            "levis",
            "721 High Rise Skinny",
            "skinny",
            Some(SizeChart::cm(vec![
                entry("25", 62.5, 87.0),
                entry("26", 65.0, 89.5),
                entry("27", 67.5, 92.0),
                entry("28", 70.0, 94.5),
                entry("29", 72.5, 97.0),
                entry("30", 75.0, 99.5),
            ])),
        ),
        product("p3", "zara", "Premium Marine Straight", "straight", None),
        product(
            "p4",
            "zara",
            "TRF Wide Leg Denim",
            "wide",
            Some(SizeChart::cm(vec![
                entry("34", 64.0, 94.0),
                entry("36", 68.0, 98.0),
                entry("38", 72.0, 102.0),
                entry("40", 76.0, 106.0),
            ])),
        ),
        product("p5", "uniqlo", "Selvedge Regular Fit", "regular", None),
        product(
            "p6",
            "uniqlo",
            "Ultra Stretch Skinny",
            "skinny",
            Some(SizeChart::cm(vec![
                entry("24", 60.0, 86.0),
                entry("25", 62.5, 88.5),
                entry("26", 65.0, 91.0),
                entry("27", 67.5, 93.5),
            ])),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_consistent() {
        let builtin = Catalog::builtin();
        let rebuilt = Catalog::new(builtin.brands.clone(), builtin.products.clone());
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn test_brand_targets_keep_order() {
        let catalog = Catalog::builtin();
        let ids: Vec<&str> = catalog.brand_targets().iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["levis", "zara", "uniqlo"]);
    }

    #[test]
    fn test_product_target_uses_product_chart() {
        let catalog = Catalog::builtin();
        let target = catalog.product_target("p2").unwrap();
        assert_eq!(target.brand().id, "levis");
        assert_eq!(target.chart().len(), 6);

        let plain = catalog.product_target("p1").unwrap();
        assert_eq!(plain.chart().len(), catalog.brand("levis").unwrap().size_chart.len());
    }

    #[test]
    fn test_unknown_ids() {
        let catalog = Catalog::builtin();
        assert!(matches!(catalog.product_target("nope"), Err(CatalogError::UnknownProduct(_))));
        assert!(matches!(catalog.products_for("nope"), Err(CatalogError::UnknownBrand(_))));
        assert_eq!(catalog.products_for("zara").unwrap().len(), 2);
    }

    #[test]
    fn test_orphan_product_rejected() {
        let orphan = product("px", "ghost", "Ghost Jeans", "regular", None);
        assert!(matches!(
            Catalog::new(builtin_brands(), vec![orphan]),
            Err(CatalogError::UnknownBrand(_))
        ));
    }

    #[test]
    fn test_json_round_trip_shape() {
        let json = serde_json::to_string(&Catalog::builtin()).unwrap();
        let parsed: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.brands().len(), 3);
    }
}

// Service exports
pub mod cache;
pub mod catalog;
pub mod generative;

pub use cache::{CacheKey, CachedExplainer};
pub use catalog::{Catalog, CatalogError};
pub use generative::GenerativeExplainer;

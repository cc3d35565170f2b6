pub mod rest;
pub mod types;

use crate::error::CatalogError;
use crate::filter::VariantFilter;

pub use rest::RestCatalog;
pub use types::{ArticleUpdate, VariantRecord, VariantUpdate};

pub trait Catalog {
    fn list_variants(
        &self,
        filter: &VariantFilter,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<VariantRecord>, CatalogError>;
    fn update_variant(&self, number: &str, update: &VariantUpdate) -> Result<(), CatalogError>;
    fn update_article(&self, number: &str, update: &ArticleUpdate) -> Result<(), CatalogError>;
}

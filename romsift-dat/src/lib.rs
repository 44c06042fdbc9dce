pub mod catalog;
pub mod category;
pub mod error;

pub use catalog::{
    Catalog, CatalogEntry, Taxonomy, Variant, infer_region, parse_catalog, parse_catalog_file,
};
pub use category::Category;
pub use error::CatalogError;

pub mod catalog_ops;
pub mod query_engine;
pub mod seed;

pub use catalog_ops::CatalogOps;
pub use query_engine::QueryEngine;

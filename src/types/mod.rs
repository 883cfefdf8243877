pub mod catalog;
pub mod query;

pub use catalog::{CategoryPayload, ProductPayload};
pub use query::{ListProductsQuery, PagedResult, QuerySpec, SortKey};

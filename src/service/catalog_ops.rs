use crate::db::models::{Category, Product};
use crate::db::sqlite::CatalogStorage;
use crate::error::CatalogError;
use crate::service::query_engine::QueryEngine;
use crate::types::catalog::{CategoryPayload, ProductPayload};
use crate::types::query::{PagedResult, QuerySpec};
use tracing::{debug, info};

/// Catalog use cases on top of the keyed storage operations.
#[derive(Clone)]
pub struct CatalogOps {
    storage: CatalogStorage,
}

impl CatalogOps {
    pub fn new(storage: CatalogStorage) -> Self {
        Self { storage }
    }

    pub async fn list_products(&self, spec: &QuerySpec) -> Result<PagedResult, CatalogError> {
        let all = self.storage.list_products().await?;
        let page = QueryEngine::list(spec, all);
        debug!(
            sort_by = ?spec.sort_by,
            filter = ?spec.filter_text(),
            page_number = spec.page_number,
            page_size = spec.page_size,
            total_items = page.total_items,
            returned = page.products.len(),
            "listed products"
        );
        Ok(page)
    }

    pub async fn create_product(&self, payload: ProductPayload) -> Result<Product, CatalogError> {
        payload.validate()?;
        let product = self.storage.insert_product(&payload).await?;
        info!(id = product.id, category_id = product.category_id, "product created");
        Ok(product)
    }

    pub async fn update_product(
        &self,
        id: i64,
        payload: ProductPayload,
    ) -> Result<(), CatalogError> {
        payload.validate()?;
        self.storage.update_product(id, &payload).await?;
        info!(id, "product updated");
        Ok(())
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), CatalogError> {
        self.storage.delete_product(id).await?;
        info!(id, "product deleted");
        Ok(())
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        self.storage.list_categories().await
    }

    pub async fn create_category(&self, payload: CategoryPayload) -> Result<Category, CatalogError> {
        payload.validate()?;
        let category = self.storage.insert_category(&payload.name).await?;
        info!(id = category.id, "category created");
        Ok(category)
    }
}

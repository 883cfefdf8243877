use crate::db::sqlite::CatalogStorage;
use crate::error::CatalogError;
use crate::types::catalog::ProductPayload;
use rust_decimal::Decimal;
use tracing::{info, warn};

pub const DEMO_CATEGORIES: [&str; 2] = ["Electronics", "Books"];

/// (name, description, price, category name)
pub const DEMO_PRODUCTS: [(&str, &str, i64, &str); 3] = [
    ("Smartphone", "Latest model", 699, "Electronics"),
    ("Laptop", "Gaming laptop", 1200, "Electronics"),
    ("Novel", "Fiction book", 20, "Books"),
];

/// Populate empty tables with the demo catalog. Each table is only touched when
/// it has no rows, so restarts never duplicate data.
pub async fn seed_demo_data(storage: &CatalogStorage) -> Result<(), CatalogError> {
    if storage.count_categories().await? == 0 {
        for name in DEMO_CATEGORIES {
            storage.insert_category(name).await?;
        }
        info!(count = DEMO_CATEGORIES.len(), "seeded demo categories");
    }

    if storage.count_products().await? != 0 {
        return Ok(());
    }

    let mut seeded = 0usize;
    for (name, description, price, category) in DEMO_PRODUCTS {
        let Some(category) = storage.find_category_by_name(category).await? else {
            warn!(product = name, category, "demo category missing; skipping product");
            continue;
        };
        storage
            .insert_product(&ProductPayload {
                name: name.to_string(),
                description: description.to_string(),
                price: Decimal::new(price, 0),
                category_id: category.id,
            })
            .await?;
        seeded += 1;
    }
    info!(count = seeded, "seeded demo products");
    Ok(())
}

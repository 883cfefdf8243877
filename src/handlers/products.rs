use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
};

use crate::db::models::Product;
use crate::middleware::auth::RequireApiKey;
use crate::types::catalog::ProductPayload;
use crate::types::query::{ListProductsQuery, PagedResult};
use crate::{CatalogError, router::CatalogState};

/// GET /products?sortBy=&filter=&pageNumber=&pageSize=
pub async fn list_products(
    State(state): State<CatalogState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<PagedResult>, CatalogError> {
    let spec = query.into_spec(&state.catalog);
    Ok(Json(state.ops.list_products(&spec).await?))
}

/// POST /products (requires `X-Api-Key`)
pub async fn create_product(
    State(state): State<CatalogState>,
    RequireApiKey(_principal): RequireApiKey,
    Json(payload): Json<ProductPayload>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<Product>), CatalogError> {
    let product = state.ops.create_product(payload).await?;
    let location = format!("/products/{}", product.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(product),
    ))
}

/// PUT /products/{id} (requires `X-Api-Key`): full overwrite.
pub async fn update_product(
    State(state): State<CatalogState>,
    RequireApiKey(_principal): RequireApiKey,
    Path(id): Path<i64>,
    Json(payload): Json<ProductPayload>,
) -> Result<StatusCode, CatalogError> {
    state.ops.update_product(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /products/{id} (requires `X-Api-Key`)
pub async fn delete_product(
    State(state): State<CatalogState>,
    RequireApiKey(_principal): RequireApiKey,
    Path(id): Path<i64>,
) -> Result<StatusCode, CatalogError> {
    state.ops.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

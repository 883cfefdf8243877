use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
};

use crate::db::models::Category;
use crate::middleware::auth::RequireApiKey;
use crate::types::catalog::CategoryPayload;
use crate::{CatalogError, router::CatalogState};

/// GET /categories
pub async fn list_categories(
    State(state): State<CatalogState>,
) -> Result<Json<Vec<Category>>, CatalogError> {
    Ok(Json(state.ops.list_categories().await?))
}

/// POST /categories (requires `X-Api-Key`)
pub async fn create_category(
    State(state): State<CatalogState>,
    RequireApiKey(_principal): RequireApiKey,
    Json(payload): Json<CategoryPayload>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<Category>), CatalogError> {
    let category = state.ops.create_category(payload).await?;
    let location = format!("/categories/{}", category.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(category),
    ))
}

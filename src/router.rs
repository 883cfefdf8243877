use std::sync::Arc;

use axum::{
    Router,
    extract::{DefaultBodyLimit, FromRef},
    routing::{get, put},
};
use tower_http::trace::TraceLayer;

use crate::config::{CatalogConfig, Config};
use crate::handlers::{categories, products};
use crate::middleware::auth::ApiKeyGate;
use crate::service::catalog_ops::CatalogOps;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct CatalogState {
    pub ops: CatalogOps,
    pub gate: ApiKeyGate,
    pub catalog: Arc<CatalogConfig>,
}

impl CatalogState {
    pub fn new(ops: CatalogOps, cfg: &Config) -> Self {
        Self {
            ops,
            gate: ApiKeyGate::new(cfg.basic.api_key.as_str()),
            catalog: Arc::new(cfg.catalog.clone()),
        }
    }
}

impl FromRef<CatalogState> for ApiKeyGate {
    fn from_ref(state: &CatalogState) -> Self {
        state.gate.clone()
    }
}

pub fn catalog_router(state: CatalogState) -> Router {
    let body_limit = state.catalog.body_limit;
    Router::new()
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/{id}",
            put(products::update_product).delete(products::delete_product),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

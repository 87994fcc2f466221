//! 产品资源处理器

use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::service::ProductStore;
use crate::app::product::Product;
use crate::core::error::CatalogError;
use crate::core::middleware::request_logging_middleware;
use crate::core::response::{ApiResponse, MessageResponse};

/// 单个请求的处理上限，超时返回 408
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct AppState {
    pub store: ProductStore,
}

/// 构建后端路由，产品资源挂载在 `base_path` 下
pub fn router(store: ProductStore, base_path: &str) -> Router {
    let base = format!("/{}", base_path.trim_matches('/'));

    let products = Router::new()
        .route("/", get(get_products).post(create_product))
        .route("/:id", axum::routing::put(update_product).delete(delete_product))
        .route("/verification/:id", get(verify_product_id));

    let app = if base == "/" {
        products
    } else {
        Router::new().nest(&base, products)
    };

    with_layers(app.route("/health", get(health_check)), REQUEST_TIMEOUT)
        .with_state(AppState { store })
}

fn with_layers(app: Router<AppState>, timeout: Duration) -> Router<AppState> {
    app.layer(middleware::from_fn(request_logging_middleware))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
}

pub async fn get_products(State(state): State<AppState>) -> Json<ApiResponse<Vec<Product>>> {
    Json(ApiResponse::success(state.store.list()))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<Product>,
) -> Result<Json<MessageResponse<Product>>, CatalogError> {
    let product = state.store.create(payload)?;
    Ok(Json(MessageResponse::new("Product added successfully", product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Product>,
) -> Result<Json<MessageResponse<Product>>, CatalogError> {
    let product = state.store.update(&id, payload)?;
    Ok(Json(MessageResponse::new("Product updated successfully", product)))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CatalogError> {
    state.store.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn verify_product_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<bool> {
    Json(state.store.exists(&id))
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "store": {
            "type": "in-memory",
            "products_count": state.store.len()
        }
    }))
}

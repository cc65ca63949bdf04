use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::controllayer::productos::productos_handler;
use crate::datalayer::CRUD::types::Product;
use crate::errors::ServiceResult;
use crate::handlers::extract::{AppJson, AppPath};
use crate::state::AppState;

// ===== RESPONSE DTOs =====

/// A stored product as returned by `GET /productos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: i32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    pub stock: i32,
    #[serde(rename = "costo")]
    pub cost: f64,
    #[serde(rename = "precio")]
    pub price: f64,
}

/// Confirmation returned by create, update and delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub mensaje: String,
}

impl MessageResponse {
    pub fn new(mensaje: impl Into<String>) -> Self {
        Self {
            mensaje: mensaje.into(),
        }
    }
}

// ===== HANDLERS =====

/// GET /productos
#[instrument(skip(state), fields(service = "/productos"))]
pub async fn list_products(
    State(state): State<AppState>,
) -> ServiceResult<Json<Vec<ProductResponse>>> {
    let products = productos_handler::list_products(&state).await?;

    info!(count = products.len(), "Listed products");
    Ok(Json(products))
}

/// POST /productos
#[instrument(skip(state, product), fields(service = "/productos", nombre = %product.name))]
pub async fn create_product(
    State(state): State<AppState>,
    AppJson(product): AppJson<Product>,
) -> ServiceResult<Json<MessageResponse>> {
    productos_handler::create_product(&state, product)
        .await
        .map(Json)
}

/// PUT /productos/:id
#[instrument(skip(state, product), fields(service = "/productos/:id"))]
pub async fn update_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(product): AppJson<Product>,
) -> ServiceResult<Json<MessageResponse>> {
    productos_handler::update_product(&state, id, product)
        .await
        .map(Json)
}

/// DELETE /productos/:id
#[instrument(skip(state), fields(service = "/productos/:id"))]
pub async fn delete_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> ServiceResult<Json<MessageResponse>> {
    productos_handler::delete_product(&state, id)
        .await
        .map(Json)
}

use std::future::Future;
use std::time::Instant;

use tracing::{info, warn};

use crate::datalayer::CRUD::products;
use crate::datalayer::CRUD::types::Product;
use crate::errors::{ServiceError, ServiceResult};
use crate::handlers::productos::{MessageResponse, ProductResponse};
use crate::logging::ProductMetrics;
use crate::state::AppState;

pub const PRODUCT_CREATED: &str = "Producto agregado";
pub const PRODUCT_UPDATED: &str = "Producto actualizado";
pub const PRODUCT_DELETED: &str = "Producto eliminado";

/*
Every operation follows the same shape:
1. Take the pool from the lifecycle manager, or fail with ConnectionUnavailable
2. Run exactly one parameterized statement
3. Map typed rows into response records
Database errors are converted by `?` into ServiceError and never reach the client verbatim.
*/

async fn observe<T, F>(metrics: &ProductMetrics, operation: &'static str, op: F) -> ServiceResult<T>
where
    F: Future<Output = ServiceResult<T>>,
{
    let start = Instant::now();
    let result = op.await;
    metrics.record(
        operation,
        start.elapsed(),
        result.as_ref().err().map(ServiceError::error_code),
    );
    result
}

/// List all products
pub async fn list_products(state: &AppState) -> ServiceResult<Vec<ProductResponse>> {
    observe(&state.metrics, "list", async {
        let pool = state.db.pool()?;
        let rows = products::list_products(&pool).await?;

        Ok(rows.into_iter().map(ProductResponse::from).collect())
    })
    .await
}

/// Insert a new product
pub async fn create_product(state: &AppState, product: Product) -> ServiceResult<MessageResponse> {
    observe(&state.metrics, "create", async {
        let pool = state.db.pool()?;
        let inserted = products::insert_product(&pool, &product).await?;

        info!(rows = inserted, "Product created");
        Ok(MessageResponse::new(PRODUCT_CREATED))
    })
    .await
}

/// Overwrite a product
///
/// An id that matches no row still answers with the confirmation.
pub async fn update_product(
    state: &AppState,
    id: i32,
    product: Product,
) -> ServiceResult<MessageResponse> {
    observe(&state.metrics, "update", async {
        let pool = state.db.pool()?;
        let affected = products::update_product(&pool, id, &product).await?;

        if affected == 0 {
            warn!(product_id = id, "Update matched no product");
        } else {
            info!(product_id = id, "Product updated");
        }
        Ok(MessageResponse::new(PRODUCT_UPDATED))
    })
    .await
}

/// Delete a product
///
/// An id that matches no row still answers with the confirmation.
pub async fn delete_product(state: &AppState, id: i32) -> ServiceResult<MessageResponse> {
    observe(&state.metrics, "delete", async {
        let pool = state.db.pool()?;
        let affected = products::delete_product(&pool, id).await?;

        if affected == 0 {
            warn!(product_id = id, "Delete matched no product");
        } else {
            info!(product_id = id, "Product deleted");
        }
        Ok(MessageResponse::new(PRODUCT_DELETED))
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datalayer::DbManager;

    fn widget() -> Product {
        Product {
            name: "Widget".to_string(),
            description: "A widget".to_string(),
            stock: 10,
            cost: 2.5,
            price: 5.0,
        }
    }

    #[tokio::test]
    async fn test_operations_without_connection() {
        let state = AppState::new(DbManager::new());

        assert!(matches!(
            list_products(&state).await,
            Err(ServiceError::ConnectionUnavailable)
        ));
        assert!(matches!(
            create_product(&state, widget()).await,
            Err(ServiceError::ConnectionUnavailable)
        ));
        assert!(matches!(
            update_product(&state, 1, widget()).await,
            Err(ServiceError::ConnectionUnavailable)
        ));
        assert!(matches!(
            delete_product(&state, 1).await,
            Err(ServiceError::ConnectionUnavailable)
        ));
    }

    #[tokio::test]
    async fn test_operations_after_shutdown() {
        let db = DbManager::new();
        db.shutdown().await;
        let state = AppState::new(db);

        assert!(matches!(
            list_products(&state).await,
            Err(ServiceError::ConnectionUnavailable)
        ));
    }
}

use super::types::{Product, ProductRow};
use sqlx::PgPool;
use tracing::{debug, instrument};

// Every statement is positional. Column order follows the fields of `Product`.
pub const LIST_PRODUCTS: &str =
    "SELECT id, nombre, descripcion, stock, costo, precio FROM producto ORDER BY id";
pub const INSERT_PRODUCT: &str = "INSERT INTO producto (nombre, descripcion, stock, costo, precio) \
     VALUES ($1, $2, $3, $4, $5)";
pub const UPDATE_PRODUCT: &str = "UPDATE producto \
     SET nombre = $1, descripcion = $2, stock = $3, costo = $4, precio = $5 \
     WHERE id = $6";
pub const DELETE_PRODUCT: &str = "DELETE FROM producto WHERE id = $1";

/// Fetch every product
#[instrument(skip(pool))]
pub async fn list_products(pool: &PgPool) -> Result<Vec<ProductRow>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ProductRow>(LIST_PRODUCTS)
        .fetch_all(pool)
        .await?;

    debug!(count = rows.len(), "Fetched products");
    Ok(rows)
}

/// Insert a product, returning the affected row count
#[instrument(skip(pool, product))]
pub async fn insert_product(pool: &PgPool, product: &Product) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(INSERT_PRODUCT)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.stock)
        .bind(product.cost)
        .bind(product.price)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Overwrite all columns of a product, returning the affected row count
#[instrument(skip(pool, product))]
pub async fn update_product(pool: &PgPool, id: i32, product: &Product) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(UPDATE_PRODUCT)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.stock)
        .bind(product.cost)
        .bind(product.price)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Delete a product, returning the affected row count
#[instrument(skip(pool))]
pub async fn delete_product(pool: &PgPool, id: i32) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(DELETE_PRODUCT).bind(id).execute(pool).await?;

    Ok(result.rows_affected())
}

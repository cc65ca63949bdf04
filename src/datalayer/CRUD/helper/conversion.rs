use crate::datalayer::CRUD::types::ProductRow;
use crate::handlers::productos::ProductResponse;

// Field by field, so a reordered or renamed column never shifts values silently.
impl From<ProductRow> for ProductResponse {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            stock: row.stock,
            cost: row.cost,
            price: row.price,
        }
    }
}

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use sqlx::FromRow;

use crate::datalayer::CRUD::helper::coercion::WholeNumber;

/// Product payload accepted by create and update
///
/// Field order is the column order of every INSERT and UPDATE.
/// `stock` is expected to be non-negative but nothing enforces it.
/// Numeric fields also take numeric strings, and `stock` takes whole floats.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr, WholeNumber)>")]
    pub stock: i32,
    #[serde(rename = "costo")]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub cost: f64,
    #[serde(rename = "precio")]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub price: f64,
}

/// Row of the producto table
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ProductRow {
    pub id: i32,
    #[sqlx(rename = "nombre")]
    pub name: String,
    #[sqlx(rename = "descripcion")]
    pub description: String,
    pub stock: i32,
    #[sqlx(rename = "costo")]
    pub cost: f64,
    #[sqlx(rename = "precio")]
    pub price: f64,
}

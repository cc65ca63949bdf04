pub mod productos_handler;

pub use productos_handler::{
    PRODUCT_CREATED, PRODUCT_DELETED, PRODUCT_UPDATED, create_product, delete_product,
    list_products, update_product,
};

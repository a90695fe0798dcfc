//! Products for sale and the validation of their listings.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

pub use create::create_product_endpoint;
pub use db::{
    create_product, create_product_table, delete_product, get_all_products, get_product,
    update_product,
};
pub use delete::delete_product_endpoint;
pub use domain::{NewProduct, Product, ProductFormData, ProductId};
pub use edit::{partial_update_product_endpoint, update_product_endpoint};
pub use list::{get_product_endpoint, list_products_endpoint};

/// The state needed by the product endpoints.
#[derive(Debug, Clone)]
pub struct ProductState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ProductState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

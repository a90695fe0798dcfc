//! Product listing and retrieval endpoints.

use axum::{
    Json,
    extract::State,
};

use crate::{
    Error,
    db::lock_connection,
    extract::Path,
    product::{Product, ProductId, ProductState, get_all_products, get_product},
};

/// List every product.
pub async fn list_products_endpoint(
    State(state): State<ProductState>,
) -> Result<Json<Vec<Product>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_all_products(&connection).map(Json)
}

/// Retrieve a single product.
pub async fn get_product_endpoint(
    Path(product_id): Path<ProductId>,
    State(state): State<ProductState>,
) -> Result<Json<Product>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_product(product_id, &connection).map(Json)
}

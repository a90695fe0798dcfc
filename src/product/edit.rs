//! Product update endpoints.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    Error,
    db::lock_connection,
    extract::Path,
    product::{Product, ProductFormData, ProductId, ProductState, get_product, update_product},
    validation::WriteMode,
};

/// Replace a product's fields (PUT).
pub async fn update_product_endpoint(
    Path(product_id): Path<ProductId>,
    State(state): State<ProductState>,
    payload: Result<Json<ProductFormData>, JsonRejection>,
) -> Result<Json<Product>, Error> {
    edit_product(product_id, state, payload, WriteMode::Replace)
}

/// Update some of a product's fields (PATCH).
pub async fn partial_update_product_endpoint(
    Path(product_id): Path<ProductId>,
    State(state): State<ProductState>,
    payload: Result<Json<ProductFormData>, JsonRejection>,
) -> Result<Json<Product>, Error> {
    edit_product(product_id, state, payload, WriteMode::Patch)
}

fn edit_product(
    product_id: ProductId,
    state: ProductState,
    payload: Result<Json<ProductFormData>, JsonRejection>,
    mode: WriteMode,
) -> Result<Json<Product>, Error> {
    let Json(form) = payload?;
    let connection = lock_connection(&state.db_connection)?;

    let stored = get_product(product_id, &connection)?;
    let product = form.validate(Some(&stored), mode)?;

    update_product(product_id, product, &connection)
        .inspect_err(|error| tracing::warn!("Could not update product {product_id}: {error}"))
        .map(Json)
}

//! Product creation endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    Error,
    db::lock_connection,
    product::{Product, ProductFormData, ProductState, create_product},
    validation::WriteMode,
};

/// Handle a request to create a product.
pub async fn create_product_endpoint(
    State(state): State<ProductState>,
    payload: Result<Json<ProductFormData>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), Error> {
    let Json(form) = payload?;
    let new_product = form.validate(None, WriteMode::Create)?;

    let connection = lock_connection(&state.db_connection)?;

    let product = create_product(new_product, &connection)
        .inspect_err(|error| tracing::warn!("Could not create product: {error}"))?;

    Ok((StatusCode::CREATED, Json(product)))
}

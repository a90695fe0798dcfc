//! Product deletion endpoint.

use axum::{
    extract::State,
    http::StatusCode,
};

use crate::{
    Error,
    db::lock_connection,
    extract::Path,
    product::{ProductId, ProductState, delete_product},
};

/// Handle product deletion.
pub async fn delete_product_endpoint(
    Path(product_id): Path<ProductId>,
    State(state): State<ProductState>,
) -> Result<StatusCode, Error> {
    let connection = lock_connection(&state.db_connection)?;

    delete_product(product_id, &connection)
        .inspect_err(|error| tracing::warn!("Could not delete product {product_id}: {error}"))?;

    Ok(StatusCode::NO_CONTENT)
}

//! Category deletion endpoint.

use axum::{
    extract::State,
    http::StatusCode,
};

use crate::{
    Error,
    category::{CategoryId, CategoryState, delete_category},
    db::lock_connection,
    extract::Path,
};

/// Handle category deletion. Categories that still have products are kept.
pub async fn delete_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<CategoryState>,
) -> Result<StatusCode, Error> {
    let connection = lock_connection(&state.db_connection)?;

    delete_category(category_id, &connection)
        .inspect_err(|error| tracing::warn!("Could not delete category {category_id}: {error}"))?;

    Ok(StatusCode::NO_CONTENT)
}

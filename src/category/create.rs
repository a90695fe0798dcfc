//! Category creation endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    Error,
    category::{Category, CategoryFormData, CategoryState, create_category},
    db::lock_connection,
    validation::WriteMode,
};

/// Handle a request to create a category.
pub async fn create_category_endpoint(
    State(state): State<CategoryState>,
    payload: Result<Json<CategoryFormData>, JsonRejection>,
) -> Result<(StatusCode, Json<Category>), Error> {
    let Json(form) = payload?;
    let new_category = form.validate(None, WriteMode::Create)?;

    let connection = lock_connection(&state.db_connection)?;

    let category = create_category(new_category, &connection)
        .inspect_err(|error| tracing::warn!("Could not create category: {error}"))?;

    Ok((StatusCode::CREATED, Json(category)))
}

//! Category update endpoints.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    Error,
    category::{Category, CategoryFormData, CategoryId, CategoryState, get_category, update_category},
    db::lock_connection,
    extract::Path,
    validation::WriteMode,
};

/// Replace a category's fields (PUT).
pub async fn update_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<CategoryState>,
    payload: Result<Json<CategoryFormData>, JsonRejection>,
) -> Result<Json<Category>, Error> {
    edit_category(category_id, state, payload, WriteMode::Replace)
}

/// Update some of a category's fields (PATCH).
pub async fn partial_update_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<CategoryState>,
    payload: Result<Json<CategoryFormData>, JsonRejection>,
) -> Result<Json<Category>, Error> {
    edit_category(category_id, state, payload, WriteMode::Patch)
}

fn edit_category(
    category_id: CategoryId,
    state: CategoryState,
    payload: Result<Json<CategoryFormData>, JsonRejection>,
    mode: WriteMode,
) -> Result<Json<Category>, Error> {
    let Json(form) = payload?;
    let connection = lock_connection(&state.db_connection)?;

    let stored = get_category(category_id, &connection)?;
    let category = form.validate(Some(&stored), mode)?;

    update_category(category_id, category, &connection)
        .inspect_err(|error| tracing::warn!("Could not update category {category_id}: {error}"))
        .map(Json)
}

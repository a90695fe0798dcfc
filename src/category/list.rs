//! Category listing and retrieval endpoints.

use axum::{
    Json,
    extract::State,
};

use crate::{
    Error,
    category::{Category, CategoryId, CategoryState, get_all_categories, get_category},
    db::lock_connection,
    extract::Path,
};

/// List every category.
pub async fn list_categories_endpoint(
    State(state): State<CategoryState>,
) -> Result<Json<Vec<Category>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_all_categories(&connection).map(Json)
}

/// Retrieve a single category.
pub async fn get_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<CategoryState>,
) -> Result<Json<Category>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_category(category_id, &connection).map(Json)
}

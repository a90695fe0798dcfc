//! Currency listing and retrieval endpoints.

use axum::{
    Json,
    extract::State,
};

use crate::{
    Error,
    currency::{Currency, CurrencyId, CurrencyState, get_all_currencies, get_currency},
    db::lock_connection,
    extract::Path,
};

/// List every currency.
pub async fn list_currencies_endpoint(
    State(state): State<CurrencyState>,
) -> Result<Json<Vec<Currency>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_all_currencies(&connection).map(Json)
}

/// Retrieve a single currency.
pub async fn get_currency_endpoint(
    Path(currency_id): Path<CurrencyId>,
    State(state): State<CurrencyState>,
) -> Result<Json<Currency>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_currency(currency_id, &connection).map(Json)
}

//! Currency deletion endpoint.

use axum::{
    extract::State,
    http::StatusCode,
};

use crate::{
    Error,
    currency::{CurrencyId, CurrencyState, delete_currency},
    db::lock_connection,
    extract::Path,
};

/// Handle currency deletion. Currencies that transactions are paid in are kept.
pub async fn delete_currency_endpoint(
    Path(currency_id): Path<CurrencyId>,
    State(state): State<CurrencyState>,
) -> Result<StatusCode, Error> {
    let connection = lock_connection(&state.db_connection)?;

    delete_currency(currency_id, &connection)
        .inspect_err(|error| tracing::warn!("Could not delete currency {currency_id}: {error}"))?;

    Ok(StatusCode::NO_CONTENT)
}

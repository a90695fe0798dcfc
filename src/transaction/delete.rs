//! Transaction deletion endpoint.

use axum::{
    extract::State,
    http::StatusCode,
};

use crate::{
    Error,
    db::lock_connection,
    extract::Path,
    transaction::{TransactionId, TransactionState, delete_transaction},
};

/// Handle transaction deletion.
pub async fn delete_transaction_endpoint(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<TransactionState>,
) -> Result<StatusCode, Error> {
    let connection = lock_connection(&state.db_connection)?;

    delete_transaction(transaction_id, &connection).inspect_err(|error| {
        tracing::warn!("Could not delete transaction {transaction_id}: {error}")
    })?;

    Ok(StatusCode::NO_CONTENT)
}

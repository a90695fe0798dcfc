//! Transaction listing and retrieval endpoints.

use axum::{
    Json,
    extract::State,
};

use crate::{
    Error,
    db::lock_connection,
    extract::Path,
    transaction::{
        FilledTransaction, TransactionId, TransactionState, get_all_transactions, get_transaction,
    },
};

/// List every transaction.
pub async fn list_transactions_endpoint(
    State(state): State<TransactionState>,
) -> Result<Json<Vec<FilledTransaction>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let transactions = get_all_transactions(&connection)?
        .into_iter()
        .map(|transaction| FilledTransaction::new(transaction, &state.link_base_url))
        .collect();

    Ok(Json(transactions))
}

/// Retrieve a single transaction.
pub async fn get_transaction_endpoint(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<TransactionState>,
) -> Result<Json<FilledTransaction>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_transaction(transaction_id, &connection)
        .map(|transaction| Json(FilledTransaction::new(transaction, &state.link_base_url)))
}

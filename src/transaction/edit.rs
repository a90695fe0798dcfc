//! Transaction update endpoints.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    Error,
    db::lock_connection,
    extract::Path,
    transaction::{
        FilledTransaction, TransactionId, TransactionState, TransactionUpdateFormData,
        get_transaction, update_transaction,
    },
    validation::WriteMode,
};

/// Replace a transaction's editable fields (PUT).
pub async fn update_transaction_endpoint(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<TransactionState>,
    payload: Result<Json<TransactionUpdateFormData>, JsonRejection>,
) -> Result<Json<FilledTransaction>, Error> {
    edit_transaction(transaction_id, state, payload, WriteMode::Replace)
}

/// Update some of a transaction's editable fields (PATCH).
pub async fn partial_update_transaction_endpoint(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<TransactionState>,
    payload: Result<Json<TransactionUpdateFormData>, JsonRejection>,
) -> Result<Json<FilledTransaction>, Error> {
    edit_transaction(transaction_id, state, payload, WriteMode::Patch)
}

// Updates never ask the payment gateway for a new intent.
fn edit_transaction(
    transaction_id: TransactionId,
    state: TransactionState,
    payload: Result<Json<TransactionUpdateFormData>, JsonRejection>,
    mode: WriteMode,
) -> Result<Json<FilledTransaction>, Error> {
    let Json(form) = payload?;
    let connection = lock_connection(&state.db_connection)?;

    let stored = get_transaction(transaction_id, &connection)?;
    let update = form.validate(&stored, mode)?;

    update_transaction(transaction_id, update, &connection)
        .inspect_err(|error| {
            tracing::warn!("Could not update transaction {transaction_id}: {error}")
        })
        .map(|transaction| Json(FilledTransaction::new(transaction, &state.link_base_url)))
}

#[cfg(test)]
mod edit_transaction_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        endpoints::{self, format_endpoint},
        test_utils::{create_test_transaction, get_test_server, get_test_state},
        transaction::{FilledTransaction, PaymentStatus, get_transaction},
    };

    #[tokio::test]
    async fn put_ignores_read_only_fields() {
        let state = get_test_state();
        let transaction = create_test_transaction(&state.db_connection.lock().unwrap());
        let server = get_test_server(state.clone());

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, transaction.id))
            .json(&json!({
                "id": 12345,
                "uid": "00000000-0000-0000-0000-000000000000",
                "name": "Grace",
                "email": "grace@example.com",
                "currency": "XXX",
                "payment_intent_id": "hacked",
                "link": "https://evil.example.com",
            }))
            .await;

        response.assert_status_ok();
        let got = response.json::<FilledTransaction>().transaction;
        assert_eq!(got.id, transaction.id);
        assert_eq!(got.uid, transaction.uid);
        assert_eq!(got.name, "Grace");
        assert_eq!(got.email, "grace@example.com");
        assert_eq!(got.currency, transaction.currency);
        assert_eq!(got.payment_intent_id, transaction.payment_intent_id);
        assert_eq!(got.message, transaction.message);
        assert_eq!(
            get_transaction(transaction.id, &state.db_connection.lock().unwrap()),
            Ok(got)
        );
    }

    #[tokio::test]
    async fn patch_marks_payment_done() {
        let state = get_test_state();
        let transaction = create_test_transaction(&state.db_connection.lock().unwrap());
        let server = get_test_server(state);

        let response = server
            .patch(&format_endpoint(endpoints::TRANSACTION, transaction.id))
            .json(&json!({ "payment_status": "done" }))
            .await;

        response.assert_status_ok();
        let got = response.json::<FilledTransaction>().transaction;
        assert_eq!(got.payment_status, PaymentStatus::Done);
        assert_eq!(got.name, transaction.name);
        assert_eq!(got.payment_intent_id, transaction.payment_intent_id);
    }

    #[tokio::test]
    async fn patch_with_invalid_status_returns_bad_request() {
        let state = get_test_state();
        let transaction = create_test_transaction(&state.db_connection.lock().unwrap());
        let server = get_test_server(state);

        let response = server
            .patch(&format_endpoint(endpoints::TRANSACTION, transaction.id))
            .json(&json!({ "payment_status": "refunded" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "payment_status": ["\"refunded\" is not a valid choice."] }));
    }

    #[tokio::test]
    async fn patch_unknown_transaction_returns_not_found() {
        let server = get_test_server(get_test_state());

        let response = server
            .patch(&format_endpoint(endpoints::TRANSACTION, 999))
            .json(&json!({ "name": "Grace" }))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}

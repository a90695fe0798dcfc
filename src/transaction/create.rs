//! Transaction creation: the workflow that stores and fills a new transaction,
//! and the endpoint that exposes it.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
};
use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error, FieldErrors,
    currency::get_currency_by_code,
    db::lock_connection,
    endpoints::{self, format_endpoint},
    transaction::{
        NewTransaction, PaymentGateway, Transaction, TransactionState, UnfilledTransaction,
        fill_transaction, get_transaction, insert_transaction,
    },
};

/// Store a new transaction and give it a payment intent from `gateway`.
///
/// The currency lookup, the insert and the payment fill happen in one SQL
/// transaction, so either all of them are stored or none are.
///
/// # Errors
/// This function will return a:
/// - [Error::Validation] if no currency has the code `transaction.currency`,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    transaction: NewTransaction,
    gateway: &dyn PaymentGateway,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let sql_transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    let currency = get_currency_by_code(&transaction.currency, &sql_transaction).map_err(
        |error| match error {
            Error::NotFound => Error::Validation(FieldErrors::single(
                "currency",
                format!("Object with code={} does not exist.", transaction.currency),
            )),
            error => error,
        },
    )?;

    let id = insert_transaction(&transaction, currency.id, &sql_transaction)?;
    fill_transaction(id, gateway, &sql_transaction)?;
    let transaction = get_transaction(id, &sql_transaction)?;

    sql_transaction.commit()?;

    Ok(transaction)
}

/// Handle a request to create a transaction.
///
/// Responds with the submitted fields and the location of the new transaction.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    payload: Result<Json<UnfilledTransaction>, JsonRejection>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<UnfilledTransaction>), Error> {
    let Json(form) = payload?;
    let new_transaction = form.validate()?;

    let connection = lock_connection(&state.db_connection)?;

    let transaction = create_transaction(
        new_transaction.clone(),
        state.payment_gateway.as_ref(),
        &connection,
    )
    .inspect_err(|error| tracing::warn!("Could not create transaction: {error}"))?;

    tracing::info!(
        "Created transaction {} with payment intent {:?}",
        transaction.id,
        transaction.payment_intent_id
    );

    Ok((
        StatusCode::CREATED,
        [(
            header::LOCATION,
            format_endpoint(endpoints::TRANSACTION, transaction.id),
        )],
        Json(new_transaction.into()),
    ))
}

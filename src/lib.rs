//! Storefront is a small shop backend that serves products, categories,
//! currencies and payment transactions over a JSON REST API.
//!
//! Records are kept in SQLite. Creating a transaction asks a payment gateway
//! for a payment intent and stores its id on the new record before the request
//! completes.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod category;
mod currency;
mod db;
mod endpoints;
mod extract;
mod logging;
mod product;
mod routing;
mod transaction;
mod validation;

#[cfg(test)]
mod test_utils;

pub use app_state::{AppState, DEFAULT_LINK_BASE_URL};
pub use category::{Category, NewCategory, create_category};
pub use currency::{Currency, NewCurrency, create_currency};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use product::{NewProduct, Product, create_product};
pub use routing::build_router;
pub use transaction::{
    NewTransaction, PAYMENT_INTENT_LENGTH, PaymentGateway, PaymentStatus, SimulatedGateway,
    Transaction, create_transaction, fill_transaction,
};
pub use validation::FieldErrors;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One or more submitted fields failed validation.
    ///
    /// The client should fix the listed fields and try again.
    #[error("invalid fields: {0}")]
    Validation(FieldErrors),

    /// The request body could not be read as the expected JSON document.
    #[error("malformed request body: {0}")]
    InvalidBody(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A query referred to a row that does not exist, or tried to remove a
    /// row that other rows still refer to.
    #[error("a foreign key constraint failed")]
    ForeignKeyViolation,

    /// Tried to delete a record that other records still refer to.
    ///
    /// The string describes which record is protected and why.
    #[error("{0}")]
    ProtectedReference(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        if let Some((table, column)) = unique_violation_column(&value) {
            return Error::Validation(FieldErrors::single(
                &column,
                format!("{table} with this {column} already exists."),
            ));
        }

        match value {
            // Code 787 occurs when a FOREIGN KEY constraint failed. Deletes blocked by
            // `ON DELETE RESTRICT` report code 1811 instead.
            rusqlite::Error::SqliteFailure(sql_error, _)
                if matches!(sql_error.extended_code, 787 | 1811) =>
            {
                Error::ForeignKeyViolation
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// Extract the table and column named by a failed UNIQUE constraint.
fn unique_violation_column(error: &rusqlite::Error) -> Option<(String, String)> {
    match error {
        // Code 2067 occurs when a UNIQUE constraint failed.
        rusqlite::Error::SqliteFailure(sql_error, Some(desc)) if sql_error.extended_code == 2067 => {
            let target = desc.strip_prefix("UNIQUE constraint failed: ")?;
            let first_column = target.split(',').next()?.trim();
            let (table, column) = first_column.split_once('.')?;

            Some((table.trim_matches('"').to_owned(), column.to_owned()))
        }
        _ => None,
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("rejected path parameters: {}", rejection.body_text());
        Error::NotFound
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            Error::InvalidBody(detail) => detail_response(StatusCode::BAD_REQUEST, &detail),
            Error::NotFound => detail_response(StatusCode::NOT_FOUND, "Not found."),
            Error::ProtectedReference(detail) => detail_response(StatusCode::CONFLICT, &detail),
            Error::ForeignKeyViolation => detail_response(
                StatusCode::CONFLICT,
                "The request conflicts with records that refer to this one.",
            ),
            Error::DatabaseLockError => detail_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "The server is busy, try again later.",
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                detail_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred, check the server logs for more details.",
                )
            }
        }
    }
}

fn detail_response(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

//! Payment transactions.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and its request and response shapes
//! - Database functions for storing, querying, and managing transactions
//! - The payment gateway and the hook that fills in a new transaction's payment intent
//! - The route handlers for the transaction endpoints

mod core;
mod create;
mod delete;
mod edit;
mod list;
mod payment;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

pub use core::{
    FilledTransaction, InvalidPaymentStatus, NewTransaction, PaymentIntentId, PaymentStatus,
    Transaction, TransactionId, TransactionUpdate, TransactionUpdateFormData,
    UnfilledTransaction, create_transaction_table, delete_transaction, get_all_transactions,
    get_transaction, insert_transaction, update_transaction,
};
pub use create::{create_transaction, create_transaction_endpoint};
pub use delete::delete_transaction_endpoint;
pub use edit::{partial_update_transaction_endpoint, update_transaction_endpoint};
pub use list::{get_transaction_endpoint, list_transactions_endpoint};
pub use payment::{PAYMENT_INTENT_LENGTH, PaymentGateway, SimulatedGateway, fill_transaction};

#[cfg(test)]
pub use core::count_transactions;

/// The state needed by the transaction endpoints.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// Issues payment intents for new transactions.
    pub payment_gateway: Arc<dyn PaymentGateway>,
    /// The prefix of each transaction's payment link.
    pub link_base_url: String,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            payment_gateway: state.payment_gateway.clone(),
            link_base_url: state.link_base_url.clone(),
        }
    }
}

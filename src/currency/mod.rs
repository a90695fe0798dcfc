//! Currencies that transactions are paid in.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

pub use create::create_currency_endpoint;
pub use db::{
    create_currency, create_currency_table, delete_currency, get_all_currencies, get_currency,
    get_currency_by_code, update_currency,
};
pub use delete::delete_currency_endpoint;
pub use domain::{Currency, CurrencyFormData, CurrencyId, DEFAULT_SYMBOL, NewCurrency};
pub use edit::{partial_update_currency_endpoint, update_currency_endpoint};
pub use list::{get_currency_endpoint, list_currencies_endpoint};

/// The state needed by the currency endpoints.
#[derive(Debug, Clone)]
pub struct CurrencyState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CurrencyState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize, transaction::PaymentGateway};

/// The default prefix for the payment links of transactions.
pub const DEFAULT_LINK_BASE_URL: &str = "http://127.0.0.1:8000";

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,

    /// The gateway that issues payment intents for new transactions.
    pub payment_gateway: Arc<dyn PaymentGateway>,

    /// The scheme and host that payment links are built from, e.g. "https://shop.example.com".
    pub link_base_url: String,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        payment_gateway: Arc<dyn PaymentGateway>,
        link_base_url: &str,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            payment_gateway,
            link_base_url: link_base_url.trim_end_matches('/').to_owned(),
        })
    }
}

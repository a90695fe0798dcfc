#![allow(missing_docs)]

pub(crate) mod factories;
pub(crate) mod gateway;

use std::sync::Arc;

use axum_test::TestServer;
use rusqlite::Connection;

use crate::{AppState, build_router, db::initialize};

pub(crate) use factories::{
    create_test_category, create_test_currency, create_test_product, create_test_transaction,
};
pub(crate) use gateway::FixedGateway;

/// The payment intent that [get_test_state] gives every new transaction.
pub(crate) const TEST_PAYMENT_INTENT: &str = "abcdef";

#[track_caller]
pub(crate) fn get_test_connection() -> Connection {
    let connection = Connection::open_in_memory().expect("Could not open in-memory database");
    initialize(&connection).expect("Could not initialize database");
    connection
}

#[track_caller]
pub(crate) fn get_test_state() -> AppState {
    let connection = Connection::open_in_memory().expect("Could not open in-memory database");

    AppState::new(
        connection,
        Arc::new(FixedGateway::new(TEST_PAYMENT_INTENT)),
        "http://shop.test",
    )
    .expect("Could not create app state")
}

#[track_caller]
pub(crate) fn get_test_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state))
}

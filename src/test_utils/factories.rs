//! Create records with unique names for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use rusqlite::Connection;

use crate::{
    category::{Category, NewCategory, create_category},
    currency::{Currency, NewCurrency, create_currency},
    product::{NewProduct, Product, create_product},
    test_utils::{FixedGateway, TEST_PAYMENT_INTENT},
    transaction::{NewTransaction, Transaction, create_transaction},
};

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

fn next_id() -> usize {
    NEXT_ID.fetch_add(1, Ordering::SeqCst)
}

#[track_caller]
pub(crate) fn create_test_category(connection: &Connection) -> Category {
    let n = next_id();

    create_category(
        NewCategory {
            name: format!("Category {n}"),
            slug: format!("category-{n}"),
        },
        connection,
    )
    .expect("Could not create test category")
}

/// Create a product in a new category.
#[track_caller]
pub(crate) fn create_test_product(connection: &Connection) -> Product {
    let category = create_test_category(connection);
    let n = next_id();

    create_product(
        NewProduct {
            category: category.id,
            title: format!("Product {n}"),
            description: String::new(),
            slug: format!("product-{n}"),
            regular_price: 19.99,
            discount_price: 14.99,
        },
        connection,
    )
    .expect("Could not create test product")
}

/// Create a currency with a unique three letter code.
#[track_caller]
pub(crate) fn create_test_currency(connection: &Connection) -> Currency {
    let n = next_id();
    let code: String = [n / 676, n / 26, n]
        .iter()
        .map(|digit| char::from(b'A' + (digit % 26) as u8))
        .collect();

    create_currency(
        NewCurrency {
            name: format!("Currency {n}"),
            code,
            symbol: "$".to_owned(),
        },
        connection,
    )
    .expect("Could not create test currency")
}

/// Create a filled transaction paid in a new currency.
#[track_caller]
pub(crate) fn create_test_transaction(connection: &Connection) -> Transaction {
    let currency = create_test_currency(connection);
    let n = next_id();

    create_transaction(
        NewTransaction {
            currency: currency.code,
            name: format!("Payer {n}"),
            email: format!("payer{n}@example.com"),
            message: Some("Thanks!".to_owned()),
        },
        &FixedGateway::new(TEST_PAYMENT_INTENT),
        connection,
    )
    .expect("Could not create test transaction")
}

//! Application router configuration.

use axum::{Router, routing::get};

use crate::{
    AppState, Error,
    category::{
        create_category_endpoint, delete_category_endpoint, get_category_endpoint,
        list_categories_endpoint, partial_update_category_endpoint, update_category_endpoint,
    },
    currency::{
        create_currency_endpoint, delete_currency_endpoint, get_currency_endpoint,
        list_currencies_endpoint, partial_update_currency_endpoint, update_currency_endpoint,
    },
    endpoints,
    product::{
        create_product_endpoint, delete_product_endpoint, get_product_endpoint,
        list_products_endpoint, partial_update_product_endpoint, update_product_endpoint,
    },
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_transaction_endpoint,
        list_transactions_endpoint, partial_update_transaction_endpoint,
        update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::PRODUCTS,
            get(list_products_endpoint).post(create_product_endpoint),
        )
        .route(
            endpoints::PRODUCT,
            get(get_product_endpoint)
                .put(update_product_endpoint)
                .patch(partial_update_product_endpoint)
                .delete(delete_product_endpoint),
        )
        .route(
            endpoints::CATEGORIES,
            get(list_categories_endpoint).post(create_category_endpoint),
        )
        .route(
            endpoints::CATEGORY,
            get(get_category_endpoint)
                .put(update_category_endpoint)
                .patch(partial_update_category_endpoint)
                .delete(delete_category_endpoint),
        )
        .route(
            endpoints::CURRENCIES,
            get(list_currencies_endpoint).post(create_currency_endpoint),
        )
        .route(
            endpoints::CURRENCY,
            get(get_currency_endpoint)
                .put(update_currency_endpoint)
                .patch(partial_update_currency_endpoint)
                .delete(delete_currency_endpoint),
        )
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint)
                .put(update_transaction_endpoint)
                .patch(partial_update_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}

//! Currency creation endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    Error,
    currency::{Currency, CurrencyFormData, CurrencyState, create_currency},
    db::lock_connection,
    validation::WriteMode,
};

/// Handle a request to create a currency.
pub async fn create_currency_endpoint(
    State(state): State<CurrencyState>,
    payload: Result<Json<CurrencyFormData>, JsonRejection>,
) -> Result<(StatusCode, Json<Currency>), Error> {
    let Json(form) = payload?;
    let new_currency = form.validate(None, WriteMode::Create)?;

    let connection = lock_connection(&state.db_connection)?;

    let currency = create_currency(new_currency, &connection)
        .inspect_err(|error| tracing::warn!("Could not create currency: {error}"))?;

    Ok((StatusCode::CREATED, Json(currency)))
}

#[cfg(test)]
mod create_currency_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        currency::get_currency_by_code,
        endpoints::{self, format_endpoint},
        test_utils::{get_test_server, get_test_state},
    };

    #[tokio::test]
    async fn create_returns_exactly_the_submitted_triple() {
        let state = get_test_state();
        let server = get_test_server(state.clone());
        let body = json!({ "name": "Iranian rial", "code": "IRR", "symbol": "$" });

        let response = server.post(endpoints::CURRENCIES).json(&body).await;

        response.assert_status(StatusCode::CREATED);
        response.assert_json(&body);
        assert!(get_currency_by_code("IRR", &state.db_connection.lock().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn created_currency_is_retrieved_unchanged() {
        let state = get_test_state();
        let server = get_test_server(state.clone());
        let body = json!({ "name": "Iranian rial", "code": "IRR", "symbol": "﷼" });

        server
            .post(endpoints::CURRENCIES)
            .json(&body)
            .await
            .assert_status(StatusCode::CREATED);
        let id = get_currency_by_code("IRR", &state.db_connection.lock().unwrap())
            .unwrap()
            .id;

        let response = server.get(&format_endpoint(endpoints::CURRENCY, id)).await;

        response.assert_status_ok();
        response.assert_json(&body);
    }

    #[tokio::test]
    async fn padded_code_is_stored_trimmed() {
        let server = get_test_server(get_test_state());

        let response = server
            .post(endpoints::CURRENCIES)
            .json(&json!({ "name": " Euro ", "code": "EUR ", "symbol": "€" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        response.assert_json(&json!({ "name": "Euro", "code": "EUR", "symbol": "€" }));
        server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({ "currency": "EUR", "name": "Ada", "email": "ada@example.com" }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    #[tokio::test]
    async fn create_without_symbol_uses_dollar() {
        let server = get_test_server(get_test_state());

        let response = server
            .post(endpoints::CURRENCIES)
            .json(&json!({ "name": "Cape Verdean escudo", "code": "CVE" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        response.assert_json(&json!({
            "name": "Cape Verdean escudo",
            "code": "CVE",
            "symbol": "$",
        }));
    }

    #[tokio::test]
    async fn duplicate_code_is_a_validation_error() {
        let server = get_test_server(get_test_state());
        server
            .post(endpoints::CURRENCIES)
            .json(&json!({ "name": "Euro", "code": "EUR", "symbol": "€" }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post(endpoints::CURRENCIES)
            .json(&json!({ "name": "Euro again", "code": "EUR", "symbol": "€" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "code": ["currency with this code already exists."] }));
    }

    #[tokio::test]
    async fn over_long_fields_are_rejected() {
        let server = get_test_server(get_test_state());

        let response = server
            .post(endpoints::CURRENCIES)
            .json(&json!({ "name": "Euro", "code": "EURO", "symbol": "€€€€€€" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({
            "code": ["Ensure this field has no more than 3 characters."],
            "symbol": ["Ensure this field has no more than 5 characters."],
        }));
    }
}

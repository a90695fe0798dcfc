//! Currency update endpoints.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    Error,
    currency::{Currency, CurrencyFormData, CurrencyId, CurrencyState, get_currency, update_currency},
    db::lock_connection,
    extract::Path,
    validation::WriteMode,
};

/// Replace a currency's fields (PUT).
pub async fn update_currency_endpoint(
    Path(currency_id): Path<CurrencyId>,
    State(state): State<CurrencyState>,
    payload: Result<Json<CurrencyFormData>, JsonRejection>,
) -> Result<Json<Currency>, Error> {
    edit_currency(currency_id, state, payload, WriteMode::Replace)
}

/// Update some of a currency's fields (PATCH).
pub async fn partial_update_currency_endpoint(
    Path(currency_id): Path<CurrencyId>,
    State(state): State<CurrencyState>,
    payload: Result<Json<CurrencyFormData>, JsonRejection>,
) -> Result<Json<Currency>, Error> {
    edit_currency(currency_id, state, payload, WriteMode::Patch)
}

fn edit_currency(
    currency_id: CurrencyId,
    state: CurrencyState,
    payload: Result<Json<CurrencyFormData>, JsonRejection>,
    mode: WriteMode,
) -> Result<Json<Currency>, Error> {
    let Json(form) = payload?;
    let connection = lock_connection(&state.db_connection)?;

    let stored = get_currency(currency_id, &connection)?;
    let currency = form.validate(Some(&stored), mode)?;

    update_currency(currency_id, currency, &connection)
        .inspect_err(|error| tracing::warn!("Could not update currency {currency_id}: {error}"))
        .map(Json)
}

#[cfg(test)]
mod edit_currency_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        currency::get_currency,
        endpoints::{self, format_endpoint},
        test_utils::{create_test_currency, get_test_server, get_test_state},
    };

    #[tokio::test]
    async fn put_replaces_currency() {
        let state = get_test_state();
        let currency = create_test_currency(&state.db_connection.lock().unwrap());
        let server = get_test_server(state.clone());

        let response = server
            .put(&format_endpoint(endpoints::CURRENCY, currency.id))
            .json(&json!({ "name": "Macedonian denar", "code": "MKD", "symbol": "ден" }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "name": "Macedonian denar", "code": "MKD", "symbol": "ден" }));
        let stored = get_currency(currency.id, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(stored.code, "MKD");
    }

    #[tokio::test]
    async fn patch_updates_symbol_only() {
        let state = get_test_state();
        let currency = create_test_currency(&state.db_connection.lock().unwrap());
        let server = get_test_server(state);

        let response = server
            .patch(&format_endpoint(endpoints::CURRENCY, currency.id))
            .json(&json!({ "symbol": "£" }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "name": currency.name,
            "code": currency.code,
            "symbol": "£",
        }));
    }

    #[tokio::test]
    async fn put_unknown_currency_returns_not_found() {
        let server = get_test_server(get_test_state());

        let response = server
            .put(&format_endpoint(endpoints::CURRENCY, 999))
            .json(&json!({ "name": "Euro", "code": "EUR" }))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}

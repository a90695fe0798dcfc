//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/product/{product_id}/', use [format_endpoint].

/// The route to list and create products.
pub const PRODUCTS: &str = "/api/product/";
/// The route to access a single product.
pub const PRODUCT: &str = "/api/product/{product_id}/";
/// The route to list and create categories.
pub const CATEGORIES: &str = "/api/category/";
/// The route to access a single category.
pub const CATEGORY: &str = "/api/category/{category_id}/";
/// The route to list and create currencies.
pub const CURRENCIES: &str = "/api/currency/";
/// The route to access a single currency.
pub const CURRENCY: &str = "/api/currency/{currency_id}/";
/// The route to list and create transactions.
pub const TRANSACTIONS: &str = "/api/transaction/";
/// The route to access a single transaction.
pub const TRANSACTION: &str = "/api/transaction/{transaction_id}/";
/// The payment form for a transaction, relative to the configured link base URL.
pub const PAYMENT_FORM: &str = "/payment/{transaction_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/product/{product_id}/', '{product_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

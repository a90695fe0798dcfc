//! Core currency domain types.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    validation::{FieldErrors, WriteMode, check_text, resolve_or, resolve_required, trim},
};

/// Database identifier for a currency.
pub type CurrencyId = i64;

/// The symbol given to currencies created without one.
pub const DEFAULT_SYMBOL: &str = "$";

const NAME_MAX_CHARS: usize = 120;
const CODE_MAX_CHARS: usize = 3;
const SYMBOL_MAX_CHARS: usize = 5;

/// A currency such as `{ name: "New Zealand dollar", code: "NZD", symbol: "$" }`.
///
/// The ID addresses the currency in URLs but is not part of its JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// The ID of the currency.
    #[serde(skip)]
    pub id: CurrencyId,
    /// The unique name of the currency.
    pub name: String,
    /// A short, unique code, e.g. "NZD".
    pub code: String,
    /// The symbol written before amounts, e.g. "$".
    pub symbol: String,
}

/// A validated currency that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCurrency {
    /// The unique name of the currency.
    pub name: String,
    /// A short, unique code, at most three characters.
    pub code: String,
    /// The symbol written before amounts.
    pub symbol: String,
}

/// Request body for creating and editing a currency.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CurrencyFormData {
    pub name: Option<String>,
    pub code: Option<String>,
    pub symbol: Option<String>,
}

impl CurrencyFormData {
    /// Validate the form against the `stored` currency, if there is one.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] listing every field that is missing or invalid.
    pub fn validate(self, stored: Option<&Currency>, mode: WriteMode) -> Result<NewCurrency, Error> {
        let mut errors = FieldErrors::new();

        let name = resolve_required(
            &mut errors,
            "name",
            trim(self.name),
            stored.map(|c| &c.name),
            mode,
        );
        let code = resolve_required(
            &mut errors,
            "code",
            trim(self.code),
            stored.map(|c| &c.code),
            mode,
        );
        let symbol = resolve_or(
            trim(self.symbol),
            stored.map(|c| &c.symbol),
            mode,
            DEFAULT_SYMBOL.to_owned(),
        );

        check_text(&mut errors, "name", name.as_deref(), NAME_MAX_CHARS);
        check_text(&mut errors, "code", code.as_deref(), CODE_MAX_CHARS);
        check_text(&mut errors, "symbol", Some(&symbol), SYMBOL_MAX_CHARS);

        match (name, code) {
            (Some(name), Some(code)) if errors.is_empty() => Ok(NewCurrency { name, code, symbol }),
            _ => Err(errors.into()),
        }
    }
}

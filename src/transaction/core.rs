//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, str::FromStr};

use email_address::{EmailAddress, Options};
use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    Error,
    currency::CurrencyId,
    endpoints::{self, format_endpoint},
    validation::{FieldErrors, WriteMode, check_text, deserialize_some, resolve_required, trim},
};

// ============================================================================
// MODELS
// ============================================================================

/// Database identifier for a transaction.
pub type TransactionId = i64;

/// The reference a payment gateway gives to a pending payment.
pub type PaymentIntentId = String;

const NAME_MAX_CHARS: usize = 50;
const EMAIL_MAX_CHARS: usize = 50;

/// Whether the payer has completed a transaction's payment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Waiting for the payer.
    #[default]
    Pending,
    /// The payment went through.
    Done,
}

impl PaymentStatus {
    /// The name used for the status in JSON and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Done => "done",
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A string that is not the name of a [PaymentStatus].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a valid choice.")]
pub struct InvalidPaymentStatus(pub String);

impl FromStr for PaymentStatus {
    type Err = InvalidPaymentStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "done" => Ok(PaymentStatus::Done),
            other => Err(InvalidPaymentStatus(other.to_owned())),
        }
    }
}

/// A payment made by a customer in a given currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A random identifier that is safe to share with the payer.
    pub uid: Uuid,
    /// The payer's name.
    pub name: String,
    /// The payer's email address.
    pub email: String,
    /// When the transaction was first stored, in UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub creation_date: OffsetDateTime,
    /// The code of the currency the payment is made in, e.g. "NZD".
    pub currency: String,
    /// Whether the payer has paid yet.
    pub payment_status: PaymentStatus,
    /// Set once by [crate::fill_transaction] right after the transaction is stored.
    pub payment_intent_id: Option<PaymentIntentId>,
    /// An optional note from the payer.
    pub message: Option<String>,
}

/// A validated transaction that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// The code of the currency to pay in.
    pub currency: String,
    /// The payer's name.
    pub name: String,
    /// The payer's email address.
    pub email: String,
    /// An optional note from the payer.
    pub message: Option<String>,
}

/// The fields of a stored transaction that clients may change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionUpdate {
    pub name: String,
    pub email: String,
    pub message: Option<String>,
    pub payment_status: PaymentStatus,
}

// ============================================================================
// REQUEST AND RESPONSE SHAPES
// ============================================================================

/// The shape of a transaction before it is stored.
///
/// Used both as the request body for creating a transaction and as the
/// response to that request.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnfilledTransaction {
    /// The code of the currency to pay in.
    pub currency: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl UnfilledTransaction {
    /// Validate the submitted fields.
    ///
    /// Whether the currency code exists is checked when the transaction is created.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] listing every field that is missing or invalid.
    pub fn validate(self) -> Result<NewTransaction, Error> {
        let mut errors = FieldErrors::new();

        let currency = resolve_required(
            &mut errors,
            "currency",
            trim(self.currency),
            None,
            WriteMode::Create,
        );
        let name = resolve_required(&mut errors, "name", trim(self.name), None, WriteMode::Create);
        let email = resolve_required(&mut errors, "email", trim(self.email), None, WriteMode::Create);

        check_text(&mut errors, "name", name.as_deref(), NAME_MAX_CHARS);
        check_email(&mut errors, email.as_deref());
        check_message(&mut errors, self.message.as_deref());

        match (currency, name, email) {
            (Some(currency), Some(name), Some(email)) if errors.is_empty() => Ok(NewTransaction {
                currency,
                name,
                email,
                message: self.message,
            }),
            _ => Err(errors.into()),
        }
    }
}

impl From<NewTransaction> for UnfilledTransaction {
    fn from(transaction: NewTransaction) -> Self {
        Self {
            currency: Some(transaction.currency),
            name: Some(transaction.name),
            email: Some(transaction.email),
            message: transaction.message,
        }
    }
}

/// The complete shape of a stored transaction, including its payment link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilledTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    /// Where the payer completes the payment.
    pub link: String,
}

impl FilledTransaction {
    /// Attach the payment link under `link_base_url` to `transaction`.
    pub fn new(transaction: Transaction, link_base_url: &str) -> Self {
        let link = format!(
            "{link_base_url}{}",
            format_endpoint(endpoints::PAYMENT_FORM, transaction.id)
        );

        Self { transaction, link }
    }
}

/// Request body for editing a transaction.
///
/// Only the payer's details, the message and the payment status can be
/// changed. Any other submitted field is ignored.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TransactionUpdateFormData {
    pub name: Option<String>,
    pub email: Option<String>,
    /// `Some(None)` clears the message, `None` keeps the stored one.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub message: Option<Option<String>>,
    pub payment_status: Option<String>,
}

impl TransactionUpdateFormData {
    /// Validate the form against the `stored` transaction.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] listing every field that is missing or invalid.
    pub fn validate(
        self,
        stored: &Transaction,
        mode: WriteMode,
    ) -> Result<TransactionUpdate, Error> {
        let mut errors = FieldErrors::new();

        let name = resolve_required(&mut errors, "name", trim(self.name), Some(&stored.name), mode);
        let email = resolve_required(
            &mut errors,
            "email",
            trim(self.email),
            Some(&stored.email),
            mode,
        );
        let message = self.message.unwrap_or_else(|| stored.message.clone());
        let payment_status = match self.payment_status.as_deref().map(str::parse) {
            None => Some(stored.payment_status),
            Some(Ok(status)) => Some(status),
            Some(Err(error)) => {
                errors.add("payment_status", error.to_string());
                None
            }
        };

        check_text(&mut errors, "name", name.as_deref(), NAME_MAX_CHARS);
        check_email(&mut errors, email.as_deref());
        check_message(&mut errors, message.as_deref());

        match (name, email, payment_status) {
            (Some(name), Some(email), Some(payment_status)) if errors.is_empty() => {
                Ok(TransactionUpdate {
                    name,
                    email,
                    message,
                    payment_status,
                })
            }
            _ => Err(errors.into()),
        }
    }
}

fn check_email(errors: &mut FieldErrors, email: Option<&str>) {
    let Some(email) = email else {
        return;
    };

    check_text(errors, "email", Some(email), EMAIL_MAX_CHARS);

    let options = Options::default()
        .without_display_text()
        .with_required_tld();

    if !email.is_empty() && EmailAddress::parse_with_options(email, options).is_err() {
        errors.add("email", "Enter a valid email address.");
    }
}

fn check_message(errors: &mut FieldErrors, message: Option<&str>) {
    if message.is_some_and(|message| message.contains('\0')) {
        errors.add("message", "Null characters are not allowed.");
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

const SELECT_TRANSACTION: &str = "SELECT t.id, t.uid, t.name, t.email, t.creation_date, c.code,
        t.payment_status, t.payment_intent_id, t.message
    FROM \"transaction\" t
    INNER JOIN currency c ON c.id = t.currency_id";

/// Store a new transaction paid in `currency_id` and return its ID.
///
/// The payment intent is left empty, see [crate::fill_transaction].
///
/// # Errors
/// This function will return a:
/// - [Error::ForeignKeyViolation] if `currency_id` does not refer to a currency,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn insert_transaction(
    transaction: &NewTransaction,
    currency_id: CurrencyId,
    connection: &Connection,
) -> Result<TransactionId, Error> {
    connection
        .prepare(
            "INSERT INTO \"transaction\"
                (uid, name, email, creation_date, currency_id, payment_status, message)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING id",
        )?
        .query_row(
            (
                Uuid::new_v4(),
                &transaction.name,
                &transaction.email,
                OffsetDateTime::now_utc(),
                currency_id,
                PaymentStatus::default().as_str(),
                &transaction.message,
            ),
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!("{SELECT_TRANSACTION} WHERE t.id = :id"))?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Retrieve every transaction in the order they were created.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(&format!("{SELECT_TRANSACTION} ORDER BY t.id ASC"))?
        .query_map([], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Write the editable fields of a transaction.
///
/// The ID, UID, creation date, currency and payment intent are never changed.
///
/// # Errors
/// Returns [Error::NotFound] if `id` does not refer to a valid transaction.
pub fn update_transaction(
    id: TransactionId,
    update: TransactionUpdate,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let rows_affected = connection.execute(
        "UPDATE \"transaction\"
         SET name = ?1, email = ?2, message = ?3, payment_status = ?4
         WHERE id = ?5",
        (
            &update.name,
            &update.email,
            &update.message,
            update.payment_status.as_str(),
            id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    get_transaction(id, connection)
}

/// Delete a transaction by its `id`.
///
/// # Errors
/// Returns [Error::NotFound] if `id` does not refer to a valid transaction.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM \"transaction\" WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Get the total number of transactions in the database.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                uid BLOB NOT NULL UNIQUE,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                creation_date TEXT NOT NULL,
                currency_id INTEGER NOT NULL,
                payment_status TEXT NOT NULL DEFAULT 'pending',
                payment_intent_id TEXT,
                message TEXT,
                FOREIGN KEY(currency_id) REFERENCES currency(id) ON UPDATE CASCADE ON DELETE RESTRICT
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_currency ON \"transaction\"(currency_id);",
        (),
    )?;

    Ok(())
}

fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let payment_status = row.get::<usize, String>(6)?.parse().map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(
            6,
            rusqlite::types::Type::Text,
            Box::new(error),
        )
    })?;

    Ok(Transaction {
        id: row.get(0)?,
        uid: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        creation_date: row.get(4)?,
        currency: row.get(5)?,
        payment_status,
        payment_intent_id: row.get(7)?,
        message: row.get(8)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod filled_transaction_tests {
    use serde_json::Value;

    use crate::transaction::{FilledTransaction, PaymentStatus, Transaction};

    #[test]
    fn serializes_every_field_and_link() {
        let transaction = Transaction {
            id: 42,
            uid: uuid::Uuid::nil(),
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            creation_date: time::OffsetDateTime::UNIX_EPOCH,
            currency: "NZD".to_owned(),
            payment_status: PaymentStatus::Done,
            payment_intent_id: Some("Ab12Cd".to_owned()),
            message: None,
        };

        let got = serde_json::to_value(FilledTransaction::new(
            transaction,
            "https://shop.example.com",
        ))
        .unwrap();

        assert_eq!(got["id"], 42);
        assert_eq!(got["uid"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(got["creation_date"], "1970-01-01T00:00:00Z");
        assert_eq!(got["currency"], "NZD");
        assert_eq!(got["payment_status"], "done");
        assert_eq!(got["payment_intent_id"], "Ab12Cd");
        assert_eq!(got["message"], Value::Null);
        assert_eq!(got["link"], "https://shop.example.com/payment/42");
    }
}

#[cfg(test)]
mod database_tests {
    use crate::{
        Error,
        currency::get_currency_by_code,
        test_utils::{create_test_currency, create_test_transaction, get_test_connection},
        transaction::{
            NewTransaction, PaymentStatus, TransactionUpdate, count_transactions,
            delete_transaction, get_all_transactions, get_transaction, insert_transaction,
            update_transaction,
        },
    };

    fn new_transaction(currency: &str) -> NewTransaction {
        NewTransaction {
            currency: currency.to_owned(),
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            message: Some("For the widgets".to_owned()),
        }
    }

    #[test]
    fn insert_leaves_payment_intent_empty() {
        let connection = get_test_connection();
        let currency = create_test_currency(&connection);

        let id = insert_transaction(&new_transaction(&currency.code), currency.id, &connection)
            .expect("Could not insert transaction");

        let transaction = get_transaction(id, &connection).unwrap();
        assert_eq!(transaction.payment_intent_id, None);
        assert_eq!(transaction.payment_status, PaymentStatus::Pending);
        assert_eq!(transaction.currency, currency.code);
        assert_eq!(transaction.message.as_deref(), Some("For the widgets"));
    }

    #[test]
    fn insert_with_unknown_currency_fails() {
        let connection = get_test_connection();

        let result = insert_transaction(&new_transaction("NZD"), 999, &connection);

        assert_eq!(result, Err(Error::ForeignKeyViolation));
        assert_eq!(count_transactions(&connection), Ok(0));
    }

    #[test]
    fn each_transaction_gets_its_own_uid() {
        let connection = get_test_connection();

        let first = create_test_transaction(&connection);
        let second = create_test_transaction(&connection);

        assert_ne!(first.uid, second.uid);
    }

    #[test]
    fn get_missing_transaction_returns_not_found() {
        let connection = get_test_connection();

        assert_eq!(get_transaction(404, &connection), Err(Error::NotFound));
    }

    #[test]
    fn get_all_transactions_in_creation_order() {
        let connection = get_test_connection();
        let want = vec![
            create_test_transaction(&connection),
            create_test_transaction(&connection),
        ];

        assert_eq!(get_all_transactions(&connection), Ok(want));
    }

    #[test]
    fn update_changes_only_editable_fields() {
        let connection = get_test_connection();
        let transaction = create_test_transaction(&connection);

        let updated = update_transaction(
            transaction.id,
            TransactionUpdate {
                name: "Grace".to_owned(),
                email: "grace@example.com".to_owned(),
                message: None,
                payment_status: PaymentStatus::Done,
            },
            &connection,
        )
        .expect("Could not update transaction");

        assert_eq!(updated.name, "Grace");
        assert_eq!(updated.email, "grace@example.com");
        assert_eq!(updated.message, None);
        assert_eq!(updated.payment_status, PaymentStatus::Done);
        assert_eq!(updated.uid, transaction.uid);
        assert_eq!(updated.creation_date, transaction.creation_date);
        assert_eq!(updated.currency, transaction.currency);
        assert_eq!(updated.payment_intent_id, transaction.payment_intent_id);
    }

    #[test]
    fn update_missing_transaction_returns_not_found() {
        let connection = get_test_connection();

        let result = update_transaction(
            404,
            TransactionUpdate {
                name: "Grace".to_owned(),
                email: "grace@example.com".to_owned(),
                message: None,
                payment_status: PaymentStatus::Done,
            },
            &connection,
        );

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn delete_transaction_frees_currency() {
        let connection = get_test_connection();
        let transaction = create_test_transaction(&connection);
        let currency = get_currency_by_code(&transaction.currency, &connection).unwrap();

        assert_eq!(delete_transaction(transaction.id, &connection), Ok(()));
        assert_eq!(get_transaction(transaction.id, &connection), Err(Error::NotFound));
        assert_eq!(
            crate::currency::delete_currency(currency.id, &connection),
            Ok(())
        );
    }

    #[test]
    fn delete_missing_transaction_returns_not_found() {
        let connection = get_test_connection();

        assert_eq!(delete_transaction(404, &connection), Err(Error::NotFound));
    }
}

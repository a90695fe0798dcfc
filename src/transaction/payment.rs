//! Issues payment intents for new transactions.

use std::fmt::Debug;

use rand::{Rng, distr::Alphanumeric};
use rusqlite::Connection;

use crate::{
    Error,
    transaction::{PaymentIntentId, TransactionId},
};

/// The number of characters in a payment intent issued by [SimulatedGateway].
pub const PAYMENT_INTENT_LENGTH: usize = 6;

/// Something that can open a payment with a payment provider.
pub trait PaymentGateway: Debug + Send + Sync {
    /// Start a payment and return the provider's reference for it.
    fn create_payment_intent(&self) -> PaymentIntentId;
}

/// A stand-in for a real payment provider.
///
/// Each intent is [PAYMENT_INTENT_LENGTH] random ASCII letters and digits.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedGateway;

impl PaymentGateway for SimulatedGateway {
    fn create_payment_intent(&self) -> PaymentIntentId {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(PAYMENT_INTENT_LENGTH)
            .map(char::from)
            .collect()
    }
}

/// Give the transaction `id` a payment intent from `gateway`, unless it already has one.
///
/// Only the payment intent column is written, so an intent is never replaced
/// once it is set.
///
/// Returns the new payment intent, or `None` if the transaction already had
/// one or does not exist.
///
/// # Errors
/// Returns [Error::SqlError] if the update fails.
pub fn fill_transaction(
    id: TransactionId,
    gateway: &dyn PaymentGateway,
    connection: &Connection,
) -> Result<Option<PaymentIntentId>, Error> {
    let payment_intent_id = gateway.create_payment_intent();

    let rows_affected = connection.execute(
        "UPDATE \"transaction\" SET payment_intent_id = ?1
         WHERE id = ?2 AND payment_intent_id IS NULL",
        (&payment_intent_id, id),
    )?;

    if rows_affected == 0 {
        tracing::debug!("Transaction {id} already has a payment intent or does not exist");
        return Ok(None);
    }

    tracing::debug!("Filled transaction {id} with payment intent {payment_intent_id}");

    Ok(Some(payment_intent_id))
}

#[cfg(test)]
mod simulated_gateway_tests {
    use super::{PAYMENT_INTENT_LENGTH, PaymentGateway, SimulatedGateway};

    #[test]
    fn intent_is_six_alphanumeric_characters() {
        for _ in 0..100 {
            let intent = SimulatedGateway.create_payment_intent();

            assert_eq!(intent.len(), PAYMENT_INTENT_LENGTH);
            assert!(intent.chars().all(|c| c.is_ascii_alphanumeric()), "{intent}");
        }
    }
}

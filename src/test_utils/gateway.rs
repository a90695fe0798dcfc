use std::sync::atomic::{AtomicUsize, Ordering};

use crate::transaction::{PaymentGateway, PaymentIntentId};

/// A payment gateway that always issues the same payment intent and counts
/// how many it has issued.
#[derive(Debug)]
pub(crate) struct FixedGateway {
    payment_intent_id: PaymentIntentId,
    calls: AtomicUsize,
}

impl FixedGateway {
    pub(crate) fn new(payment_intent_id: &str) -> Self {
        Self {
            payment_intent_id: payment_intent_id.to_owned(),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PaymentGateway for FixedGateway {
    fn create_payment_intent(&self) -> PaymentIntentId {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.payment_intent_id.clone()
    }
}

//! Simulated payment processor.
//!
//! Stands in for a hosted checkout: waits a fixed delay, then approves with a
//! fabricated `STRIPE_` transaction id. A real integration would call a
//! backend endpoint that holds the secret key; none exists here.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use rand::distributions::Alphanumeric;
use spark_core::payment::{PaymentProcessor, PaymentRequest, PaymentResult};

/// Time the simulated provider takes to answer.
pub const SIMULATED_PAYMENT_DELAY: Duration = Duration::from_secs(2);

const TRANSACTION_ID_PREFIX: &str = "STRIPE_";
const TRANSACTION_ID_LEN: usize = 9;

/// How the simulator answers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SimulatedOutcome {
    #[default]
    Approve,
    /// Decline with the given provider error, or none to exercise the
    /// caller's generic fallback.
    Decline(Option<String>),
}

/// Answers every request after [`SIMULATED_PAYMENT_DELAY`].
#[derive(Debug, Clone, Default)]
pub struct SimulatedPaymentProcessor {
    outcome: SimulatedOutcome,
}

impl SimulatedPaymentProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outcome(mut self, outcome: SimulatedOutcome) -> Self {
        self.outcome = outcome;
        self
    }
}

/// Generates `STRIPE_` followed by nine uppercase alphanumerics.
pub fn generate_transaction_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TRANSACTION_ID_LEN)
        .map(|byte| char::from(byte).to_ascii_uppercase())
        .collect();
    format!("{TRANSACTION_ID_PREFIX}{suffix}")
}

#[async_trait]
impl PaymentProcessor for SimulatedPaymentProcessor {
    async fn process(&self, request: PaymentRequest) -> PaymentResult {
        tracing::info!(tier = %request.tier_name, price = %request.price, "Simulating payment");
        tokio::time::sleep(SIMULATED_PAYMENT_DELAY).await;

        match &self.outcome {
            SimulatedOutcome::Approve => {
                let transaction_id = generate_transaction_id();
                tracing::info!(%transaction_id, "Simulated payment approved");
                PaymentResult::approved(transaction_id)
            }
            SimulatedOutcome::Decline(error) => {
                tracing::warn!(?error, "Simulated payment declined");
                PaymentResult::declined(error.clone())
            }
        }
    }
}

//! Drives effects on the tokio runtime.
//!
//! Every effect runs in its own task guarded by a [`CancellationToken`]; the
//! task reports back by sending exactly one [`Action`] on the action channel.

use std::collections::HashMap;
use std::sync::Arc;

use spark_core::SparkError;
use spark_core::generation::TextGenerator;
use spark_core::payment::PaymentProcessor;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::action::{Action, Effect, Ticket};

pub struct EffectRunner {
    generator: Arc<dyn TextGenerator>,
    payments: Arc<dyn PaymentProcessor>,
    actions: mpsc::UnboundedSender<Action>,
    in_flight: HashMap<Ticket, CancellationToken>,
}

impl EffectRunner {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        payments: Arc<dyn PaymentProcessor>,
        actions: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            generator,
            payments,
            actions,
            in_flight: HashMap::new(),
        }
    }

    /// Number of effects whose continuation has not been collected yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.run_one(effect);
        }
    }

    /// Forgets the token of a finished request.
    pub fn finish(&mut self, ticket: Ticket) {
        self.in_flight.remove(&ticket);
    }

    /// Cancels every outstanding request and timer.
    pub fn cancel_all(&mut self) {
        for (ticket, token) in &self.in_flight {
            tracing::info!(%ticket, "Cancelling in-flight request");
            token.cancel();
        }
    }

    fn track(&mut self, ticket: Ticket) -> CancellationToken {
        let token = CancellationToken::new();
        self.in_flight.insert(ticket, token.clone());
        token
    }

    fn run_one(&mut self, effect: Effect) {
        match effect {
            Effect::Generate { ticket, request } => {
                let token = self.track(ticket);
                let generator = Arc::clone(&self.generator);
                let tx = self.actions.clone();
                tokio::spawn(async move {
                    let outcome = tokio::select! {
                        _ = token.cancelled() => Err(SparkError::Cancelled),
                        result = generator.generate(request) => result,
                    };
                    let _ = tx.send(Action::GenerationFinished { ticket, outcome });
                });
            }
            Effect::AuthorizePayment { ticket, request } => {
                let token = self.track(ticket);
                let payments = Arc::clone(&self.payments);
                let tx = self.actions.clone();
                tokio::spawn(async move {
                    let outcome = tokio::select! {
                        _ = token.cancelled() => Err(SparkError::Cancelled),
                        result = payments.process(request) => Ok(result),
                    };
                    let _ = tx.send(Action::PaymentFinished { ticket, outcome });
                });
            }
            Effect::ScheduleCheckoutClose { ticket, delay } => {
                // Cancelling skips the remaining wait; the payment already went through.
                let token = self.track(ticket);
                let tx = self.actions.clone();
                tokio::spawn(async move {
                    tokio::select! {
                        _ = token.cancelled() => {}
                        _ = tokio::time::sleep(delay) => {}
                    }
                    let _ = tx.send(Action::CheckoutCloseElapsed { ticket });
                });
            }
            Effect::Cancel { ticket } => {
                if let Some(token) = self.in_flight.get(&ticket) {
                    token.cancel();
                }
            }
        }
    }
}

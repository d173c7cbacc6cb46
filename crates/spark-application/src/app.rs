//! Composition of state, reducer and runtime.

use std::sync::Arc;

use spark_core::generation::TextGenerator;
use spark_core::payment::PaymentProcessor;
use tokio::sync::mpsc;

use crate::action::Action;
use crate::reducer::reduce;
use crate::runtime::EffectRunner;
use crate::state::AppState;

/// Owns the application state and applies every action to it.
pub struct SparkApp {
    state: AppState,
    runner: EffectRunner,
    completions: mpsc::UnboundedReceiver<Action>,
}

impl SparkApp {
    pub fn new(
        state: AppState,
        generator: Arc<dyn TextGenerator>,
        payments: Arc<dyn PaymentProcessor>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state,
            runner: EffectRunner::new(generator, payments, tx),
            completions: rx,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn in_flight(&self) -> usize {
        self.runner.in_flight()
    }

    /// Reduces `action` and starts whatever effects it produced.
    pub fn dispatch(&mut self, action: Action) {
        if let Some(ticket) = action.ticket() {
            self.runner.finish(ticket);
        }
        let effects = reduce(&mut self.state, action);
        self.runner.run(effects);
    }

    /// Waits for the next continuation and applies it.
    ///
    /// Cancel-safe: if the future is dropped before a continuation arrives,
    /// nothing is lost.
    pub async fn settle(&mut self) -> bool {
        match self.completions.recv().await {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Applies continuations until nothing is outstanding.
    pub async fn run_until_idle(&mut self) {
        while self.state.is_busy() {
            if !self.settle().await {
                break;
            }
        }
    }

    pub fn cancel_in_flight(&mut self) {
        self.runner.cancel_all();
    }
}

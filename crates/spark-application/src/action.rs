//! Actions fed to the reducer and effects it asks the runtime to perform.

use std::time::Duration;

use spark_core::SparkError;
use spark_core::generation::{GenerationRequest, GenerationResponse};
use spark_core::membership::TierOffer;
use spark_core::payment::{PaymentRequest, PaymentResult};
use spark_core::view::View;

use crate::chat::ChatMode;

/// Identifies one asynchronous request so its continuation can be matched
/// (or discarded) when it comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(pub u64);

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out increasing tickets, starting at `#1`.
#[derive(Debug, Clone, Default)]
pub struct TicketIssuer {
    last: u64,
}

impl TicketIssuer {
    pub fn issue(&mut self) -> Ticket {
        self.last += 1;
        Ticket(self.last)
    }
}

/// Everything that can change [`crate::AppState`].
///
/// The first group are user intents; the second group are continuations
/// delivered by the [`crate::EffectRunner`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetView(View),
    LikeCurrent,
    PassCurrent,
    SetChatMode(ChatMode),
    SendChat(String),
    RunMatchmaking,
    RequestUpgrade(TierOffer),
    SubmitPayment,
    CloseCheckout,

    GenerationFinished {
        ticket: Ticket,
        outcome: Result<GenerationResponse, SparkError>,
    },
    PaymentFinished {
        ticket: Ticket,
        outcome: Result<PaymentResult, SparkError>,
    },
    CheckoutCloseElapsed {
        ticket: Ticket,
    },
}

impl Action {
    /// The request ticket a continuation belongs to.
    pub fn ticket(&self) -> Option<Ticket> {
        match self {
            Action::GenerationFinished { ticket, .. }
            | Action::PaymentFinished { ticket, .. }
            | Action::CheckoutCloseElapsed { ticket } => Some(*ticket),
            _ => None,
        }
    }
}

/// Side effects requested by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Generate {
        ticket: Ticket,
        request: GenerationRequest,
    },
    AuthorizePayment {
        ticket: Ticket,
        request: PaymentRequest,
    },
    ScheduleCheckoutClose {
        ticket: Ticket,
        delay: Duration,
    },
    Cancel {
        ticket: Ticket,
    },
}

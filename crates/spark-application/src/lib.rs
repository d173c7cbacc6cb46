//! Application layer: state, reducer, checkout flow and the effect runtime.

pub mod action;
pub mod app;
pub mod chat;
pub mod checkout;
pub mod matchmaking;
pub mod reducer;
pub mod runtime;
pub mod state;

pub use action::{Action, Effect, Ticket, TicketIssuer};
pub use app::SparkApp;
pub use chat::{ChatMode, ChatSession};
pub use checkout::{CHECKOUT_SUCCESS_DELAY, CheckoutSession, CheckoutStep};
pub use matchmaking::MatchmakingState;
pub use reducer::reduce;
pub use runtime::EffectRunner;
pub use state::{AppState, Conversation, ProfileDeck};

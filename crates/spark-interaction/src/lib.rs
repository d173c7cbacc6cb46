//! External collaborators: the Gemini agent, persona prompts and the
//! simulated payment processor.

pub mod gemini_api_agent;
pub mod personas;
pub mod simulated_payment;

pub use gemini_api_agent::GeminiApiAgent;
pub use personas::{COACH_PERSONA, MATCHMAKER_PERSONA, MOCK_DATE_PERSONA, Persona};
pub use simulated_payment::{SimulatedOutcome, SimulatedPaymentProcessor};

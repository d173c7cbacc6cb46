//! Checkout state machine.
//!
//! ```text
//! Details --submit--> Processing --approved--> Success --delay--> (closed, upgraded)
//!    ^                    |
//!    +------declined------+
//! ```

use std::time::Duration;

use spark_core::SparkError;
use spark_core::membership::TierOffer;
use spark_core::payment::{PaymentRequest, PaymentResult};

use crate::action::{Ticket, TicketIssuer};

/// How long the success overlay stays up before the upgrade is applied.
pub const CHECKOUT_SUCCESS_DELAY: Duration = Duration::from_millis(2500);

/// Error shown when the processor declines without a message.
pub const PAYMENT_FAILED_FALLBACK: &str = "Payment failed. Please try again.";

/// Error shown when an in-flight payment was cancelled.
pub const PAYMENT_CANCELLED: &str = "Payment was cancelled.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    /// Card form; initial state and the state after a decline.
    Details,
    /// Waiting for the payment processor.
    Processing,
    /// Approved; the overlay closes itself after [`CHECKOUT_SUCCESS_DELAY`].
    Success,
}

/// What a payment result did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentTransition {
    /// The result belonged to another request.
    Ignored,
    Approved,
    Declined,
}

/// A single checkout overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    offer: TierOffer,
    step: CheckoutStep,
    error: Option<String>,
    transaction_id: Option<String>,
    pending: Option<Ticket>,
}

impl CheckoutSession {
    pub fn open(offer: TierOffer) -> Self {
        Self {
            offer,
            step: CheckoutStep::Details,
            error: None,
            transaction_id: None,
            pending: None,
        }
    }

    pub fn offer(&self) -> &TierOffer {
        &self.offer
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }

    pub fn pending(&self) -> Option<Ticket> {
        self.pending
    }

    /// The overlay can be dismissed until the payment has been approved.
    pub fn can_close(&self) -> bool {
        self.step != CheckoutStep::Success
    }

    /// Moves `Details` to `Processing` and returns the payment request under
    /// a freshly issued ticket. Any other step ignores the submit without
    /// issuing a ticket.
    pub fn submit(&mut self, tickets: &mut TicketIssuer) -> Option<(Ticket, PaymentRequest)> {
        if self.step != CheckoutStep::Details {
            return None;
        }
        let ticket = tickets.issue();
        self.error = None;
        self.step = CheckoutStep::Processing;
        self.pending = Some(ticket);
        Some((
            ticket,
            PaymentRequest {
                tier_name: self.offer.tier.to_string(),
                price: self.offer.price.clone(),
            },
        ))
    }

    /// Applies the processor's answer for `ticket`.
    pub fn apply_payment(
        &mut self,
        ticket: Ticket,
        outcome: Result<PaymentResult, SparkError>,
    ) -> PaymentTransition {
        if self.step != CheckoutStep::Processing || self.pending != Some(ticket) {
            return PaymentTransition::Ignored;
        }
        self.pending = None;

        match outcome {
            Ok(result) if result.success => {
                self.step = CheckoutStep::Success;
                self.transaction_id = result.transaction_id;
                PaymentTransition::Approved
            }
            Ok(result) => {
                self.step = CheckoutStep::Details;
                self.error = Some(
                    result
                        .error
                        .filter(|e| !e.trim().is_empty())
                        .unwrap_or_else(|| PAYMENT_FAILED_FALLBACK.to_string()),
                );
                PaymentTransition::Declined
            }
            Err(SparkError::Cancelled) => {
                self.step = CheckoutStep::Details;
                self.error = Some(PAYMENT_CANCELLED.to_string());
                PaymentTransition::Declined
            }
            Err(err) => {
                tracing::warn!(%ticket, error = %err, "Payment request failed");
                self.step = CheckoutStep::Details;
                self.error = Some(PAYMENT_FAILED_FALLBACK.to_string());
                PaymentTransition::Declined
            }
        }
    }

    /// Records the timer that will close the success overlay.
    pub fn await_close(&mut self, ticket: Ticket) {
        if self.step == CheckoutStep::Success {
            self.pending = Some(ticket);
        }
    }

    /// Whether `ticket` is the close timer of an approved session.
    pub fn is_close_due(&self, ticket: Ticket) -> bool {
        self.step == CheckoutStep::Success && self.pending == Some(ticket)
    }
}

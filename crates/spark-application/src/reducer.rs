//! Pure state transitions.
//!
//! `reduce` never performs IO. Anything asynchronous is returned as an
//! [`Effect`] for the runtime, whose continuation comes back as another
//! [`Action`].

use spark_core::message::Message;

use crate::action::{Action, Effect};
use crate::checkout::{CHECKOUT_SUCCESS_DELAY, CheckoutSession, PaymentTransition};
use crate::matchmaking::analysis_request;
use crate::state::{AppState, Conversation};

pub fn reduce(state: &mut AppState, action: Action) -> Vec<Effect> {
    match action {
        Action::SetView(view) => {
            state.view = view;
            Vec::new()
        }
        Action::LikeCurrent => {
            if let Some(profile) = state.deck.current().cloned() {
                if !state.has_match(&profile.id) {
                    tracing::info!(profile = %profile.id, "New match");
                    let greeting = Message::from_ai(format!(
                        "You and {} liked each other. Say hi!",
                        profile.name
                    ));
                    state.conversations.push(Conversation {
                        participant: profile,
                        messages: vec![greeting],
                    });
                }
                state.deck.advance();
            }
            Vec::new()
        }
        Action::PassCurrent => {
            state.deck.advance();
            Vec::new()
        }
        Action::SetChatMode(mode) => state
            .chat
            .switch_mode(mode)
            .into_iter()
            .map(|ticket| Effect::Cancel { ticket })
            .collect(),
        Action::SendChat(text) => match state.chat.begin_turn(&text, &mut state.tickets) {
            Some((ticket, request)) => vec![Effect::Generate { ticket, request }],
            None => Vec::new(),
        },
        Action::RunMatchmaking => {
            let candidates = state.deck.profiles().to_vec();
            match analysis_request(&state.current_user, &candidates) {
                Ok(request) => {
                    let ticket = state.issue_ticket();
                    state.matchmaking.begin(ticket);
                    vec![Effect::Generate { ticket, request }]
                }
                Err(err) => {
                    tracing::error!(error = %err, "Failed to build matchmaking prompt");
                    state.matchmaking.fail_to_start();
                    Vec::new()
                }
            }
        }
        Action::RequestUpgrade(offer) => {
            if state.checkout.is_none() {
                tracing::info!(tier = %offer.tier, "Opening checkout");
                state.checkout = Some(CheckoutSession::open(offer));
            }
            Vec::new()
        }
        Action::SubmitPayment => {
            let tickets = &mut state.tickets;
            match state
                .checkout
                .as_mut()
                .and_then(|session| session.submit(tickets))
            {
                Some((ticket, request)) => vec![Effect::AuthorizePayment { ticket, request }],
                None => Vec::new(),
            }
        }
        Action::CloseCheckout => match state.checkout.take() {
            Some(session) if session.can_close() => session
                .pending()
                .map(|ticket| Effect::Cancel { ticket })
                .into_iter()
                .collect(),
            other => {
                state.checkout = other;
                Vec::new()
            }
        },
        Action::GenerationFinished { ticket, outcome } => {
            if state.matchmaking.finish(ticket, outcome.clone()) {
                return Vec::new();
            }
            if !state.chat.finish_turn(ticket, outcome) {
                tracing::debug!(%ticket, "Dropping stale generation result");
            }
            Vec::new()
        }
        Action::PaymentFinished { ticket, outcome } => {
            let Some(session) = state.checkout.as_mut() else {
                tracing::debug!(%ticket, "Payment finished after checkout closed");
                return Vec::new();
            };
            match session.apply_payment(ticket, outcome) {
                PaymentTransition::Approved => {
                    let close_ticket = state.issue_ticket();
                    if let Some(session) = state.checkout.as_mut() {
                        session.await_close(close_ticket);
                    }
                    vec![Effect::ScheduleCheckoutClose {
                        ticket: close_ticket,
                        delay: CHECKOUT_SUCCESS_DELAY,
                    }]
                }
                PaymentTransition::Declined | PaymentTransition::Ignored => Vec::new(),
            }
        }
        Action::CheckoutCloseElapsed { ticket } => {
            let due = state
                .checkout
                .as_ref()
                .is_some_and(|session| session.is_close_due(ticket));
            if due {
                if let Some(session) = state.checkout.take() {
                    tracing::info!(
                        tier = %session.offer().tier,
                        transaction_id = session.transaction_id().unwrap_or_default(),
                        "Membership upgraded"
                    );
                    state.current_user.is_premium = true;
                    state.membership = session.offer().tier;
                }
            }
            Vec::new()
        }
    }
}

//! The single owned application state.

use spark_core::membership::MembershipTier;
use spark_core::message::Message;
use spark_core::profile::{UserProfile, current_user, mock_candidates};
use spark_core::view::View;

use crate::action::{Ticket, TicketIssuer};
use crate::chat::ChatSession;
use crate::checkout::{CheckoutSession, CheckoutStep};
use crate::matchmaking::MatchmakingState;

/// Dashboard browser: one candidate at a time.
#[derive(Debug, Clone, Default)]
pub struct ProfileDeck {
    profiles: Vec<UserProfile>,
    position: usize,
}

impl ProfileDeck {
    pub fn new(profiles: Vec<UserProfile>) -> Self {
        Self {
            profiles,
            position: 0,
        }
    }

    pub fn profiles(&self) -> &[UserProfile] {
        &self.profiles
    }

    /// The profile on top of the deck, or `None` once everyone was seen.
    pub fn current(&self) -> Option<&UserProfile> {
        self.profiles.get(self.position)
    }

    /// Zero-based index of the current card.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn advance(&mut self) {
        if self.position < self.profiles.len() {
            self.position += 1;
        }
    }
}

/// A match created by liking a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub participant: UserProfile,
    pub messages: Vec<Message>,
}

/// Everything the screens render from.
#[derive(Debug, Clone)]
pub struct AppState {
    pub view: View,
    pub current_user: UserProfile,
    pub membership: MembershipTier,
    pub deck: ProfileDeck,
    pub conversations: Vec<Conversation>,
    pub chat: ChatSession,
    pub matchmaking: MatchmakingState,
    /// At most one checkout overlay exists at a time.
    pub checkout: Option<CheckoutSession>,
    pub tickets: TicketIssuer,
}

impl AppState {
    /// State at startup: landing screen, mock catalog, free membership.
    pub fn new() -> Self {
        Self::with_profiles(current_user(), mock_candidates())
    }

    pub fn with_profiles(current_user: UserProfile, candidates: Vec<UserProfile>) -> Self {
        let membership = if current_user.is_premium {
            MembershipTier::SparkPlus
        } else {
            MembershipTier::Free
        };
        Self {
            view: View::default(),
            current_user,
            membership,
            deck: ProfileDeck::new(candidates),
            conversations: Vec::new(),
            chat: ChatSession::new(),
            matchmaking: MatchmakingState::default(),
            checkout: None,
            tickets: TicketIssuer::default(),
        }
    }

    /// Hands out a fresh request ticket.
    pub fn issue_ticket(&mut self) -> Ticket {
        self.tickets.issue()
    }

    /// Whether some request or timer is still outstanding.
    pub fn is_busy(&self) -> bool {
        self.chat.is_loading()
            || self.matchmaking.is_loading()
            || self.checkout.as_ref().is_some_and(|session| {
                matches!(
                    session.step(),
                    CheckoutStep::Processing | CheckoutStep::Success
                )
            })
    }

    pub fn has_match(&self, profile_id: &str) -> bool {
        self.conversations
            .iter()
            .any(|c| c.participant.id == profile_id)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

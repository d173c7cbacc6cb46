//! Chat/advice session state.

use serde::{Deserialize, Serialize};
use spark_core::SparkError;
use spark_core::generation::{
    GenerationRequest, GenerationResponse, GroundingCitation, HistoryTurn, TurnRole,
};
use spark_core::message::{Message, Sender};
use spark_interaction::{COACH_PERSONA, MOCK_DATE_PERSONA, Persona};

use crate::action::{Ticket, TicketIssuer};

/// Which persona answers chat turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChatMode {
    /// Spark, the search-grounded dating coach.
    #[default]
    Advice,
    /// Maya, the simulated date partner.
    MockDate,
}

impl ChatMode {
    pub fn persona(self) -> &'static Persona {
        match self {
            ChatMode::Advice => &COACH_PERSONA,
            ChatMode::MockDate => &MOCK_DATE_PERSONA,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChatMode::Advice => "Advice",
            ChatMode::MockDate => "Mock Date",
        }
    }
}

/// Append-only conversation with the AI coach.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    mode: ChatMode,
    messages: Vec<Message>,
    citations: Vec<GroundingCitation>,
    pending: Vec<Ticket>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ChatMode {
        self.mode
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Sources the latest advice reply was grounded on.
    pub fn citations(&self) -> &[GroundingCitation] {
        &self.citations
    }

    pub fn is_loading(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Switches persona. Changing to a different mode clears the history and
    /// citations and returns the tickets of abandoned in-flight turns.
    /// Selecting the current mode changes nothing.
    pub fn switch_mode(&mut self, mode: ChatMode) -> Vec<Ticket> {
        if mode == self.mode {
            return Vec::new();
        }
        self.mode = mode;
        self.messages.clear();
        self.citations.clear();
        std::mem::take(&mut self.pending)
    }

    /// Appends the user's message and returns the request to send under a
    /// freshly issued ticket.
    ///
    /// Returns `None` for blank input; no message is added and no ticket is
    /// issued.
    pub fn begin_turn(
        &mut self,
        text: &str,
        tickets: &mut TicketIssuer,
    ) -> Option<(Ticket, GenerationRequest)> {
        if text.trim().is_empty() {
            return None;
        }
        let ticket = tickets.issue();

        let history = match self.mode {
            ChatMode::Advice => Vec::new(),
            ChatMode::MockDate => self.history(),
        };

        self.messages.push(Message::from_me(text));
        self.pending.push(ticket);
        Some((
            ticket,
            self.mode.persona().request(text).with_history(history),
        ))
    }

    /// Applies a generation result. Returns `false` when the ticket is not
    /// pending (stale or abandoned), in which case nothing changes.
    pub fn finish_turn(
        &mut self,
        ticket: Ticket,
        outcome: Result<GenerationResponse, SparkError>,
    ) -> bool {
        let Some(index) = self.pending.iter().position(|t| *t == ticket) else {
            return false;
        };
        self.pending.remove(index);

        let persona = self.mode.persona();
        match outcome {
            Ok(response) => {
                self.messages
                    .push(Message::from_ai(response.text_or(persona.empty_reply)));
                if self.mode == ChatMode::Advice {
                    self.citations = response.citations;
                }
            }
            Err(SparkError::Cancelled) => {
                tracing::info!(%ticket, "Chat turn cancelled");
            }
            Err(err) => {
                tracing::warn!(%ticket, error = %err, persona = persona.name, "Chat turn failed");
                self.messages.push(Message::from_ai(persona.failure_reply));
                self.citations.clear();
            }
        }
        true
    }

    fn history(&self) -> Vec<HistoryTurn> {
        self.messages
            .iter()
            .map(|message| HistoryTurn {
                role: match message.sender {
                    Sender::Me => TurnRole::User,
                    Sender::Ai => TurnRole::Model,
                },
                text: message.text.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_is_ignored() {
        let mut chat = ChatSession::new();
        let mut tickets = TicketIssuer::default();
        assert!(chat.begin_turn("", &mut tickets).is_none());
        assert!(chat.begin_turn("   \t\n", &mut tickets).is_none());
        assert!(chat.messages().is_empty());
        assert!(!chat.is_loading());
        assert_eq!(tickets.issue(), Ticket(1));
    }

    #[test]
    fn test_advice_turn_appends_me_then_ai() {
        let mut chat = ChatSession::new();
        let mut tickets = TicketIssuer::default();
        let (ticket, request) = chat
            .begin_turn("How do I start a conversation?", &mut tickets)
            .unwrap();
        assert_eq!(ticket, Ticket(1));
        assert!(request.web_search);
        assert!(chat.is_loading());

        let response = GenerationResponse {
            text: Some("Ask about their weekend.".into()),
            citations: vec![GroundingCitation {
                title: "Openers".into(),
                uri: "https://example.com/openers".into(),
            }],
        };
        assert!(chat.finish_turn(Ticket(1), Ok(response)));

        let messages = chat.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, Sender::Me);
        assert_eq!(messages[0].text, "How do I start a conversation?");
        assert_eq!(messages[1].sender, Sender::Ai);
        assert!(messages[1].is_ai);
        assert_eq!(chat.citations().len(), 1);
        assert!(!chat.is_loading());
    }

    #[test]
    fn test_failure_appends_fallback() {
        let mut chat = ChatSession::new();
        let mut tickets = TicketIssuer::default();
        chat.begin_turn("hi", &mut tickets).unwrap();
        chat.finish_turn(Ticket(1), Err(SparkError::generation("boom")));
        assert_eq!(
            chat.messages()[1].text,
            "Error connecting to Spark AI Coach."
        );
    }

    #[test]
    fn test_empty_reply_uses_persona_fallback() {
        let mut chat = ChatSession::new();
        let mut tickets = TicketIssuer::default();
        chat.switch_mode(ChatMode::MockDate);
        chat.begin_turn("hi", &mut tickets).unwrap();
        chat.finish_turn(Ticket(1), Ok(GenerationResponse::default()));
        assert_eq!(chat.messages()[1].text, "Maya is lost for words...");
    }

    #[test]
    fn test_cancelled_turn_appends_nothing() {
        let mut chat = ChatSession::new();
        let mut tickets = TicketIssuer::default();
        chat.begin_turn("hi", &mut tickets).unwrap();
        assert!(chat.finish_turn(Ticket(1), Err(SparkError::Cancelled)));
        assert_eq!(chat.messages().len(), 1);
        assert!(!chat.is_loading());
    }

    #[test]
    fn test_stale_ticket_is_dropped() {
        let mut chat = ChatSession::new();
        let mut tickets = TicketIssuer::default();
        chat.begin_turn("hi", &mut tickets).unwrap();
        assert!(!chat.finish_turn(Ticket(9), Ok(GenerationResponse::text("late"))));
        assert_eq!(chat.messages().len(), 1);
        assert!(chat.is_loading());
    }

    #[test]
    fn test_switching_mode_clears_history_and_pending() {
        let mut chat = ChatSession::new();
        let mut tickets = TicketIssuer::default();
        chat.begin_turn("hi", &mut tickets).unwrap();

        let abandoned = chat.switch_mode(ChatMode::MockDate);
        assert_eq!(abandoned, vec![Ticket(1)]);
        assert!(chat.messages().is_empty());
        assert!(!chat.is_loading());
        assert_eq!(chat.mode(), ChatMode::MockDate);
    }

    #[test]
    fn test_selecting_current_mode_keeps_history() {
        let mut chat = ChatSession::new();
        let mut tickets = TicketIssuer::default();
        chat.begin_turn("hi", &mut tickets).unwrap();
        assert!(chat.switch_mode(ChatMode::Advice).is_empty());
        assert_eq!(chat.messages().len(), 1);
        assert!(chat.is_loading());
    }

    #[test]
    fn test_mock_date_sends_prior_turns() {
        let mut chat = ChatSession::new();
        let mut tickets = TicketIssuer::default();
        chat.switch_mode(ChatMode::MockDate);
        chat.begin_turn("Hi Maya", &mut tickets).unwrap();
        chat.finish_turn(Ticket(1), Ok(GenerationResponse::text("Hey you!")));

        let (ticket, request) = chat.begin_turn("Tea or coffee?", &mut tickets).unwrap();
        assert_eq!(ticket, Ticket(2));
        assert_eq!(request.history.len(), 2);
        assert_eq!(request.history[0].role, TurnRole::User);
        assert_eq!(request.history[1].text, "Hey you!");
        assert_eq!(request.prompt, "Tea or coffee?");
        assert_eq!(request.thinking_budget, Some(100));
    }
}

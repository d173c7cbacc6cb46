//! Parsing of REPL input lines.

use std::str::FromStr;

use spark_application::{Action, AppState, ChatMode};
use spark_core::membership::{MembershipTier, TierOffer};
use spark_core::view::View;
use thiserror::Error;

/// Slash commands offered for completion, in help order.
pub const COMMANDS: &[&str] = &[
    "/view", "/home", "/explore", "/coach", "/match", "/profile", "/messages", "/admin", "/like",
    "/pass", "/mode", "/analyze", "/upgrade", "/pay", "/close", "/help", "/quit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    View(View),
    Like,
    Pass,
    Mode(ChatMode),
    Analyze,
    Upgrade(MembershipTier),
    Pay,
    Close,
    Help,
    Quit,
    /// Free text typed without a leading slash.
    Say(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("{command} needs an argument: {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("Invalid argument for {command}: {value}")]
    InvalidArgument {
        command: &'static str,
        value: String,
    },
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let trimmed = line.trim();
        if !trimmed.starts_with('/') {
            // The literal input is kept; blank text is filtered by the chat session.
            return Ok(Command::Say(line.to_string()));
        }

        let mut parts = trimmed.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        match name {
            "/view" => {
                let id = arg.ok_or(ParseError::MissingArgument {
                    command: "/view",
                    expected: "a screen id such as ai-coach",
                })?;
                View::from_str(id)
                    .map(Command::View)
                    .map_err(|_| ParseError::InvalidArgument {
                        command: "/view",
                        value: id.to_string(),
                    })
            }
            "/home" => Ok(Command::View(View::Landing)),
            "/explore" => Ok(Command::View(View::Dashboard)),
            "/coach" => Ok(Command::View(View::AiCoach)),
            "/match" => Ok(Command::View(View::Matchmaking)),
            "/profile" => Ok(Command::View(View::Profile)),
            "/messages" => Ok(Command::View(View::Messages)),
            "/admin" => Ok(Command::View(View::Admin)),
            "/like" => Ok(Command::Like),
            "/pass" => Ok(Command::Pass),
            "/mode" => match arg {
                Some("advice") => Ok(Command::Mode(ChatMode::Advice)),
                Some("date") | Some("mock-date") => Ok(Command::Mode(ChatMode::MockDate)),
                Some(other) => Err(ParseError::InvalidArgument {
                    command: "/mode",
                    value: other.to_string(),
                }),
                None => Err(ParseError::MissingArgument {
                    command: "/mode",
                    expected: "advice or date",
                }),
            },
            "/analyze" => Ok(Command::Analyze),
            "/upgrade" => match arg {
                Some("plus") => Ok(Command::Upgrade(MembershipTier::SparkPlus)),
                Some("gold") => Ok(Command::Upgrade(MembershipTier::SparkGold)),
                Some(other) => Err(ParseError::InvalidArgument {
                    command: "/upgrade",
                    value: other.to_string(),
                }),
                None => Err(ParseError::MissingArgument {
                    command: "/upgrade",
                    expected: "plus or gold",
                }),
            },
            "/pay" => Ok(Command::Pay),
            "/close" => Ok(Command::Close),
            "/help" => Ok(Command::Help),
            "/quit" | "/exit" => Ok(Command::Quit),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

impl Command {
    /// Actions this command dispatches against `state`.
    ///
    /// `Help` and `Quit` are handled by the REPL and map to nothing. An `Err`
    /// carries a hint for the user.
    pub fn into_actions(self, state: &AppState) -> Result<Vec<Action>, String> {
        match self {
            Command::View(view) => Ok(vec![Action::SetView(view)]),
            Command::Like | Command::Pass if state.view != View::Dashboard => {
                Err("Open the dashboard with /explore first.".into())
            }
            Command::Like => Ok(vec![Action::LikeCurrent]),
            Command::Pass => Ok(vec![Action::PassCurrent]),
            Command::Mode(mode) => Ok(vec![
                Action::SetView(View::AiCoach),
                Action::SetChatMode(mode),
            ]),
            Command::Analyze => Ok(vec![
                Action::SetView(View::Matchmaking),
                Action::RunMatchmaking,
            ]),
            Command::Upgrade(tier) => {
                let offer = TierOffer::for_tier(tier)
                    .ok_or_else(|| format!("{tier} cannot be purchased."))?;
                Ok(vec![
                    Action::SetView(View::Profile),
                    Action::RequestUpgrade(offer),
                ])
            }
            Command::Pay | Command::Close if state.checkout.is_none() => {
                Err("No checkout in progress. Use /upgrade plus or /upgrade gold.".into())
            }
            Command::Pay => Ok(vec![Action::SubmitPayment]),
            Command::Close => Ok(vec![Action::CloseCheckout]),
            Command::Say(text) if state.view == View::AiCoach => Ok(vec![Action::SendChat(text)]),
            Command::Say(_) => Err(
                "Unknown input. Chat is available on the AI coach screen (/coach); type /help for commands."
                    .into(),
            ),
            Command::Help | Command::Quit => Ok(Vec::new()),
        }
    }
}

/// Usage text printed by `/help`.
pub fn help_text() -> &'static str {
    "\
/view <id>          Switch screen (landing, dashboard, ai-coach, matchmaking, profile, messages, admin)
/home /explore /coach /match /profile /messages /admin
                    Shortcuts for /view
/like, /pass        Like or skip the profile on the dashboard
/mode advice|date   Switch the coach between advice and mock-date practice
/analyze            Run the AI matchmaking analysis
/upgrade plus|gold  Open checkout for a membership tier
/pay                Submit the payment form
/close              Close the checkout overlay
/help               Show this help
/quit               Exit
Anything else typed on the AI coach screen is sent as a chat message.
Press Ctrl-C while a request is running to cancel it."
}

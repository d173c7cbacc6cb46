//! Screen identifiers.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// One of the seven mutually exclusive screens.
///
/// The string form is the kebab-case identifier (`ai-coach`, `matchmaking`, ...)
/// used by the `/view` command.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum View {
    #[default]
    Landing,
    Dashboard,
    AiCoach,
    Matchmaking,
    Profile,
    Messages,
    Admin,
}

impl View {
    /// Entries shown in the navigation bar, in display order.
    pub const NAV_ITEMS: [(&'static str, View); 4] = [
        ("Explore", View::Dashboard),
        ("Matchmaking", View::Matchmaking),
        ("AI Coach", View::AiCoach),
        ("Messages", View::Messages),
    ];

    /// Whether the navigation bar is drawn above this screen.
    pub fn shows_navbar(self) -> bool {
        self != View::Landing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_identifiers_round_trip() {
        for view in View::iter() {
            assert_eq!(View::from_str(view.as_ref()).unwrap(), view);
        }
        assert_eq!(View::AiCoach.to_string(), "ai-coach");
    }

    #[test]
    fn test_unknown_identifier_rejected() {
        assert!(View::from_str("settings").is_err());
    }

    #[test]
    fn test_closed_set_has_seven_screens() {
        assert_eq!(View::iter().count(), 7);
        assert_eq!(View::default(), View::Landing);
        assert!(!View::Landing.shows_navbar());
        assert!(View::Admin.shows_navbar());
    }
}

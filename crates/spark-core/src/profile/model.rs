//! UserProfile domain model.

use serde::{Deserialize, Serialize};

/// A dating profile.
///
/// Profiles are immutable mock records; the only field that ever changes at
/// runtime is the current user's premium flag after a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub bio: String,
    /// Ordered interest tags, most prominent first.
    pub interests: Vec<String>,
    pub location: String,
    pub image_url: String,
    pub is_premium: bool,
    /// Compatibility with the current user, 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<u8>,
}

impl UserProfile {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        age: u8,
        bio: impl Into<String>,
        interests: &[&str],
        location: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
            bio: bio.into(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            location: location.into(),
            image_url: image_url.into(),
            is_premium: false,
            match_score: None,
        }
    }

    pub fn premium(mut self, is_premium: bool) -> Self {
        self.is_premium = is_premium;
        self
    }

    /// Sets the match score, clamped to 100.
    pub fn with_match_score(mut self, score: u8) -> Self {
        self.match_score = Some(score.min(100));
        self
    }

    /// The first `n` interests, as shown on a profile card.
    pub fn top_interests(&self, n: usize) -> &[String] {
        &self.interests[..self.interests.len().min(n)]
    }

    /// One-line description used when building matchmaking prompts.
    pub fn summary(&self) -> String {
        format!(
            "{}, {}, {}. Interests: {}. Bio: {}",
            self.name,
            self.age,
            self.location,
            self.interests.join(", "),
            self.bio
        )
    }
}

use super::UserProfile;

/// Identifier of the signed-in user; also the sender id of outgoing messages.
pub const CURRENT_USER_ID: &str = "me";

/// Candidate profiles shown on the dashboard, highest match score first.
pub fn mock_candidates() -> Vec<UserProfile> {
    vec![
        UserProfile::new(
            "1",
            "Sarah",
            26,
            "Avid hiker and coffee enthusiast. Looking for someone to share sunrise adventures with.",
            &["Hiking", "Coffee", "Photography", "Travel"],
            "San Francisco, CA",
            "https://picsum.photos/seed/sarah/400/500",
        )
        .with_match_score(94),
        UserProfile::new(
            "2",
            "James",
            30,
            "Software engineer by day, jazz pianist by night. Let's talk about tech or tunes.",
            &["Jazz", "Coding", "Cooking", "Wine"],
            "Brooklyn, NY",
            "https://picsum.photos/seed/james/400/500",
        )
        .premium(true)
        .with_match_score(88),
        UserProfile::new(
            "3",
            "Elena",
            28,
            "Art historian with a love for street food and indie cinema.",
            &["Art", "Movies", "Street Food", "Reading"],
            "Chicago, IL",
            "https://picsum.photos/seed/elena/400/500",
        )
        .with_match_score(82),
        UserProfile::new(
            "4",
            "David",
            32,
            "Fitness coach who loves dogs and beach volleyball. Always up for a challenge.",
            &["Fitness", "Dogs", "Sports", "Beaches"],
            "Austin, TX",
            "https://picsum.photos/seed/david/400/500",
        )
        .premium(true)
        .with_match_score(75),
    ]
}

/// The signed-in user at startup.
pub fn current_user() -> UserProfile {
    UserProfile::new(
        CURRENT_USER_ID,
        "Alex",
        29,
        "Explorer of life, lover of puzzles and deep conversations.",
        &["Gaming", "Puzzles", "Philosophy", "Nature"],
        "Seattle, WA",
        "https://picsum.photos/seed/me/400/400",
    )
}

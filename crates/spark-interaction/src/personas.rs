//! Persona prompts sent as system instructions.

use spark_core::generation::GenerationRequest;

/// A fixed persona for the text-generation collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Persona {
    pub name: &'static str,
    pub system_instruction: &'static str,
    /// Whether requests enable the search-grounding tool.
    pub web_search: bool,
    pub thinking_budget: Option<u32>,
    /// Shown when the model returns no text.
    pub empty_reply: &'static str,
    /// Shown when the call fails.
    pub failure_reply: &'static str,
}

impl Persona {
    /// Builds a request for `prompt` carrying this persona's settings.
    pub fn request(&self, prompt: impl Into<String>) -> GenerationRequest {
        GenerationRequest::new(self.system_instruction, prompt)
            .with_web_search(self.web_search)
            .with_thinking_budget(self.thinking_budget)
    }
}

/// Spark: the dating coach, grounded on web search.
pub static COACH_PERSONA: Persona = Persona {
    name: "Spark",
    system_instruction: "You are a professional dating coach named Spark. Provide empathetic, modern, and practical dating advice. Use Google Search to find current trends and psychological insights. Always stay positive and encouraging.",
    web_search: true,
    thinking_budget: None,
    empty_reply: "I'm having trouble thinking of advice right now. Try again later!",
    failure_reply: "Error connecting to Spark AI Coach.",
};

/// Maya: the simulated first-date partner.
pub static MOCK_DATE_PERSONA: Persona = Persona {
    name: "Maya",
    system_instruction: "You are practicing a mock date with the user. You are a 28-year-old creative designer named Maya. You are friendly, slightly witty, and enjoy talking about travel, food, and art. Respond as if we are on a first date at a cozy cafe. Keep the conversation flowing and occasionally ask follow-up questions.",
    web_search: false,
    thinking_budget: Some(100),
    empty_reply: "Maya is lost for words...",
    failure_reply: "The mock date was interrupted by a technical glitch.",
};

/// The matchmaker used for one-shot compatibility analysis.
pub static MATCHMAKER_PERSONA: Persona = Persona {
    name: "Matchmaker",
    system_instruction: "You are a high-end matchmaker. Analyze interests, values, and personality traits to find the best match.",
    web_search: false,
    thinking_budget: None,
    empty_reply: "Analysis complete. You have some great options!",
    failure_reply: "Matchmaking AI is recalibrating...",
};

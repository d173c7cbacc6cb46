//! One-shot matchmaking analysis.

use minijinja::{Environment, context};
use spark_core::SparkError;
use spark_core::error::Result;
use spark_core::generation::{GenerationRequest, GenerationResponse};
use spark_core::profile::UserProfile;
use spark_interaction::MATCHMAKER_PERSONA;

use crate::action::Ticket;

const ANALYSIS_TEMPLATE: &str = r#"Analyze compatibility between this user: {{ user }}
and these potential matches:
{% for candidate in candidates -%}
{{ loop.index }}. {{ candidate }}
{% endfor -%}
Provide a brief summary of why the top match is the best choice."#;

/// Renders the analysis prompt for `user` against `candidates`.
pub fn build_analysis_prompt(user: &UserProfile, candidates: &[UserProfile]) -> Result<String> {
    let summaries: Vec<String> = candidates.iter().map(UserProfile::summary).collect();
    Environment::new()
        .render_str(
            ANALYSIS_TEMPLATE,
            context! { user => user.summary(), candidates => summaries },
        )
        .map_err(|err| SparkError::Template(err.to_string()))
}

/// Builds the matchmaker request. No history is sent.
pub fn analysis_request(
    user: &UserProfile,
    candidates: &[UserProfile],
) -> Result<GenerationRequest> {
    Ok(MATCHMAKER_PERSONA.request(build_analysis_prompt(user, candidates)?))
}

/// Latest analysis and in-flight requests.
#[derive(Debug, Clone, Default)]
pub struct MatchmakingState {
    analysis: Option<String>,
    pending: Vec<Ticket>,
}

impl MatchmakingState {
    pub fn analysis(&self) -> Option<&str> {
        self.analysis.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn begin(&mut self, ticket: Ticket) {
        self.pending.push(ticket);
    }

    /// Records a failure that happened before any request was sent.
    pub fn fail_to_start(&mut self) {
        self.analysis = Some(MATCHMAKER_PERSONA.failure_reply.to_string());
    }

    /// Applies a result. Returns `false` for unknown tickets.
    pub fn finish(&mut self, ticket: Ticket, outcome: Result<GenerationResponse>) -> bool {
        let Some(index) = self.pending.iter().position(|t| *t == ticket) else {
            return false;
        };
        self.pending.remove(index);

        match outcome {
            Ok(response) => {
                self.analysis = Some(response.text_or(MATCHMAKER_PERSONA.empty_reply));
            }
            Err(SparkError::Cancelled) => {}
            Err(err) => {
                tracing::warn!(%ticket, error = %err, "Matchmaking analysis failed");
                self.analysis = Some(MATCHMAKER_PERSONA.failure_reply.to_string());
            }
        }
        true
    }
}

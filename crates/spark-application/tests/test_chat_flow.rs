mod support;

use std::sync::Arc;
use std::time::Duration;

use spark_application::{Action, AppState, ChatMode, SparkApp};
use spark_core::SparkError;
use spark_core::generation::{GenerationResponse, GroundingCitation};
use spark_core::message::Sender;
use spark_interaction::SimulatedPaymentProcessor;
use support::ScriptedGenerator;

fn app_with(generator: Arc<ScriptedGenerator>) -> SparkApp {
    SparkApp::new(
        AppState::new(),
        generator,
        Arc::new(SimulatedPaymentProcessor::new()),
    )
}

#[tokio::test]
async fn test_blank_input_never_reaches_generator() {
    let generator = Arc::new(ScriptedGenerator::new(vec![]));
    let mut app = app_with(Arc::clone(&generator));

    app.dispatch(Action::SendChat(String::new()));
    app.dispatch(Action::SendChat("   ".into()));

    assert!(app.state().chat.messages().is_empty());
    assert!(!app.state().is_busy());
    assert_eq!(app.in_flight(), 0);
    tokio::task::yield_now().await;
    assert!(generator.requests().is_empty());
}

#[tokio::test]
async fn test_advice_query_appends_two_messages() {
    let generator = Arc::new(ScriptedGenerator::new(vec![Ok(GenerationResponse {
        text: Some("Open with something you noticed in their profile.".into()),
        citations: vec![GroundingCitation {
            title: "Conversation starters".into(),
            uri: "https://example.com/starters".into(),
        }],
    })]));
    let mut app = app_with(Arc::clone(&generator));

    app.dispatch(Action::SendChat("How do I start a conversation?".into()));
    app.run_until_idle().await;

    let messages = app.state().chat.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].sender, Sender::Me);
    assert_eq!(messages[0].text, "How do I start a conversation?");
    assert_eq!(messages[1].sender, Sender::Ai);
    assert!(messages[1].is_ai);
    assert_eq!(app.state().chat.citations().len(), 1);

    let requests = generator.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].web_search);
}

#[tokio::test]
async fn test_generator_failure_becomes_fallback_message() {
    let generator = Arc::new(ScriptedGenerator::new(vec![Err(SparkError::generation(
        "connection reset",
    ))]));
    let mut app = app_with(generator);

    app.dispatch(Action::SendChat("Hello?".into()));
    app.run_until_idle().await;

    let messages = app.state().chat.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].text, "Error connecting to Spark AI Coach.");
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_turn_clears_loading() {
    let generator = Arc::new(
        ScriptedGenerator::new(vec![Ok(GenerationResponse::text("too late"))])
            .with_delay(Duration::from_secs(30)),
    );
    let mut app = app_with(generator);

    app.dispatch(Action::SendChat("Are you there?".into()));
    assert!(app.state().chat.is_loading());

    app.cancel_in_flight();
    app.run_until_idle().await;

    assert!(!app.state().chat.is_loading());
    assert_eq!(app.state().chat.messages().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_mode_switch_drops_in_flight_reply() {
    let generator = Arc::new(
        ScriptedGenerator::new(vec![Ok(GenerationResponse::text("advice"))])
            .with_delay(Duration::from_secs(1)),
    );
    let mut app = app_with(generator);

    app.dispatch(Action::SendChat("Any tips?".into()));
    app.dispatch(Action::SetChatMode(ChatMode::MockDate));
    assert!(!app.state().is_busy());

    assert!(app.settle().await);
    assert!(app.state().chat.messages().is_empty());
    assert_eq!(app.in_flight(), 0);
}

#[tokio::test]
async fn test_matchmaking_analysis_is_one_shot() {
    let generator = Arc::new(ScriptedGenerator::new(vec![Ok(GenerationResponse::text(
        "Sarah shares your love of nature.",
    ))]));
    let mut app = app_with(Arc::clone(&generator));

    app.dispatch(Action::RunMatchmaking);
    assert!(app.state().matchmaking.is_loading());
    app.run_until_idle().await;

    assert_eq!(
        app.state().matchmaking.analysis(),
        Some("Sarah shares your love of nature.")
    );
    let requests = generator.requests();
    assert!(requests[0].history.is_empty());
    assert!(requests[0].prompt.contains("Sarah"));
}

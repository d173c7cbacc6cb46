mod support;

use std::sync::Arc;
use std::time::Duration;

use spark_application::{Action, AppState, CHECKOUT_SUCCESS_DELAY, CheckoutStep, SparkApp};
use spark_core::membership::{MembershipTier, TierOffer};
use spark_interaction::simulated_payment::SIMULATED_PAYMENT_DELAY;
use spark_interaction::{SimulatedOutcome, SimulatedPaymentProcessor};
use support::ScriptedGenerator;
use tokio::time::{Instant, timeout};

fn app_with(processor: SimulatedPaymentProcessor) -> SparkApp {
    SparkApp::new(
        AppState::new(),
        Arc::new(ScriptedGenerator::new(vec![])),
        Arc::new(processor),
    )
}

fn spark_plus() -> TierOffer {
    TierOffer::for_tier(MembershipTier::SparkPlus).unwrap()
}

fn step(app: &SparkApp) -> Option<CheckoutStep> {
    app.state().checkout.as_ref().map(|session| session.step())
}

#[tokio::test(start_paused = true)]
async fn test_premium_flips_only_after_success_delay() {
    let mut app = app_with(SimulatedPaymentProcessor::new());
    app.dispatch(Action::RequestUpgrade(spark_plus()));
    assert_eq!(step(&app), Some(CheckoutStep::Details));

    let start = Instant::now();
    app.dispatch(Action::SubmitPayment);
    assert_eq!(step(&app), Some(CheckoutStep::Processing));

    assert!(app.settle().await);
    assert!(start.elapsed() >= SIMULATED_PAYMENT_DELAY);
    assert!(start.elapsed() < SIMULATED_PAYMENT_DELAY + Duration::from_millis(100));
    assert_eq!(step(&app), Some(CheckoutStep::Success));
    assert!(!app.state().current_user.is_premium);

    let early = timeout(
        CHECKOUT_SUCCESS_DELAY - Duration::from_millis(100),
        app.settle(),
    )
    .await;
    assert!(early.is_err(), "overlay closed before the success delay");
    assert!(!app.state().current_user.is_premium);
    assert_eq!(step(&app), Some(CheckoutStep::Success));

    assert!(app.settle().await);
    assert!(app.state().current_user.is_premium);
    assert_eq!(app.state().membership, MembershipTier::SparkPlus);
    assert!(app.state().checkout.is_none());
    assert_eq!(app.in_flight(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_declined_payment_returns_to_details() {
    let mut app = app_with(
        SimulatedPaymentProcessor::new().with_outcome(SimulatedOutcome::Decline(None)),
    );
    app.dispatch(Action::RequestUpgrade(spark_plus()));
    app.dispatch(Action::SubmitPayment);
    app.run_until_idle().await;

    let session = app.state().checkout.as_ref().unwrap();
    assert_eq!(session.step(), CheckoutStep::Details);
    assert_eq!(session.error(), Some("Payment failed. Please try again."));
    assert!(!app.state().current_user.is_premium);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_processing_keeps_session_open() {
    let mut app = app_with(SimulatedPaymentProcessor::new());
    app.dispatch(Action::RequestUpgrade(spark_plus()));
    app.dispatch(Action::SubmitPayment);

    app.cancel_in_flight();
    assert!(app.settle().await);

    let session = app.state().checkout.as_ref().unwrap();
    assert_eq!(session.step(), CheckoutStep::Details);
    assert_eq!(session.error(), Some("Payment was cancelled."));
    assert!(!app.state().current_user.is_premium);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_success_delay_completes_upgrade() {
    let mut app = app_with(SimulatedPaymentProcessor::new());
    app.dispatch(Action::RequestUpgrade(spark_plus()));
    app.dispatch(Action::SubmitPayment);
    assert!(app.settle().await);
    assert_eq!(step(&app), Some(CheckoutStep::Success));

    let start = Instant::now();
    app.cancel_in_flight();
    assert!(app.settle().await);
    assert!(start.elapsed() < CHECKOUT_SUCCESS_DELAY);
    assert!(app.state().current_user.is_premium);
}

#[tokio::test(start_paused = true)]
async fn test_closed_session_ignores_late_payment() {
    let mut app = app_with(SimulatedPaymentProcessor::new());
    app.dispatch(Action::RequestUpgrade(spark_plus()));
    app.dispatch(Action::SubmitPayment);
    app.dispatch(Action::CloseCheckout);
    assert!(app.state().checkout.is_none());

    assert!(app.settle().await);
    assert!(app.state().checkout.is_none());
    assert!(!app.state().current_user.is_premium);
    assert_eq!(app.in_flight(), 0);
}

//! Text rendering of each screen.
//!
//! Rendering is a pure function of [`AppState`]; the REPL reprints the active
//! screen after every state change.

use std::fmt::{self, Write};

use colored::Colorize;
use spark_application::{AppState, ChatMode, CheckoutSession, CheckoutStep};
use spark_core::membership::{MembershipTier, TierOffer};
use spark_core::message::Sender;
use spark_core::view::View;

const FEATURES: [(&str, &str); 3] = [
    (
        "AI Matchmaking",
        "Smarter connections based on deep personality analysis.",
    ),
    (
        "Mock Dates",
        "Practice your conversation skills with our empathetic AI.",
    ),
    (
        "Real Advice",
        "Get grounded dating tips backed by real-time web search.",
    ),
];

const GO_LIVE_CHECKLIST: [(&str, &str, bool); 4] = [
    (
        "Create Stripe Account",
        "Register and link your bank account for payouts.",
        true,
    ),
    (
        "Get API Keys",
        "Copy the publishable and secret keys from the developer dashboard.",
        false,
    ),
    (
        "Choose a Host",
        "Deploy to a platform like Vercel, Netlify, or Cloudflare Pages.",
        false,
    ),
    (
        "Create Backend Endpoints",
        "A small server-side function keeps the secret key off the client.",
        false,
    ),
];

const PAYMENT_METHODS: [&str; 5] = ["Visa", "Mastercard", "Apple Pay", "Google Pay", "PayPal"];

/// Title line of each screen. No two screens share one.
pub fn heading(view: View) -> &'static str {
    match view {
        View::Landing => "Find Your Spark",
        View::Dashboard => "Discover Matches",
        View::AiCoach => "Spark AI Dating Coach",
        View::Matchmaking => "AI Matchmaker",
        View::Profile => "My Profile",
        View::Messages => "Messages",
        View::Admin => "Merchant Center",
    }
}

/// Navigation bar plus the active screen.
pub fn render(state: &AppState) -> String {
    let mut out = String::new();
    if state.view.shows_navbar() {
        out.push_str(&navbar(state.view, state.current_user.is_premium));
        out.push('\n');
    }
    out.push_str(&render_screen(state));
    out
}

/// The active screen without the navigation bar.
pub fn render_screen(state: &AppState) -> String {
    let mut out = String::new();
    // Writing into a String never fails.
    let _ = write_screen(&mut out, state);
    out
}

pub fn navbar(active: View, is_premium: bool) -> String {
    let mut items: Vec<String> = vec!["SparkAI".bright_magenta().bold().to_string()];
    for (label, view) in View::NAV_ITEMS {
        if view == active {
            items.push(format!("[{label}]").bold().to_string());
        } else {
            items.push(label.bright_black().to_string());
        }
    }
    if !is_premium {
        items.push("Go Premium: /upgrade plus".yellow().to_string());
    }
    items.join(" | ")
}

fn write_screen(out: &mut String, state: &AppState) -> fmt::Result {
    writeln!(out, "{}", heading(state.view).bold().underline())?;
    match state.view {
        View::Landing => write_landing(out),
        View::Dashboard => write_dashboard(out, state),
        View::AiCoach => write_coach(out, state),
        View::Matchmaking => write_matchmaking(out, state),
        View::Profile => write_profile(out, state),
        View::Messages => write_messages(out, state),
        View::Admin => write_admin(out),
    }
}

fn write_landing(out: &mut String) -> fmt::Result {
    writeln!(out, "{}", "With AI-Powered Dating".bright_magenta())?;
    writeln!(
        out,
        "The only dating platform that coaches you through the process."
    )?;
    writeln!(
        out,
        "Mock dates, smart matchmaking, and verified connections.\n"
    )?;
    for (title, desc) in FEATURES {
        writeln!(out, "  {} {}", title.bold(), desc.bright_black())?;
    }
    writeln!(
        out,
        "\nGet started with /explore, or try the coach with /coach."
    )
}

fn write_dashboard(out: &mut String, state: &AppState) -> fmt::Result {
    let deck = &state.deck;
    let Some(profile) = deck.current() else {
        return writeln!(
            out,
            "{}",
            "You've seen everyone nearby. Check back later!".bright_black()
        );
    };

    let badge = if profile.is_premium {
        format!(" {}", "PRO".yellow().bold())
    } else {
        String::new()
    };
    writeln!(
        out,
        "{} of {}",
        deck.position() + 1,
        deck.profiles().len()
    )?;
    writeln!(out, "{}, {}{}", profile.name.bold(), profile.age, badge)?;
    writeln!(out, "{}", profile.location.bright_black())?;
    writeln!(out, "{}", profile.bio)?;
    let tags: Vec<String> = profile
        .top_interests(3)
        .iter()
        .map(|tag| format!("#{tag}"))
        .collect();
    writeln!(out, "{}", tags.join(" ").cyan())?;
    if let Some(score) = profile.match_score {
        writeln!(out, "{}", format!("{score}% match").green())?;
    }
    if state.has_match(&profile.id) {
        writeln!(out, "{}", "Already matched".bright_black())?;
    }
    writeln!(out, "\n/like or /pass")
}

fn write_coach(out: &mut String, state: &AppState) -> fmt::Result {
    let chat = &state.chat;
    let persona = chat.mode().persona();
    let modes: Vec<String> = [ChatMode::Advice, ChatMode::MockDate]
        .into_iter()
        .map(|mode| {
            if mode == chat.mode() {
                format!("[{}]", mode.label()).bold().to_string()
            } else {
                mode.label().bright_black().to_string()
            }
        })
        .collect();
    writeln!(out, "Mode: {}  (/mode advice|date)\n", modes.join(" "))?;

    if chat.messages().is_empty() && !chat.is_loading() {
        let intro = match chat.mode() {
            ChatMode::Advice => "Ask for dating advice, profile tips or first-date ideas.",
            ChatMode::MockDate => "You're on a practice date with Maya. Say hello!",
        };
        writeln!(out, "{}", intro.bright_black())?;
    }

    for message in chat.messages() {
        match message.sender {
            Sender::Me => writeln!(out, "{} {}", "You:".green().bold(), message.text)?,
            Sender::Ai => {
                writeln!(out, "{}", format!("{}:", persona.name).bright_magenta().bold())?;
                for line in message.text.lines() {
                    writeln!(out, "  {}", line.bright_blue())?;
                }
            }
        }
    }

    if chat.is_loading() {
        writeln!(
            out,
            "{}",
            format!("{} is typing...", persona.name).bright_black()
        )?;
    }

    if !chat.citations().is_empty() {
        writeln!(out, "\n{}", "Sources:".bold())?;
        for citation in chat.citations() {
            writeln!(out, "  - {} ({})", citation.title, citation.uri.cyan())?;
        }
    }
    Ok(())
}

fn write_matchmaking(out: &mut String, state: &AppState) -> fmt::Result {
    let matchmaking = &state.matchmaking;
    if matchmaking.is_loading() {
        return writeln!(out, "{}", "Analyzing...".bright_black());
    }
    match matchmaking.analysis() {
        Some(analysis) => {
            for line in analysis.lines() {
                writeln!(out, "{}", line.bright_blue())?;
            }
            writeln!(out, "\nRun /analyze again for a fresh take.")
        }
        None => {
            writeln!(
                out,
                "Ready for a deeper connection? Let Spark AI analyze your soulmate potential."
            )?;
            writeln!(out, "Run /analyze to find your match.")
        }
    }
}

fn write_profile(out: &mut String, state: &AppState) -> fmt::Result {
    let user = &state.current_user;
    writeln!(out, "{}, {}", user.name.bold(), user.age)?;
    writeln!(out, "{}", user.location.bright_black())?;
    writeln!(out, "{}", user.bio)?;

    let tier = if state.membership == MembershipTier::Free {
        state.membership.to_string().normal()
    } else {
        state.membership.to_string().yellow().bold()
    };
    writeln!(out, "Membership: {tier}")?;
    writeln!(out, "Merchant settings: /admin\n")?;

    for offer in TierOffer::catalog() {
        write_offer(out, &offer)?;
    }

    if let Some(session) = &state.checkout {
        writeln!(out)?;
        write_checkout(out, session)?;
    }
    Ok(())
}

fn write_offer(out: &mut String, offer: &TierOffer) -> fmt::Result {
    let command = match offer.tier {
        MembershipTier::SparkGold => "/upgrade gold",
        _ => "/upgrade plus",
    };
    writeln!(
        out,
        "{}  {}/mo  ({})",
        offer.tier.to_string().bold(),
        offer.price,
        command.bright_black()
    )?;
    for feature in &offer.features {
        writeln!(out, "  ✓ {feature}")?;
    }
    Ok(())
}

fn write_checkout(out: &mut String, session: &CheckoutSession) -> fmt::Result {
    let offer = session.offer();
    match session.step() {
        CheckoutStep::Details => {
            writeln!(out, "{}", "SparkAI Secure Payment".bright_magenta().bold())?;
            writeln!(out, "{} {}/mo", offer.tier, offer.price)?;
            if let Some(error) = session.error() {
                writeln!(out, "{}", error.red())?;
            }
            writeln!(out, "/pay to pay {}, /close to cancel", offer.price)
        }
        CheckoutStep::Processing => {
            writeln!(out, "{}", "SparkAI Secure Payment".bright_magenta().bold())?;
            writeln!(out, "{}", "Processing payment...".bright_black())
        }
        CheckoutStep::Success => {
            writeln!(out, "{}", "Payment Verified!".green().bold())?;
            writeln!(
                out,
                "Welcome to {}. Your account has been upgraded.",
                offer.tier
            )?;
            if let Some(id) = session.transaction_id() {
                writeln!(out, "Transaction: {id}")?;
            }
            writeln!(out, "{}", "Activating Premium features...".bright_black())
        }
    }
}

fn write_messages(out: &mut String, state: &AppState) -> fmt::Result {
    if state.conversations.is_empty() {
        return writeln!(
            out,
            "{}",
            "No matches yet. Like someone on /explore to start chatting.".bright_black()
        );
    }
    for conversation in &state.conversations {
        let last = conversation
            .messages
            .last()
            .map(|message| message.text.as_str())
            .unwrap_or_default();
        writeln!(
            out,
            "{}  {}",
            conversation.participant.name.bold(),
            last.bright_black()
        )?;
    }
    Ok(())
}

fn write_admin(out: &mut String) -> fmt::Result {
    writeln!(
        out,
        "How to get your site live and start collecting payments.\n"
    )?;
    writeln!(out, "{}", "Go-Live Checklist".bold())?;
    for (index, (step, desc, done)) in GO_LIVE_CHECKLIST.iter().enumerate() {
        let marker = if *done {
            "✓".green().to_string()
        } else {
            (index + 1).to_string()
        };
        writeln!(out, "  {marker} {step}")?;
        writeln!(out, "    {}", desc.bright_black())?;
    }

    writeln!(out, "\n{}", "Live Statistics".bold())?;
    writeln!(out, "  Site Status       {}", "Sandbox Mode".yellow())?;
    writeln!(out, "  Active Members    4,102")?;
    writeln!(out, "  Avg. Payout Time  2-3 Days")?;

    writeln!(out, "\n{}", "Payment Methods".bold())?;
    writeln!(out, "  {}", PAYMENT_METHODS.join(", "))?;

    writeln!(out, "\n{}", "Want a No-Code Payout?".bold())?;
    writeln!(
        out,
        "Use payment links: paste the hosted checkout URL into the upgrade buttons."
    )
}

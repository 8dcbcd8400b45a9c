//! Customer chat widget in the terminal.
//!
//! Mirrors the browser widget's protocol behavior: a persisted
//! `{sessionId, email}` identity resumes the conversation across runs,
//! revalidated against the server on startup (a 404 discards it and
//! falls back to email entry); a ~3s polling loop merges server state
//! into the local list by message id; sends append optimistically; a
//! failed send keeps the text for resend instead of dropping it.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};

use frontdesk_core::client::continuity::{
    ResumeDecision, SessionProbe, StoredIdentity, resume_or_discard,
};
use frontdesk_core::client::merge::merge_messages;
use frontdesk_core::client::unread::ReadTracker;
use frontdesk_types::chat::{ChatMessage, Sender};
use frontdesk_types::config::Config;

use crate::client::{ApiClient, ClientError};

const POLL_INTERVAL: Duration = Duration::from_secs(3);

pub async fn run(config: &Config) -> anyhow::Result<()> {
    let client = ApiClient::new(&config.client.base_url);
    let identity_file = identity_path();

    let (identity, mut local) = establish_identity(&client, &identity_file).await?;
    println!(
        "{} {}",
        style("Chatting as").dim(),
        style(&identity.email).cyan()
    );
    let mut rendered = render_new(&local, 0);

    // The widget counts admin replies; with the view open, everything
    // currently visible counts as read.
    let mut tracker = ReadTracker::new();
    tracker.mark_read(&identity.session_id, admin_count(&local));

    let mut poll = tokio::time::interval(POLL_INTERVAL);
    poll.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Option<String> = None;

    println!(
        "{}",
        style("Type a message and press Enter. /quit to exit.").dim()
    );

    loop {
        tokio::select! {
            _ = poll.tick() => {
                match client.messages(&identity.session_id).await {
                    Ok(fetched) => {
                        local = merge_messages(&local, &fetched);
                        let unread = tracker.unread(&identity.session_id, admin_count(&local));
                        if unread > 0 {
                            println!("{}", style(format!("— {unread} new —")).dim());
                        }
                        rendered = render_new(&local, rendered);
                        tracker.mark_read(&identity.session_id, admin_count(&local));
                    }
                    Err(ClientError::NotFound) => {
                        // The server restarted and lost the session.
                        let _ = tokio::fs::remove_file(&identity_file).await;
                        println!(
                            "{}",
                            style("This conversation is no longer available. Run `fdesk chat` again to start a new one.").yellow()
                        );
                        return Ok(());
                    }
                    Err(err) => tracing::debug!(%err, "poll failed"),
                }
            }

            line = lines.next_line() => {
                let Some(line) = line.context("stdin closed")? else {
                    return Ok(());
                };
                let text = if line.trim().is_empty() {
                    match pending.take() {
                        Some(kept) => kept,
                        None => continue,
                    }
                } else {
                    line.trim().to_string()
                };
                if text == "/quit" {
                    return Ok(());
                }

                match client.send_message(&identity.session_id, Sender::Customer, &text).await {
                    Ok(message) => {
                        local = merge_messages(&local, &[message]);
                        rendered = render_new(&local, rendered);
                    }
                    Err(ClientError::NotFound) => {
                        let _ = tokio::fs::remove_file(&identity_file).await;
                        println!(
                            "{}",
                            style("This conversation is no longer available. Run `fdesk chat` again to start a new one.").yellow()
                        );
                        return Ok(());
                    }
                    Err(err) => {
                        tracing::debug!(%err, "send failed");
                        pending = Some(text);
                        println!(
                            "{}",
                            style("Something went wrong — press Enter to resend your message.").yellow()
                        );
                    }
                }
            }
        }
    }
}

/// Resume the stored identity if the server still knows it, otherwise
/// prompt for an email and start fresh.
async fn establish_identity(
    client: &ApiClient,
    identity_file: &PathBuf,
) -> anyhow::Result<(StoredIdentity, Vec<ChatMessage>)> {
    if let Some(stored) = load_identity(identity_file).await {
        let probe = match client.messages(&stored.session_id).await {
            Ok(messages) => SessionProbe::Found(messages),
            Err(ClientError::NotFound) => SessionProbe::Unknown,
            Err(err) => return Err(err).context("could not reach the chat server"),
        };
        match resume_or_discard(stored, probe) {
            ResumeDecision::Resume { identity, messages } => return Ok((identity, messages)),
            ResumeDecision::Discard => {
                let _ = tokio::fs::remove_file(identity_file).await;
            }
        }
    }

    let email: String = dialoguer::Input::new()
        .with_prompt("Your email")
        .validate_with(|input: &String| {
            if input.contains('@') && input.trim().len() > 3 {
                Ok(())
            } else {
                Err("please enter a valid email address")
            }
        })
        .interact_text()?;

    let start = client
        .start_session(email.trim())
        .await
        .context("could not start a chat session")?;
    let identity = StoredIdentity {
        session_id: start.session_id,
        email: start.email,
    };
    save_identity(identity_file, &identity).await?;
    Ok((identity, start.messages))
}

/// Identity persists per user, scoped to the local state directory.
fn identity_path() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::data_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("frontdesk")
        .join("identity.json")
}

async fn load_identity(path: &PathBuf) -> Option<StoredIdentity> {
    let content = tokio::fs::read_to_string(path).await.ok()?;
    serde_json::from_str(&content).ok()
}

async fn save_identity(path: &PathBuf, identity: &StoredIdentity) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, serde_json::to_string(identity)?).await?;
    Ok(())
}

fn admin_count(messages: &[ChatMessage]) -> u64 {
    messages.iter().filter(|m| m.sender == Sender::Admin).count() as u64
}

/// Print every message past `rendered`, returning the new watermark.
fn render_new(messages: &[ChatMessage], rendered: usize) -> usize {
    for message in &messages[rendered.min(messages.len())..] {
        let label = match message.sender {
            Sender::Customer => style("you").cyan(),
            Sender::Admin => style("support").green(),
        };
        println!(
            "{} {} {}",
            style(message.created_at.with_timezone(&chrono::Local).format("%H:%M")).dim(),
            label,
            message.content
        );
    }
    messages.len()
}

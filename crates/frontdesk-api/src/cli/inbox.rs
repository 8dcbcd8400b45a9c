//! Admin inbox in the terminal.
//!
//! Password login (the shared admin secret), then a session list that
//! refreshes every ~5s with unread badges, and a per-conversation view
//! polling every ~8s. A 401 anywhere drops back to the login step rather
//! than retrying. The conversation view's poll timer lives only as long
//! as the view itself.

use std::time::Duration;

use anyhow::Context;
use comfy_table::{Cell, Table};
use console::style;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use frontdesk_core::client::merge::merge_messages;
use frontdesk_core::client::unread::ReadTracker;
use frontdesk_types::chat::{ChatMessage, Sender, SessionOverview};
use frontdesk_types::config::Config;

use crate::client::{ApiClient, ClientError};

const LIST_POLL_INTERVAL: Duration = Duration::from_secs(5);
const CONVERSATION_POLL_INTERVAL: Duration = Duration::from_secs(8);

/// How a sub-view ended.
enum ViewOutcome {
    Back,
    LoggedOut,
}

pub async fn run(config: &Config) -> anyhow::Result<()> {
    let mut client = ApiClient::new(&config.client.base_url);
    let mut tracker = ReadTracker::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    'login: loop {
        login(&mut client).await?;
        println!(
            "{}",
            style("Commands: open <n>, clear <n>, quit. Enter refreshes.").dim()
        );

        let mut poll = tokio::time::interval(LIST_POLL_INTERVAL);
        poll.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut sessions: Vec<SessionOverview> = Vec::new();

        loop {
            tokio::select! {
                _ = poll.tick() => {
                    match client.sessions().await {
                        Ok(list) => {
                            sessions = list;
                            render_sessions(&sessions, &tracker);
                        }
                        Err(ClientError::Unauthorized) => {
                            println!("{}", style("Session expired, log in again.").yellow());
                            continue 'login;
                        }
                        Err(err) => tracing::debug!(%err, "session list poll failed"),
                    }
                }

                line = lines.next_line() => {
                    let Some(line) = line.context("stdin closed")? else {
                        return Ok(());
                    };
                    let input = line.trim();
                    if input.is_empty() {
                        poll.reset_immediately();
                        continue;
                    }
                    if input == "quit" {
                        let _ = client.logout().await;
                        return Ok(());
                    }
                    if let Some(session) = pick(input, "open", &sessions) {
                        match conversation(&client, &mut tracker, session, &mut lines).await? {
                            ViewOutcome::Back => poll.reset_immediately(),
                            ViewOutcome::LoggedOut => continue 'login,
                        }
                    } else if let Some(session) = pick(input, "clear", &sessions) {
                        match client.clear_history(&session.id).await {
                            Ok(()) => {
                                tracker.mark_read(&session.id, 0);
                                println!("Cleared history for {}", style(&session.email).cyan());
                                poll.reset_immediately();
                            }
                            Err(ClientError::Unauthorized) => continue 'login,
                            Err(err) => println!("{}", style(format!("Clear failed: {err}")).red()),
                        }
                    } else {
                        println!("{}", style("Unknown command. open <n>, clear <n>, quit.").dim());
                    }
                }
            }
        }
    }
}

/// Prompt until the password challenge succeeds. A missing server-side
/// secret is fatal: there is nothing any password could unlock.
async fn login(client: &mut ApiClient) -> anyhow::Result<()> {
    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Admin password")
            .interact()?;
        match client.login(&password).await {
            Ok(()) => {
                println!("{}", style("Logged in.").green());
                return Ok(());
            }
            Err(ClientError::Unauthorized) => {
                println!("{}", style("Wrong password.").red());
            }
            Err(ClientError::Unavailable(msg)) => {
                anyhow::bail!("admin access is not configured on the server: {msg}");
            }
            Err(err) => return Err(err).context("login failed"),
        }
    }
}

/// One conversation, polled while it is open. Dropping out of this
/// function drops the poll timer with it.
async fn conversation(
    client: &ApiClient,
    tracker: &mut ReadTracker,
    session: &SessionOverview,
    lines: &mut Lines<BufReader<Stdin>>,
) -> anyhow::Result<ViewOutcome> {
    println!(
        "\n{} {} {}",
        style("Conversation with").bold(),
        style(&session.email).cyan(),
        style("(/back to list, /clear to wipe history)").dim()
    );

    let mut local: Vec<ChatMessage> = match client.messages(&session.id).await {
        Ok(messages) => messages,
        Err(ClientError::Unauthorized) => return Ok(ViewOutcome::LoggedOut),
        Err(ClientError::NotFound) => {
            println!("{}", style("This session no longer exists.").yellow());
            return Ok(ViewOutcome::Back);
        }
        Err(err) => {
            println!("{}", style(format!("Could not load messages: {err}")).red());
            return Ok(ViewOutcome::Back);
        }
    };
    let mut rendered = render_new(&local, 0);
    tracker.mark_read(&session.id, local.len() as u64);

    let mut poll = tokio::time::interval(CONVERSATION_POLL_INTERVAL);
    poll.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = poll.tick() => {
                match client.messages(&session.id).await {
                    Ok(fetched) => {
                        local = merge_messages(&local, &fetched);
                        rendered = render_new(&local, rendered);
                        // The view is focused; everything shown is read.
                        tracker.mark_read(&session.id, local.len() as u64);
                    }
                    Err(ClientError::Unauthorized) => return Ok(ViewOutcome::LoggedOut),
                    Err(ClientError::NotFound) => {
                        println!("{}", style("This session no longer exists.").yellow());
                        return Ok(ViewOutcome::Back);
                    }
                    Err(err) => tracing::debug!(%err, "conversation poll failed"),
                }
            }

            line = lines.next_line() => {
                let Some(line) = line.context("stdin closed")? else {
                    return Ok(ViewOutcome::Back);
                };
                let text = line.trim();
                if text.is_empty() {
                    continue;
                }
                if text == "/back" {
                    return Ok(ViewOutcome::Back);
                }
                if text == "/clear" {
                    match client.clear_history(&session.id).await {
                        Ok(()) => {
                            local.clear();
                            rendered = 0;
                            tracker.mark_read(&session.id, 0);
                            println!("{}", style("History cleared.").green());
                        }
                        Err(ClientError::Unauthorized) => return Ok(ViewOutcome::LoggedOut),
                        Err(err) => println!("{}", style(format!("Clear failed: {err}")).red()),
                    }
                    continue;
                }

                match client.send_message(&session.id, Sender::Admin, text).await {
                    Ok(message) => {
                        local = merge_messages(&local, &[message]);
                        rendered = render_new(&local, rendered);
                        tracker.mark_read(&session.id, local.len() as u64);
                    }
                    Err(ClientError::Unauthorized) => return Ok(ViewOutcome::LoggedOut),
                    Err(err) => println!("{}", style(format!("Send failed: {err}")).red()),
                }
            }
        }
    }
}

/// Parse `"<verb> <n>"` into the n-th (1-based) listed session.
fn pick<'a>(
    input: &str,
    verb: &str,
    sessions: &'a [SessionOverview],
) -> Option<&'a SessionOverview> {
    let rest = input.strip_prefix(verb)?.trim();
    let index: usize = rest.parse().ok()?;
    sessions.get(index.checked_sub(1)?)
}

fn render_sessions(sessions: &[SessionOverview], tracker: &ReadTracker) {
    if sessions.is_empty() {
        println!("{}", style("No chat sessions yet.").dim());
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Email", "Started", "Messages", "Unread"]);
    for (i, session) in sessions.iter().enumerate() {
        let unread = tracker.unread(&session.id, session.message_count);
        let badge = if unread > 0 {
            format!("{unread} new")
        } else {
            String::new()
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&session.email),
            Cell::new(
                session
                    .created_at
                    .with_timezone(&chrono::Local)
                    .format("%m-%d %H:%M"),
            ),
            Cell::new(session.message_count),
            Cell::new(badge),
        ]);
    }
    println!("{table}");
}

/// Print every message past `rendered`, returning the new watermark.
fn render_new(messages: &[ChatMessage], rendered: usize) -> usize {
    for message in &messages[rendered.min(messages.len())..] {
        let label = match message.sender {
            Sender::Customer => style("customer").cyan(),
            Sender::Admin => style("you").green(),
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

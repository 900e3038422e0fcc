use std::future::Future;
use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use chrono::Timelike;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::application::{
    greeting_for_hour, ConversationState, LoadingStatus, SubmitOutcome, LOADING_TICK, QUICK_STARTS,
};
use crate::domain::{Message, Role};

use super::super::Container;
use super::history_controller::format_history;
use super::resolve_session;

const HELP: &str = "\
Commands:
  <text>          ask Aiva about a topic
  /new            open an empty chat
  /quick <n>      send quick-start preset n
  /history        list the memory bank
  /open <n|id>    replay a saved session
  /delete <n|id>  delete a saved session
  /clear          clear the memory bank (asks to confirm)
  /home           back to the home screen
  /help           show this help
  /quit           leave";

/// Interactive terminal client driving a [`ConversationState`].
pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn run<R, W>(&self, input: R, output: &mut W) -> Result<String>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut state = self.container.conversation();
        let mut confirm_clear = false;
        let mut lines = input.lines();

        render_home(output, &state)?;

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();

            if confirm_clear {
                confirm_clear = false;
                match line {
                    "/confirm" | "yes" | "y" => {
                        state.history_mut().clear_all()?;
                        writeln!(output, "Memory bank cleared.")?;
                        continue;
                    }
                    "" | "no" | "n" | "/cancel" => {
                        writeln!(output, "Kept the memory bank.")?;
                        continue;
                    }
                    // Anything else cancels and is handled as regular input.
                    _ => writeln!(output, "Kept the memory bank.")?,
                }
            }

            let (command, arg) = match line.split_once(char::is_whitespace) {
                Some((c, a)) => (c, a.trim()),
                None => (line, ""),
            };

            match command {
                "" => {}
                "/quit" | "/exit" => break,
                "/help" => writeln!(output, "{HELP}")?,
                "/home" => {
                    state.reset();
                    render_home(output, &state)?;
                }
                "/new" => {
                    state.start_chat();
                    writeln!(output, "New chat. What are we learning today?")?;
                }
                "/quick" => match quick_start_topic(arg) {
                    Some(topic) => {
                        render_message(output, &Message::user(topic))?;
                        let outcome = with_loading_status(state.submit(topic)).await;
                        render_reply(output, &state, outcome)?;
                    }
                    None => writeln!(output, "Pick a preset between 1 and {}.", QUICK_STARTS.len())?,
                },
                "/history" => writeln!(output, "{}", format_history(state.history()))?,
                "/open" => {
                    let session = resolve_session(state.history(), arg).cloned();
                    match session {
                        Some(session) => {
                            state.load_session(&session);
                            for message in state.transcript() {
                                render_message(output, message)?;
                            }
                        }
                        None => writeln!(output, "No saved session matches '{arg}'.")?,
                    }
                }
                "/delete" => {
                    let id = resolve_session(state.history(), arg).map(|s| s.id().to_string());
                    match id {
                        Some(id) => {
                            state.history_mut().remove(&id)?;
                            writeln!(output, "Deleted.")?;
                        }
                        None => writeln!(output, "No saved session matches '{arg}'.")?,
                    }
                }
                "/clear" => {
                    if state.history().is_empty() {
                        writeln!(output, "Memory bank is already empty.")?;
                    } else {
                        confirm_clear = true;
                        writeln!(
                            output,
                            "Delete all {} sessions? Type /confirm to proceed, anything else cancels.",
                            state.history().len()
                        )?;
                    }
                }
                _ if command.starts_with('/') => {
                    writeln!(output, "Unknown command {command}. Type /help for commands.")?
                }
                _ => {
                    state.set_pending_input(line);
                    let outcome = with_loading_status(state.submit_pending()).await;
                    render_reply(output, &state, outcome)?;
                }
            }
        }

        Ok("Goodbye.".to_string())
    }
}

fn quick_start_topic(arg: &str) -> Option<&'static str> {
    let n = arg.parse::<usize>().ok()?;
    QUICK_STARTS.get(n.checked_sub(1)?).map(|q| q.topic)
}

/// Awaits `exchange` while a spinner cycles through the loading texts.
async fn with_loading_status<F>(exchange: F) -> SubmitOutcome
where
    F: Future<Output = SubmitOutcome>,
{
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    let mut status = LoadingStatus::new();
    spinner.set_message(status.current());
    spinner.enable_steady_tick(Duration::from_millis(120));

    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + LOADING_TICK, LOADING_TICK);
    tokio::pin!(exchange);

    let outcome = loop {
        tokio::select! {
            outcome = &mut exchange => break outcome,
            _ = ticker.tick() => spinner.set_message(status.advance()),
        }
    };

    spinner.finish_and_clear();
    outcome
}

fn render_home<W: Write>(output: &mut W, state: &ConversationState) -> Result<()> {
    let greeting = greeting_for_hour(chrono::Local::now().hour());
    writeln!(output, "{greeting}! I am Aiva.")?;
    writeln!(output)?;
    for (i, quick) in QUICK_STARTS.iter().enumerate() {
        writeln!(output, "  /quick {}  {}", i + 1, quick.label)?;
    }
    if !state.history().is_empty() {
        writeln!(output, "  /history  {} saved sessions", state.history().len())?;
    }
    writeln!(output)?;
    writeln!(output, "Type a topic to start, or /help.")?;
    Ok(())
}

fn render_reply<W: Write>(
    output: &mut W,
    state: &ConversationState,
    outcome: SubmitOutcome,
) -> Result<()> {
    if outcome == SubmitOutcome::Ignored {
        return Ok(());
    }
    if let Some(reply) = state.transcript().last() {
        render_message(output, reply)?;
    }
    Ok(())
}

fn render_message<W: Write>(output: &mut W, message: &Message) -> Result<()> {
    let speaker = match message.role() {
        Role::User => "You",
        Role::Assistant => "Aiva",
    };
    writeln!(output, "\n{speaker}:\n{}\n", message.text())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::application::RequestOrchestrator;
    use crate::connector::InMemoryKeyValueStore;
    use crate::domain::DomainError;

    struct EchoOrchestrator;

    #[async_trait]
    impl RequestOrchestrator for EchoOrchestrator {
        async fn send(&self, topic: &str) -> Result<String, DomainError> {
            Ok(format!("echo: {topic}"))
        }
    }

    fn container() -> Container {
        Container::with_parts(Arc::new(InMemoryKeyValueStore::new()), Arc::new(EchoOrchestrator))
    }

    async fn run(container: &Container, script: &str) -> String {
        let mut output = Vec::new();
        ChatController::new(container)
            .run(script.as_bytes(), &mut output)
            .await
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn topic_gets_reply_and_is_saved() {
        let container = container();
        let output = run(&container, "photosynthesis\n/quit\n").await;

        assert!(output.contains("I am Aiva."));
        assert!(output.contains("echo: photosynthesis"));
        assert_eq!(container.history_store().len(), 1);
    }

    #[tokio::test]
    async fn quick_start_sends_preset() {
        let container = container();
        let output = run(&container, "/quick 3\n").await;

        assert!(output.contains("echo: Quiz me on basic chemistry"));
    }

    #[tokio::test]
    async fn clear_needs_confirmation() {
        let container = container();
        run(&container, "a\nb\n/clear\nno\n").await;
        assert_eq!(container.history_store().len(), 2);

        run(&container, "/clear\n/confirm\n").await;
        assert!(container.history_store().is_empty());
    }

    #[tokio::test]
    async fn input_during_clear_prompt_is_not_dropped() {
        let container = container();
        run(&container, "a\n").await;

        let output = run(&container, "/clear\nosmosis\n").await;

        assert!(output.contains("Kept the memory bank."));
        assert!(output.contains("echo: osmosis"));
        assert_eq!(container.history_store().len(), 2);
    }

    #[tokio::test]
    async fn open_replays_saved_session() {
        let container = container();
        run(&container, "gravity\n").await;

        let output = run(&container, "/open 1\n").await;
        assert!(output.contains("You:\ngravity"));
        assert!(output.contains("Aiva:\necho: gravity"));
    }

    #[tokio::test]
    async fn unknown_command_is_reported() {
        let container = container();
        let output = run(&container, "/dance\n").await;
        assert!(output.contains("Unknown command /dance"));
    }
}

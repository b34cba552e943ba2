//! Session driver
//!
//! One logical actor: at most one outstanding command or model call at a
//! time, suspending until it completes or fails. Every error from the
//! taxonomy surfaces here as a visible `error` display event; nothing is
//! logged-only and hidden from the operator.

use crate::route::{route_input, InputRoute};
use std::path::PathBuf;
use std::sync::Arc;
use zeef_agent::DeterministicAgent;
use zeef_kernel::{law_guarded_completion, Charter, Envelope, Kernel};
use zeef_ledger::Ledger;

/// One item of the display stream consumed by a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEvent {
    /// Source tag (`user`, `model[OK]`, `shell[stdout]`, `error`, ...)
    pub source: String,
    /// Display text
    pub content: String,
}

impl DisplayEvent {
    fn new(source: impl Into<String>, content: impl Into<String>) -> Self {
        Self { source: source.into(), content: content.into() }
    }
}

/// Result of handling one input line.
#[derive(Debug)]
pub enum Turn {
    /// Session continues; render these events
    Continue(Vec<DisplayEvent>),
    /// Operator ended the session
    Terminated,
}

/// Interactive session over the guarded executor and the law layer.
pub struct Session {
    ledger: Arc<Ledger>,
    agent: DeterministicAgent,
    kernel: Kernel,
    charter: Charter,
    cwd: PathBuf,
    last_command: Option<String>,
    last_stdout: Option<String>,
    last_stderr: Option<String>,
    last_exit_code: Option<i32>,
}

impl Session {
    /// Wire a session over an opened ledger and kernel.
    #[must_use]
    pub fn new(ledger: Arc<Ledger>, kernel: Kernel, charter: Charter, cwd: PathBuf) -> Self {
        let agent = DeterministicAgent::new(Arc::clone(&ledger));
        Self {
            ledger,
            agent,
            kernel,
            charter,
            cwd,
            last_command: None,
            last_stdout: None,
            last_stderr: None,
            last_exit_code: None,
        }
    }

    /// The ledger this session records into.
    #[must_use]
    pub fn ledger(&self) -> &Arc<Ledger> {
        &self.ledger
    }

    /// Handle one raw input line, blocking until the routed operation
    /// completes or fails.
    pub async fn handle_line(&mut self, line: &str) -> Turn {
        let route = route_input(line);
        let mut events = Vec::new();

        match route {
            InputRoute::Empty => return Turn::Continue(events),
            InputRoute::Exit => return Turn::Terminated,
            InputRoute::Completion(query) => {
                events.push(DisplayEvent::new("user", line.trim()));
                self.complete(&query, &mut events).await;
            }
            InputRoute::Explain => {
                events.push(DisplayEvent::new("user", line.trim()));
                match self.explain_prompt() {
                    Some(prompt) => self.complete(&prompt, &mut events).await,
                    None => events.push(DisplayEvent::new(
                        "error",
                        "No previous command to explain.",
                    )),
                }
            }
            InputRoute::Fix => {
                events.push(DisplayEvent::new("user", line.trim()));
                match self.fix_prompt() {
                    Some(prompt) => self.complete(&prompt, &mut events).await,
                    None => events.push(DisplayEvent::new(
                        "error",
                        "No previous command to fix.",
                    )),
                }
            }
            InputRoute::Shell(command) => {
                events.push(DisplayEvent::new("user", command.as_str()));
                self.run_shell(&command, &mut events).await;
            }
        }

        Turn::Continue(events)
    }

    async fn run_shell(&mut self, command: &str, events: &mut Vec<DisplayEvent>) {
        self.last_command = Some(command.to_string());
        match self.agent.execute_command(command, &self.cwd).await {
            Ok(outcome) => {
                self.last_stdout = Some(outcome.stdout.clone());
                self.last_stderr = Some(outcome.stderr.clone());
                self.last_exit_code = outcome.exit_code;

                if !outcome.stdout.is_empty() {
                    events.push(DisplayEvent::new(
                        "shell[stdout]",
                        outcome.stdout.trim(),
                    ));
                }
                if !outcome.stderr.is_empty() {
                    events.push(DisplayEvent::new(
                        "shell[stderr]",
                        outcome.stderr.trim(),
                    ));
                }
            }
            Err(err) => {
                self.last_stderr = Some(err.to_string());
                self.last_exit_code = None;
                events.push(DisplayEvent::new(
                    "error",
                    format!("deterministic agent failure: {err}"),
                ));
            }
        }
    }

    async fn complete(&mut self, user_content: &str, events: &mut Vec<DisplayEvent>) {
        match law_guarded_completion(&self.kernel, &self.ledger, &self.charter, user_content)
            .await
        {
            Ok(envelope) => events.push(render_envelope(&envelope)),
            Err(err) => {
                events.push(DisplayEvent::new(
                    "error",
                    format!("law layer failure: {err}"),
                ));
            }
        }
    }

    /// Prompt asking the model to explain the most recent command and
    /// its captured output. `None` when no command has run yet.
    fn explain_prompt(&self) -> Option<String> {
        let command = self.last_command.as_ref()?;
        let mut prompt = format!(
            "You are a deterministic terminal assistant. Explain the following \
             shell command and its most recent result in clear, concise language.\
             \n\nCommand:\n{command}\n"
        );
        if let Some(stdout) = self.last_stdout.as_deref().filter(|s| !s.is_empty()) {
            prompt.push_str(&format!("\nLast stdout:\n{stdout}\n"));
        }
        if let Some(stderr) = self.last_stderr.as_deref().filter(|s| !s.is_empty()) {
            prompt.push_str(&format!(
                "\nLast stderr (may indicate an error):\n{stderr}\n"
            ));
        }
        Some(prompt)
    }

    /// Prompt asking the model to diagnose the most recent command and
    /// propose a single corrected command. `None` when no command has
    /// run yet.
    fn fix_prompt(&self) -> Option<String> {
        let command = self.last_command.as_ref()?;
        let mut prompt = format!(
            "You are a deterministic terminal assistant. The user ran this \
             command and it did not behave as expected. Analyze any errors and \
             propose a single corrected command plus a short explanation.\
             \n\nCommand:\n{command}\n"
        );
        if let Some(stdout) = self.last_stdout.as_deref().filter(|s| !s.is_empty()) {
            prompt.push_str(&format!("\nLast stdout:\n{stdout}\n"));
        }
        if let Some(stderr) = self.last_stderr.as_deref().filter(|s| !s.is_empty()) {
            prompt.push_str(&format!("\nLast stderr (error details):\n{stderr}\n"));
        }
        Some(prompt)
    }
}

fn render_envelope(envelope: &Envelope) -> DisplayEvent {
    DisplayEvent::new(
        format!("model[{}]", envelope.status),
        envelope.payload.text.clone(),
    )
}

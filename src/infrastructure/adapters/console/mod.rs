//! Console adapter - terminal front end for a chat session

use std::io::{BufRead, Write};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::application::errors::ChatError;
use crate::application::services::{
    ChatSession, IgnoreReason, KeyOutcome, KeyPress, PendingSubmission, SubmitOutcome, Suggestion,
};
use crate::domain::entities::{MessageEntry, Role};
use crate::domain::traits::SessionObserver;
use crate::infrastructure::config::ConsoleConfig;

/// Line suffix that continues the draft on the next line (Shift+Enter)
const CONTINUATION: char = '\\';

/// Slash commands understood by the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Suggest(Suggestion),
    Help,
    Quit,
}

impl ConsoleCommand {
    /// Parse a line; `None` means the line is chat input
    pub fn parse(line: &str) -> Option<Self> {
        let command = line.trim().strip_prefix('/')?;
        match command {
            "help" | "?" => Some(ConsoleCommand::Help),
            "quit" | "exit" => Some(ConsoleCommand::Quit),
            other => other
                .parse::<usize>()
                .ok()
                .and_then(Suggestion::from_index)
                .map(ConsoleCommand::Suggest),
        }
    }
}

/// Translate one terminal line into key presses.
///
/// A trailing backslash becomes Shift+Enter so the draft spans lines;
/// otherwise the line ends with a plain Enter.
pub fn line_to_keys(line: &str) -> Vec<KeyPress> {
    let (body, end) = match line.strip_suffix(CONTINUATION) {
        Some(body) => (body, KeyPress::shift_enter()),
        None => (line, KeyPress::enter()),
    };
    body.chars().map(KeyPress::char).chain(std::iter::once(end)).collect()
}

/// Format a transcript entry for the terminal
pub fn render_entry(bot_name: &str, entry: &MessageEntry) -> String {
    let label = match entry.role() {
        Role::User => "You",
        Role::Bot => bot_name,
    };
    let indent = " ".repeat(label.chars().count() + 2);
    let body = entry.text().lines().collect::<Vec<_>>().join(&format!("\n{}", indent));
    format!("{}: {}", label, body)
}

/// Status line shown when a request starts or settles
pub fn busy_indicator(bot_name: &str, busy: bool) -> String {
    if busy {
        format!("… {} is thinking", bot_name)
    } else {
        format!("… {} is ready", bot_name)
    }
}

/// What feeding one terminal line into the session did
#[derive(Debug)]
pub enum LineOutcome {
    /// The line completed the draft and a submission started
    Submitted(PendingSubmission),
    /// A reply is still pending; the line stays in the draft as its own line
    Held,
    /// The draft was edited (or the line was blank)
    Edited,
}

/// Feed a terminal line through the session as key presses.
///
/// An Enter rejected while busy is replayed as Shift+Enter so the next line
/// does not run into this one.
pub fn feed_line(session: &ChatSession, line: &str) -> LineOutcome {
    let mut outcome = LineOutcome::Edited;
    for press in line_to_keys(line) {
        match session.handle_key(press) {
            KeyOutcome::Submitted(pending) => outcome = LineOutcome::Submitted(pending),
            KeyOutcome::Rejected(IgnoreReason::Busy) => {
                tracing::debug!("Still waiting for the previous reply");
                session.handle_key(KeyPress::shift_enter());
                outcome = LineOutcome::Held;
            }
            KeyOutcome::Rejected(IgnoreReason::Empty)
            | KeyOutcome::Edited
            | KeyOutcome::Ignored => {}
        }
    }
    outcome
}

/// Renders session changes to stdout
pub struct ConsoleView {
    name: String,
}

impl ConsoleView {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl SessionObserver for ConsoleView {
    fn transcript_changed(&self, latest: &MessageEntry, _version: u64) {
        // New output always lands at the bottom of the terminal
        println!("{}", render_entry(&self.name, latest));
    }

    fn busy_changed(&self, busy: bool) {
        println!("{}", busy_indicator(&self.name, busy));
    }
}

/// Console front end for local use
pub struct ConsoleAdapter {
    config: ConsoleConfig,
}

impl ConsoleAdapter {
    pub fn new(config: ConsoleConfig) -> Self {
        Self { config }
    }

    fn print_banner(&self) {
        println!("Welcome to {}", self.config.name);
        println!("Ask about workouts, nutrition, or health. End a line with '\\' for a newline.");
        if self.config.show_suggestions {
            for (i, suggestion) in Suggestion::ALL.iter().enumerate() {
                println!("  /{}  {}", i + 1, suggestion.text());
            }
        }
        println!("Type /help for commands, /quit to leave.");
    }

    fn print_help(&self) {
        println!("/1, /2   fill the draft with a suggestion (press Enter to send)");
        println!("/help    show this message");
        println!("/quit    leave the chat");
    }

    fn prompt(&self) {
        print!("{}", self.config.prompt);
        let _ = std::io::stdout().flush();
    }

    /// Read stdin on a plain thread so a pending reply never blocks typing.
    fn spawn_reader() -> mpsc::Receiver<String> {
        let (tx, rx) = mpsc::channel(16);
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to read stdin: {}", e);
                        break;
                    }
                }
            }
        });
        rx
    }

    /// Run the chat loop until `/quit` or end of input
    pub async fn run(&self, session: ChatSession) -> Result<(), ChatError> {
        tracing::info!("Starting console chat");
        self.print_banner();
        self.prompt();

        let mut lines = Self::spawn_reader();
        let mut in_flight: Option<JoinHandle<SubmitOutcome>> = None;

        while let Some(line) = lines.recv().await {
            match ConsoleCommand::parse(&line) {
                Some(ConsoleCommand::Quit) => {
                    tracing::info!("Console chat closed");
                    return Ok(());
                }
                Some(ConsoleCommand::Help) => self.print_help(),
                Some(ConsoleCommand::Suggest(suggestion)) => {
                    session.apply_suggestion(suggestion);
                    println!("[draft] {}", session.draft());
                }
                None => match feed_line(&session, &line) {
                    LineOutcome::Submitted(pending) => {
                        in_flight = Some(tokio::spawn(pending.settle()));
                    }
                    LineOutcome::Held => {
                        println!("[draft] {}, waiting for reply", session.draft().trim_end());
                    }
                    LineOutcome::Edited => {}
                },
            }
            self.prompt();
        }

        // Input closed; let the last reply land before exiting
        if let Some(handle) = in_flight {
            if let Err(e) = handle.await {
                tracing::warn!("Submission task failed: {}", e);
            }
        }
        Ok(())
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new(ConsoleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::errors::AssistantError;
    use crate::application::services::Key;
    use crate::domain::traits::Assistant;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    /// Records what was sent and answers "ok" once the gate opens
    struct GatedAssistant {
        sent: Mutex<Vec<String>>,
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl Assistant for GatedAssistant {
        fn name(&self) -> &str {
            "gated"
        }

        async fn reply(&self, message: &str) -> Result<String, AssistantError> {
            self.sent.lock().unwrap().push(message.to_string());
            self.gate.notified().await;
            Ok("ok".to_string())
        }
    }

    #[tokio::test]
    async fn test_line_typed_while_busy_stays_on_its_own_line() {
        let gate = Arc::new(Notify::new());
        let assistant = Arc::new(GatedAssistant {
            sent: Mutex::new(Vec::new()),
            gate: gate.clone(),
        });
        let session = ChatSession::new(assistant.clone());

        let first = match feed_line(&session, "first") {
            LineOutcome::Submitted(pending) => pending,
            other => panic!("expected submission, got {:?}", other),
        };
        let first = tokio::spawn(first.settle());

        assert!(matches!(feed_line(&session, "second"), LineOutcome::Held));
        assert_eq!(session.draft(), "second\n");

        gate.notify_one();
        first.await.unwrap();
        assert!(!session.is_busy());

        let third = match feed_line(&session, "third") {
            LineOutcome::Submitted(pending) => pending,
            other => panic!("expected submission, got {:?}", other),
        };
        gate.notify_one();
        third.settle().await;

        assert_eq!(
            *assistant.sent.lock().unwrap(),
            vec!["first".to_string(), "second\nthird".to_string()]
        );
    }

    #[test]
    fn test_busy_indicator_shows_start_and_clear() {
        assert_eq!(busy_indicator("Coach", true), "… Coach is thinking");
        assert_eq!(busy_indicator("Coach", false), "… Coach is ready");
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(ConsoleCommand::parse("/quit"), Some(ConsoleCommand::Quit));
        assert_eq!(ConsoleCommand::parse(" /exit "), Some(ConsoleCommand::Quit));
        assert_eq!(ConsoleCommand::parse("/help"), Some(ConsoleCommand::Help));
        assert_eq!(
            ConsoleCommand::parse("/1"),
            Some(ConsoleCommand::Suggest(Suggestion::MealPlan))
        );
        assert_eq!(
            ConsoleCommand::parse("/2"),
            Some(ConsoleCommand::Suggest(Suggestion::CoreStrength))
        );
        assert_eq!(ConsoleCommand::parse("/3"), None);
        assert_eq!(ConsoleCommand::parse("how many reps?"), None);
    }

    #[test]
    fn test_line_ends_with_enter() {
        let keys = line_to_keys("hi");
        assert_eq!(keys, vec![KeyPress::char('h'), KeyPress::char('i'), KeyPress::enter()]);
    }

    #[test]
    fn test_trailing_backslash_is_shift_enter() {
        let keys = line_to_keys("a\\");
        assert_eq!(keys, vec![KeyPress::char('a'), KeyPress::shift_enter()]);
        assert!(keys.iter().all(|k| !k.is_submit()));
    }

    #[test]
    fn test_empty_line_is_bare_enter() {
        let keys = line_to_keys("");
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].key, Key::Enter);
    }

    #[test]
    fn test_render_entry_labels_and_indents() {
        assert_eq!(render_entry("Coach", &MessageEntry::user("hi")), "You: hi");
        assert_eq!(
            render_entry("Coach", &MessageEntry::bot("line 1\nline 2")),
            "Coach: line 1\n       line 2"
        );
    }
}

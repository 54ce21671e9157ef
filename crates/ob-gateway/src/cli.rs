//! CLI (Command Line Interface) mode
//!
//! Interactive REPL that drives the same chat service as the HTTP API,
//! bound to a single session.

use std::sync::Arc;

use nu_ansi_term::{Color, Style};
use ob_core::{ChatService, Message, MessageContent};
use ob_users::{report, UserStore};
use reedline::{
    ColumnarMenu, Completer, DefaultHinter, Emacs, KeyCode, KeyModifiers, Keybindings,
    MenuBuilder, Prompt, Reedline, ReedlineEvent, ReedlineMenu, Signal, Suggestion,
};
use tracing::info;

/// Available commands for autocomplete display
const COMMANDS: &[(&str, &str)] = &[
    ("/help", "Show this help"),
    ("/history", "Show the session transcript"),
    ("/users", "List all user records"),
    ("/reset", "Forget this session"),
    ("/exit", "Quit"),
];

/// Command completer for reedline
#[derive(Clone)]
pub struct CommandCompleter {
    commands: Vec<(&'static str, &'static str)>,
}

impl CommandCompleter {
    pub fn new() -> Self {
        Self {
            commands: COMMANDS.to_vec(),
        }
    }
}

impl Default for CommandCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl Completer for CommandCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        if !line.starts_with('/') {
            return Vec::new();
        }

        self.commands
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(line))
            .map(|(cmd, desc)| Suggestion {
                value: cmd.to_string(),
                description: Some(desc.to_string()),
                extra: None,
                span: reedline::Span::new(0, pos),
                append_whitespace: true,
                style: None,
            })
            .collect()
    }
}

/// Prompt showing the active session id
struct SessionPrompt {
    session_id: String,
    style: Style,
}

impl SessionPrompt {
    fn new(session_id: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            style: Color::Cyan.bold(),
        }
    }
}

impl Prompt for SessionPrompt {
    fn render_prompt_left(&self) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Owned(
            self.style
                .paint(format!("[{}] > ", self.session_id))
                .to_string(),
        )
    }

    fn render_prompt_right(&self) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("")
    }

    fn render_prompt_indicator(
        &self,
        _prompt_mode: reedline::PromptEditMode,
    ) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("")
    }

    fn render_prompt_history_search_indicator(
        &self,
        _history_search: reedline::PromptHistorySearch,
    ) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("")
    }
}

/// What to do after a line was read
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    History,
    Users,
    Reset,
    Exit,
    Unknown(String),
}

/// Parse a slash command; `None` means the line is a chat message
fn parse_command(input: &str) -> Option<Command> {
    let lower = input.to_lowercase();
    let command = match lower.as_str() {
        "/help" | "/?" => Command::Help,
        "/history" => Command::History,
        "/users" => Command::Users,
        "/reset" | "/clear" => Command::Reset,
        "/exit" | "/quit" | "/q" => Command::Exit,
        _ if lower.starts_with('/') => Command::Unknown(input.to_string()),
        _ => return None,
    };
    Some(command)
}

/// Run CLI interactive mode against one session
pub async fn run_cli(
    chat: Arc<ChatService>,
    users: Arc<UserStore>,
    session_id: String,
) -> anyhow::Result<()> {
    ob_core::session::validate_session_id(&session_id)?;
    info!(
        "Starting CLI mode for session {} with {} tools",
        session_id,
        chat.tools().len()
    );

    print_welcome(&session_id);

    let mut keybindings = default_keybindings();
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Char('/'),
        ReedlineEvent::Edit(vec![reedline::EditCommand::Complete]),
    );

    let menu = Box::new(
        ColumnarMenu::default()
            .with_name("command_menu")
            .with_columns(1)
            .with_column_width(Some(40))
            .with_only_buffer_difference(false),
    );

    let hinter = DefaultHinter::default().with_style(Style::new().dimmed());

    let mut line_editor = Reedline::create()
        .with_completer(Box::new(CommandCompleter::new()))
        .with_menu(ReedlineMenu::EngineCompleter(menu))
        .with_hinter(Box::new(hinter))
        .with_edit_mode(Box::new(Emacs::new(keybindings)));

    let prompt = SessionPrompt::new(&session_id);

    loop {
        match line_editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }

                match parse_command(input) {
                    Some(Command::Exit) => break,
                    Some(command) => run_command(command, &chat, &users, &session_id).await,
                    None => match chat.chat(&session_id, input).await {
                        Ok(response) => println!("\n{}\n", response),
                        Err(e) => eprintln!("\n❌ Error: {}\n", e),
                    },
                }
            }
            Ok(Signal::CtrlC) => {
                println!("^C");
                continue;
            }
            Ok(Signal::CtrlD) => break,
            Err(err) => {
                eprintln!("\n❌ Error: {}\n", err);
                break;
            }
        }
    }

    println!("\n👋 Bye!\n");
    Ok(())
}

async fn run_command(command: Command, chat: &ChatService, users: &UserStore, session_id: &str) {
    match command {
        Command::Help => print_help(),
        Command::History => match chat.history(session_id).await {
            Ok(Some(messages)) => print_history(&messages),
            Ok(None) => println!("\n(no messages yet)\n"),
            Err(e) => eprintln!("\n❌ Error: {}\n", e),
        },
        Command::Users => match users.list().await {
            Ok(records) => println!("\n{}\n", report::listing(&records)),
            Err(e) => eprintln!("\n❌ Error: {}\n", e),
        },
        Command::Reset => match chat.reset(session_id).await {
            Ok(true) => println!("\n✅ Session {} cleared.\n", session_id),
            Ok(false) => println!("\n(session {} had no saved state)\n", session_id),
            Err(e) => eprintln!("\n❌ Error: {}\n", e),
        },
        Command::Unknown(input) => {
            eprintln!("\n❓ Unknown command: {}. Type /help for the list.\n", input);
        }
        Command::Exit => {}
    }
}

/// Default keybindings for reedline
fn default_keybindings() -> Keybindings {
    let mut keybindings = Keybindings::new();
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::Edit(vec![reedline::EditCommand::Complete]),
    );
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Enter, ReedlineEvent::Submit);
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Esc, ReedlineEvent::Esc);
    keybindings.add_binding(
        KeyModifiers::CONTROL,
        KeyCode::Char('c'),
        ReedlineEvent::CtrlC,
    );
    keybindings.add_binding(
        KeyModifiers::CONTROL,
        KeyCode::Char('d'),
        ReedlineEvent::CtrlD,
    );
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Up, ReedlineEvent::Up);
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Down, ReedlineEvent::Down);
    keybindings
}

fn print_welcome(session_id: &str) {
    println!();
    println!("🤖 ob-gateway CLI - session {}", session_id);
    println!("Type a message and press Enter to chat.");
    println!("Commands: /help, /history, /users, /reset, /exit");
    println!();
}

fn print_help() {
    println!();
    println!("📖 Available commands:");
    for (cmd, desc) in COMMANDS {
        println!("  {:<10} {}", cmd, desc);
    }
    println!();
}

/// One line per transcript entry, tool traffic summarized
fn describe(message: &Message) -> String {
    message
        .content
        .iter()
        .map(|block| match block {
            MessageContent::Text { text } => text.replace('\n', " "),
            MessageContent::ToolUse { name, input, .. } => format!("⚙️ {}({})", name, input),
            MessageContent::ToolResult { content, is_error, .. } => {
                let mark = if *is_error { "✗" } else { "✓" };
                format!("{} {}", mark, content.replace('\n', " "))
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn print_history(messages: &[Message]) {
    println!();
    println!("📜 Transcript ({} messages):", messages.len());
    println!("{}", "─".repeat(50));

    for (i, msg) in messages.iter().enumerate() {
        let role = match msg.role.as_str() {
            "user" => "👤 user",
            "assistant" => "🤖 assistant",
            other => other,
        };
        let text = describe(msg);
        let preview = if text.chars().count() > 120 {
            format!("{}...", text.chars().take(120).collect::<String>())
        } else {
            text
        };
        println!("{}. {}: {}", i + 1, role, preview);
    }

    println!("{}", "─".repeat(50));
    println!();
}

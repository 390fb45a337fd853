//! CLI (Command Line Interface) mode
//!
//! Drives the same command dispatcher as the Telegram bot from a local
//! REPL, which is handy for trying a search API token without a bot.
//! Also supports one-shot execution of a single command.

use std::borrow::Cow;

use nu_ansi_term::{Color, Style};
use reedline::{
    ColumnarMenu, Completer, DefaultHinter, Emacs, KeyCode, KeyModifiers, Keybindings,
    MenuBuilder, Prompt, Reedline, ReedlineEvent, ReedlineMenu, Signal, Suggestion,
};
use sg_core::{Command, Dispatcher, Reply};
use tracing::info;

/// Session key used for the local user
const CLI_USER: &str = "cli";

/// Commands handled by the REPL itself
const LOCAL_COMMANDS: &[(&str, &str)] = &[("exit", "Quit the program"), ("quit", "Quit the program")];

/// Command completer for reedline
#[derive(Clone)]
pub struct CommandCompleter {
    commands: Vec<(&'static str, &'static str)>,
}

impl CommandCompleter {
    pub fn new() -> Self {
        Self {
            commands: Command::menu()
                .iter()
                .chain(LOCAL_COMMANDS.iter())
                .copied()
                .collect(),
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
        let Some(typed) = line.strip_prefix('/') else {
            return Vec::new();
        };

        self.commands
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(typed))
            .map(|(cmd, desc)| Suggestion {
                value: format!("/{}", cmd),
                description: Some(desc.to_string()),
                extra: None,
                span: reedline::Span::new(0, pos),
                append_whitespace: true,
                style: None,
            })
            .collect()
    }
}

/// Custom prompt with colored styling
struct ColoredPrompt {
    style: Style,
}

impl ColoredPrompt {
    fn new() -> Self {
        Self {
            style: Color::Cyan.bold(),
        }
    }
}

impl Prompt for ColoredPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Owned(self.style.paint("shop> ").to_string())
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _prompt_mode: reedline::PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_history_search_indicator(
        &self,
        _history_search: reedline::PromptHistorySearch,
    ) -> Cow<'_, str> {
        Cow::Borrowed("")
    }
}

/// Run CLI interactive mode
pub async fn run_cli(dispatcher: Dispatcher) -> anyhow::Result<()> {
    info!("Starting CLI mode");

    print_welcome();

    let mut keybindings = default_keybindings();

    // Trigger completion on '/' key
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Char('/'),
        ReedlineEvent::Edit(vec![reedline::EditCommand::Complete]),
    );

    let menu = Box::new(
        ColumnarMenu::default()
            .with_name("command_menu")
            .with_columns(1)
            .with_column_width(Some(60))
            .with_only_buffer_difference(false),
    );

    let hinter = DefaultHinter::default().with_style(Style::new().dimmed());

    let mut line_editor = Reedline::create()
        .with_completer(Box::new(CommandCompleter::new()))
        .with_menu(ReedlineMenu::EngineCompleter(menu))
        .with_hinter(Box::new(hinter))
        .with_edit_mode(Box::new(Emacs::new(keybindings)));

    let prompt = ColoredPrompt::new();

    loop {
        match line_editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => {
                let input = line.trim();

                if input.is_empty() {
                    continue;
                }

                if is_exit(input) {
                    println!("\nBye!\n");
                    break;
                }

                let replies = dispatcher.handle(CLI_USER, input).await;
                print_replies(&replies);
            }
            Ok(Signal::CtrlC) => {
                println!("^C");
                continue;
            }
            Ok(Signal::CtrlD) => {
                println!("\nBye!\n");
                break;
            }
            Err(err) => {
                eprintln!("\nError: {}\n", err);
                break;
            }
        }
    }

    Ok(())
}

/// Run a single command and print the replies
pub async fn run_execute(dispatcher: &Dispatcher, command: &str) -> anyhow::Result<()> {
    let replies = dispatcher.handle(CLI_USER, command).await;
    print_replies(&replies);
    Ok(())
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
    keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Char('c'), ReedlineEvent::CtrlC);
    keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Char('d'), ReedlineEvent::CtrlD);
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Up, ReedlineEvent::Up);
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Down, ReedlineEvent::Down);
    keybindings
}

fn is_exit(input: &str) -> bool {
    matches!(input.to_lowercase().as_str(), "/exit" | "/quit" | "/q")
}

fn format_reply(reply: &Reply) -> String {
    match reply {
        Reply::Text(text) => text.clone(),
        Reply::Photo(url) => Color::DarkGray.paint(format!("[image] {}", url)).to_string(),
    }
}

fn print_replies(replies: &[Reply]) {
    println!();
    for reply in replies {
        println!("{}\n", format_reply(reply));
    }
}

fn print_welcome() {
    println!();
    println!("shopgate CLI - interactive mode");
    println!("Type /help for the bot commands, /exit to quit.");
    println!("Typing / shows command suggestions.");
    println!();
}

use crate::config::Config as ChefConfig;
use crate::core::error::ChefError;

use console::style;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::history::FileHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Context, EditMode, Editor, Helper};
use std::borrow::Cow;

/// Slash commands understood by interactive mode.
pub const COMMANDS: [&str; 3] = ["help", "image", "quit"];

/// What the user typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLine {
    Ingredients(String),
    Image(String),
    Help,
    Quit,
    Unknown(String),
    Empty,
}

pub fn parse_line(line: &str) -> InputLine {
    let line = line.trim();
    if line.is_empty() {
        return InputLine::Empty;
    }

    let Some(command) = line.strip_prefix('/') else {
        return InputLine::Ingredients(line.to_string());
    };

    let (name, rest) = command
        .split_once(char::is_whitespace)
        .map(|(n, r)| (n, r.trim()))
        .unwrap_or((command, ""));

    match name {
        "quit" | "exit" => InputLine::Quit,
        "help" => InputLine::Help,
        "image" => InputLine::Image(rest.to_string()),
        other => InputLine::Unknown(other.to_string()),
    }
}

pub fn help_text() -> String {
    [
        style("Enter ingredients separated by commas to get a recipe.")
            .bold()
            .to_string(),
        "/image <description> - Generate an image only".to_string(),
        "/help - Show this help".to_string(),
        "/quit - Exit".to_string(),
    ]
    .join("\n")
}

pub struct IngredientHelper {
    hinter: HistoryHinter,
}

impl IngredientHelper {
    pub fn new() -> Self {
        Self {
            hinter: HistoryHinter {},
        }
    }
}

impl Default for IngredientHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for IngredientHelper {}

impl Completer for IngredientHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Only complete a command name with the cursor after the slash.
        let typed = match line.get(..pos).and_then(|head| head.strip_prefix('/')) {
            Some(typed) if !typed.contains(' ') => typed,
            _ => return Ok((pos, Vec::new())),
        };

        let matches = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(typed))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((1, matches))
    }
}

impl Hinter for IngredientHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for IngredientHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(style(hint).dim().to_string())
    }
}

impl Validator for IngredientHelper {}

pub type IngredientEditor = Editor<IngredientHelper, FileHistory>;

/// Creates a configured rustyline editor with history from previous sessions
pub fn create_editor() -> Result<IngredientEditor, ChefError> {
    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(false)
        .completion_type(CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();

    let mut editor: IngredientEditor = Editor::with_config(config)?;
    editor.set_helper(Some(IngredientHelper::new()));

    let history_path = ChefConfig::history_path();
    if let Err(e) = editor.load_history(&history_path) {
        tracing::debug!(path = %history_path.display(), error = %e, "No input history loaded");
    }

    Ok(editor)
}

/// Reads a line of input; `None` on Ctrl-C / Ctrl-D
pub fn read_input(editor: &mut IngredientEditor) -> Result<Option<String>, ChefError> {
    let prompt = if cfg!(windows) && std::env::var("PSModulePath").is_ok() {
        "🥕 > ".to_string()
    } else {
        style("🥕 > ").bold().cyan().to_string()
    };
    match editor.readline(&prompt) {
        Ok(line) => {
            if !line.trim().is_empty() {
                editor.add_history_entry(line.as_str())?;
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
            println!("Exiting...");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

pub fn save_history(editor: &mut IngredientEditor) -> Result<(), ChefError> {
    let history_path = ChefConfig::history_path();

    if let Some(parent) = history_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    editor.save_history(&history_path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustyline::history::DefaultHistory;

    #[test]
    fn plain_lines_are_ingredients() {
        assert_eq!(
            parse_line("  eggs, leeks , cream "),
            InputLine::Ingredients("eggs, leeks , cream".to_string())
        );
        assert_eq!(parse_line("   "), InputLine::Empty);
    }

    #[test]
    fn slash_commands() {
        assert_eq!(parse_line("/quit"), InputLine::Quit);
        assert_eq!(parse_line("/exit"), InputLine::Quit);
        assert_eq!(parse_line("/help"), InputLine::Help);
        assert_eq!(
            parse_line("/image  Lemon Tart "),
            InputLine::Image("Lemon Tart".to_string())
        );
        assert_eq!(parse_line("/image"), InputLine::Image(String::new()));
        assert_eq!(parse_line("/bake"), InputLine::Unknown("bake".to_string()));
    }

    fn completions(line: &str, pos: usize) -> (usize, Vec<String>) {
        let history = DefaultHistory::new();
        let (start, pairs) = IngredientHelper::new()
            .complete(line, pos, &Context::new(&history))
            .unwrap();
        (start, pairs.into_iter().map(|p| p.replacement).collect())
    }

    #[test]
    fn completes_command_names_after_slash() {
        assert_eq!(completions("/ima", 4), (1, vec!["image".to_string()]));
        assert_eq!(completions("/", 1).1.len(), COMMANDS.len());
        assert_eq!(completions("/image Lem", 10).1, Vec::<String>::new());
        assert_eq!(completions("eggs", 4).1, Vec::<String>::new());
    }

    #[test]
    fn cursor_at_line_start_offers_nothing() {
        assert_eq!(completions("/ima", 0), (0, Vec::new()));
    }
}

use crate::core::error::AdvisorError;

use console::style;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Context, EditMode, Editor, Helper};

/// Completes slash commands and the option names offered by the current question.
pub struct AdvisorCompleter {
    commands: Vec<String>,
    options: Vec<String>,
}

impl AdvisorCompleter {
    pub fn new(commands: Vec<String>) -> Self {
        Self {
            commands,
            options: Vec::new(),
        }
    }
}

impl Completer for AdvisorCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let typed = &line[..pos];

        if let Some(command_part) = typed.strip_prefix('/') {
            let matches = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(command_part))
                .map(|cmd| Pair {
                    display: format!("/{}", cmd),
                    replacement: cmd.to_string(),
                })
                .collect();
            return Ok((1, matches)); // 1 is the position after '/'
        }

        // Option names may contain spaces, so match against the whole line
        let needle = typed.trim_start().to_lowercase();
        let start = typed.len() - typed.trim_start().len();
        let matches = self
            .options
            .iter()
            .filter(|option| option.to_lowercase().starts_with(&needle))
            .map(|option| Pair {
                display: option.clone(),
                replacement: option.clone(),
            })
            .collect();
        Ok((start, matches))
    }
}

pub struct AdvisorHelper {
    completer: AdvisorCompleter,
    hinter: HistoryHinter,
}

impl AdvisorHelper {
    pub fn new(commands: Vec<String>) -> Self {
        Self {
            completer: AdvisorCompleter::new(commands),
            hinter: HistoryHinter {},
        }
    }

    /// Swaps in the options of the question being asked.
    pub fn set_options(&mut self, options: &[&str]) {
        self.completer.options = options.iter().map(|o| o.to_string()).collect();
    }
}

impl Helper for AdvisorHelper {}

impl Completer for AdvisorHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        self.completer.complete(line, pos, ctx)
    }
}

impl Hinter for AdvisorHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for AdvisorHelper {}

impl Validator for AdvisorHelper {}

pub type AdvisorEditor = Editor<AdvisorHelper, DefaultHistory>;

/// Creates a configured rustyline editor. History is kept in memory only.
pub fn create_editor(commands: Vec<String>) -> Result<AdvisorEditor, AdvisorError> {
    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();

    let mut editor = Editor::with_config(config)
        .map_err(|e| AdvisorError::Input(format!("Failed to create line editor: {}", e)))?;
    editor.set_helper(Some(AdvisorHelper::new(commands)));

    Ok(editor)
}

pub fn set_options(editor: &mut AdvisorEditor, options: &[&str]) {
    if let Some(helper) = editor.helper_mut() {
        helper.set_options(options);
    }
}

/// Reads a line. `Ok(None)` means the user pressed Ctrl-C or Ctrl-D.
pub fn read_input(editor: &mut AdvisorEditor, prompt: &str) -> Result<Option<String>, AdvisorError> {
    let prompt = if cfg!(windows) && std::env::var("PSModulePath").is_ok() {
        format!("{} ", prompt)
    } else {
        style(format!("{} ", prompt)).bold().cyan().to_string()
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

/// Resolves a selection line against the offered options.
///
/// Accepts option numbers separated by spaces or commas (`1 3`, `2,5`) or a
/// typed answer. A typed answer matching an option case-insensitively is
/// normalised to that option; anything else is taken as the student's own
/// wording. Out-of-range numbers are reported as an input error.
pub fn parse_selection(line: &str, options: &[&str]) -> Result<Vec<String>, AdvisorError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Vec::new());
    }

    let tokens: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();

    if tokens.iter().all(|t| t.chars().all(|c| c.is_ascii_digit())) {
        let mut picked = Vec::new();
        for token in tokens {
            let index: usize = token
                .parse()
                .map_err(|_| AdvisorError::Input(format!("not a number: {}", token)))?;
            let option = index
                .checked_sub(1)
                .and_then(|i| options.get(i))
                .ok_or_else(|| {
                    AdvisorError::Input(format!(
                        "{} is not one of the options (1-{})",
                        index,
                        options.len()
                    ))
                })?;
            picked.push(option.to_string());
        }
        return Ok(picked);
    }

    Ok(vec![typed_answer(line, options)])
}

/// Resolves the single budget answer.
///
/// An option number picks that option. Anything else, including amounts such
/// as `150000` or `200,000`, is a typed answer. Several option numbers are an
/// input error.
pub fn parse_budget(line: &str, options: &[&str]) -> Result<String, AdvisorError> {
    let line = line.trim();
    let option_at = |token: &str| {
        token
            .parse::<usize>()
            .ok()
            .and_then(|index| index.checked_sub(1))
            .and_then(|i| options.get(i))
    };

    if let Some(option) = option_at(line) {
        return Ok(option.to_string());
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() > 1 && tokens.iter().all(|t| option_at(t).is_some()) {
        return Err(AdvisorError::Input("choose a single budget".to_string()));
    }

    Ok(typed_answer(line, options))
}

fn typed_answer(line: &str, options: &[&str]) -> String {
    options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(line))
        .map(|option| option.to_string())
        .unwrap_or_else(|| line.to_string())
}

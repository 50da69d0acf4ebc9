//! Line-oriented terminal session.
//!
//! Each input line is one command; commands map onto [`Action`]s except for
//! the few that only inspect state (`list`, `show`, `help`, `quit`).

use prompt_primitives::PromptId;
use prompt_store::KeyValueBackend;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::action::Action;
use crate::controller::Controller;
use crate::view::format_editor;

/// Help text printed by the `help` command.
pub const HELP: &str = "\
commands:
  list                 show the (filtered) prompt list
  new                  start a new draft
  title <text>         set the draft title
  content <text>       set the draft content (HTML allowed)
  save                 save the draft
  select <id>          load a prompt into the editor
  delete <id>          remove a prompt
  search [term]        filter the list by title (empty term clears)
  copy                 copy title and content to the clipboard
  show                 print the editor contents
  help                 print this help
  quit                 leave
";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forward to the controller.
    Action(Action),
    /// Re-render the list.
    List,
    /// Print the editor contents.
    Show,
    /// Print the help text.
    Help,
    /// End the session.
    Quit,
}

/// Errors produced while parsing an input line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The command word is not recognised.
    #[error("unknown command `{0}` (try `help`)")]
    UnknownCommand(String),
    /// The command needs an argument that was not given.
    #[error("`{0}` needs a prompt id")]
    MissingId(&'static str),
}

/// Parses one input line. Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns [`ParseError`] for unknown commands or missing ids.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let id = |command: &'static str| {
        if rest.is_empty() {
            Err(ParseError::MissingId(command))
        } else {
            Ok(PromptId::from(rest))
        }
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "list" | "ls" => Command::List,
        "new" => Command::Action(Action::New),
        "title" => Command::Action(Action::EditTitle(rest.to_owned())),
        "content" => Command::Action(Action::EditContent(rest.to_owned())),
        "save" => Command::Action(Action::Save),
        "select" => Command::Action(Action::Select(id("select")?)),
        "delete" | "rm" => Command::Action(Action::Delete(id("delete")?)),
        "search" => Command::Action(Action::Search(rest.to_owned())),
        "copy" => Command::Action(Action::Copy),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(ParseError::UnknownCommand(word.to_owned())),
    };
    Ok(Some(command))
}

/// Reads commands from `input` until `quit` or end of input.
///
/// # Errors
///
/// Propagates I/O errors from reading `input`.
pub async fn run<B, R>(controller: &mut Controller<B>, input: R) -> std::io::Result<()>
where
    B: KeyValueBackend,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => print!("{HELP}"),
            Ok(Some(Command::List)) => controller.refresh(),
            Ok(Some(Command::Show)) => print!(
                "{}",
                format_editor(controller.editor(), controller.store().selection())
            ),
            Ok(Some(Command::Action(action))) => controller.dispatch(action).await,
            Err(error) => println!("? {error}"),
        }
    }
    Ok(())
}

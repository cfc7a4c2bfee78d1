//! Line-oriented terminal shell
//!
//! Each input line becomes one command. Commands that talk to the server are
//! sent to the store as intents and are never awaited here, so several
//! requests can be in flight at once. A separate renderer task redraws the
//! view every time an outcome has been applied. Both write through one
//! [`Console`].

use crate::types::{TodoAction, TodoId};
use crate::{view, TodoStore};
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};
use tasksync_runtime::{EffectHandle, StoreError};
use thiserror::Error;
use tokio::io::{AsyncBufRead, Lines};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

/// Help text printed by `help`
pub const HELP: &str = "\
commands:
  add <title>      (a)       create a todo
  toggle <id>      (t)       flip completion
  delete <id>      (d, rm)   delete a todo
  list             (ls)      show the list
  refresh                    reload from the server
  help                       show this text
  quit             (exit)    leave after pending requests finish
";

/// Output shared by the shell loop and the renderer task
///
/// Each block is written and flushed under a single lock, so a redraw never
/// lands in the middle of another message.
#[derive(Debug)]
pub struct Console<W> {
    out: Arc<Mutex<W>>,
}

impl<W> Clone for Console<W> {
    fn clone(&self) -> Self {
        Self {
            out: Arc::clone(&self.out),
        }
    }
}

impl<W: Write> Console<W> {
    /// Wraps a writer
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
        }
    }

    /// Writes `text` as one uninterrupted block and flushes it
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    pub fn write_block(&self, text: &str) -> std::io::Result<()> {
        // A panic while holding the lock leaves at worst a partial line
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        out.write_all(text.as_bytes())?;
        out.flush()
    }
}

/// A parsed shell command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Create a todo with the given title
    Add(String),
    /// Flip the completion flag of a todo
    Toggle(TodoId),
    /// Delete a todo
    Delete(TodoId),
    /// Redraw the current view
    List,
    /// Reload the list from the server
    Refresh,
    /// Print the help text
    Help,
    /// Leave the shell
    Quit,
}

/// Errors for lines that are not valid commands
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    /// First word is not a known command
    #[error("Unknown command {0:?} (try `help`)")]
    UnknownCommand(String),

    /// Command needs an argument that was not given
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    /// Argument is not a numeric id
    #[error("Not a todo id: {0:?}")]
    InvalidId(String),
}

impl Command {
    /// Parses one input line
    ///
    /// Returns `Ok(None)` for a blank line.
    ///
    /// # Errors
    ///
    /// Returns a [`ShellError`] if the line is not a valid command.
    pub fn parse(line: &str) -> Result<Option<Self>, ShellError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        let command = match word {
            "add" | "a" => {
                if rest.is_empty() {
                    return Err(ShellError::MissingArgument("add"));
                }
                Self::Add(rest.to_string())
            },
            "toggle" | "t" => Self::Toggle(parse_id("toggle", rest)?),
            "delete" | "d" | "rm" => Self::Delete(parse_id("delete", rest)?),
            "list" | "ls" => Self::List,
            "refresh" => Self::Refresh,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(ShellError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_id(command: &'static str, arg: &str) -> Result<TodoId, ShellError> {
    if arg.is_empty() {
        return Err(ShellError::MissingArgument(command));
    }
    arg.parse()
        .map_err(|_| ShellError::InvalidId(arg.to_string()))
}

/// What the shell did with a command
#[derive(Debug)]
pub enum Step {
    /// An intent was sent; the handle completes once its outcome is applied
    Sent(EffectHandle),
    /// The id is not in the local list, nothing was sent
    UnknownId(TodoId),
    /// The view should be redrawn now
    Render,
    /// The help text should be printed
    Help,
    /// The shell should stop reading input
    Quit,
}

/// Executes one command against the store
///
/// # Errors
///
/// Returns [`StoreError::ShutdownInProgress`] if the store no longer accepts
/// intents.
pub async fn execute(store: &TodoStore, command: Command) -> Result<Step, StoreError> {
    match command {
        Command::Add(title) => store.send(TodoAction::Submit { title }).await.map(Step::Sent),
        Command::Toggle(id) => {
            let Some(completed) = store.state(|s| s.get(id).map(|t| t.completed)).await else {
                return Ok(Step::UnknownId(id));
            };
            store
                .send(TodoAction::Toggle { id, completed })
                .await
                .map(Step::Sent)
        },
        Command::Delete(id) => store.send(TodoAction::Delete { id }).await.map(Step::Sent),
        Command::Refresh => store.send(TodoAction::Refresh).await.map(Step::Sent),
        Command::List => Ok(Step::Render),
        Command::Help => Ok(Step::Help),
        Command::Quit => Ok(Step::Quit),
    }
}

/// Reads commands until `quit` or end of input
///
/// Does not wait for requests that are still in flight; shut the store down
/// afterwards for that.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails, or if the store
/// is already shutting down.
pub async fn run<R, W>(
    store: &TodoStore,
    mut lines: Lines<R>,
    console: &Console<W>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                console.write_block(&format!("{error}\n"))?;
                continue;
            },
        };

        tracing::debug!(?command, "Executing shell command");

        match execute(store, command).await? {
            Step::Sent(_) => {},
            Step::UnknownId(id) => console.write_block(&format!("No todo with id {id}\n"))?,
            Step::Render => console.write_block(&store.state(view::render).await)?,
            Step::Help => console.write_block(HELP)?,
            Step::Quit => break,
        }
    }

    Ok(())
}

/// Spawns a task that redraws the view after every applied outcome
///
/// The task runs until it is aborted.
#[must_use]
pub fn spawn_renderer<W>(store: &TodoStore, console: Console<W>) -> JoinHandle<()>
where
    W: Write + Send + 'static,
{
    let mut actions = store.subscribe_actions();
    let store = store.clone();

    tokio::spawn(async move {
        loop {
            match actions.recv().await {
                Ok(action) => tracing::trace!(action = action.name(), "Redrawing"),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Renderer lagged, drawing latest state");
                },
                Err(RecvError::Closed) => break,
            }

            let view = store.state(view::render).await;
            if let Err(error) = console.write_block(&view) {
                tracing::warn!(%error, "Could not draw view");
                break;
            }
        }
    })
}

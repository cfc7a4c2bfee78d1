//! Task-list client that keeps a local view of a remote todo collection.
//!
//! The client talks to a JSON API with four calls (list, create, toggle,
//! delete) and mirrors the server's answers into a [`TodoState`]. Every
//! change to the list is applied only after the server has confirmed it.
//!
//! - [`api`]: the remote collection client ([`HttpTodoApi`])
//! - [`reducer`]: intents, outcomes and the effects that connect them
//! - [`shell`] and [`view`]: the terminal surface used by the binary
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tasksync::{ClientConfig, HttpTodoApi, TodoAction, TodoEnvironment, TodoStore};
//! use tasksync::{TodoReducer, TodoState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! let env = TodoEnvironment::new(Arc::new(HttpTodoApi::new(&config)));
//! let store = TodoStore::new(TodoState::new(), TodoReducer::new(), env);
//!
//! // Load the list and wait for the answer to be applied
//! store.send(TodoAction::Refresh).await?.wait().await;
//!
//! store.send(TodoAction::DraftChanged { text: "buy milk".into() }).await?;
//! store.send(TodoAction::SubmitDraft).await?.wait().await;
//!
//! let state = store.state(Clone::clone).await;
//! println!("{} todos, {} done", state.count(), state.completed_count());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
#[cfg(test)]
mod memory;
pub mod reducer;
pub mod shell;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use api::{HttpTodoApi, TodoApi};
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use types::{TodoAction, TodoId, TodoItem, TodoState};

/// Store running the todo reducer
pub type TodoStore = tasksync_runtime::Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

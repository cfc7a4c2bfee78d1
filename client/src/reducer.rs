//! Reducer logic for the todo list.
//!
//! Intents mark the state and start one request each. Outcomes reconcile the
//! local list with what the server answered. Nothing changes the list until
//! the server has confirmed it.

use crate::api::TodoApi;
use crate::types::{TodoAction, TodoId, TodoState};
use std::sync::Arc;
use tasksync_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    api: Arc<dyn TodoApi>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(api: Arc<dyn TodoApi>) -> Self {
        Self { api }
    }

    /// Fetch the full list
    ///
    /// Resolves to `Loaded` or `LoadFailed`.
    #[must_use]
    pub fn list_all(&self) -> Effect<TodoAction> {
        let api = Arc::clone(&self.api);
        Effect::future(async move {
            match api.list_all().await {
                Ok(items) => {
                    tracing::info!(count = items.len(), "Loaded todos");
                    Some(TodoAction::Loaded { items })
                },
                Err(error) => {
                    tracing::warn!(%error, "Loading todos failed");
                    Some(TodoAction::LoadFailed {
                        message: error.to_string(),
                    })
                },
            }
        })
    }

    /// Create an item with an already trimmed title
    ///
    /// Resolves to `Created` or `RequestFailed`.
    #[must_use]
    pub fn create(&self, title: String) -> Effect<TodoAction> {
        let api = Arc::clone(&self.api);
        Effect::future(async move {
            match api.create(&title).await {
                Ok(item) => {
                    tracing::info!(id = %item.id, "Created todo");
                    Some(TodoAction::Created { item })
                },
                Err(error) => {
                    tracing::warn!(%error, "Creating todo failed");
                    Some(TodoAction::RequestFailed {
                        message: error.to_string(),
                    })
                },
            }
        })
    }

    /// Set the completion flag of an item
    ///
    /// Resolves to `Toggled` or `RequestFailed`.
    #[must_use]
    pub fn set_completed(&self, id: TodoId, completed: bool) -> Effect<TodoAction> {
        let api = Arc::clone(&self.api);
        Effect::future(async move {
            match api.set_completed(id, completed).await {
                Ok(item) => {
                    tracing::info!(%id, completed = item.completed, "Updated todo");
                    Some(TodoAction::Toggled { item })
                },
                Err(error) => {
                    tracing::warn!(%id, %error, "Updating todo failed");
                    Some(TodoAction::RequestFailed {
                        message: error.to_string(),
                    })
                },
            }
        })
    }

    /// Delete an item
    ///
    /// Resolves to `Deleted` or `RequestFailed`.
    #[must_use]
    pub fn remove(&self, id: TodoId) -> Effect<TodoAction> {
        let api = Arc::clone(&self.api);
        Effect::future(async move {
            match api.remove(id).await {
                Ok(()) => {
                    tracing::info!(%id, "Deleted todo");
                    Some(TodoAction::Deleted { id })
                },
                Err(error) => {
                    tracing::warn!(%id, %error, "Deleting todo failed");
                    Some(TodoAction::RequestFailed {
                        message: error.to_string(),
                    })
                },
            }
        })
    }
}

/// Reducer for the todo list
#[derive(Clone, Debug)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Starts a create for the trimmed draft; a blank draft is a no-op
    fn submit_draft(
        state: &mut TodoState,
        env: &TodoEnvironment,
    ) -> SmallVec<[Effect<TodoAction>; 4]> {
        let title = state.draft.trim();
        if title.is_empty() {
            return SmallVec::new();
        }
        let title = title.to_string();
        state.error_message = None;
        smallvec![env.create(title)]
    }

    /// Applies an outcome to state
    fn apply_outcome(state: &mut TodoState, action: TodoAction) {
        match action {
            TodoAction::Loaded { items } => {
                state.replace_all(items);
                state.error_message = None;
                state.is_loading = false;
            },
            TodoAction::LoadFailed { message } => {
                state.error_message = Some(message);
                state.is_loading = false;
            },
            TodoAction::Created { item } => {
                state.prepend(item);
                state.draft.clear();
            },
            TodoAction::Toggled { item } => {
                let id = item.id;
                if !state.replace_by_id(item) {
                    tracing::debug!(%id, "Updated todo is no longer listed");
                }
            },
            TodoAction::Deleted { id } => {
                if !state.remove_by_id(id) {
                    tracing::debug!(%id, "Deleted todo was not listed");
                }
            },
            TodoAction::RequestFailed { message } => {
                state.error_message = Some(message);
            },
            // Intents never reach here
            TodoAction::Refresh
            | TodoAction::DraftChanged { .. }
            | TodoAction::SubmitDraft
            | TodoAction::Submit { .. }
            | TodoAction::Toggle { .. }
            | TodoAction::Delete { .. } => {},
        }
    }
}

impl Default for TodoReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Intents ==========
            TodoAction::Refresh => {
                state.is_loading = true;
                state.error_message = None;
                smallvec![env.list_all()]
            },

            TodoAction::DraftChanged { text } => {
                state.draft = text;
                SmallVec::new()
            },

            TodoAction::SubmitDraft => Self::submit_draft(state, env),

            TodoAction::Submit { title } => {
                state.draft = title;
                Self::submit_draft(state, env)
            },

            TodoAction::Toggle { id, completed } => {
                state.error_message = None;
                smallvec![env.set_completed(id, !completed)]
            },

            TodoAction::Delete { id } => {
                state.error_message = None;
                smallvec![env.remove(id)]
            },

            // ========== Outcomes ==========
            outcome => {
                Self::apply_outcome(state, outcome);
                SmallVec::new()
            },
        }
    }
}

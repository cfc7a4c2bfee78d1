//! Domain types for the task-list client.
//!
//! A todo list is an ordered collection of items owned by the server. The
//! client only ever mirrors what the server confirmed: every list change
//! below is applied in response to a resolved request.

use serde::{Deserialize, Serialize};
use tasksync_macros::Action;

/// Server-assigned identifier for a todo item
///
/// The client never generates ids; it only echoes back what it received.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    /// Wraps a raw id received from the server
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw id
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TodoId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A single todo item, exactly as the server describes it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// Title of the todo
    pub title: String,
    /// Whether the todo is completed
    pub completed: bool,
}

impl TodoItem {
    /// Creates a todo item
    #[must_use]
    pub fn new(id: i64, title: impl Into<String>, completed: bool) -> Self {
        Self {
            id: TodoId::new(id),
            title: title.into(),
            completed,
        }
    }
}

/// View state of the todo list
///
/// This is everything a rendering surface needs: the items, whether the
/// initial fetch is running, the last error, and the pending text of the
/// creation form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoState {
    /// Items in server order, newest creations first
    pub items: Vec<TodoItem>,
    /// True only while the full list is being fetched
    pub is_loading: bool,
    /// Message of the most recent failure, cleared when a new request starts
    pub error_message: Option<String>,
    /// Text typed into the creation form but not yet submitted
    pub draft: String,
}

impl TodoState {
    /// Creates a new empty todo state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state holding the given items
    #[must_use]
    pub fn with_items(items: Vec<TodoItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|t| t.completed).count()
    }

    /// Returns true if there are no todos
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|t| t.id == id)
    }

    /// Replaces the whole list
    pub fn replace_all(&mut self, items: Vec<TodoItem>) {
        self.items = items;
    }

    /// Inserts an item at the front, leaving the rest in order
    pub fn prepend(&mut self, item: TodoItem) {
        self.items.insert(0, item);
    }

    /// Replaces the item with the same id in place
    ///
    /// Returns false if no item has that id; the list is left untouched.
    pub fn replace_by_id(&mut self, item: TodoItem) -> bool {
        match self.items.iter_mut().find(|t| t.id == item.id) {
            Some(slot) => {
                *slot = item;
                true
            },
            None => false,
        }
    }

    /// Removes every item with the given id
    ///
    /// Returns false if nothing was removed.
    pub fn remove_by_id(&mut self, id: TodoId) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() != before
    }
}

/// Actions for the todo list
///
/// Intents come from the rendering surface. Each one that talks to the server
/// resolves to exactly one outcome.
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    // ========== Intents ==========
    /// Intent: fetch the full list
    #[intent]
    Refresh,

    /// Intent: replace the pending text of the creation form
    #[intent]
    DraftChanged {
        /// New draft text
        text: String,
    },

    /// Intent: create an item from the trimmed draft
    #[intent]
    SubmitDraft,

    /// Intent: replace the draft and create an item from it in one step
    #[intent]
    Submit {
        /// Title as typed; trimmed before it is sent
        title: String,
    },

    /// Intent: flip the completion flag of an item
    #[intent]
    Toggle {
        /// Item to update
        id: TodoId,
        /// Completion flag as seen when the intent was emitted
        completed: bool,
    },

    /// Intent: delete an item
    #[intent]
    Delete {
        /// Item to delete
        id: TodoId,
    },

    // ========== Outcomes ==========
    /// Outcome: the full list was fetched
    #[outcome]
    Loaded {
        /// Items in server order
        items: Vec<TodoItem>,
    },

    /// Outcome: fetching the full list failed
    #[outcome]
    LoadFailed {
        /// Error message
        message: String,
    },

    /// Outcome: the server created an item
    #[outcome]
    Created {
        /// Item as returned by the server
        item: TodoItem,
    },

    /// Outcome: the server updated an item
    #[outcome]
    Toggled {
        /// Item as returned by the server
        item: TodoItem,
    },

    /// Outcome: the server deleted an item
    #[outcome]
    Deleted {
        /// Deleted item
        id: TodoId,
    },

    /// Outcome: a create, toggle or delete request failed
    #[outcome]
    RequestFailed {
        /// Error message
        message: String,
    },
}

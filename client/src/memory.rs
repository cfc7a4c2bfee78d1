//! In-memory [`TodoApi`] for unit tests
//!
//! Behaves like the remote collection: ids are assigned on create, new items
//! are listed first, and unknown ids fail with the same `RequestFailed`
//! errors the HTTP client produces.

use crate::{
    api::{ApiFuture, TodoApi},
    error::ApiError,
    types::{TodoId, TodoItem},
};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Inner {
    items: Vec<TodoItem>,
    next_id: i64,
    failure_status: Option<u16>,
    calls: usize,
}

/// Shared in-memory todo collection
///
/// Clones share the same collection, so a test can keep one handle while the
/// store's environment owns another.
#[derive(Clone, Debug, Default)]
pub struct InMemoryTodoApi {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryTodoApi {
    /// Create an empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection holding the given items
    ///
    /// New ids continue after the largest existing one.
    #[must_use]
    pub fn with_items(items: Vec<TodoItem>) -> Self {
        let next_id = items.iter().map(|t| t.id.get()).max().unwrap_or(0);
        Self {
            inner: Arc::new(Mutex::new(Inner {
                items,
                next_id,
                failure_status: None,
                calls: 0,
            })),
        }
    }

    /// Make every following call fail with the given HTTP status
    pub fn fail_with(&self, status: u16) {
        self.lock().failure_status = Some(status);
    }

    /// Stop injecting failures
    pub fn recover(&self) {
        self.lock().failure_status = None;
    }

    /// Number of calls received so far, failed ones included
    #[must_use]
    pub fn calls(&self) -> usize {
        self.lock().calls
    }

    /// Snapshot of the remote collection
    #[must_use]
    pub fn items(&self) -> Vec<TodoItem> {
        self.lock().items.clone()
    }

    #[allow(clippy::unwrap_used)]
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    /// Counts the call and runs `op` unless a failure is being injected
    fn call<T>(
        &self,
        failure: &str,
        op: impl FnOnce(&mut Inner) -> Option<T>,
    ) -> Result<T, ApiError> {
        let mut inner = self.lock();
        inner.calls += 1;
        if let Some(status) = inner.failure_status {
            return Err(ApiError::request_failed(failure, status));
        }
        op(&mut *inner).ok_or_else(|| ApiError::request_failed(failure, 404))
    }
}

impl TodoApi for InMemoryTodoApi {
    fn list_all(&self) -> ApiFuture<'_, Vec<TodoItem>> {
        let result = self.call("Failed to load todos", |inner| Some(inner.items.clone()));
        Box::pin(async move { result })
    }

    fn create<'a>(&'a self, title: &'a str) -> ApiFuture<'a, TodoItem> {
        let result = self.call("Failed to add todo", |inner| {
            inner.next_id += 1;
            let item = TodoItem::new(inner.next_id, title, false);
            inner.items.insert(0, item.clone());
            Some(item)
        });
        Box::pin(async move { result })
    }

    fn set_completed(&self, id: TodoId, completed: bool) -> ApiFuture<'_, TodoItem> {
        let result = self.call("Failed to update todo", |inner| {
            let item = inner.items.iter_mut().find(|t| t.id == id)?;
            item.completed = completed;
            Some(item.clone())
        });
        Box::pin(async move { result })
    }

    fn remove(&self, id: TodoId) -> ApiFuture<'_, ()> {
        let result = self.call("Failed to delete todo", |inner| {
            let index = inner.items.iter().position(|t| t.id == id)?;
            inner.items.remove(index);
            Some(())
        });
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_assigns_ids_after_existing_ones() {
        let api = InMemoryTodoApi::with_items(vec![TodoItem::new(4, "old", false)]);

        let created = api.create("new").await.unwrap();

        assert_eq!(created, TodoItem::new(5, "new", false));
        assert_eq!(api.items()[0], created);
    }

    #[tokio::test]
    async fn unknown_ids_fail_like_the_server() {
        let api = InMemoryTodoApi::new();

        let error = api.set_completed(TodoId::new(1), true).await.unwrap_err();
        assert_eq!(error, ApiError::request_failed("Failed to update todo", 404));

        let error = api.remove(TodoId::new(1)).await.unwrap_err();
        assert_eq!(error.to_string(), "Failed to delete todo");
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test]
    async fn injected_failures_leave_the_collection_alone() {
        let api = InMemoryTodoApi::with_items(vec![TodoItem::new(1, "buy milk", false)]);
        api.fail_with(500);

        assert!(api.remove(TodoId::new(1)).await.is_err());
        assert_eq!(api.items().len(), 1);

        api.recover();
        api.remove(TodoId::new(1)).await.unwrap();
        assert!(api.items().is_empty());
    }
}

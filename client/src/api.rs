//! Remote collection client for the todo API
//!
//! | Operation | Method | Path |
//! |---|---|---|
//! | list | GET | `/api/todos` |
//! | create | POST | `/api/todos` |
//! | toggle | PATCH | `/api/todos/{id}` |
//! | delete | DELETE | `/api/todos/{id}` |
//!
//! Every call is exactly one round-trip. Nothing is retried and no timeout is
//! added on top of the transport's own.

use crate::{
    config::ClientConfig,
    error::ApiError,
    types::{TodoId, TodoItem},
};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`TodoApi`] methods
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

const LOAD_FAILED: &str = "Failed to load todos";
const CREATE_FAILED: &str = "Failed to add todo";
const UPDATE_FAILED: &str = "Failed to update todo";
const DELETE_FAILED: &str = "Failed to delete todo";

/// The four operations against the remote todo collection
///
/// This trait uses explicit `Pin<Box<dyn Future>>` returns instead of
/// `impl Future` so it can be used as `Arc<dyn TodoApi>`.
pub trait TodoApi: Send + Sync {
    /// Fetches the full collection in server order
    fn list_all(&self) -> ApiFuture<'_, Vec<TodoItem>>;

    /// Creates an item; the caller guarantees `title` is non-empty after trimming
    fn create<'a>(&'a self, title: &'a str) -> ApiFuture<'a, TodoItem>;

    /// Changes only the completion flag of an item
    fn set_completed(&self, id: TodoId, completed: bool) -> ApiFuture<'_, TodoItem>;

    /// Deletes an item
    fn remove(&self, id: TodoId) -> ApiFuture<'_, ()>;
}

#[derive(Serialize)]
struct CreateTodo<'a> {
    title: &'a str,
}

#[derive(Serialize)]
struct SetCompleted {
    completed: bool,
}

/// [`TodoApi`] over HTTP/JSON
#[derive(Clone, Debug)]
pub struct HttpTodoApi {
    client: Client,
    base_url: String,
}

impl HttpTodoApi {
    /// Create a client for the configured base URL
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Create a client reusing an existing `reqwest::Client`
    #[must_use]
    pub fn with_client(client: Client, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.api_url().to_string(),
        }
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/api/todos", self.base_url)
    }

    fn item_url(&self, id: TodoId) -> String {
        format!("{}/api/todos/{id}", self.base_url)
    }
}

/// Decodes a successful JSON body, or maps a failed status to `RequestFailed`
async fn decode<T: DeserializeOwned>(response: Response, failure: &str) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::request_failed(failure, status.as_u16()));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn transport(error: &reqwest::Error) -> ApiError {
    ApiError::Transport(error.to_string())
}

impl TodoApi for HttpTodoApi {
    fn list_all(&self) -> ApiFuture<'_, Vec<TodoItem>> {
        Box::pin(async move {
            tracing::debug!(url = %self.collection_url(), "GET todos");
            let response = self
                .client
                .get(self.collection_url())
                .send()
                .await
                .map_err(|e| transport(&e))?;

            decode(response, LOAD_FAILED).await
        })
    }

    fn create<'a>(&'a self, title: &'a str) -> ApiFuture<'a, TodoItem> {
        Box::pin(async move {
            tracing::debug!(url = %self.collection_url(), "POST todo");
            let response = self
                .client
                .post(self.collection_url())
                .json(&CreateTodo { title })
                .send()
                .await
                .map_err(|e| transport(&e))?;

            decode(response, CREATE_FAILED).await
        })
    }

    fn set_completed(&self, id: TodoId, completed: bool) -> ApiFuture<'_, TodoItem> {
        Box::pin(async move {
            tracing::debug!(url = %self.item_url(id), completed, "PATCH todo");
            let response = self
                .client
                .patch(self.item_url(id))
                .json(&SetCompleted { completed })
                .send()
                .await
                .map_err(|e| transport(&e))?;

            decode(response, UPDATE_FAILED).await
        })
    }

    fn remove(&self, id: TodoId) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            tracing::debug!(url = %self.item_url(id), "DELETE todo");
            let response = self
                .client
                .delete(self.item_url(id))
                .send()
                .await
                .map_err(|e| transport(&e))?;

            let status = response.status();
            if status.is_success() || status == StatusCode::NO_CONTENT {
                Ok(())
            } else {
                Err(ApiError::request_failed(DELETE_FAILED, status.as_u16()))
            }
        })
    }
}

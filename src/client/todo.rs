use super::http::build_backend_client;
use super::{AuthToken, StatusFilter, Task, TodoApi};
use crate::error::ClientError;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

const MAX_ERROR_DETAIL_CHARS: usize = 200;

/// Typed, stateless wrapper over the remote Todo CRUD API.
///
/// Auth is passed per call and never stored, so one client is safe to share
/// across concurrent requests. The client never retries: todo creation is
/// not idempotent, so retries are a caller concern.
pub struct TodoClient {
    cached_todos_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct TitleBody<'a> {
    title: &'a str,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    todos: Vec<Task>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

impl TodoClient {
    /// `base_url` is the API root (e.g. `http://localhost:8000/api`); a
    /// trailing slash is tolerated.
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            cached_todos_url: format!("{base}/todos"),
            client: build_backend_client(timeout_secs),
        }
    }

    fn authorize(
        request: RequestBuilder,
        auth: &AuthToken,
    ) -> Result<RequestBuilder, ClientError> {
        // Short-circuit before any network I/O when no credential exists.
        if auth.is_empty() {
            return Err(ClientError::Unauthenticated);
        }
        Ok(request.bearer_auth(auth.as_str()))
    }

    fn todo_url(&self, id: i64) -> String {
        format!("{}/{id}", self.cached_todos_url)
    }

    /// Map a non-success response into `Remote`, preferring the backend's
    /// `{detail}` error body over the raw payload.
    async fn remote_error(response: Response) -> ClientError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|e| e.detail)
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    StatusCode::from_u16(status)
                        .ok()
                        .and_then(|s| s.canonical_reason())
                        .unwrap_or("request failed")
                        .to_string()
                } else {
                    trimmed.chars().take(MAX_ERROR_DETAIL_CHARS).collect()
                }
            });

        ClientError::Remote { status, detail }
    }

    async fn expect_status(
        response: Response,
        expected: StatusCode,
    ) -> Result<Response, ClientError> {
        if response.status() == expected {
            Ok(response)
        } else {
            Err(Self::remote_error(response).await)
        }
    }
}

#[async_trait]
impl TodoApi for TodoClient {
    async fn create(&self, auth: &AuthToken, title: &str) -> Result<Task, ClientError> {
        let request = Self::authorize(self.client.post(&self.cached_todos_url), auth)?
            .json(&TitleBody { title });
        let response = request.send().await?;
        let response = Self::expect_status(response, StatusCode::CREATED).await?;
        Ok(response.json().await?)
    }

    async fn list(
        &self,
        auth: &AuthToken,
        filter: Option<StatusFilter>,
    ) -> Result<Vec<Task>, ClientError> {
        let mut request = Self::authorize(self.client.get(&self.cached_todos_url), auth)?;
        if let Some(filter) = filter {
            request = request.query(&[("status", filter.as_query_value())]);
        }
        let response = request.send().await?;
        let response = Self::expect_status(response, StatusCode::OK).await?;
        let decoded: ListResponse = response.json().await?;
        Ok(decoded.todos)
    }

    async fn complete(&self, auth: &AuthToken, id: i64) -> Result<Task, ClientError> {
        let url = format!("{}/complete", self.todo_url(id));
        let request = Self::authorize(self.client.patch(&url), auth)?;
        let response = request.send().await?;
        let response = Self::expect_status(response, StatusCode::OK).await?;
        Ok(response.json().await?)
    }

    async fn update(
        &self,
        auth: &AuthToken,
        id: i64,
        new_title: &str,
    ) -> Result<Task, ClientError> {
        let request = Self::authorize(self.client.patch(self.todo_url(id)), auth)?
            .json(&TitleBody { title: new_title });
        let response = request.send().await?;
        let response = Self::expect_status(response, StatusCode::OK).await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, auth: &AuthToken, id: i64) -> Result<(), ClientError> {
        let request = Self::authorize(self.client.delete(self.todo_url(id)), auth)?;
        let response = request.send().await?;
        Self::expect_status(response, StatusCode::NO_CONTENT).await?;
        Ok(())
    }
}

use super::parser::parse;
use super::resolver::resolve;
use super::types::{CommandReply, ParsedCommand};
use crate::client::{AuthToken, Task, TodoApi};
use crate::error::ClientError;

/// Run one chat command end to end: parse, resolve titles against a fresh
/// list snapshot, perform at most one mutating call, and render the reply.
///
/// Single pass, no state across requests. Every failure kind is converted
/// into user-facing text here; nothing propagates past this boundary. The
/// list snapshot is re-fetched on every state-dependent command so stale
/// titles are never acted on — if another request mutates the backend
/// between the fetch and the mutation, the backend's failure is surfaced
/// as-is, with no re-resolution or retry.
pub async fn dispatch(api: &dyn TodoApi, auth: &AuthToken, raw: &str) -> CommandReply {
    match parse(raw) {
        ParsedCommand::Unknown { hint } => CommandReply::fail(hint),

        ParsedCommand::Add { title } => match api.create(auth, &title).await {
            Ok(_) => CommandReply::ok(format!("task added: {title}")),
            Err(err) => failure("add task", &err),
        },

        ParsedCommand::List => match api.list(auth, None).await {
            Ok(tasks) if tasks.is_empty() => CommandReply::ok("no tasks found"),
            Ok(tasks) => CommandReply::ok(render_tasks(&tasks)),
            Err(err) => failure("fetch tasks", &err),
        },

        ParsedCommand::Complete { title } => {
            let tasks = match api.list(auth, None).await {
                Ok(tasks) => tasks,
                Err(err) => return failure("fetch tasks", &err),
            };
            let Some(task) = resolve(&tasks, &title) else {
                return not_found(&title);
            };
            match api.complete(auth, task.id).await {
                Ok(_) => CommandReply::ok(format!("task completed: {title}")),
                Err(err) => failure("complete task", &err),
            }
        }

        ParsedCommand::Delete { title } => {
            let tasks = match api.list(auth, None).await {
                Ok(tasks) => tasks,
                Err(err) => return failure("fetch tasks", &err),
            };
            let Some(task) = resolve(&tasks, &title) else {
                return not_found(&title);
            };
            match api.delete(auth, task.id).await {
                Ok(()) => CommandReply::ok(format!("task deleted: {title}")),
                Err(err) => failure("delete task", &err),
            }
        }

        ParsedCommand::Update {
            old_title,
            new_title,
        } => {
            let tasks = match api.list(auth, None).await {
                Ok(tasks) => tasks,
                Err(err) => return failure("fetch tasks", &err),
            };
            let Some(task) = resolve(&tasks, &old_title) else {
                return not_found(&old_title);
            };
            match api.update(auth, task.id, &new_title).await {
                Ok(_) => CommandReply::ok(format!("task updated: {old_title} -> {new_title}")),
                Err(err) => failure("update task", &err),
            }
        }
    }
}

fn not_found(title: &str) -> CommandReply {
    CommandReply::fail(format!("task not found: {title}"))
}

fn failure(action: &str, err: &ClientError) -> CommandReply {
    tracing::warn!(action, error = %err, "command failed");
    match err {
        // Already phrased as a user message; "failed to add task: you must
        // be signed in" would read backwards.
        ClientError::Unauthenticated => CommandReply::fail(err.to_string()),
        _ => CommandReply::fail(format!("failed to {action}: {err}")),
    }
}

/// One status-prefixed line per task, in exactly the order the backend
/// returned them.
fn render_tasks(tasks: &[Task]) -> String {
    tasks
        .iter()
        .map(|task| {
            let status = if task.is_completed { "done" } else { "open" };
            format!("- [{status}] {} (id: {})", task.title, task.id)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counting test double in place of the HTTP client, so tests can prove
    /// which endpoints were (not) called.
    #[derive(Default)]
    struct MockApi {
        tasks: Vec<Task>,
        create_times_out: bool,
        create_calls: AtomicUsize,
        list_calls: AtomicUsize,
        complete_calls: AtomicUsize,
        update_calls: AtomicUsize,
        delete_calls: AtomicUsize,
    }

    impl MockApi {
        fn with_tasks(tasks: Vec<Task>) -> Self {
            Self {
                tasks,
                ..Self::default()
            }
        }

        fn mutation_calls(&self) -> usize {
            self.create_calls.load(Ordering::SeqCst)
                + self.complete_calls.load(Ordering::SeqCst)
                + self.update_calls.load(Ordering::SeqCst)
                + self.delete_calls.load(Ordering::SeqCst)
        }
    }

    fn check_auth(auth: &AuthToken) -> Result<(), ClientError> {
        if auth.is_empty() {
            Err(ClientError::Unauthenticated)
        } else {
            Ok(())
        }
    }

    #[async_trait]
    impl TodoApi for MockApi {
        async fn create(&self, auth: &AuthToken, title: &str) -> Result<Task, ClientError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            check_auth(auth)?;
            if self.create_times_out {
                return Err(ClientError::Transport("request timed out".into()));
            }
            Ok(Task {
                id: 42,
                title: title.to_string(),
                is_completed: false,
            })
        }

        async fn list(
            &self,
            auth: &AuthToken,
            _filter: Option<crate::client::StatusFilter>,
        ) -> Result<Vec<Task>, ClientError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            check_auth(auth)?;
            Ok(self.tasks.clone())
        }

        async fn complete(&self, auth: &AuthToken, id: i64) -> Result<Task, ClientError> {
            self.complete_calls.fetch_add(1, Ordering::SeqCst);
            check_auth(auth)?;
            self.tasks
                .iter()
                .find(|t| t.id == id)
                .map(|t| Task {
                    is_completed: true,
                    ..t.clone()
                })
                .ok_or(ClientError::Remote {
                    status: 404,
                    detail: "Todo not found".into(),
                })
        }

        async fn update(
            &self,
            auth: &AuthToken,
            id: i64,
            new_title: &str,
        ) -> Result<Task, ClientError> {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            check_auth(auth)?;
            self.tasks
                .iter()
                .find(|t| t.id == id)
                .map(|t| Task {
                    title: new_title.to_string(),
                    ..t.clone()
                })
                .ok_or(ClientError::Remote {
                    status: 404,
                    detail: "Todo not found".into(),
                })
        }

        async fn delete(&self, auth: &AuthToken, id: i64) -> Result<(), ClientError> {
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            check_auth(auth)?;
            if self.tasks.iter().any(|t| t.id == id) {
                Ok(())
            } else {
                Err(ClientError::Remote {
                    status: 404,
                    detail: "Todo not found".into(),
                })
            }
        }
    }

    fn task(id: i64, title: &str, done: bool) -> Task {
        Task {
            id,
            title: title.into(),
            is_completed: done,
        }
    }

    fn auth() -> AuthToken {
        AuthToken::new("test-token")
    }

    #[tokio::test]
    async fn unknown_command_makes_no_network_calls() {
        let api = MockApi::default();
        let reply = dispatch(&api, &auth(), "what is the weather").await;
        assert!(!reply.succeeded);
        assert!(reply.message.contains("command not recognized"));
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 0);
        assert_eq!(api.mutation_calls(), 0);
    }

    #[tokio::test]
    async fn empty_add_title_is_validation_not_network() {
        let api = MockApi::default();
        let reply = dispatch(&api, &auth(), "add   ").await;
        assert!(!reply.succeeded);
        assert!(reply.message.contains("title cannot be empty"));
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 0);
        assert_eq!(api.mutation_calls(), 0);
    }

    #[tokio::test]
    async fn add_success() {
        let api = MockApi::default();
        let reply = dispatch(&api, &auth(), "add Buy Milk").await;
        assert!(reply.succeeded);
        assert_eq!(reply.message, "task added: Buy Milk");
        assert_eq!(api.create_calls.load(Ordering::SeqCst), 1);
        // Add never needs a list snapshot.
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn add_transport_failure_surfaces_in_reply() {
        let api = MockApi {
            create_times_out: true,
            ..MockApi::default()
        };
        let reply = dispatch(&api, &auth(), "add buy milk").await;
        assert!(!reply.succeeded);
        assert!(reply.message.starts_with("failed to add task:"));
        assert!(reply.message.contains("timed out"));
    }

    #[tokio::test]
    async fn list_empty_backend() {
        let api = MockApi::default();
        let reply = dispatch(&api, &auth(), "list").await;
        assert!(reply.succeeded);
        assert_eq!(reply.message, "no tasks found");
    }

    #[tokio::test]
    async fn list_renders_backend_order() {
        let api = MockApi::with_tasks(vec![
            task(2, "Buy Bread", true),
            task(1, "Buy Milk", false),
        ]);
        let reply = dispatch(&api, &auth(), "list").await;
        assert!(reply.succeeded);
        assert_eq!(
            reply.message,
            "- [done] Buy Bread (id: 2)\n- [open] Buy Milk (id: 1)"
        );
    }

    #[tokio::test]
    async fn complete_unresolved_title_never_mutates() {
        let api = MockApi::default();
        let reply = dispatch(&api, &auth(), "complete buy milk").await;
        assert!(!reply.succeeded);
        assert_eq!(reply.message, "task not found: buy milk");
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.complete_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn complete_resolves_case_insensitively() {
        let api = MockApi::with_tasks(vec![task(1, "Buy Milk", false)]);
        let reply = dispatch(&api, &auth(), "complete buy milk").await;
        assert!(reply.succeeded);
        assert_eq!(reply.message, "task completed: buy milk");
        assert_eq!(api.complete_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn update_resolves_old_title_then_renames() {
        let api = MockApi::with_tasks(vec![task(1, "buy milk", false)]);
        let reply = dispatch(&api, &auth(), "update buy milk to buy bread").await;
        assert!(reply.succeeded);
        assert_eq!(reply.message, "task updated: buy milk -> buy bread");
        assert_eq!(api.update_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn malformed_update_makes_no_network_calls() {
        let api = MockApi::with_tasks(vec![task(1, "buy milk", false)]);
        let reply = dispatch(&api, &auth(), "update buy milk into buy bread").await;
        assert!(!reply.succeeded);
        assert!(reply.message.contains("use format"));
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn delete_success() {
        let api = MockApi::with_tasks(vec![task(1, "buy milk", false)]);
        let reply = dispatch(&api, &auth(), "delete buy milk").await;
        assert!(reply.succeeded);
        assert_eq!(reply.message, "task deleted: buy milk");
    }

    #[tokio::test]
    async fn stale_resolution_surfaces_backend_detail() {
        // The list snapshot knows the task, but the mutation hits a backend
        // that already lost it (e.g. a concurrent delete won the race).
        struct StaleApi {
            tasks: Vec<Task>,
        }

        #[async_trait]
        impl TodoApi for StaleApi {
            async fn create(&self, _: &AuthToken, _: &str) -> Result<Task, ClientError> {
                unreachable!("create not exercised")
            }
            async fn list(
                &self,
                _: &AuthToken,
                _: Option<crate::client::StatusFilter>,
            ) -> Result<Vec<Task>, ClientError> {
                Ok(self.tasks.clone())
            }
            async fn complete(&self, _: &AuthToken, _: i64) -> Result<Task, ClientError> {
                Err(ClientError::Remote {
                    status: 404,
                    detail: "Todo not found".into(),
                })
            }
            async fn update(&self, _: &AuthToken, _: i64, _: &str) -> Result<Task, ClientError> {
                unreachable!("update not exercised")
            }
            async fn delete(&self, _: &AuthToken, _: i64) -> Result<(), ClientError> {
                unreachable!("delete not exercised")
            }
        }

        let api = StaleApi {
            tasks: vec![task(1, "buy milk", false)],
        };
        let reply = dispatch(&api, &auth(), "complete buy milk").await;
        assert!(!reply.succeeded);
        assert!(reply.message.starts_with("failed to complete task:"));
        assert!(reply.message.contains("Todo not found"));
    }

    #[tokio::test]
    async fn unauthenticated_reads_as_sign_in_message() {
        let api = MockApi::default();
        let reply = dispatch(&api, &AuthToken::new(""), "add buy milk").await;
        assert!(!reply.succeeded);
        assert_eq!(reply.message, "you must be signed in to manage tasks");
    }

    #[test]
    fn render_tasks_status_markers() {
        let rendered = render_tasks(&[task(5, "Ship release", true)]);
        assert_eq!(rendered, "- [done] Ship release (id: 5)");
    }
}

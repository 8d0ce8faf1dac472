use super::{ApiError, NewQueue, Queue, QueueBackend, User};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::info;

/// In-memory backend for dryrun mode and tests: a seeded user directory, a
/// counter for queue ids, and a touch of artificial latency so the busy
/// states are visible.
pub struct DemoBackend {
    me: User,
    directory: Vec<User>,
    next_queue_id: AtomicU64,
    latency: Duration,
}

impl DemoBackend {
    pub fn new() -> Self {
        let me = User::new(1, "demo", "Demo User");
        let directory = vec![
            me.clone(),
            User::new(2, "amst", "Anna Amstutz"),
            User::new(3, "jdoe", "Jordan Doe"),
            User::new(4, "wzhang", "Wei Zhang"),
        ];
        Self::seeded(me, directory)
    }

    pub fn seeded(me: User, directory: Vec<User>) -> Self {
        info!("Running against the demo backend");
        Self {
            me,
            directory,
            next_queue_id: AtomicU64::new(100),
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for DemoBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl QueueBackend for DemoBackend {
    async fn current_user(&self) -> Result<Option<User>, ApiError> {
        self.simulate_latency().await;
        Ok(Some(self.me.clone()))
    }

    async fn confirm_user_exists(&self, uniqname: &str) -> Result<User, ApiError> {
        self.simulate_latency().await;
        self.directory
            .iter()
            .find(|user| user.uniqname == uniqname)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(uniqname.to_string()))
    }

    async fn create_queue(&self, queue: &NewQueue) -> Result<Queue, ApiError> {
        self.simulate_latency().await;
        let id = self.next_queue_id.fetch_add(1, Ordering::Relaxed);
        Ok(Queue {
            id,
            name: queue.name.clone(),
            description: queue.description.clone(),
            categories: queue.categories.clone(),
            hosts: queue.hosts.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_uniqname_is_not_found() {
        let backend = DemoBackend::new();
        let err = backend
            .confirm_user_exists("nobody")
            .await
            .expect_err("lookup should fail");
        assert_eq!(err, ApiError::NotFound("nobody".to_string()));
    }

    #[tokio::test]
    async fn created_queue_echoes_the_draft() {
        let backend = DemoBackend::new();
        let me = backend.current_user().await.expect("me").expect("signed in");
        let draft = NewQueue {
            name: "Math Help".to_string(),
            description: "Office hours".to_string(),
            categories: ["zoom".to_string()].into(),
            hosts: vec![me.clone()],
        };

        let queue = backend.create_queue(&draft).await.expect("create");
        assert_eq!(queue.name, draft.name);
        assert_eq!(queue.hosts, vec![me]);

        let second = backend.create_queue(&draft).await.expect("create");
        assert_ne!(queue.id, second.id);
    }
}

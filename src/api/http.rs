use super::{ApiError, NewQueue, Queue, QueueBackend, User};
use tracing::{debug, info};

/// Client for the queue service's REST API. ureq is blocking, so every call
/// runs on the tokio blocking pool.
#[derive(Clone)]
pub struct HttpBackend {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        info!("Using queue server at {}", base_url);
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl QueueBackend for HttpBackend {
    async fn current_user(&self) -> Result<Option<User>, ApiError> {
        let this = self.clone();
        run_blocking(move || {
            let url = this.url("/api/users/me/");
            debug!("GET {}", url);
            match this.agent.get(&url).call() {
                Ok(response) => {
                    let user: User = response
                        .into_json()
                        .map_err(|e| ApiError::Transport(e.to_string()))?;
                    Ok(Some(user))
                }
                Err(ureq::Error::Status(401 | 403, _)) => Ok(None),
                Err(err) => Err(map_error(err)),
            }
        })
        .await
    }

    async fn confirm_user_exists(&self, uniqname: &str) -> Result<User, ApiError> {
        let this = self.clone();
        let uniqname = uniqname.to_string();
        run_blocking(move || {
            let url = this.url(&format!("/api/users/{uniqname}/"));
            debug!("GET {}", url);
            match this.agent.get(&url).call() {
                Ok(response) => response
                    .into_json()
                    .map_err(|e| ApiError::Transport(e.to_string())),
                Err(ureq::Error::Status(404, _)) => Err(ApiError::NotFound(uniqname)),
                Err(err) => Err(map_error(err)),
            }
        })
        .await
    }

    async fn create_queue(&self, queue: &NewQueue) -> Result<Queue, ApiError> {
        let this = self.clone();
        let payload = queue.clone();
        run_blocking(move || {
            let url = this.url("/api/queues/");
            debug!("POST {} ({})", url, payload.name);
            match this.agent.post(&url).send_json(&payload) {
                Ok(response) => response
                    .into_json()
                    .map_err(|e| ApiError::Transport(e.to_string())),
                Err(err) => Err(map_error(err)),
            }
        })
        .await
    }
}

async fn run_blocking<T, F>(call: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?
}

fn map_error(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(403, _) => ApiError::Forbidden,
        ureq::Error::Status(status, response) => ApiError::Server {
            status,
            message: error_detail(&response.into_string().unwrap_or_default()),
        },
        ureq::Error::Transport(transport) => ApiError::Transport(transport.to_string()),
    }
}

/// DRF error bodies look like `{"detail": "..."}`; fall back to the raw body.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(|detail| detail.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_detail_prefers_the_structured_field() {
        assert_eq!(
            error_detail("{\"detail\": \"Authentication credentials were not provided.\"}"),
            "Authentication credentials were not provided."
        );
        assert_eq!(error_detail("<html>gateway timeout</html>"), "<html>gateway timeout</html>");
    }
}

use crate::api::ApiError;
use std::future::Future;
use thiserror::Error;
use tracing::debug;

/// An async failure tagged with the action that raised it, so the UI can
/// scope banners to "Check Host" vs "Add Queue".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{source_label}: {error}")]
pub struct FormError {
    pub source_label: &'static str,
    pub error: ApiError,
}

impl FormError {
    pub fn is_forbidden(&self) -> bool {
        self.error.is_forbidden()
    }
}

/// State of one asynchronous action with single-flight semantics: while an
/// invocation is outstanding, further invocations are dropped rather than
/// raced. Completion is delivered through the return value of [`run`],
/// not a callback.
///
/// [`run`]: AsyncAction::run
#[derive(Debug)]
pub struct AsyncAction<T> {
    source_label: &'static str,
    in_flight: bool,
    last_error: Option<FormError>,
    last_result: Option<T>,
}

impl<T> AsyncAction<T> {
    pub fn new(source_label: &'static str) -> Self {
        Self {
            source_label,
            in_flight: false,
            last_error: None,
            last_result: None,
        }
    }

    pub fn source_label(&self) -> &'static str {
        self.source_label
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn last_error(&self) -> Option<&FormError> {
        self.last_error.as_ref()
    }

    pub fn last_result(&self) -> Option<&T> {
        self.last_result.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Claim the in-flight slot. Returns false (and changes nothing) if an
    /// invocation is already outstanding.
    pub fn try_begin(&mut self) -> bool {
        if self.in_flight {
            debug!(
                source = self.source_label,
                "dropping invocation while another is in flight"
            );
            return false;
        }
        self.in_flight = true;
        true
    }

    pub fn succeed(&mut self, value: T) -> &T {
        self.in_flight = false;
        self.last_error = None;
        self.last_result.insert(value)
    }

    pub fn fail(&mut self, error: ApiError) {
        self.in_flight = false;
        self.last_error = Some(FormError {
            source_label: self.source_label,
            error,
        });
    }

    /// Run one invocation under the single-flight guard. A call made while
    /// another is outstanding returns `None` without polling `op`.
    pub async fn run<F>(&mut self, op: F) -> Option<&T>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        if !self.try_begin() {
            return None;
        }
        match op.await {
            Ok(value) => Some(self.succeed(value)),
            Err(error) => {
                self.fail(error);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn second_begin_is_dropped_while_in_flight() {
        let mut action: AsyncAction<u32> = AsyncAction::new("Add Queue");
        assert!(action.try_begin());
        assert!(action.is_loading());
        // Invocation B arrives before A resolves: dropped.
        assert!(!action.try_begin());

        action.succeed(7);
        assert!(!action.is_loading());
        assert_eq!(action.last_result(), Some(&7));
        // The slot frees up once A completes.
        assert!(action.try_begin());
    }

    #[test]
    fn failure_records_a_scoped_error_and_success_clears_it() {
        let mut action: AsyncAction<u32> = AsyncAction::new("Check Host");
        assert!(action.try_begin());
        action.fail(ApiError::NotFound("zzz".to_string()));

        let err = action.last_error().expect("error recorded");
        assert_eq!(err.source_label, "Check Host");
        assert!(!err.is_forbidden());
        assert!(!action.is_loading());

        assert!(action.try_begin());
        action.succeed(1);
        assert!(action.last_error().is_none());
    }

    #[tokio::test]
    async fn run_does_not_poll_the_op_when_busy() {
        let mut action: AsyncAction<u32> = AsyncAction::new("Add Queue");
        assert!(action.try_begin());

        let polled = Cell::new(false);
        let result = action
            .run(async {
                polled.set(true);
                Ok(9)
            })
            .await;

        assert!(result.is_none());
        assert!(!polled.get());
        assert!(action.last_result().is_none());
    }

    #[tokio::test]
    async fn run_resolves_success_and_failure() {
        let mut action: AsyncAction<u32> = AsyncAction::new("Add Queue");

        let value = action.run(async { Ok(42) }).await;
        assert_eq!(value, Some(&42));

        let value = action.run(async { Err(ApiError::Forbidden) }).await;
        assert!(value.is_none());
        assert!(action.last_error().expect("recorded").is_forbidden());
        // The previous result is untouched by a later failure.
        assert_eq!(action.last_result(), Some(&42));
    }
}

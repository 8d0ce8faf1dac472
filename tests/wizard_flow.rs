//! End-to-end exercises of the add-queue wizard engine against the demo
//! backend and purpose-built stubs.

use helpq::api::{ApiError, DemoBackend, NewQueue, Queue, QueueBackend, User};
use helpq::events::MemorySink;
use helpq::wizard::{ADD_QUEUE, AddQueueWizard, CHECK_HOST, WizardStep};
use std::sync::atomic::{AtomicUsize, Ordering};

fn owner() -> User {
    User::new(1, "abc", "A. B. Carter")
}

fn demo_backend() -> DemoBackend {
    DemoBackend::seeded(
        owner(),
        vec![owner(), User::new(2, "def", "D. E. Fox"), User::new(3, "ghi", "G. H. Irwin")],
    )
}

/// Counts creation calls so tests can assert the endpoint was hit exactly
/// the expected number of times.
struct CountingBackend {
    inner: DemoBackend,
    creations: AtomicUsize,
}

impl CountingBackend {
    fn new() -> Self {
        Self {
            inner: demo_backend(),
            creations: AtomicUsize::new(0),
        }
    }

    fn creations(&self) -> usize {
        self.creations.load(Ordering::SeqCst)
    }
}

impl QueueBackend for CountingBackend {
    async fn current_user(&self) -> Result<Option<User>, ApiError> {
        self.inner.current_user().await
    }

    async fn confirm_user_exists(&self, uniqname: &str) -> Result<User, ApiError> {
        self.inner.confirm_user_exists(uniqname).await
    }

    async fn create_queue(&self, queue: &NewQueue) -> Result<Queue, ApiError> {
        self.creations.fetch_add(1, Ordering::SeqCst);
        self.inner.create_queue(queue).await
    }
}

#[test]
fn empty_name_keeps_the_wizard_on_general() {
    let mut wizard = AddQueueWizard::new(owner());
    wizard.set_description("x");
    wizard.set_categories(["A".to_string()].into());

    assert!(!wizard.advance_to_hosts());
    assert_eq!(wizard.step(), WizardStep::General);
    assert!(wizard.name_result().expect("name validated").is_invalid);
    assert!(wizard.show_correct_general());
}

#[tokio::test]
async fn happy_path_submits_the_exact_draft_and_fires_events() {
    let mut wizard = AddQueueWizard::new(owner());
    let backend = demo_backend();
    let events = MemorySink::new();

    assert!(!wizard.set_name("Math Help").is_invalid);
    assert!(!wizard.set_description("Office hours").is_invalid);
    assert!(!wizard.set_categories(["Zoom".to_string()].into()).is_invalid);

    assert!(wizard.advance_to_hosts());
    assert_eq!(wizard.step(), WizardStep::Hosts);
    assert_eq!(wizard.hosts().len(), 1);
    assert_eq!(wizard.hosts()[0].id, 1);

    let created = wizard.submit(&backend, &events).await.expect("guard holds");
    assert!(created);

    let queue = wizard.created().expect("queue echoed back");
    assert_eq!(queue.name, "Math Help");
    assert_eq!(queue.description, "Office hours");
    assert_eq!(queue.categories, ["Zoom".to_string()].into());
    assert_eq!(queue.hosts, vec![owner()]);

    assert_eq!(events.events(), vec!["Added Queue", "Added Host"]);
}

#[tokio::test]
async fn host_management_flow_adds_dedupes_and_removes() {
    let mut wizard = AddQueueWizard::new(owner());
    let backend = demo_backend();

    wizard.set_name("Math Help");
    wizard.set_categories(["zoom".to_string()].into());
    assert!(wizard.advance_to_hosts());

    assert!(wizard.add_host(&backend, "def").await);
    assert!(wizard.add_host(&backend, "ghi").await);
    assert!(wizard.add_host(&backend, "def").await);
    let uniqnames: Vec<&str> = wizard.hosts().iter().map(|h| h.uniqname.as_str()).collect();
    assert_eq!(uniqnames, vec!["abc", "def", "ghi"]);

    assert!(wizard.remove_host(2).is_some());
    assert!(wizard.remove_host(2).is_none());
    let uniqnames: Vec<&str> = wizard.hosts().iter().map(|h| h.uniqname.as_str()).collect();
    assert_eq!(uniqnames, vec!["abc", "ghi"]);
}

#[tokio::test]
async fn failed_lookup_scopes_the_error_to_check_host() {
    let mut wizard = AddQueueWizard::new(owner());
    let backend = demo_backend();

    wizard.set_name("Math Help");
    wizard.set_categories(["zoom".to_string()].into());
    wizard.advance_to_hosts();

    assert!(!wizard.add_host(&backend, "nonexistent").await);
    assert_eq!(wizard.hosts().len(), 1);

    let error = wizard.check_host_error().expect("lookup error recorded");
    assert_eq!(error.source_label, CHECK_HOST);
    assert!(wizard.add_queue_error().is_none());

    // A later successful lookup clears the scoped error
    assert!(wizard.add_host(&backend, "def").await);
    assert!(wizard.check_host_error().is_none());
}

#[tokio::test]
async fn creation_failure_keeps_the_form_intact_for_retry() {
    struct FlakyBackend {
        inner: DemoBackend,
        attempts: AtomicUsize,
    }

    impl QueueBackend for FlakyBackend {
        async fn current_user(&self) -> Result<Option<User>, ApiError> {
            self.inner.current_user().await
        }

        async fn confirm_user_exists(&self, uniqname: &str) -> Result<User, ApiError> {
            self.inner.confirm_user_exists(uniqname).await
        }

        async fn create_queue(&self, queue: &NewQueue) -> Result<Queue, ApiError> {
            if self.attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(ApiError::Server {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            self.inner.create_queue(queue).await
        }
    }

    let backend = FlakyBackend {
        inner: demo_backend(),
        attempts: AtomicUsize::new(0),
    };
    let events = MemorySink::new();

    let mut wizard = AddQueueWizard::new(owner());
    wizard.set_name("Math Help");
    wizard.set_description("Office hours");
    wizard.set_categories(["zoom".to_string()].into());
    wizard.advance_to_hosts();

    // First attempt fails; nothing is recorded and the draft survives
    assert!(!wizard.submit(&backend, &events).await.expect("guard holds"));
    let error = wizard.add_queue_error().expect("creation error recorded");
    assert_eq!(error.source_label, ADD_QUEUE);
    assert!(wizard.created().is_none());
    assert!(events.events().is_empty());
    assert_eq!(wizard.draft().name, "Math Help");

    // Nothing retries automatically; the user re-triggers the action
    assert!(wizard.submit(&backend, &events).await.expect("guard holds"));
    assert!(wizard.add_queue_error().is_none());
    assert_eq!(events.events().len(), 2);
}

#[tokio::test]
async fn successful_creation_hits_the_endpoint_exactly_once() {
    let backend = CountingBackend::new();
    let events = MemorySink::new();

    let mut wizard = AddQueueWizard::new(owner());
    wizard.set_name("Math Help");
    wizard.set_categories(["zoom".to_string()].into());
    wizard.advance_to_hosts();

    assert!(wizard.submit(&backend, &events).await.expect("guard holds"));
    // A stray second finish (e.g. a queued double-click) is a no-op
    assert!(!wizard.submit(&backend, &events).await.expect("guard holds"));
    assert_eq!(backend.creations(), 1);
    assert_eq!(events.events(), vec!["Added Queue", "Added Host"]);
}

#[tokio::test]
async fn forbidden_lookup_raises_the_login_prompt() {
    struct ForbiddenDirectory;

    impl QueueBackend for ForbiddenDirectory {
        async fn current_user(&self) -> Result<Option<User>, ApiError> {
            Ok(None)
        }

        async fn confirm_user_exists(&self, _uniqname: &str) -> Result<User, ApiError> {
            Err(ApiError::Forbidden)
        }

        async fn create_queue(&self, _queue: &NewQueue) -> Result<Queue, ApiError> {
            Err(ApiError::Forbidden)
        }
    }

    let mut wizard = AddQueueWizard::new(owner());
    wizard.set_name("Math Help");
    wizard.set_categories(["zoom".to_string()].into());
    wizard.advance_to_hosts();

    assert!(!wizard.add_host(&ForbiddenDirectory, "def").await);
    assert!(wizard.login_required());
    assert!(wizard.check_host_error().expect("recorded").is_forbidden());
}

#[test]
fn tab_selection_is_equivalent_to_next_and_back() {
    let mut wizard = AddQueueWizard::new(owner());

    // Hosts tab selection runs the gate and fails like Next
    assert!(!wizard.select_tab(WizardStep::Hosts));
    assert_eq!(wizard.step(), WizardStep::General);
    assert!(wizard.show_correct_general());

    wizard.set_name("Math Help");
    wizard.set_categories(["zoom".to_string()].into());
    assert!(wizard.select_tab(WizardStep::Hosts));
    assert_eq!(wizard.step(), WizardStep::Hosts);

    // General tab selection never re-validates
    wizard.set_name("");
    assert!(wizard.select_tab(WizardStep::General));
    assert_eq!(wizard.step(), WizardStep::General);
}

use crate::action::{AsyncAction, FormError};
use crate::api::{NewQueue, Queue, QueueBackend, User, UserId};
use crate::events::EventSink;
use crate::roster::HostRoster;
use crate::validation::{
    ValidationResult, queue_description_schema, queue_name_schema, validate_categories,
    validate_string,
};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, error, info};

pub const CHECK_HOST: &str = "Check Host";
pub const ADD_QUEUE: &str = "Add Queue";

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("Finish requested outside the host-management step")]
    FinishOutsideHosts,

    #[error("Attempted to pass invalid data to API for queue creation")]
    InvalidDraft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    General,
    Hosts,
}

impl WizardStep {
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::General => "General",
            WizardStep::Hosts => "Manage Hosts",
        }
    }
}

/// The queue being drafted. Lives only as long as the wizard; discarded on
/// success or cancellation.
#[derive(Debug, Clone, Default)]
pub struct QueueDraft {
    pub name: String,
    pub description: String,
    pub categories: BTreeSet<String>,
}

/// The two-step add-queue flow: field edits and their validation results,
/// the step gate between General and Manage Hosts, the host roster, and the
/// final submission. Remote calls go through two independent single-flight
/// actions so a lookup failure never bleeds into the submission state.
pub struct AddQueueWizard {
    step: WizardStep,
    draft: QueueDraft,
    name_result: Option<ValidationResult>,
    descript_result: Option<ValidationResult>,
    allowed_result: Option<ValidationResult>,
    show_correct_general: bool,
    roster: HostRoster,
    check_host: AsyncAction<User>,
    add_queue: AsyncAction<Queue>,
    created: Option<Queue>,
}

impl AddQueueWizard {
    pub fn new(owner: User) -> Self {
        Self {
            step: WizardStep::General,
            draft: QueueDraft::default(),
            name_result: None,
            descript_result: None,
            allowed_result: None,
            show_correct_general: false,
            roster: HostRoster::new(owner),
            check_host: AsyncAction::new(CHECK_HOST),
            add_queue: AsyncAction::new(ADD_QUEUE),
            created: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &QueueDraft {
        &self.draft
    }

    pub fn hosts(&self) -> &[User] {
        self.roster.hosts()
    }

    pub fn show_correct_general(&self) -> bool {
        self.show_correct_general
    }

    pub fn name_result(&self) -> Option<&ValidationResult> {
        self.name_result.as_ref()
    }

    pub fn descript_result(&self) -> Option<&ValidationResult> {
        self.descript_result.as_ref()
    }

    pub fn allowed_result(&self) -> Option<&ValidationResult> {
        self.allowed_result.as_ref()
    }

    /// The created queue once submission has succeeded.
    pub fn created(&self) -> Option<&Queue> {
        self.created.as_ref()
    }

    /// Coarse gate: true while either remote action is outstanding. The
    /// interaction layer drops all mutating input while this holds.
    pub fn is_changing(&self) -> bool {
        self.check_host.is_loading() || self.add_queue.is_loading()
    }

    pub fn is_checking_host(&self) -> bool {
        self.check_host.is_loading()
    }

    pub fn is_submitting(&self) -> bool {
        self.add_queue.is_loading()
    }

    pub fn check_host_error(&self) -> Option<&FormError> {
        self.check_host.last_error()
    }

    pub fn add_queue_error(&self) -> Option<&FormError> {
        self.add_queue.last_error()
    }

    /// A forbidden failure from either action prompts for a fresh login
    /// instead of an inline error.
    pub fn login_required(&self) -> bool {
        self.check_host.last_error().is_some_and(FormError::is_forbidden)
            || self.add_queue.last_error().is_some_and(FormError::is_forbidden)
    }

    pub fn dismiss_errors(&mut self) {
        self.check_host.clear_error();
        self.add_queue.clear_error();
    }

    // Every edit recomputes the field's result and stores it in the slot the
    // step gate reads, so a transition never sees a result from a superseded
    // edit. The fresh result is also returned for immediate branching.

    pub fn set_name(&mut self, value: &str) -> &ValidationResult {
        self.draft.name = value.to_string();
        self.name_result
            .insert(validate_string(&self.draft.name, &queue_name_schema()))
    }

    pub fn set_description(&mut self, value: &str) -> &ValidationResult {
        self.draft.description = value.to_string();
        self.descript_result.insert(validate_string(
            &self.draft.description,
            &queue_description_schema(),
        ))
    }

    pub fn toggle_category(&mut self, category: &str) -> &ValidationResult {
        if !self.draft.categories.remove(category) {
            self.draft.categories.insert(category.to_string());
        }
        self.allowed_result
            .insert(validate_categories(&self.draft.categories))
    }

    pub fn set_categories(&mut self, categories: BTreeSet<String>) -> &ValidationResult {
        self.draft.categories = categories;
        self.allowed_result
            .insert(validate_categories(&self.draft.categories))
    }

    /// Forced validation pass for the step gate: cached results are used
    /// as-is, never-touched fields are validated now.
    fn general_step_valid(&mut self) -> bool {
        let name_ok = !self
            .name_result
            .get_or_insert_with(|| validate_string(&self.draft.name, &queue_name_schema()))
            .is_invalid;
        let descript_ok = !self
            .descript_result
            .get_or_insert_with(|| {
                validate_string(&self.draft.description, &queue_description_schema())
            })
            .is_invalid;
        let allowed_ok = !self
            .allowed_result
            .get_or_insert_with(|| validate_categories(&self.draft.categories))
            .is_invalid;
        name_ok && descript_ok && allowed_ok
    }

    /// Advance iff name, description, and category set all validate. On
    /// failure the step stays put and the correction message becomes
    /// visible.
    pub fn advance_to_hosts(&mut self) -> bool {
        if self.general_step_valid() {
            self.step = WizardStep::Hosts;
            self.show_correct_general = false;
            true
        } else {
            debug!("general step gate failed, staying on General");
            self.show_correct_general = true;
            false
        }
    }

    /// Always permitted; does not re-validate.
    pub fn return_to_general(&mut self) {
        self.step = WizardStep::General;
    }

    /// Direct tab selection: Hosts goes through the same gate as Next,
    /// General is unconditional.
    pub fn select_tab(&mut self, step: WizardStep) -> bool {
        match step {
            WizardStep::General => {
                self.return_to_general();
                true
            }
            WizardStep::Hosts => self.advance_to_hosts(),
        }
    }

    /// Resolve a uniqname through the lookup action and append the user to
    /// the roster. Duplicate identities are absorbed. Returns true iff the
    /// lookup succeeded.
    pub async fn add_host<B: QueueBackend>(&mut self, backend: &B, uniqname: &str) -> bool {
        let lookup = backend.confirm_user_exists(uniqname);
        match self.check_host.run(lookup).await {
            Some(user) => {
                let user = user.clone();
                let uniqname = user.uniqname.clone();
                if self.roster.add(user) {
                    info!(%uniqname, "host added to roster");
                } else {
                    debug!(%uniqname, "duplicate host lookup absorbed");
                }
                true
            }
            None => false,
        }
    }

    pub fn remove_host(&mut self, id: UserId) -> Option<User> {
        self.roster.remove(id)
    }

    /// Submit the draft through the creation action. The name/category guard
    /// is a defensive re-check of what the step gate already enforced;
    /// tripping it is a programming error, not user-facing validation.
    /// Returns `Ok(true)` iff the queue was created.
    pub async fn submit<B: QueueBackend, E: EventSink>(
        &mut self,
        backend: &B,
        events: &E,
    ) -> Result<bool, WizardError> {
        if self.step != WizardStep::Hosts {
            return Err(WizardError::FinishOutsideHosts);
        }
        if self.draft.name.is_empty() || self.draft.categories.is_empty() {
            error!("finish requested with an empty name or category set despite the step gate");
            return Err(WizardError::InvalidDraft);
        }
        if self.created.is_some() {
            debug!("queue already created, ignoring repeated finish");
            return Ok(false);
        }

        let payload = NewQueue {
            name: self.draft.name.clone(),
            description: self.draft.description.clone(),
            categories: self.draft.categories.clone(),
            hosts: self.roster.hosts().to_vec(),
        };
        let request = backend.create_queue(&payload);
        match self.add_queue.run(request).await {
            Some(queue) => {
                let queue = queue.clone();
                self.on_queue_created(queue, events);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Runs only on a successful creation: one "Added Queue" record, one
    /// "Added Host" record per host echoed by the server, in roster order,
    /// then the created queue is held for the caller to navigate with.
    fn on_queue_created<E: EventSink>(&mut self, queue: Queue, events: &E) {
        events.record("Added Queue");
        for _host in &queue.hosts {
            events.record("Added Host");
        }
        info!(queue_id = queue.id, name = %queue.name, "queue created");
        self.created = Some(queue);
    }
}

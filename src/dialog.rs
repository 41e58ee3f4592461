use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use crate::api::LeadApi;
use crate::domain::{ApplicantProfile, FieldKey, LeadDraft, LeadRecord, Mode, Role};
use crate::policy::{self, FormPolicy};
use crate::resolver::DependentDataResolver;
use crate::submit::{self, LeadCommand};
use crate::validate::{self, ValidationState};

/// How long the success banner stays up before the dialog closes itself.
pub const SUCCESS_CLOSE_DELAY: Duration = Duration::from_millis(1200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPhase {
    Closed,
    Initializing,
    Editing,
    Submitting,
}

/// Transient banner above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Idle,
    Success(String),
    Failure(String),
}

impl Notice {
    pub fn text(&self) -> Option<&str> {
        match self {
            Notice::Idle => None,
            Notice::Success(text) | Notice::Failure(text) => Some(text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Command accepted; the dialog has closed and the refresh hook fired.
    Submitted,
    /// Aggregate validation failed; every error is now shown, no command
    /// was issued.
    Invalid,
    /// The backend rejected the command; the rewritten message is in the
    /// failure notice and the form is editable again.
    Failed,
    /// Submit was requested outside the Editing phase.
    Ignored,
}

/// Caller-facing lifecycle callbacks. `on_success` refreshes the lead list;
/// `on_close` lets the host screen drop the dialog.
pub struct DialogHooks {
    pub on_success: Box<dyn Fn()>,
    pub on_close: Box<dyn Fn()>,
}

impl Default for DialogHooks {
    fn default() -> Self {
        Self {
            on_success: Box::new(|| {}),
            on_close: Box::new(|| {}),
        }
    }
}

/// The lead dialog state machine:
/// `Closed → Initializing → Editing → Submitting → {closed, Editing}`.
///
/// Owns the draft, the policy table, validation display state, and the
/// dependent-data resolver; one instance per dialog, with the reference
/// cache shared across instances for the session.
pub struct LeadDialog {
    role: Role,
    actor_id: String,
    mode: Mode,
    phase: DialogPhase,
    policy: FormPolicy,
    draft: Rc<RefCell<LeadDraft>>,
    validation: ValidationState,
    resolver: DependentDataResolver,
    api: Rc<dyn LeadApi>,
    notice: Notice,
    hooks: DialogHooks,
}

impl LeadDialog {
    pub fn new(
        role: Role,
        actor_id: impl Into<String>,
        api: Rc<dyn LeadApi>,
        resolver: DependentDataResolver,
        hooks: DialogHooks,
    ) -> Self {
        Self {
            role,
            actor_id: actor_id.into(),
            mode: Mode::Create,
            phase: DialogPhase::Closed,
            policy: policy::config(role, Mode::Create),
            draft: Rc::new(RefCell::new(LeadDraft::empty())),
            validation: ValidationState::new(),
            resolver,
            api,
            notice: Notice::Idle,
            hooks,
        }
    }

    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn policy(&self) -> &FormPolicy {
        &self.policy
    }

    pub fn notice(&self) -> &Notice {
        &self.notice
    }

    pub fn draft(&self) -> Rc<RefCell<LeadDraft>> {
        Rc::clone(&self.draft)
    }

    pub fn resolver_mut(&mut self) -> &mut DependentDataResolver {
        &mut self.resolver
    }

    /// Opens the dialog: resets validation display state, re-derives the
    /// policy table, hydrates a fresh draft, and loads whatever reference
    /// lists this role's fields need. Edit/duplicate additionally pull the
    /// record's lender list without clearing its lender selection.
    pub async fn open(&mut self, mode: Mode, record: Option<&LeadRecord>) -> Result<()> {
        self.phase = DialogPhase::Initializing;
        self.mode = mode;
        self.policy = policy::config(self.role, mode);
        self.validation.reset();
        self.notice = Notice::Idle;

        let draft = if mode.hydrates_from_record() {
            let record = record.context("edit/duplicate mode requires an existing record")?;
            LeadDraft::from_record(record, mode)
        } else {
            LeadDraft::empty()
        };
        // A fresh cell per open: cascade tasks from a previous life hold a
        // dead Weak and can never write into this draft.
        self.draft = Rc::new(RefCell::new(draft));

        if self.role == Role::Manager && matches!(mode, Mode::Create | Mode::Duplicate) {
            self.draft.borrow_mut().assign_to = self.actor_id.clone();
        }

        self.resolver.ensure_loan_types().await;
        if self.role.is_back_office() {
            self.resolver.ensure_partners().await;
            self.resolver.ensure_managers().await;
        }
        if mode.hydrates_from_record() {
            let loan_type = self.draft.borrow().loan_type.clone();
            self.resolver.hydrate_lenders(&loan_type).await;
        }

        self.phase = DialogPhase::Editing;
        debug!(role = self.role.as_str(), mode = mode.as_str(), "lead dialog opened");
        Ok(())
    }

    /// Applies a user edit. Writes to invisible or read-only fields are
    /// ignored, which also covers city/state: they are read-only in every
    /// policy, so the derived values only ever come from the postal cascade.
    pub async fn set_field(&mut self, key: FieldKey, value: &str) {
        if self.phase != DialogPhase::Editing {
            return;
        }
        if !self.policy.get(&key).is_some_and(|rule| rule.editable()) {
            debug!(%key, "ignored edit to non-editable field");
            return;
        }
        match key {
            FieldKey::PartnerName => self.draft.borrow_mut().partner_name = value.to_string(),
            FieldKey::ApplicantProfile => {
                self.draft.borrow_mut().applicant_profile = parse_profile(value);
            }
            FieldKey::ApplicantName => self.draft.borrow_mut().applicant_name = value.to_string(),
            FieldKey::BusinessName => self.draft.borrow_mut().business_name = value.to_string(),
            FieldKey::ApplicantMobile => {
                self.draft.borrow_mut().applicant_mobile = value.to_string();
            }
            FieldKey::ApplicantEmail => self.draft.borrow_mut().applicant_email = value.to_string(),
            FieldKey::ApplicantPincode => {
                self.draft.borrow_mut().applicant_pincode = value.to_string();
                self.resolver.postal_mut().pincode_changed(&self.draft);
            }
            FieldKey::LoanType => {
                self.draft.borrow_mut().loan_type = value.to_string();
                self.resolver.loan_type_changed(&self.draft, value).await;
            }
            FieldKey::LoanAmount => self.draft.borrow_mut().loan_amount = value.to_string(),
            FieldKey::Comments => self.draft.borrow_mut().comments = value.to_string(),
            FieldKey::AssignTo => self.draft.borrow_mut().assign_to = value.to_string(),
            FieldKey::LenderName => self.draft.borrow_mut().lender_name = value.to_string(),
            // Unreachable: always read-only, filtered above.
            FieldKey::City | FieldKey::State => {}
        }
    }

    /// Blur marks a field touched; error text for it becomes visible.
    pub fn blur(&mut self, key: FieldKey) {
        self.validation.touch(key);
    }

    pub fn visible_error(&self, key: FieldKey) -> Option<String> {
        self.validation
            .visible_error(key, &self.draft.borrow(), &self.policy)
    }

    /// The submit gate: independent of touched state by design.
    pub fn form_valid(&self) -> bool {
        validate::form_valid(&self.draft.borrow(), &self.policy)
    }

    pub fn can_submit(&self) -> bool {
        self.phase == DialogPhase::Editing && self.form_valid()
    }

    /// Attempts submission. Reveals all validation errors first; if the
    /// aggregate is invalid no command is issued. On success the dialog
    /// shows the success notice, waits out [`SUCCESS_CLOSE_DELAY`], closes,
    /// and fires the refresh hook. On rejection the rewritten failure lands
    /// in the notice and the form returns to Editing.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        if self.phase != DialogPhase::Editing {
            return Ok(SubmitOutcome::Ignored);
        }
        self.validation.show_all();
        if !self.form_valid() {
            return Ok(SubmitOutcome::Invalid);
        }
        // Authoritative pass over the same predicates; never looser than
        // the aggregate above.
        let draft = self.draft.borrow().clone();
        if validate::validate(&draft, self.role, self.mode).is_err() {
            return Ok(SubmitOutcome::Invalid);
        }

        self.phase = DialogPhase::Submitting;
        let command = match submit::build_command(&draft, self.role, self.mode, &self.actor_id) {
            Ok(command) => command,
            Err(error) => {
                self.phase = DialogPhase::Editing;
                return Err(error);
            }
        };
        let result = match command {
            LeadCommand::Create(payload) => self.api.create_lead(payload).await,
            LeadCommand::Update(payload) => self.api.update_lead(payload).await,
            LeadCommand::Duplicate(payload) => self.api.duplicate_lead(payload).await,
        };

        match result {
            Ok(record) => {
                debug!(id = %record.id, mode = self.mode.as_str(), "lead command accepted");
                self.notice = Notice::Success(submit::success_notice(self.mode).to_string());
                tokio::time::sleep(SUCCESS_CLOSE_DELAY).await;
                self.close();
                (self.hooks.on_success)();
                Ok(SubmitOutcome::Submitted)
            }
            Err(error) => {
                self.notice = Notice::Failure(submit::rewrite_failure(self.mode, &error));
                self.phase = DialogPhase::Editing;
                Ok(SubmitOutcome::Failed)
            }
        }
    }

    /// Closes the dialog and discards the draft. In-flight cascade results
    /// become no-ops once the draft cell is replaced.
    pub fn close(&mut self) {
        self.resolver.postal_mut().cancel();
        self.draft = Rc::new(RefCell::new(LeadDraft::empty()));
        self.validation.reset();
        self.phase = DialogPhase::Closed;
        (self.hooks.on_close)();
    }
}

fn parse_profile(value: &str) -> Option<ApplicantProfile> {
    match value {
        "Salaried" => Some(ApplicantProfile::Salaried),
        "Business" => Some(ApplicantProfile::Business),
        "Professional" => Some(ApplicantProfile::Professional),
        "Other" => Some(ApplicantProfile::Other),
        _ => None,
    }
}

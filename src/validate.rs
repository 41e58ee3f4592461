use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{FieldKey, LeadDraft, Mode, Role};
use crate::policy::{self, FormPolicy};

pub const LOAN_AMOUNT_MIN: u64 = 50_000;
pub const LOAN_AMOUNT_MAX: u64 = 100_000_000;

static MOBILE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{10}$").unwrap());
static PINCODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{6}$").unwrap());
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Runs the business rule for one field against the draft. `None` means the
/// field is valid or carries no validator (city, state, business name and
/// comments are free-form).
pub fn field_error(key: FieldKey, draft: &LeadDraft) -> Option<String> {
    match key {
        FieldKey::PartnerName => required(&draft.partner_name, "Select a partner"),
        FieldKey::ApplicantProfile => match draft.applicant_profile {
            Some(_) => None,
            None => Some("Select an applicant profile".to_string()),
        },
        FieldKey::ApplicantName => required(&draft.applicant_name, "Applicant name is required"),
        FieldKey::ApplicantMobile => pattern(
            &draft.applicant_mobile,
            &MOBILE_RE,
            "Mobile number must be exactly 10 digits",
        ),
        FieldKey::ApplicantEmail => pattern(
            &draft.applicant_email,
            &EMAIL_RE,
            "Enter a valid email address",
        ),
        FieldKey::ApplicantPincode => pattern(
            &draft.applicant_pincode,
            &PINCODE_RE,
            "Pincode must be exactly 6 digits",
        ),
        FieldKey::LoanAmount => loan_amount_error(&draft.loan_amount),
        FieldKey::LoanType => required(&draft.loan_type, "Select a loan type"),
        FieldKey::AssignTo => required(&draft.assign_to, "Select an assignee"),
        FieldKey::LenderName => required(&draft.lender_name, "Select a lender"),
        FieldKey::BusinessName | FieldKey::Comments | FieldKey::City | FieldKey::State => None,
    }
}

/// Six digits exactly; anything else clears the derived city/state instead
/// of triggering a lookup.
pub(crate) fn is_complete_pincode(value: &str) -> bool {
    PINCODE_RE.is_match(value)
}

fn required(value: &str, message: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(message.to_string())
    } else {
        None
    }
}

fn pattern(value: &str, re: &Regex, message: &str) -> Option<String> {
    if re.is_match(value) {
        None
    } else {
        Some(message.to_string())
    }
}

fn loan_amount_error(value: &str) -> Option<String> {
    let Ok(amount) = value.trim().parse::<u64>() else {
        return Some("Loan amount must be a number".to_string());
    };
    if (LOAN_AMOUNT_MIN..=LOAN_AMOUNT_MAX).contains(&amount) {
        None
    } else {
        Some(format!(
            "Loan amount must be between {LOAN_AMOUNT_MIN} and {LOAN_AMOUNT_MAX}"
        ))
    }
}

/// Submit-gate aggregate: AND over every visible field with a validator.
/// Deliberately independent of touched/shown-error state, so the submit
/// control can be disabled before the user has interacted at all.
pub fn form_valid(draft: &LeadDraft, policy: &FormPolicy) -> bool {
    policy
        .iter()
        .filter(|(_, rule)| rule.visible)
        .all(|(&key, _)| field_error(key, draft).is_none())
}

/// Authoritative submit-time validation. Re-derives the policy and runs the
/// exact predicates behind [`form_valid`], so it can never be looser than
/// the live aggregate; it additionally reports every violation.
pub fn validate(draft: &LeadDraft, role: Role, mode: Mode) -> Result<(), Vec<(FieldKey, String)>> {
    let policy = policy::config(role, mode);
    let violations: Vec<(FieldKey, String)> = policy
        .iter()
        .filter(|(_, rule)| rule.visible)
        .filter_map(|(&key, _)| field_error(key, draft).map(|message| (key, message)))
        .collect();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Tracks which fields the user has blurred, plus the submit-attempt
/// override that reveals every error at once. Governs error *display* only,
/// never the submit gate.
#[derive(Debug, Clone, Default)]
pub struct ValidationState {
    touched: HashSet<FieldKey>,
    show_all: bool,
}

impl ValidationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields become touched on blur, not on change.
    pub fn touch(&mut self, key: FieldKey) {
        self.touched.insert(key);
    }

    pub fn is_touched(&self, key: FieldKey) -> bool {
        self.touched.contains(&key)
    }

    pub fn show_all(&mut self) {
        self.show_all = true;
    }

    pub fn reset(&mut self) {
        self.touched.clear();
        self.show_all = false;
    }

    /// Error text to render for a field, or `None` when the field is valid,
    /// hidden, or not yet revealed (untouched and no submit attempted).
    pub fn visible_error(
        &self,
        key: FieldKey,
        draft: &LeadDraft,
        policy: &FormPolicy,
    ) -> Option<String> {
        if !self.show_all && !self.is_touched(key) {
            return None;
        }
        if !policy.get(&key).is_some_and(|rule| rule.visible) {
            return None;
        }
        field_error(key, draft)
    }
}

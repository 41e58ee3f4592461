#![deny(rust_2018_idioms)]

pub mod api;
pub mod dialog;
pub mod domain;
pub mod policy;
pub mod resolver;
pub mod submit;
mod validate;

pub use dialog::{DialogHooks, DialogPhase, LeadDialog, Notice, SubmitOutcome};
pub use policy::{FieldPolicy, FormPolicy, config};
pub use validate::{
    LOAN_AMOUNT_MAX, LOAN_AMOUNT_MIN, ValidationState, field_error, form_valid, validate,
};

pub mod prelude {
    pub use super::api::{ApiError, LeadApi, PostalApi, ReferenceApi};
    pub use super::dialog::{DialogHooks, DialogPhase, LeadDialog, SubmitOutcome};
    pub use super::domain::{FieldKey, LeadDraft, LeadRecord, Mode, Role};
    pub use super::policy::config;
    pub use super::resolver::{DependentDataResolver, ReferenceCache};
}

use anyhow::{Context, Result};
use serde::Serialize;

use crate::api::ApiError;
use crate::domain::{ApplicantProfile, LeadDraft, Mode, Role};

pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";
pub const UNIQUENESS_CONFLICT: &str = "Same lender type, email or mobile already exists";
pub const DUPLICATE_REJECTED: &str = "Doesn't Match the Criteria To Duplicate";

/// The field block shared by all three commands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadFields {
    pub partner_name: String,
    pub applicant_profile: Option<ApplicantProfile>,
    pub applicant_name: String,
    pub business_name: String,
    pub applicant_mobile: String,
    pub applicant_email: String,
    pub applicant_pincode: String,
    pub city: String,
    pub state: String,
    pub loan_type: String,
    pub loan_amount: u64,
    pub comments: String,
    pub assign_to: String,
}

/// No lender at creation time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLead {
    #[serde(flatten)]
    pub fields: LeadFields,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLead {
    pub id: String,
    #[serde(flatten)]
    pub fields: LeadFields,
    pub lender_name: String,
}

/// Same shape as [`UpdateLead`], but the id names the source record and the
/// backend always allocates a new one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateLead {
    pub id: String,
    #[serde(flatten)]
    pub fields: LeadFields,
    pub lender_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LeadCommand {
    Create(CreateLead),
    Update(UpdateLead),
    Duplicate(DuplicateLead),
}

/// Maps a validated draft onto exactly one backend command.
///
/// A manager creating or duplicating always assigns to themselves; the
/// override happens here, after any UI-side forcing, so a stale or tampered
/// draft value can never leak into the payload.
pub fn build_command(
    draft: &LeadDraft,
    role: Role,
    mode: Mode,
    actor_id: &str,
) -> Result<LeadCommand> {
    let loan_amount: u64 = draft
        .loan_amount
        .trim()
        .parse()
        .context("loan amount is not numeric")?;

    let assign_to = if role == Role::Manager && matches!(mode, Mode::Create | Mode::Duplicate) {
        actor_id.to_string()
    } else {
        draft.assign_to.clone()
    };

    let fields = LeadFields {
        partner_name: draft.partner_name.clone(),
        applicant_profile: draft.applicant_profile,
        applicant_name: draft.applicant_name.clone(),
        business_name: draft.business_name.clone(),
        applicant_mobile: draft.applicant_mobile.clone(),
        applicant_email: draft.applicant_email.clone(),
        applicant_pincode: draft.applicant_pincode.clone(),
        city: draft.city.clone(),
        state: draft.state.clone(),
        loan_type: draft.loan_type.clone(),
        loan_amount,
        comments: draft.comments.clone(),
        assign_to,
    };

    Ok(match mode {
        Mode::Create => LeadCommand::Create(CreateLead { fields }),
        Mode::Edit => LeadCommand::Update(UpdateLead {
            id: draft
                .id
                .clone()
                .context("editing requires an existing lead id")?,
            fields,
            lender_name: draft.lender_name.clone(),
        }),
        Mode::Duplicate => LeadCommand::Duplicate(DuplicateLead {
            id: draft
                .id
                .clone()
                .context("duplicating requires a source lead id")?,
            fields,
            lender_name: draft.lender_name.clone(),
        }),
    })
}

/// Rewrites a backend failure into the banner text shown to the user. Two
/// known patterns get fixed wording; everything else passes through
/// verbatim, with a generic fallback when the backend sent no message.
pub fn rewrite_failure(mode: Mode, error: &ApiError) -> String {
    let Some(raw) = error.message() else {
        return GENERIC_FAILURE.to_string();
    };
    if mode == Mode::Duplicate && raw.contains("Doesn't Match the Criteria") {
        return DUPLICATE_REJECTED.to_string();
    }
    if raw.to_lowercase().contains("already exist") {
        return UNIQUENESS_CONFLICT.to_string();
    }
    raw.to_string()
}

pub fn success_notice(mode: Mode) -> &'static str {
    match mode {
        Mode::Create => "Lead created successfully",
        Mode::Edit => "Lead updated successfully",
        Mode::Duplicate => "Lead duplicated successfully",
    }
}

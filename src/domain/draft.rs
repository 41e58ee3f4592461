use super::{ApplicantProfile, LeadRecord, LeadStatus, Mode};

/// The working draft behind an open lead dialog. Created empty for create
/// mode, hydrated from a [`LeadRecord`] for edit/duplicate, discarded on
/// close.
///
/// City and state are derived values: only the postal cascade writes them,
/// so the setter is crate-private and the dialog's edit path has no arm for
/// either key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadDraft {
    pub id: Option<String>,
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
    pub loan_amount: String,
    pub comments: String,
    pub assign_to: String,
    pub lender_name: String,
    pub status: Option<LeadStatus>,
}

impl LeadDraft {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_record(record: &LeadRecord, mode: Mode) -> Self {
        Self {
            // A duplicate becomes a brand-new record; only edit keeps the id.
            id: match mode {
                Mode::Edit | Mode::Duplicate => Some(record.id.clone()),
                Mode::Create => None,
            },
            partner_name: record.partner_name.clone(),
            applicant_profile: record.applicant_profile,
            applicant_name: record.applicant_name.clone(),
            business_name: record.business_name.clone(),
            applicant_mobile: record.applicant_mobile.clone(),
            applicant_email: record.applicant_email.clone(),
            applicant_pincode: record.applicant_pincode.clone(),
            city: record.city.clone(),
            state: record.state.clone(),
            loan_type: record.loan_type.clone(),
            loan_amount: record.loan_amount.to_string(),
            comments: record.comments.clone(),
            assign_to: record.assign_to.clone(),
            lender_name: record.lender_name.clone(),
            status: record.status,
        }
    }

    pub(crate) fn set_city_state(&mut self, city: impl Into<String>, state: impl Into<String>) {
        self.city = city.into();
        self.state = state.into();
    }

    pub(crate) fn clear_city_state(&mut self) {
        self.city.clear();
        self.state.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> LeadRecord {
        LeadRecord {
            id: "lead-7".into(),
            partner_name: "p1".into(),
            applicant_profile: Some(ApplicantProfile::Salaried),
            applicant_name: "Asha Rao".into(),
            business_name: String::new(),
            applicant_mobile: "9876543210".into(),
            applicant_email: "asha@example.com".into(),
            applicant_pincode: "560001".into(),
            city: "Bangalore".into(),
            state: "Karnataka".into(),
            loan_type: "lt-personal".into(),
            loan_amount: 250_000,
            comments: "callback after 6pm".into(),
            assign_to: "mgr1".into(),
            lender_name: "lender-3".into(),
            status: Some(LeadStatus::UnderReview),
        }
    }

    #[test]
    fn edit_hydration_keeps_id_and_lender() {
        let draft = LeadDraft::from_record(&record(), Mode::Edit);
        assert_eq!(draft.id.as_deref(), Some("lead-7"));
        assert_eq!(draft.lender_name, "lender-3");
        assert_eq!(draft.loan_amount, "250000");
    }

    #[test]
    fn duplicate_hydration_keeps_source_id() {
        let draft = LeadDraft::from_record(&record(), Mode::Duplicate);
        assert_eq!(draft.id.as_deref(), Some("lead-7"));
        assert_eq!(draft.city, "Bangalore");
    }
}

mod draft;

pub use draft::LeadDraft;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Partner,
    Associate,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Manager, Role::Partner, Role::Associate];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Partner => "partner",
            Role::Associate => "associate",
        }
    }

    /// Admins and managers work the back-office columns (partner selection,
    /// assignment, lender); partners and associates only see their own leads.
    pub fn is_back_office(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Create,
    Edit,
    Duplicate,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Create, Mode::Edit, Mode::Duplicate];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Create => "create",
            Mode::Edit => "edit",
            Mode::Duplicate => "duplicate",
        }
    }

    /// Edit and duplicate both start from an existing record.
    pub fn hydrates_from_record(&self) -> bool {
        matches!(self, Mode::Edit | Mode::Duplicate)
    }
}

/// The stable, total set of form field keys. The wire names are the contract
/// the dashboard screens key their inputs by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    PartnerName,
    ApplicantProfile,
    ApplicantName,
    BusinessName,
    ApplicantMobile,
    ApplicantEmail,
    ApplicantPincode,
    City,
    State,
    LoanType,
    LoanAmount,
    Comments,
    AssignTo,
    LenderName,
}

impl FieldKey {
    pub const ALL: [FieldKey; 14] = [
        FieldKey::PartnerName,
        FieldKey::ApplicantProfile,
        FieldKey::ApplicantName,
        FieldKey::BusinessName,
        FieldKey::ApplicantMobile,
        FieldKey::ApplicantEmail,
        FieldKey::ApplicantPincode,
        FieldKey::City,
        FieldKey::State,
        FieldKey::LoanType,
        FieldKey::LoanAmount,
        FieldKey::Comments,
        FieldKey::AssignTo,
        FieldKey::LenderName,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::PartnerName => "partnerName",
            FieldKey::ApplicantProfile => "applicantProfile",
            FieldKey::ApplicantName => "applicantName",
            FieldKey::BusinessName => "businessName",
            FieldKey::ApplicantMobile => "applicantMobile",
            FieldKey::ApplicantEmail => "applicantEmail",
            FieldKey::ApplicantPincode => "applicantPincode",
            FieldKey::City => "city",
            FieldKey::State => "state",
            FieldKey::LoanType => "loanType",
            FieldKey::LoanAmount => "loanAmount",
            FieldKey::Comments => "comments",
            FieldKey::AssignTo => "assignTo",
            FieldKey::LenderName => "lenderName",
        }
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicantProfile {
    Salaried,
    Business,
    Professional,
    Other,
}

impl ApplicantProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicantProfile::Salaried => "Salaried",
            ApplicantProfile::Business => "Business",
            ApplicantProfile::Professional => "Professional",
            ApplicantProfile::Other => "Other",
        }
    }
}

/// Pipeline position of a persisted lead. Only meaningful when editing an
/// existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadStatus {
    New,
    Contacted,
    UnderReview,
    Approved,
    Rejected,
    Disbursed,
}

/// A persisted lead as returned by the backend, used to hydrate
/// edit/duplicate drafts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    pub id: String,
    pub partner_name: String,
    pub applicant_profile: Option<ApplicantProfile>,
    pub applicant_name: String,
    #[serde(default)]
    pub business_name: String,
    pub applicant_mobile: String,
    pub applicant_email: String,
    pub applicant_pincode: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    pub loan_type: String,
    pub loan_amount: u64,
    #[serde(default)]
    pub comments: String,
    pub assign_to: String,
    #[serde(default)]
    pub lender_name: String,
    pub status: Option<LeadStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manager {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanType {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lender {
    pub id: String,
    pub name: String,
}

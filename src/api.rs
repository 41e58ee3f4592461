use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Lender, LoanType, Manager, Partner};
use crate::submit::{CreateLead, DuplicateLead, UpdateLead};

/// Failure surfaced by any backend call. `Rejected` carries the backend's
/// raw message for the submission mapper to rewrite; `Unavailable` is the
/// no-message case (transport failure, empty body).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("{message}")]
    Rejected { message: String },
    #[error("service unavailable")]
    Unavailable,
}

impl ApiError {
    pub fn rejected(message: impl Into<String>) -> Self {
        ApiError::Rejected {
            message: message.into(),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message } => Some(message),
            ApiError::Unavailable => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// The lead command endpoints. One call per submitted dialog; the engine
/// never retries on its own.
#[async_trait(?Send)]
pub trait LeadApi {
    async fn create_lead(&self, payload: CreateLead) -> ApiResult<crate::domain::LeadRecord>;
    async fn update_lead(&self, payload: UpdateLead) -> ApiResult<crate::domain::LeadRecord>;
    async fn duplicate_lead(&self, payload: DuplicateLead) -> ApiResult<crate::domain::LeadRecord>;
}

/// Reference-data lists backing the form's select fields. Each list is
/// fetched lazily, at most once per session, by the resolver.
#[async_trait(?Send)]
pub trait ReferenceApi {
    async fn partners(&self) -> ApiResult<Vec<Partner>>;
    async fn managers(&self) -> ApiResult<Vec<Manager>>;
    async fn loan_types(&self) -> ApiResult<Vec<LoanType>>;
    async fn lenders(&self, loan_type_id: &str) -> ApiResult<Vec<Lender>>;
}

/// Pincode directory lookup. The response shape mirrors the upstream postal
/// API, PascalCase keys included.
#[async_trait(?Send)]
pub trait PostalApi {
    async fn lookup(&self, pincode: &str) -> ApiResult<PostalResponse>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostalResponse {
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "PostOffice", default)]
    pub post_office: Vec<PostOffice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostOffice {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "District")]
    pub district: String,
    #[serde(rename = "State")]
    pub state: String,
}

impl PostalResponse {
    /// A lookup counts as usable only when the upstream reports success and
    /// returned at least one office.
    pub fn first_match(&self) -> Option<&PostOffice> {
        if self.status == "Success" {
            self.post_office.first()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postal_response_parses_upstream_shape() {
        let raw = r#"{
            "Status": "Success",
            "PostOffice": [
                {"Name": "Bangalore GPO", "District": "Bangalore", "State": "Karnataka"}
            ]
        }"#;
        let parsed: PostalResponse = serde_json::from_str(raw).unwrap();
        let office = parsed.first_match().unwrap();
        assert_eq!(office.district, "Bangalore");
        assert_eq!(office.state, "Karnataka");
    }

    #[test]
    fn error_status_yields_no_match() {
        let parsed: PostalResponse =
            serde_json::from_str(r#"{"Status": "Error", "PostOffice": []}"#).unwrap();
        assert!(parsed.first_match().is_none());
    }
}

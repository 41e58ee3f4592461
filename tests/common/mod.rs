#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;

use leadform::api::{ApiError, ApiResult, LeadApi, PostOffice, PostalApi, PostalResponse, ReferenceApi};
use leadform::domain::{LeadRecord, Lender, LoanType, Manager, Partner};
use leadform::submit::{CreateLead, DuplicateLead, LeadCommand, UpdateLead};

pub fn record(id: &str) -> LeadRecord {
    LeadRecord {
        id: id.to_string(),
        partner_name: "p1".into(),
        applicant_profile: Some(leadform::domain::ApplicantProfile::Salaried),
        applicant_name: "Asha Rao".into(),
        business_name: String::new(),
        applicant_mobile: "9876543210".into(),
        applicant_email: "asha@example.com".into(),
        applicant_pincode: "560001".into(),
        city: "Bangalore".into(),
        state: "Karnataka".into(),
        loan_type: "lt-personal".into(),
        loan_amount: 250_000,
        comments: String::new(),
        assign_to: "mgr1".into(),
        lender_name: "lender-3".into(),
        status: None,
    }
}

/// Records every issued command; answers with a canned record or a
/// configured rejection.
#[derive(Default)]
pub struct MockLeadApi {
    pub issued: RefCell<Vec<LeadCommand>>,
    pub failure: RefCell<Option<ApiError>>,
}

impl MockLeadApi {
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn fail_with(&self, error: ApiError) {
        *self.failure.borrow_mut() = Some(error);
    }

    fn answer(&self, command: LeadCommand) -> ApiResult<LeadRecord> {
        self.issued.borrow_mut().push(command);
        match self.failure.borrow().clone() {
            Some(error) => Err(error),
            None => Ok(record("new-1")),
        }
    }
}

#[async_trait(?Send)]
impl LeadApi for MockLeadApi {
    async fn create_lead(&self, payload: CreateLead) -> ApiResult<LeadRecord> {
        self.answer(LeadCommand::Create(payload))
    }

    async fn update_lead(&self, payload: UpdateLead) -> ApiResult<LeadRecord> {
        self.answer(LeadCommand::Update(payload))
    }

    async fn duplicate_lead(&self, payload: DuplicateLead) -> ApiResult<LeadRecord> {
        self.answer(LeadCommand::Duplicate(payload))
    }
}

/// Canned reference lists with per-list call counters, so the once-per-
/// session guarantee is observable.
#[derive(Default)]
pub struct MockReferenceApi {
    pub partner_calls: RefCell<usize>,
    pub manager_calls: RefCell<usize>,
    pub loan_type_calls: RefCell<usize>,
    pub lender_calls: RefCell<Vec<String>>,
    pub fail_partners_once: RefCell<bool>,
}

impl MockReferenceApi {
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::default())
    }
}

#[async_trait(?Send)]
impl ReferenceApi for MockReferenceApi {
    async fn partners(&self) -> ApiResult<Vec<Partner>> {
        *self.partner_calls.borrow_mut() += 1;
        if std::mem::take(&mut *self.fail_partners_once.borrow_mut()) {
            return Err(ApiError::Unavailable);
        }
        Ok(vec![Partner {
            id: "p1".into(),
            name: "Acme Referrals".into(),
        }])
    }

    async fn managers(&self) -> ApiResult<Vec<Manager>> {
        *self.manager_calls.borrow_mut() += 1;
        Ok(vec![Manager {
            id: "mgr1".into(),
            name: "Meera Iyer".into(),
        }])
    }

    async fn loan_types(&self) -> ApiResult<Vec<LoanType>> {
        *self.loan_type_calls.borrow_mut() += 1;
        Ok(vec![
            LoanType {
                id: "lt-personal".into(),
                name: "Personal Loan".into(),
            },
            LoanType {
                id: "lt-business".into(),
                name: "Business Loan".into(),
            },
        ])
    }

    async fn lenders(&self, loan_type_id: &str) -> ApiResult<Vec<Lender>> {
        self.lender_calls.borrow_mut().push(loan_type_id.to_string());
        Ok(vec![Lender {
            id: format!("{loan_type_id}-lender"),
            name: "First Capital".into(),
        }])
    }
}

/// Postal directory stub. Every lookup is logged; an optional artificial
/// latency lets tests race the staleness guard.
#[derive(Default)]
pub struct MockPostalApi {
    pub lookups: RefCell<Vec<String>>,
    pub latency: RefCell<Option<Duration>>,
}

impl MockPostalApi {
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn with_latency(latency: Duration) -> Rc<Self> {
        let api = Self::default();
        *api.latency.borrow_mut() = Some(latency);
        Rc::new(api)
    }
}

#[async_trait(?Send)]
impl PostalApi for MockPostalApi {
    async fn lookup(&self, pincode: &str) -> ApiResult<PostalResponse> {
        self.lookups.borrow_mut().push(pincode.to_string());
        let latency = *self.latency.borrow();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        match pincode {
            "560001" => Ok(success("Bangalore", "Karnataka")),
            "560002" => Ok(success("Bangalore Rural", "Karnataka")),
            "400001" => Ok(success("Mumbai", "Maharashtra")),
            "000000" => Ok(PostalResponse {
                status: "Error".into(),
                post_office: Vec::new(),
            }),
            _ => Err(ApiError::Unavailable),
        }
    }
}

fn success(district: &str, state: &str) -> PostalResponse {
    PostalResponse {
        status: "Success".into(),
        post_office: vec![PostOffice {
            name: format!("{district} GPO"),
            district: district.into(),
            state: state.into(),
        }],
    }
}

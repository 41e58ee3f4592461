mod postal;

pub use postal::{POSTAL_DEBOUNCE, PostalCascade};

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::api::{PostalApi, ReferenceApi};
use crate::domain::{LeadDraft, Lender, LoanType, Manager, Partner};

/// Session-scoped reference data. `None` means "never loaded" — an explicit
/// flag, so an empty backend list is not mistaken for a missing fetch and
/// refetched on every render.
#[derive(Debug, Default)]
pub struct ReferenceCache {
    partners: Option<Vec<Partner>>,
    managers: Option<Vec<Manager>>,
    loan_types: Option<Vec<LoanType>>,
    lenders: Vec<Lender>,
    lenders_for: Option<String>,
}

impl ReferenceCache {
    pub fn partners(&self) -> &[Partner] {
        self.partners.as_deref().unwrap_or_default()
    }

    pub fn managers(&self) -> &[Manager] {
        self.managers.as_deref().unwrap_or_default()
    }

    pub fn loan_types(&self) -> &[LoanType] {
        self.loan_types.as_deref().unwrap_or_default()
    }

    /// Lenders scoped to the most recently fetched loan type.
    pub fn lenders(&self) -> &[Lender] {
        &self.lenders
    }

    pub fn lenders_for(&self) -> Option<&str> {
        self.lenders_for.as_deref()
    }
}

/// Owns the reference cache and the two asynchronous cascades. One resolver
/// per dialog instance; the cache itself is shared across every dialog in
/// the session.
pub struct DependentDataResolver {
    reference: Rc<dyn ReferenceApi>,
    cache: Rc<RefCell<ReferenceCache>>,
    postal: PostalCascade,
}

impl DependentDataResolver {
    pub fn new(
        reference: Rc<dyn ReferenceApi>,
        postal: Rc<dyn PostalApi>,
        cache: Rc<RefCell<ReferenceCache>>,
    ) -> Self {
        Self {
            reference,
            cache,
            postal: PostalCascade::new(postal),
        }
    }

    pub fn cache(&self) -> Rc<RefCell<ReferenceCache>> {
        Rc::clone(&self.cache)
    }

    pub fn postal_mut(&mut self) -> &mut PostalCascade {
        &mut self.postal
    }

    /// Lazily loads the partner list, once per session. A failed fetch
    /// leaves the slot unloaded so the next dialog open retries.
    pub async fn ensure_partners(&self) {
        if self.cache.borrow().partners.is_some() {
            return;
        }
        match self.reference.partners().await {
            Ok(list) => {
                debug!(count = list.len(), "loaded partners");
                self.cache.borrow_mut().partners = Some(list);
            }
            Err(error) => warn!(%error, "partner list fetch failed"),
        }
    }

    pub async fn ensure_managers(&self) {
        if self.cache.borrow().managers.is_some() {
            return;
        }
        match self.reference.managers().await {
            Ok(list) => {
                debug!(count = list.len(), "loaded managers");
                self.cache.borrow_mut().managers = Some(list);
            }
            Err(error) => warn!(%error, "manager list fetch failed"),
        }
    }

    pub async fn ensure_loan_types(&self) {
        if self.cache.borrow().loan_types.is_some() {
            return;
        }
        match self.reference.loan_types().await {
            Ok(list) => {
                debug!(count = list.len(), "loaded loan types");
                self.cache.borrow_mut().loan_types = Some(list);
            }
            Err(error) => warn!(%error, "loan type list fetch failed"),
        }
    }

    /// The user picked a different loan type: the selected lender no longer
    /// belongs to the offered set, so it is cleared before the scoped list
    /// is fetched. A repeated identifier is a no-op.
    pub async fn loan_type_changed(&self, draft: &Rc<RefCell<LeadDraft>>, loan_type_id: &str) {
        if self.cache.borrow().lenders_for.as_deref() == Some(loan_type_id) {
            return;
        }
        draft.borrow_mut().lender_name.clear();
        self.fetch_lenders(loan_type_id).await;
    }

    /// Initial hydration of an edit/duplicate record: fetch the existing
    /// loan type's lenders WITHOUT clearing the selected lender, or editing
    /// a lead would silently lose its selection.
    pub async fn hydrate_lenders(&self, loan_type_id: &str) {
        if loan_type_id.is_empty()
            || self.cache.borrow().lenders_for.as_deref() == Some(loan_type_id)
        {
            return;
        }
        self.fetch_lenders(loan_type_id).await;
    }

    async fn fetch_lenders(&self, loan_type_id: &str) {
        // Recorded before the call resolves, so a re-render mid-flight does
        // not issue a duplicate request.
        self.cache.borrow_mut().lenders_for = Some(loan_type_id.to_string());
        match self.reference.lenders(loan_type_id).await {
            Ok(list) => {
                debug!(loan_type_id, count = list.len(), "loaded lenders");
                self.cache.borrow_mut().lenders = list;
            }
            Err(error) => {
                warn!(loan_type_id, %error, "lender list fetch failed");
                self.cache.borrow_mut().lenders = Vec::new();
            }
        }
    }
}

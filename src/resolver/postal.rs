use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::PostalApi;
use crate::domain::LeadDraft;
use crate::validate::is_complete_pincode;

pub const POSTAL_DEBOUNCE: Duration = Duration::from_millis(500);

/// Debounced pincode → city/state cascade.
///
/// Every keystroke lands here. A partial code clears the derived fields at
/// once; a complete six-digit code replaces any pending lookup with a fresh
/// task that sleeps out the debounce window, then resolves. The task holds
/// only a `Weak` to the draft, so a closed dialog is never written, and the
/// captured code is compared against the live value again at resolution
/// time — network latency can outlive an aborted timer, so the abort alone
/// is not enough.
pub struct PostalCascade {
    postal: Rc<dyn PostalApi>,
    debounce: Duration,
    pending: Option<JoinHandle<()>>,
}

impl PostalCascade {
    pub fn new(postal: Rc<dyn PostalApi>) -> Self {
        Self {
            postal,
            debounce: POSTAL_DEBOUNCE,
            pending: None,
        }
    }

    /// Must run inside a `tokio::task::LocalSet`; the lookup task is
    /// spawned on the local executor.
    pub fn pincode_changed(&mut self, draft: &Rc<RefCell<LeadDraft>>) {
        self.cancel();

        let code = draft.borrow().applicant_pincode.clone();
        if !is_complete_pincode(&code) {
            draft.borrow_mut().clear_city_state();
            return;
        }

        let postal = Rc::clone(&self.postal);
        let weak: Weak<RefCell<LeadDraft>> = Rc::downgrade(draft);
        let debounce = self.debounce;
        self.pending = Some(tokio::task::spawn_local(async move {
            tokio::time::sleep(debounce).await;
            resolve(postal, weak, code).await;
        }));
    }

    /// Aborts the pending lookup, if any. Harmless when the task already
    /// resolved.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Waits for the pending lookup to finish or be aborted. Test and
    /// teardown hook; production callers just let the task run.
    pub async fn settled(&mut self) {
        if let Some(handle) = self.pending.take() {
            let _ = handle.await;
        }
    }
}

async fn resolve(postal: Rc<dyn PostalApi>, weak: Weak<RefCell<LeadDraft>>, code: String) {
    // The debounce timer has elapsed; skip the request outright if the user
    // kept typing in the meantime.
    let Some(draft) = weak.upgrade() else { return };
    if draft.borrow().applicant_pincode != code {
        return;
    }
    drop(draft);

    let result = postal.lookup(&code).await;

    // Staleness guard at resolution time: the dialog may be gone, or the
    // code may have changed while the request was in flight.
    let Some(draft) = weak.upgrade() else { return };
    if draft.borrow().applicant_pincode != code {
        return;
    }
    match result {
        Ok(response) => {
            if let Some(office) = response.first_match() {
                debug!(%code, district = %office.district, state = %office.state, "postal lookup resolved");
                draft
                    .borrow_mut()
                    .set_city_state(office.district.clone(), office.state.clone());
            }
            // Success with no offices leaves city/state untouched.
        }
        Err(error) => warn!(%code, %error, "postal lookup failed"),
    }
}

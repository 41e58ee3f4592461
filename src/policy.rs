use indexmap::IndexMap;

use crate::domain::{FieldKey, Mode, Role};

/// Visibility and editability of a single field for one (role, mode) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPolicy {
    pub visible: bool,
    pub read_only: bool,
}

impl FieldPolicy {
    pub fn editable(&self) -> bool {
        self.visible && !self.read_only
    }
}

/// The full per-field policy table, total over [`FieldKey::ALL`] and ordered
/// the way the form lays its fields out. Always recomputed via [`config`] on
/// a role or mode change, never patched in place.
pub type FormPolicy = IndexMap<FieldKey, FieldPolicy>;

/// Derives the policy table for one (role, mode) pair. Pure and total: every
/// field key gets an entry, and the same inputs always produce the same
/// table.
pub fn config(role: Role, mode: Mode) -> FormPolicy {
    FieldKey::ALL
        .iter()
        .map(|&key| (key, rule(key, role, mode)))
        .collect()
}

fn rule(key: FieldKey, role: Role, mode: Mode) -> FieldPolicy {
    use FieldKey::*;

    match key {
        // Partner is picked once, at creation, by back-office staff.
        PartnerName => FieldPolicy {
            visible: role.is_back_office(),
            read_only: mode != Mode::Create,
        },
        // Applicant identity and contact block: frozen when duplicating.
        ApplicantProfile | ApplicantName | BusinessName | ApplicantMobile | ApplicantEmail
        | ApplicantPincode | Comments => FieldPolicy {
            visible: true,
            read_only: mode == Mode::Duplicate,
        },
        // Derived from the pincode lookup; no direct edit path exists.
        City | State => FieldPolicy {
            visible: true,
            read_only: true,
        },
        // Intentionally editable even in duplicate mode: a duplicated lead
        // may target a different product or amount.
        LoanType | LoanAmount => FieldPolicy {
            visible: true,
            read_only: false,
        },
        // Managers see the assignment but it is pinned to themselves.
        AssignTo => FieldPolicy {
            visible: role.is_back_office(),
            read_only: role != Role::Admin,
        },
        // A lender is never chosen at creation time.
        LenderName => FieldPolicy {
            visible: role.is_back_office() && mode.hydrates_from_record(),
            read_only: false,
        },
    }
}

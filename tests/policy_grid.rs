use leadform::domain::{FieldKey, Mode, Role};
use leadform::{FieldPolicy, config};

#[test]
fn every_pair_yields_a_total_policy_table() {
    for role in Role::ALL {
        for mode in Mode::ALL {
            let policy = config(role, mode);
            for key in FieldKey::ALL {
                let FieldPolicy { visible, read_only } = policy[&key];
                // Both flags must be defined for every key; a visible,
                // editable derived field would be a contradiction.
                if matches!(key, FieldKey::City | FieldKey::State) {
                    assert!(visible && read_only, "{key} for {role:?}/{mode:?}");
                }
            }
        }
    }
}

#[test]
fn partner_is_read_only_outside_create() {
    for role in Role::ALL {
        for mode in Mode::ALL {
            let rule = config(role, mode)[&FieldKey::PartnerName];
            assert_eq!(rule.read_only, mode != Mode::Create, "{role:?}/{mode:?}");
            assert_eq!(rule.visible, role.is_back_office(), "{role:?}/{mode:?}");
        }
    }
}

#[test]
fn lender_visibility_matches_the_contract() {
    for role in Role::ALL {
        for mode in Mode::ALL {
            let expected = matches!(role, Role::Admin | Role::Manager)
                && matches!(mode, Mode::Edit | Mode::Duplicate);
            assert_eq!(
                config(role, mode)[&FieldKey::LenderName].visible,
                expected,
                "{role:?}/{mode:?}"
            );
        }
    }
}

#[test]
fn duplicate_mode_freezes_identity_but_not_loan_fields() {
    for role in Role::ALL {
        let policy = config(role, Mode::Duplicate);
        for key in [
            FieldKey::ApplicantProfile,
            FieldKey::ApplicantName,
            FieldKey::BusinessName,
            FieldKey::ApplicantMobile,
            FieldKey::ApplicantEmail,
            FieldKey::ApplicantPincode,
            FieldKey::Comments,
        ] {
            assert!(policy[&key].read_only, "{key} should freeze for {role:?}");
        }
        assert!(policy[&FieldKey::LoanType].editable());
        assert!(policy[&FieldKey::LoanAmount].editable());
    }
}

#[test]
fn assign_to_is_pinned_for_everyone_but_admin() {
    for mode in Mode::ALL {
        assert!(config(Role::Admin, mode)[&FieldKey::AssignTo].editable());
        let manager = config(Role::Manager, mode)[&FieldKey::AssignTo];
        assert!(manager.visible && manager.read_only);
        for role in [Role::Partner, Role::Associate] {
            assert!(!config(role, mode)[&FieldKey::AssignTo].visible);
        }
    }
}

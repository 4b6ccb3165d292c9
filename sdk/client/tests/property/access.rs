//! Property-based tests for operation gating.
//!
//! Invariants tested:
//! - Each operation is allowed for exactly one role
//! - A denied decision always carries a reason

use medchain_client::{AccessController, Decision, Operation, Role};
use proptest::prelude::*;
use proptest_derive::Arbitrary;

#[derive(Arbitrary, Debug, Clone, Copy)]
enum AnyRole {
    Unknown,
    Patient,
    Doctor,
}

impl From<AnyRole> for Role {
    fn from(role: AnyRole) -> Self {
        match role {
            AnyRole::Unknown => Role::Unknown,
            AnyRole::Patient => Role::Patient,
            AnyRole::Doctor => Role::Doctor,
        }
    }
}

#[derive(Arbitrary, Debug, Clone, Copy)]
enum AnyOperation {
    RegisterDoctor,
    RegisterPatient,
    SearchPatient,
    UploadRecord,
    ViewOwnRecords,
}

impl From<AnyOperation> for Operation {
    fn from(op: AnyOperation) -> Self {
        match op {
            AnyOperation::RegisterDoctor => Operation::RegisterDoctor,
            AnyOperation::RegisterPatient => Operation::RegisterPatient,
            AnyOperation::SearchPatient => Operation::SearchPatient,
            AnyOperation::UploadRecord => Operation::UploadRecord,
            AnyOperation::ViewOwnRecords => Operation::ViewOwnRecords,
        }
    }
}

const ROLES: [Role; 3] = [Role::Unknown, Role::Patient, Role::Doctor];

proptest! {
    #[test]
    fn prop_each_operation_has_one_role(op in any::<AnyOperation>()) {
        let op = Operation::from(op);
        let allowed = ROLES
            .iter()
            .filter(|role| AccessController::authorize(**role, op).is_allowed())
            .count();
        prop_assert_eq!(allowed, 1);
    }

    #[test]
    fn prop_denials_explain_themselves(role in any::<AnyRole>(), op in any::<AnyOperation>()) {
        if let Decision::Denied(reason) = AccessController::authorize(role.into(), op.into()) {
            prop_assert!(!reason.is_empty());
        }
    }
}

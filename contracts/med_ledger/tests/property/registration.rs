#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for registration.
//!
//! Invariants tested:
//! - Any 12-digit Aadhar binds exactly the registered address
//! - Anything else is rejected with `InvalidAadhar` and binds nothing
//! - A bound Aadhar can never be rebound to a second address

use med_ledger::{ContractError, MedLedgerContract, MedLedgerContractClient, Role};
use proptest::prelude::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env, String};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn setup() -> (Env, MedLedgerContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(MedLedgerContract, ());
    let client = MedLedgerContractClient::new(&env, &contract_id);

    let doctor = Address::generate(&env);
    client.add_doctor(&doctor, &String::from_str(&env, "Dr. Rao"));

    (env, client, doctor)
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn prop_valid_aadhar_binds_patient(aadhar in "[0-9]{12}") {
        let (env, client, doctor) = setup();
        let patient = Address::generate(&env);
        let aadhar = String::from_str(&env, &aadhar);

        client.add_patient(&doctor, &patient, &String::from_str(&env, "Asha"), &aadhar);

        prop_assert_eq!(client.get_address_with_aadhar(&aadhar), Some(patient.clone()));
        prop_assert_eq!(client.get_role(&patient), Role::Patient);
    }

    #[test]
    fn prop_malformed_aadhar_rejected(aadhar in "[0-9]{0,11}|[0-9]{13,16}|[0-9]{11}[a-z]") {
        let (env, client, doctor) = setup();
        let patient = Address::generate(&env);
        let aadhar = String::from_str(&env, &aadhar);

        let result = client.try_add_patient(&doctor, &patient, &String::from_str(&env, "Asha"), &aadhar);

        prop_assert_eq!(result, Err(Ok(ContractError::InvalidAadhar)));
        prop_assert!(!client.get_patient_exists(&patient));
        prop_assert_eq!(client.get_address_with_aadhar(&aadhar), None);
    }

    #[test]
    fn prop_aadhar_never_rebinds(aadhar in "[0-9]{12}") {
        let (env, client, doctor) = setup();
        let first = Address::generate(&env);
        let second = Address::generate(&env);
        let aadhar = String::from_str(&env, &aadhar);

        client.add_patient(&doctor, &first, &String::from_str(&env, "Asha"), &aadhar);
        let result = client.try_add_patient(&doctor, &second, &String::from_str(&env, "Ravi"), &aadhar);

        prop_assert_eq!(result, Err(Ok(ContractError::AadharAlreadyBound)));
        prop_assert_eq!(client.get_address_with_aadhar(&aadhar), Some(first));
        prop_assert_eq!(client.get_role(&second), Role::Unknown);
    }
}

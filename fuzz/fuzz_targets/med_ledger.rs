#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use med_common::is_identity;
use med_ledger::{MedLedgerContract, MedLedgerContractClient};
use soroban_sdk::{testutils::Address as _, Address, Env, String};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    RegisterDoctor { caller: u8, name_len: u8 },
    RegisterPatient { caller: u8, patient: u8, aadhar: std::string::String },
    AddRecord { caller: u8, patient: u8, cid_len: u8, file_name_len: u8 },
}

fn text(env: &Env, len: u8) -> String {
    String::from_str(env, &"a".repeat(len as usize))
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(MedLedgerContract, ());
    let client = MedLedgerContractClient::new(&env, &contract_id);

    let accounts: std::vec::Vec<Address> = (0..8).map(|_| Address::generate(&env)).collect();
    let pick = |n: u8| &accounts[n as usize % accounts.len()];

    let mut committed = 0u64;

    for action in actions {
        match action {
            FuzzAction::RegisterDoctor { caller, name_len } => {
                let _ = client.try_add_doctor(pick(caller), &text(&env, name_len));
            }
            FuzzAction::RegisterPatient {
                caller,
                patient,
                aadhar,
            } => {
                let aadhar = aadhar.chars().take(20).collect::<std::string::String>();
                let bound = String::from_str(&env, &aadhar);
                let result = client.try_add_patient(
                    pick(caller),
                    pick(patient),
                    &String::from_str(&env, "Patient"),
                    &bound,
                );
                if result.is_ok() {
                    assert!(is_identity(aadhar.as_bytes()));
                    assert_eq!(client.get_address_with_aadhar(&bound), Some(pick(patient).clone()));
                }
            }
            FuzzAction::AddRecord {
                caller,
                patient,
                cid_len,
                file_name_len,
            } => {
                let result = client.try_add_record(
                    pick(caller),
                    &text(&env, cid_len),
                    &text(&env, file_name_len),
                    pick(patient),
                );
                if result.is_ok() {
                    committed += 1;
                }
            }
        }

        for account in &accounts {
            assert!(!(client.get_doctor_exists(account) && client.get_patient_exists(account)));
        }
        assert_eq!(client.get_record_count(), committed);
    }
});

#![allow(dead_code)]

use med_ledger::{MedLedgerContract, MedLedgerContractClient};
use soroban_sdk::{testutils::Address as _, Address, Env, String};

pub const CID: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";

pub struct TestContext {
    pub env: Env,
    pub client: MedLedgerContractClient<'static>,
    pub doctor: Address,
}

/// Creates a mocked Soroban environment, deploys the contract, and registers one doctor.
pub fn setup_test_env() -> TestContext {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(MedLedgerContract, ());
    let client = MedLedgerContractClient::new(&env, &contract_id);

    let doctor = Address::generate(&env);
    client.add_doctor(&doctor, &String::from_str(&env, "Dr. Rao"));

    TestContext { env, client, doctor }
}

/// Registers a patient through the context's doctor and returns its address.
pub fn create_test_patient(ctx: &TestContext, name: &str, aadhar: &str) -> Address {
    let patient = Address::generate(&ctx.env);
    ctx.client.add_patient(
        &ctx.doctor,
        &patient,
        &String::from_str(&ctx.env, name),
        &String::from_str(&ctx.env, aadhar),
    );
    patient
}

pub fn text(ctx: &TestContext, value: &str) -> String {
    String::from_str(&ctx.env, value)
}

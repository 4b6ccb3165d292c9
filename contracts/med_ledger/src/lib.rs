#![no_std]
pub mod errors;
pub mod events;
pub mod rbac;
pub mod validation;

use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, Address, Env, String, Symbol, Vec};

pub use errors::{create_error_context, ContractError, ErrorCategory, ErrorContext, ErrorSeverity};
pub use rbac::{Permission, Role};

use errors::reject;

/// Storage keys for the contract
const RECORD_COUNTER: Symbol = symbol_short!("REC_CTR");
const DOCTOR: Symbol = symbol_short!("DOCTOR");
const PATIENT: Symbol = symbol_short!("PATIENT");
const AADHAR: Symbol = symbol_short!("AADHAR");
const PATIENT_RECORDS: Symbol = symbol_short!("PAT_REC");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// Extends the time-to-live (TTL) for a storage key containing an Address.
pub(crate) fn extend_ttl_address_key(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the time-to-live (TTL) for a storage key containing a String.
fn extend_ttl_string_key(env: &Env, key: &(Symbol, String)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Doctor registration
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Doctor {
    pub address: Address,
    pub name: String,
    pub registered_at: u64,
}

/// Patient registration
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Patient {
    pub address: Address,
    pub name: String,
    pub aadhar: String,
    pub registered_by: Address,
    pub registered_at: u64,
}

/// Record metadata. The document itself lives in content-addressed storage
/// under `cid`; the ledger only holds the pointer.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    pub id: u64,
    pub cid: String,
    pub file_name: String,
    pub patient: Address,
    pub doctor: Address,
    pub created_at: u64,
}

#[contract]
pub struct MedLedgerContract;

#[contractimpl]
impl MedLedgerContract {
    /// Register the calling account as a doctor.
    /// Only accounts without a role may do this.
    pub fn add_doctor(env: Env, caller: Address, name: String) -> Result<(), ContractError> {
        caller.require_auth();

        if !rbac::has_permission(&env, &caller, &Permission::RegisterSelf) {
            return Err(reject(&env, ContractError::AlreadyRegistered, Some(caller)));
        }

        validation::validate_name(&name).map_err(|e| reject(&env, e, Some(caller.clone())))?;

        let doctor = Doctor {
            address: caller.clone(),
            name: name.clone(),
            registered_at: env.ledger().timestamp(),
        };

        let key = (DOCTOR, caller.clone());
        env.storage().persistent().set(&key, &doctor);
        extend_ttl_address_key(&env, &key);
        rbac::assign_role(&env, &caller, Role::Doctor)
            .map_err(|e| reject(&env, e, Some(caller.clone())))?;

        events::publish_doctor_registered(&env, caller, name);

        Ok(())
    }

    /// Register a patient on behalf of the calling doctor and bind the
    /// Aadhar number to the patient's address.
    pub fn add_patient(
        env: Env,
        caller: Address,
        patient: Address,
        name: String,
        aadhar: String,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        if !rbac::has_permission(&env, &caller, &Permission::RegisterPatient) {
            return Err(reject(&env, ContractError::Unauthorized, Some(caller)));
        }

        validation::validate_aadhar(&aadhar)
            .and_then(|()| validation::validate_name(&name))
            .map_err(|e| reject(&env, e, Some(patient.clone())))?;

        let key = (PATIENT, patient.clone());
        if env.storage().persistent().has(&key) {
            return Err(reject(&env, ContractError::PatientAlreadyExists, Some(patient)));
        }

        let aadhar_key = (AADHAR, aadhar.clone());
        if env.storage().persistent().has(&aadhar_key) {
            return Err(reject(&env, ContractError::AadharAlreadyBound, Some(patient)));
        }

        rbac::assign_role(&env, &patient, Role::Patient)
            .map_err(|e| reject(&env, e, Some(patient.clone())))?;

        let record = Patient {
            address: patient.clone(),
            name: name.clone(),
            aadhar,
            registered_by: caller.clone(),
            registered_at: env.ledger().timestamp(),
        };

        env.storage().persistent().set(&key, &record);
        extend_ttl_address_key(&env, &key);
        env.storage().persistent().set(&aadhar_key, &patient);
        extend_ttl_string_key(&env, &aadhar_key);

        events::publish_patient_registered(&env, patient, caller, name);

        Ok(())
    }

    /// Append a record to a registered patient's history.
    /// The calling doctor is recorded as the issuer.
    pub fn add_record(
        env: Env,
        caller: Address,
        cid: String,
        file_name: String,
        patient: Address,
    ) -> Result<u64, ContractError> {
        caller.require_auth();

        if !rbac::has_permission(&env, &caller, &Permission::WriteRecord) {
            return Err(reject(&env, ContractError::Unauthorized, Some(caller)));
        }

        validation::validate_content_address(&cid)
            .and_then(|()| validation::validate_file_name(&file_name))
            .map_err(|e| reject(&env, e, Some(caller.clone())))?;

        if !Self::get_patient_exists(env.clone(), patient.clone()) {
            return Err(reject(&env, ContractError::PatientNotFound, Some(patient)));
        }

        let record_id: u64 = env
            .storage()
            .instance()
            .get(&RECORD_COUNTER)
            .unwrap_or(0u64)
            .saturating_add(1);
        env.storage().instance().set(&RECORD_COUNTER, &record_id);

        let record = Record {
            id: record_id,
            cid: cid.clone(),
            file_name,
            patient: patient.clone(),
            doctor: caller.clone(),
            created_at: env.ledger().timestamp(),
        };

        let key = (PATIENT_RECORDS, patient.clone());
        let mut records: Vec<Record> = env
            .storage()
            .persistent()
            .get(&key)
            .unwrap_or(Vec::new(&env));
        records.push_back(record);
        env.storage().persistent().set(&key, &records);
        extend_ttl_address_key(&env, &key);

        events::publish_record_added(&env, record_id, patient, caller, cid);

        Ok(record_id)
    }

    /// Address bound to an Aadhar number, if any.
    pub fn get_address_with_aadhar(env: Env, aadhar: String) -> Option<Address> {
        env.storage().persistent().get(&(AADHAR, aadhar))
    }

    pub fn get_patient_exists(env: Env, patient: Address) -> bool {
        env.storage().persistent().has(&(PATIENT, patient))
    }

    pub fn get_doctor_exists(env: Env, doctor: Address) -> bool {
        env.storage().persistent().has(&(DOCTOR, doctor))
    }

    pub fn get_role(env: Env, account: Address) -> Role {
        rbac::get_role(&env, &account)
    }

    /// Get patient registration details
    pub fn get_patient(env: Env, patient: Address) -> Result<Patient, ContractError> {
        env.storage()
            .persistent()
            .get(&(PATIENT, patient.clone()))
            .ok_or_else(|| reject(&env, ContractError::PatientNotFound, Some(patient)))
    }

    /// Get doctor registration details
    pub fn get_doctor(env: Env, doctor: Address) -> Result<Doctor, ContractError> {
        env.storage()
            .persistent()
            .get(&(DOCTOR, doctor.clone()))
            .ok_or_else(|| reject(&env, ContractError::DoctorNotFound, Some(doctor)))
    }

    /// All records of `patient` in insertion order, as seen by a doctor.
    pub fn get_records_by_doctor(
        env: Env,
        caller: Address,
        patient: Address,
    ) -> Result<Vec<Record>, ContractError> {
        caller.require_auth();

        if !rbac::has_permission(&env, &caller, &Permission::ReadAnyRecord) {
            return Err(reject(&env, ContractError::Unauthorized, Some(caller)));
        }

        if !Self::get_patient_exists(env.clone(), patient.clone()) {
            return Err(reject(&env, ContractError::PatientNotFound, Some(patient)));
        }

        Ok(Self::records_of(&env, patient))
    }

    /// The calling patient's own records in insertion order.
    pub fn get_own_records(env: Env, caller: Address) -> Result<Vec<Record>, ContractError> {
        caller.require_auth();

        if !rbac::has_permission(&env, &caller, &Permission::ReadOwnRecords) {
            return Err(reject(&env, ContractError::Unauthorized, Some(caller)));
        }

        Ok(Self::records_of(&env, caller))
    }

    /// Get the total number of records
    pub fn get_record_count(env: Env) -> u64 {
        env.storage().instance().get(&RECORD_COUNTER).unwrap_or(0)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }

    fn records_of(env: &Env, patient: Address) -> Vec<Record> {
        env.storage()
            .persistent()
            .get(&(PATIENT_RECORDS, patient))
            .unwrap_or(Vec::new(env))
    }
}

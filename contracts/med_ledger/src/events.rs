use crate::errors::ErrorContext;
use soroban_sdk::{symbol_short, Address, Env, String};

/// Event published when an account registers itself as a doctor.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DoctorRegisteredEvent {
    pub doctor: Address,
    pub name: String,
    pub timestamp: u64,
}

/// Event published when a doctor registers a patient.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientRegisteredEvent {
    pub patient: Address,
    pub registered_by: Address,
    pub name: String,
    pub timestamp: u64,
}

/// Event published when a record is appended to a patient's history.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordAddedEvent {
    pub record_id: u64,
    pub patient: Address,
    pub doctor: Address,
    pub cid: String,
    pub timestamp: u64,
}

pub fn publish_doctor_registered(env: &Env, doctor: Address, name: String) {
    let topics = (symbol_short!("DOC_REG"), doctor.clone());
    let data = DoctorRegisteredEvent {
        doctor,
        name,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a new patient is registered.
/// The Aadhar number is deliberately left out of the payload.
pub fn publish_patient_registered(env: &Env, patient: Address, registered_by: Address, name: String) {
    let topics = (symbol_short!("PAT_REG"), patient.clone());
    let data = PatientRegisteredEvent {
        patient,
        registered_by,
        name,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a record is added.
/// Topics carry both the patient and the issuing doctor.
pub fn publish_record_added(env: &Env, record_id: u64, patient: Address, doctor: Address, cid: String) {
    let topics = (symbol_short!("REC_ADD"), patient.clone(), doctor.clone());
    let data = RecordAddedEvent {
        record_id,
        patient,
        doctor,
        cid,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_error(env: &Env, error_code: u32, context: ErrorContext) {
    let topics = (
        symbol_short!("ERROR"),
        context.category.clone(),
        context.severity.clone(),
    );
    let data = (
        error_code,
        context.category,
        context.severity,
        context.message,
        context.user,
        context.timestamp,
    );
    env.events().publish(topics, data);
}

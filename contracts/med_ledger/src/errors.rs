use soroban_sdk::{contracttype, Address, Env, String};

use crate::events;

/// Error categories for classifying different types of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Validation errors: malformed identity, empty names or hashes
    Validation = 1,
    /// Authorization errors: caller lacks the role for the operation
    Authorization = 2,
    /// Not found errors: unknown patient or doctor
    NotFound = 3,
    /// State conflict errors: duplicate registrations and identity bindings
    StateConflict = 4,
}

/// Error severity levels indicating the impact and urgency of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    /// Low severity: rejected input, nothing changed
    Low = 1,
    /// Medium severity: an account tried something its role does not allow
    Medium = 2,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ErrorContext {
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub message: String,
    pub user: Option<Address>,
    pub timestamp: u64,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    Unauthorized = 1,
    AlreadyRegistered = 2,
    DoctorNotFound = 3,
    PatientNotFound = 4,
    PatientAlreadyExists = 5,
    InvalidAadhar = 6,
    AadharAlreadyBound = 7,
    InvalidName = 8,
    InvalidFileName = 9,
    InvalidContentAddress = 10,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::InvalidAadhar
            | ContractError::InvalidName
            | ContractError::InvalidFileName
            | ContractError::InvalidContentAddress => ErrorCategory::Validation,
            ContractError::Unauthorized => ErrorCategory::Authorization,
            ContractError::DoctorNotFound | ContractError::PatientNotFound => {
                ErrorCategory::NotFound
            }
            ContractError::AlreadyRegistered
            | ContractError::PatientAlreadyExists
            | ContractError::AadharAlreadyBound => ErrorCategory::StateConflict,
        }
    }

    /// Returns the severity level for this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Authorization => ErrorSeverity::Medium,
            _ => ErrorSeverity::Low,
        }
    }

    /// Returns a human-readable error message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::Unauthorized => "Caller is not authorized for this operation",
            ContractError::AlreadyRegistered => "Account already holds a role",
            ContractError::DoctorNotFound => "Doctor not found in the system",
            ContractError::PatientNotFound => "Patient not found in the system",
            ContractError::PatientAlreadyExists => "Patient is already registered",
            ContractError::InvalidAadhar => "Aadhar number must be exactly 12 digits",
            ContractError::AadharAlreadyBound => "Aadhar number is already in use",
            ContractError::InvalidName => "Name is empty or too long",
            ContractError::InvalidFileName => "File name is empty or too long",
            ContractError::InvalidContentAddress => "Content address is empty or too long",
        }
    }
}

/// Creates an ErrorContext structure from an error and the offending account.
pub fn create_error_context(env: &Env, error: ContractError, user: Option<Address>) -> ErrorContext {
    ErrorContext {
        category: error.category(),
        severity: error.severity(),
        message: String::from_str(env, error.message()),
        user,
        timestamp: env.ledger().timestamp(),
    }
}

/// Publishes an error event for `error` and hands the error back so call
/// sites can write `return Err(reject(&env, ContractError::X, Some(caller)))`.
pub fn reject(env: &Env, error: ContractError, user: Option<Address>) -> ContractError {
    let context = create_error_context(env, error, user);
    events::publish_error(env, error as u32, context);
    error
}

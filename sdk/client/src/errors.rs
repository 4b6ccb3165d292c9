use std::fmt;

use thiserror::Error;

use crate::access::Operation;
use crate::types::AccountAddress;

/// Which identifier failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatKind {
    Identity,
    AccountAddress,
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatKind::Identity => f.write_str("identity number"),
            FormatKind::AccountAddress => f.write_str("account address"),
        }
    }
}

/// Failure reported by a [`Ledger`](crate::ledger::Ledger) implementation.
///
/// Callers treat every variant as opaque; the text is for diagnostics.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("ledger rejected the call: {0}")]
    Rejected(String),
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
    #[error("account {0} is not known to this ledger connection")]
    UnknownAccount(AccountAddress),
}

/// Failure reported by a [`RecordStore`](crate::store::RecordStore).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store rejected the payload: {0}")]
    Rejected(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("payload of {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },
}

/// Errors surfaced by the coordinators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("invalid {kind}: {value:?}")]
    InvalidFormat { kind: FormatKind, value: String },

    #[error("patient does not exist")]
    PatientNotFound,

    #[error("no patient selected, search for a patient first")]
    NoPatientSelected,

    #[error("record draft needs both a file and its contents")]
    DraftIncomplete,

    #[error("record storage failed: {0}")]
    StorageFailure(#[source] StoreError),

    #[error("ledger commit failed: {0}")]
    LedgerCommitFailure(#[source] LedgerError),

    #[error("ledger query failed: {0}")]
    LedgerQueryFailure(#[source] LedgerError),

    #[error("{operation} denied: {reason}")]
    Denied {
        operation: Operation,
        reason: &'static str,
    },

    #[error("no wallet account is connected")]
    Disconnected,
}

impl ClientError {
    /// Message shown to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            ClientError::InvalidFormat {
                kind: FormatKind::Identity,
                ..
            } => "Please enter a valid Aadhar Number",
            ClientError::InvalidFormat {
                kind: FormatKind::AccountAddress,
                ..
            } => "Please enter a valid wallet address",
            ClientError::PatientNotFound => "Patient does not exist",
            ClientError::NoPatientSelected => "Please search for a patient first",
            ClientError::DraftIncomplete => "Please choose a file to upload",
            ClientError::StorageFailure(_) => "Record upload failed",
            ClientError::LedgerCommitFailure(_) => "The ledger rejected the request",
            ClientError::LedgerQueryFailure(_) => "Could not reach the ledger",
            ClientError::Denied { .. } => "You are not allowed to do this",
            ClientError::Disconnected => {
                "Open your wallet to get connected, then refresh this page"
            }
        }
    }
}

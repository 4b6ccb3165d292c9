//! # MedChain client
//!
//! Coordination core of the doctor-facing record client. Patients are
//! looked up by identity number or account address, records are written to
//! a content-addressed store and then committed to the ledger, and every
//! operation is gated by the role the ledger reports for the session
//! account.
//!
//! The ledger and the store are reached only through the [`Ledger`] and
//! [`RecordStore`] traits. [`SorobanLedger`] adapts the `med_ledger`
//! contract and [`MemoryRecordStore`] keeps payloads in process.

pub mod access;
pub mod config;
pub mod errors;
pub mod identity;
pub mod ledger;
pub mod portal;
pub mod registration;
pub mod search;
pub mod session;
pub mod soroban_ledger;
pub mod store;
pub mod types;
pub mod upload;

pub use access::{AccessController, Decision, Operation, Role};
pub use config::{init_logging, ClientConfig, ConfigError};
pub use errors::{ClientError, FormatKind, LedgerError, StoreError};
pub use identity::IdentityResolver;
pub use ledger::Ledger;
pub use portal::{DoctorPortal, Notification, NotificationLevel, PatientForm, RecordLink};
pub use registration::RegistrationCoordinator;
pub use search::PatientSearchCoordinator;
pub use session::Session;
pub use soroban_ledger::{AccountBook, SorobanLedger};
pub use store::{content_address_of, MemoryRecordStore, RecordStore};
pub use types::{AccountAddress, ContentAddress, Identity, PatientHandle, Record, RecordReceipt};
pub use upload::{RecordDraft, RecordUploadCoordinator};

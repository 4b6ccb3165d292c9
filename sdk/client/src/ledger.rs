//! The narrow call interface the coordinators use to reach the ledger.

use async_trait::async_trait;

use crate::errors::LedgerError;
use crate::types::{AccountAddress, ContentAddress, Identity, Record};

/// Authoritative store of registrations and record metadata.
///
/// Every call is made on behalf of `from`, the session's account. Queries
/// never change state. Mutations may be rejected by the ledger's own rules;
/// callers do not distinguish between rejection reasons.
///
/// Futures are not required to be `Send`: a session has a single thread of
/// control.
#[async_trait(?Send)]
pub trait Ledger {
    /// Address bound to `identity`, or the zero address when unbound.
    async fn get_address_with_aadhar(
        &self,
        from: &AccountAddress,
        identity: &Identity,
    ) -> Result<AccountAddress, LedgerError>;

    async fn get_patient_exists(
        &self,
        from: &AccountAddress,
        patient: &AccountAddress,
    ) -> Result<bool, LedgerError>;

    async fn get_doctor_exists(
        &self,
        from: &AccountAddress,
        doctor: &AccountAddress,
    ) -> Result<bool, LedgerError>;

    /// A patient's records in ledger order, read by a doctor.
    async fn get_records_by_doctor(
        &self,
        from: &AccountAddress,
        patient: &AccountAddress,
    ) -> Result<Vec<Record>, LedgerError>;

    /// The caller's own records, for patient sessions.
    async fn get_own_records(&self, from: &AccountAddress) -> Result<Vec<Record>, LedgerError>;

    async fn add_patient(
        &self,
        from: &AccountAddress,
        patient: &AccountAddress,
        name: &str,
        identity: &Identity,
    ) -> Result<(), LedgerError>;

    async fn add_doctor(&self, from: &AccountAddress, name: &str) -> Result<(), LedgerError>;

    async fn add_record(
        &self,
        from: &AccountAddress,
        content_address: &ContentAddress,
        file_name: &str,
        patient: &AccountAddress,
    ) -> Result<(), LedgerError>;
}

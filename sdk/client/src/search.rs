//! Patient lookup by identity number or account address.

use log::{debug, info};

use crate::access::{AccessController, Operation, Role};
use crate::errors::ClientError;
use crate::identity::IdentityResolver;
use crate::ledger::Ledger;
use crate::session::Session;
use crate::types::{AccountAddress, Identity, PatientHandle, Record};

/// Resolves patients and loads their record history.
///
/// Every call goes back to the ledger; the returned handle is the only
/// snapshot kept.
pub struct PatientSearchCoordinator<'a> {
    ledger: &'a dyn Ledger,
    session: &'a Session,
}

impl<'a> PatientSearchCoordinator<'a> {
    pub fn new(ledger: &'a dyn Ledger, session: &'a Session) -> Self {
        Self { ledger, session }
    }

    pub async fn search_by_identity(&self, raw: &str) -> Result<PatientHandle, ClientError> {
        let identity = Identity::parse(raw)?;
        let (from, _) = self.authorize(Operation::SearchPatient).await?;

        let address = IdentityResolver::new(self.ledger, self.session)
            .resolve_identity(&identity)
            .await?
            .ok_or(ClientError::PatientNotFound)?;
        debug!("identity {identity} resolved to {address}");

        self.load(&from, address).await
    }

    pub async fn search_by_address(&self, raw: &str) -> Result<PatientHandle, ClientError> {
        let address = AccountAddress::parse(raw)?;
        let (from, _) = self.authorize(Operation::SearchPatient).await?;
        self.load(&from, address).await
    }

    /// Records of the session's own account, for patient sessions.
    pub async fn own_records(&self) -> Result<Vec<Record>, ClientError> {
        let (from, _) = self.authorize(Operation::ViewOwnRecords).await?;
        let records = self
            .ledger
            .get_own_records(&from)
            .await
            .map_err(ClientError::LedgerQueryFailure)?;
        info!("{from} has {} records", records.len());
        Ok(records)
    }

    async fn authorize(
        &self,
        operation: Operation,
    ) -> Result<(AccountAddress, Role), ClientError> {
        AccessController::new(self.ledger)
            .require(self.session, operation)
            .await
    }

    async fn load(
        &self,
        from: &AccountAddress,
        address: AccountAddress,
    ) -> Result<PatientHandle, ClientError> {
        let exists = self
            .ledger
            .get_patient_exists(from, &address)
            .await
            .map_err(ClientError::LedgerQueryFailure)?;
        if !exists {
            debug!("no patient registered at {address}");
            return Err(ClientError::PatientNotFound);
        }

        let records = self
            .ledger
            .get_records_by_doctor(from, &address)
            .await
            .map_err(ClientError::LedgerQueryFailure)?;
        info!("loaded {} records for {address}", records.len());

        Ok(PatientHandle::new(address, records))
    }
}

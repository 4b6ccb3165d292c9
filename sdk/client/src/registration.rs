//! Doctor self-registration and doctor-initiated patient registration.

use log::{info, warn};

use crate::access::{AccessController, Operation};
use crate::errors::{ClientError, LedgerError};
use crate::identity::IdentityResolver;
use crate::ledger::Ledger;
use crate::session::Session;
use crate::types::{AccountAddress, Identity};

pub struct RegistrationCoordinator<'a> {
    ledger: &'a dyn Ledger,
    session: &'a Session,
}

impl<'a> RegistrationCoordinator<'a> {
    pub fn new(ledger: &'a dyn Ledger, session: &'a Session) -> Self {
        Self { ledger, session }
    }

    /// Registers the session account as a doctor. Only accounts without a
    /// role may do this.
    pub async fn register_doctor(&self, name: &str) -> Result<AccountAddress, ClientError> {
        let (account, _) = AccessController::new(self.ledger)
            .require(self.session, Operation::RegisterDoctor)
            .await?;

        self.ledger
            .add_doctor(&account, name)
            .await
            .map_err(ClientError::LedgerCommitFailure)?;
        info!("registered doctor {account}");
        Ok(account)
    }

    /// Registers `raw_address` as a patient bound to `raw_identity`.
    ///
    /// An identity already bound to another address is refused here without
    /// sending the registration. A binding to the same address passes and is
    /// left for the ledger to judge.
    pub async fn register_patient(
        &self,
        raw_address: &str,
        name: &str,
        raw_identity: &str,
    ) -> Result<AccountAddress, ClientError> {
        let identity = Identity::parse(raw_identity)?;
        let patient = AccountAddress::parse(raw_address)?;

        let (doctor, _) = AccessController::new(self.ledger)
            .require(self.session, Operation::RegisterPatient)
            .await?;

        let bound = IdentityResolver::new(self.ledger, self.session)
            .resolve_identity(&identity)
            .await?;
        if let Some(existing) = bound.filter(|existing| *existing != patient) {
            warn!("identity {identity} is already bound to {existing}");
            return Err(ClientError::LedgerCommitFailure(LedgerError::Rejected(
                format!("identity already bound to {existing}"),
            )));
        }

        self.ledger
            .add_patient(&doctor, &patient, name, &identity)
            .await
            .map_err(ClientError::LedgerCommitFailure)?;
        info!("doctor {doctor} registered patient {patient}");
        Ok(patient)
    }
}

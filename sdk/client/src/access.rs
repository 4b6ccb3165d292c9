//! Role derivation and operation gating for the session account.

use std::fmt;

use log::{debug, warn};

use crate::errors::ClientError;
use crate::ledger::Ledger;
use crate::session::Session;
use crate::types::AccountAddress;

/// Role of an account as derived from the ledger's registrations.
///
/// `Unknown` may become `Doctor` (self-registration) or `Patient`
/// (registered by a doctor). Both are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Unknown,
    Patient,
    Doctor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    RegisterDoctor,
    RegisterPatient,
    SearchPatient,
    UploadRecord,
    ViewOwnRecords,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::RegisterDoctor => "doctor registration",
            Operation::RegisterPatient => "patient registration",
            Operation::SearchPatient => "patient search",
            Operation::UploadRecord => "record upload",
            Operation::ViewOwnRecords => "viewing own records",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied(&'static str),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }
}

/// Gates operations on the role the ledger reports for the acting account.
///
/// Roles are re-derived on every call; nothing is cached between operations.
pub struct AccessController<'a> {
    ledger: &'a dyn Ledger,
}

impl<'a> AccessController<'a> {
    pub fn new(ledger: &'a dyn Ledger) -> Self {
        Self { ledger }
    }

    /// Doctor registration is checked first; an account never holds both.
    pub async fn derive_role(&self, account: &AccountAddress) -> Result<Role, ClientError> {
        let is_doctor = self
            .ledger
            .get_doctor_exists(account, account)
            .await
            .map_err(ClientError::LedgerQueryFailure)?;
        if is_doctor {
            return Ok(Role::Doctor);
        }

        let is_patient = self
            .ledger
            .get_patient_exists(account, account)
            .await
            .map_err(ClientError::LedgerQueryFailure)?;
        if is_patient {
            return Ok(Role::Patient);
        }

        Ok(Role::Unknown)
    }

    pub fn authorize(role: Role, operation: Operation) -> Decision {
        match (role, operation) {
            (Role::Unknown, Operation::RegisterDoctor) => Decision::Allowed,
            (_, Operation::RegisterDoctor) => Decision::Denied("account is already registered"),

            (Role::Doctor, Operation::RegisterPatient)
            | (Role::Doctor, Operation::SearchPatient)
            | (Role::Doctor, Operation::UploadRecord) => Decision::Allowed,
            (_, Operation::RegisterPatient)
            | (_, Operation::SearchPatient)
            | (_, Operation::UploadRecord) => Decision::Denied("only doctors may do this"),

            (Role::Patient, Operation::ViewOwnRecords) => Decision::Allowed,
            (_, Operation::ViewOwnRecords) => Decision::Denied("only patients have own records"),
        }
    }

    /// Derives the session account's role and checks it against `operation`.
    /// Returns the acting account and its role when allowed.
    pub async fn require(
        &self,
        session: &Session,
        operation: Operation,
    ) -> Result<(AccountAddress, Role), ClientError> {
        let account = session.account()?.clone();
        let role = self.derive_role(&account).await?;
        debug!("{account} acts as {role:?} for {operation}");

        match Self::authorize(role, operation) {
            Decision::Allowed => Ok((account, role)),
            Decision::Denied(reason) => {
                warn!("{operation} denied for {account}: {reason}");
                Err(ClientError::Denied { operation, reason })
            }
        }
    }
}

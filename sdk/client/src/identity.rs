//! Identity number to account address resolution.

use log::debug;

use crate::errors::ClientError;
use crate::ledger::Ledger;
use crate::session::Session;
use crate::types::{AccountAddress, Identity};

/// Read-only lookup of the address an identity is bound to.
pub struct IdentityResolver<'a> {
    ledger: &'a dyn Ledger,
    session: &'a Session,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(ledger: &'a dyn Ledger, session: &'a Session) -> Self {
        Self { ledger, session }
    }

    /// Address bound to `raw`, or `None` when the identity is unbound.
    ///
    /// Malformed input fails with `InvalidFormat` before the ledger is
    /// contacted. The ledger's zero-address answer becomes `None` here and
    /// never reaches callers.
    pub async fn resolve(&self, raw: &str) -> Result<Option<AccountAddress>, ClientError> {
        let identity = Identity::parse(raw)?;
        self.resolve_identity(&identity).await
    }

    pub async fn resolve_identity(
        &self,
        identity: &Identity,
    ) -> Result<Option<AccountAddress>, ClientError> {
        let from = self.session.account()?;
        let address = self
            .ledger
            .get_address_with_aadhar(from, identity)
            .await
            .map_err(ClientError::LedgerQueryFailure)?;

        if address.is_zero() {
            debug!("identity {identity} is unbound");
            return Ok(None);
        }
        Ok(Some(address))
    }

    pub async fn is_bound(&self, raw: &str) -> Result<bool, ClientError> {
        Ok(self.resolve(raw).await?.is_some())
    }
}

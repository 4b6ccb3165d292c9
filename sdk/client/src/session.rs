use crate::errors::ClientError;
use crate::types::AccountAddress;

/// What the wallet provider reports about the current connection.
///
/// The first account is the one every operation acts as.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    accounts: Vec<AccountAddress>,
    loading: bool,
}

impl Session {
    pub fn connected(accounts: Vec<AccountAddress>) -> Self {
        Self {
            accounts,
            loading: false,
        }
    }

    /// A provider that has not answered yet.
    pub fn loading() -> Self {
        Self {
            accounts: Vec::new(),
            loading: true,
        }
    }

    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn accounts(&self) -> &[AccountAddress] {
        &self.accounts
    }

    /// The acting account, `accounts[0]`.
    pub fn account(&self) -> Result<&AccountAddress, ClientError> {
        if self.loading {
            return Err(ClientError::Disconnected);
        }
        self.accounts.first().ok_or(ClientError::Disconnected)
    }
}

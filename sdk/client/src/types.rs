//! Value types shared by the coordinators.

use std::fmt;
use std::str::FromStr;

use med_common::{is_account_address, is_identity, strip_account_prefix, ACCOUNT_HEX_LEN, ACCOUNT_PREFIX};

use crate::errors::{ClientError, FormatKind};

/// A wallet account address in canonical form: `0x` followed by 40
/// lower-case hex digits. Spellings that differ only in case or in the
/// presence of the prefix parse to the same value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// Surrounding whitespace is not tolerated.
    pub fn parse(raw: &str) -> Result<Self, ClientError> {
        if !is_account_address(raw.as_bytes()) {
            return Err(ClientError::InvalidFormat {
                kind: FormatKind::AccountAddress,
                value: raw.to_string(),
            });
        }
        let digits = strip_account_prefix(raw.as_bytes());
        let digits = String::from_utf8_lossy(digits).to_ascii_lowercase();
        Ok(Self(format!("{ACCOUNT_PREFIX}{digits}")))
    }

    /// The all-zero address some ledgers return for "no binding".
    pub fn zero() -> Self {
        Self(format!("{ACCOUNT_PREFIX}{}", "0".repeat(ACCOUNT_HEX_LEN)))
    }

    pub fn is_zero(&self) -> bool {
        self.0[ACCOUNT_PREFIX.len()..].bytes().all(|b| b == b'0')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccountAddress {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A 12-digit national identity (Aadhar) number.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// Parses an identity; surrounding whitespace is not tolerated, the
    /// value must be exactly twelve ASCII digits.
    pub fn parse(raw: &str) -> Result<Self, ClientError> {
        if !is_identity(raw.as_bytes()) {
            return Err(ClientError::InvalidFormat {
                kind: FormatKind::Identity,
                value: raw.to_string(),
            });
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identity {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Address of a payload in the content-addressed store.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContentAddress(String);

impl ContentAddress {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Record metadata as reported by the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub id: u64,
    pub content_address: ContentAddress,
    pub file_name: String,
    pub patient: AccountAddress,
    /// Issuing doctor, taken by the ledger from the writing transaction.
    pub doctor: AccountAddress,
    pub created_at: u64,
}

/// Proof of a successful patient search: the patient exists on the ledger
/// and `records` is the history read right after that check.
///
/// Only the search coordinator hands these out, so holding one means the
/// patient was resolved in this session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientHandle {
    address: AccountAddress,
    records: Vec<Record>,
}

impl PatientHandle {
    pub(crate) fn new(address: AccountAddress, records: Vec<Record>) -> Self {
        Self { address, records }
    }

    pub fn address(&self) -> &AccountAddress {
        &self.address
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

/// Outcome of a committed upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordReceipt {
    pub content_address: ContentAddress,
    pub file_name: String,
    pub patient: AccountAddress,
    /// The patient's history re-read from the ledger after the commit.
    /// `None` when that read failed; the record is committed either way.
    pub records: Option<Vec<Record>>,
}

//! [`Ledger`] backed by the `med_ledger` Soroban contract.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Debug;

use async_trait::async_trait;
use log::debug;
use med_ledger::{MedLedgerContractClient, Record as LedgerRecord};
use soroban_sdk::{Address, Env, String as SorobanString, Vec as SorobanVec};

use crate::errors::LedgerError;
use crate::ledger::Ledger;
use crate::types::{AccountAddress, ContentAddress, Identity, Record};

/// Pairs wallet account addresses with the Soroban addresses that sign for
/// them on this ledger.
#[derive(Default)]
pub struct AccountBook {
    by_account: HashMap<AccountAddress, Address>,
    by_address: Vec<(Address, AccountAddress)>,
}

impl AccountBook {
    /// Binds `account` to `address`. Rebinding an account replaces the old pair.
    pub fn bind(&mut self, account: AccountAddress, address: Address) {
        if let Some(old) = self.by_account.insert(account.clone(), address.clone()) {
            self.by_address.retain(|(a, _)| *a != old);
        }
        self.by_address.push((address, account));
    }

    pub fn address_of(&self, account: &AccountAddress) -> Option<&Address> {
        self.by_account.get(account)
    }

    pub fn account_of(&self, address: &Address) -> Option<&AccountAddress> {
        self.by_address
            .iter()
            .find(|(a, _)| a == address)
            .map(|(_, account)| account)
    }
}

pub struct SorobanLedger {
    env: Env,
    client: MedLedgerContractClient<'static>,
    book: RefCell<AccountBook>,
}

impl SorobanLedger {
    pub fn new(env: &Env, contract_id: &Address) -> Self {
        Self {
            env: env.clone(),
            client: MedLedgerContractClient::new(env, contract_id),
            book: RefCell::new(AccountBook::default()),
        }
    }

    pub fn bind(&self, account: AccountAddress, address: Address) {
        self.book.borrow_mut().bind(account, address);
    }

    fn address_of(&self, account: &AccountAddress) -> Result<Address, LedgerError> {
        self.book
            .borrow()
            .address_of(account)
            .cloned()
            .ok_or_else(|| LedgerError::UnknownAccount(account.clone()))
    }

    fn account_of(&self, address: &Address) -> Result<AccountAddress, LedgerError> {
        self.book
            .borrow()
            .account_of(address)
            .cloned()
            .ok_or_else(|| LedgerError::Unavailable(format!("no account bound to {address:?}")))
    }

    fn text(&self, value: &str) -> SorobanString {
        SorobanString::from_str(&self.env, value)
    }

    fn convert_records(&self, records: SorobanVec<LedgerRecord>) -> Result<Vec<Record>, LedgerError> {
        records
            .iter()
            .map(|record| {
                Ok(Record {
                    id: record.id,
                    content_address: ContentAddress::new(to_std_string(&record.cid)),
                    file_name: to_std_string(&record.file_name),
                    patient: self.account_of(&record.patient)?,
                    doctor: self.account_of(&record.doctor)?,
                    created_at: record.created_at,
                })
            })
            .collect()
    }
}

fn to_std_string(value: &SorobanString) -> String {
    let mut buf = vec![0u8; value.len() as usize];
    value.copy_into_slice(&mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Flattens the nested result of a generated `try_` call.
fn settle<T, C, E, I>(outcome: Result<Result<T, C>, Result<E, I>>) -> Result<T, LedgerError>
where
    C: Debug,
    E: Debug,
    I: Debug,
{
    match outcome {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(conversion)) => Err(LedgerError::Unavailable(format!(
            "undecodable response: {conversion:?}"
        ))),
        Err(Ok(error)) => Err(LedgerError::Rejected(format!("{error:?}"))),
        Err(Err(invoke)) => Err(LedgerError::Unavailable(format!("{invoke:?}"))),
    }
}

#[async_trait(?Send)]
impl Ledger for SorobanLedger {
    async fn get_address_with_aadhar(
        &self,
        _from: &AccountAddress,
        identity: &Identity,
    ) -> Result<AccountAddress, LedgerError> {
        debug!("get_address_with_aadhar({identity})");
        match settle(self.client.try_get_address_with_aadhar(&self.text(identity.as_str())))? {
            Some(address) => self.account_of(&address),
            None => Ok(AccountAddress::zero()),
        }
    }

    async fn get_patient_exists(
        &self,
        _from: &AccountAddress,
        patient: &AccountAddress,
    ) -> Result<bool, LedgerError> {
        debug!("get_patient_exists({patient})");
        // An account this connection cannot sign for may still be unknown
        // to the contract; report it as absent rather than failing.
        let Ok(address) = self.address_of(patient) else {
            return Ok(false);
        };
        settle(self.client.try_get_patient_exists(&address))
    }

    async fn get_doctor_exists(
        &self,
        _from: &AccountAddress,
        doctor: &AccountAddress,
    ) -> Result<bool, LedgerError> {
        debug!("get_doctor_exists({doctor})");
        let Ok(address) = self.address_of(doctor) else {
            return Ok(false);
        };
        settle(self.client.try_get_doctor_exists(&address))
    }

    async fn get_records_by_doctor(
        &self,
        from: &AccountAddress,
        patient: &AccountAddress,
    ) -> Result<Vec<Record>, LedgerError> {
        debug!("get_records_by_doctor({patient}) from {from}");
        let caller = self.address_of(from)?;
        let patient = self.address_of(patient)?;
        let records = settle(self.client.try_get_records_by_doctor(&caller, &patient))?;
        self.convert_records(records)
    }

    async fn get_own_records(&self, from: &AccountAddress) -> Result<Vec<Record>, LedgerError> {
        debug!("get_own_records from {from}");
        let caller = self.address_of(from)?;
        let records = settle(self.client.try_get_own_records(&caller))?;
        self.convert_records(records)
    }

    async fn add_patient(
        &self,
        from: &AccountAddress,
        patient: &AccountAddress,
        name: &str,
        identity: &Identity,
    ) -> Result<(), LedgerError> {
        debug!("add_patient({patient}) from {from}");
        let caller = self.address_of(from)?;
        let patient = self.address_of(patient)?;
        settle(self.client.try_add_patient(
            &caller,
            &patient,
            &self.text(name),
            &self.text(identity.as_str()),
        ))
    }

    async fn add_doctor(&self, from: &AccountAddress, name: &str) -> Result<(), LedgerError> {
        debug!("add_doctor from {from}");
        let caller = self.address_of(from)?;
        settle(self.client.try_add_doctor(&caller, &self.text(name)))
    }

    async fn add_record(
        &self,
        from: &AccountAddress,
        content_address: &ContentAddress,
        file_name: &str,
        patient: &AccountAddress,
    ) -> Result<(), LedgerError> {
        debug!("add_record({content_address}, {file_name:?}, {patient}) from {from}");
        let caller = self.address_of(from)?;
        let patient = self.address_of(patient)?;
        settle(self.client.try_add_record(
            &caller,
            &self.text(content_address.as_str()),
            &self.text(file_name),
            &patient,
        ))
        .map(|_record_id| ())
    }
}

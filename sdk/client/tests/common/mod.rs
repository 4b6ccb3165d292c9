#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use med_ledger::MedLedgerContract;
use medchain_client::{
    AccountAddress, ContentAddress, Identity, Ledger, LedgerError, Record, RecordStore, Session,
    SorobanLedger, StoreError,
};
use soroban_sdk::{testutils::Address as _, Address, Env};

pub const ASHA_ID: &str = "123456789012";
pub const RAVI_ID: &str = "987654321098";

/// Deterministic account address for test participant `n`.
pub fn account(n: u64) -> AccountAddress {
    AccountAddress::parse(&format!("0x{n:040x}")).unwrap()
}

/// A deployed `med_ledger` contract reached through [`SorobanLedger`],
/// with one registered doctor.
pub struct Harness {
    pub env: Env,
    pub ledger: SorobanLedger,
    pub doctor: AccountAddress,
}

impl Harness {
    pub async fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let contract_id = env.register(MedLedgerContract, ());
        let ledger = SorobanLedger::new(&env, &contract_id);

        let harness = Harness {
            env,
            ledger,
            doctor: account(1),
        };
        harness.enroll(&harness.doctor);
        harness
            .ledger
            .add_doctor(&harness.doctor, "Dr. Rao")
            .await
            .unwrap();
        harness
    }

    /// Gives `account` a Soroban address this connection can sign for.
    pub fn enroll(&self, account: &AccountAddress) {
        self.ledger.bind(account.clone(), Address::generate(&self.env));
    }

    pub fn doctor_session(&self) -> Session {
        Session::connected(vec![self.doctor.clone()])
    }

    /// Registers `n` as a patient bound to `identity` and returns its address.
    pub async fn patient(&self, n: u64, name: &str, identity: &str) -> AccountAddress {
        let patient = account(n);
        self.enroll(&patient);
        self.ledger
            .add_patient(&self.doctor, &patient, name, &Identity::parse(identity).unwrap())
            .await
            .unwrap();
        patient
    }

    /// An enrolled account without any role.
    pub fn stranger(&self, n: u64) -> AccountAddress {
        let stranger = account(n);
        self.enroll(&stranger);
        stranger
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddRecordCall {
    pub content_address: ContentAddress,
    pub file_name: String,
    pub patient: AccountAddress,
}

/// Forwards to an inner ledger while recording every call by name.
pub struct CountingLedger<'a> {
    inner: &'a dyn Ledger,
    pub calls: RefCell<Vec<&'static str>>,
    pub add_record_calls: RefCell<Vec<AddRecordCall>>,
}

impl<'a> CountingLedger<'a> {
    pub fn new(inner: &'a dyn Ledger) -> Self {
        Self {
            inner,
            calls: RefCell::new(Vec::new()),
            add_record_calls: RefCell::new(Vec::new()),
        }
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls.borrow().iter().filter(|c| **c == name).count()
    }

    pub fn total(&self) -> usize {
        self.calls.borrow().len()
    }

    fn note(&self, name: &'static str) {
        self.calls.borrow_mut().push(name);
    }
}

#[async_trait(?Send)]
impl Ledger for CountingLedger<'_> {
    async fn get_address_with_aadhar(
        &self,
        from: &AccountAddress,
        identity: &Identity,
    ) -> Result<AccountAddress, LedgerError> {
        self.note("get_address_with_aadhar");
        self.inner.get_address_with_aadhar(from, identity).await
    }

    async fn get_patient_exists(
        &self,
        from: &AccountAddress,
        patient: &AccountAddress,
    ) -> Result<bool, LedgerError> {
        self.note("get_patient_exists");
        self.inner.get_patient_exists(from, patient).await
    }

    async fn get_doctor_exists(
        &self,
        from: &AccountAddress,
        doctor: &AccountAddress,
    ) -> Result<bool, LedgerError> {
        self.note("get_doctor_exists");
        self.inner.get_doctor_exists(from, doctor).await
    }

    async fn get_records_by_doctor(
        &self,
        from: &AccountAddress,
        patient: &AccountAddress,
    ) -> Result<Vec<Record>, LedgerError> {
        self.note("get_records_by_doctor");
        self.inner.get_records_by_doctor(from, patient).await
    }

    async fn get_own_records(&self, from: &AccountAddress) -> Result<Vec<Record>, LedgerError> {
        self.note("get_own_records");
        self.inner.get_own_records(from).await
    }

    async fn add_patient(
        &self,
        from: &AccountAddress,
        patient: &AccountAddress,
        name: &str,
        identity: &Identity,
    ) -> Result<(), LedgerError> {
        self.note("add_patient");
        self.inner.add_patient(from, patient, name, identity).await
    }

    async fn add_doctor(&self, from: &AccountAddress, name: &str) -> Result<(), LedgerError> {
        self.note("add_doctor");
        self.inner.add_doctor(from, name).await
    }

    async fn add_record(
        &self,
        from: &AccountAddress,
        content_address: &ContentAddress,
        file_name: &str,
        patient: &AccountAddress,
    ) -> Result<(), LedgerError> {
        self.note("add_record");
        self.add_record_calls.borrow_mut().push(AddRecordCall {
            content_address: content_address.clone(),
            file_name: file_name.to_string(),
            patient: patient.clone(),
        });
        self.inner
            .add_record(from, content_address, file_name, patient)
            .await
    }
}

/// Forwards to an inner ledger, but record reads go offline once a record
/// has been committed.
pub struct ReadsFailAfterCommit<'a> {
    inner: &'a dyn Ledger,
    committed: Cell<bool>,
}

impl<'a> ReadsFailAfterCommit<'a> {
    pub fn new(inner: &'a dyn Ledger) -> Self {
        Self {
            inner,
            committed: Cell::new(false),
        }
    }
}

#[async_trait(?Send)]
impl Ledger for ReadsFailAfterCommit<'_> {
    async fn get_address_with_aadhar(
        &self,
        from: &AccountAddress,
        identity: &Identity,
    ) -> Result<AccountAddress, LedgerError> {
        self.inner.get_address_with_aadhar(from, identity).await
    }

    async fn get_patient_exists(
        &self,
        from: &AccountAddress,
        patient: &AccountAddress,
    ) -> Result<bool, LedgerError> {
        self.inner.get_patient_exists(from, patient).await
    }

    async fn get_doctor_exists(
        &self,
        from: &AccountAddress,
        doctor: &AccountAddress,
    ) -> Result<bool, LedgerError> {
        self.inner.get_doctor_exists(from, doctor).await
    }

    async fn get_records_by_doctor(
        &self,
        from: &AccountAddress,
        patient: &AccountAddress,
    ) -> Result<Vec<Record>, LedgerError> {
        if self.committed.get() {
            return Err(offline());
        }
        self.inner.get_records_by_doctor(from, patient).await
    }

    async fn get_own_records(&self, from: &AccountAddress) -> Result<Vec<Record>, LedgerError> {
        if self.committed.get() {
            return Err(offline());
        }
        self.inner.get_own_records(from).await
    }

    async fn add_patient(
        &self,
        from: &AccountAddress,
        patient: &AccountAddress,
        name: &str,
        identity: &Identity,
    ) -> Result<(), LedgerError> {
        self.inner.add_patient(from, patient, name, identity).await
    }

    async fn add_doctor(&self, from: &AccountAddress, name: &str) -> Result<(), LedgerError> {
        self.inner.add_doctor(from, name).await
    }

    async fn add_record(
        &self,
        from: &AccountAddress,
        content_address: &ContentAddress,
        file_name: &str,
        patient: &AccountAddress,
    ) -> Result<(), LedgerError> {
        self.inner
            .add_record(from, content_address, file_name, patient)
            .await?;
        self.committed.set(true);
        Ok(())
    }
}

/// Ledger that is unreachable for every call.
pub struct OfflineLedger;

#[async_trait(?Send)]
impl Ledger for OfflineLedger {
    async fn get_address_with_aadhar(
        &self,
        _from: &AccountAddress,
        _identity: &Identity,
    ) -> Result<AccountAddress, LedgerError> {
        Err(offline())
    }

    async fn get_patient_exists(
        &self,
        _from: &AccountAddress,
        _patient: &AccountAddress,
    ) -> Result<bool, LedgerError> {
        Err(offline())
    }

    async fn get_doctor_exists(
        &self,
        _from: &AccountAddress,
        _doctor: &AccountAddress,
    ) -> Result<bool, LedgerError> {
        Err(offline())
    }

    async fn get_records_by_doctor(
        &self,
        _from: &AccountAddress,
        _patient: &AccountAddress,
    ) -> Result<Vec<Record>, LedgerError> {
        Err(offline())
    }

    async fn get_own_records(&self, _from: &AccountAddress) -> Result<Vec<Record>, LedgerError> {
        Err(offline())
    }

    async fn add_patient(
        &self,
        _from: &AccountAddress,
        _patient: &AccountAddress,
        _name: &str,
        _identity: &Identity,
    ) -> Result<(), LedgerError> {
        Err(offline())
    }

    async fn add_doctor(&self, _from: &AccountAddress, _name: &str) -> Result<(), LedgerError> {
        Err(offline())
    }

    async fn add_record(
        &self,
        _from: &AccountAddress,
        _content_address: &ContentAddress,
        _file_name: &str,
        _patient: &AccountAddress,
    ) -> Result<(), LedgerError> {
        Err(offline())
    }
}

fn offline() -> LedgerError {
    LedgerError::Unavailable("connection refused".into())
}

/// Store that answers every payload with the same address.
pub struct StubStore {
    address: String,
    pub payloads: RefCell<Vec<Vec<u8>>>,
}

impl StubStore {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            payloads: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.payloads.borrow().len()
    }
}

#[async_trait(?Send)]
impl RecordStore for StubStore {
    async fn add(&self, payload: &[u8]) -> Result<ContentAddress, StoreError> {
        self.payloads.borrow_mut().push(payload.to_vec());
        Ok(ContentAddress::new(self.address.clone()))
    }
}

/// Store that is unreachable.
#[derive(Default)]
pub struct FailingStore {
    pub calls: Cell<usize>,
}

#[async_trait(?Send)]
impl RecordStore for FailingStore {
    async fn add(&self, _payload: &[u8]) -> Result<ContentAddress, StoreError> {
        self.calls.set(self.calls.get() + 1);
        Err(StoreError::Unavailable("gateway timeout".into()))
    }
}

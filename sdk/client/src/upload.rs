//! Store-then-commit upload of a record for a resolved patient.

use log::{debug, info, warn};

use crate::access::{AccessController, Operation};
use crate::errors::{ClientError, StoreError};
use crate::ledger::Ledger;
use crate::search::PatientSearchCoordinator;
use crate::session::Session;
use crate::store::RecordStore;
use crate::types::{PatientHandle, RecordReceipt};

/// The file waiting to be uploaded.
///
/// Choosing a file discards any buffer read for a previous choice, so a
/// ready draft always pairs a name with the bytes read for it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordDraft {
    file_name: Option<String>,
    payload: Option<Vec<u8>>,
}

impl RecordDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn choose_file(&mut self, file_name: impl Into<String>) {
        self.file_name = Some(file_name.into());
        self.payload = None;
    }

    /// Attaches the fully read contents of the chosen file.
    pub fn load_buffer(&mut self, payload: Vec<u8>) {
        self.payload = Some(payload);
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    pub fn is_ready(&self) -> bool {
        self.file_name.as_deref().is_some_and(|name| !name.is_empty()) && self.payload.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

pub struct RecordUploadCoordinator<'a> {
    ledger: &'a dyn Ledger,
    store: &'a dyn RecordStore,
    session: &'a Session,
    max_payload_bytes: Option<usize>,
}

impl<'a> RecordUploadCoordinator<'a> {
    pub fn new(ledger: &'a dyn Ledger, store: &'a dyn RecordStore, session: &'a Session) -> Self {
        Self {
            ledger,
            store,
            session,
            max_payload_bytes: None,
        }
    }

    /// Payloads above `limit` bytes are refused before the store is contacted.
    pub fn with_payload_limit(mut self, limit: usize) -> Self {
        self.max_payload_bytes = Some(limit);
        self
    }

    /// Stores the draft's payload, commits its address to the ledger for
    /// `patient`, then re-reads the patient's records from the ledger.
    ///
    /// The ledger is only written after the store confirms. A failed commit
    /// leaves the stored payload in place. Once the commit is confirmed the
    /// upload succeeds, even if the re-read fails.
    pub async fn upload_record(
        &self,
        patient: Option<&PatientHandle>,
        draft: &RecordDraft,
    ) -> Result<RecordReceipt, ClientError> {
        let patient = patient.ok_or(ClientError::NoPatientSelected)?;
        let (Some(file_name), Some(payload)) = (draft.file_name(), draft.payload()) else {
            return Err(ClientError::DraftIncomplete);
        };
        if file_name.is_empty() {
            return Err(ClientError::DraftIncomplete);
        }

        let (doctor, _) = AccessController::new(self.ledger)
            .require(self.session, Operation::UploadRecord)
            .await?;

        if let Some(limit) = self.max_payload_bytes {
            if payload.len() > limit {
                warn!("refusing {} byte payload, limit is {limit}", payload.len());
                return Err(ClientError::StorageFailure(StoreError::TooLarge {
                    size: payload.len(),
                    limit,
                }));
            }
        }

        let content_address = self
            .store
            .add(payload)
            .await
            .map_err(ClientError::StorageFailure)?;
        if content_address.is_empty() {
            return Err(ClientError::StorageFailure(StoreError::Rejected(
                "store returned an empty content address".into(),
            )));
        }
        debug!("stored {file_name:?} at {content_address}");

        self.ledger
            .add_record(&doctor, &content_address, file_name, patient.address())
            .await
            .map_err(ClientError::LedgerCommitFailure)?;
        info!("committed {content_address} for {}", patient.address());

        let records = match PatientSearchCoordinator::new(self.ledger, self.session)
            .search_by_address(patient.address().as_str())
            .await
        {
            Ok(refreshed) => Some(refreshed.into_records()),
            Err(err) => {
                warn!("committed {content_address} but could not re-read records: {err}");
                None
            }
        };

        Ok(RecordReceipt {
            content_address,
            file_name: file_name.to_string(),
            patient: patient.address().clone(),
            records,
        })
    }
}

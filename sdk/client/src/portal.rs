//! Session state behind the doctor's page.
//!
//! The portal owns the input fields, the resolved patient and the pending
//! draft. It runs the coordinators, turns their failures into
//! notifications, and decides which state survives a failure.

use log::{error, info, warn};

use crate::config::ClientConfig;
use crate::errors::{ClientError, FormatKind};
use crate::ledger::Ledger;
use crate::registration::RegistrationCoordinator;
use crate::search::PatientSearchCoordinator;
use crate::session::Session;
use crate::store::RecordStore;
use crate::types::{PatientHandle, Record};
use crate::upload::{RecordDraft, RecordUploadCoordinator};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Inputs of the "register patient" form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatientForm {
    pub address: String,
    pub name: String,
    pub identity: String,
}

impl PatientForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A record together with the gateway URL its payload is served from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordLink {
    pub record: Record,
    pub url: String,
}

pub struct DoctorPortal<'a> {
    ledger: &'a dyn Ledger,
    store: &'a dyn RecordStore,
    session: &'a Session,
    config: &'a ClientConfig,

    pub search_identity: String,
    pub search_address: String,
    pub form: PatientForm,
    pub draft: RecordDraft,

    patient: Option<PatientHandle>,
    records: Vec<Record>,
    notifications: Vec<Notification>,
}

impl<'a> DoctorPortal<'a> {
    pub fn new(
        ledger: &'a dyn Ledger,
        store: &'a dyn RecordStore,
        session: &'a Session,
        config: &'a ClientConfig,
    ) -> Self {
        Self {
            ledger,
            store,
            session,
            config,
            search_identity: String::new(),
            search_address: String::new(),
            form: PatientForm::default(),
            draft: RecordDraft::new(),
            patient: None,
            records: Vec::new(),
            notifications: Vec::new(),
        }
    }

    pub fn patient(&self) -> Option<&PatientHandle> {
        self.patient.as_ref()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records of the selected patient with their gateway links.
    pub fn record_links(&self) -> Vec<RecordLink> {
        self.records
            .iter()
            .map(|record| RecordLink {
                url: self.config.gateway_link(&record.content_address),
                record: record.clone(),
            })
            .collect()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Searches by the identity number in `search_identity`.
    pub async fn search_with_identity(&mut self) {
        let outcome = PatientSearchCoordinator::new(self.ledger, self.session)
            .search_by_identity(&self.search_identity)
            .await;

        match outcome {
            Ok(handle) => {
                self.search_address = handle.address().to_string();
                self.select(handle);
            }
            Err(ClientError::PatientNotFound) => {
                self.deselect();
                self.fail(
                    &ClientError::PatientNotFound,
                    "Patient does not exist with this aadhar number",
                );
            }
            Err(err) => {
                let message = err.user_message();
                self.fail(&err, message);
            }
        }
    }

    /// Searches by account address and remembers it in `search_address`.
    pub async fn search_patient(&mut self, address: &str) {
        self.search_address = address.to_string();
        let outcome = PatientSearchCoordinator::new(self.ledger, self.session)
            .search_by_address(address)
            .await;

        match outcome {
            Ok(handle) => self.select(handle),
            Err(err) => {
                if err == ClientError::PatientNotFound {
                    self.deselect();
                }
                let message = err.user_message();
                self.fail(&err, message);
            }
        }
    }

    /// Registers the patient described by `form`.
    ///
    /// The form is cleared on success and on a ledger failure, and kept when
    /// an input is malformed or the session may not register patients.
    // TODO: keep the form on LedgerCommitFailure once the portal can tell a
    // duplicate identity apart from an unreachable ledger.
    pub async fn register_patient(&mut self) {
        let outcome = RegistrationCoordinator::new(self.ledger, self.session)
            .register_patient(&self.form.address, &self.form.name, &self.form.identity)
            .await;

        match outcome {
            Ok(patient) => {
                info!("portal registered patient {patient}");
                self.form.clear();
                self.notify(Notification::success("New Patient Added"));
            }
            Err(err @ ClientError::LedgerCommitFailure(_)) => {
                self.form.clear();
                self.fail(&err, "This Patient Already exists or the aadhar is already in use");
            }
            Err(
                err @ ClientError::InvalidFormat {
                    kind: FormatKind::Identity,
                    ..
                },
            ) => self.fail(&err, "Aadhar number is not valid"),
            Err(err) => {
                let message = err.user_message();
                self.fail(&err, message);
            }
        }
    }

    /// Uploads `draft` for the selected patient. The draft survives every
    /// failure before the ledger commit so the upload can be retried. If the
    /// records cannot be re-read after the commit, the previous list stays
    /// selected.
    pub async fn upload_record(&mut self) {
        let outcome = RecordUploadCoordinator::new(self.ledger, self.store, self.session)
            .with_payload_limit(self.config.max_payload_bytes)
            .upload_record(self.patient.as_ref(), &self.draft)
            .await;

        match outcome {
            Ok(receipt) => {
                info!(
                    "portal uploaded {:?} as {}",
                    receipt.file_name, receipt.content_address
                );
                self.draft.clear();
                if let Some(records) = receipt.records {
                    self.select(PatientHandle::new(receipt.patient, records));
                }
                self.notify(Notification::success("New record uploaded"));
            }
            Err(err @ (ClientError::StorageFailure(_) | ClientError::LedgerCommitFailure(_))) => {
                self.fail(&err, "Record upload failed")
            }
            Err(err) => {
                let message = err.user_message();
                self.fail(&err, message);
            }
        }
    }

    pub async fn register_doctor(&mut self, name: &str) {
        let outcome = RegistrationCoordinator::new(self.ledger, self.session)
            .register_doctor(name)
            .await;

        match outcome {
            Ok(account) => {
                info!("portal registered doctor {account}");
                self.notify(Notification::success("Registered as a doctor"));
            }
            Err(err) => {
                let message = err.user_message();
                self.fail(&err, message);
            }
        }
    }

    fn select(&mut self, handle: PatientHandle) {
        self.records = handle.records().to_vec();
        self.patient = Some(handle);
    }

    fn deselect(&mut self) {
        self.patient = None;
        self.records.clear();
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    fn fail(&mut self, err: &ClientError, message: &str) {
        match err {
            ClientError::InvalidFormat { .. }
            | ClientError::PatientNotFound
            | ClientError::NoPatientSelected
            | ClientError::DraftIncomplete
            | ClientError::Denied { .. } => warn!("{err}"),
            _ => error!("{err}"),
        }
        self.notify(Notification::error(message));
    }
}

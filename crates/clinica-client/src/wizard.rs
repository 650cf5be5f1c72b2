//! Guided capture session for a patient and its dependent records.

use std::sync::{Arc, Mutex};

use clinica_core::{
    ClinicService, Database, NewAppointment, NewMedication, NewPatient, NewTreatment,
    ServiceResult,
};
use uuid::Uuid;

use crate::error::{ClientError, ClientResult};
use crate::request::RequestState;

/// How the session persists the patient step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardMode {
    /// Every successful patient submit inserts a new row.
    Create,
    /// Patient submits update one existing row, so resubmitting is
    /// idempotent.
    Edit { patient_id: i64 },
}

/// Where the session stands.
///
/// Dependent records may only be submitted while `Persisted`: the patient
/// row they will reference is known to exist (or to have existed; a
/// concurrent delete surfaces as [`ClientError::UnknownPatient`] on the
/// next child submit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    /// No saved patient to attach records to.
    Editing,
    /// A patient row is saved. `has_children` tracks whether this session
    /// has attached any dependent record to it yet.
    Persisted { patient_id: i64, has_children: bool },
}

#[derive(Debug)]
struct WizardInner {
    state: WizardState,
    submit: RequestState<i64>,
}

/// One capture flow: save the patient, then attach its dependent records.
///
/// A single submit gate covers every operation on the session, so two
/// overlapping submits can never write against a half-settled state.
pub struct WizardSession {
    db: Arc<Mutex<Database>>,
    mode: WizardMode,
    session_id: Uuid,
    inner: Mutex<WizardInner>,
}

impl WizardSession {
    /// Start a session that will insert a new patient.
    pub fn create(db: Arc<Mutex<Database>>) -> Self {
        Self::with_mode(db, WizardMode::Create, WizardState::Editing)
    }

    /// Start a session over an existing patient id.
    ///
    /// No lookup happens here; a stale id surfaces as `NotFound` on the
    /// first patient submit, or `UnknownPatient` on a child submit.
    pub fn edit(db: Arc<Mutex<Database>>, patient_id: i64) -> Self {
        Self::with_mode(
            db,
            WizardMode::Edit { patient_id },
            WizardState::Persisted {
                patient_id,
                has_children: false,
            },
        )
    }

    fn with_mode(db: Arc<Mutex<Database>>, mode: WizardMode, state: WizardState) -> Self {
        let session_id = Uuid::new_v4();
        tracing::info!(session = %session_id, ?mode, "wizard session started");
        Self {
            db,
            mode,
            session_id,
            inner: Mutex::new(WizardInner {
                state,
                submit: RequestState::Idle,
            }),
        }
    }

    pub fn mode(&self) -> WizardMode {
        self.mode
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> ClientResult<WizardState> {
        Ok(self.inner.lock()?.state)
    }

    /// Id of the patient saved by this session, once there is one.
    pub fn saved_patient_id(&self) -> ClientResult<Option<i64>> {
        Ok(match self.inner.lock()?.state {
            WizardState::Persisted { patient_id, .. } => Some(patient_id),
            WizardState::Editing => None,
        })
    }

    pub fn is_submitting(&self) -> ClientResult<bool> {
        Ok(self.inner.lock()?.submit.is_loading())
    }

    /// Message from the most recent failed submit, if the session is in a
    /// failed state.
    pub fn last_error(&self) -> ClientResult<Option<String>> {
        Ok(self.inner.lock()?.submit.error().map(String::from))
    }

    /// Save the patient step.
    ///
    /// In `Create` mode this inserts a new row every time it succeeds and
    /// re-points the session at it. In `Edit` mode it updates the row the
    /// session was opened on.
    pub fn submit_patient(&self, payload: &NewPatient) -> ClientResult<i64> {
        self.begin()?;

        let result = self.with_service(|service| match self.mode {
            WizardMode::Create => service.create_patient(payload),
            WizardMode::Edit { patient_id } => service.update_patient(patient_id, payload),
        });

        match result {
            Ok(patient) => {
                let mut inner = self.inner.lock()?;
                let has_children = match (self.mode, inner.state) {
                    // A freshly inserted patient has no records yet.
                    (WizardMode::Create, _) => false,
                    (WizardMode::Edit { .. }, WizardState::Persisted { has_children, .. }) => {
                        has_children
                    }
                    (WizardMode::Edit { .. }, WizardState::Editing) => false,
                };
                inner.state = WizardState::Persisted {
                    patient_id: patient.id_paciente,
                    has_children,
                };
                inner.submit.settle_ok(patient.id_paciente);
                tracing::info!(
                    session = %self.session_id,
                    id_paciente = patient.id_paciente,
                    "wizard patient saved"
                );
                Ok(patient.id_paciente)
            }
            Err(err) => self.settle_err(err),
        }
    }

    /// Attach an appointment to the session's saved patient.
    pub fn submit_appointment(&self, payload: &NewAppointment) -> ClientResult<i64> {
        let patient_id = self.begin_child()?;
        let result =
            self.with_service(|service| service.create_appointment(patient_id, payload));
        self.settle_child(result.map(|c| c.id_cita))
    }

    /// Attach a treatment to the session's saved patient.
    pub fn submit_treatment(&self, payload: &NewTreatment) -> ClientResult<i64> {
        let patient_id = self.begin_child()?;
        let result =
            self.with_service(|service| service.create_treatment(patient_id, payload));
        self.settle_child(result.map(|t| t.id_tratamiento))
    }

    /// Attach a medication to the session's saved patient.
    pub fn submit_medication(&self, payload: &NewMedication) -> ClientResult<i64> {
        let patient_id = self.begin_child()?;
        let result =
            self.with_service(|service| service.create_medication(patient_id, payload));
        self.settle_child(result.map(|m| m.id_medicamento))
    }

    /// Delete the session's saved patient and, by cascade, its records.
    ///
    /// On success the session returns to `Editing` with an idle submit
    /// gate, ready to capture a different patient.
    pub fn delete_patient(&self) -> ClientResult<()> {
        let patient_id = self.begin_child()?;
        let result = self.with_service(|service| service.delete_patient(patient_id));

        match result {
            Ok(()) => {
                let mut inner = self.inner.lock()?;
                inner.state = WizardState::Editing;
                inner.submit = RequestState::Idle;
                tracing::info!(
                    session = %self.session_id,
                    id_paciente = patient_id,
                    "wizard patient deleted"
                );
                Ok(())
            }
            Err(err) => self.settle_err(err),
        }
    }

    /// Open the submit gate for a patient-step operation.
    fn begin(&self) -> ClientResult<()> {
        let mut inner = self.inner.lock()?;
        if inner.submit.is_loading() {
            return Err(ClientError::RequestInFlight);
        }
        inner.submit.begin();
        Ok(())
    }

    /// Open the submit gate for an operation that needs a saved patient,
    /// returning its id.
    fn begin_child(&self) -> ClientResult<i64> {
        let mut inner = self.inner.lock()?;
        if inner.submit.is_loading() {
            return Err(ClientError::RequestInFlight);
        }
        let patient_id = match inner.state {
            WizardState::Persisted { patient_id, .. } => patient_id,
            WizardState::Editing => {
                return Err(ClientError::PreconditionFailed(
                    "no patient has been saved in this session".into(),
                ))
            }
        };
        inner.submit.begin();
        Ok(patient_id)
    }

    fn settle_child(&self, result: ClientResult<i64>) -> ClientResult<i64> {
        match result {
            Ok(id) => {
                let mut inner = self.inner.lock()?;
                if let WizardState::Persisted { has_children, .. } = &mut inner.state {
                    *has_children = true;
                }
                inner.submit.settle_ok(id);
                Ok(id)
            }
            Err(err) => self.settle_err(err),
        }
    }

    /// Record a failed submit and hand the error back. Session state is
    /// left as it was.
    fn settle_err<T>(&self, err: ClientError) -> ClientResult<T> {
        let mut inner = self.inner.lock()?;
        inner.submit.settle_err(err.to_string());
        tracing::warn!(session = %self.session_id, error = %err, "wizard submit failed");
        Err(err)
    }

    fn with_service<T>(
        &self,
        f: impl FnOnce(&ClinicService<'_>) -> ServiceResult<T>,
    ) -> ClientResult<T> {
        let db = self.db.lock()?;
        let service = ClinicService::new(&db);
        f(&service).map_err(Into::into)
    }
}

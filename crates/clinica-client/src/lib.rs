//! Clinica Client Library
//!
//! Mobile-facing layer over [`clinica_core`]: paged patient list caching,
//! the guided capture wizard, in-memory record search, and the UniFFI
//! surface the app binds to.
//!
//! # Architecture
//!
//! ```text
//! Swift / Kotlin UI
//!        │ (UniFFI)
//!        ▼
//! ClinicaClient ──┬── PagedPatients  (incremental list cache)
//!                 ├── CreationWizard (guided capture session)
//!                 └── record CRUD + client-side filters
//!        │
//!        ▼
//! clinica_core::ClinicService → Database (SQLite)
//! ```
//!
//! # Modules
//!
//! - [`cache`]: incremental patient list loader
//! - [`error`]: client error taxonomy
//! - [`request`]: request lifecycle state
//! - [`search`]: in-memory filters over loaded records
//! - [`wizard`]: guided patient capture session

pub mod cache;
pub mod error;
pub mod request;
pub mod search;
pub mod wizard;

// Re-export commonly used types
pub use cache::PatientPager;
pub use error::{ClientError, ClientResult};
pub use request::RequestState;
pub use wizard::{WizardMode, WizardSession, WizardState};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use clinica_core::{
    Appointment, AppointmentStatus, ClinicService, Database, Medication, NewAppointment,
    NewMedication, NewPatient, NewTreatment, PagedResult, Patient, PatientDetails, PatientFilter,
    Treatment,
};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ClinicaError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unknown patient: {0}")]
    UnknownPatient(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("Request in flight: {0}")]
    RequestInFlight(String),
}

impl From<ClientError> for ClinicaError {
    fn from(e: ClientError) -> Self {
        let msg = e.to_string();
        match e {
            ClientError::Validation(_) => ClinicaError::InvalidInput(msg),
            ClientError::NotFound { .. } => ClinicaError::NotFound(msg),
            ClientError::UnknownPatient { .. } => ClinicaError::UnknownPatient(msg),
            ClientError::PreconditionFailed(_) => ClinicaError::PreconditionFailed(msg),
            ClientError::RequestInFlight => ClinicaError::RequestInFlight(msg),
            ClientError::Storage(_) => ClinicaError::DatabaseError(msg),
        }
    }
}

impl From<clinica_core::ServiceError> for ClinicaError {
    fn from(e: clinica_core::ServiceError) -> Self {
        ClientError::from(e).into()
    }
}

impl From<clinica_core::DbError> for ClinicaError {
    fn from(e: clinica_core::DbError) -> Self {
        ClinicaError::DatabaseError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ClinicaError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ClinicaError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a clinic database at the given path.
#[uniffi::export]
pub fn open_clinic(path: String) -> Result<Arc<ClinicaClient>, ClinicaError> {
    let db = Database::open(&path)?;
    Ok(Arc::new(ClinicaClient {
        db: Arc::new(Mutex::new(db)),
    }))
}

/// Create an in-memory clinic database (for testing).
#[uniffi::export]
pub fn open_clinic_in_memory() -> Result<Arc<ClinicaClient>, ClinicaError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(ClinicaClient {
        db: Arc::new(Mutex::new(db)),
    }))
}

/// Install the tracing subscriber, honoring `RUST_LOG` when set.
///
/// Safe to call more than once; only the first call takes effect.
#[uniffi::export]
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe database wrapper for FFI.
#[derive(uniffi::Object)]
pub struct ClinicaClient {
    db: Arc<Mutex<Database>>,
}

#[uniffi::export]
impl ClinicaClient {
    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Validate and create a patient.
    pub fn create_patient(&self, payload: FfiNewPatient) -> Result<FfiPatient, ClinicaError> {
        let db = self.db.lock()?;
        let service = ClinicService::new(&db);
        let patient = service.create_patient(&payload.into())?;
        Ok(patient.into())
    }

    /// Validate and update a patient by id.
    pub fn update_patient(
        &self,
        id: i64,
        payload: FfiNewPatient,
    ) -> Result<FfiPatient, ClinicaError> {
        let db = self.db.lock()?;
        let service = ClinicService::new(&db);
        let patient = service.update_patient(id, &payload.into())?;
        Ok(patient.into())
    }

    /// Delete a patient and, by cascade, its dependent records.
    pub fn delete_patient(&self, id: i64) -> Result<(), ClinicaError> {
        let db = self.db.lock()?;
        let service = ClinicService::new(&db);
        service.delete_patient(id)?;
        Ok(())
    }

    /// Get a patient by id.
    pub fn get_patient(&self, id: i64) -> Result<FfiPatient, ClinicaError> {
        let db = self.db.lock()?;
        let service = ClinicService::new(&db);
        let patient = service.get_patient(id)?;
        Ok(patient.into())
    }

    /// Get a patient with every dependent record attached.
    pub fn get_patient_details(&self, id: i64) -> Result<FfiPatientDetails, ClinicaError> {
        let db = self.db.lock()?;
        let service = ClinicService::new(&db);
        let details = service.get_patient_details(id)?;
        Ok(details.into())
    }

    /// One page of the patient list, ascending id order.
    pub fn list_patients(
        &self,
        page: u32,
        page_size: u32,
        active_only: bool,
        tipo_sangre: Option<String>,
    ) -> Result<FfiPatientPage, ClinicaError> {
        let db = self.db.lock()?;
        let service = ClinicService::new(&db);
        let filter = PatientFilter {
            active_only,
            tipo_sangre,
        };
        let result = service.list_patients(page, page_size, &filter)?;
        Ok(result.into())
    }

    /// Every patient with an exact blood-type token.
    pub fn get_patients_by_blood_type(
        &self,
        tipo: String,
    ) -> Result<Vec<FfiPatient>, ClinicaError> {
        let db = self.db.lock()?;
        let service = ClinicService::new(&db);
        let patients = service.get_patients_by_blood_type(&tipo)?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    // =========================================================================
    // Appointment Operations
    // =========================================================================

    /// Validate and create an appointment for a patient.
    pub fn create_appointment(
        &self,
        patient_id: i64,
        payload: FfiNewAppointment,
    ) -> Result<FfiAppointment, ClinicaError> {
        let db = self.db.lock()?;
        let service = ClinicService::new(&db);
        let cita = service.create_appointment(patient_id, &payload.into())?;
        Ok(cita.into())
    }

    /// Validate and update an appointment by id.
    pub fn update_appointment(
        &self,
        id: i64,
        payload: FfiNewAppointment,
    ) -> Result<FfiAppointment, ClinicaError> {
        let db = self.db.lock()?;
        let service = ClinicService::new(&db);
        let cita = service.update_appointment(id, &payload.into())?;
        Ok(cita.into())
    }

    /// Delete an appointment.
    pub fn delete_appointment(&self, id: i64) -> Result<(), ClinicaError> {
        let db = self.db.lock()?;
        let service = ClinicService::new(&db);
        service.delete_appointment(id)?;
        Ok(())
    }

    /// All appointments of one patient.
    pub fn get_appointments_by_patient(
        &self,
        patient_id: i64,
    ) -> Result<Vec<FfiAppointment>, ClinicaError> {
        let db = self.db.lock()?;
        let service = ClinicService::new(&db);
        let citas = service.get_appointments_by_patient(patient_id)?;
        Ok(citas.into_iter().map(|c| c.into()).collect())
    }

    /// All appointments on one exact date, across patients.
    pub fn get_appointments_by_date(
        &self,
        fecha: String,
    ) -> Result<Vec<FfiAppointment>, ClinicaError> {
        let db = self.db.lock()?;
        let service = ClinicService::new(&db);
        let citas = service.get_appointments_by_date(&fecha)?;
        Ok(citas.into_iter().map(|c| c.into()).collect())
    }

    /// Count of appointments whose estatus is 'Cancelada'.
    pub fn count_cancelled_appointments(&self) -> Result<u64, ClinicaError> {
        let db = self.db.lock()?;
        let service = ClinicService::new(&db);
        Ok(service.count_cancelled_appointments()?)
    }

    // =========================================================================
    // Treatment Operations
    // =========================================================================

    /// Validate and create a treatment for a patient.
    pub fn create_treatment(
        &self,
        patient_id: i64,
        payload: FfiNewTreatment,
    ) -> Result<FfiTreatment, ClinicaError> {
        let db = self.db.lock()?;
        let service = ClinicService::new(&db);
        let treatment = service.create_treatment(patient_id, &payload.into())?;
        Ok(treatment.into())
    }

    /// Validate and update a treatment by id.
    pub fn update_treatment(
        &self,
        id: i64,
        payload: FfiNewTreatment,
    ) -> Result<FfiTreatment, ClinicaError> {
        let db = self.db.lock()?;
        let service = ClinicService::new(&db);
        let treatment = service.update_treatment(id, &payload.into())?;
        Ok(treatment.into())
    }

    /// Delete a treatment.
    pub fn delete_treatment(&self, id: i64) -> Result<(), ClinicaError> {
        let db = self.db.lock()?;
        let service = ClinicService::new(&db);
        service.delete_treatment(id)?;
        Ok(())
    }

    /// All treatments of one patient.
    pub fn get_treatments_by_patient(
        &self,
        patient_id: i64,
    ) -> Result<Vec<FfiTreatment>, ClinicaError> {
        let db = self.db.lock()?;
        let service = ClinicService::new(&db);
        let treatments = service.get_treatments_by_patient(patient_id)?;
        Ok(treatments.into_iter().map(|t| t.into()).collect())
    }

    /// Treatments whose diagnosis contains the query, case-insensitively.
    pub fn get_treatments_by_diagnosis(
        &self,
        query: String,
    ) -> Result<Vec<FfiTreatment>, ClinicaError> {
        let db = self.db.lock()?;
        let service = ClinicService::new(&db);
        let treatments = service.get_treatments_by_diagnosis(&query)?;
        Ok(treatments.into_iter().map(|t| t.into()).collect())
    }

    // =========================================================================
    // Medication Operations
    // =========================================================================

    /// Validate and create a medication for a patient.
    pub fn create_medication(
        &self,
        patient_id: i64,
        payload: FfiNewMedication,
    ) -> Result<FfiMedication, ClinicaError> {
        let db = self.db.lock()?;
        let service = ClinicService::new(&db);
        let medication = service.create_medication(patient_id, &payload.into())?;
        Ok(medication.into())
    }

    /// Validate and update a medication by id.
    pub fn update_medication(
        &self,
        id: i64,
        payload: FfiNewMedication,
    ) -> Result<FfiMedication, ClinicaError> {
        let db = self.db.lock()?;
        let service = ClinicService::new(&db);
        let medication = service.update_medication(id, &payload.into())?;
        Ok(medication.into())
    }

    /// Delete a medication.
    pub fn delete_medication(&self, id: i64) -> Result<(), ClinicaError> {
        let db = self.db.lock()?;
        let service = ClinicService::new(&db);
        service.delete_medication(id)?;
        Ok(())
    }

    /// All medications of one patient.
    pub fn get_medications_by_patient(
        &self,
        patient_id: i64,
    ) -> Result<Vec<FfiMedication>, ClinicaError> {
        let db = self.db.lock()?;
        let service = ClinicService::new(&db);
        let medications = service.get_medications_by_patient(patient_id)?;
        Ok(medications.into_iter().map(|m| m.into()).collect())
    }

    // =========================================================================
    // Session Objects
    // =========================================================================

    /// Start an incremental loader over the patient list.
    pub fn paged_patients(
        &self,
        active_only: bool,
        tipo_sangre: Option<String>,
        page_size: u32,
    ) -> Arc<PagedPatients> {
        let filter = PatientFilter {
            active_only,
            tipo_sangre,
        };
        Arc::new(PagedPatients {
            pager: PatientPager::new(Arc::clone(&self.db), filter, page_size),
        })
    }

    /// Start a wizard session that will insert a new patient.
    pub fn creation_wizard(&self) -> Arc<CreationWizard> {
        Arc::new(CreationWizard {
            session: WizardSession::create(Arc::clone(&self.db)),
        })
    }

    /// Start a wizard session over an existing patient.
    pub fn edit_wizard(&self, patient_id: i64) -> Arc<CreationWizard> {
        Arc::new(CreationWizard {
            session: WizardSession::edit(Arc::clone(&self.db), patient_id),
        })
    }
}

// =========================================================================
// Paged Patient List Object
// =========================================================================

/// Incremental patient list for FFI list screens.
#[derive(uniffi::Object)]
pub struct PagedPatients {
    pager: PatientPager,
}

#[uniffi::export]
impl PagedPatients {
    /// Drop the cache and reload page one.
    pub fn refresh(&self) -> Result<(), ClinicaError> {
        self.pager.refresh().map_err(Into::into)
    }

    /// Fetch the next page. Returns false when nothing was fetched because
    /// a load is running or every page is already cached.
    pub fn load_next(&self) -> Result<bool, ClinicaError> {
        self.pager.load_next().map_err(Into::into)
    }

    /// All cached patients, in load order.
    pub fn items(&self) -> Result<Vec<FfiPatient>, ClinicaError> {
        let items = self.pager.items()?;
        Ok(items.into_iter().map(|p| p.into()).collect())
    }

    /// Total row count matching the filter, as of the last fetch.
    pub fn total(&self) -> Result<u64, ClinicaError> {
        self.pager.total().map_err(Into::into)
    }

    pub fn has_more(&self) -> Result<bool, ClinicaError> {
        self.pager.has_more().map_err(Into::into)
    }

    pub fn is_loading(&self) -> Result<bool, ClinicaError> {
        self.pager.is_loading().map_err(Into::into)
    }

    /// Message from the most recent failed fetch, if any.
    pub fn last_error(&self) -> Result<Option<String>, ClinicaError> {
        self.pager.last_error().map_err(Into::into)
    }
}

// =========================================================================
// Capture Wizard Object
// =========================================================================

/// Guided capture session for a patient and its dependent records.
#[derive(uniffi::Object)]
pub struct CreationWizard {
    session: WizardSession,
}

#[uniffi::export]
impl CreationWizard {
    /// Correlation id for this session's log lines.
    pub fn session_id(&self) -> String {
        self.session.session_id().to_string()
    }

    /// Whether this session edits an existing patient instead of creating
    /// new ones.
    pub fn is_edit(&self) -> bool {
        matches!(self.session.mode(), WizardMode::Edit { .. })
    }

    /// Save the patient step. Creates a new row in create mode, updates in
    /// place in edit mode. Returns the saved patient id.
    pub fn submit_patient(&self, payload: FfiNewPatient) -> Result<i64, ClinicaError> {
        self.session
            .submit_patient(&payload.into())
            .map_err(Into::into)
    }

    /// Attach an appointment to the saved patient. Returns the new record id.
    pub fn submit_appointment(&self, payload: FfiNewAppointment) -> Result<i64, ClinicaError> {
        self.session
            .submit_appointment(&payload.into())
            .map_err(Into::into)
    }

    /// Attach a treatment to the saved patient. Returns the new record id.
    pub fn submit_treatment(&self, payload: FfiNewTreatment) -> Result<i64, ClinicaError> {
        self.session
            .submit_treatment(&payload.into())
            .map_err(Into::into)
    }

    /// Attach a medication to the saved patient. Returns the new record id.
    pub fn submit_medication(&self, payload: FfiNewMedication) -> Result<i64, ClinicaError> {
        self.session
            .submit_medication(&payload.into())
            .map_err(Into::into)
    }

    /// Delete the saved patient and its records, returning the session to
    /// the editing state.
    pub fn delete_patient(&self) -> Result<(), ClinicaError> {
        self.session.delete_patient().map_err(Into::into)
    }

    /// Id of the patient saved by this session, once there is one.
    pub fn saved_patient_id(&self) -> Result<Option<i64>, ClinicaError> {
        self.session.saved_patient_id().map_err(Into::into)
    }

    pub fn has_saved_patient(&self) -> Result<bool, ClinicaError> {
        Ok(self.session.saved_patient_id()?.is_some())
    }

    /// Whether this session has attached any dependent record to the saved
    /// patient.
    pub fn has_children(&self) -> Result<bool, ClinicaError> {
        Ok(matches!(
            self.session.state()?,
            WizardState::Persisted {
                has_children: true,
                ..
            }
        ))
    }

    pub fn is_submitting(&self) -> Result<bool, ClinicaError> {
        self.session.is_submitting().map_err(Into::into)
    }

    /// Message from the most recent failed submit, if any.
    pub fn last_error(&self) -> Result<Option<String>, ClinicaError> {
        self.session.last_error().map_err(Into::into)
    }
}

// =========================================================================
// Client-Side Filters (exported to FFI)
// =========================================================================

/// Filter loaded appointments by motivo or assigned doctor.
#[uniffi::export]
pub fn search_appointments(citas: Vec<FfiAppointment>, query: String) -> Vec<FfiAppointment> {
    let citas: Vec<Appointment> = citas.into_iter().map(|c| c.into()).collect();
    search::filter_appointments(&citas, &query)
        .into_iter()
        .map(|c| c.into())
        .collect()
}

/// Filter loaded medications by name.
#[uniffi::export]
pub fn search_medications(
    medicamentos: Vec<FfiMedication>,
    query: String,
) -> Vec<FfiMedication> {
    let medicamentos: Vec<Medication> = medicamentos.into_iter().map(|m| m.into()).collect();
    search::filter_medications(&medicamentos, &query)
        .into_iter()
        .map(|m| m.into())
        .collect()
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id_paciente: i64,
    pub nombre: String,
    pub apellido: String,
    pub fecha_nacimiento: String,
    pub sexo: String,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub tipo_sangre: Option<String>,
    pub alergias: Option<String>,
    pub activo: bool,
}

impl From<Patient> for FfiPatient {
    fn from(p: Patient) -> Self {
        Self {
            id_paciente: p.id_paciente,
            nombre: p.nombre,
            apellido: p.apellido,
            fecha_nacimiento: p.fecha_nacimiento,
            sexo: p.sexo.into(),
            telefono: p.telefono,
            direccion: p.direccion,
            tipo_sangre: p.tipo_sangre,
            alergias: p.alergias,
            activo: p.activo,
        }
    }
}

/// FFI-safe patient payload.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewPatient {
    pub nombre: String,
    pub apellido: String,
    pub fecha_nacimiento: String,
    pub sexo: String,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub tipo_sangre: Option<String>,
    pub alergias: Option<String>,
    pub activo: bool,
}

impl From<FfiNewPatient> for NewPatient {
    fn from(p: FfiNewPatient) -> Self {
        NewPatient {
            nombre: p.nombre,
            apellido: p.apellido,
            fecha_nacimiento: p.fecha_nacimiento,
            sexo: p.sexo.into(),
            telefono: p.telefono,
            direccion: p.direccion,
            tipo_sangre: p.tipo_sangre,
            alergias: p.alergias,
            activo: p.activo,
        }
    }
}

/// FFI-safe appointment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    pub id_cita: i64,
    pub id_paciente: i64,
    pub fecha: String,
    pub hora: String,
    pub motivo: String,
    pub medico_asignado: Option<String>,
    pub estatus: String,
}

impl From<Appointment> for FfiAppointment {
    fn from(c: Appointment) -> Self {
        Self {
            id_cita: c.id_cita,
            id_paciente: c.id_paciente,
            fecha: c.fecha,
            hora: c.hora,
            motivo: c.motivo,
            medico_asignado: c.medico_asignado,
            estatus: c.estatus.into(),
        }
    }
}

impl From<FfiAppointment> for Appointment {
    fn from(c: FfiAppointment) -> Self {
        Appointment {
            id_cita: c.id_cita,
            id_paciente: c.id_paciente,
            fecha: c.fecha,
            hora: c.hora,
            motivo: c.motivo,
            medico_asignado: c.medico_asignado,
            estatus: AppointmentStatus::from(c.estatus),
        }
    }
}

/// FFI-safe appointment payload.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewAppointment {
    pub fecha: String,
    pub hora: String,
    pub motivo: String,
    pub medico_asignado: Option<String>,
    pub estatus: String,
}

impl From<FfiNewAppointment> for NewAppointment {
    fn from(c: FfiNewAppointment) -> Self {
        NewAppointment {
            fecha: c.fecha,
            hora: c.hora,
            motivo: c.motivo,
            medico_asignado: c.medico_asignado,
            estatus: AppointmentStatus::from(c.estatus),
        }
    }
}

/// FFI-safe treatment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTreatment {
    pub id_tratamiento: i64,
    pub id_paciente: i64,
    pub diagnostico: String,
    pub medicamento: String,
    pub dosis: String,
    pub fecha_inicio: Option<String>,
    pub fecha_fin: Option<String>,
    pub notas: Option<String>,
}

impl From<Treatment> for FfiTreatment {
    fn from(t: Treatment) -> Self {
        Self {
            id_tratamiento: t.id_tratamiento,
            id_paciente: t.id_paciente,
            diagnostico: t.diagnostico,
            medicamento: t.medicamento,
            dosis: t.dosis,
            fecha_inicio: t.fecha_inicio,
            fecha_fin: t.fecha_fin,
            notas: t.notas,
        }
    }
}

/// FFI-safe treatment payload.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewTreatment {
    pub diagnostico: String,
    pub medicamento: String,
    pub dosis: String,
    pub fecha_inicio: Option<String>,
    pub fecha_fin: Option<String>,
    pub notas: Option<String>,
}

impl From<FfiNewTreatment> for NewTreatment {
    fn from(t: FfiNewTreatment) -> Self {
        NewTreatment {
            diagnostico: t.diagnostico,
            medicamento: t.medicamento,
            dosis: t.dosis,
            fecha_inicio: t.fecha_inicio,
            fecha_fin: t.fecha_fin,
            notas: t.notas,
        }
    }
}

/// FFI-safe medication.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedication {
    pub id_medicamento: i64,
    pub id_paciente: i64,
    pub medicamento: String,
    pub dosis: String,
    pub frecuencia: String,
    pub fecha_inicio: Option<String>,
    pub fecha_fin: Option<String>,
}

impl From<Medication> for FfiMedication {
    fn from(m: Medication) -> Self {
        Self {
            id_medicamento: m.id_medicamento,
            id_paciente: m.id_paciente,
            medicamento: m.medicamento,
            dosis: m.dosis,
            frecuencia: m.frecuencia,
            fecha_inicio: m.fecha_inicio,
            fecha_fin: m.fecha_fin,
        }
    }
}

impl From<FfiMedication> for Medication {
    fn from(m: FfiMedication) -> Self {
        Medication {
            id_medicamento: m.id_medicamento,
            id_paciente: m.id_paciente,
            medicamento: m.medicamento,
            dosis: m.dosis,
            frecuencia: m.frecuencia,
            fecha_inicio: m.fecha_inicio,
            fecha_fin: m.fecha_fin,
        }
    }
}

/// FFI-safe medication payload.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewMedication {
    pub medicamento: String,
    pub dosis: String,
    pub frecuencia: String,
    pub fecha_inicio: Option<String>,
    pub fecha_fin: Option<String>,
}

impl From<FfiNewMedication> for NewMedication {
    fn from(m: FfiNewMedication) -> Self {
        NewMedication {
            medicamento: m.medicamento,
            dosis: m.dosis,
            frecuencia: m.frecuencia,
            fecha_inicio: m.fecha_inicio,
            fecha_fin: m.fecha_fin,
        }
    }
}

/// FFI-safe page of the patient list.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientPage {
    pub items: Vec<FfiPatient>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub has_more: bool,
}

impl From<PagedResult<Patient>> for FfiPatientPage {
    fn from(result: PagedResult<Patient>) -> Self {
        let has_more = result.has_more();
        Self {
            items: result.items.into_iter().map(|p| p.into()).collect(),
            page: result.page,
            page_size: result.page_size,
            total: result.total,
            has_more,
        }
    }
}

/// FFI-safe patient with every dependent record attached.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientDetails {
    pub paciente: FfiPatient,
    pub citas: Vec<FfiAppointment>,
    pub tratamientos: Vec<FfiTreatment>,
    pub medicamentos: Vec<FfiMedication>,
}

impl From<PatientDetails> for FfiPatientDetails {
    fn from(d: PatientDetails) -> Self {
        Self {
            paciente: d.paciente.into(),
            citas: d.citas.into_iter().map(|c| c.into()).collect(),
            tratamientos: d.tratamientos.into_iter().map(|t| t.into()).collect(),
            medicamentos: d.medicamentos.into_iter().map(|m| m.into()).collect(),
        }
    }
}

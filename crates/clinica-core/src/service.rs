//! Domain service: validation, error translation, and orchestration over the
//! database layer.

use thiserror::Error;

use crate::db::{Database, DbError};
use crate::models::{
    Appointment, Medication, NewAppointment, NewMedication, NewPatient, NewTreatment, PagedResult,
    Patient, PatientDetails, PatientFilter, Treatment, Validate, ValidationError,
};

/// Service errors.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// A required field is missing or malformed. Raised before any
    /// persistence attempt.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The targeted record id does not resolve.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// A dependent record was submitted against a patient id that does not
    /// exist. Distinct from `NotFound` so callers can tell a bad target id
    /// from a bad parent reference.
    #[error("patient {id} does not exist")]
    UnknownPatient { id: i64 },

    #[error("storage error: {0}")]
    Storage(#[from] DbError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Translate a failed child insert: the only NotFound a child insert can
/// produce is a missing parent.
fn child_insert_error(err: DbError, patient_id: i64) -> ServiceError {
    match err {
        DbError::NotFound(_) => ServiceError::UnknownPatient { id: patient_id },
        other => ServiceError::Storage(other),
    }
}

/// Main domain service over one database handle.
pub struct ClinicService<'a> {
    db: &'a Database,
}

impl<'a> ClinicService<'a> {
    /// Create a new service.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    // ===== Patients =====

    /// Validate and create a patient, returning the stored record.
    pub fn create_patient(&self, payload: &NewPatient) -> ServiceResult<Patient> {
        payload.validate()?;
        let patient = self.db.insert_patient(payload)?;
        tracing::info!(id_paciente = patient.id_paciente, "patient created");
        Ok(patient)
    }

    /// Validate and update a patient by id.
    pub fn update_patient(&self, id: i64, payload: &NewPatient) -> ServiceResult<Patient> {
        payload.validate()?;
        match self.db.update_patient(id, payload)? {
            Some(patient) => {
                tracing::info!(id_paciente = id, "patient updated");
                Ok(patient)
            }
            None => Err(ServiceError::NotFound {
                entity: "paciente",
                id,
            }),
        }
    }

    /// Delete a patient and, by schema cascade, its dependent records.
    pub fn delete_patient(&self, id: i64) -> ServiceResult<()> {
        if !self.db.delete_patient(id)? {
            return Err(ServiceError::NotFound {
                entity: "paciente",
                id,
            });
        }
        tracing::info!(id_paciente = id, "patient deleted");
        Ok(())
    }

    /// Get a patient by id.
    pub fn get_patient(&self, id: i64) -> ServiceResult<Patient> {
        self.db
            .get_patient(id)?
            .ok_or(ServiceError::NotFound {
                entity: "paciente",
                id,
            })
    }

    /// One page of patients matching the filter, ascending id order.
    pub fn list_patients(
        &self,
        page: u32,
        page_size: u32,
        filter: &PatientFilter,
    ) -> ServiceResult<PagedResult<Patient>> {
        Ok(self.db.list_patients(page, page_size, filter)?)
    }

    /// A patient with all of its dependent collections.
    pub fn get_patient_details(&self, id: i64) -> ServiceResult<PatientDetails> {
        let paciente = self.get_patient(id)?;
        Ok(PatientDetails {
            citas: self.db.appointments_for_patient(id)?,
            tratamientos: self.db.treatments_for_patient(id)?,
            medicamentos: self.db.medications_for_patient(id)?,
            paciente,
        })
    }

    /// All patients with an exact blood-type token.
    pub fn get_patients_by_blood_type(&self, tipo: &str) -> ServiceResult<Vec<Patient>> {
        Ok(self.db.patients_by_blood_type(tipo)?)
    }

    // ===== Appointments =====

    /// Validate and create an appointment for a patient.
    pub fn create_appointment(
        &self,
        patient_id: i64,
        payload: &NewAppointment,
    ) -> ServiceResult<Appointment> {
        payload.validate()?;
        let cita = self
            .db
            .insert_appointment(patient_id, payload)
            .map_err(|e| child_insert_error(e, patient_id))?;
        tracing::info!(
            id_cita = cita.id_cita,
            id_paciente = patient_id,
            "appointment created"
        );
        Ok(cita)
    }

    /// Validate and update an appointment by id.
    pub fn update_appointment(
        &self,
        id: i64,
        payload: &NewAppointment,
    ) -> ServiceResult<Appointment> {
        payload.validate()?;
        match self.db.update_appointment(id, payload)? {
            Some(cita) => {
                tracing::info!(id_cita = id, "appointment updated");
                Ok(cita)
            }
            None => Err(ServiceError::NotFound { entity: "cita", id }),
        }
    }

    /// Delete an appointment.
    pub fn delete_appointment(&self, id: i64) -> ServiceResult<()> {
        if !self.db.delete_appointment(id)? {
            return Err(ServiceError::NotFound { entity: "cita", id });
        }
        tracing::info!(id_cita = id, "appointment deleted");
        Ok(())
    }

    /// All appointments of one patient, insertion order.
    pub fn get_appointments_by_patient(&self, patient_id: i64) -> ServiceResult<Vec<Appointment>> {
        Ok(self.db.appointments_for_patient(patient_id)?)
    }

    /// All appointments on one exact date, across patients.
    pub fn get_appointments_by_date(&self, fecha: &str) -> ServiceResult<Vec<Appointment>> {
        Ok(self.db.appointments_on(fecha)?)
    }

    /// Count of appointments with estatus 'Cancelada'.
    pub fn count_cancelled_appointments(&self) -> ServiceResult<u64> {
        Ok(self.db.count_cancelled_appointments()?)
    }

    // ===== Treatments =====

    /// Validate and create a treatment for a patient.
    pub fn create_treatment(
        &self,
        patient_id: i64,
        payload: &NewTreatment,
    ) -> ServiceResult<Treatment> {
        payload.validate()?;
        let treatment = self
            .db
            .insert_treatment(patient_id, payload)
            .map_err(|e| child_insert_error(e, patient_id))?;
        tracing::info!(
            id_tratamiento = treatment.id_tratamiento,
            id_paciente = patient_id,
            "treatment created"
        );
        Ok(treatment)
    }

    /// Validate and update a treatment by id.
    pub fn update_treatment(&self, id: i64, payload: &NewTreatment) -> ServiceResult<Treatment> {
        payload.validate()?;
        match self.db.update_treatment(id, payload)? {
            Some(treatment) => {
                tracing::info!(id_tratamiento = id, "treatment updated");
                Ok(treatment)
            }
            None => Err(ServiceError::NotFound {
                entity: "tratamiento",
                id,
            }),
        }
    }

    /// Delete a treatment.
    pub fn delete_treatment(&self, id: i64) -> ServiceResult<()> {
        if !self.db.delete_treatment(id)? {
            return Err(ServiceError::NotFound {
                entity: "tratamiento",
                id,
            });
        }
        tracing::info!(id_tratamiento = id, "treatment deleted");
        Ok(())
    }

    /// All treatments of one patient, insertion order.
    pub fn get_treatments_by_patient(&self, patient_id: i64) -> ServiceResult<Vec<Treatment>> {
        Ok(self.db.treatments_for_patient(patient_id)?)
    }

    /// Treatments whose diagnosis contains the query, case-insensitively.
    pub fn get_treatments_by_diagnosis(&self, query: &str) -> ServiceResult<Vec<Treatment>> {
        Ok(self.db.treatments_by_diagnosis(query)?)
    }

    // ===== Medications =====

    /// Validate and create a medication for a patient.
    pub fn create_medication(
        &self,
        patient_id: i64,
        payload: &NewMedication,
    ) -> ServiceResult<Medication> {
        payload.validate()?;
        let med = self
            .db
            .insert_medication(patient_id, payload)
            .map_err(|e| child_insert_error(e, patient_id))?;
        tracing::info!(
            id_medicamento = med.id_medicamento,
            id_paciente = patient_id,
            "medication created"
        );
        Ok(med)
    }

    /// Validate and update a medication by id.
    pub fn update_medication(&self, id: i64, payload: &NewMedication) -> ServiceResult<Medication> {
        payload.validate()?;
        match self.db.update_medication(id, payload)? {
            Some(med) => {
                tracing::info!(id_medicamento = id, "medication updated");
                Ok(med)
            }
            None => Err(ServiceError::NotFound {
                entity: "medicamento",
                id,
            }),
        }
    }

    /// Delete a medication.
    pub fn delete_medication(&self, id: i64) -> ServiceResult<()> {
        if !self.db.delete_medication(id)? {
            return Err(ServiceError::NotFound {
                entity: "medicamento",
                id,
            });
        }
        tracing::info!(id_medicamento = id, "medication deleted");
        Ok(())
    }

    /// All medications of one patient, insertion order.
    pub fn get_medications_by_patient(&self, patient_id: i64) -> ServiceResult<Vec<Medication>> {
        Ok(self.db.medications_for_patient(patient_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn ana() -> NewPatient {
        NewPatient::new("Ana".into(), "Ruiz".into(), "1990-05-01".into())
    }

    #[test]
    fn test_create_patient_validates_before_writing() {
        let db = setup();
        let svc = ClinicService::new(&db);

        let mut bad = ana();
        bad.apellido = "".into();
        let err = svc.create_patient(&bad).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let page = svc
            .list_patients(1, 10, &PatientFilter::default())
            .unwrap();
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_unknown_patient_is_distinct_from_not_found() {
        let db = setup();
        let svc = ClinicService::new(&db);

        let treatment = NewTreatment::new("Gripe".into(), "Paracetamol".into(), "500mg".into());
        let err = svc.create_treatment(999_999, &treatment).unwrap_err();
        assert!(matches!(err, ServiceError::UnknownPatient { id: 999_999 }));

        let err = svc.update_treatment(999_999, &treatment).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::NotFound {
                entity: "tratamiento",
                id: 999_999
            }
        ));
    }

    #[test]
    fn test_patient_details_aggregates_children() {
        let db = setup();
        let svc = ClinicService::new(&db);

        let patient = svc.create_patient(&ana()).unwrap();
        svc.create_appointment(
            patient.id_paciente,
            &NewAppointment::new("2024-06-10".into(), "09:30".into(), "Control".into()),
        )
        .unwrap();
        svc.create_treatment(
            patient.id_paciente,
            &NewTreatment::new("Gripe".into(), "Paracetamol".into(), "500mg".into()),
        )
        .unwrap();

        let details = svc.get_patient_details(patient.id_paciente).unwrap();
        assert_eq!(details.paciente, patient);
        assert_eq!(details.citas.len(), 1);
        assert_eq!(details.tratamientos.len(), 1);
        assert!(details.medicamentos.is_empty());
    }

    #[test]
    fn test_delete_missing_patient_is_not_found() {
        let db = setup();
        let svc = ClinicService::new(&db);

        let err = svc.delete_patient(42).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::NotFound {
                entity: "paciente",
                id: 42
            }
        ));
    }

    #[test]
    fn test_update_patient_round_trip() {
        let db = setup();
        let svc = ClinicService::new(&db);

        let patient = svc.create_patient(&ana()).unwrap();

        let mut changed = ana();
        changed.direccion = Some("Av. Reforma 10".into());
        let updated = svc.update_patient(patient.id_paciente, &changed).unwrap();
        assert_eq!(updated.direccion, Some("Av. Reforma 10".into()));
        assert_eq!(updated.id_paciente, patient.id_paciente);
    }
}

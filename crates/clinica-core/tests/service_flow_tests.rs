//! End-to-end flows through the domain service.
//!
//! These tests drive ClinicService against a real in-memory database, the
//! way the client layer does.

use clinica_core::db::Database;
use clinica_core::service::{ClinicService, ServiceError};
use clinica_core::{AppointmentStatus, NewAppointment, NewMedication, NewPatient, NewTreatment};

fn ana_ruiz() -> NewPatient {
    let mut payload = NewPatient::new("Ana".into(), "Ruiz".into(), "1985-07-01".into());
    payload.telefono = Some("555-0101".into());
    payload.tipo_sangre = Some("O+".into());
    payload
}

fn gripe_treatment() -> NewTreatment {
    let mut payload =
        NewTreatment::new("Gripe".into(), "Paracetamol".into(), "500mg".into());
    payload.fecha_inicio = Some("2024-06-01".into());
    payload
}

fn appointment_at(fecha: &str, hora: &str, estatus: &str) -> NewAppointment {
    let mut payload = NewAppointment::new(fecha.into(), hora.into(), "Consulta".into());
    payload.estatus = AppointmentStatus::from(estatus.to_string());
    payload
}

#[test]
fn test_capture_flow_then_diagnosis_search() {
    let db = Database::open_in_memory().unwrap();
    let service = ClinicService::new(&db);

    let patient = service.create_patient(&ana_ruiz()).unwrap();
    service
        .create_treatment(patient.id_paciente, &gripe_treatment())
        .unwrap();
    service
        .create_medication(
            patient.id_paciente,
            &NewMedication::new("Paracetamol".into(), "500mg".into(), "cada 8 horas".into()),
        )
        .unwrap();

    // Case-insensitive diagnosis search finds the flu treatment.
    let hits = service.get_treatments_by_diagnosis("gripe").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id_paciente, patient.id_paciente);
    assert_eq!(hits[0].diagnostico, "Gripe");

    assert!(service.get_treatments_by_diagnosis("diabetes").unwrap().is_empty());

    let details = service.get_patient_details(patient.id_paciente).unwrap();
    assert_eq!(details.paciente.full_name(), "Ana Ruiz");
    assert_eq!(details.tratamientos.len(), 1);
    assert_eq!(details.medicamentos.len(), 1);
    assert!(details.citas.is_empty());
}

#[test]
fn test_child_records_against_missing_patient_write_nothing() {
    let db = Database::open_in_memory().unwrap();
    let service = ClinicService::new(&db);

    let err = service
        .create_treatment(999_999, &gripe_treatment())
        .unwrap_err();
    assert!(matches!(err, ServiceError::UnknownPatient { id: 999_999 }));

    let err = service
        .create_appointment(999_999, &appointment_at("2024-06-10", "10:00", "Programada"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::UnknownPatient { id: 999_999 }));

    let err = service
        .create_medication(
            999_999,
            &NewMedication::new("Ibuprofeno".into(), "400mg".into(), "cada 12 horas".into()),
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::UnknownPatient { id: 999_999 }));

    // Nothing may have been written for the phantom parent.
    assert!(service.get_treatments_by_diagnosis("").unwrap().is_empty());
    assert!(service.get_appointments_by_date("2024-06-10").unwrap().is_empty());
    assert!(service.get_medications_by_patient(999_999).unwrap().is_empty());
}

#[test]
fn test_unknown_patient_is_distinct_from_not_found() {
    let db = Database::open_in_memory().unwrap();
    let service = ClinicService::new(&db);

    // Bad parent reference on create.
    let err = service.create_treatment(42, &gripe_treatment()).unwrap_err();
    assert!(matches!(err, ServiceError::UnknownPatient { id: 42 }));

    // Bad target id on update.
    let err = service.update_treatment(42, &gripe_treatment()).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            entity: "tratamiento",
            id: 42
        }
    ));
}

#[test]
fn test_cancelled_appointment_count() {
    let db = Database::open_in_memory().unwrap();
    let service = ClinicService::new(&db);
    let patient = service.create_patient(&ana_ruiz()).unwrap();

    service
        .create_appointment(
            patient.id_paciente,
            &appointment_at("2024-06-10", "09:00", "Programada"),
        )
        .unwrap();
    service
        .create_appointment(
            patient.id_paciente,
            &appointment_at("2024-06-11", "10:30", "Confirmada"),
        )
        .unwrap();
    // Canonicalized on the way in regardless of case.
    service
        .create_appointment(
            patient.id_paciente,
            &appointment_at("2024-06-12", "11:00", "CANCELADA"),
        )
        .unwrap();

    assert_eq!(service.count_cancelled_appointments().unwrap(), 1);
}

#[test]
fn test_cancelling_via_update_is_counted() {
    let db = Database::open_in_memory().unwrap();
    let service = ClinicService::new(&db);
    let patient = service.create_patient(&ana_ruiz()).unwrap();

    let cita = service
        .create_appointment(
            patient.id_paciente,
            &appointment_at("2024-06-10", "09:00", "Programada"),
        )
        .unwrap();
    assert_eq!(service.count_cancelled_appointments().unwrap(), 0);

    let updated = service
        .update_appointment(
            cita.id_cita,
            &appointment_at("2024-06-10", "09:00", "Cancelada"),
        )
        .unwrap();
    assert!(updated.estatus.is_cancelled());
    assert_eq!(service.count_cancelled_appointments().unwrap(), 1);
}

#[test]
fn test_delete_patient_cascades_to_dependents() {
    let db = Database::open_in_memory().unwrap();
    let service = ClinicService::new(&db);

    let ana = service.create_patient(&ana_ruiz()).unwrap();
    let otro = service
        .create_patient(&NewPatient::new(
            "Luis".into(),
            "Mora".into(),
            "1970-02-02".into(),
        ))
        .unwrap();

    for patient_id in [ana.id_paciente, otro.id_paciente] {
        service
            .create_appointment(
                patient_id,
                &appointment_at("2024-06-10", "09:00", "Programada"),
            )
            .unwrap();
        service.create_treatment(patient_id, &gripe_treatment()).unwrap();
        service
            .create_medication(
                patient_id,
                &NewMedication::new("Paracetamol".into(), "500mg".into(), "cada 8 horas".into()),
            )
            .unwrap();
    }

    service.delete_patient(ana.id_paciente).unwrap();

    let err = service.get_patient(ana.id_paciente).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "paciente", .. }));
    assert!(service.get_appointments_by_patient(ana.id_paciente).unwrap().is_empty());
    assert!(service.get_treatments_by_patient(ana.id_paciente).unwrap().is_empty());
    assert!(service.get_medications_by_patient(ana.id_paciente).unwrap().is_empty());

    // The other patient's graph is untouched.
    let details = service.get_patient_details(otro.id_paciente).unwrap();
    assert_eq!(details.citas.len(), 1);
    assert_eq!(details.tratamientos.len(), 1);
    assert_eq!(details.medicamentos.len(), 1);
}

#[test]
fn test_appointments_by_date_across_patients() {
    let db = Database::open_in_memory().unwrap();
    let service = ClinicService::new(&db);

    let ana = service.create_patient(&ana_ruiz()).unwrap();
    let luis = service
        .create_patient(&NewPatient::new(
            "Luis".into(),
            "Mora".into(),
            "1970-02-02".into(),
        ))
        .unwrap();

    service
        .create_appointment(
            luis.id_paciente,
            &appointment_at("2024-06-10", "12:30", "Programada"),
        )
        .unwrap();
    service
        .create_appointment(
            ana.id_paciente,
            &appointment_at("2024-06-10", "08:15", "Programada"),
        )
        .unwrap();
    service
        .create_appointment(
            ana.id_paciente,
            &appointment_at("2024-06-11", "08:15", "Programada"),
        )
        .unwrap();

    let agenda = service.get_appointments_by_date("2024-06-10").unwrap();
    assert_eq!(agenda.len(), 2);
    // Day view sorts by time, regardless of owner.
    assert_eq!(agenda[0].hora, "08:15");
    assert_eq!(agenda[0].id_paciente, ana.id_paciente);
    assert_eq!(agenda[1].hora, "12:30");
    assert_eq!(agenda[1].id_paciente, luis.id_paciente);
}

#[test]
fn test_blood_type_lookup_is_exact() {
    let db = Database::open_in_memory().unwrap();
    let service = ClinicService::new(&db);

    let mut positive = ana_ruiz();
    positive.tipo_sangre = Some("O+".into());
    service.create_patient(&positive).unwrap();

    let mut lowercase = NewPatient::new("Luis".into(), "Mora".into(), "1970-02-02".into());
    lowercase.tipo_sangre = Some("o+".into());
    service.create_patient(&lowercase).unwrap();

    let mut negative = NewPatient::new("Eva".into(), "León".into(), "1992-11-30".into());
    negative.tipo_sangre = Some("O-".into());
    service.create_patient(&negative).unwrap();

    let hits = service.get_patients_by_blood_type("O+").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].nombre, "Ana");
}

#[test]
fn test_validation_failures_never_reach_storage() {
    let db = Database::open_in_memory().unwrap();
    let service = ClinicService::new(&db);
    let patient = service.create_patient(&ana_ruiz()).unwrap();

    let mut bad_date = gripe_treatment();
    bad_date.fecha_inicio = Some("junio 2024".into());
    let err = service
        .create_treatment(patient.id_paciente, &bad_date)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(ref v) if v.field == "fecha_inicio"));

    let mut bad_time = appointment_at("2024-06-10", "25:99", "Programada");
    bad_time.motivo = "Consulta".into();
    let err = service
        .create_appointment(patient.id_paciente, &bad_time)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(ref v) if v.field == "hora"));

    assert!(service.get_treatments_by_patient(patient.id_paciente).unwrap().is_empty());
    assert!(service.get_appointments_by_patient(patient.id_paciente).unwrap().is_empty());
}

//! In-memory filtering for already-loaded record lists.
//!
//! Read screens fetch a patient's full record set once and narrow it as the
//! user types, without another round trip.

use clinica_core::{Appointment, Medication};

/// Keep appointments whose motivo or assigned doctor contains the query,
/// case-insensitively. An empty or blank query keeps everything.
pub fn filter_appointments(citas: &[Appointment], query: &str) -> Vec<Appointment> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return citas.to_vec();
    }
    citas
        .iter()
        .filter(|cita| {
            cita.motivo.to_lowercase().contains(&needle)
                || cita
                    .medico_asignado
                    .as_deref()
                    .is_some_and(|medico| medico.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Keep medications whose name contains the query, case-insensitively. An
/// empty or blank query keeps everything.
pub fn filter_medications(medicamentos: &[Medication], query: &str) -> Vec<Medication> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return medicamentos.to_vec();
    }
    medicamentos
        .iter()
        .filter(|med| med.medicamento.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

//! Appointment (cita) models.

use serde::{Deserialize, Serialize};

use super::validate::{require_date, require_text, require_time, Validate, ValidationError};

/// Appointment lifecycle status.
///
/// Stored as free text in practice, but display branching and aggregates need
/// a closed set, so recognized tokens are canonicalized case-insensitively on
/// parse. Anything else survives round-trips verbatim through `Other`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum AppointmentStatus {
    Programada,
    Confirmada,
    Realizada,
    Cancelada,
    Other(String),
}

impl AppointmentStatus {
    /// Canonical storage token.
    pub fn as_str(&self) -> &str {
        match self {
            AppointmentStatus::Programada => "Programada",
            AppointmentStatus::Confirmada => "Confirmada",
            AppointmentStatus::Realizada => "Realizada",
            AppointmentStatus::Cancelada => "Cancelada",
            AppointmentStatus::Other(s) => s,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppointmentStatus::Cancelada)
    }
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Programada
    }
}

impl From<String> for AppointmentStatus {
    fn from(token: String) -> Self {
        match token.trim().to_lowercase().as_str() {
            "programada" => AppointmentStatus::Programada,
            "confirmada" => AppointmentStatus::Confirmada,
            "realizada" => AppointmentStatus::Realizada,
            "cancelada" => AppointmentStatus::Cancelada,
            _ => AppointmentStatus::Other(token),
        }
    }
}

impl From<AppointmentStatus> for String {
    fn from(status: AppointmentStatus) -> Self {
        status.as_str().to_string()
    }
}

/// A scheduled clinical visit belonging to one patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id_cita: i64,
    /// Owning patient id.
    pub id_paciente: i64,
    /// Visit date, ISO `YYYY-MM-DD`.
    pub fecha: String,
    /// Time of day, `HH:MM` or `HH:MM:SS`.
    pub hora: String,
    /// Reason for the visit.
    pub motivo: String,
    /// Assigned clinician, if any.
    pub medico_asignado: Option<String>,
    #[serde(default)]
    pub estatus: AppointmentStatus,
}

/// Payload for creating or updating an appointment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewAppointment {
    pub fecha: String,
    pub hora: String,
    pub motivo: String,
    pub medico_asignado: Option<String>,
    #[serde(default)]
    pub estatus: AppointmentStatus,
}

impl NewAppointment {
    /// Create a payload with the required fields set.
    pub fn new(fecha: String, hora: String, motivo: String) -> Self {
        Self {
            fecha,
            hora,
            motivo,
            ..Self::default()
        }
    }
}

impl Validate for NewAppointment {
    fn validate(&self) -> Result<(), ValidationError> {
        require_date("fecha", &self.fecha)?;
        require_time("hora", &self.hora)?;
        require_text("motivo", &self.motivo)?;
        Ok(())
    }
}

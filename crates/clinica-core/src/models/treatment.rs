//! Treatment (tratamiento) models.

use serde::{Deserialize, Serialize};

use super::validate::{optional_date, require_text, Validate, ValidationError};

/// A diagnosis-and-medication plan belonging to one patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Treatment {
    pub id_tratamiento: i64,
    /// Owning patient id.
    pub id_paciente: i64,
    pub diagnostico: String,
    pub medicamento: String,
    pub dosis: String,
    /// Optional start date, ISO `YYYY-MM-DD`.
    pub fecha_inicio: Option<String>,
    /// Optional end date, ISO `YYYY-MM-DD`.
    pub fecha_fin: Option<String>,
    pub notas: Option<String>,
}

/// Payload for creating or updating a treatment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewTreatment {
    pub diagnostico: String,
    pub medicamento: String,
    pub dosis: String,
    pub fecha_inicio: Option<String>,
    pub fecha_fin: Option<String>,
    pub notas: Option<String>,
}

impl NewTreatment {
    /// Create a payload with the required fields set.
    pub fn new(diagnostico: String, medicamento: String, dosis: String) -> Self {
        Self {
            diagnostico,
            medicamento,
            dosis,
            ..Self::default()
        }
    }
}

impl Validate for NewTreatment {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("diagnostico", &self.diagnostico)?;
        require_text("medicamento", &self.medicamento)?;
        require_text("dosis", &self.dosis)?;
        optional_date("fecha_inicio", self.fecha_inicio.as_deref())?;
        optional_date("fecha_fin", self.fecha_fin.as_deref())?;
        Ok(())
    }
}

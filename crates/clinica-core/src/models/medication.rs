//! Medication (medicamento) models.

use serde::{Deserialize, Serialize};

use super::validate::{optional_date, require_text, Validate, ValidationError};

/// A standalone prescribed medication belonging to one patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medication {
    pub id_medicamento: i64,
    /// Owning patient id.
    pub id_paciente: i64,
    pub medicamento: String,
    pub dosis: String,
    pub frecuencia: String,
    /// Optional start date, ISO `YYYY-MM-DD`.
    pub fecha_inicio: Option<String>,
    /// Optional end date, ISO `YYYY-MM-DD`.
    pub fecha_fin: Option<String>,
}

/// Payload for creating or updating a medication.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewMedication {
    pub medicamento: String,
    pub dosis: String,
    pub frecuencia: String,
    pub fecha_inicio: Option<String>,
    pub fecha_fin: Option<String>,
}

impl NewMedication {
    /// Create a payload with the required fields set.
    pub fn new(medicamento: String, dosis: String, frecuencia: String) -> Self {
        Self {
            medicamento,
            dosis,
            frecuencia,
            ..Self::default()
        }
    }
}

impl Validate for NewMedication {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("medicamento", &self.medicamento)?;
        require_text("dosis", &self.dosis)?;
        require_text("frecuencia", &self.frecuencia)?;
        optional_date("fecha_inicio", self.fecha_inicio.as_deref())?;
        optional_date("fecha_fin", self.fecha_fin.as_deref())?;
        Ok(())
    }
}

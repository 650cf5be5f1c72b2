//! Patient models.

use serde::{Deserialize, Serialize};

use super::appointment::Appointment;
use super::medication::Medication;
use super::treatment::Treatment;
use super::validate::{require_date, require_text, Validate, ValidationError};

/// Biological sex as recorded on the patient sheet.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Sex {
    M,
    F,
    /// Not recorded. Serializes to an empty string.
    #[default]
    Unknown,
}

impl Sex {
    /// Storage token for the `sexo` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::M => "M",
            Sex::F => "F",
            Sex::Unknown => "",
        }
    }

    /// Parse a stored token. Unrecognized values map to `Unknown`.
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "M" | "m" => Sex::M,
            "F" | "f" => Sex::F,
            _ => Sex::Unknown,
        }
    }
}

impl From<String> for Sex {
    fn from(token: String) -> Self {
        Sex::from_token(&token)
    }
}

impl From<Sex> for String {
    fn from(sex: Sex) -> Self {
        sex.as_str().to_string()
    }
}

/// A patient record, the root of the clinical graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Generated identifier, immutable once assigned. Unique key for all
    /// dependent-record foreign keys.
    pub id_paciente: i64,
    /// Given name.
    pub nombre: String,
    /// Family name.
    pub apellido: String,
    /// Birth date, ISO `YYYY-MM-DD`.
    pub fecha_nacimiento: String,
    /// Recorded sex.
    #[serde(default)]
    pub sexo: Sex,
    /// Contact phone number.
    pub telefono: Option<String>,
    /// Postal address.
    pub direccion: Option<String>,
    /// Free-text blood-type token, e.g. "O+".
    pub tipo_sangre: Option<String>,
    /// Known allergies, free text.
    pub alergias: Option<String>,
    /// Active flag. New patients start active.
    pub activo: bool,
}

impl Patient {
    /// Display name as shown in lists.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }
}

/// Payload for creating or updating a patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPatient {
    pub nombre: String,
    pub apellido: String,
    /// Birth date, ISO `YYYY-MM-DD`.
    pub fecha_nacimiento: String,
    #[serde(default)]
    pub sexo: Sex,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub tipo_sangre: Option<String>,
    pub alergias: Option<String>,
    /// Defaults to true when omitted.
    #[serde(default = "default_active")]
    pub activo: bool,
}

fn default_active() -> bool {
    true
}

impl Default for NewPatient {
    fn default() -> Self {
        Self {
            nombre: String::new(),
            apellido: String::new(),
            fecha_nacimiento: String::new(),
            sexo: Sex::Unknown,
            telefono: None,
            direccion: None,
            tipo_sangre: None,
            alergias: None,
            activo: true,
        }
    }
}

impl NewPatient {
    /// Create a payload with the required fields set.
    pub fn new(nombre: String, apellido: String, fecha_nacimiento: String) -> Self {
        Self {
            nombre,
            apellido,
            fecha_nacimiento,
            ..Self::default()
        }
    }
}

impl Validate for NewPatient {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("nombre", &self.nombre)?;
        require_text("apellido", &self.apellido)?;
        require_date("fecha_nacimiento", &self.fecha_nacimiento)?;
        Ok(())
    }
}

/// A patient together with its dependent collections, as returned by the
/// detail view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientDetails {
    #[serde(flatten)]
    pub paciente: Patient,
    pub citas: Vec<Appointment>,
    pub tratamientos: Vec<Treatment>,
    pub medicamentos: Vec<Medication>,
}

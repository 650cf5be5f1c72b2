//! Clinica Core Library
//!
//! Patient-centric clinical records: a patient is the root of a one-to-many
//! graph of appointments (citas), treatments (tratamientos) and medications
//! (medicamentos), stored in SQLite.
//!
//! # Architecture
//!
//! ```text
//! Creation Wizard / Read Screens (client layer)
//!                      │
//!                      ▼
//!      ClinicService (validate → persist → typed errors)
//!                      │
//!                      ▼
//!          Database (rusqlite repository)
//!                      │
//!        pacientes ────┼──── citas
//!                      ├──── tratamientos
//!                      └──── medicamentos
//! ```
//!
//! # Core Principle
//!
//! **No dependent record may reference a missing patient id at any observable
//! point.** Child inserts check the parent and write within one atomic
//! statement, so a concurrently deleted patient can never leave an orphan.
//!
//! # Modules
//!
//! - [`db`]: SQLite database layer (schema + per-entity queries)
//! - [`models`]: Domain types (Patient, Appointment, Treatment, Medication)
//! - [`service`]: Domain service with the caller-facing error taxonomy

pub mod db;
pub mod models;
pub mod service;

// Re-export commonly used types
pub use db::{Database, DbError, DbResult};
pub use models::{
    Appointment, AppointmentStatus, Medication, NewAppointment, NewMedication, NewPatient,
    NewTreatment, PagedResult, Patient, PatientDetails, PatientFilter, Sex, Treatment, Validate,
    ValidationError,
};
pub use service::{ClinicService, ServiceError, ServiceResult};

//! Domain models for the clinica system.

mod appointment;
mod medication;
mod patient;
mod query;
mod treatment;
mod validate;

pub use appointment::*;
pub use medication::*;
pub use patient::*;
pub use query::*;
pub use treatment::*;
pub use validate::*;

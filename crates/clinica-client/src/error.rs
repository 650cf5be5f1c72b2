//! Client-side error taxonomy.

use clinica_core::{ServiceError, ValidationError};
use thiserror::Error;

/// Errors surfaced to the client layer (wizard, pager, FFI).
#[derive(Error, Debug)]
pub enum ClientError {
    /// A required field is missing or malformed. Nothing was persisted.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The targeted record id does not resolve.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// A dependent record was submitted against a patient id that does not
    /// exist.
    #[error("patient {id} does not exist")]
    UnknownPatient { id: i64 },

    /// The call is not valid in the session's current state.
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    /// A submission is already running on this session.
    #[error("a request is already in flight")]
    RequestInFlight,

    #[error("storage error: {0}")]
    Storage(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl From<ServiceError> for ClientError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(e) => ClientError::Validation(e),
            ServiceError::NotFound { entity, id } => ClientError::NotFound { entity, id },
            ServiceError::UnknownPatient { id } => ClientError::UnknownPatient { id },
            ServiceError::Storage(e) => ClientError::Storage(e.to_string()),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for ClientError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        ClientError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_mapping() {
        let err = ClientError::from(ServiceError::UnknownPatient { id: 7 });
        assert!(matches!(err, ClientError::UnknownPatient { id: 7 }));

        let err = ClientError::from(ServiceError::NotFound {
            entity: "cita",
            id: 3,
        });
        assert_eq!(err.to_string(), "cita 3 not found");
    }

    #[test]
    fn test_validation_display_passthrough() {
        let err = ClientError::from(ServiceError::Validation(ValidationError::new(
            "nombre", "required",
        )));
        assert_eq!(err.to_string(), "invalid nombre: required");
    }

    #[test]
    fn test_poison_error_becomes_storage() {
        let mutex = std::sync::Mutex::new(());
        let _ = std::thread::scope(|s| {
            s.spawn(|| {
                let _guard = mutex.lock().unwrap();
                panic!("poison");
            })
            .join()
        });
        let err: ClientError = mutex.lock().unwrap_err().into();
        assert!(matches!(err, ClientError::Storage(_)));
    }
}

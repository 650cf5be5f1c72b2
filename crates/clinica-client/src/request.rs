//! Request lifecycle state for asynchronous-feeling UI flows.

/// Lifecycle of a single tracked request.
///
/// A screen binds to this to decide what to render: a spinner while
/// `Loading`, the value once `Loaded`, a retryable message once `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState<T> {
    /// No request has been issued yet.
    #[default]
    Idle,
    /// A request is running. New submissions must be rejected until it
    /// settles.
    Loading,
    /// The last request succeeded.
    Loaded(T),
    /// The last request failed with a display message.
    Failed(String),
}

impl<T> RequestState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    /// The settled value, if the last request succeeded.
    pub fn value(&self) -> Option<&T> {
        match self {
            RequestState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// The failure message, if the last request failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// Mark a request as started.
    pub fn begin(&mut self) {
        *self = RequestState::Loading;
    }

    /// Settle the running request with a value.
    pub fn settle_ok(&mut self, value: T) {
        *self = RequestState::Loaded(value);
    }

    /// Settle the running request with a failure message.
    pub fn settle_err(&mut self, msg: impl Into<String>) {
        *self = RequestState::Failed(msg.into());
    }
}

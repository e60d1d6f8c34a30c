//! Errors raised at the component boundary.

#[cfg(feature = "no_std")]
use alloc::string::String;

/// Reasons an argument crossing the component boundary is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidArgument {
    #[error("missing first argument on component instantiation")]
    MissingArgument,
    #[error("invalid argument passed, first argument must be an object")]
    NotAnObject,
    #[error("missing view method on component definition")]
    MissingView,
    #[error("invalid props argument, props must be an object")]
    InvalidProps,
}

/// A failure reported by a user controller.
///
/// Returned synchronously from a controller it propagates to the caller as
/// [`ComponentError::Controller`]. Delivered through a deferred result it is
/// only ever seen by the definition's `on_controller_error` hook.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("controller failed: {message}")]
pub struct ControllerError {
    message: String,
}

impl ControllerError {
    /// A failure carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors surfaced synchronously by component construction and invocation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComponentError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
    #[error(transparent)]
    Controller(#[from] ControllerError),
}

impl ComponentError {
    /// Whether this is a boundary validation failure.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

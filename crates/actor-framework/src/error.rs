//! # Framework Errors
//!
//! Common error types shared by every actor and client. Remote failures get their own
//! taxonomy so the user-facing message can be chosen in one place.

/// Failure talking to the remote source of truth.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RemoteError {
    /// Connection refused, DNS failure or timeout.
    #[error("Remote unreachable: {0}")]
    Unreachable(String),
    /// The remote answered with a non-2xx status.
    #[error("Remote returned {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body could not be decoded.
    #[error("Invalid remote payload: {0}")]
    Decode(String),
}

impl RemoteError {
    /// Short, user-facing text for transient notifications.
    pub fn user_message(&self) -> &'static str {
        match self {
            RemoteError::Unreachable(_) => {
                "Could not reach the server. Check that the backend is running."
            }
            RemoteError::Status { status: 400, .. } => "Invalid data. Check the form fields.",
            _ => "An unexpected error occurred.",
        }
    }
}

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    pub fn entity<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        FrameworkError::EntityError(Box::new(error))
    }

    /// Recover the entity's own error type, handing back anything else untouched.
    pub fn into_entity<E: std::error::Error + 'static>(self) -> Result<E, FrameworkError> {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(error) => Ok(*error),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("boom")]
    struct Boom;

    #[test]
    fn test_into_entity_recovers_original_type() {
        let err = FrameworkError::entity(Boom);
        assert_eq!(err.into_entity::<Boom>().unwrap(), Boom);
    }

    #[test]
    fn test_into_entity_passes_other_variants_through() {
        let err = FrameworkError::NotFound("x".into());
        assert!(matches!(
            err.into_entity::<Boom>(),
            Err(FrameworkError::NotFound(id)) if id == "x"
        ));

        let foreign = FrameworkError::entity(std::io::Error::other("io"));
        assert!(matches!(
            foreign.into_entity::<Boom>(),
            Err(FrameworkError::EntityError(_))
        ));
    }

    #[test]
    fn test_user_messages() {
        assert!(RemoteError::Unreachable("refused".into())
            .user_message()
            .contains("backend is running"));
        let bad_request = RemoteError::Status {
            status: 400,
            message: String::new(),
        };
        assert!(bad_request.user_message().contains("form fields"));
        let server = RemoteError::Status {
            status: 500,
            message: String::new(),
        };
        assert_eq!(server.user_message(), "An unexpected error occurred.");
    }
}

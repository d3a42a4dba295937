use serde::{Deserialize, Serialize};

pub mod charset;
pub mod password_generation;
pub mod request;
pub mod response;

pub use charset::{CharacterClass, ClassSelection};
pub use request::{GenerationRequest, RawLength};
pub use response::{FormInput, FormOutput};

/// An error from validating or fulfilling a generation request.
///
/// Both kinds are recoverable: the user corrects the input and tries again. The `Display`
/// implementation is the user-facing message.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(ErrorRepr);

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match &self.0 {
            ErrorRepr::InvalidLength(problem) => ErrorKind::InvalidLength(*problem),
            ErrorRepr::EmptyCharacterPool => ErrorKind::EmptyCharacterPool,
        }
    }
}

impl From<ErrorRepr> for Error {
    fn from(err: ErrorRepr) -> Error {
        Error(err)
    }
}

#[derive(Debug, thiserror::Error)]
enum ErrorRepr {
    #[error(transparent)]
    InvalidLength(LengthProblem),
    #[error("Select at least one character set.")]
    EmptyCharacterPool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    InvalidLength(LengthProblem),
    EmptyCharacterPool,
}

impl ErrorKind {
    /// The tag used for this kind at the form host boundary.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidLength(_) => "InvalidLength",
            ErrorKind::EmptyCharacterPool => "EmptyCharacterPool",
        }
    }
}

/// Why a requested length was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum LengthProblem {
    #[error("Required")]
    Missing,
    #[error("Must be a number")]
    NotANumber,
    #[error("Must be a whole number")]
    NotAnInteger,
    #[error("Must be at least {} characters", request::MIN_LENGTH)]
    TooShort,
    #[error("Must be at most {} characters", request::MAX_LENGTH)]
    TooLong,
}

/// A generated password.
#[derive(Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Secret(String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters (not bytes).
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_tags() {
        let err = Error::from(ErrorRepr::InvalidLength(LengthProblem::TooShort));
        assert_eq!(err.kind(), ErrorKind::InvalidLength(LengthProblem::TooShort));
        assert_eq!(err.kind().as_str(), "InvalidLength");
        assert_eq!(err.to_string(), "Must be at least 8 characters");

        let err = Error::from(ErrorRepr::EmptyCharacterPool);
        assert_eq!(err.kind().as_str(), "EmptyCharacterPool");
        assert_eq!(err.to_string(), "Select at least one character set.");
    }

    #[test]
    fn secret_debug_does_not_leak() {
        let secret = Secret::from("hunter2hunter2".to_owned());
        assert!(!format!("{secret:?}").contains("hunter2"));
        assert_eq!(secret.len(), 14);
        assert_eq!(serde_json::to_string(&secret).unwrap(), "\"hunter2hunter2\"");
    }
}

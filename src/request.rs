//! Validation of what the user asked for.

use serde::{Deserialize, Serialize};

use crate::charset::ClassSelection;
use crate::{Error, ErrorRepr, LengthProblem};

pub const MIN_LENGTH: usize = 8;
pub const MAX_LENGTH: usize = 20;

/// A length as the form host received it: typed into a text field, or already a number.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawLength {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<&str> for RawLength {
    fn from(s: &str) -> RawLength {
        RawLength::Text(s.to_owned())
    }
}

impl From<String> for RawLength {
    fn from(s: String) -> RawLength {
        RawLength::Text(s)
    }
}

impl From<i64> for RawLength {
    fn from(n: i64) -> RawLength {
        RawLength::Integer(n)
    }
}

impl From<f64> for RawLength {
    fn from(n: f64) -> RawLength {
        RawLength::Float(n)
    }
}

/// A request whose length is known to be in bounds.
///
/// The class selection is carried as-is; an empty selection is only rejected once a pool is
/// built from it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GenerationRequest {
    length: usize,
    classes: ClassSelection,
}

impl GenerationRequest {
    pub fn new(length: usize, classes: ClassSelection) -> Result<GenerationRequest, Error> {
        let length = check_bounds(length).map_err(ErrorRepr::InvalidLength)?;
        Ok(GenerationRequest { length, classes })
    }

    /// Validate a raw length, normalizing it to an integer within
    /// [`MIN_LENGTH`]..=[`MAX_LENGTH`].
    pub fn validate(raw: &RawLength, classes: ClassSelection) -> Result<GenerationRequest, Error> {
        let length = validate_length(raw).map_err(|problem| {
            log::debug!("rejected length {raw:?}: {problem}");
            ErrorRepr::InvalidLength(problem)
        })?;
        Ok(GenerationRequest { length, classes })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn classes(&self) -> &ClassSelection {
        &self.classes
    }
}

/// Check a raw length on its own, as a form does while the user is still typing.
pub fn validate_length(raw: &RawLength) -> Result<usize, LengthProblem> {
    match raw {
        RawLength::Integer(n) => check_signed_bounds(*n),
        RawLength::Float(n) => check_float(*n),
        RawLength::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(LengthProblem::Missing);
            }
            if let Ok(n) = text.parse::<i64>() {
                return check_signed_bounds(n);
            }
            match text.parse::<f64>() {
                Ok(n) => check_float(n),
                Err(_) => Err(LengthProblem::NotANumber),
            }
        }
    }
}

fn check_float(n: f64) -> Result<usize, LengthProblem> {
    if !n.is_finite() || n.fract() != 0.0 {
        return Err(LengthProblem::NotAnInteger);
    }
    if n < MIN_LENGTH as f64 {
        Err(LengthProblem::TooShort)
    } else if n > MAX_LENGTH as f64 {
        Err(LengthProblem::TooLong)
    } else {
        Ok(n as usize)
    }
}

fn check_signed_bounds(n: i64) -> Result<usize, LengthProblem> {
    match usize::try_from(n) {
        Ok(n) => check_bounds(n),
        Err(_) => Err(LengthProblem::TooShort),
    }
}

fn check_bounds(n: usize) -> Result<usize, LengthProblem> {
    if n < MIN_LENGTH {
        Err(LengthProblem::TooShort)
    } else if n > MAX_LENGTH {
        Err(LengthProblem::TooLong)
    } else {
        Ok(n)
    }
}

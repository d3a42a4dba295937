//! The call boundary between a form host and the generator.

use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};

use crate::charset::ClassSelection;
use crate::password_generation::generate;
use crate::request::{GenerationRequest, RawLength};
use crate::{Error, Secret};

/// What a form host collected from the user.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FormInput {
    pub length: RawLength,
    #[serde(default = "ClassSelection::none")]
    pub classes: ClassSelection,
}

/// What a form host should display.
#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FormOutput {
    Generated {
        ok: TrueTag,
        password: Secret,
    },
    Failed {
        ok: FalseTag,
        #[serde(rename = "errorKind")]
        error_kind: String,
        message: String,
    },
}

/// Serializes as `true`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TrueTag;

/// Serializes as `false`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FalseTag;

macro_rules! bool_tag {
    ($ty:ident, $value:literal) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_bool($value)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<$ty, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                if bool::deserialize(deserializer)? == $value {
                    Ok($ty)
                } else {
                    Err(serde::de::Error::custom(format!(
                        "expected `ok` to be {}",
                        $value
                    )))
                }
            }
        }
    };
}

bool_tag!(TrueTag, true);
bool_tag!(FalseTag, false);

impl FormOutput {
    pub fn is_ok(&self) -> bool {
        matches!(self, FormOutput::Generated { .. })
    }

    pub fn password(&self) -> Option<&Secret> {
        match self {
            FormOutput::Generated { password, .. } => Some(password),
            FormOutput::Failed { .. } => None,
        }
    }
}

impl From<Result<Secret, Error>> for FormOutput {
    fn from(result: Result<Secret, Error>) -> FormOutput {
        match result {
            Ok(password) => FormOutput::Generated { ok: TrueTag, password },
            Err(err) => FormOutput::Failed {
                ok: FalseTag,
                error_kind: err.kind().as_str().to_owned(),
                message: err.to_string(),
            },
        }
    }
}

/// Validate the input, then generate. Generation only starts once validation has passed.
pub fn handle<R>(rng: &mut R, input: &FormInput) -> FormOutput
where
    R: Rng + CryptoRng,
{
    GenerationRequest::validate(&input.length, input.classes)
        .and_then(|request| generate(rng, &request))
        .into()
}

//! Character classes, and the pool built from a selection of them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

static LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
static UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
static NUMBERS: &str = "0123456789";
static SYMBOLS: &str = "!@#$%^&*()_+[]{}|;:,.<>?";

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CharacterClass {
    Lowercase,
    Uppercase,
    Numbers,
    Symbols,
}

impl CharacterClass {
    /// Every class, in the order their alphabets are concatenated into a pool.
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Lowercase,
        CharacterClass::Uppercase,
        CharacterClass::Numbers,
        CharacterClass::Symbols,
    ];

    pub fn alphabet(self) -> &'static str {
        match self {
            CharacterClass::Lowercase => LOWERCASE,
            CharacterClass::Uppercase => UPPERCASE,
            CharacterClass::Numbers => NUMBERS,
            CharacterClass::Symbols => SYMBOLS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CharacterClass::Lowercase => "lowercase",
            CharacterClass::Uppercase => "uppercase",
            CharacterClass::Numbers => "numbers",
            CharacterClass::Symbols => "symbols",
        }
    }

    /// Label for a checkbox offering this class.
    pub fn label(self) -> &'static str {
        match self {
            CharacterClass::Lowercase => "Include Lowercase",
            CharacterClass::Uppercase => "Include Uppercase",
            CharacterClass::Numbers => "Include Numbers",
            CharacterClass::Symbols => "Include Symbols",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown character class {0:?}")]
pub struct UnknownCharacterClass(String);

impl FromStr for CharacterClass {
    type Err = UnknownCharacterClass;

    fn from_str(s: &str) -> Result<CharacterClass, UnknownCharacterClass> {
        match s {
            "lowercase" | "lowerCase" => Ok(CharacterClass::Lowercase),
            "uppercase" | "upperCase" => Ok(CharacterClass::Uppercase),
            "numbers" | "digits" => Ok(CharacterClass::Numbers),
            "symbols" => Ok(CharacterClass::Symbols),
            _ => Err(UnknownCharacterClass(s.to_owned())),
        }
    }
}

/// Which character classes are switched on.
///
/// The default is the form's initial state: lowercase only. Keys missing from a serialized
/// selection are off.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClassSelection {
    #[serde(default, alias = "lowerCase")]
    lowercase: bool,
    #[serde(default, alias = "upperCase")]
    uppercase: bool,
    #[serde(default, alias = "digits")]
    numbers: bool,
    #[serde(default)]
    symbols: bool,
}

impl Default for ClassSelection {
    fn default() -> ClassSelection {
        ClassSelection::none().with(CharacterClass::Lowercase)
    }
}

impl ClassSelection {
    pub fn none() -> ClassSelection {
        ClassSelection {
            lowercase: false,
            uppercase: false,
            numbers: false,
            symbols: false,
        }
    }

    pub fn all() -> ClassSelection {
        ClassSelection {
            lowercase: true,
            uppercase: true,
            numbers: true,
            symbols: true,
        }
    }

    pub fn with(mut self, class: CharacterClass) -> ClassSelection {
        self.enable(class);
        self
    }

    fn flag_mut(&mut self, class: CharacterClass) -> &mut bool {
        match class {
            CharacterClass::Lowercase => &mut self.lowercase,
            CharacterClass::Uppercase => &mut self.uppercase,
            CharacterClass::Numbers => &mut self.numbers,
            CharacterClass::Symbols => &mut self.symbols,
        }
    }

    pub fn contains(&self, class: CharacterClass) -> bool {
        match class {
            CharacterClass::Lowercase => self.lowercase,
            CharacterClass::Uppercase => self.uppercase,
            CharacterClass::Numbers => self.numbers,
            CharacterClass::Symbols => self.symbols,
        }
    }

    pub fn enable(&mut self, class: CharacterClass) {
        *self.flag_mut(class) = true;
    }

    pub fn disable(&mut self, class: CharacterClass) {
        *self.flag_mut(class) = false;
    }

    pub fn toggle(&mut self, class: CharacterClass) {
        let flag = self.flag_mut(class);
        *flag = !*flag;
    }

    pub fn is_empty(&self) -> bool {
        self.enabled().next().is_none()
    }

    /// The enabled classes, in canonical order.
    pub fn enabled(&self) -> impl Iterator<Item = CharacterClass> + '_ {
        CharacterClass::ALL
            .into_iter()
            .filter(move |class| self.contains(*class))
    }
}

impl FromIterator<CharacterClass> for ClassSelection {
    fn from_iter<I: IntoIterator<Item = CharacterClass>>(iter: I) -> ClassSelection {
        let mut selection = ClassSelection::none();
        for class in iter {
            selection.enable(class);
        }
        selection
    }
}

/// Concatenate the alphabets of every enabled class.
///
/// The result depends only on which classes are enabled, never on the order they were enabled
/// in.
pub fn build_pool(selection: &ClassSelection) -> Vec<char> {
    let mut pool = Vec::new();
    for class in selection.enabled() {
        pool.extend(class.alphabet().chars());
    }
    pool
}

//! The interactive password form.

use anyhow::Context;
use console::style;
use dialoguer::theme::ColorfulTheme;

use passgen::password_generation::generate;
use passgen::request::validate_length;
use passgen::{CharacterClass, ClassSelection, GenerationRequest, RawLength, Secret};

use crate::config::Config;
use crate::ProgError;

/// Everything the form holds between rounds.
struct FormState {
    length: String,
    classes: ClassSelection,
    last_password: Option<Secret>,
}

impl FormState {
    fn new(config: &Config) -> FormState {
        FormState {
            length: config.length_text(),
            classes: config.classes,
            last_password: None,
        }
    }

    /// Keep the outcome of a round. A failed round leaves the previous password in place.
    fn record(
        &mut self,
        result: Result<Secret, passgen::Error>,
    ) -> Result<&Secret, passgen::Error> {
        let password = result?;
        Ok(self.last_password.insert(password))
    }

    /// Back to the configured defaults, with no password shown.
    fn reset(&mut self, config: &Config) {
        *self = FormState::new(config);
    }

    /// What can be done after a round; copying needs something to copy.
    fn actions(&self) -> Vec<Action> {
        if self.last_password.is_some() {
            vec![Action::GenerateAgain, Action::Copy, Action::Reset, Action::Quit]
        } else {
            vec![Action::GenerateAgain, Action::Reset, Action::Quit]
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Action {
    GenerateAgain,
    Copy,
    Reset,
    Quit,
}

impl Action {
    fn label(self) -> &'static str {
        match self {
            Action::GenerateAgain => "Generate",
            Action::Copy => "Copy to clipboard",
            Action::Reset => "Reset",
            Action::Quit => "Quit",
        }
    }
}

pub(crate) fn run_form(config: &Config) -> Result<(), ProgError> {
    let theme = ColorfulTheme::default();
    let mut state = FormState::new(config);
    let mut rng = rand::thread_rng();

    eprintln!("{}", style("Password Generator").bold());
    'form: loop {
        state.length = prompt_length(&theme, &state.length)?;
        state.classes = prompt_classes(&theme, &state.classes)?;

        // The prompt only accepts a valid length, so this cannot fail on the length.
        let length = RawLength::from(state.length.as_str());
        let request = GenerationRequest::validate(&length, state.classes)?;
        match state.record(generate(&mut rng, &request)) {
            Ok(password) => {
                eprintln!("{}", style("Generated Password").bold());
                println!("{}", style(password.as_str()).green());
                eprintln!("{} Password generated!", style("Success:").green().bold());
            }
            Err(err) => {
                eprintln!("{} {}", style("Error:").red().bold(), err);
            }
        }

        loop {
            match prompt_action(&theme, &state.actions())? {
                Action::GenerateAgain => continue 'form,
                Action::Copy => {
                    if let Some(password) = &state.last_password {
                        crate::clipboard::send_to_clipboard(password.as_str().as_bytes())?;
                        eprintln!("Copied to the clipboard.");
                    }
                }
                Action::Reset => {
                    state.reset(config);
                    eprintln!("Form reset.");
                    continue 'form;
                }
                Action::Quit => return Ok(()),
            }
        }
    }
}

fn prompt_length(theme: &ColorfulTheme, initial: &str) -> Result<String, ProgError> {
    let length = dialoguer::Input::<String>::with_theme(theme)
        .with_prompt("Password Length (8-20)")
        .with_initial_text(initial)
        .allow_empty(true)
        .validate_with(|text: &String| {
            validate_length(&RawLength::from(text.as_str())).map(|_| ())
        })
        .interact_text()
        .context("failed to read the password length")?;
    Ok(length)
}

fn prompt_classes(
    theme: &ColorfulTheme,
    current: &ClassSelection,
) -> Result<ClassSelection, ProgError> {
    let labels = CharacterClass::ALL.map(CharacterClass::label);
    let checked = CharacterClass::ALL.map(|class| current.contains(class));
    let selected = dialoguer::MultiSelect::with_theme(theme)
        .with_prompt("Character sets")
        .items(&labels)
        .defaults(&checked)
        .interact_opt()
        .context("failed to query your selection")?
        .ok_or(ProgError::FormClosed)?;
    Ok(selected
        .into_iter()
        .map(|index| CharacterClass::ALL[index])
        .collect())
}

fn prompt_action(theme: &ColorfulTheme, actions: &[Action]) -> Result<Action, ProgError> {
    let labels = actions.iter().map(|action| action.label()).collect::<Vec<_>>();
    let selection = dialoguer::Select::with_theme(theme)
        .items(&labels)
        .default(0)
        .interact_opt()
        .context("failed to prompt you, somehow")?;
    Ok(selection.map_or(Action::Quit, |index| actions[index]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed_round() -> Result<Secret, passgen::Error> {
        let request = GenerationRequest::new(12, ClassSelection::none()).unwrap();
        generate(&mut rand::thread_rng(), &request)
    }

    #[test]
    fn starts_from_config() {
        let config = Config {
            length: RawLength::Integer(16),
            classes: ClassSelection::all(),
            source: None,
        };
        let state = FormState::new(&config);
        assert_eq!(state.length, "16");
        assert_eq!(state.classes, ClassSelection::all());
        assert!(state.last_password.is_none());
    }

    #[test]
    fn copy_is_offered_once_there_is_a_password() {
        let mut state = FormState::new(&Config::default());
        assert_eq!(
            state.actions(),
            vec![Action::GenerateAgain, Action::Reset, Action::Quit]
        );

        assert!(state.record(failed_round()).is_err());
        assert!(!state.actions().contains(&Action::Copy));

        let password = Secret::from("abcdefgh".to_owned());
        assert_eq!(state.record(Ok(password.clone())).unwrap(), &password);
        assert!(state.actions().contains(&Action::Copy));
    }

    #[test]
    fn failed_round_keeps_previous_password() {
        let mut state = FormState::new(&Config::default());
        let password = Secret::from("abcdefgh".to_owned());
        state.record(Ok(password.clone())).unwrap();
        assert!(state.record(failed_round()).is_err());
        assert_eq!(state.last_password.as_ref(), Some(&password));
    }

    #[test]
    fn reset_restores_defaults_and_clears_password() {
        let config = Config::default();
        let mut state = FormState::new(&config);
        state.length = "20".to_owned();
        state.classes = ClassSelection::all();
        state.record(Ok(Secret::from("abcdefgh".to_owned()))).unwrap();

        state.reset(&config);
        assert_eq!(state.length, config.length_text());
        assert_eq!(state.classes, config.classes);
        assert!(state.last_password.is_none());
        assert!(!state.actions().contains(&Action::Copy));
    }
}

//! Non-interactive generation.

use std::io::{self, Read, Write};

use anyhow::Context;

use passgen::password_generation;
use passgen::response::{self, FormInput};
use passgen::{CharacterClass, ClassSelection, GenerationRequest, RawLength};

use crate::config::Config;
use crate::ProgError;

/// Upper bound on `--count`.
pub(crate) const MAX_COUNT: u32 = 1_000_000;

pub(crate) struct Options {
    pub(crate) length: Option<String>,
    pub(crate) lowercase: bool,
    pub(crate) uppercase: bool,
    pub(crate) numbers: bool,
    pub(crate) symbols: bool,
    pub(crate) count: u32,
    pub(crate) copy: bool,
}

impl Options {
    /// The classes asked for on the command line, or the configured ones if none were.
    fn classes(&self, config: &Config) -> ClassSelection {
        let flags = [
            (CharacterClass::Lowercase, self.lowercase),
            (CharacterClass::Uppercase, self.uppercase),
            (CharacterClass::Numbers, self.numbers),
            (CharacterClass::Symbols, self.symbols),
        ];
        let selection = flags
            .into_iter()
            .filter(|(_, on)| *on)
            .map(|(class, _)| class)
            .collect::<ClassSelection>();
        if selection.is_empty() {
            config.classes
        } else {
            selection
        }
    }
}

/// Write `options.count` passwords to `output`, one per line, as they are generated.
pub(crate) fn generate(
    options: Options,
    config: &Config,
    mut output: impl Write,
) -> Result<(), ProgError> {
    let classes = options.classes(config);
    let request = match options.length.as_deref() {
        Some(length) => GenerationRequest::validate(&RawLength::from(length), classes)?,
        None => GenerationRequest::validate(&config.length, classes)
            .map_err(|err| ProgError::BadConfig(config.describe_source(), err))?,
    };

    let mut rng = rand::thread_rng();
    let mut copied = options.copy.then(String::new);
    for _ in 0..options.count {
        let password = password_generation::generate(&mut rng, &request)?;
        writeln!(output, "{}", password.as_str()).context("failed to write the password")?;
        if let Some(copied) = copied.as_mut() {
            if !copied.is_empty() {
                copied.push('\n');
            }
            copied.push_str(password.as_str());
        }
    }
    output.flush().context("failed to write the password")?;

    if let Some(copied) = copied {
        crate::clipboard::send_to_clipboard(copied.as_bytes())?;
        eprintln!("Copied to the clipboard.");
    }
    Ok(())
}

/// Answer one form submission read from stdin.
///
/// A rejected submission is still a successful call: the outcome is in the JSON written out.
pub(crate) fn call() -> Result<(), ProgError> {
    let mut submission = String::new();
    io::stdin()
        .read_to_string(&mut submission)
        .context("failed to read the form submission from stdin")?;
    let input: FormInput =
        serde_json::from_str(&submission).context("failed to parse the form submission")?;

    let output = response::handle(&mut rand::thread_rng(), &input);
    if let response::FormOutput::Failed { message, .. } = &output {
        log::info!("form submission rejected: {message}");
    }

    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, &output).context("failed to write the result as JSON")?;
    writeln!(stdout).context("failed to write to stdout")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Options {
        Options {
            length: None,
            lowercase: false,
            uppercase: false,
            numbers: false,
            symbols: false,
            count: 1,
            copy: false,
        }
    }

    #[test]
    fn flags_override_configured_classes() {
        let config = Config::default();
        assert_eq!(options().classes(&config), ClassSelection::default());

        let mut opts = options();
        opts.symbols = true;
        opts.numbers = true;
        assert_eq!(
            opts.classes(&config),
            ClassSelection::none()
                .with(CharacterClass::Numbers)
                .with(CharacterClass::Symbols)
        );
    }

    /// Counts lines without keeping them.
    #[derive(Default)]
    struct LineCounter {
        lines: usize,
        bytes: usize,
    }

    impl Write for LineCounter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.lines += buf.iter().filter(|b| **b == b'\n').count();
            self.bytes += buf.len();
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn large_counts_are_streamed() {
        let mut opts = options();
        opts.length = Some("8".to_owned());
        opts.count = 200_000;
        let mut counter = LineCounter::default();
        generate(opts, &Config::default(), &mut counter).unwrap();
        assert_eq!(counter.lines, 200_000);
        assert_eq!(counter.bytes, 200_000 * 9);
    }

    #[test]
    fn one_password_per_line() {
        let mut opts = options();
        opts.length = Some("10".to_owned());
        opts.numbers = true;
        opts.count = 3;
        let mut out = Vec::new();
        generate(opts, &Config::default(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert!(lines
            .iter()
            .all(|line| line.len() == 10 && line.chars().all(|ch| ch.is_ascii_digit())));
    }

    #[test]
    fn bad_configured_length_names_the_config() {
        let config = Config {
            length: RawLength::Integer(4),
            ..Config::default()
        };
        match generate(options(), &config, io::sink()) {
            Err(ProgError::BadConfig(_, err)) => {
                assert_eq!(err.to_string(), "Must be at least 8 characters")
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn bad_length_flag_is_a_generation_error() {
        let mut opts = options();
        opts.length = Some("abc".to_owned());
        assert!(matches!(
            generate(opts, &Config::default(), io::sink()),
            Err(ProgError::Generation(_))
        ));
    }
}

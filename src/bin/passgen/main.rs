use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;

mod clipboard;
mod config;
mod form;
mod oneshot;

#[derive(Parser)]
#[command(about = "Generate random passwords from a choice of character classes.")]
enum Args {
    /// Fill in the password form interactively.
    Form {
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Generate passwords without prompting.
    Generate {
        /// Password length, from 8 to 20. Defaults to the configured length.
        #[arg(long, short, allow_hyphen_values = true)]
        length: Option<String>,
        /// Include lowercase letters.
        #[arg(long)]
        lowercase: bool,
        /// Include uppercase letters.
        #[arg(long)]
        uppercase: bool,
        /// Include digits.
        #[arg(long)]
        numbers: bool,
        /// Include symbols.
        #[arg(long)]
        symbols: bool,
        /// How many passwords to generate, at most 1000000.
        #[arg(
            long,
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(1..=oneshot::MAX_COUNT as i64),
        )]
        count: u32,
        /// Also copy the result to the clipboard.
        #[arg(long)]
        copy: bool,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Read a form submission as JSON on stdin, and write the outcome as JSON to stdout.
    Call,
}

fn run() -> Result<(), ProgError> {
    let args = Args::parse();

    match args {
        Args::Form { config } => {
            let config = config::load(config)?;
            form::run_form(&config)?;
        }
        Args::Generate {
            length,
            lowercase,
            uppercase,
            numbers,
            symbols,
            count,
            copy,
            config,
        } => {
            let config = config::load(config)?;
            let options = oneshot::Options {
                length,
                lowercase,
                uppercase,
                numbers,
                symbols,
                count,
                copy,
            };
            oneshot::generate(options, &config, io::stdout().lock())?;
        }
        Args::Call => oneshot::call()?,
    }

    Ok(())
}

fn main() {
    env_logger::init();

    match run() {
        Ok(()) => (),
        Err(ProgError::Other(err)) => {
            eprintln!("{err:?}");
            process::exit(1);
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum ProgError {
    #[error("{0}")]
    Generation(passgen::Error),
    #[error("Form closed; exiting.")]
    FormClosed,
    #[error("Invalid configuration in {0}: {1}")]
    BadConfig(PathBuf, #[source] passgen::Error),
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for ProgError {
    fn from(err: anyhow::Error) -> ProgError {
        ProgError::Other(err)
    }
}

impl From<passgen::Error> for ProgError {
    fn from(err: passgen::Error) -> ProgError {
        ProgError::Generation(err)
    }
}

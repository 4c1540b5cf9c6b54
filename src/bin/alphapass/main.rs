use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use alphapass::{AlphabetBuilder, CharSet, Generator, GeneratorError};
use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod report;
mod table;

/// Generate a cryptographically random password.
///
/// Characters are drawn uniformly from the alphabet built out of the requested character classes.
/// Duplicate characters are not allowed in the final alphabet.
#[derive(Parser)]
#[command(
    version,
    after_help = "Examples:\n    \
        alphapass -l 32 -LUDS\n        \
            a password of length 32 with lowercase and uppercase letters, digits, and special \
            characters.\n    \
        echo -n ABCDEF | alphapass -DA\n        \
            a 64 digit hexadecimal string (256 bits).\n    \
        alphapass -t hex\n        \
            the same as above."
)]
struct Args {
    /// Length of the resulting password.
    #[arg(short, long, default_value_t = 64)]
    length: usize,
    /// Include lowercase letters a-z.
    #[arg(short = 'L', long)]
    lower: bool,
    /// Include uppercase letters A-Z.
    #[arg(short = 'U', long)]
    upper: bool,
    /// Include digits 0-9.
    #[arg(short = 'D', long)]
    digits: bool,
    /// Include special characters: the printable ASCII characters, excluding letters, digits, and
    /// the space.
    #[arg(short = 'S', long)]
    special: bool,
    /// Read additional characters from standard input, encoded in UTF-8; newline characters will
    /// NOT be ignored.
    #[arg(short = 'A', long)]
    additional: bool,
    /// Use a predefined character set.
    #[arg(
        short = 't',
        long = "type",
        value_enum,
        value_name = "NAME",
        conflicts_with_all = ["lower", "upper", "digits", "special"]
    )]
    charset: Option<CharSet>,
    /// Don't print a newline after the password.
    #[arg(short = 'n', long)]
    no_newline: bool,
    /// Print more information, in addition to the generated password.
    #[arg(short, long)]
    verbose: bool,
    /// Output format.
    #[arg(long, value_enum, default_value_t = report::Format::Text)]
    format: report::Format,
    /// A file to be used as an alternate source of randomness. Don't use this unless you know
    /// what you're doing.
    #[arg(short, long, value_name = "PATH")]
    random_source: Option<PathBuf>,
}

fn run() -> Result<(), ProgError> {
    let args = Args::parse();

    let mut builder = AlphabetBuilder::new()
        .charset(args.charset)
        .lower(args.lower)
        .upper(args.upper)
        .digits(args.digits)
        .special(args.special);
    if args.additional {
        builder = builder.additional(&read_additional_chars(io::stdin().lock()));
    }
    let alphabet = builder.build();
    if alphabet.is_empty() {
        return Err(ProgError::NothingIncluded);
    }

    let generator = Generator::new(alphabet, args.length)?;
    let source: Box<dyn Read> = match args.random_source.as_ref() {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open {}", path.display()))?;
            tracing::warn!(path = %path.display(), "reading entropy from a file instead of the OS");
            Box::new(file)
        }
        None => Box::new(alphapass::OsEntropy::default()),
    };
    let mut generator = generator.with_random_source(source);

    let generated = generator.generate()?;
    let report = report::Report {
        password: generated.password,
        length: generator.length(),
        alphabet_size: generator.alphabet().len(),
        bits: generator.bits_of_complexity(),
        bytes_read: generated.bytes_read,
    };
    let options = report::Options {
        format: args.format,
        verbose: args.verbose,
        newline: !args.no_newline,
    };
    report::write_report(&report, &options, io::stdout().lock())?;
    Ok(())
}

/// Read extra alphabet characters as UTF-8, replacing invalid sequences with U+FFFD.
///
/// A read error is only a warning: whatever was read before it is still used.
fn read_additional_chars(mut input: impl Read) -> String {
    let mut bytes = Vec::new();
    if let Err(err) = input.read_to_end(&mut bytes) {
        tracing::warn!(
            read = bytes.len(),
            "cannot read all additional characters from standard input; using what was read: {err}"
        );
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .without_time()
        .init();
}

fn main() {
    setup_tracing();
    match run() {
        Ok(()) => (),
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum ProgError {
    #[error(
        "No characters included in password; cannot generate.\n\
         Did you forget to enable one of the character types?"
    )]
    NothingIncluded,
    #[error("Cannot create new password generator: {0}")]
    Config(#[source] GeneratorError),
    #[error("Cannot generate password: {0}")]
    Generate(#[source] GeneratorError),
    #[error("{0:#}")]
    Other(anyhow::Error),
}

impl From<GeneratorError> for ProgError {
    fn from(err: GeneratorError) -> ProgError {
        if err.is_configuration_error() {
            ProgError::Config(err)
        } else {
            ProgError::Generate(err)
        }
    }
}

impl From<anyhow::Error> for ProgError {
    fn from(err: anyhow::Error) -> ProgError {
        ProgError::Other(err)
    }
}

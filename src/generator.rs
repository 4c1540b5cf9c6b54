//! Generating passwords from an arbitrary alphabet.

use std::collections::HashMap;
use std::io::{self, Read};

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{Pow, ToPrimitive};

use crate::entropy::{self, EntropyCounter, OsEntropy};
use crate::Secret;

/// Generates passwords of a fixed length by sampling an alphabet uniformly at random.
///
/// Rather than drawing a symbol at a time, the whole password is drawn as a single random integer
/// below `alphabet.len() ^ length`, which is then written out in base `alphabet.len()`. That keeps
/// the amount of entropy consumed close to the strength of the password.
#[derive(Debug)]
pub struct Generator<R = OsEntropy> {
    alphabet: Vec<char>,
    length: usize,
    source: R,
}

impl Generator {
    /// Create a generator reading entropy from the operating system's CSPRNG.
    ///
    /// Fails if the alphabet is empty, or contains the same character more than once.
    pub fn new(
        alphabet: impl Into<Vec<char>>,
        length: usize,
    ) -> Result<Generator, GeneratorError> {
        let alphabet = alphabet.into();
        check_alphabet(&alphabet)?;
        tracing::debug!(alphabet_size = alphabet.len(), length, "created password generator");
        Ok(Generator {
            alphabet,
            length,
            source: OsEntropy::default(),
        })
    }
}

impl<R: Read> Generator<R> {
    /// Replace the source of entropy used to generate passwords.
    ///
    /// Passwords are only as unpredictable as this source. Anything other than a cryptographically
    /// secure random source makes the generated passwords insecure; this exists for testing, and
    /// for people who know exactly what they are feeding it.
    pub fn with_random_source<S: Read>(self, source: S) -> Generator<S> {
        tracing::debug!("replaced the entropy source of the password generator");
        Generator {
            alphabet: self.alphabet,
            length: self.length,
            source,
        }
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// The number of distinct passwords this generator can produce.
    pub fn max_combinations(&self) -> BigUint {
        Pow::pow(BigUint::from(self.alphabet.len()), self.length)
    }

    /// The strength of generated passwords in bits, rounded up to a whole bit.
    pub fn bits_of_complexity(&self) -> u64 {
        (self.max_combinations() - 1u32).bits()
    }

    /// Generate a password.
    ///
    /// Along with the password, the number of bytes read from the entropy source is returned;
    /// that count includes any draws that had to be rejected.
    pub fn generate(&mut self) -> Result<Generated, GeneratorError> {
        if self.length == 0 {
            return Ok(Generated {
                password: Secret::from(String::new()),
                bytes_read: 0,
            });
        }
        if self.alphabet.is_empty() {
            return Err(GeneratorError::EmptyAlphabet);
        }

        let max = self.max_combinations();
        let mut source = EntropyCounter::new(&mut self.source);
        let mut num = match entropy::random_below(&mut source, &max) {
            Ok(n) => n,
            Err(err) => {
                return Err(GeneratorError::EntropyUnavailable {
                    bytes_read: source.count(),
                    source: err,
                })
            }
        };
        let bytes_read = source.count();

        // Digits come out least significant first, so fill from the back: the password then
        // follows the same order as the bytes read from the source.
        let base = BigUint::from(self.alphabet.len());
        let mut chars = vec!['\0'; self.length];
        for slot in chars.iter_mut().rev() {
            let (quotient, digit) = num.div_rem(&base);
            // `digit < base`, and `base` came from a `usize`.
            let digit = digit
                .to_usize()
                .expect("a remainder is always smaller than the alphabet size");
            *slot = self.alphabet[digit];
            num = quotient;
        }

        tracing::debug!(length = self.length, bytes_read, "generated password");
        Ok(Generated {
            password: Secret::from(chars.into_iter().collect::<String>()),
            bytes_read,
        })
    }
}

/// A freshly generated password.
#[derive(Debug)]
pub struct Generated {
    pub password: Secret,
    /// Bytes consumed from the entropy source to produce `password`.
    pub bytes_read: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("the alphabet is empty; there are no characters to generate a password from")]
    EmptyAlphabet,
    #[error(
        "duplicate character {symbol:?} in alphabet at offset {duplicate_index}; already found at \
         offset {first_index}"
    )]
    DuplicateSymbol {
        symbol: char,
        first_index: usize,
        duplicate_index: usize,
    },
    #[error("cannot get random data (after reading {bytes_read} bytes): {source}")]
    EntropyUnavailable {
        bytes_read: usize,
        #[source]
        source: io::Error,
    },
}

impl GeneratorError {
    /// Whether this error comes from how the generator was configured, as opposed to a failure
    /// while generating.
    pub fn is_configuration_error(&self) -> bool {
        match self {
            GeneratorError::EmptyAlphabet | GeneratorError::DuplicateSymbol { .. } => true,
            GeneratorError::EntropyUnavailable { .. } => false,
        }
    }
}

fn check_alphabet(alphabet: &[char]) -> Result<(), GeneratorError> {
    if alphabet.is_empty() {
        return Err(GeneratorError::EmptyAlphabet);
    }
    let mut seen = HashMap::with_capacity(alphabet.len());
    for (idx, &ch) in alphabet.iter().enumerate() {
        if let Some(&first_index) = seen.get(&ch) {
            return Err(GeneratorError::DuplicateSymbol {
                symbol: ch,
                first_index,
                duplicate_index: idx,
            });
        }
        seen.insert(ch, idx);
    }
    Ok(())
}

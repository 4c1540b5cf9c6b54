//! Cryptographically secure passwords drawn from an arbitrary alphabet.
//!
//! ```no_run
//! use alphapass::{charset, Generator};
//!
//! let mut generator = Generator::new(charset::HEX.chars().collect::<Vec<_>>(), 64)?;
//! assert_eq!(generator.bits_of_complexity(), 256);
//! let generated = generator.generate()?;
//! println!("{}", generated.password.as_str());
//! # Ok::<(), alphapass::GeneratorError>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod charset;
pub mod entropy;
mod generator;

pub use charset::{AlphabetBuilder, CharSet};
pub use entropy::{EntropyCounter, OsEntropy, RngSource};
pub use generator::{Generated, Generator, GeneratorError};

/// Password text, kept out of `Debug` output.
#[derive(Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Secret(String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s)
    }
}

//! Character classes and predefined character sets for building alphabets.

use std::fmt;

pub static LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
pub static UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub static DIGITS: &str = "0123456789";
/// The printable ASCII characters, minus letters, digits, and the space.
pub static SPECIAL: &str = "`~!@#$%^&*()-=_+[]{}\\|;:'\"/?<>,.";

pub static BASE58: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
pub static BASE64: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz+/";
pub static URL: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-._~";
pub static HEX: &str = "0123456789ABCDEF";
pub static OCTAL: &str = "01234567";
pub static BINARY: &str = "01";

/// A predefined, self-contained character set.
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum CharSet {
    Base64,
    Base58,
    Url,
    Hex,
    Octal,
    Binary,
}

impl CharSet {
    pub fn chars(self) -> &'static str {
        match self {
            CharSet::Base64 => BASE64,
            CharSet::Base58 => BASE58,
            CharSet::Url => URL,
            CharSet::Hex => HEX,
            CharSet::Octal => OCTAL,
            CharSet::Binary => BINARY,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CharSet::Base64 => "base64",
            CharSet::Base58 => "base58",
            CharSet::Url => "url",
            CharSet::Hex => "hex",
            CharSet::Octal => "octal",
            CharSet::Binary => "binary",
        }
    }
}

impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Flattens the requested character classes into a single ordered alphabet.
///
/// The order is fixed regardless of the order the builder methods are called in: the predefined
/// set, lowercase, uppercase, digits, special characters, and finally any additional characters.
/// Duplicates are kept; it's up to [`crate::Generator::new`] to reject them.
#[derive(Clone, Debug, Default)]
pub struct AlphabetBuilder {
    charset: Option<CharSet>,
    lower: bool,
    upper: bool,
    digits: bool,
    special: bool,
    additional: Vec<char>,
}

impl AlphabetBuilder {
    pub fn new() -> AlphabetBuilder {
        AlphabetBuilder::default()
    }

    pub fn charset(mut self, charset: Option<CharSet>) -> AlphabetBuilder {
        self.charset = charset;
        self
    }

    pub fn lower(mut self, include: bool) -> AlphabetBuilder {
        self.lower = include;
        self
    }

    pub fn upper(mut self, include: bool) -> AlphabetBuilder {
        self.upper = include;
        self
    }

    pub fn digits(mut self, include: bool) -> AlphabetBuilder {
        self.digits = include;
        self
    }

    pub fn special(mut self, include: bool) -> AlphabetBuilder {
        self.special = include;
        self
    }

    /// Append arbitrary characters, e.g. letters from other scripts or emoji.
    pub fn additional(mut self, chars: &str) -> AlphabetBuilder {
        self.additional.extend(chars.chars());
        self
    }

    pub fn build(self) -> Vec<char> {
        let mut abc = Vec::new();
        if let Some(charset) = self.charset {
            abc.extend(charset.chars().chars());
        }
        let classes = [
            (self.lower, LOWER),
            (self.upper, UPPER),
            (self.digits, DIGITS),
            (self.special, SPECIAL),
        ];
        for (included, chars) in classes {
            if included {
                abc.extend(chars.chars());
            }
        }
        abc.extend(self.additional);
        abc
    }
}

#[cfg(test)]
mod tests {
    use super::{AlphabetBuilder, CharSet};

    #[test]
    fn predefined_sets_have_no_duplicates() {
        for (charset, size) in [
            (CharSet::Base64, 64),
            (CharSet::Base58, 58),
            (CharSet::Url, 66),
            (CharSet::Hex, 16),
            (CharSet::Octal, 8),
            (CharSet::Binary, 2),
        ] {
            assert_eq!(charset.chars().chars().count(), size, "{charset}");
            assert!(crate::Generator::new(charset.chars().chars().collect::<Vec<_>>(), 1).is_ok());
        }
    }

    #[test]
    fn special_is_printable_ascii_punctuation() {
        assert_eq!(super::SPECIAL.len(), 32);
        assert!(super::SPECIAL.chars().all(|c| c.is_ascii_punctuation()));
    }

    #[test]
    fn classes_come_out_in_a_fixed_order() {
        let abc = AlphabetBuilder::new()
            .additional("é")
            .digits(true)
            .lower(true)
            .build();
        let expected = format!("{}{}é", super::LOWER, super::DIGITS);
        assert_eq!(abc.into_iter().collect::<String>(), expected);
    }

    #[test]
    fn charset_comes_first_and_duplicates_survive() {
        let abc = AlphabetBuilder::new()
            .charset(Some(CharSet::Hex))
            .additional("abcdef")
            .digits(true)
            .build();
        assert_eq!(abc.len(), 16 + 10 + 6);
        assert_eq!(&abc[..2], &['0', '1']);
        assert_eq!(abc[16], '0');
    }

    #[test]
    fn nothing_requested_is_empty() {
        assert!(AlphabetBuilder::new().build().is_empty());
    }
}

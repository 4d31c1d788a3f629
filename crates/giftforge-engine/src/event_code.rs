//! Join codes identifying an event.

use std::fmt;
use std::str::FromStr;

use giftforge_core::{GiftForgeError, Result};
use rand::Rng;

/// Characters used in generated codes. Omits 0, O, 1 and I.
pub const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Length of generated codes.
pub const CODE_LENGTH: usize = 8;

const MAX_PARSED_LENGTH: usize = 12;

/// Short code participants use to join an event.
///
/// # Example
///
/// ```
/// use giftforge_engine::event_code::{EventCode, CODE_LENGTH};
///
/// let code = EventCode::generate(&mut rand::rng());
/// assert_eq!(code.as_str().len(), CODE_LENGTH);
///
/// let typed = EventCode::parse(" xmas-24 ").unwrap();
/// assert_eq!(typed.as_str(), "XMAS-24");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventCode(String);

impl EventCode {
    /// Draws a fresh code from [`ALPHABET`].
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..CODE_LENGTH)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        Self(code)
    }

    /// Normalizes a typed code: trimmed and upper-cased.
    ///
    /// Accepts up to 12 ASCII letters, digits or dashes.
    pub fn parse(input: &str) -> Result<Self> {
        let code = input.trim().to_ascii_uppercase();
        if code.is_empty()
            || code.len() > MAX_PARSED_LENGTH
            || !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(GiftForgeError::UnknownEvent(input.trim().to_string()));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EventCode {
    type Err = GiftForgeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_generated_codes_use_alphabet() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..100 {
            let code = EventCode::generate(&mut rng);
            assert_eq!(code.as_str().len(), CODE_LENGTH);
            assert!(code.as_str().bytes().all(|b| ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_parse_normalizes() {
        let code: EventCode = "  abcd2345 ".parse().unwrap();
        assert_eq!(code, EventCode::parse("ABCD2345").unwrap());
        assert_eq!(code.to_string(), "ABCD2345");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(EventCode::parse("").is_err());
        assert!(EventCode::parse("   ").is_err());
        assert!(EventCode::parse("HAS SPACE").is_err());
        assert!(EventCode::parse("WAYTOOLONGCODE").is_err());
    }
}

use std::str::FromStr;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// The passcode gating the application: an ordered sequence of symbols.
///
/// An empty sequence means no secret is configured. Symbols may repeat.
/// The backing memory is wiped on drop.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Secret {
    symbols: Vec<String>,
}

impl Secret {
    pub fn new(symbols: Vec<String>) -> Self {
        Self { symbols }
    }

    /// The "no secret configured" value.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Compare against a candidate without short-circuiting on the first
    /// differing symbol. Length mismatch returns early.
    pub fn matches(&self, candidate: &Secret) -> bool {
        if self.symbols.len() != candidate.symbols.len() {
            return false;
        }
        let mut diff = 0u8;
        for (a, b) in self.symbols.iter().zip(candidate.symbols.iter()) {
            diff |= bytes_diff(a.as_bytes(), b.as_bytes());
        }
        diff == 0
    }
}

fn bytes_diff(a: &[u8], b: &[u8]) -> u8 {
    let mut diff = (a.len() != b.len()) as u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff
}

impl From<Vec<String>> for Secret {
    fn from(symbols: Vec<String>) -> Self {
        Self::new(symbols)
    }
}

/// One symbol per character: `"1234"` becomes `["1", "2", "3", "4"]`.
impl FromStr for Secret {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.chars().map(|c| c.to_string()).collect()))
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secret")
            .field("len", &self.symbols.len())
            .field("symbols", &"[REDACTED]")
            .finish()
    }
}

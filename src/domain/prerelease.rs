//! Pre-release identifier handling for semantic versioning
//!
//! A pre-release is a dot-separated sequence of identifiers, each either
//! numeric or alphanumeric. According to semver.org: https://semver.org/#spec-item-9

use crate::error::{MinverError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A single pre-release identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// Numeric identifier, compared numerically (e.g. "0" in "alpha.0")
    Numeric(u64),
    /// Numeric identifier too large for `u64`, kept as its digits
    LargeNumeric(String),
    /// Alphanumeric identifier, compared lexically (e.g. "alpha")
    Text(String),
}

impl Identifier {
    /// Classify an identifier that has already passed semver validation
    fn classify(s: &str) -> Self {
        if s.chars().all(|c| c.is_ascii_digit()) {
            match s.parse::<u64>() {
                Ok(n) => Identifier::Numeric(n),
                Err(_) => Identifier::LargeNumeric(s.to_string()),
            }
        } else {
            Identifier::Text(s.to_string())
        }
    }

    fn is_numeric(&self) -> bool {
        !matches!(self, Identifier::Text(_))
    }

    /// Advance a numeric identifier by `height`; text is returned unchanged
    fn advanced(&self, height: u32) -> Self {
        match self {
            Identifier::Numeric(n) => match n.checked_add(u64::from(height)) {
                Some(sum) => Identifier::Numeric(sum),
                None => Identifier::LargeNumeric(add_decimal(&n.to_string(), height)),
            },
            Identifier::LargeNumeric(digits) => Identifier::LargeNumeric(add_decimal(digits, height)),
            Identifier::Text(_) => self.clone(),
        }
    }
}

/// Add `n` to a decimal digit string of arbitrary length
fn add_decimal(digits: &str, n: u32) -> String {
    let mut carry = u64::from(n);
    let mut out: Vec<u8> = Vec::with_capacity(digits.len() + 1);
    for b in digits.bytes().rev() {
        let sum = u64::from(b - b'0') + carry % 10;
        carry = carry / 10 + sum / 10;
        out.push(b'0' + (sum % 10) as u8);
    }
    while carry > 0 {
        out.push(b'0' + (carry % 10) as u8);
        carry /= 10;
    }
    out.iter().rev().map(|&b| char::from(b)).collect()
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        // numeric identifiers always have lower precedence than alphanumeric ones
        match (self, other) {
            (Identifier::Numeric(a), Identifier::Numeric(b)) => a.cmp(b),
            // no leading zeros, so a longer digit string is the larger number
            (Identifier::LargeNumeric(a), Identifier::LargeNumeric(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (Identifier::Numeric(_), Identifier::LargeNumeric(_)) => Ordering::Less,
            (Identifier::LargeNumeric(_), Identifier::Numeric(_)) => Ordering::Greater,
            (Identifier::Text(a), Identifier::Text(b)) => a.cmp(b),
            (_, Identifier::Text(_)) => Ordering::Less,
            (Identifier::Text(_), _) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{}", n),
            Identifier::LargeNumeric(s) | Identifier::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Ordered sequence of pre-release identifiers
///
/// An empty sequence denotes a release version. Ordering is element-wise,
/// and a sequence that is a strict prefix of another sorts lower.
///
/// # Examples
/// - "alpha.0" -> [Text("alpha"), Numeric(0)]
/// - "rc.1.2" -> [Text("rc"), Numeric(1), Numeric(2)]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PreReleaseIdentifiers {
    identifiers: Vec<Identifier>,
}

impl PreReleaseIdentifiers {
    /// The empty sequence, i.e. a release
    pub fn empty() -> Self {
        PreReleaseIdentifiers {
            identifiers: Vec::new(),
        }
    }

    /// Parse a dot-separated pre-release, e.g. "preview.0"
    ///
    /// # Returns
    /// * `Ok(PreReleaseIdentifiers)` - Parsed, non-empty sequence
    /// * `Err` - If the text is empty, has empty identifiers, invalid
    ///   characters or numeric identifiers with leading zeros
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(MinverError::version("Empty pre-release identifiers"));
        }

        Self::parse_lenient(s).ok_or_else(|| {
            MinverError::version(format!("Invalid pre-release identifiers: '{}'", s))
        })
    }

    /// Parse without producing an error, used on the tag parsing hot path
    pub(crate) fn parse_lenient(s: &str) -> Option<Self> {
        semver::Prerelease::new(s).ok()?;

        let identifiers = s.split('.').map(Identifier::classify).collect();

        Some(PreReleaseIdentifiers { identifiers })
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    pub fn identifiers(&self) -> &[Identifier] {
        &self.identifiers
    }

    /// Append the height as a trailing numeric identifier
    ///
    /// `alpha.0` with height 3 becomes `alpha.0.3`.
    pub fn with_height(&self, height: u32) -> Self {
        let mut identifiers = self.identifiers.clone();
        identifiers.push(Identifier::Numeric(u64::from(height)));
        PreReleaseIdentifiers { identifiers }
    }

    /// Merge a height into an existing pre-release sequence
    ///
    /// - empty: `default` with the height appended
    /// - trailing numeric identifier: that counter advanced by `height`
    /// - trailing alphanumeric identifier: the height appended
    pub fn merge(&self, height: u32, default: &PreReleaseIdentifiers) -> Self {
        match self.identifiers.split_last() {
            None => default.with_height(height),
            Some((last, rest)) if last.is_numeric() => {
                let mut identifiers = rest.to_vec();
                identifiers.push(last.advanced(height));
                PreReleaseIdentifiers { identifiers }
            }
            Some(_) => self.with_height(height),
        }
    }
}

impl Default for PreReleaseIdentifiers {
    /// The baseline scheme used when no tag is found: `alpha.0`
    fn default() -> Self {
        PreReleaseIdentifiers {
            identifiers: vec![Identifier::Text("alpha".to_string()), Identifier::Numeric(0)],
        }
    }
}

impl FromStr for PreReleaseIdentifiers {
    type Err = MinverError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PreReleaseIdentifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, identifier) in self.identifiers.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", identifier)?;
        }
        Ok(())
    }
}

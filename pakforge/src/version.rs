//! Version label parsing and basis-chain derivation.
//!
//! Parses version labels in the form `v{major}.{minor}.{patch}`, optionally
//! followed by a prerelease suffix `-{channel}{NN}`:
//!
//! - `v1.2.3` (release)
//! - `v2.0.0-a05` (prerelease, channel "a", number 5)
//!
//! Every numeric field must be written canonically: re-rendering the parsed
//! value must reproduce the matched substring exactly, so `v01.0.0` and
//! `v1.2.03` are rejected even though they parse numerically. The prerelease
//! number is rendered zero-padded to two digits (`-a05`, `-rc12`, `-a123`).
//!
//! A parsed [`VersionSpec`] also knows which lower-precision baseline
//! packages an export of it would layer on top of; see
//! [`VersionSpec::basis_chain`].

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

/// Prerelease component of a version label.
///
/// A version is either fully release (no prerelease component) or fully
/// prerelease (channel and number both present); the `Option<Prerelease>`
/// on [`VersionSpec`] makes the all-or-nothing rule structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prerelease {
    /// Short lowercase channel tag (e.g. "a", "b", "rc").
    pub channel: String,
    /// Sequence number within the channel, rendered zero-padded to width 2.
    pub number: u32,
}

/// A validated, decomposed version label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionSpec {
    /// Major version number.
    pub major: u32,
    /// Minor version number.
    pub minor: u32,
    /// Patch version number.
    pub patch: u32,
    /// Prerelease component, absent for release versions.
    pub prerelease: Option<Prerelease>,
}

/// Numeric field of a version label, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    /// The major version number.
    Major,
    /// The minor version number.
    Minor,
    /// The patch version number.
    Patch,
    /// The prerelease sequence number.
    Prerelease,
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericField::Major => write!(f, "major version number"),
            NumericField::Minor => write!(f, "minor version number"),
            NumericField::Patch => write!(f, "patch version number"),
            NumericField::Prerelease => write!(f, "prerelease number"),
        }
    }
}

/// Error parsing a version label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Label doesn't match the version grammar.
    MalformedLabel,
    /// A numeric field is not written canonically (e.g. leading zeros).
    NonCanonicalNumber {
        /// Which field failed the round-trip check.
        field: NumericField,
        /// The value the field parsed to.
        parsed: u32,
        /// The substring the field was parsed from.
        raw: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MalformedLabel => write!(f, "failed to parse version label"),
            ParseError::NonCanonicalNumber { field, parsed, raw } => {
                write!(f, "incorrect number format in {} ({} != {})", field, parsed, raw)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Get the version label regex.
///
/// Pattern: `v<major>.<minor>.<patch>` with an optional `-<channel><NN>`
/// prerelease suffix.
///
/// We capture:
/// - Group 1: major (decimal integer)
/// - Group 2: minor (decimal integer)
/// - Group 3: patch (decimal integer)
/// - Group 4: prerelease channel (lowercase letters)
/// - Group 5: prerelease number (at least 2 digits)
fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^v(\d+)\.(\d+)\.(\d+)(?:-([a-z]+)(\d{2,}))?$").unwrap()
    })
}

/// Extract a numeric field and enforce the canonical round-trip rule.
///
/// The matched substring must re-render exactly from the parsed value;
/// this rejects leading zeros. Values that overflow the field width do not
/// belong to the supported grammar and report as malformed.
fn canonical_u32(raw: &str, field: NumericField) -> Result<u32, ParseError> {
    let value: u32 = raw.parse().map_err(|_| ParseError::MalformedLabel)?;
    if value.to_string() != raw {
        return Err(ParseError::NonCanonicalNumber {
            field,
            parsed: value,
            raw: raw.to_string(),
        });
    }
    Ok(value)
}

/// Parse a version label into a [`VersionSpec`].
///
/// Pure and side-effect free; used both for live input validation and for
/// the final validation before an export.
///
/// # Examples
///
/// ```
/// use pakforge::version::parse_version_label;
///
/// let version = parse_version_label("v1.2.3").unwrap();
/// assert_eq!(version.major, 1);
/// assert_eq!(version.minor, 2);
/// assert_eq!(version.patch, 3);
/// assert!(version.prerelease.is_none());
///
/// let version = parse_version_label("v2.0.0-a05").unwrap();
/// let pre = version.prerelease.unwrap();
/// assert_eq!(pre.channel, "a");
/// assert_eq!(pre.number, 5);
/// ```
pub fn parse_version_label(label: &str) -> Result<VersionSpec, ParseError> {
    let captures = version_pattern()
        .captures(label)
        .ok_or(ParseError::MalformedLabel)?;

    let major = canonical_u32(captures.get(1).unwrap().as_str(), NumericField::Major)?;
    let minor = canonical_u32(captures.get(2).unwrap().as_str(), NumericField::Minor)?;
    let patch = canonical_u32(captures.get(3).unwrap().as_str(), NumericField::Patch)?;

    let prerelease = match (captures.get(4), captures.get(5)) {
        (Some(channel), Some(number)) => {
            let raw = number.as_str();
            let value: u32 = raw.parse().map_err(|_| ParseError::MalformedLabel)?;
            // Prerelease numbers render zero-padded to width 2, so the
            // round-trip comparison uses the padded form.
            if format!("{:02}", value) != raw {
                return Err(ParseError::NonCanonicalNumber {
                    field: NumericField::Prerelease,
                    parsed: value,
                    raw: raw.to_string(),
                });
            }
            Some(Prerelease {
                channel: channel.as_str().to_string(),
                number: value,
            })
        }
        _ => None,
    };

    Ok(VersionSpec {
        major,
        minor,
        patch,
        prerelease,
    })
}

impl VersionSpec {
    /// Create a release version.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
        }
    }

    /// Create a prerelease version.
    pub fn new_prerelease(
        major: u32,
        minor: u32,
        patch: u32,
        channel: impl Into<String>,
        number: u32,
    ) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: Some(Prerelease {
                channel: channel.into(),
                number,
            }),
        }
    }

    /// Check if this is a prerelease version.
    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    /// Derive the chain of basis packages an export of this version layers
    /// on top of.
    ///
    /// Basis versions are always release versions, even when derived from a
    /// prerelease: a prerelease participates in the chain logic as a leaf
    /// but never serves as a basis itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use pakforge::version::VersionSpec;
    ///
    /// let chain = VersionSpec::new(1, 2, 3).basis_chain();
    /// assert_eq!(chain.major_basis, Some(VersionSpec::new(1, 0, 0)));
    /// assert_eq!(chain.minor_basis, Some(VersionSpec::new(1, 2, 0)));
    ///
    /// let chain = VersionSpec::new(2, 0, 0).basis_chain();
    /// assert!(chain.is_empty());
    /// ```
    pub fn basis_chain(&self) -> BasisChain {
        let major_basis =
            (self.minor > 0 || self.patch > 0).then(|| VersionSpec::new(self.major, 0, 0));
        let minor_basis = (self.minor > 0 && self.patch > 0)
            .then(|| VersionSpec::new(self.major, self.minor, 0));
        BasisChain {
            major_basis,
            minor_basis,
        }
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}{:02}", pre.channel, pre.number)?;
        }
        Ok(())
    }
}

impl FromStr for VersionSpec {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_version_label(s)
    }
}

/// The lower-precision baseline packages required by a patch export.
///
/// Derived from a [`VersionSpec`], never stored. The minor basis implies the
/// major basis; a version with `minor == 0 && patch == 0` has no basis at
/// all and exports as a full package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasisChain {
    /// The `{major}.0.0` baseline, present whenever `minor > 0 || patch > 0`.
    pub major_basis: Option<VersionSpec>,
    /// The `{major}.{minor}.0` baseline, present only when both
    /// `minor > 0 && patch > 0`.
    pub minor_basis: Option<VersionSpec>,
}

impl BasisChain {
    /// Check whether the chain is empty (the version is its own root).
    pub fn is_empty(&self) -> bool {
        self.major_basis.is_none()
    }

    /// The required basis versions in layering order: major basis first,
    /// then the minor basis if present. The build tool applies patches in
    /// this sequence, so the order is part of the contract.
    pub fn ordered(&self) -> Vec<&VersionSpec> {
        self.major_basis
            .iter()
            .chain(self.minor_basis.iter())
            .collect()
    }
}

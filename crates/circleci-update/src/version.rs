//! Version parsing and normalization

use semver::Version;

use crate::error::ParseError;

/// Parse a strict semantic version.
///
/// A leading `v` (as used in release tags) is accepted.
pub fn parse_version(raw: &str) -> Result<Version, ParseError> {
    let normalized = raw.strip_prefix('v').unwrap_or(raw);

    Version::parse(normalized).map_err(|source| ParseError {
        raw: raw.to_string(),
        source,
    })
}

/// Parse a package-manager version that may carry a revision suffix.
///
/// Homebrew appends formula revisions with an underscore, so `1.2.3` at
/// revision 4 is reported as `1.2.3_4`, which is not valid semver. The first
/// underscore is rewritten to `-`, turning the revision into a pre-release
/// tag (`1.2.3-4`). Later underscores are left alone.
pub fn parse_revision_version(raw: &str) -> Result<Version, ParseError> {
    let with_revision_as_tag = raw.replacen('_', "-", 1);

    parse_version(&with_revision_as_tag).map_err(|err| ParseError {
        raw: raw.to_string(),
        source: err.source,
    })
}

/// True for the zero version, which stands in for an unknown current version
pub fn is_unset(version: &Version) -> bool {
    version.major == 0
        && version.minor == 0
        && version.patch == 0
        && version.pre.is_empty()
        && version.build.is_empty()
}

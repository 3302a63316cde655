//! Test fixture loading helpers

use std::path::PathBuf;

/// Get the path to the fixtures directory
fn fixtures_dir() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir).join("tests").join("fixtures")
}

/// Load a fixture file as a string
pub fn load_fixture(filename: &str) -> String {
    let path = fixtures_dir().join(filename);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture '{}': {}", path.display(), e))
}

/// `brew outdated --json=v2` output listing circleci
pub fn load_outdated_with_circleci() -> String {
    load_fixture("brew_outdated_v2.json")
}

/// `brew outdated --json=v2` output without circleci
pub fn load_outdated_without_circleci() -> String {
    load_fixture("brew_outdated_other.json")
}

/// GitHub releases listing, with `{{SERVER}}` replaced by `server_uri`
pub fn load_releases(server_uri: &str) -> String {
    load_fixture("github_releases.json").replace("{{SERVER}}", server_uri)
}

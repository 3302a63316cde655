//! Fake package manager executables
//!
//! Each helper writes a small shell script standing in for `brew`.

use std::fs;
use std::io::Write;
use std::path::Path;

fn write_script(path: &Path, script: &str) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(script.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms)?;
    }

    Ok(())
}

/// Script that prints `json` when called as `outdated --json=v2`
pub fn create_fake_brew(path: &Path, json: &str) -> std::io::Result<()> {
    let script = format!(
        r#"#!/bin/sh
if [ "$1" = "outdated" ] && [ "$2" = "--json=v2" ]; then
cat <<'JSON'
{}
JSON
    exit 0
fi
exit 2
"#,
        json
    );
    write_script(path, &script)
}

/// Script that fails the way brew does when it cannot reach its API
pub fn create_failing_brew(path: &Path) -> std::io::Result<()> {
    write_script(
        path,
        "#!/bin/sh\necho \"Error: Failed to download formula index\" >&2\nexit 1\n",
    )
}

/// Script that prints something that is not JSON
pub fn create_garbled_brew(path: &Path) -> std::io::Result<()> {
    write_script(path, "#!/bin/sh\necho \"==> Outdated Formulae\"\necho circleci\n")
}

/// Executable whose interpreter does not exist, so it cannot be started
pub fn create_unrunnable_brew(path: &Path) -> std::io::Result<()> {
    write_script(path, "#!/nonexistent/circleci-test-shell\nexit 0\n")
}

use crate::error::{CheckerError, Result};
use std::process::Command;
use tracing::debug;

/// Source of locally installed foreign packages
pub trait InstalledPackageLister {
    /// Installed packages as `(name, version)` pairs, in report order
    fn list_installed(&self) -> Result<Vec<(String, String)>>;
}

/// Lists foreign packages with `pacman -Qm`
#[derive(Debug, Clone)]
pub struct PacmanLister {
    program: String,
}

impl PacmanLister {
    pub fn new() -> Self {
        Self::with_program("pacman")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl InstalledPackageLister for PacmanLister {
    fn list_installed(&self) -> Result<Vec<(String, String)>> {
        get_installed_aur_packages(&self.program)
    }
}

/// Get all installed AUR packages (packages not in official repos)
pub fn get_installed_aur_packages(program: &str) -> Result<Vec<(String, String)>> {
    let output = Command::new(program)
        .args(["-Qm"])
        .output()
        .map_err(|e| CheckerError::PacmanFailed(format!("could not run {}: {}", program, e)))?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !output.status.success() {
        // pacman exits 1 without a message when there are no foreign packages
        if stderr.trim().is_empty() {
            debug!("{} -Qm returned {} with no output", program, output.status);
            return Ok(Vec::new());
        }
        return Err(CheckerError::PacmanFailed(stderr.trim().to_string()));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let packages = parse_package_list(&stdout);
    debug!("Found {} foreign packages", packages.len());

    Ok(packages)
}

/// Parse `name version` lines as printed by `pacman -Q`
pub fn parse_package_list(output: &str) -> Vec<(String, String)> {
    output
        .lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() >= 2 {
                Some((parts[0].to_string(), parts[1].to_string()))
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    fn fake_pacman(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("pacman");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn lister(path: &Path) -> PacmanLister {
        PacmanLister::with_program(path.to_string_lossy())
    }

    #[test]
    fn test_lists_foreign_packages() {
        let tmp = tempfile::tempdir().unwrap();
        let pacman = fake_pacman(
            tmp.path(),
            "[ \"$1\" = \"-Qm\" ] || exit 2\necho 'yay 12.4.2-1'\necho 'blueman 1.99.alpha1-2'",
        );

        assert_eq!(
            lister(&pacman).list_installed().unwrap(),
            vec![
                ("yay".to_string(), "12.4.2-1".to_string()),
                ("blueman".to_string(), "1.99.alpha1-2".to_string()),
            ]
        );
    }

    #[test]
    fn test_silent_failure_means_no_foreign_packages() {
        let tmp = tempfile::tempdir().unwrap();
        let pacman = fake_pacman(tmp.path(), "exit 1");

        assert!(lister(&pacman).list_installed().unwrap().is_empty());
    }

    #[test]
    fn test_failure_with_message_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let pacman = fake_pacman(
            tmp.path(),
            "echo 'error: failed to initialize alpm library' >&2\nexit 1",
        );

        match lister(&pacman).list_installed() {
            Err(CheckerError::PacmanFailed(msg)) => {
                assert_eq!(msg, "error: failed to initialize alpm library")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_pacman_is_an_error() {
        let result = PacmanLister::with_program("/nonexistent/pacman").list_installed();
        assert!(matches!(result, Err(CheckerError::PacmanFailed(_))));
    }

    #[test]
    fn test_parse_package_list() {
        let output = "blueman 1.99.alpha1-2\nsublime-text 2.0.2-3\n";
        assert_eq!(
            parse_package_list(output),
            vec![
                ("blueman".to_string(), "1.99.alpha1-2".to_string()),
                ("sublime-text".to_string(), "2.0.2-3".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let output = "\nlonely\nyay 12.4.2-1\n   \n";
        assert_eq!(
            parse_package_list(output),
            vec![("yay".to_string(), "12.4.2-1".to_string())]
        );
    }

    #[test]
    fn test_parse_keeps_order() {
        let names: Vec<String> = parse_package_list("zsh-foo 1-1\naaa 2-1\n")
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["zsh-foo", "aaa"]);
    }
}

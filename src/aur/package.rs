use crate::error::{CheckerError, Result};

/// Check that a package name is safe to embed in a URL path and a file name
pub fn validate_package_name(name: &str) -> Result<&str> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_whitespace);

    if invalid {
        return Err(CheckerError::InvalidPackageName(name.to_string()));
    }

    Ok(name)
}

/// Directory prefix the AUR uses for tarballs: the first two characters of the name
pub fn tarball_prefix(name: &str) -> &str {
    match name.char_indices().nth(2) {
        Some((idx, _)) => &name[..idx],
        None => name,
    }
}

/// File name a downloaded tarball is stored under
pub fn tarball_file_name(name: &str) -> String {
    format!("{}.tar.gz", name)
}

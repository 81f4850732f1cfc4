use regex::Regex;
use std::sync::LazyLock;

static DETAILS_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^.*Package Details:.*$").expect("Invalid details regex"));

static FIELD_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,<]").expect("Invalid separator regex"));

/// Position of the version among the separated fields of the details line.
///
/// For `\t<h2>Package Details: blueman 1.99.alpha1-2</h2>` the fields are
/// `["", "", "h2>Package", "Details:", "blueman", "1.99.alpha1-2", "/h2>"]`.
/// The index assumes exactly one indentation character before `<h2>`, as
/// the AUR page has it; any other indentation shifts the fields and yields
/// the wrong token.
const VERSION_FIELD: usize = 5;

/// Result of looking for the latest version on a package page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LatestVersion {
    Found(String),
    NotFound,
}

/// Extracts the latest published version from a package page
pub trait VersionParser {
    fn parse(&self, page: &str) -> LatestVersion;
}

/// Scrapes the `Package Details: <name> <version>` heading of the AUR web page
#[derive(Debug, Default, Clone, Copy)]
pub struct DetailsLineParser;

impl VersionParser for DetailsLineParser {
    fn parse(&self, page: &str) -> LatestVersion {
        extract_latest_version(page)
    }
}

pub fn extract_latest_version(page: &str) -> LatestVersion {
    let Some(line) = DETAILS_LINE.find(page) else {
        return LatestVersion::NotFound;
    };

    match FIELD_SEPARATOR.split(line.as_str()).nth(VERSION_FIELD) {
        Some(version) if !version.is_empty() => LatestVersion::Found(version.to_string()),
        _ => LatestVersion::NotFound,
    }
}

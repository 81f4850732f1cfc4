//! The update check pipeline.
//!
//! For every installed foreign package the checker fetches the AUR page,
//! extracts the published version, compares it with the installed one and
//! prints a status line. Outdated packages can then have their build
//! tarballs downloaded. Packages are processed one at a time and a failure
//! for one package never stops the others.

use crate::aur::download::{download_tarball, ensure_download_directory};
use crate::aur::{AurClient, DetailsLineParser, LatestVersion, VersionParser};
use crate::config::Config;
use crate::error::{CheckerError, Result};
use crate::pacman::{InstalledPackageLister, PacmanLister, VersionComparator, default_comparator};
use crate::ui;
use chrono::{DateTime, Local};
use std::cmp::Ordering;
use std::io::Write;
use tracing::{debug, warn};

/// Whether outdated packages get their tarballs downloaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    CheckOnly,
    Download,
}

/// Outcome of checking a single package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Installed version compared against the latest one
    Compared(Ordering),
    /// The AUR page has no version for this package
    NotFound,
    FetchFailed(String),
    CompareFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    pub name: String,
    pub installed_version: String,
    pub latest_version: Option<String>,
    pub status: CheckStatus,
    pub tarball_downloaded: bool,
}

impl PackageRecord {
    pub fn comparison(&self) -> Option<Ordering> {
        match self.status {
            CheckStatus::Compared(ordering) => Some(ordering),
            _ => None,
        }
    }

    /// A newer version than the installed one is published
    pub fn is_outdated(&self) -> bool {
        self.comparison() == Some(Ordering::Less)
    }

    pub fn is_failed(&self) -> bool {
        matches!(
            self.status,
            CheckStatus::FetchFailed(_) | CheckStatus::CompareFailed(_)
        )
    }
}

/// Records collected during one run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub records: Vec<PackageRecord>,
}

impl RunSummary {
    pub fn outdated(&self) -> impl Iterator<Item = &PackageRecord> {
        self.records.iter().filter(|r| r.is_outdated())
    }

    pub fn failed(&self) -> impl Iterator<Item = &PackageRecord> {
        self.records.iter().filter(|r| r.is_failed())
    }
}

/// Render the report line for one package
pub fn format_status_line(record: &PackageRecord) -> String {
    let latest = record.latest_version.as_deref().unwrap_or("?");
    let outcome = match &record.status {
        CheckStatus::Compared(Ordering::Equal) => "OK".to_string(),
        CheckStatus::Compared(Ordering::Less) => format!("new version available: {}", latest),
        CheckStatus::Compared(Ordering::Greater) => format!("newer version installed: {}", latest),
        CheckStatus::NotFound => "not found in AUR".to_string(),
        CheckStatus::FetchFailed(msg) => format!("lookup failed: {}", msg),
        CheckStatus::CompareFailed(msg) => format!("version comparison failed: {}", msg),
    };

    format!("{}: {} => {}", record.name, record.installed_version, outcome)
}

pub fn format_header(now: DateTime<Local>) -> String {
    format!("Checking latest versions ({})", now.format("%Y-%m-%d %H:%M:%S"))
}

pub fn format_completion(summary: &RunSummary) -> String {
    format!(
        "Done: {} checked, {} outdated, {} failed",
        summary.records.len(),
        summary.outdated().count(),
        summary.failed().count()
    )
}

pub struct Checker {
    config: Config,
    client: AurClient,
    lister: Box<dyn InstalledPackageLister>,
    comparator: Box<dyn VersionComparator>,
    parser: Box<dyn VersionParser>,
}

impl Checker {
    /// Checker backed by pacman, vercmp and the AUR web pages
    pub fn new(config: Config) -> Result<Self> {
        let client = AurClient::new(&config)?;

        Ok(Self {
            config,
            client,
            lister: Box::new(PacmanLister::new()),
            comparator: default_comparator(),
            parser: Box::new(DetailsLineParser),
        })
    }

    pub fn with_lister(mut self, lister: impl InstalledPackageLister + 'static) -> Self {
        self.lister = Box::new(lister);
        self
    }

    pub fn with_comparator(mut self, comparator: impl VersionComparator + 'static) -> Self {
        self.comparator = Box::new(comparator);
        self
    }

    pub fn with_parser(mut self, parser: impl VersionParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub fn list_installed_packages(&self) -> Result<Vec<(String, String)>> {
        self.lister.list_installed()
    }

    pub async fn fetch_package_page(&self, name: &str) -> Result<String> {
        self.client.fetch_package_page(name).await
    }

    pub fn extract_latest_version(&self, page: &str) -> LatestVersion {
        self.parser.parse(page)
    }

    pub fn compare_versions(&self, current: &str, latest: &str) -> Result<Ordering> {
        self.comparator.compare(current, latest)
    }

    pub fn ensure_download_directory(&self) -> Result<()> {
        ensure_download_directory(&self.config.build_dir)
    }

    /// Download the tarball of one package into the staging directory
    pub async fn download_tarball(&self, name: &str) -> Result<std::path::PathBuf> {
        download_tarball(&self.client, name, &self.config.build_dir).await
    }

    /// Fetch, extract and compare one package; errors end up in the record
    pub async fn check_package(&self, name: &str, installed_version: &str) -> PackageRecord {
        let mut record = PackageRecord {
            name: name.to_string(),
            installed_version: installed_version.to_string(),
            latest_version: None,
            status: CheckStatus::NotFound,
            tarball_downloaded: false,
        };

        let page = match self.fetch_package_page(name).await {
            Ok(page) => page,
            Err(CheckerError::PackageNotFound(_)) => {
                debug!("{} has no AUR page", name);
                return record;
            }
            Err(e) => {
                warn!("Failed to fetch {}: {}", name, e);
                record.status = CheckStatus::FetchFailed(e.to_string());
                return record;
            }
        };

        let latest = match self.extract_latest_version(&page) {
            LatestVersion::Found(version) => version,
            LatestVersion::NotFound => {
                debug!("No version line on the page of {}", name);
                return record;
            }
        };

        record.status = match self.compare_versions(installed_version, &latest) {
            Ok(ordering) => CheckStatus::Compared(ordering),
            Err(e) => {
                warn!("Failed to compare versions of {}: {}", name, e);
                CheckStatus::CompareFailed(e.to_string())
            }
        };
        record.latest_version = Some(latest);

        record
    }

    /// Check every installed package and report to `out`
    pub async fn run<W: Write>(&self, mode: RunMode, out: &mut W) -> Result<RunSummary> {
        let installed = self.list_installed_packages()?;
        let mut summary = RunSummary::default();

        writeln!(out, "{}", ui::section_header(&format_header(Local::now())))?;

        if installed.is_empty() {
            writeln!(out, "{}", ui::info("No foreign packages installed"))?;
        }

        for (name, installed_version) in &installed {
            let spinner = ui::spinner(&format!("Checking {}...", name));
            let record = self.check_package(name, installed_version).await;
            spinner.finish_and_clear();

            let line = format_status_line(&record);
            writeln!(out, "{}", ui::colorize_status(&record, &line))?;
            summary.records.push(record);
        }

        writeln!(out, "{}", ui::info(&format_completion(&summary)))?;

        if mode == RunMode::CheckOnly || summary.outdated().next().is_none() {
            return Ok(summary);
        }

        self.ensure_download_directory()?;
        writeln!(out, "{}", ui::section_header("Downloading tarballs"))?;

        for record in summary.records.iter_mut().filter(|r| r.is_outdated()) {
            let spinner = ui::spinner(&format!("Downloading {}...", record.name));
            let result = self.download_tarball(&record.name).await;
            spinner.finish_and_clear();

            match result {
                Ok(path) => {
                    record.tarball_downloaded = true;
                    let msg = format!("Downloaded {} to {}", record.name, path.display());
                    writeln!(out, "{}", ui::success(&msg))?;
                }
                Err(e) => {
                    warn!("Download of {} failed: {}", record.name, e);
                    let msg = format!("Download failed for {}: {}", record.name, e);
                    writeln!(out, "{}", ui::error(&msg))?;
                }
            }
        }

        Ok(summary)
    }
}

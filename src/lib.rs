//! Check locally installed AUR packages against the versions published on
//! the AUR web interface and optionally download the newer build tarballs.

pub mod aur;
pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod pacman;
pub mod ui;

pub use checker::{Checker, CheckStatus, PackageRecord, RunMode, RunSummary};
pub use config::Config;
pub use error::{CheckerError, Result};

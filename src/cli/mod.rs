pub mod args;

use crate::checker::{Checker, RunMode};
use crate::config::Config;
use crate::error::{CheckerError, Result};
use clap::Parser;
use std::ffi::OsString;
use tracing::debug;

pub use args::Args;

/// Exit status for an unrecognised option
pub const EXIT_INVALID_OPTION: i32 = 1;

/// Parse command-line arguments
///
/// `--help` and `--version` print and exit immediately with status 0. Any
/// other parse failure is returned as [`CheckerError::InvalidCliOption`]
/// carrying the rendered message and usage.
pub fn parse_args_from<I, T>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Args::try_parse_from(args).map_err(|e| {
        if e.use_stderr() {
            CheckerError::InvalidCliOption(e.render().to_string())
        } else {
            e.exit()
        }
    })
}

impl Args {
    pub fn mode(&self) -> RunMode {
        if self.check_only {
            RunMode::CheckOnly
        } else {
            RunMode::Download
        }
    }

    /// Load the config file and apply command-line overrides
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        if let Some(dir) = &self.build_dir {
            config.build_dir = dir.clone();
        }

        Ok(config)
    }
}

/// Execute CLI command
pub async fn execute(args: Args) -> Result<()> {
    let config = args.load_config()?;
    debug!("Using config {:?}", config);

    if !config.use_color {
        colored::control::set_override(false);
    }

    let checker = Checker::new(config)?;
    let mut stdout = std::io::stdout().lock();
    checker.run(args.mode(), &mut stdout).await?;

    Ok(())
}

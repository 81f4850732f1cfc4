use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "aurcheck")]
#[command(about = "Check installed AUR packages for newer versions and download their tarballs")]
pub struct Args {
    /// Only check versions, do not download tarballs (-c)
    #[arg(short = 'c', long)]
    pub check_only: bool,

    /// Verbose output (show debug information)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory downloaded tarballs are written to
    #[arg(long, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,
}

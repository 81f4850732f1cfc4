pub mod query;
pub mod vercmp;

pub use query::{InstalledPackageLister, PacmanLister, get_installed_aur_packages};
pub use vercmp::{AlpmVercmp, ExternalVercmp, VersionComparator, default_comparator};

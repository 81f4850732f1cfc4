use crate::aur::package::{tarball_file_name, tarball_prefix, validate_package_name};
use crate::config::Config;
use crate::error::{CheckerError, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

/// HTTP client for the AUR web interface
pub struct AurClient {
    client: Client,
    base_url: String,
}

impl AurClient {
    /// Create a client for the AUR instance named in the config
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(format!("aurcheck/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.aur_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the package details page
    pub fn package_url(&self, package_name: &str) -> String {
        format!("{}/packages/{}", self.base_url, package_name)
    }

    /// URL of the build tarball, e.g. `/packages/bl/blueman/blueman.tar.gz`
    pub fn tarball_url(&self, package_name: &str) -> String {
        format!(
            "{}/packages/{}/{}/{}",
            self.base_url,
            tarball_prefix(package_name),
            package_name,
            tarball_file_name(package_name)
        )
    }

    /// Fetch the raw HTML of a package page
    pub async fn fetch_package_page(&self, package_name: &str) -> Result<String> {
        validate_package_name(package_name)?;

        let url = self.package_url(package_name);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CheckerError::PackageNotFound(package_name.to_string()));
        }

        if !status.is_success() {
            return Err(CheckerError::AurRequest(format!("{}: HTTP {}", url, status)));
        }

        Ok(response.text().await?)
    }

    /// Download package bytes (tarball)
    pub async fn download_tarball(&self, package_name: &str) -> Result<Vec<u8>> {
        validate_package_name(package_name)?;

        let url = self.tarball_url(package_name);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CheckerError::DownloadFailed(format!("{}: {}", package_name, e)))?;

        if !response.status().is_success() {
            return Err(CheckerError::DownloadFailed(format!(
                "{}: HTTP {}",
                package_name,
                response.status()
            )));
        }

        let bytes = response.bytes().await?.to_vec();
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AurClient {
        AurClient::new(&Config::default()).unwrap()
    }

    #[test]
    fn test_package_url() {
        assert_eq!(
            client().package_url("blueman"),
            "https://aur.archlinux.org/packages/blueman"
        );
    }

    #[test]
    fn test_tarball_url() {
        assert_eq!(
            client().tarball_url("sublime-text"),
            "https://aur.archlinux.org/packages/su/sublime-text/sublime-text.tar.gz"
        );
    }

    #[tokio::test]
    async fn test_rejects_path_in_name() {
        let result = client().fetch_package_page("../../etc").await;
        assert!(matches!(result, Err(CheckerError::InvalidPackageName(_))));
    }
}

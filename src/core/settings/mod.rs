use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use super::error::RemoteError;
use super::identity::Identity;

pub const BASE_URL_VAR: &str = "LAUNCHER_URL";
pub const USER_VAR: &str = "LAUNCHER_USER";
pub const HWID_VAR: &str = "LAUNCHER_HWID";
pub const INSTALL_DIR_VAR: &str = "LAUNCHER_INSTALL_DIR";
pub const TIMEOUT_VAR: &str = "LAUNCHER_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: Option<String>,
    pub user: Option<String>,
    pub hwid: String,
    pub install_dir: Option<PathBuf>,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: None,
            user: None,
            hwid: String::new(),
            install_dir: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = lookup(TIMEOUT_VAR)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self {
            base_url: non_blank(lookup(BASE_URL_VAR)),
            user: non_blank(lookup(USER_VAR)),
            hwid: lookup(HWID_VAR).map(|raw| raw.trim().to_string()).unwrap_or_default(),
            install_dir: non_blank(lookup(INSTALL_DIR_VAR)).map(PathBuf::from),
            timeout_secs,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(self.base_url.as_deref(), self.user.as_deref())
    }

    /// Directory hashed into the installation key; the executable's own
    /// directory unless configured.
    pub fn resolved_install_dir(&self) -> Option<PathBuf> {
        self.install_dir.clone().or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|path| path.parent().map(PathBuf::from))
        })
    }
}

/// Remote endpoint layout derived from the base URL and optional user segment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Endpoints {
    root: Option<String>,
    user: Option<String>,
}

impl Endpoints {
    pub fn new(base_url: Option<&str>, user: Option<&str>) -> Self {
        let root = base_url
            .map(|raw| raw.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty());
        let user = user
            .map(|raw| raw.trim().trim_matches('/').to_string())
            .filter(|value| !value.is_empty());
        Self { root, user }
    }

    pub fn is_configured(&self) -> bool {
        self.root.is_some()
    }

    fn root(&self) -> Result<&str, RemoteError> {
        self.root.as_deref().ok_or(RemoteError::ConfigUrlMissing)
    }

    fn scoped_root(&self) -> Result<String, RemoteError> {
        let root = self.root()?;
        Ok(match &self.user {
            Some(user) => format!("{root}/{user}"),
            None => root.to_string(),
        })
    }

    pub fn config_url(&self) -> Result<String, RemoteError> {
        Ok(format!("{}/launcher/config.json", self.root()?))
    }

    pub fn instances_url(&self, identity: &Identity) -> Result<String, RemoteError> {
        let url = Url::parse_with_params(
            &format!("{}/files", self.scoped_root()?),
            [
                ("checksum", identity.installation_key.as_str()),
                ("id", identity.hwid.as_str()),
            ],
        )?;
        Ok(url.into())
    }

    pub fn fallback_instances_url(&self) -> Result<String, RemoteError> {
        Ok(format!("{}/launcher/instances.json", self.root()?))
    }

    pub fn news_url(&self) -> Result<String, RemoteError> {
        Ok(format!(
            "{}/launcher/news-launcher/news.json",
            self.scoped_root()?
        ))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

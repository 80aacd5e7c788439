use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use sha2::{Digest, Sha256};
use tracing::warn;

static INSTALLATION_KEY: OnceLock<String> = OnceLock::new();

/// Request parameters identifying this installation and machine to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub installation_key: String,
    pub hwid: String,
}

impl Identity {
    pub fn new(installation_key: impl Into<String>, hwid: impl Into<String>) -> Self {
        Self {
            installation_key: installation_key.into(),
            hwid: hwid.into(),
        }
    }
}

/// Process-wide installation key. The first call derives it from `install_dir`;
/// later calls return the memoized value whatever directory they pass.
pub fn installation_key(install_dir: Option<&Path>) -> &'static str {
    INSTALLATION_KEY.get_or_init(|| {
        let Some(dir) = install_dir else {
            warn!("no install directory available, installation key left empty");
            return String::new();
        };
        derive_installation_key(dir).unwrap_or_else(|error| {
            warn!(dir = %dir.display(), %error, "failed to derive installation key");
            String::new()
        })
    })
}

/// SHA-256 over the contents of every regular file directly inside `dir`,
/// taken in file-name order.
pub fn derive_installation_key(dir: &Path) -> std::io::Result<String> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().map(|kind| kind.is_file()).unwrap_or(false))
        .map(|entry| entry.path())
        .collect();
    files.sort();

    let mut hasher = Sha256::new();
    for file in &files {
        hasher.update(std::fs::read(file)?);
    }
    let bytes = hasher.finalize();
    Ok(format!("{bytes:x}"))
}

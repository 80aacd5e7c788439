use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::settings::Settings;

/// Query the launcher backend for its config, instance list or news.
///
/// Unset flags fall back to the `LAUNCHER_*` environment variables
/// (`.env.local` is read first).
#[derive(Parser, Debug)]
#[command(name = "launcher-remote", author, version)]
pub struct Cli {
    /// Base URL of the launcher backend
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// User segment appended to the base URL for per-user endpoints
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Hardware identity sent with instance requests
    #[arg(long, global = true)]
    pub hwid: Option<String>,

    /// Directory hashed into the installation key
    #[arg(long, global = true)]
    pub install_dir: Option<PathBuf>,

    /// Transport timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Print the remote launcher config
    Config,
    /// Print the normalized instance list
    Instances,
    /// Print the news feed
    News,
}

impl Cli {
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(url) = &self.url {
            settings.base_url = Some(url.clone());
        }
        if let Some(user) = &self.user {
            settings.user = Some(user.clone());
        }
        if let Some(hwid) = &self.hwid {
            settings.hwid = hwid.clone();
        }
        if let Some(dir) = &self.install_dir {
            settings.install_dir = Some(dir.clone());
        }
        if let Some(secs) = self.timeout_secs.filter(|secs| *secs > 0) {
            settings.timeout_secs = secs;
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_environment_settings() {
        let cli = Cli::try_parse_from([
            "launcher-remote",
            "instances",
            "--url",
            "https://flag.example.com",
            "--hwid",
            "hw-flag",
            "--timeout-secs",
            "0",
        ])
        .expect("arguments should parse");
        let env = Settings {
            base_url: Some("https://env.example.com".to_string()),
            user: Some("alice".to_string()),
            timeout_secs: 30,
            ..Settings::default()
        };

        let settings = cli.apply(env);
        assert_eq!(cli.command, Command::Instances);
        assert_eq!(settings.base_url.as_deref(), Some("https://flag.example.com"));
        assert_eq!(settings.user.as_deref(), Some("alice"));
        assert_eq!(settings.hwid, "hw-flag");
        assert_eq!(settings.timeout_secs, 30);
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["launcher-remote"]).is_err());
    }
}

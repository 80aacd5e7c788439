pub mod config;
pub mod error;
pub mod http;
pub mod identity;
pub mod instances;
pub mod news;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use config::ConfigFetcher;
use http::{FetchError, HttpFetch, ReqwestFetcher};
use identity::Identity;
use instances::InstanceListResolver;
use news::NewsAggregator;
use settings::{Endpoints, Settings};

/// The three remote components wired to one fetch capability.
#[derive(Clone)]
pub struct LauncherRemote {
    config: ConfigFetcher,
    instances: InstanceListResolver,
    news: NewsAggregator,
}

impl LauncherRemote {
    pub fn new(fetcher: Arc<dyn HttpFetch>, endpoints: Endpoints, identity: Identity) -> Self {
        let config = ConfigFetcher::new(fetcher.clone(), endpoints.clone());
        let instances = InstanceListResolver::new(fetcher.clone(), endpoints.clone(), identity);
        let news = NewsAggregator::new(fetcher, endpoints, config.clone());
        Self {
            config,
            instances,
            news,
        }
    }

    /// Production wiring: reqwest transport with the configured timeout and
    /// the process-wide installation key.
    pub fn from_settings(settings: &Settings) -> Result<Self, FetchError> {
        let fetcher = ReqwestFetcher::with_timeout(settings.timeout())?;
        let install_dir = settings.resolved_install_dir();
        let identity = Identity::new(
            identity::installation_key(install_dir.as_deref()),
            settings.hwid.clone(),
        );
        Ok(Self::new(Arc::new(fetcher), settings.endpoints(), identity))
    }

    pub fn config(&self) -> &ConfigFetcher {
        &self.config
    }

    pub fn instances(&self) -> &InstanceListResolver {
        &self.instances
    }

    pub fn news(&self) -> &NewsAggregator {
        &self.news
    }
}

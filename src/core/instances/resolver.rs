use std::sync::Arc;

use tracing::{debug, info, warn};

use super::normalize::parse_instances;
use super::types::{Instance, InstanceOrigin, ResolvedInstances};
use crate::core::error::RemoteError;
use crate::core::http::{fetch_json, HttpFetch, HttpRequest};
use crate::core::identity::Identity;
use crate::core::settings::Endpoints;

/// Fetches the instance list from the primary endpoint, falling back to the
/// static `instances.json`. Never fails: the floor is an empty list.
#[derive(Clone)]
pub struct InstanceListResolver {
    fetcher: Arc<dyn HttpFetch>,
    endpoints: Endpoints,
    identity: Identity,
}

impl InstanceListResolver {
    pub fn new(fetcher: Arc<dyn HttpFetch>, endpoints: Endpoints, identity: Identity) -> Self {
        Self {
            fetcher,
            endpoints,
            identity,
        }
    }

    pub async fn get_instance_list(&self) -> Vec<Instance> {
        self.resolve().await.instances
    }

    /// Tries each source in [`InstanceOrigin::ATTEMPT_ORDER`], one at a time,
    /// until one yields at least one instance.
    pub async fn resolve(&self) -> ResolvedInstances {
        for origin in InstanceOrigin::ATTEMPT_ORDER {
            match self.attempt(origin).await {
                Ok(instances) if !instances.is_empty() => {
                    info!(%origin, count = instances.len(), "instance list resolved");
                    return ResolvedInstances {
                        origin: Some(origin),
                        instances,
                    };
                }
                Ok(_) => warn!(%origin, "instance source returned no instances"),
                Err(error) => warn!(%origin, code = %error.code(), %error, "instance source failed"),
            }
        }
        warn!("all instance sources exhausted, returning empty list");
        ResolvedInstances {
            origin: None,
            instances: Vec::new(),
        }
    }

    pub fn request_for(&self, origin: InstanceOrigin) -> Result<HttpRequest, RemoteError> {
        Ok(match origin {
            InstanceOrigin::Primary => {
                HttpRequest::get(self.endpoints.instances_url(&self.identity)?).launcher_agent()
            }
            InstanceOrigin::Fallback => {
                HttpRequest::get(self.endpoints.fallback_instances_url()?)
                    .launcher_agent()
                    .no_cache()
            }
        })
    }

    async fn attempt(&self, origin: InstanceOrigin) -> Result<Vec<Instance>, RemoteError> {
        let request = self.request_for(origin)?;
        debug!(%origin, url = %request.url, "requesting instance list");
        let value = fetch_json(self.fetcher.as_ref(), &request).await?;
        Ok(parse_instances(value))
    }
}

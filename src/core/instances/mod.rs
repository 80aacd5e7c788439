pub mod normalize;
pub mod resolver;
pub mod types;

pub use normalize::{normalize_instance, parse_instances, InstanceSource};
pub use resolver::InstanceListResolver;
pub use types::{Instance, InstanceOrigin, Loader, ResolvedInstances, ServerStatus};

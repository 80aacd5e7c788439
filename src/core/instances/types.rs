use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_SERVER_NAME: &str = "Servidor";
pub const DEFAULT_SERVER_PORT: u16 = 25565;

/// Key of the loader block in the canonical shape.
pub const LOADER_KEY: &str = "loadder";
/// Key older servers used for the same block.
pub const LEGACY_LOADER_KEY: &str = "loader";

/// Canonical field name paired with the legacy name it may arrive under.
pub const LOADER_FIELD_PAIRS: [(&str, &str); 2] = [
    ("loadder_type", "loader_type"),
    ("loadder_version", "loader_version"),
];

/// A launchable profile as served by the launcher backend, normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loadder: Option<Loader>,
    pub status: ServerStatus,
    /// Every other field of the raw record, untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Loader block. Keeps both naming schemes; the canonical keys are always
/// populated when either scheme carried a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Loader(Map<String, Value>);

impl Loader {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn loader_type(&self) -> Option<&str> {
        self.0.get("loadder_type").and_then(Value::as_str)
    }

    pub fn loader_version(&self) -> Option<&str> {
        self.0.get("loadder_version").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerStatus {
    #[serde(rename = "nameServer")]
    pub name_server: String,
    pub ip: String,
    pub port: u16,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ServerStatus {
    pub fn placeholder(instance_name: &str) -> Self {
        Self {
            name_server: default_server_name(instance_name),
            ip: String::new(),
            port: DEFAULT_SERVER_PORT,
            extra: Map::new(),
        }
    }
}

pub(crate) fn default_server_name(instance_name: &str) -> String {
    if instance_name.is_empty() {
        DEFAULT_SERVER_NAME.to_string()
    } else {
        instance_name.to_string()
    }
}

/// Which endpoint produced an instance list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceOrigin {
    Primary,
    Fallback,
}

impl InstanceOrigin {
    pub const ATTEMPT_ORDER: [InstanceOrigin; 2] = [Self::Primary, Self::Fallback];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for InstanceOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInstances {
    /// `None` when every source failed and the list is the empty floor.
    pub origin: Option<InstanceOrigin>,
    pub instances: Vec<Instance>,
}

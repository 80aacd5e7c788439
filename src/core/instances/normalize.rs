use serde_json::{Map, Value};
use tracing::warn;

use super::types::{
    default_server_name, Instance, Loader, ServerStatus, DEFAULT_SERVER_PORT,
    LEGACY_LOADER_KEY, LOADER_FIELD_PAIRS, LOADER_KEY,
};

/// Raw instance list as served: either a JSON array of records or an object
/// keyed by instance name.
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceSource {
    Sequence(Vec<Value>),
    Mapping(Map<String, Value>),
}

impl InstanceSource {
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Self::Sequence(items)),
            Value::Object(entries) => Some(Self::Mapping(entries)),
            _ => None,
        }
    }

    pub fn into_instances(self) -> Vec<Instance> {
        match self {
            Self::Sequence(items) => items
                .into_iter()
                .enumerate()
                .filter_map(|(index, item)| match item {
                    Value::Object(record) => Some(normalize_instance(record)),
                    // a null slot is an empty record and gets placeholder defaults
                    Value::Null => Some(normalize_instance(Map::new())),
                    other => {
                        warn!(index, value = %other, "skipping non-record instance entry");
                        None
                    }
                })
                .collect(),
            Self::Mapping(entries) => entries
                .into_iter()
                .filter(|(_, value)| is_truthy(value))
                .map(|(name, value)| {
                    let mut record = match value {
                        Value::Object(record) => record,
                        _ => Map::new(),
                    };
                    record.insert("name".to_string(), Value::String(name));
                    normalize_instance(record)
                })
                .collect(),
        }
    }
}

pub fn parse_instances(value: Value) -> Vec<Instance> {
    InstanceSource::from_value(value)
        .map(InstanceSource::into_instances)
        .unwrap_or_default()
}

/// Loader block as it appears on a raw record.
#[derive(Debug, Clone, PartialEq)]
enum LoaderShape {
    Current(Map<String, Value>),
    Legacy(Map<String, Value>),
    Absent,
}

impl LoaderShape {
    /// Takes the current block off the record. A legacy block, or a
    /// `loadder` that is not an object, stays on the record so it is served
    /// back unchanged.
    fn detect(record: &mut Map<String, Value>) -> Self {
        match record.remove(LOADER_KEY).filter(is_truthy) {
            Some(Value::Object(fields)) => Self::Current(fields),
            Some(other) => {
                record.insert(LOADER_KEY.to_string(), other);
                Self::Absent
            }
            None => match record.get(LEGACY_LOADER_KEY) {
                Some(Value::Object(fields)) => Self::Legacy(fields.clone()),
                _ => Self::Absent,
            },
        }
    }

    fn into_loader(self) -> Option<Loader> {
        match self {
            Self::Current(fields) | Self::Legacy(fields) => {
                Some(Loader::from_fields(reconcile_loader_fields(fields)))
            }
            Self::Absent => None,
        }
    }
}

fn reconcile_loader_fields(mut fields: Map<String, Value>) -> Map<String, Value> {
    for (current, legacy) in LOADER_FIELD_PAIRS {
        let has_current = fields.get(current).is_some_and(is_truthy);
        let legacy_value = fields.get(legacy).filter(|value| is_truthy(value)).cloned();
        if let (false, Some(value)) = (has_current, legacy_value) {
            fields.insert(current.to_string(), value);
        }
    }
    fields
}

pub fn normalize_instance(mut record: Map<String, Value>) -> Instance {
    let name = match record.remove("name") {
        Some(Value::String(name)) => name,
        Some(other) if is_truthy(&other) => other.to_string(),
        _ => String::new(),
    };
    let loadder = LoaderShape::detect(&mut record).into_loader();
    let status = match record.remove("status") {
        Some(Value::Object(fields)) => complete_status(fields, &name),
        _ => ServerStatus::placeholder(&name),
    };

    Instance {
        name,
        loadder,
        status,
        extra: record,
    }
}

fn complete_status(mut fields: Map<String, Value>, instance_name: &str) -> ServerStatus {
    let name_server = match fields.remove("nameServer") {
        Some(Value::String(name)) => name,
        _ => default_server_name(instance_name),
    };
    let ip = match fields.remove("ip") {
        Some(Value::String(ip)) => ip,
        _ => String::new(),
    };
    let port = fields
        .remove("port")
        .and_then(|value| parse_port(&value))
        .unwrap_or(DEFAULT_SERVER_PORT);

    ServerStatus {
        name_server,
        ip,
        port,
        extra: fields,
    }
}

fn parse_port(value: &Value) -> Option<u16> {
    match value {
        Value::Number(number) => number.as_u64().and_then(|port| u16::try_from(port).ok()),
        Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("fixture must be an object, got {other}"),
        }
    }

    #[test]
    fn legacy_loader_block_is_copied_and_kept() {
        let instance = normalize_instance(record(json!({
            "name": "survival",
            "loader": {"loadder_type": "forge", "loadder_version": "47.2.0"}
        })));

        let loader = instance.loadder.expect("loader block should be present");
        assert_eq!(loader.loader_type(), Some("forge"));
        assert_eq!(loader.loader_version(), Some("47.2.0"));
        assert_eq!(
            instance.extra.get("loader"),
            Some(&json!({"loadder_type": "forge", "loadder_version": "47.2.0"}))
        );
    }

    #[test]
    fn legacy_field_names_gain_canonical_copies() {
        let instance = normalize_instance(record(json!({
            "name": "modded",
            "loadder": {"loader_type": "fabric", "loader_version": "0.15.11", "minecraft_version": "1.20.1"}
        })));

        let loader = instance.loadder.expect("loader block should be present");
        assert_eq!(loader.loader_type(), Some("fabric"));
        assert_eq!(loader.loader_version(), Some("0.15.11"));
        assert_eq!(loader.get("loader_type"), Some(&json!("fabric")));
        assert_eq!(loader.get("loader_version"), Some(&json!("0.15.11")));
        assert_eq!(loader.get("minecraft_version"), Some(&json!("1.20.1")));
    }

    #[test]
    fn canonical_loader_fields_win_over_legacy_ones() {
        let instance = normalize_instance(record(json!({
            "loadder": {"loadder_type": "neoforge", "loader_type": "forge", "loadder_version": "", "loader_version": "21.0.1"}
        })));

        let loader = instance.loadder.expect("loader block should be present");
        assert_eq!(loader.loader_type(), Some("neoforge"));
        assert_eq!(loader.loader_version(), Some("21.0.1"));
    }

    #[test]
    fn current_block_takes_precedence_over_legacy_block() {
        let instance = normalize_instance(record(json!({
            "loadder": {"loadder_type": "quilt"},
            "loader": {"loadder_type": "forge"}
        })));
        assert_eq!(
            instance.loadder.and_then(|l| l.loader_type().map(str::to_string)),
            Some("quilt".to_string())
        );
    }

    #[test]
    fn no_loader_information_leaves_block_absent() {
        let instance = normalize_instance(record(json!({"name": "vanilla", "loader": null})));
        assert!(instance.loadder.is_none());
    }

    #[test]
    fn missing_status_is_synthesized_from_name() {
        let named = normalize_instance(record(json!({"name": "lobby"})));
        assert_eq!(named.status, ServerStatus::placeholder("lobby"));
        assert_eq!(named.status.name_server, "lobby");
        assert_eq!(named.status.ip, "");
        assert_eq!(named.status.port, 25565);

        let unnamed = normalize_instance(record(json!({"status": "online"})));
        assert_eq!(unnamed.status.name_server, "Servidor");
        assert_eq!(unnamed.status.port, 25565);
    }

    #[test]
    fn partial_status_is_completed_and_keeps_extras() {
        let instance = normalize_instance(record(json!({
            "name": "skyblock",
            "status": {"ip": "play.example.com", "port": "25570", "motd": "hello"}
        })));

        assert_eq!(instance.status.name_server, "skyblock");
        assert_eq!(instance.status.ip, "play.example.com");
        assert_eq!(instance.status.port, 25570);
        assert_eq!(instance.status.extra.get("motd"), Some(&json!("hello")));
    }

    #[test]
    fn out_of_range_port_falls_back_to_default() {
        let instance = normalize_instance(record(json!({
            "status": {"nameServer": "Hub", "ip": "10.0.0.2", "port": 70000}
        })));
        assert_eq!(instance.status.name_server, "Hub");
        assert_eq!(instance.status.port, 25565);
    }

    #[test]
    fn mapping_source_injects_keys_and_skips_falsy_entries() {
        let source = InstanceSource::from_value(json!({
            "survival": {"url": "https://cdn.example.com/survival", "name": "ignored"},
            "retired": null,
            "disabled": false,
            "creative": {"whitelistActive": true}
        }))
        .expect("object is a mapping source");
        assert!(matches!(source, InstanceSource::Mapping(_)));

        let instances = source.into_instances();
        let names: Vec<&str> = instances.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["survival", "creative"]);
        assert_eq!(
            instances[0].extra.get("url"),
            Some(&json!("https://cdn.example.com/survival"))
        );
        assert_eq!(instances[1].status.name_server, "creative");
    }

    #[test]
    fn sequence_source_keeps_order_and_skips_non_records() {
        let instances = parse_instances(json!([
            {"name": "b"},
            "stray",
            {"name": "a"},
            7,
            {"name": "c"}
        ]));
        let names: Vec<&str> = instances.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn null_sequence_slots_become_placeholder_instances() {
        let instances = parse_instances(json!([null, {"name": "a"}, "stray"]));
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].name, "");
        assert_eq!(instances[0].status, ServerStatus::placeholder(""));
        assert_eq!(instances[0].status.name_server, "Servidor");
        assert_eq!(instances[1].name, "a");
    }

    #[test]
    fn non_object_loader_value_is_served_back() {
        let instance = normalize_instance(record(json!({"name": "x", "loadder": "forge-47"})));
        assert!(instance.loadder.is_none());

        let value = serde_json::to_value(&instance).expect("instance serializes");
        assert_eq!(value["loadder"], "forge-47");
        assert_eq!(value["name"], "x");
    }

    #[test]
    fn nameless_records_serialize_without_name() {
        let instance = normalize_instance(record(json!({"url": "https://cdn.example.com/pack"})));
        let value = serde_json::to_value(&instance).expect("instance serializes");

        assert!(value.get("name").is_none());
        assert_eq!(value["url"], "https://cdn.example.com/pack");
        assert_eq!(value["status"]["nameServer"], "Servidor");
    }

    #[test]
    fn scalar_sources_yield_nothing() {
        assert!(InstanceSource::from_value(json!("instances")).is_none());
        assert!(parse_instances(json!(null)).is_empty());
        assert!(parse_instances(json!(3)).is_empty());
    }

    #[test]
    fn fixture_documents_normalize() {
        let mapping: Value =
            serde_json::from_str(include_str!("../../../fixtures/instances/mapping.json"))
                .expect("mapping fixture parses");
        let instances = parse_instances(mapping);
        assert_eq!(instances.len(), 2);
        assert!(instances.iter().all(|i| i.loadder.is_some()));
        assert!(instances.iter().all(|i| !i.status.name_server.is_empty()));

        let sequence: Value =
            serde_json::from_str(include_str!("../../../fixtures/instances/sequence-legacy.json"))
                .expect("sequence fixture parses");
        let instances = parse_instances(sequence);
        assert_eq!(instances.len(), 2);
        assert_eq!(
            instances[1].loadder.as_ref().and_then(Loader::loader_type),
            Some("fabric")
        );
    }

    #[test]
    fn normalized_instance_serializes_canonical_keys() {
        let instance = normalize_instance(record(json!({
            "name": "lobby",
            "loader": {"loader_type": "forge"}
        })));
        let value = serde_json::to_value(&instance).expect("instance serializes");

        assert_eq!(value["name"], "lobby");
        assert_eq!(value["loadder"]["loadder_type"], "forge");
        assert_eq!(value["loadder"]["loader_type"], "forge");
        assert_eq!(value["loader"]["loader_type"], "forge");
        assert_eq!(value["status"]["nameServer"], "lobby");
        assert_eq!(value["status"]["port"], 25565);
    }
}

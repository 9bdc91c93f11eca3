use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub username: String,
    pub permissions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instance {
    pub config: InstanceConfig,
    pub mod_type: String,
    pub name: String,
    pub version: String,
}

/// Launch settings of a managed server instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct InstanceConfig {
    pub java: String,
    /// Maximum heap, in MiB.
    pub max_ram: u64,
    #[serde(default)]
    pub jvm_args: Vec<String>,
    pub server_file: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub dist_folder: Vec<String>,
}

/// Server flavour requested when creating an instance.
///
/// Serialized as `"Vanilla"`, `"Purpur"` or `{"forge": "<version>"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum InstanceType {
    #[serde(rename = "forge")]
    Forge(String),
    Vanilla,
    Purpur,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewInstanceRequest {
    pub typ: InstanceType,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    /// Ask the backend to store the token in an http-only cookie instead of
    /// returning it in the body.
    pub set: bool,
}

/// Host statistics reported by `/api/v1/info`. Memory figures are in KiB.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    pub hostname: String,
    pub cpus: u32,
    pub cpu_clock: u64,
    pub mem_total: u64,
    pub mem_free: u64,
    pub mem_avail: u64,
    pub mem_buff: u64,
    pub mem_cache: u64,
    pub mem_shm: u64,
    pub mem_used: u64,
    pub swap_total: u64,
    pub swap_free: u64,
    pub load_1: f64,
    pub load_5: f64,
    pub load_15: f64,
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn instance_type_wire_format() {
        assert_eq!(
            serde_json::to_value(InstanceType::Forge("47.2.0".to_string())).unwrap(),
            json!({"forge": "47.2.0"})
        );
        assert_eq!(
            serde_json::to_value(InstanceType::Vanilla).unwrap(),
            json!("Vanilla")
        );
        let purpur: InstanceType = serde_json::from_value(json!("Purpur")).unwrap();
        assert_eq!(purpur, InstanceType::Purpur);
    }

    #[test]
    fn system_info_tolerates_missing_fields() {
        let info: SystemInfo = serde_json::from_value(json!({
            "os": "linux",
            "arch": "x86_64",
            "hostname": "mc-01",
            "cpus": 8,
            "mem_total": 16_384_000,
        }))
        .unwrap();
        assert_eq!(info.cpus, 8);
        assert_eq!(info.mem_total, 16_384_000);
        assert_eq!(info.mem_shm, 0);
    }
}

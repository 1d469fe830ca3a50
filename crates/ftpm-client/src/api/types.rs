//! API request/response types matching the FTPM backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Server-wide metrics snapshot from `GET /api/dashboard/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub active_users: u64,
    pub server_status: String,
    pub server_version: String,
    pub uptime: String,
    pub transfers_24h: u64,
    pub disk_used_gb: f64,
    pub disk_total_gb: f64,
    pub disk_usage_percent: f64,
    /// Number of virtual users known to the server.
    #[serde(default)]
    pub total_users: Option<u64>,
    #[serde(default)]
    pub active_connections: Option<u64>,
    #[serde(default)]
    pub ftp_port: Option<u16>,
    #[serde(default)]
    pub ssl_enabled: Option<bool>,
}

/// Recent activity entry from `GET /api/dashboard/recent-users`.
///
/// The backend has emitted two shapes over time: the summary one
/// (`name`, `last_access`, `transfers`) and the transfer-log one
/// (`username`, `last_transfer`, `file`, ...). Both decode here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentUser {
    #[serde(alias = "username")]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, alias = "last_transfer")]
    pub last_access: String,
    #[serde(default)]
    pub transfers: u64,
    /// Last transferred file (transfer-log shape only).
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub home_dir: Option<String>,
    #[serde(default)]
    pub quota_mb: Option<u64>,
    #[serde(default)]
    pub permissions: Option<String>,
}

/// FTP account record from `GET /api/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub home_dir: String,
    #[serde(default)]
    pub quota_mb: u64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub permissions: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of `POST /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_mb: Option<u64>,
}

/// Generic `{message}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    #[serde(default)]
    pub version: String,
}

/// General server configuration (`GET/POST /api/config`).
///
/// Known fields are typed; anything else the backend stores is kept in
/// `extra` so a load/save round trip never drops keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ftp_port: u16,
    pub passive_ports: String,
    pub max_clients: u32,
    pub max_per_ip: u32,
    pub log_level: String,
    pub ssl_enabled: bool,
    pub ssl_cert_file: String,
    pub ssl_key_file: String,
    pub default_quota_mb: u64,
    pub dashboard_theme: String,
    pub language: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ftp_port: 21,
            passive_ports: "40000-40100".to_string(),
            max_clients: 50,
            max_per_ip: 10,
            log_level: "detalhado".to_string(),
            ssl_enabled: true,
            ssl_cert_file: "/etc/ssl/cert.pem".to_string(),
            ssl_key_file: "/etc/ssl/key.pem".to_string(),
            default_quota_mb: 100,
            dashboard_theme: "auto".to_string(),
            language: "pt-BR".to_string(),
            extra: Map::new(),
        }
    }
}

impl ServerConfig {
    /// Parse the `passive_ports` range (`"min-max"`).
    pub fn passive_port_range(&self) -> Option<(u16, u16)> {
        let (min, max) = self.passive_ports.split_once('-')?;
        let min = min.trim().parse().ok()?;
        let max = max.trim().parse().ok()?;
        (min <= max).then_some((min, max))
    }
}

/// Response of `POST /api/config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigUpdateResponse {
    pub message: String,
    #[serde(default)]
    pub config: Option<ServerConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_with_backend_extras() {
        let json = r#"{
            "active_users": 3,
            "server_status": "online",
            "server_version": "vsftpd v3.0.5",
            "uptime": "2:03:04",
            "transfers_24h": 17,
            "disk_used_gb": 12.5,
            "disk_total_gb": 100.0,
            "disk_usage_percent": 12.5,
            "active_connections": 3,
            "ftp_port": 21,
            "ssl_enabled": true,
            "total_users": 8
        }"#;

        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.active_users, 3);
        assert_eq!(stats.total_users, Some(8));
        assert_eq!(stats.ftp_port, Some(21));
    }

    #[test]
    fn test_recent_user_transfer_log_shape() {
        let json = r#"{
            "username": "alice",
            "last_transfer": "Mon Jan 6 10:00:01",
            "file": "/upload/report.pdf",
            "status": "Ativo",
            "home_dir": "/home/ftpusers/alice",
            "quota_mb": 0,
            "permissions": "Completo",
            "created_at": "-"
        }"#;

        let user: RecentUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.name, "alice");
        assert_eq!(user.last_access, "Mon Jan 6 10:00:01");
        assert_eq!(user.transfers, 0);
        assert_eq!(user.permissions.as_deref(), Some("Completo"));
    }

    #[test]
    fn test_create_user_request_omits_empty_optionals() {
        let request = CreateUserRequest {
            username: "bob".into(),
            password: "secret".into(),
            home_dir: None,
            quota_mb: Some(250),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"username": "bob", "password": "secret", "quota_mb": 250})
        );
    }

    #[test]
    fn test_server_config_keeps_unknown_keys() {
        let json = r#"{"ftp_port": 2121, "anon_enable": false}"#;
        let config: ServerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.ftp_port, 2121);
        assert_eq!(config.max_clients, 50);
        assert_eq!(config.extra.get("anon_enable"), Some(&Value::Bool(false)));

        let back = serde_json::to_value(&config).unwrap();
        assert_eq!(back["anon_enable"], Value::Bool(false));
        assert_eq!(back["ftp_port"], 2121);
    }

    #[test]
    fn test_passive_port_range() {
        let mut config = ServerConfig::default();
        assert_eq!(config.passive_port_range(), Some((40000, 40100)));

        config.passive_ports = "5000 - 4000".into();
        assert_eq!(config.passive_port_range(), None);

        config.passive_ports = "garbage".into();
        assert_eq!(config.passive_port_range(), None);
    }
}

//! Static sample data for `--demo` (no API connection required).

use ftpm_client::api::{ConfigUpdateResponse, ServiceInfo};
use ftpm_client::{DashboardStats, MessageResponse, QueryState, RecentUser, ServerConfig, User};

use crate::domain::{App, AppEvent, Command, Page};

/// Fill the polled resources with sample data.
pub fn set_demo_data(app: &mut App) {
    app.service = Some(ServiceInfo {
        message: "FTP Manager API".to_string(),
        version: "1.0.0 (demo)".to_string(),
    });
    app.apply(AppEvent::Stats(QueryState::success(stats())));
    app.apply(AppEvent::RecentUsers(QueryState::success(recent_users())));
    app.apply(AppEvent::Log(QueryState::success(log_tail())));
}

/// Answer a command the way a healthy backend would.
pub fn respond(command: &Command) -> Vec<AppEvent> {
    match command {
        Command::EnterPage(Page::Users) | Command::Refresh(Page::Users) => {
            vec![AppEvent::UsersLoaded(Ok(users()))]
        }
        Command::EnterPage(Page::Config) | Command::Refresh(Page::Config) => {
            vec![AppEvent::ConfigLoaded(Ok(ServerConfig::default()))]
        }
        Command::EnterPage(Page::Dashboard) | Command::Refresh(Page::Dashboard) => vec![
            AppEvent::Stats(QueryState::success(stats())),
            AppEvent::RecentUsers(QueryState::success(recent_users())),
        ],
        Command::EnterPage(Page::Logs) | Command::Refresh(Page::Logs) => {
            vec![AppEvent::Log(QueryState::success(log_tail()))]
        }
        Command::EnterPage(Page::NewUser) | Command::Refresh(Page::NewUser) => Vec::new(),
        Command::CreateUser(request) => vec![AppEvent::UserCreated(Ok(MessageResponse {
            message: format!("User {} created successfully", request.username),
        }))],
        Command::DeleteUser(username) => vec![AppEvent::UserDeleted {
            username: username.clone(),
            result: Ok(MessageResponse {
                message: format!("User {} deleted successfully", username),
            }),
        }],
        Command::SaveConfig(config) => vec![AppEvent::ConfigSaved(Ok(ConfigUpdateResponse {
            message: "Configuration saved and applied.".to_string(),
            config: Some(config.clone()),
        }))],
    }
}

fn stats() -> DashboardStats {
    DashboardStats {
        active_users: 3,
        server_status: "online".to_string(),
        server_version: "vsftpd v3.0.5".to_string(),
        uptime: "3 days, 4:12:09".to_string(),
        transfers_24h: 128,
        disk_used_gb: 42.7,
        disk_total_gb: 100.0,
        disk_usage_percent: 42.7,
        total_users: Some(5),
        active_connections: Some(2),
        ftp_port: Some(21),
        ssl_enabled: Some(true),
    }
}

fn recent_users() -> Vec<RecentUser> {
    [
        ("alice", "online", "Now", 12, "Completo"),
        ("bob", "online", "5 min ago", 4, "Escrita"),
        ("carol", "offline", "2 h ago", 0, "Leitura"),
    ]
    .into_iter()
    .map(|(name, status, last_access, transfers, permissions)| RecentUser {
        name: name.to_string(),
        status: status.to_string(),
        last_access: last_access.to_string(),
        transfers,
        file: None,
        home_dir: Some(format!("/home/ftpusers/{}", name)),
        quota_mb: Some(1024),
        permissions: Some(permissions.to_string()),
    })
    .collect()
}

fn users() -> Vec<User> {
    [
        ("alice", "active", "admin", "alice@example.com"),
        ("bob", "active", "read-write", "bob@example.com"),
        ("carol", "inactive", "read-only", "carol@example.com"),
        ("dave", "suspended", "write-only", "dave@example.com"),
        ("erin", "active", "read-write", "erin@example.com"),
    ]
    .into_iter()
    .map(|(username, status, permissions, email)| User {
        username: username.to_string(),
        home_dir: format!("/home/ftpusers/{}", username),
        quota_mb: 1024,
        created_at: "2025-01-06 09:30:00".to_string(),
        status: Some(status.to_string()),
        permissions: Some(permissions.to_string()),
        email: Some(email.to_string()),
    })
    .collect()
}

fn log_tail() -> String {
    [
        "Mon Jan  6 09:30:01 2025 [pid 1201] CONNECT: Client \"192.168.1.20\"",
        "Mon Jan  6 09:30:02 2025 [pid 1200] [alice] OK LOGIN: Client \"192.168.1.20\"",
        "Mon Jan  6 09:30:09 2025 [pid 1202] [alice] OK UPLOAD: Client \"192.168.1.20\", \"/reports/q4.pdf\", 482133 bytes",
        "Mon Jan  6 09:31:44 2025 [pid 1210] CONNECT: Client \"10.0.0.7\"",
        "Mon Jan  6 09:31:45 2025 [pid 1209] [bob] FAIL LOGIN: Client \"10.0.0.7\"",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_fills_dashboard() {
        let mut app = App::new();
        set_demo_data(&mut app);
        assert_eq!(app.stats.data().map(|s| s.active_users), Some(3));
        assert_eq!(app.recent_users.data().map(Vec::len), Some(3));
        assert!(app.last_refresh.is_some());
    }

    #[test]
    fn test_demo_answers_page_entry() {
        let mut app = App::new();
        let command = app.navigate(Page::Users).unwrap();
        for event in respond(&command) {
            app.apply(event);
        }
        assert!(!app.users.loading);
        assert_eq!(app.users.counters().total, 5);
        assert_eq!(app.users.counters().suspended, 1);
    }
}

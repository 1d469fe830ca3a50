//! Configuration page: a draft of the server configuration edited in place.

use ftpm_client::api::ConfigUpdateResponse;
use ftpm_client::{ApiError, ServerConfig};
use thiserror::Error;

use super::Notice;

/// A field edit that could not be applied to the draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigFieldError {
    #[error("{field} must be a number between {min} and {max}.")]
    OutOfRange {
        field: &'static str,
        min: u64,
        max: u64,
    },

    #[error("Passive ports must look like 40000-40100.")]
    PassiveRange,

    #[error("{0} cannot be empty.")]
    Empty(&'static str),
}

/// Editable configuration fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    FtpPort,
    PassivePorts,
    MaxClients,
    MaxPerIp,
    LogLevel,
    SslEnabled,
    SslCertFile,
    SslKeyFile,
    DefaultQuotaMb,
    DashboardTheme,
    Language,
}

impl ConfigField {
    pub const ALL: [ConfigField; 11] = [
        ConfigField::FtpPort,
        ConfigField::PassivePorts,
        ConfigField::MaxClients,
        ConfigField::MaxPerIp,
        ConfigField::LogLevel,
        ConfigField::SslEnabled,
        ConfigField::SslCertFile,
        ConfigField::SslKeyFile,
        ConfigField::DefaultQuotaMb,
        ConfigField::DashboardTheme,
        ConfigField::Language,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ConfigField::FtpPort => "FTP port",
            ConfigField::PassivePorts => "Passive port range",
            ConfigField::MaxClients => "Max clients",
            ConfigField::MaxPerIp => "Max per IP",
            ConfigField::LogLevel => "Log level",
            ConfigField::SslEnabled => "SSL/TLS",
            ConfigField::SslCertFile => "Certificate file",
            ConfigField::SslKeyFile => "Key file",
            ConfigField::DefaultQuotaMb => "Default quota (MB)",
            ConfigField::DashboardTheme => "Dashboard theme",
            ConfigField::Language => "Language",
        }
    }

    /// Toggled rather than typed.
    pub fn is_toggle(&self) -> bool {
        matches!(self, ConfigField::SslEnabled)
    }

    /// Current value of this field in `config`, as displayed.
    pub fn read(&self, config: &ServerConfig) -> String {
        match self {
            ConfigField::FtpPort => config.ftp_port.to_string(),
            ConfigField::PassivePorts => config.passive_ports.clone(),
            ConfigField::MaxClients => config.max_clients.to_string(),
            ConfigField::MaxPerIp => config.max_per_ip.to_string(),
            ConfigField::LogLevel => config.log_level.clone(),
            ConfigField::SslEnabled => {
                if config.ssl_enabled { "enabled" } else { "disabled" }.to_string()
            }
            ConfigField::SslCertFile => config.ssl_cert_file.clone(),
            ConfigField::SslKeyFile => config.ssl_key_file.clone(),
            ConfigField::DefaultQuotaMb => config.default_quota_mb.to_string(),
            ConfigField::DashboardTheme => config.dashboard_theme.clone(),
            ConfigField::Language => config.language.clone(),
        }
    }

    /// Parse `input` into this field of `config`. On error `config` is
    /// left untouched.
    pub fn write(&self, config: &mut ServerConfig, input: &str) -> Result<(), ConfigFieldError> {
        let input = input.trim();
        match self {
            ConfigField::FtpPort => config.ftp_port = parse_in_range(self, input, 1, u16::MAX as u64)? as u16,
            ConfigField::PassivePorts => {
                let probe = ServerConfig {
                    passive_ports: input.to_string(),
                    ..ServerConfig::default()
                };
                if probe.passive_port_range().is_none() {
                    return Err(ConfigFieldError::PassiveRange);
                }
                config.passive_ports = probe.passive_ports;
            }
            ConfigField::MaxClients => config.max_clients = parse_in_range(self, input, 1, u32::MAX as u64)? as u32,
            ConfigField::MaxPerIp => config.max_per_ip = parse_in_range(self, input, 1, u32::MAX as u64)? as u32,
            ConfigField::LogLevel => config.log_level = non_empty(self, input)?,
            ConfigField::SslEnabled => {
                config.ssl_enabled = matches!(
                    input.to_ascii_lowercase().as_str(),
                    "enabled" | "true" | "yes" | "on" | "1"
                )
            }
            ConfigField::SslCertFile => config.ssl_cert_file = non_empty(self, input)?,
            ConfigField::SslKeyFile => config.ssl_key_file = non_empty(self, input)?,
            ConfigField::DefaultQuotaMb => config.default_quota_mb = parse_in_range(self, input, 0, u64::MAX)?,
            ConfigField::DashboardTheme => config.dashboard_theme = non_empty(self, input)?,
            ConfigField::Language => config.language = non_empty(self, input)?,
        }
        Ok(())
    }
}

fn parse_in_range(field: &ConfigField, input: &str, min: u64, max: u64) -> Result<u64, ConfigFieldError> {
    input
        .parse::<u64>()
        .ok()
        .filter(|value| (min..=max).contains(value))
        .ok_or(ConfigFieldError::OutOfRange {
            field: field.label(),
            min,
            max,
        })
}

fn non_empty(field: &ConfigField, input: &str) -> Result<String, ConfigFieldError> {
    if input.is_empty() {
        Err(ConfigFieldError::Empty(field.label()))
    } else {
        Ok(input.to_string())
    }
}

/// State of the configuration page.
#[derive(Debug, Default)]
pub struct ConfigPage {
    /// Loaded configuration with local edits applied.
    pub draft: Option<ServerConfig>,
    pub loading: bool,
    pub saving: bool,
    /// Load failure, shown in place of the form.
    pub error: Option<String>,
    pub notice: Option<Notice>,
    /// Index into [`ConfigField::ALL`].
    pub focus: usize,
    /// Text being typed into the focused field.
    pub edit_buffer: Option<String>,
}

impl ConfigPage {
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
        self.edit_buffer = None;
    }

    pub fn finish_load(&mut self, result: Result<ServerConfig, ApiError>) {
        self.loading = false;
        match result {
            Ok(config) => {
                self.draft = Some(config);
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Configuration load failed");
                self.draft = None;
                self.error = Some("Failed to load configuration.".to_string());
            }
        }
    }

    pub fn focused(&self) -> ConfigField {
        ConfigField::ALL[self.focus % ConfigField::ALL.len()]
    }

    pub fn focus_prev(&mut self) {
        self.focus = if self.focus == 0 {
            ConfigField::ALL.len() - 1
        } else {
            self.focus - 1
        };
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % ConfigField::ALL.len();
    }

    /// Start typing into the focused field, or flip it if it is a toggle.
    /// Returns `true` if text editing started.
    pub fn begin_edit(&mut self) -> bool {
        let field = self.focused();
        let Some(draft) = self.draft.as_mut() else {
            return false;
        };
        if field.is_toggle() {
            draft.ssl_enabled = !draft.ssl_enabled;
            return false;
        }
        self.edit_buffer = Some(field.read(draft));
        true
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(buffer) = self.edit_buffer.as_mut() {
            buffer.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(buffer) = self.edit_buffer.as_mut() {
            buffer.pop();
        }
    }

    /// Apply the edit buffer to the draft.
    pub fn commit_edit(&mut self) {
        let field = self.focused();
        let (Some(buffer), Some(draft)) = (self.edit_buffer.take(), self.draft.as_mut()) else {
            return;
        };
        match field.write(draft, &buffer) {
            Ok(()) => self.notice = None,
            Err(err) => self.notice = Some(Notice::Error(err.to_string())),
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit_buffer = None;
    }

    /// The whole draft to post, unless nothing is loaded or a save is
    /// already running.
    pub fn save(&mut self) -> Option<ServerConfig> {
        if self.saving || self.edit_buffer.is_some() {
            return None;
        }
        let draft = self.draft.clone()?;
        self.saving = true;
        self.notice = None;
        Some(draft)
    }

    pub fn finish_save(&mut self, result: Result<ConfigUpdateResponse, ApiError>) {
        self.saving = false;
        match result {
            Ok(response) => {
                if let Some(config) = response.config {
                    self.draft = Some(config);
                }
                self.notice = Some(Notice::Success(response.message));
            }
            Err(err) => {
                tracing::warn!(error = %err, "Configuration save failed");
                self.notice = Some(Notice::Error("Failed to save configuration.".to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> ConfigPage {
        let mut page = ConfigPage::default();
        page.begin_load();
        page.finish_load(Ok(ServerConfig::default()));
        page
    }

    #[test]
    fn test_edit_numeric_field() {
        let mut page = loaded();
        page.focus = 2; // Max clients
        assert!(page.begin_edit());
        assert_eq!(page.edit_buffer.as_deref(), Some("50"));
        page.pop_char();
        page.pop_char();
        page.push_char('7');
        page.push_char('5');
        page.commit_edit();
        assert_eq!(page.draft.as_ref().map(|c| c.max_clients), Some(75));
        assert!(page.notice.is_none());
    }

    #[test]
    fn test_invalid_edit_keeps_previous_value() {
        let mut page = loaded();
        assert_eq!(page.focused(), ConfigField::FtpPort);
        page.begin_edit();
        page.edit_buffer = Some("70000".to_string());
        page.commit_edit();
        assert_eq!(page.draft.as_ref().map(|c| c.ftp_port), Some(21));
        assert_eq!(
            page.notice,
            Some(Notice::Error(
                "FTP port must be a number between 1 and 65535.".to_string()
            ))
        );
    }

    #[test]
    fn test_passive_range_validation() {
        let mut config = ServerConfig::default();
        assert_eq!(
            ConfigField::PassivePorts.write(&mut config, "50100-50000"),
            Err(ConfigFieldError::PassiveRange)
        );
        ConfigField::PassivePorts.write(&mut config, "50000-50100").unwrap();
        assert_eq!(config.passive_ports, "50000-50100");
    }

    #[test]
    fn test_toggle_flips_ssl() {
        let mut page = loaded();
        page.focus = ConfigField::ALL
            .iter()
            .position(|f| *f == ConfigField::SslEnabled)
            .unwrap();
        assert!(!page.begin_edit());
        assert_eq!(page.draft.as_ref().map(|c| c.ssl_enabled), Some(false));
    }

    #[test]
    fn test_save_posts_whole_draft_once() {
        let mut page = loaded();
        let draft = page.save().unwrap();
        assert_eq!(draft, ServerConfig::default());
        assert!(page.save().is_none());

        page.finish_save(Err(ApiError::Status {
            status: 500,
            message: "HTTP 500".to_string(),
        }));
        assert!(!page.saving);
        assert_eq!(
            page.notice,
            Some(Notice::Error("Failed to save configuration.".to_string()))
        );
    }

    #[test]
    fn test_load_failure_uses_generic_message() {
        let mut page = ConfigPage::default();
        page.finish_load(Err(ApiError::Status {
            status: 503,
            message: "backend down".to_string(),
        }));
        assert!(page.draft.is_none());
        assert_eq!(page.error.as_deref(), Some("Failed to load configuration."));
        assert!(page.save().is_none());
    }
}

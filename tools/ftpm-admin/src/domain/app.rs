//! Application state management.

use ftpm_client::api::ServiceInfo;
use ftpm_client::{CreateUserRequest, DashboardStats, QueryState, RecentUser, ServerConfig};

use super::{AppEvent, ConfigPage, NewUserForm, UsersPage};

/// Application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Navigating pages and rows.
    #[default]
    Browsing,
    /// Typing into a field of the current page.
    Editing,
    /// Help overlay.
    Help,
    /// Quitting.
    Quit,
}

/// Pages of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Users,
    NewUser,
    Config,
    Logs,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Dashboard,
        Page::Users,
        Page::NewUser,
        Page::Config,
        Page::Logs,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Users => "Users",
            Page::NewUser => "New User",
            Page::Config => "Configuration",
            Page::Logs => "vsftpd Log",
        }
    }

    pub fn hotkey(&self) -> char {
        match self {
            Page::Dashboard => '1',
            Page::Users => '2',
            Page::NewUser => '3',
            Page::Config => '4',
            Page::Logs => '5',
        }
    }

    pub fn from_hotkey(key: char) -> Option<Page> {
        Self::ALL.into_iter().find(|page| page.hotkey() == key)
    }

    fn offset(&self, delta: isize) -> Page {
        let len = Self::ALL.len() as isize;
        let idx = Self::ALL.iter().position(|p| p == self).unwrap_or(0) as isize;
        Self::ALL[(idx + delta).rem_euclid(len) as usize]
    }
}

/// Keyboard input, decoupled from the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Up,
    Down,
}

/// Inline feedback for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Work requested from the runtime by a state change.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A page became visible; the previous page's work is cancelled.
    EnterPage(Page),
    /// Reload everything the page shows.
    Refresh(Page),
    CreateUser(CreateUserRequest),
    DeleteUser(String),
    SaveConfig(ServerConfig),
}

impl Command {
    /// Short name for logs. Never includes request bodies.
    pub fn label(&self) -> &'static str {
        match self {
            Command::EnterPage(_) => "enter-page",
            Command::Refresh(_) => "refresh",
            Command::CreateUser(_) => "create-user",
            Command::DeleteUser(_) => "delete-user",
            Command::SaveConfig(_) => "save-config",
        }
    }
}

/// Main application model.
#[derive(Debug, Default)]
pub struct App {
    /// Current application state/view.
    pub state: AppState,
    /// Visible page.
    pub page: Page,
    /// Backend identity from `GET /`.
    pub service: Option<ServiceInfo>,
    pub stats: QueryState<DashboardStats>,
    pub recent_users: QueryState<Vec<RecentUser>>,
    pub log: QueryState<String>,
    /// Lines scrolled up from the end of the log.
    pub log_scroll: u16,
    pub users: UsersPage,
    pub new_user: NewUserForm,
    pub config: ConfigPage,
    /// Last time any polled resource answered.
    pub last_refresh: Option<chrono::DateTime<chrono::Utc>>,
    /// Error message to display in the header (if any).
    pub error_message: Option<String>,
}

impl App {
    /// Create a new application instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle keyboard input.
    pub fn handle_key(&mut self, key: Key) -> Option<Command> {
        match self.state {
            AppState::Browsing => self.handle_browsing_key(key),
            AppState::Editing => self.handle_editing_key(key),
            AppState::Help => {
                // Any key closes help
                self.state = AppState::Browsing;
                None
            }
            AppState::Quit => None,
        }
    }

    /// Switch to `page`. Returns `None` if it is already visible.
    pub fn navigate(&mut self, page: Page) -> Option<Command> {
        if page == self.page {
            return None;
        }
        self.leave_page();
        self.page = page;
        self.state = AppState::Browsing;
        match page {
            Page::Users => self.users.begin_load(),
            Page::Config => self.config.begin_load(),
            Page::Logs => self.log_scroll = 0,
            Page::Dashboard | Page::NewUser => {}
        }
        Some(Command::EnterPage(page))
    }

    /// Requests of the page being left are cancelled with its scope, so
    /// their pending flags are reset here.
    fn leave_page(&mut self) {
        match self.page {
            Page::Users => {
                self.users.loading = false;
                self.users.pending_delete = None;
            }
            Page::NewUser => self.new_user = NewUserForm::default(),
            Page::Config => {
                self.config.loading = false;
                self.config.saving = false;
                self.config.edit_buffer = None;
            }
            Page::Dashboard | Page::Logs => {}
        }
    }

    fn refresh(&mut self) -> Option<Command> {
        // A load already in flight would race the new one.
        match self.page {
            Page::Users if self.users.loading => return None,
            Page::Config if self.config.loading => return None,
            Page::Users => self.users.begin_load(),
            Page::Config => self.config.begin_load(),
            Page::NewUser => return None,
            Page::Dashboard | Page::Logs => {}
        }
        Some(Command::Refresh(self.page))
    }

    fn handle_browsing_key(&mut self, key: Key) -> Option<Command> {
        if self.page == Page::Users && self.users.pending_delete.is_some() {
            return match key {
                Key::Char('y') | Key::Char('Y') => {
                    self.users.confirm_delete().map(Command::DeleteUser)
                }
                _ => {
                    self.users.cancel_delete();
                    None
                }
            };
        }

        match key {
            Key::Char('q') | Key::Char('Q') | Key::Esc => {
                self.state = AppState::Quit;
                None
            }
            Key::Char('?') => {
                self.state = AppState::Help;
                None
            }
            Key::Char('r') | Key::Char('R') => self.refresh(),
            Key::Tab => self.navigate(self.page.offset(1)),
            Key::BackTab => self.navigate(self.page.offset(-1)),
            Key::Char(c) if Page::from_hotkey(c).is_some() => {
                Page::from_hotkey(c).and_then(|page| self.navigate(page))
            }
            _ => self.handle_page_key(key),
        }
    }

    fn handle_page_key(&mut self, key: Key) -> Option<Command> {
        match (self.page, key) {
            (Page::Users, Key::Up) => self.users.select_prev(),
            (Page::Users, Key::Down) => self.users.select_next(),
            (Page::Users, Key::Char('/')) => self.state = AppState::Editing,
            (Page::Users, Key::Char('d')) | (Page::Users, Key::Char('D')) => {
                self.users.request_delete()
            }

            (Page::NewUser, Key::Up) => self.new_user.focus = self.new_user.focus.prev(),
            (Page::NewUser, Key::Down) => self.new_user.focus = self.new_user.focus.next(),
            (Page::NewUser, Key::Enter) | (Page::NewUser, Key::Char('e')) => {
                self.state = AppState::Editing
            }
            (Page::NewUser, Key::Char('s')) | (Page::NewUser, Key::Char('S')) => {
                return self.new_user.submit().map(Command::CreateUser);
            }

            (Page::Config, Key::Up) => self.config.focus_prev(),
            (Page::Config, Key::Down) => self.config.focus_next(),
            (Page::Config, Key::Enter) => {
                if self.config.begin_edit() {
                    self.state = AppState::Editing;
                }
            }
            (Page::Config, Key::Char('s')) | (Page::Config, Key::Char('S')) => {
                return self.config.save().map(Command::SaveConfig);
            }

            (Page::Logs, Key::Up) => {
                self.log_scroll = self.log_scroll.saturating_add(1).min(self.log_lines())
            }
            (Page::Logs, Key::Down) => self.log_scroll = self.log_scroll.saturating_sub(1),
            _ => {}
        }
        None
    }

    fn handle_editing_key(&mut self, key: Key) -> Option<Command> {
        match self.page {
            Page::Users => match key {
                Key::Char(c) => self.users.push_search(c),
                Key::Backspace => self.users.pop_search(),
                Key::Enter | Key::Esc => self.state = AppState::Browsing,
                _ => {}
            },
            Page::NewUser => match key {
                Key::Char(c) => self.new_user.push_char(c),
                Key::Backspace => self.new_user.pop_char(),
                Key::Tab | Key::Down => self.new_user.focus = self.new_user.focus.next(),
                Key::BackTab | Key::Up => self.new_user.focus = self.new_user.focus.prev(),
                Key::Esc => self.state = AppState::Browsing,
                Key::Enter => {
                    let last = self.new_user.focus.next() == super::NewUserField::ALL[0];
                    if !last {
                        self.new_user.focus = self.new_user.focus.next();
                        return None;
                    }
                    self.state = AppState::Browsing;
                    return self.new_user.submit().map(Command::CreateUser);
                }
            },
            Page::Config => match key {
                Key::Char(c) => self.config.push_char(c),
                Key::Backspace => self.config.pop_char(),
                Key::Enter => {
                    self.config.commit_edit();
                    self.state = AppState::Browsing;
                }
                Key::Esc => {
                    self.config.cancel_edit();
                    self.state = AppState::Browsing;
                }
                _ => {}
            },
            Page::Dashboard | Page::Logs => self.state = AppState::Browsing,
        }
        None
    }

    /// Fold a background result into the model.
    pub fn apply(&mut self, event: AppEvent) -> Option<Command> {
        match event {
            AppEvent::Stats(state) => {
                self.touch(state.updated_at(), state.data().is_some());
                self.stats = state;
            }
            AppEvent::RecentUsers(state) => {
                self.touch(state.updated_at(), state.data().is_some());
                self.recent_users = state;
            }
            AppEvent::Log(state) => {
                self.touch(state.updated_at(), state.data().is_some());
                self.log = state;
                self.log_scroll = self.log_scroll.min(self.log_lines());
            }
            AppEvent::Service(Ok(info)) => {
                self.service = Some(info);
                self.error_message = None;
            }
            AppEvent::Service(Err(err)) => {
                self.error_message = Some(format!("API: {}", err));
            }
            AppEvent::UsersLoaded(result) => self.users.finish_load(result),
            AppEvent::UserCreated(result) => self.new_user.finish_submit(result),
            AppEvent::UserDeleted { username, result } => {
                if self.users.finish_delete(&username, result) && !self.users.loading {
                    self.users.begin_load();
                    return Some(Command::Refresh(Page::Users));
                }
            }
            AppEvent::ConfigLoaded(result) => self.config.finish_load(result),
            AppEvent::ConfigSaved(result) => self.config.finish_save(result),
        }
        None
    }

    /// Record a query answer. A successful one also clears the header
    /// error, since the backend is evidently reachable again.
    fn touch(&mut self, at: Option<chrono::DateTime<chrono::Utc>>, succeeded: bool) {
        if succeeded {
            self.error_message = None;
        }
        if let Some(at) = at {
            if self.last_refresh.map_or(true, |last| at > last) {
                self.last_refresh = Some(at);
            }
        }
    }

    /// Lines in the loaded log, the furthest the view can scroll up.
    fn log_lines(&self) -> u16 {
        self.log
            .data()
            .map_or(0, |log| log.lines().count().min(u16::MAX as usize) as u16)
    }

    /// Check if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.state == AppState::Quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftpm_client::{ApiError, MessageResponse, User};

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(Key::Char(c));
        }
    }

    #[test]
    fn test_hotkeys_switch_pages() {
        let mut app = App::new();
        assert_eq!(app.handle_key(Key::Char('2')), Some(Command::EnterPage(Page::Users)));
        assert!(app.users.loading);
        assert_eq!(app.handle_key(Key::Char('2')), None);
        assert_eq!(app.handle_key(Key::BackTab), Some(Command::EnterPage(Page::Dashboard)));
        assert_eq!(app.handle_key(Key::BackTab), Some(Command::EnterPage(Page::Logs)));
    }

    #[test]
    fn test_help_and_quit() {
        let mut app = App::new();
        app.handle_key(Key::Char('?'));
        assert_eq!(app.state, AppState::Help);
        app.handle_key(Key::Char('x'));
        assert_eq!(app.state, AppState::Browsing);
        app.handle_key(Key::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_mismatched_passwords_issue_no_command() {
        let mut app = App::new();
        app.navigate(Page::NewUser);

        app.handle_key(Key::Enter);
        type_text(&mut app, "alice");
        app.handle_key(Key::Tab);
        type_text(&mut app, "secret1");
        app.handle_key(Key::Tab);
        type_text(&mut app, "secret2");
        app.handle_key(Key::Esc);

        assert_eq!(app.handle_key(Key::Char('s')), None);
        assert_eq!(
            app.new_user.notice,
            Some(Notice::Error("Passwords do not match.".to_string()))
        );
    }

    #[test]
    fn test_valid_form_submits_on_last_field() {
        let mut app = App::new();
        app.navigate(Page::NewUser);

        app.handle_key(Key::Enter);
        type_text(&mut app, "alice");
        app.handle_key(Key::Enter);
        type_text(&mut app, "pw");
        app.handle_key(Key::Enter);
        type_text(&mut app, "pw");
        app.handle_key(Key::Enter);
        app.handle_key(Key::Enter);
        type_text(&mut app, "250");

        let command = app.handle_key(Key::Enter);
        assert_eq!(
            command,
            Some(Command::CreateUser(CreateUserRequest {
                username: "alice".to_string(),
                password: "pw".to_string(),
                home_dir: None,
                quota_mb: Some(250),
            }))
        );
        assert_eq!(app.state, AppState::Browsing);
    }

    #[test]
    fn test_leaving_page_resets_pending_flags() {
        let mut app = App::new();
        app.navigate(Page::NewUser);
        app.new_user.submitting = true;
        app.navigate(Page::Dashboard);
        assert!(!app.new_user.submitting);
    }

    #[test]
    fn test_delete_flow_reloads_users() {
        let mut app = App::new();
        app.navigate(Page::Users);
        app.apply(AppEvent::UsersLoaded(Ok(vec![User {
            username: "alice".to_string(),
            home_dir: "/home/ftpusers/alice".to_string(),
            quota_mb: 100,
            created_at: "2025-01-06".to_string(),
            status: Some("active".to_string()),
            permissions: None,
            email: None,
        }])));

        assert_eq!(app.handle_key(Key::Char('d')), None);
        assert_eq!(
            app.handle_key(Key::Char('y')),
            Some(Command::DeleteUser("alice".to_string()))
        );

        let follow_up = app.apply(AppEvent::UserDeleted {
            username: "alice".to_string(),
            result: Ok(MessageResponse {
                message: "User alice deleted successfully".to_string(),
            }),
        });
        assert_eq!(follow_up, Some(Command::Refresh(Page::Users)));
        assert!(app.users.loading);
    }

    #[test]
    fn test_failed_delete_keeps_list() {
        let mut app = App::new();
        let follow_up = app.apply(AppEvent::UserDeleted {
            username: "ghost".to_string(),
            result: Err(ApiError::Status {
                status: 404,
                message: "User not found".to_string(),
            }),
        });
        assert_eq!(follow_up, None);
        assert_eq!(
            app.users.notice,
            Some(Notice::Error("Failed to delete ghost: User not found".to_string()))
        );
    }

    #[test]
    fn test_leaving_new_user_page_discards_draft() {
        let mut app = App::new();
        app.navigate(Page::NewUser);
        app.handle_key(Key::Enter);
        type_text(&mut app, "alice");
        app.handle_key(Key::Tab);
        type_text(&mut app, "hunter2");
        app.handle_key(Key::Esc);

        app.navigate(Page::Dashboard);
        app.navigate(Page::NewUser);

        assert!(app.new_user.username.is_empty());
        assert!(app.new_user.password.is_empty());
        assert!(app.new_user.confirm_password.is_empty());
        assert_eq!(app.new_user.focus, crate::domain::NewUserField::Username);
    }

    #[test]
    fn test_successful_poll_clears_service_error() {
        let mut app = App::new();
        app.apply(AppEvent::Service(Err(ApiError::Status {
            status: 502,
            message: "HTTP 502".to_string(),
        })));
        assert_eq!(app.error_message.as_deref(), Some("API: HTTP 502"));

        // A failing query leaves it in place.
        app.apply(AppEvent::RecentUsers(QueryState::failed("HTTP 502", 4)));
        assert!(app.error_message.is_some());

        app.apply(AppEvent::Stats(QueryState::success(DashboardStats {
            active_users: 1,
            server_status: "online".to_string(),
            server_version: "vsftpd v3.0.5".to_string(),
            uptime: "0:01:00".to_string(),
            transfers_24h: 0,
            disk_used_gb: 1.0,
            disk_total_gb: 10.0,
            disk_usage_percent: 10.0,
            total_users: None,
            active_connections: None,
            ftp_port: None,
            ssl_enabled: None,
        })));
        assert_eq!(app.error_message, None);
    }

    #[test]
    fn test_log_scroll_stops_at_top() {
        let mut app = App::new();
        app.navigate(Page::Logs);
        app.apply(AppEvent::Log(QueryState::success("a\nb\nc".to_string())));

        for _ in 0..10 {
            app.handle_key(Key::Up);
        }
        assert_eq!(app.log_scroll, 3);

        app.handle_key(Key::Down);
        assert_eq!(app.log_scroll, 2);

        // A shorter log pulls the offset back in range.
        app.apply(AppEvent::Log(QueryState::success("a".to_string())));
        assert_eq!(app.log_scroll, 1);
    }

    #[test]
    fn test_refresh_skips_load_in_flight() {
        let mut app = App::new();
        assert_eq!(app.navigate(Page::Users), Some(Command::EnterPage(Page::Users)));
        assert!(app.users.loading);
        assert_eq!(app.handle_key(Key::Char('r')), None);

        app.apply(AppEvent::UsersLoaded(Ok(Vec::new())));
        assert_eq!(app.handle_key(Key::Char('r')), Some(Command::Refresh(Page::Users)));
        assert_eq!(app.handle_key(Key::Char('R')), None);

        app.navigate(Page::Config);
        assert_eq!(app.handle_key(Key::Char('r')), None);
    }

    #[test]
    fn test_query_events_update_last_refresh() {
        let mut app = App::new();
        assert!(app.last_refresh.is_none());
        app.apply(AppEvent::Log(QueryState::success("line\n".to_string())));
        assert!(app.last_refresh.is_some());
        assert_eq!(app.log.data().map(String::as_str), Some("line\n"));
    }
}

//! Rendering tests against ratatui's in-memory backend.

use ratatui::{backend::TestBackend, Terminal};

use ftpm_admin::domain::{App, AppEvent, AppState, Page, UserCounters};
use ftpm_admin::{demo, ui};
use ftpm_client::{ApiError, QueryState};

const LEFT_PANEL_WIDTH: usize = 28;

fn draw(app: &App) -> String {
    let backend = TestBackend::new(140, 40);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();

    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_dashboard_error_shows_alert_not_values() {
    let mut app = App::new();
    app.apply(AppEvent::Stats(QueryState::failed("vsftpd unreachable", 4)));

    let screen = draw(&app);
    assert!(screen.contains("Failed to load dashboard statistics"));
    assert!(screen.contains("vsftpd unreachable"));
    assert!(!screen.contains("░░░░░░"));
}

#[test]
fn test_dashboard_loading_shows_skeletons() {
    let app = App::new();
    let screen = draw(&app);
    assert!(screen.contains("░░░░░░"));
    assert!(!screen.contains("Failed to load"));
}

#[test]
fn test_dashboard_with_demo_data() {
    let mut app = App::new();
    demo::set_demo_data(&mut app);

    let screen = draw(&app);
    assert!(screen.contains("Active Users"));
    assert!(screen.contains("vsftpd v3.0.5"));
    assert!(screen.contains("alice"));
    assert!(screen.contains("[Completo]"));
}

#[test]
fn test_empty_user_list() {
    let mut app = App::new();
    app.navigate(Page::Users);
    app.apply(AppEvent::UsersLoaded(Ok(Vec::new())));

    let screen = draw(&app);
    assert!(screen.contains("No users yet."));
    assert_eq!(app.users.counters(), UserCounters::default());

    // The row under the card titles holds one value per card, all zero.
    let rows: Vec<&str> = screen.lines().collect();
    let titles = rows
        .iter()
        .position(|row| {
            ["Total", "Active", "Inactive", "Suspended"]
                .iter()
                .all(|title| row.contains(&format!(" {} ", title)))
        })
        .expect("counter cards are rendered");
    let values: String = rows[titles + 1].chars().skip(LEFT_PANEL_WIDTH).collect();
    let digits: Vec<char> = values.chars().filter(char::is_ascii_digit).collect();
    assert_eq!(digits, ['0', '0', '0', '0']);
}

#[test]
fn test_config_load_error() {
    let mut app = App::new();
    app.navigate(Page::Config);
    app.apply(AppEvent::ConfigLoaded(Err(ApiError::Status {
        status: 500,
        message: "HTTP 500".to_string(),
    })));

    let screen = draw(&app);
    assert!(screen.contains("Failed to load configuration."));
}

#[test]
fn test_empty_log() {
    let mut app = App::new();
    app.navigate(Page::Logs);
    app.apply(AppEvent::Log(QueryState::success(String::new())));

    assert!(draw(&app).contains("No log entries."));
}

#[test]
fn test_password_mismatch_is_shown_inline() {
    let mut app = App::new();
    app.navigate(Page::NewUser);
    app.new_user.username = "alice".to_string();
    app.new_user.password = "hunter2".to_string();
    app.new_user.confirm_password = "hunter3".to_string();
    assert!(app.new_user.submit().is_none());

    let screen = draw(&app);
    assert!(screen.contains("Passwords do not match."));
    // Secrets are masked.
    assert!(!screen.contains("hunter"));
}

#[test]
fn test_help_overlay() {
    let mut app = App::new();
    app.state = AppState::Help;
    assert!(draw(&app).contains("FTPM-ADMIN HELP"));
}
